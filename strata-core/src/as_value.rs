use crate::{Error, Result, Value};
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use std::any;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Conversion between Rust values and the dynamically typed [`Value`].
///
/// Used to bind parameter values, to describe the host type of a [`crate::Field`] and to decode
/// cells of a result row.
///
/// Narrowing conversions are range checked, the error names both the value and the target type.
///
/// ```rust
/// use strata_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert!(matches!(v, Value::Int32(Some(42))));
/// let n: i64 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// The type tag of `Self` (the variant without payload).
    fn as_empty_value() -> Value;
    fn as_value(self) -> Value;
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

fn mismatch<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {value:?} to {}",
        any::type_name::<T>()
    ))
}

macro_rules! out_of_range {
    ($v:expr, $from:ty, $to:ty) => {
        Error::msg(format!(
            "Value {}: {} is out of range for {}",
            $v,
            stringify!($from),
            stringify!($to)
        ))
    };
}

macro_rules! impl_as_value {
    ($source:ty, $destination:path $(, $pat_rest:pat => $expr_rest:expr)* $(,)?) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self.into()))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(Some(v)) => Ok(v.into()),
                    $($pat_rest => $expr_rest,)*
                    #[allow(unreachable_patterns)]
                    _ => Err(mismatch::<Self>(&value)),
                }
            }
        }
    };
}

impl_as_value!(
    i8,
    Value::Int8,
    Value::UInt8(Some(v)) => v.to_i8().ok_or_else(|| out_of_range!(v, u8, i8)),
    Value::Int16(Some(v)) => v.to_i8().ok_or_else(|| out_of_range!(v, i16, i8)),
    Value::Int32(Some(v)) => v.to_i8().ok_or_else(|| out_of_range!(v, i32, i8)),
    Value::Int64(Some(v)) => v.to_i8().ok_or_else(|| out_of_range!(v, i64, i8)),
);
impl_as_value!(
    i16,
    Value::Int16,
    Value::Int8(Some(v)) => Ok(v as _),
    Value::UInt8(Some(v)) => Ok(v as _),
    Value::UInt16(Some(v)) => v.to_i16().ok_or_else(|| out_of_range!(v, u16, i16)),
    Value::Int32(Some(v)) => v.to_i16().ok_or_else(|| out_of_range!(v, i32, i16)),
    Value::Int64(Some(v)) => v.to_i16().ok_or_else(|| out_of_range!(v, i64, i16)),
);
impl_as_value!(
    i32,
    Value::Int32,
    Value::Int8(Some(v)) => Ok(v as _),
    Value::Int16(Some(v)) => Ok(v as _),
    Value::UInt8(Some(v)) => Ok(v as _),
    Value::UInt16(Some(v)) => Ok(v as _),
    Value::UInt32(Some(v)) => v.to_i32().ok_or_else(|| out_of_range!(v, u32, i32)),
    Value::Int64(Some(v)) => v.to_i32().ok_or_else(|| out_of_range!(v, i64, i32)),
    Value::Decimal(Some(v), ..) => v.to_i32().ok_or_else(|| out_of_range!(v, Decimal, i32)),
);
impl_as_value!(
    i64,
    Value::Int64,
    Value::Int8(Some(v)) => Ok(v as _),
    Value::Int16(Some(v)) => Ok(v as _),
    Value::Int32(Some(v)) => Ok(v as _),
    Value::UInt8(Some(v)) => Ok(v as _),
    Value::UInt16(Some(v)) => Ok(v as _),
    Value::UInt32(Some(v)) => Ok(v as _),
    Value::UInt64(Some(v)) => v.to_i64().ok_or_else(|| out_of_range!(v, u64, i64)),
    Value::Decimal(Some(v), ..) => v.to_i64().ok_or_else(|| out_of_range!(v, Decimal, i64)),
);
impl_as_value!(
    u8,
    Value::UInt8,
    Value::Int8(Some(v)) => v.to_u8().ok_or_else(|| out_of_range!(v, i8, u8)),
    Value::Int16(Some(v)) => v.to_u8().ok_or_else(|| out_of_range!(v, i16, u8)),
);
impl_as_value!(
    u16,
    Value::UInt16,
    Value::UInt8(Some(v)) => Ok(v as _),
    Value::Int32(Some(v)) => v.to_u16().ok_or_else(|| out_of_range!(v, i32, u16)),
);
impl_as_value!(
    u32,
    Value::UInt32,
    Value::UInt8(Some(v)) => Ok(v as _),
    Value::UInt16(Some(v)) => Ok(v as _),
    Value::Int64(Some(v)) => v.to_u32().ok_or_else(|| out_of_range!(v, i64, u32)),
);
impl_as_value!(
    u64,
    Value::UInt64,
    Value::UInt8(Some(v)) => Ok(v as _),
    Value::UInt16(Some(v)) => Ok(v as _),
    Value::UInt32(Some(v)) => Ok(v as _),
    Value::Int64(Some(v)) => v.to_u64().ok_or_else(|| out_of_range!(v, i64, u64)),
    Value::Decimal(Some(v), ..) => v.to_u64().ok_or_else(|| out_of_range!(v, Decimal, u64)),
);
impl_as_value!(
    bool,
    Value::Boolean,
    Value::Int8(Some(v)) => Ok(v != 0),
    Value::Int16(Some(v)) => Ok(v != 0),
    Value::Int32(Some(v)) => Ok(v != 0),
    Value::Int64(Some(v)) => Ok(v != 0),
    Value::UInt8(Some(v)) => Ok(v != 0),
    Value::Decimal(Some(v), ..) => Ok(!v.is_zero()),
);
impl_as_value!(
    f32,
    Value::Float32,
    Value::Float64(Some(v)) => Ok(v as _),
    Value::Decimal(Some(v), ..) => v.to_f32().ok_or_else(|| out_of_range!(v, Decimal, f32)),
);
impl_as_value!(
    f64,
    Value::Float64,
    Value::Float32(Some(v)) => Ok(v as _),
    Value::Int32(Some(v)) => Ok(v as _),
    Value::Int64(Some(v)) => Ok(v as _),
    Value::Decimal(Some(v), ..) => v.to_f64().ok_or_else(|| out_of_range!(v, Decimal, f64)),
);
impl_as_value!(
    char,
    Value::Char,
    Value::Varchar(Some(ref v)) => {
        let mut chars = v.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::msg(format!(
                "Cannot convert Value::Varchar({v:?}) into a char, it must contain exactly one character"
            ))),
        }
    },
);
impl_as_value!(
    String,
    Value::Varchar,
    Value::Char(Some(v)) => Ok(v.into()),
);
impl_as_value!(Box<[u8]>, Value::Blob);
impl_as_value!(Date, Value::Date, Value::Timestamp(Some(v)) => Ok(v.date()));
impl_as_value!(Time, Value::Time);
impl_as_value!(
    PrimitiveDateTime,
    Value::Timestamp,
    Value::TimestampWithTimezone(Some(v)) => {
        let v = v.to_offset(time::UtcOffset::UTC);
        Ok(PrimitiveDateTime::new(v.date(), v.time()))
    },
);
impl_as_value!(
    OffsetDateTime,
    Value::TimestampWithTimezone,
    Value::Timestamp(Some(v)) => Ok(v.assume_utc()),
);
impl_as_value!(Duration, Value::Interval);
impl_as_value!(
    Uuid,
    Value::Uuid,
    Value::Varchar(Some(ref v)) => Uuid::parse_str(v).map_err(|e| {
        Error::new(e).context(format!("Cannot convert Value::Varchar({v:?}) into a Uuid"))
    }),
);

impl AsValue for Vec<u8> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self.into_boxed_slice()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Box::<[u8]>::try_from_value(value).map(Into::into)
    }
}

impl AsValue for Decimal {
    fn as_empty_value() -> Value {
        Value::Decimal(None, 0, 0)
    }
    fn as_value(self) -> Value {
        Value::Decimal(Some(self), 0, self.scale() as _)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Decimal(Some(v), ..) => Ok(v),
            Value::Int8(Some(v)) => Ok(Decimal::from(v)),
            Value::Int16(Some(v)) => Ok(Decimal::from(v)),
            Value::Int32(Some(v)) => Ok(Decimal::from(v)),
            Value::Int64(Some(v)) => Ok(Decimal::from(v)),
            Value::UInt8(Some(v)) => Ok(Decimal::from(v)),
            Value::UInt16(Some(v)) => Ok(Decimal::from(v)),
            Value::UInt32(Some(v)) => Ok(Decimal::from(v)),
            Value::UInt64(Some(v)) => Ok(Decimal::from(v)),
            Value::Float32(Some(v)) => {
                Decimal::from_f32(v).ok_or_else(|| mismatch::<Self>(&value))
            }
            Value::Float64(Some(v)) => {
                Decimal::from_f64(v).ok_or_else(|| mismatch::<Self>(&value))
            }
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(if value.is_null() {
            None
        } else {
            Some(<T as AsValue>::try_from_value(value)?)
        })
    }
}

