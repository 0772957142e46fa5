use crate::{DbSetting, DbType, Field, Result, StrataError, Value, as_quoted};

/// Write path, first step: host type to portable type.
pub trait ClientTypeResolver: Send + Sync {
    fn resolve(&self, value_type: &Value) -> Result<DbType>;
}

/// Write path, second step: portable type to the native type name of a dialect.
pub trait DbTypeNameResolver: Send + Sync {
    fn resolve(&self, db_type: DbType) -> Result<&'static str>;
}

/// Read path: native type name, in any casing, to host type.
///
/// Unknown names degrade to `Value::Null` (the opaque type) instead of failing.
pub trait NativeTypeResolver: Send + Sync {
    fn resolve(&self, native_type: &str) -> Result<Value>;
}

/// Renders a field reference, wrapped in a `CAST` when its host type is known.
pub trait ConvertFieldResolver: Send + Sync {
    fn resolve(&self, field: &Field, setting: &DbSetting) -> Result<String>;
}

/// Host type an average is computed in.
pub trait AverageableTypeResolver: Send + Sync {
    fn resolve(&self, value_type: &Value) -> Result<Value>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ClientTypeToDbTypeResolver;

impl ClientTypeResolver for ClientTypeToDbTypeResolver {
    fn resolve(&self, value_type: &Value) -> Result<DbType> {
        Ok(match value_type {
            Value::Boolean(..) => DbType::Boolean,
            Value::Int8(..) => DbType::SByte,
            Value::Int16(..) => DbType::Int16,
            Value::Int32(..) => DbType::Int32,
            Value::Int64(..) => DbType::Int64,
            Value::UInt8(..) => DbType::Byte,
            Value::UInt16(..) => DbType::UInt16,
            Value::UInt32(..) => DbType::UInt32,
            Value::UInt64(..) => DbType::UInt64,
            Value::Float32(..) => DbType::Single,
            Value::Float64(..) => DbType::Double,
            Value::Decimal(..) => DbType::Decimal,
            Value::Char(..) => DbType::StringFixedLength,
            Value::Varchar(..) => DbType::String,
            Value::Blob(..) => DbType::Binary,
            Value::Date(..) => DbType::Date,
            Value::Time(..) => DbType::Time,
            Value::Timestamp(..) => DbType::DateTime,
            Value::TimestampWithTimezone(..) => DbType::DateTimeOffset,
            Value::Interval(..) => DbType::Time,
            Value::Uuid(..) => DbType::Guid,
            Value::Null => {
                return Err(StrataError::unsupported_type(format!(
                    "The host type `{}` has no portable type",
                    value_type.type_name()
                )));
            }
        })
    }
}

/// Widens integers and single precision floats so the average is not truncated.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClientTypeToAverageableClientTypeResolver;

impl AverageableTypeResolver for ClientTypeToAverageableClientTypeResolver {
    fn resolve(&self, value_type: &Value) -> Result<Value> {
        match value_type {
            Value::Int8(..)
            | Value::Int16(..)
            | Value::Int32(..)
            | Value::Int64(..)
            | Value::UInt8(..)
            | Value::UInt16(..)
            | Value::UInt32(..)
            | Value::UInt64(..)
            | Value::Float32(..) => Ok(Value::Float64(None)),
            Value::Float64(..) | Value::Decimal(..) => Ok(value_type.as_type()),
            _ => Err(StrataError::unsupported_type(format!(
                "Cannot compute an average over the host type `{}`",
                value_type.type_name()
            ))),
        }
    }
}

/// Composes a [`ClientTypeResolver`] and a [`DbTypeNameResolver`] into `CAST(<field> AS <name>)`.
#[derive(Debug, Default, Clone)]
pub struct DbConvertFieldResolver<C, N> {
    pub client_type_resolver: C,
    pub db_type_name_resolver: N,
}

impl<C, N> DbConvertFieldResolver<C, N> {
    pub fn new(client_type_resolver: C, db_type_name_resolver: N) -> Self {
        Self {
            client_type_resolver,
            db_type_name_resolver,
        }
    }
}

impl<C: ClientTypeResolver, N: DbTypeNameResolver> ConvertFieldResolver
    for DbConvertFieldResolver<C, N>
{
    fn resolve(&self, field: &Field, setting: &DbSetting) -> Result<String> {
        let quoted = as_quoted(&field.name, true, true, setting);
        let Some(value_type) = &field.value_type else {
            return Ok(quoted);
        };
        let db_type = self.client_type_resolver.resolve(value_type)?;
        let name = self.db_type_name_resolver.resolve(db_type)?;
        Ok(format!("CAST({quoted} AS {name})"))
    }
}

/// Type names of the generic dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct DbTypeToGenericStringNameResolver;

impl DbTypeNameResolver for DbTypeToGenericStringNameResolver {
    fn resolve(&self, db_type: DbType) -> Result<&'static str> {
        Ok(match db_type {
            DbType::AnsiString | DbType::String | DbType::Xml => "VARCHAR",
            DbType::AnsiStringFixedLength | DbType::StringFixedLength => "CHAR",
            DbType::Binary => "BLOB",
            DbType::Boolean => "BOOLEAN",
            DbType::SByte => "TINYINT",
            DbType::Byte => "UTINYINT",
            DbType::Int16 => "SMALLINT",
            DbType::Int32 => "INTEGER",
            DbType::Int64 => "BIGINT",
            DbType::UInt16 => "USMALLINT",
            DbType::UInt32 => "UINTEGER",
            DbType::UInt64 => "UBIGINT",
            DbType::Single => "FLOAT",
            DbType::Double => "DOUBLE",
            DbType::Decimal | DbType::Currency | DbType::VarNumeric => "DECIMAL",
            DbType::Date => "DATE",
            DbType::Time => "TIME",
            DbType::DateTime | DbType::DateTime2 => "TIMESTAMP",
            DbType::DateTimeOffset => "TIMESTAMP WITH TIME ZONE",
            DbType::Guid => "UUID",
            DbType::Object => {
                return Err(StrataError::unsupported_type(format!(
                    "The portable type `{db_type}` has no generic type name"
                )));
            }
        })
    }
}

/// Read path of the generic dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericNativeTypeResolver;

impl NativeTypeResolver for GenericNativeTypeResolver {
    fn resolve(&self, native_type: &str) -> Result<Value> {
        let name = native_type.trim();
        if name.is_empty() {
            return Err(StrataError::null_argument(
                "The native type name cannot be empty",
            ));
        }
        let upper = name.to_ascii_uppercase();
        let base = upper.split('(').next().unwrap_or_default().trim();
        Ok(match base {
            "BOOLEAN" | "BOOL" => Value::Boolean(None),
            "TINYINT" | "INT1" => Value::Int8(None),
            "SMALLINT" | "INT2" => Value::Int16(None),
            "INTEGER" | "INT" | "INT4" => Value::Int32(None),
            "BIGINT" | "INT8" => Value::Int64(None),
            "UTINYINT" => Value::UInt8(None),
            "USMALLINT" => Value::UInt16(None),
            "UINTEGER" => Value::UInt32(None),
            "UBIGINT" => Value::UInt64(None),
            "FLOAT" | "REAL" | "FLOAT4" => Value::Float32(None),
            "DOUBLE" | "DOUBLE PRECISION" | "FLOAT8" => Value::Float64(None),
            "DECIMAL" | "NUMERIC" => Value::Decimal(None, 0, 0),
            "CHAR" | "CHARACTER" | "BPCHAR" => Value::Varchar(None),
            "VARCHAR" | "CHARACTER VARYING" | "TEXT" | "STRING" => Value::Varchar(None),
            "BLOB" | "BYTEA" | "VARBINARY" => Value::Blob(None),
            "DATE" => Value::Date(None),
            "TIME" => Value::Time(None),
            "TIMESTAMP" | "DATETIME" => Value::Timestamp(None),
            "TIMESTAMP WITH TIME ZONE" | "TIMESTAMPTZ" => Value::TimestampWithTimezone(None),
            "INTERVAL" => Value::Interval(None),
            "UUID" => Value::Uuid(None),
            _ => {
                log::warn!("Unknown native type `{name}`, it will be treated as opaque");
                Value::Null
            }
        })
    }
}
