use crate::{AsValue, Context, Error, Result, Value};
use std::sync::Arc;

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(names: RowNames, values: Row) -> Self {
        Self {
            labels: names,
            values,
        }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    /// Case-insensitive column lookup, metadata queries do not agree on the casing.
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v.eq_ignore_ascii_case(name))
            .map(|i| &self.values()[i])
    }
    /// Decodes the column `name`, failing if it is missing.
    pub fn get<T: AsValue>(&self, name: &str) -> Result<T> {
        let value = self
            .get_column(name)
            .ok_or_else(|| Error::msg(format!("Column `{name}` is not present in the row")))?;
        T::try_from_value(value.clone())
            .with_context(|| format!("While decoding the column `{name}`"))
    }
}

impl From<RowLabeled> for Row {
    fn from(value: RowLabeled) -> Self {
        value.values
    }
}

impl<'a> From<&'a RowLabeled> for &'a Row {
    fn from(value: &'a RowLabeled) -> Self {
        &value.values
    }
}

/// Builds a typed record out of one result row.
pub trait FromRow: Sized {
    fn from_row(row: RowLabeled) -> Result<Self>;
}

impl FromRow for RowLabeled {
    fn from_row(row: RowLabeled) -> Result<Self> {
        Ok(row)
    }
}

impl FromRow for Row {
    fn from_row(row: RowLabeled) -> Result<Self> {
        Ok(row.values)
    }
}

macro_rules! impl_from_row_tuple {
    ($len:literal, $($t:ident),+) => {
        impl<$($t: AsValue),+> FromRow for ($($t,)+) {
            fn from_row(row: RowLabeled) -> Result<Self> {
                if row.values.len() < $len {
                    return Err(Error::msg(format!(
                        "Expected at least {} columns but the row has {}",
                        $len,
                        row.values.len()
                    )));
                }
                let mut values = row.values.into_vec().into_iter();
                Ok(($(
                    $t::try_from_value(values.next().unwrap_or_default())?,
                )+))
            }
        }
    };
}
impl_from_row_tuple!(1, A);
impl_from_row_tuple!(2, A, B);
impl_from_row_tuple!(3, A, B, C);
impl_from_row_tuple!(4, A, B, C, D);
