use crate::{DbSetting, Result, StrataError, Value, as_quoted};
use std::fmt::{self, Display};

/// A column reference, independent of any entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Field {
    pub name: String,
    /// Host type tag (a [`Value`] without payload), `None` when unknown.
    pub value_type: Option<Value>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: None,
        }
    }
    pub fn with_type(mut self, value_type: Value) -> Self {
        self.value_type = Some(value_type.as_type());
        self
    }
    /// One untyped field per name.
    pub fn from_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Vec<Field> {
        names.into_iter().map(Field::new).collect()
    }
    /// The quoted column, dots are part of the name.
    pub fn as_field(&self, setting: &DbSetting) -> String {
        as_quoted(&self.name, true, true, setting)
    }
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::new(value)
    }
}

/// Rejects empty field names.
pub fn guard_field_names<'a>(fields: impl IntoIterator<Item = &'a Field>) -> Result<()> {
    for field in fields {
        if field.name.trim().is_empty() {
            return Err(StrataError::invalid_argument(
                "The field name cannot be empty",
            ));
        }
    }
    Ok(())
}

/// Names of `fields` joined by `", "`, used in error messages.
pub fn join_names<'a>(fields: impl IntoIterator<Item = &'a Field>) -> String {
    fields
        .into_iter()
        .map(|v| v.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A column as described by schema introspection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DbField {
    pub name: String,
    pub is_primary: bool,
    pub is_identity: bool,
    pub is_nullable: bool,
    /// Host type tag resolved from `database_type`.
    pub value_type: Option<Value>,
    pub size: Option<u32>,
    pub precision: Option<u8>,
    pub scale: Option<u8>,
    /// Native type name as reported by the database.
    pub database_type: Option<String>,
}

impl DbField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_nullable: true,
            ..Default::default()
        }
    }
    pub fn primary(name: impl Into<String>) -> Self {
        Self {
            is_primary: true,
            is_nullable: false,
            ..Self::new(name)
        }
    }
    pub fn identity(name: impl Into<String>) -> Self {
        Self {
            is_identity: true,
            is_nullable: false,
            ..Self::new(name)
        }
    }
    pub fn with_type(mut self, value_type: Value) -> Self {
        self.value_type = Some(value_type.as_type());
        self
    }
    pub fn as_field(&self) -> Field {
        Field {
            name: self.name.clone(),
            value_type: self.value_type.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl Order {
    pub fn as_text(&self) -> &'static str {
        match self {
            Order::Ascending => "ASC",
            Order::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderField {
    pub name: String,
    pub order: Order,
}

impl OrderField {
    pub fn new(name: impl Into<String>, order: Order) -> Self {
        Self {
            name: name.into(),
            order,
        }
    }
    pub fn ascending(name: impl Into<String>) -> Self {
        Self::new(name, Order::Ascending)
    }
    pub fn descending(name: impl Into<String>) -> Self {
        Self::new(name, Order::Descending)
    }
    pub fn as_field(&self, setting: &DbSetting) -> String {
        format!(
            "{} {}",
            as_quoted(&self.name, true, true, setting),
            self.order.as_text()
        )
    }
}
