use crate::Value;

/// Per-dialect configuration consumed by the statement builders and helpers.
///
/// Every dialect ships a constructor with its own defaults, the `with_*` methods adjust them
/// before the setting is handed to a builder.
#[derive(Debug, Clone, PartialEq)]
pub struct DbSetting {
    pub opening_quote: String,
    pub closing_quote: String,
    /// Prefix of the native parameter markers (`:`, `@`).
    pub parameter_prefix: String,
    pub are_table_hints_supported: bool,
    /// The upsert is native (`ON CONFLICT`), otherwise it is emulated with `MERGE`.
    pub is_use_upsert: bool,
    pub default_schema: Option<String>,
    /// Host type used by `Average` when the field type is unknown.
    pub averageable_type: Value,
    pub is_multi_statement_executable: bool,
    pub is_preparable: bool,
    pub is_direction_supported: bool,
    pub is_execute_reader_disposable: bool,
    /// Largest number of items accepted in one `IN ( … )` list.
    pub max_in_list_size: usize,
    /// Largest number of parameters bound by one statement, `0` when unbounded.
    pub max_statement_parameters: usize,
}

impl Default for DbSetting {
    fn default() -> Self {
        Self {
            opening_quote: "\"".into(),
            closing_quote: "\"".into(),
            parameter_prefix: "@".into(),
            are_table_hints_supported: true,
            is_use_upsert: true,
            default_schema: None,
            averageable_type: Value::Float64(None),
            is_multi_statement_executable: true,
            is_preparable: true,
            is_direction_supported: true,
            is_execute_reader_disposable: true,
            max_in_list_size: 1000,
            max_statement_parameters: 0,
        }
    }
}

impl DbSetting {
    pub fn with_quotes(mut self, opening: impl Into<String>, closing: impl Into<String>) -> Self {
        self.opening_quote = opening.into();
        self.closing_quote = closing.into();
        self
    }
    pub fn with_parameter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.parameter_prefix = prefix.into();
        self
    }
    pub fn with_table_hints_supported(mut self, value: bool) -> Self {
        self.are_table_hints_supported = value;
        self
    }
    pub fn with_use_upsert(mut self, value: bool) -> Self {
        self.is_use_upsert = value;
        self
    }
    pub fn with_default_schema(mut self, schema: Option<impl Into<String>>) -> Self {
        self.default_schema = schema.map(Into::into);
        self
    }
    pub fn with_averageable_type(mut self, value_type: Value) -> Self {
        self.averageable_type = value_type.as_type();
        self
    }
    pub fn with_multi_statement_executable(mut self, value: bool) -> Self {
        self.is_multi_statement_executable = value;
        self
    }
    pub fn with_preparable(mut self, value: bool) -> Self {
        self.is_preparable = value;
        self
    }
    pub fn with_direction_supported(mut self, value: bool) -> Self {
        self.is_direction_supported = value;
        self
    }
    pub fn with_execute_reader_disposable(mut self, value: bool) -> Self {
        self.is_execute_reader_disposable = value;
        self
    }
    pub fn with_max_in_list_size(mut self, value: usize) -> Self {
        self.max_in_list_size = value;
        self
    }
    pub fn with_max_statement_parameters(mut self, value: usize) -> Self {
        self.max_statement_parameters = value;
        self
    }
}
