use strata_core::{DbSetting, Value};

/// Settings of the Oracle dialect.
pub struct OracleDbSetting;

impl OracleDbSetting {
    /// Double quotes, `:` parameters, `MERGE` instead of a native upsert.
    pub fn new() -> DbSetting {
        DbSetting {
            opening_quote: "\"".into(),
            closing_quote: "\"".into(),
            parameter_prefix: ":".into(),
            are_table_hints_supported: true,
            is_use_upsert: false,
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
