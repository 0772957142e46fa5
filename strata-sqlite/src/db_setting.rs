use strata_core::DbSetting;

pub struct SqliteDbSetting;

impl SqliteDbSetting {
    /// Bracket quotes, `@` parameters, no hints, at most 999 host parameters per statement.
    pub fn new() -> DbSetting {
        DbSetting::default()
            .with_quotes("[", "]")
            .with_parameter_prefix("@")
            .with_table_hints_supported(false)
            .with_use_upsert(true)
            .with_max_in_list_size(999)
            .with_max_statement_parameters(999)
    }
}
