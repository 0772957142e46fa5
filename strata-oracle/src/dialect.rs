use crate::{OracleDbHelper, OracleDbSetting, OracleStatementBuilder};
use strata_core::{DbSetting, Dialect};

#[derive(Debug, Clone)]
pub struct OracleDialect {
    setting: DbSetting,
}

impl OracleDialect {
    pub fn new() -> Self {
        Self::with_setting(OracleDbSetting::new())
    }
    pub fn with_setting(setting: DbSetting) -> Self {
        Self { setting }
    }
}

impl Default for OracleDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for OracleDialect {
    type StatementBuilder = OracleStatementBuilder;
    type DbHelper = OracleDbHelper;

    const NAME: &'static str = "oracle";

    fn statement_builder(&self) -> Self::StatementBuilder {
        OracleStatementBuilder::with_setting(self.setting.clone())
    }

    fn db_helper(&self) -> Self::DbHelper {
        OracleDbHelper::with_setting(self.setting.clone())
    }

    fn db_setting(&self) -> DbSetting {
        self.setting.clone()
    }
}
