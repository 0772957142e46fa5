use crate::{SqliteDbHelper, SqliteDbSetting, SqliteStatementBuilder};
use strata_core::{DbSetting, Dialect};

#[derive(Debug, Clone)]
pub struct SqliteDialect {
    setting: DbSetting,
}

impl SqliteDialect {
    pub fn new() -> Self {
        Self::with_setting(SqliteDbSetting::new())
    }
    pub fn with_setting(setting: DbSetting) -> Self {
        Self { setting }
    }
}

impl Default for SqliteDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for SqliteDialect {
    type StatementBuilder = SqliteStatementBuilder;
    type DbHelper = SqliteDbHelper;

    const NAME: &'static str = "sqlite";

    fn statement_builder(&self) -> Self::StatementBuilder {
        SqliteStatementBuilder::with_setting(self.setting.clone())
    }

    fn db_helper(&self) -> Self::DbHelper {
        SqliteDbHelper::with_setting(self.setting.clone())
    }

    fn db_setting(&self) -> DbSetting {
        self.setting.clone()
    }
}
