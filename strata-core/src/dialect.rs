use crate::{DbHelper, DbSetting, GenericDbHelper, GenericStatementBuilder, StatementBuilder};

/// A database backend: its settings, statement builder and schema helper.
pub trait Dialect {
    type StatementBuilder: StatementBuilder + 'static;
    type DbHelper: DbHelper + 'static;

    /// Name the dialect is registered under.
    const NAME: &'static str;

    fn statement_builder(&self) -> Self::StatementBuilder;

    fn db_helper(&self) -> Self::DbHelper;

    fn db_setting(&self) -> DbSetting {
        self.statement_builder().db_setting().clone()
    }
}

/// ANSI flavored dialect, used when no specific backend applies.
#[derive(Debug, Default, Clone)]
pub struct GenericDialect {
    setting: DbSetting,
}

impl GenericDialect {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_setting(setting: DbSetting) -> Self {
        Self { setting }
    }
}

impl Dialect for GenericDialect {
    type StatementBuilder = GenericStatementBuilder;
    type DbHelper = GenericDbHelper;

    const NAME: &'static str = "generic";

    fn statement_builder(&self) -> Self::StatementBuilder {
        GenericStatementBuilder::with_setting(self.setting.clone())
    }

    fn db_helper(&self) -> Self::DbHelper {
        GenericDbHelper::with_setting(self.setting.clone())
    }

    fn db_setting(&self) -> DbSetting {
        self.setting.clone()
    }
}
