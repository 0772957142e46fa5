use crate::{DbTypeToSqliteStringNameResolver, SqliteConvertFieldResolver, SqliteDbSetting};
use strata_core::{
    ConvertFieldResolver, DbSetting, DbTypeNameResolver, QueryBuilder, StatementBuilder,
};

#[derive(Debug, Clone)]
pub struct SqliteStatementBuilder {
    setting: DbSetting,
    convert_field_resolver: SqliteConvertFieldResolver,
}

impl SqliteStatementBuilder {
    pub fn new() -> Self {
        Self::with_setting(SqliteDbSetting::new())
    }
    pub fn with_setting(setting: DbSetting) -> Self {
        Self {
            setting,
            convert_field_resolver: crate::sqlite_convert_field_resolver(),
        }
    }
}

impl Default for SqliteStatementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementBuilder for SqliteStatementBuilder {
    fn as_dyn(&self) -> &dyn StatementBuilder {
        self
    }

    fn db_setting(&self) -> &DbSetting {
        &self.setting
    }

    fn convert_field_resolver(&self) -> &dyn ConvertFieldResolver {
        &self.convert_field_resolver
    }

    fn db_type_name_resolver(&self) -> &dyn DbTypeNameResolver {
        &DbTypeToSqliteStringNameResolver
    }

    /// SQLite has no `TRUNCATE`, an unfiltered delete takes the truncate optimization.
    fn write_truncate(&self, builder: &mut QueryBuilder, table: &str) {
        builder
            .delete()
            .from()
            .table_name_from(table, self.db_setting());
    }
}
