use crate::{SqliteDbSetting, SqliteTypeNameToClientTypeResolver};
use strata_core::{
    DbHelper, DbSetting, NativeTypeResolver, Parameter, Result, guard_table_name,
    split_table_name,
};

/// Introspection through the `pragma_table_info` table valued function.
#[derive(Debug, Clone)]
pub struct SqliteDbHelper {
    setting: DbSetting,
    native_type_resolver: SqliteTypeNameToClientTypeResolver,
}

impl SqliteDbHelper {
    pub fn new() -> Self {
        Self::with_setting(SqliteDbSetting::new())
    }
    pub fn with_setting(setting: DbSetting) -> Self {
        Self {
            setting,
            native_type_resolver: SqliteTypeNameToClientTypeResolver,
        }
    }
}

impl Default for SqliteDbHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl DbHelper for SqliteDbHelper {
    fn db_setting(&self) -> &DbSetting {
        &self.setting
    }

    fn native_type_resolver(&self) -> &dyn NativeTypeResolver {
        &self.native_type_resolver
    }

    fn fields_query(&self) -> &str {
        // A rowid alias is the only identity SQLite knows
        r#"SELECT [name]
, CASE WHEN [pk] > 0 THEN 1 ELSE 0 END AS [IsPrimary]
, CASE WHEN [pk] = 1 AND UPPER([type]) = 'INTEGER' THEN 1 ELSE 0 END AS [IsIdentity]
, CASE WHEN [notnull] = 0 THEN 1 ELSE 0 END AS [IsNullable]
, [type] AS [DataType]
FROM pragma_table_info(@TableName, @Schema)
ORDER BY [cid]"#
    }

    /// The schema is the attached database name, `main` when omitted.
    fn create_get_fields(&self, table: &str) -> Result<(String, Vec<Parameter>)> {
        guard_table_name(table)?;
        let (schema, name) = split_table_name(table, self.db_setting());
        Ok((
            self.fields_query().to_string(),
            vec![
                Parameter::new("TableName", name),
                Parameter::new("Schema", schema.unwrap_or_else(|| "main".into())),
            ],
        ))
    }

    fn create_scope_identity(&self) -> Result<String> {
        Ok("SELECT last_insert_rowid() ;".into())
    }
}
