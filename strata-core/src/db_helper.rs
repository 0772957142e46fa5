use crate::{
    AsValue, Context, DbField, DbSetting, GenericNativeTypeResolver, NativeTypeResolver,
    Parameter, QueryMultipleExtractor, Result, ResultReader, RowLabeled, StrataError, Value,
    as_unquoted, guard_table_name,
};

/// Native type assumed when the introspection query reports none.
pub const FALLBACK_NATIVE_TYPE: &str = "text";

/// Splits `schema.table` into its unquoted parts, the schema falls back to the setting default.
pub fn split_table_name(table: &str, setting: &DbSetting) -> (Option<String>, String) {
    let unquoted = as_unquoted(table, true, setting);
    match unquoted.split_once('.') {
        Some((schema, name)) if !schema.is_empty() => (Some(schema.into()), name.into()),
        _ => (setting.default_schema.clone(), unquoted),
    }
}

/// Schema introspection of one dialect.
///
/// The helper only compiles the introspection query and decodes its rows, executing it is up to
/// the caller. Rows are read by position:
/// 0. column name
/// 1. primary key flag
/// 2. identity flag
/// 3. nullable flag
/// 4. native type name
pub trait DbHelper: Send + Sync {
    fn db_setting(&self) -> &DbSetting;

    fn native_type_resolver(&self) -> &dyn NativeTypeResolver;

    /// Introspection command text, it binds `TableName` and `Schema`.
    fn fields_query(&self) -> &str;

    /// Introspection query of `table` together with its parameters.
    fn create_get_fields(&self, table: &str) -> Result<(String, Vec<Parameter>)> {
        guard_table_name(table)?;
        let (schema, name) = split_table_name(table, self.db_setting());
        Ok((
            self.fields_query().to_string(),
            vec![
                Parameter::new("TableName", name),
                Parameter::new("Schema", Value::Varchar(schema)),
            ],
        ))
    }

    /// Decodes one introspection row.
    fn to_db_field(&self, row: &RowLabeled) -> Result<DbField> {
        let value = |i: usize| row.values.get(i).cloned().unwrap_or(Value::Null);
        let name = String::try_from_value(value(0))
            .context("The introspection row has no column name")?;
        let database_type = match value(4) {
            v if v.is_null() => FALLBACK_NATIVE_TYPE.to_string(),
            v => String::try_from_value(v).with_context(|| {
                format!("The native type of the column `{name}` is not a string")
            })?,
        };
        Ok(DbField {
            is_primary: flag(&value(1)),
            is_identity: flag(&value(2)),
            is_nullable: flag(&value(3)),
            value_type: Some(self.native_type_resolver().resolve(&database_type)?),
            database_type: Some(database_type),
            ..DbField::new(name)
        })
    }

    /// Query returning the last identity generated by the session.
    fn create_scope_identity(&self) -> Result<String> {
        Err(StrataError::unsupported_feature(
            "The scope identity is not supported by this dialect",
        ))
    }
}

/// `1` (or `true`) in a flag column, anything else, null included, is `false`.
fn flag(value: &Value) -> bool {
    match value {
        Value::Boolean(Some(v)) => *v,
        v if v.is_null() => false,
        v => i64::try_from_value(v.clone()).is_ok_and(|v| v == 1),
    }
}

/// Drains the introspection result through `reader` and decodes every row.
pub async fn read_db_fields<R: ResultReader>(
    helper: &dyn DbHelper,
    reader: R,
) -> Result<Vec<DbField>> {
    let mut cursor = QueryMultipleExtractor::new(reader);
    let rows = cursor.extract::<RowLabeled>().await?;
    cursor.dispose();
    rows.iter().map(|row| helper.to_db_field(row)).collect()
}

/// Introspection over `INFORMATION_SCHEMA`.
#[derive(Debug, Default, Clone)]
pub struct GenericDbHelper {
    pub setting: DbSetting,
    pub native_type_resolver: GenericNativeTypeResolver,
}

impl GenericDbHelper {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_setting(setting: DbSetting) -> Self {
        Self {
            setting,
            ..Default::default()
        }
    }
}

impl DbHelper for GenericDbHelper {
    fn db_setting(&self) -> &DbSetting {
        &self.setting
    }

    fn native_type_resolver(&self) -> &dyn NativeTypeResolver {
        &self.native_type_resolver
    }

    fn fields_query(&self) -> &str {
        r#"SELECT C.COLUMN_NAME
, CASE WHEN TC.CONSTRAINT_TYPE = 'PRIMARY KEY' THEN 1 ELSE 0 END AS "IsPrimary"
, CASE WHEN C.COLUMN_DEFAULT LIKE 'nextval%' OR C.IS_IDENTITY = 'YES' THEN 1 ELSE 0 END AS "IsIdentity"
, CASE WHEN C.IS_NULLABLE = 'YES' THEN 1 ELSE 0 END AS "IsNullable"
, C.DATA_TYPE AS "DataType"
FROM INFORMATION_SCHEMA.COLUMNS C
LEFT JOIN INFORMATION_SCHEMA.KEY_COLUMN_USAGE KCU
ON C.TABLE_SCHEMA = KCU.TABLE_SCHEMA
AND C.TABLE_NAME = KCU.TABLE_NAME
AND C.COLUMN_NAME = KCU.COLUMN_NAME
LEFT JOIN INFORMATION_SCHEMA.TABLE_CONSTRAINTS TC
ON KCU.CONSTRAINT_SCHEMA = TC.CONSTRAINT_SCHEMA
AND KCU.CONSTRAINT_NAME = TC.CONSTRAINT_NAME
AND TC.CONSTRAINT_TYPE = 'PRIMARY KEY'
WHERE C.TABLE_NAME = @TableName
AND C.TABLE_SCHEMA = COALESCE(@Schema, CURRENT_SCHEMA)
ORDER BY C.ORDINAL_POSITION"#
    }
}
