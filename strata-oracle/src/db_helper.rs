use crate::{OracleDbSetting, OracleDbTypeNameToClientTypeResolver};
use strata_core::{DbHelper, DbSetting, NativeTypeResolver};

/// Introspection over the `ALL_*` dictionary views.
///
/// The schema defaults to the current schema of the session. Oracle has no session wide identity
/// so [`DbHelper::create_scope_identity`] is not supported.
#[derive(Debug, Clone)]
pub struct OracleDbHelper {
    setting: DbSetting,
    native_type_resolver: OracleDbTypeNameToClientTypeResolver,
}

impl OracleDbHelper {
    pub fn new() -> Self {
        Self::with_setting(OracleDbSetting::new())
    }
    pub fn with_setting(setting: DbSetting) -> Self {
        Self {
            setting,
            native_type_resolver: OracleDbTypeNameToClientTypeResolver,
        }
    }
}

impl Default for OracleDbHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl DbHelper for OracleDbHelper {
    fn db_setting(&self) -> &DbSetting {
        &self.setting
    }

    fn native_type_resolver(&self) -> &dyn NativeTypeResolver {
        &self.native_type_resolver
    }

    fn fields_query(&self) -> &str {
        r#"SELECT ATC.COLUMN_NAME
, CASE WHEN ACC.CONSTRAINT_TYPE = 'P' THEN 1 ELSE 0 END AS "IsPrimary"
, CASE WHEN ATIC.COLUMN_NAME IS NOT NULL THEN 1 ELSE 0 END AS "IsIdentity"
, CASE WHEN ATC.NULLABLE = 'Y' THEN 1 ELSE 0 END AS "IsNullable"
, ATC.DATA_TYPE AS "DataType"
FROM ALL_TAB_COLS ATC
LEFT JOIN (
SELECT OWNER, TABLE_NAME, CONSTRAINT_NAME, CONSTRAINT_TYPE, COLUMN_NAME
FROM ALL_CONS_COLUMNS ACC
INNER JOIN ALL_CONSTRAINTS AC
USING (OWNER, TABLE_NAME, CONSTRAINT_NAME)
WHERE CONSTRAINT_TYPE = 'P'
) ACC
ON ATC.OWNER = ACC.OWNER
AND ATC.TABLE_NAME = ACC.TABLE_NAME
AND ATC.COLUMN_NAME = ACC.COLUMN_NAME
LEFT JOIN ALL_TAB_IDENTITY_COLS ATIC
ON ATC.OWNER = ATIC.OWNER
AND ATC.TABLE_NAME = ATIC.TABLE_NAME
AND ATC.COLUMN_NAME = ATIC.COLUMN_NAME
WHERE ATC.TABLE_NAME = :TableName
AND ATC.OWNER = NVL(:Schema, sys_context('USERENV', 'CURRENT_SCHEMA'))
AND HIDDEN_COLUMN != 'YES'
ORDER BY COLUMN_ID"#
    }
}
