use strata_core::{
    ClientTypeToDbTypeResolver, DbConvertFieldResolver, DbType, DbTypeNameResolver,
    NativeTypeResolver, Result, StrataError, Value,
};

pub type SqliteConvertFieldResolver =
    DbConvertFieldResolver<ClientTypeToDbTypeResolver, DbTypeToSqliteStringNameResolver>;

pub fn sqlite_convert_field_resolver() -> SqliteConvertFieldResolver {
    DbConvertFieldResolver::new(ClientTypeToDbTypeResolver, DbTypeToSqliteStringNameResolver)
}

/// Storage classes of SQLite.
#[derive(Debug, Default, Clone, Copy)]
pub struct DbTypeToSqliteStringNameResolver;

impl DbTypeNameResolver for DbTypeToSqliteStringNameResolver {
    fn resolve(&self, db_type: DbType) -> Result<&'static str> {
        Ok(match db_type {
            DbType::Boolean
            | DbType::SByte
            | DbType::Byte
            | DbType::Int16
            | DbType::Int32
            | DbType::Int64
            | DbType::UInt16
            | DbType::UInt32
            | DbType::UInt64 => "INTEGER",
            DbType::Single | DbType::Double => "REAL",
            DbType::Decimal | DbType::Currency | DbType::VarNumeric => "NUMERIC",
            DbType::AnsiString
            | DbType::AnsiStringFixedLength
            | DbType::String
            | DbType::StringFixedLength
            | DbType::Xml
            | DbType::Guid
            | DbType::Date
            | DbType::Time
            | DbType::DateTime
            | DbType::DateTime2
            | DbType::DateTimeOffset => "TEXT",
            DbType::Binary => "BLOB",
            DbType::Object => {
                return Err(StrataError::unsupported_type(format!(
                    "The portable type `{db_type}` has no SQLite storage class"
                )));
            }
        })
    }
}

/// Declared column types to host types, following the column affinity rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteTypeNameToClientTypeResolver;

impl NativeTypeResolver for SqliteTypeNameToClientTypeResolver {
    fn resolve(&self, native_type: &str) -> Result<Value> {
        let name = native_type.trim();
        if name.is_empty() {
            return Err(StrataError::null_argument(
                "The SQLite type name cannot be empty",
            ));
        }
        let upper = name.to_ascii_uppercase();
        let base = upper.split('(').next().unwrap_or_default().trim();
        Ok(if base == "BOOLEAN" || base == "BOOL" {
            Value::Boolean(None)
        } else if base.contains("INT") {
            Value::Int64(None)
        } else if base.contains("CHAR") || base.contains("CLOB") || base.contains("TEXT") {
            Value::Varchar(None)
        } else if base == "BLOB" {
            Value::Blob(None)
        } else if base.contains("REAL") || base.contains("FLOA") || base.contains("DOUB") {
            Value::Float64(None)
        } else if base == "NUMERIC" || base == "DECIMAL" {
            Value::Decimal(None, 0, 0)
        } else if base == "DATETIME" || base == "TIMESTAMP" {
            Value::Timestamp(None)
        } else if base == "DATE" {
            Value::Date(None)
        } else if base == "TIME" {
            Value::Time(None)
        } else {
            log::warn!("Unknown SQLite type `{name}`, it will be treated as opaque");
            Value::Null
        })
    }
}
