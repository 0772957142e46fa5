use strata_core::{
    ClientTypeToDbTypeResolver, DbConvertFieldResolver, DbType, DbTypeNameResolver,
    NativeTypeResolver, Result, StrataError, Value,
};

/// `CAST(<field> AS <oracle type>)`.
pub type OracleConvertFieldResolver =
    DbConvertFieldResolver<ClientTypeToDbTypeResolver, DbTypeToOracleStringNameResolver>;

pub fn oracle_convert_field_resolver() -> OracleConvertFieldResolver {
    DbConvertFieldResolver::new(ClientTypeToDbTypeResolver, DbTypeToOracleStringNameResolver)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DbTypeToOracleStringNameResolver;

impl DbTypeNameResolver for DbTypeToOracleStringNameResolver {
    fn resolve(&self, db_type: DbType) -> Result<&'static str> {
        Ok(match db_type {
            DbType::Binary => "RAW",
            DbType::Boolean => "BOOLEAN",
            DbType::Byte
            | DbType::Decimal
            | DbType::Double
            | DbType::Single
            | DbType::Int16
            | DbType::Int32
            | DbType::Int64 => "NUMBER",
            DbType::Date => "DATE",
            DbType::DateTime | DbType::DateTime2 => "TIMESTAMP",
            DbType::DateTimeOffset => "TIMESTAMP WITH TIME ZONE",
            DbType::Guid => "BLOB",
            DbType::AnsiString => "VARCHAR2",
            DbType::AnsiStringFixedLength => "CHAR",
            DbType::String => "NVARCHAR2",
            DbType::StringFixedLength => "NCHAR",
            DbType::Time => "INTERVAL DAY TO SECOND",
            DbType::Currency
            | DbType::Object
            | DbType::SByte
            | DbType::UInt16
            | DbType::UInt32
            | DbType::UInt64
            | DbType::VarNumeric
            | DbType::Xml => {
                return Err(StrataError::unsupported_type(format!(
                    "The portable type `{db_type}` has no Oracle equivalent"
                )));
            }
        })
    }
}

/// Oracle data type names, as reported by `ALL_TAB_COLS.DATA_TYPE`, to host types.
#[derive(Debug, Default, Clone, Copy)]
pub struct OracleDbTypeNameToClientTypeResolver;

impl NativeTypeResolver for OracleDbTypeNameToClientTypeResolver {
    fn resolve(&self, native_type: &str) -> Result<Value> {
        let name = native_type.trim();
        if name.is_empty() {
            return Err(StrataError::null_argument(
                "The Oracle type name cannot be empty",
            ));
        }
        let normalized = strip_modifiers(&name.to_ascii_uppercase());
        Ok(match normalized.as_str() {
            "BFILE" | "BLOB" | "LONG RAW" | "RAW" => Value::Blob(None),
            "BINARY_DOUBLE" | "BINARY_FLOAT" | "BINARY_INTEGER" | "NUMBER" | "PLS_INTEGER" => {
                Value::Decimal(None, 0, 0)
            }
            "BOOLEAN" => Value::Boolean(None),
            "CHAR" | "CLOB" | "JSON" | "LONG" | "NCHAR" | "NCLOB" | "NVARCHAR2" | "REF"
            | "ROWID" | "UROWID" | "VARCHAR2" | "XMLTYPE" => Value::Varchar(None),
            "DATE" | "TIMESTAMP" | "TIMESTAMP WITH LOCAL TIME ZONE" => Value::Timestamp(None),
            "TIMESTAMP WITH TIME ZONE" => Value::TimestampWithTimezone(None),
            "INTERVAL DAY TO SECOND" => Value::Interval(None),
            "INTERVAL YEAR TO MONTH" => Value::Int64(None),
            _ => {
                log::warn!("Unknown Oracle type `{name}`, it will be treated as opaque");
                Value::Null
            }
        })
    }
}

/// `INTERVAL DAY(2) TO SECOND(6)` becomes `INTERVAL DAY TO SECOND`.
fn strip_modifiers(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut depth = 0usize;
    for c in name.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
