use crate::DbSetting;

/// Wraps `value` in the quotes of the dialect.
///
/// Only missing quotes are added, so quoting is idempotent. Unless `ignore_schema` is set, a dotted
/// name (`schema.table`) is quoted part by part.
pub fn as_quoted(value: &str, trim: bool, ignore_schema: bool, setting: &DbSetting) -> String {
    let value = if trim { value.trim() } else { value };
    if ignore_schema || !value.contains('.') {
        return quote_part(value, trim, setting);
    }
    value
        .split('.')
        .map(|v| quote_part(v, trim, setting))
        .collect::<Vec<_>>()
        .join(".")
}

fn quote_part(value: &str, trim: bool, setting: &DbSetting) -> String {
    let value = if trim { value.trim() } else { value };
    let mut result = String::with_capacity(value.len() + 2);
    if !value.starts_with(setting.opening_quote.as_str()) {
        result.push_str(&setting.opening_quote);
    }
    result.push_str(value);
    if !value.ends_with(setting.closing_quote.as_str()) || result.len() == 1 {
        result.push_str(&setting.closing_quote);
    }
    result
}

/// Removes every quote character of the dialect from `value`, part by part on dotted names.
pub fn as_unquoted(value: &str, trim: bool, setting: &DbSetting) -> String {
    value
        .split('.')
        .map(|v| unquote_part(v, trim, setting))
        .collect::<Vec<_>>()
        .join(".")
}

fn unquote_part(value: &str, trim: bool, setting: &DbSetting) -> String {
    let value = if trim { value.trim() } else { value };
    let result = value
        .replace(setting.opening_quote.as_str(), "")
        .replace(setting.closing_quote.as_str(), "");
    if trim { result.trim().to_string() } else { result }
}
