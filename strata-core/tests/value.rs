#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use strata_core::{AsValue, FromRow, RowLabeled, StrataError, Value};
    use time::macros::{date, datetime};
    use uuid::Uuid;

    #[test]
    fn value_type_tags() {
        assert!(Value::Null.is_null());
        assert!(Value::Int32(None).is_null());
        assert!(!Value::Int32(Some(0)).is_null());
        assert!(Value::Int32(Some(5)).same_type(&Value::Int32(None)));
        assert!(!Value::Int32(Some(5)).same_type(&Value::Int64(None)));
        assert_eq!(Value::Varchar(Some("x".into())).as_type(), Value::Varchar(None));
        assert_eq!(i16::as_empty_value(), Value::Int16(None));
        assert_eq!(Value::Decimal(None, 10, 2).type_name(), "Decimal");
    }

    #[test]
    fn value_integers() {
        assert_eq!(42_i32.as_value(), Value::Int32(Some(42)));
        assert_eq!(i64::try_from_value(Value::Int8(Some(-3))).unwrap(), -3);
        assert_eq!(i64::try_from_value(Value::UInt32(Some(7))).unwrap(), 7);
        assert_eq!(i16::try_from_value(Value::Int64(Some(300))).unwrap(), 300);
        assert!(i8::try_from_value(Value::Int64(Some(300))).is_err());
        assert!(u8::try_from_value(Value::Int8(Some(-1))).is_err());
        assert!(i64::try_from_value(Value::UInt64(Some(u64::MAX))).is_err());
        assert!(i32::try_from_value(Value::Varchar(Some("1".into()))).is_err());
    }

    #[test]
    fn value_text_and_misc() {
        assert_eq!(
            String::try_from_value("hello".into()).unwrap(),
            "hello".to_string()
        );
        assert_eq!(char::try_from_value(Value::Varchar(Some("z".into()))).unwrap(), 'z');
        assert!(char::try_from_value(Value::Varchar(Some("zz".into()))).is_err());
        let id = Uuid::from_u128(0x1234);
        assert_eq!(Uuid::try_from_value(id.as_value()).unwrap(), id);
        assert_eq!(
            Uuid::try_from_value(Value::Varchar(Some(id.to_string()))).unwrap(),
            id
        );
        assert_eq!(
            time::Date::try_from_value(Value::Timestamp(Some(datetime!(2024-02-29 10:00))))
                .unwrap(),
            date!(2024 - 02 - 29)
        );
        assert_eq!(Option::<i32>::try_from_value(Value::Int32(None)).unwrap(), None);
        assert_eq!(Option::<i32>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<i32>::try_from_value(Value::Int32(Some(2))).unwrap(),
            Some(2)
        );
        assert_eq!(Some(true).as_value(), Value::Boolean(Some(true)));
        assert_eq!(None::<bool>.as_value(), Value::Boolean(None));
    }

    #[test]
    fn rows() {
        let row = RowLabeled::new(
            Arc::from(["Id".to_string(), "Name".to_string()]),
            vec![Value::Int32(Some(1)), Value::Varchar(Some("Ann".into()))].into(),
        );
        assert_eq!(row.get::<i64>("id").unwrap(), 1);
        assert_eq!(row.get::<String>("NAME").unwrap(), "Ann");
        assert!(row.get::<i32>("Missing").is_err());
        assert!(row.get_column("missing").is_none());
        let (id, name): (i32, String) = FromRow::from_row(row.clone()).unwrap();
        assert_eq!((id, name.as_str()), (1, "Ann"));
        assert!(<(i32, String, bool)>::from_row(row).is_err());
    }

    #[test]
    fn errors() {
        let error = StrataError::out_of_range("page", "negative");
        assert_eq!(
            StrataError::kind_of(&error),
            Some(&StrataError::ArgumentOutOfRange {
                name: "page",
                message: "negative".into()
            })
        );
        assert_eq!(
            error.to_string(),
            "Argument `page` is out of range: negative"
        );
        assert!(StrataError::kind_of(&anyhow::anyhow!("other")).is_none());
    }
}
