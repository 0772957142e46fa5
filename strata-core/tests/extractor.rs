#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, future::Future};
    use strata_core::{
        CursorState, DbHelper, DbSetting, DbType, DbTypeNameResolver, DbTypeToGenericStringNameResolver,
        Error, GenericDbHelper, NativeTypeResolver, Parameter, QueryMultipleExtractor, Result,
        ResultReader, RowLabeled, StrataError, Value, future, read_db_fields, split_table_name,
    };

    /// Serves single column rows, a `None` cell fails the read.
    struct Cells {
        sets: VecDeque<VecDeque<Option<i32>>>,
        closed: bool,
    }

    impl Cells {
        fn new(sets: &[&[Option<i32>]]) -> Self {
            Self {
                sets: sets.iter().map(|v| v.iter().copied().collect()).collect(),
                closed: false,
            }
        }
    }

    impl ResultReader for Cells {
        fn read(&mut self) -> impl Future<Output = Result<Option<RowLabeled>>> + Send {
            let row = match self.sets.front_mut().and_then(VecDeque::pop_front) {
                None => Ok(None),
                Some(None) => Err(Error::msg("broken row")),
                Some(Some(v)) => Ok(Some(RowLabeled::new(
                    ["N".to_string()].into(),
                    vec![Value::from(v)].into(),
                ))),
            };
            future::ready(row)
        }

        fn next_result(&mut self) -> impl Future<Output = Result<bool>> + Send {
            self.sets.pop_front();
            future::ready(Ok(!self.sets.is_empty()))
        }

        fn close(&mut self) {
            assert!(!self.closed, "closed twice");
            self.closed = true;
        }
    }

    #[tokio::test]
    async fn read_error_carries_position() {
        let mut cursor = QueryMultipleExtractor::new(Cells::new(&[&[Some(1)], &[Some(2), None]]));
        assert_eq!(cursor.extract::<(i32,)>().await.unwrap(), [(1,)]);
        assert!(cursor.advance().await.unwrap());
        let error = cursor.extract::<(i32,)>().await.unwrap_err();
        assert_eq!(error.to_string(), "While extracting the result set 1");
        assert_eq!(error.root_cause().to_string(), "broken row");
        assert_eq!(cursor.state(), CursorState::Open);
        cursor.dispose();
        cursor.dispose();
    }

    #[tokio::test]
    async fn empty_stream() {
        let mut cursor = QueryMultipleExtractor::new(Cells::new(&[]));
        assert!(cursor.extract::<(i32,)>().await.unwrap().is_empty());
        assert!(!cursor.advance().await.unwrap());
        assert_eq!(cursor.extract_next::<(i32,)>(false).await.unwrap(), None);
    }

    #[test]
    fn generic_type_names() {
        let resolver = DbTypeToGenericStringNameResolver;
        assert_eq!(resolver.resolve(DbType::Int64).unwrap(), "BIGINT");
        assert_eq!(resolver.resolve(DbType::String).unwrap(), "VARCHAR");
        let natives = strata_core::GenericNativeTypeResolver;
        assert_eq!(natives.resolve("numeric(10, 2)").unwrap(), Value::Decimal(None, 0, 0));
        assert_eq!(natives.resolve("timestamptz").unwrap(), Value::TimestampWithTimezone(None));
        assert_eq!(natives.resolve("hstore").unwrap(), Value::Null);
    }

    #[test]
    fn table_names() {
        let setting = DbSetting::default().with_default_schema(Some("public"));
        assert_eq!(
            split_table_name(r#""sales"."Order""#, &setting),
            (Some("sales".to_string()), "Order".to_string())
        );
        assert_eq!(
            split_table_name("Order", &setting),
            (Some("public".to_string()), "Order".to_string())
        );
        let helper = GenericDbHelper::new();
        let (sql, parameters) = helper.create_get_fields("Order").unwrap();
        assert!(sql.contains("COALESCE(@Schema, CURRENT_SCHEMA)"));
        assert_eq!(
            parameters,
            [
                Parameter::new("TableName", "Order"),
                Parameter::new("Schema", Value::Varchar(None)),
            ]
        );
        let error = helper.create_scope_identity().unwrap_err();
        assert!(matches!(
            StrataError::kind_of(&error),
            Some(StrataError::UnsupportedFeature(..))
        ));
    }

    #[tokio::test]
    async fn bad_introspection_row() {
        // The name column holds an integer
        let error = read_db_fields(&GenericDbHelper::new(), Cells::new(&[&[Some(1)]]))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "The introspection row has no column name");
    }
}
