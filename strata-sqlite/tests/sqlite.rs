#[cfg(test)]
mod tests {
    use indoc::indoc;
    use std::sync::atomic::Ordering;
    use strata_core::{
        DbField, DbHelper, Dialect, Field, NativeTypeResolver, OrderField, Parameter,
        QueryBuilder, QueryGroup, StatementBuilder, StrataError, Value, read_db_fields,
    };
    use strata_sqlite::{
        SqliteDbHelper, SqliteDialect, SqliteStatementBuilder, SqliteTypeNameToClientTypeResolver,
    };
    use strata_tests::{MockResultReader, execute_tests, init_logs, silent_logs};

    fn oneline(sql: &str) -> String {
        sql.trim().replace('\n', " ")
    }

    #[test]
    fn common() {
        init_logs();
        execute_tests(&SqliteStatementBuilder::new());
    }

    #[test]
    fn query() {
        let builder = SqliteStatementBuilder::new();
        let mut qb = QueryBuilder::new();
        let fields = Field::from_names(["Id", "Name"]);
        assert_eq!(
            builder
                .create_query(&mut qb, "Person", &fields, None, &[], Some(2), None)
                .unwrap(),
            "SELECT [Id], [Name] FROM [Person] LIMIT 2 ;"
        );
        assert_eq!(
            builder
                .create_batch_query(
                    &mut qb,
                    "Person",
                    &fields,
                    2,
                    3,
                    &[OrderField::ascending("Id")],
                    None,
                    None
                )
                .unwrap(),
            "SELECT [Id], [Name] FROM [Person] ORDER BY [Id] ASC LIMIT 3 OFFSET 6 ;"
        );
        assert_eq!(
            builder
                .create_exists(
                    &mut qb,
                    "Person",
                    Some(&QueryGroup::parse([("Id", Value::from(7))])),
                    None
                )
                .unwrap(),
            "SELECT 1 AS [ExistsValue] FROM [Person] WHERE ([Id] = @Id) LIMIT 1 ;"
        );
        assert_eq!(
            builder
                .create_average_all(&mut qb, "Person", &Field::new("Age"), None)
                .unwrap(),
            "SELECT AVG (CAST([Age] AS REAL)) AS [AverageValue] FROM [Person] ;"
        );
        let error = builder
            .create_query(&mut qb, "Person", &fields, None, &[], None, Some("INDEXED BY x"))
            .unwrap_err();
        assert!(matches!(
            StrataError::kind_of(&error),
            Some(StrataError::UnsupportedFeature(..))
        ));
    }

    #[test]
    fn insert() {
        let builder = SqliteStatementBuilder::new();
        let mut qb = QueryBuilder::new();
        let identity = DbField::identity("Id").with_type(Value::Int64(None));
        assert_eq!(
            builder
                .create_insert(
                    &mut qb,
                    "Person",
                    &Field::from_names(["Id", "Name"]),
                    None,
                    Some(&identity),
                    None
                )
                .unwrap(),
            oneline(indoc! {"
                INSERT INTO [Person] ( [Name] ) VALUES ( @Name )
                RETURNING CAST([Id] AS INTEGER) AS [Result] ;
            "})
        );
        let fields = Field::from_names(["Id", "Name"]);
        assert_eq!(
            builder
                .create_insert_all(&mut qb, "Person", &fields, 1, None, None, None)
                .unwrap(),
            "INSERT INTO [Person] ( [Id], [Name] ) VALUES ( @Id, @Name ) ;"
        );
        assert_eq!(
            builder
                .create_insert_all(&mut qb, "Person", &fields, 2, None, None, None)
                .unwrap(),
            oneline(indoc! {"
                INSERT INTO [Person] ( [Id], [Name] ) VALUES ( @Id, @Name ) ;
                INSERT INTO [Person] ( [Id], [Name] ) VALUES ( @Id_1, @Name_1 ) ;
            "})
        );
    }

    #[test]
    fn upsert() {
        let builder = SqliteStatementBuilder::new();
        let mut qb = QueryBuilder::new();
        let primary = DbField::primary("Id");
        assert_eq!(
            builder
                .create_merge(
                    &mut qb,
                    "Person",
                    &Field::from_names(["Id", "Name"]),
                    &[],
                    Some(&primary),
                    None,
                    None
                )
                .unwrap(),
            oneline(indoc! {"
                INSERT INTO [Person] ( [Id], [Name] ) VALUES ( @Id, @Name )
                ON CONFLICT ( [Id] ) DO UPDATE SET [Name] = EXCLUDED.[Name] ;
            "})
        );
        assert_eq!(
            builder
                .create_merge_all(
                    &mut qb,
                    "Person",
                    &Field::from_names(["Id", "Name"]),
                    &[],
                    2,
                    Some(&primary),
                    None,
                    None
                )
                .unwrap(),
            oneline(indoc! {"
                INSERT INTO [Person] ( [Id], [Name] ) VALUES ( @Id, @Name ), ( @Id_1, @Name_1 )
                ON CONFLICT ( [Id] ) DO UPDATE SET [Name] = EXCLUDED.[Name] ;
            "})
        );
        assert_eq!(
            builder
                .create_merge(
                    &mut qb,
                    "Tag",
                    &Field::from_names(["Name"]),
                    &Field::from_names(["Name"]),
                    None,
                    None,
                    None
                )
                .unwrap(),
            "INSERT INTO [Tag] ( [Name] ) VALUES ( @Name ) ON CONFLICT ( [Name] ) DO NOTHING ;"
        );
    }

    #[test]
    fn upsert_on_identity_key() {
        let builder = SqliteStatementBuilder::new();
        let mut qb = QueryBuilder::new();
        let key = DbField {
            is_identity: true,
            ..DbField::primary("Id")
        };
        let fields = Field::from_names(["Id", "Name"]);
        assert_eq!(
            builder
                .create_merge(&mut qb, "Person", &fields, &[], Some(&key), Some(&key), None)
                .unwrap(),
            oneline(indoc! {"
                INSERT INTO [Person] ( [Id], [Name] ) VALUES ( @Id, @Name )
                ON CONFLICT ( [Id] ) DO UPDATE SET [Name] = EXCLUDED.[Name] ;
            "})
        );
        // The identity is left out when the rows are matched on another column
        assert_eq!(
            builder
                .create_merge_all(
                    &mut qb,
                    "Person",
                    &Field::from_names(["Id", "Code", "Name"]),
                    &Field::from_names(["Code"]),
                    2,
                    None,
                    Some(&DbField::identity("Id")),
                    None
                )
                .unwrap(),
            oneline(indoc! {"
                INSERT INTO [Person] ( [Code], [Name] ) VALUES ( @Code, @Name ), ( @Code_1, @Name_1 )
                ON CONFLICT ( [Code] ) DO UPDATE SET [Name] = EXCLUDED.[Name] ;
            "})
        );
    }

    #[test]
    fn delete_all_per_statement_limit() {
        let builder = SqliteStatementBuilder::new();
        let mut qb = QueryBuilder::new();
        let key = Field::new("Id");
        let keys = (0..1500_i32).map(Value::from).collect::<Vec<_>>();
        let sql = builder
            .create_delete_all(&mut qb, "Person", Some((&key, &keys[..999])), None)
            .unwrap();
        assert_eq!(sql.matches("DELETE FROM").count(), 1);
        assert_eq!(sql.matches('@').count(), 999);
        let sql = builder
            .create_delete_all(&mut qb, "Person", Some((&key, &keys[..1000])), None)
            .unwrap();
        assert_eq!(sql.matches("DELETE FROM").count(), 2);
        assert!(sql.ends_with("@Id_In_998)) ; DELETE FROM [Person] WHERE ([Id] IN (@Id_1_In_0)) ;"));
        let sql = builder
            .create_delete_all(&mut qb, "Person", Some((&key, &keys[..])), None)
            .unwrap();
        let statements = sql
            .split(" ; ")
            .map(|v| v.trim_end_matches(" ;"))
            .collect::<Vec<_>>();
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].matches('@').count(), 999);
        assert_eq!(statements[1].matches('@').count(), 501);
        assert!(!sql.contains(" OR "));
        assert!(statements[1].contains("@Id_1_In_500)"));
    }

    #[test]
    fn truncate() {
        let builder = SqliteStatementBuilder::new();
        let mut qb = QueryBuilder::new();
        assert_eq!(
            builder.create_truncate(&mut qb, "main.Person").unwrap(),
            "DELETE FROM [main].[Person] ;"
        );
    }

    #[test]
    fn native_types() {
        let resolver = SqliteTypeNameToClientTypeResolver;
        assert_eq!(resolver.resolve("INTEGER").unwrap(), Value::Int64(None));
        assert_eq!(resolver.resolve("unsigned big int").unwrap(), Value::Int64(None));
        assert_eq!(resolver.resolve("VARCHAR(20)").unwrap(), Value::Varchar(None));
        assert_eq!(resolver.resolve("Text").unwrap(), Value::Varchar(None));
        assert_eq!(resolver.resolve("blob").unwrap(), Value::Blob(None));
        assert_eq!(
            resolver.resolve("DOUBLE PRECISION").unwrap(),
            Value::Float64(None)
        );
        assert_eq!(resolver.resolve("BOOLEAN").unwrap(), Value::Boolean(None));
        assert_eq!(
            resolver.resolve("DECIMAL(10,5)").unwrap(),
            Value::Decimal(None, 0, 0)
        );
        assert_eq!(resolver.resolve("DATETIME").unwrap(), Value::Timestamp(None));
        assert_eq!(resolver.resolve("date").unwrap(), Value::Date(None));
        silent_logs! {
            assert_eq!(resolver.resolve("GEOMETRY").unwrap(), Value::Null);
        }
        assert!(matches!(
            resolver
                .resolve(" ")
                .map_err(|e| StrataError::kind_of(&e).cloned()),
            Err(Some(StrataError::NullArgument(..)))
        ));
    }

    #[test]
    fn db_helper() {
        let helper = SqliteDbHelper::new();
        let (sql, parameters) = helper.create_get_fields("[Person]").unwrap();
        assert!(sql.contains("pragma_table_info(@TableName, @Schema)"));
        assert_eq!(
            parameters,
            [
                Parameter::new("TableName", "Person"),
                Parameter::new("Schema", "main"),
            ]
        );
        let (_, parameters) = helper.create_get_fields("aux.Person").unwrap();
        assert_eq!(parameters[1], Parameter::new("Schema", "aux"));
        assert_eq!(
            helper.create_scope_identity().unwrap(),
            "SELECT last_insert_rowid() ;"
        );
        assert!(helper.create_get_fields("").is_err());
    }

    #[tokio::test]
    async fn read_fields() {
        let helper = SqliteDialect::new().db_helper();
        let reader = MockResultReader::with_labels(
            &["name", "IsPrimary", "IsIdentity", "IsNullable", "DataType"],
            vec![vec![
                vec![
                    "Id".into(),
                    1.into(),
                    1.into(),
                    0.into(),
                    "INTEGER".into(),
                ],
                vec![
                    "Name".into(),
                    0.into(),
                    0.into(),
                    1.into(),
                    "VARCHAR(50)".into(),
                ],
                vec![
                    "Extra".into(),
                    0.into(),
                    0.into(),
                    1.into(),
                    Value::Null,
                ],
            ]],
        );
        let releases = reader.releases();
        let fields = read_db_fields(&helper, reader).await.unwrap();
        assert_eq!(releases.load(Ordering::SeqCst), 1);
        assert_eq!(fields.len(), 3);
        assert!(fields[0].is_primary && fields[0].is_identity && !fields[0].is_nullable);
        assert_eq!(fields[0].value_type, Some(Value::Int64(None)));
        assert!(!fields[1].is_primary && fields[1].is_nullable);
        assert_eq!(fields[1].database_type.as_deref(), Some("VARCHAR(50)"));
        assert_eq!(fields[2].database_type.as_deref(), Some("text"));
        assert_eq!(fields[2].value_type, Some(Value::Varchar(None)));
    }
}
