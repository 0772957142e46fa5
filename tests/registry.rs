#[cfg(test)]
mod tests {
    use strata::{
        DbHelper, Field, GenericDialect, ProviderRegistry, QueryBuilder, StatementBuilder,
        StrataError, Value,
    };
    use strata_oracle::OracleDialect;
    use strata_sqlite::SqliteDialect;
    use strata_tests::init_logs;

    fn registry() -> ProviderRegistry {
        ProviderRegistry::builder()
            .register(GenericDialect::new())
            .register(OracleDialect::new())
            .register(SqliteDialect::new())
            .build()
    }

    #[test]
    fn lookup() {
        init_logs();
        let registry = registry();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            ["generic", "oracle", "sqlite"]
        );
        assert!(registry.contains("ORACLE"));
        assert!(!registry.contains("mysql"));
        let oracle = registry.get("Oracle").unwrap();
        assert_eq!(oracle.name, "oracle");
        assert_eq!(oracle.db_setting.parameter_prefix, ":");
        let error = registry.get("mysql").unwrap_err();
        assert!(matches!(
            StrataError::kind_of(&error),
            Some(StrataError::InvalidArgument(..))
        ));
    }

    #[test]
    fn same_request_every_dialect() {
        let registry = registry();
        let fields = Field::from_names(["Id", "Name"]);
        let mut qb = QueryBuilder::new();
        let compiled = registry
            .names()
            .map(|name| {
                let provider = registry.get(name).unwrap();
                provider
                    .statement_builder
                    .create_query(&mut qb, "Person", &fields, None, &[], Some(2), None)
                    .unwrap()
            })
            .collect::<Vec<_>>();
        assert_eq!(
            compiled,
            [
                r#"SELECT "Id", "Name" FROM "Person" LIMIT 2 ;"#,
                r#"SELECT "Id", "Name" FROM "Person" FETCH FIRST 2 ROWS ONLY"#,
                "SELECT [Id], [Name] FROM [Person] LIMIT 2 ;",
            ]
        );
        assert!(compiled.iter().all(|v| !v.contains("WHERE")));
    }

    #[test]
    fn shared_between_threads() {
        let registry = registry();
        let handles = (0..4)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    let provider = registry.get("sqlite").unwrap();
                    let (sql, parameters) = provider.db_helper.create_get_fields("Person").unwrap();
                    assert!(sql.contains("pragma_table_info"));
                    assert_eq!(parameters[1].value, Value::from("main"));
                    i
                })
            })
            .collect::<Vec<_>>();
        let done = handles
            .into_iter()
            .map(|v| v.join().unwrap())
            .sum::<i32>();
        assert_eq!(done, 6);
    }
}
