#[cfg(test)]
mod tests {
    use indoc::indoc;
    use strata::{
        DbField, Field, OrderField, QueryBuilder, QueryGroup, StatementBuilder, StrataError, Value,
    };
    use strata_oracle::OracleStatementBuilder;
    use strata_sqlite::SqliteStatementBuilder;

    #[test]
    fn top_without_predicate() {
        let mut qb = QueryBuilder::new();
        let fields = Field::from_names(["Id", "Name"]);
        let sql = OracleStatementBuilder::new()
            .create_query(&mut qb, "Person", &fields, None, &[], Some(2), None)
            .unwrap();
        assert!(sql.ends_with("FETCH FIRST 2 ROWS ONLY"));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn update_all_keyed_on_primary() {
        let mut qb = QueryBuilder::new();
        let sql = SqliteStatementBuilder::new()
            .create_update_all(
                &mut qb,
                "Person",
                &Field::from_names(["Id", "Name", "Age"]),
                &[],
                3,
                Some(&DbField::primary("Id")),
                None,
                None,
            )
            .unwrap();
        assert_eq!(
            sql,
            indoc! {"
                UPDATE [Person] SET [Name] = @Name, [Age] = @Age WHERE ([Id] = @Id) ;
                UPDATE [Person] SET [Name] = @Name_1, [Age] = @Age_1 WHERE ([Id] = @Id_1) ;
                UPDATE [Person] SET [Name] = @Name_2, [Age] = @Age_2 WHERE ([Id] = @Id_2) ;
            "}
            .trim()
            .replace('\n', " ")
        );
        assert_eq!(sql.matches("UPDATE").count(), 3);
    }

    #[test]
    fn delete_all_in_list_limit() {
        let builder = OracleStatementBuilder::new();
        let mut qb = QueryBuilder::new();
        let key = Field::new("Id");
        let keys = (0..1001_i32).map(Value::from).collect::<Vec<_>>();
        let sql = builder
            .create_delete_all(&mut qb, "Person", Some((&key, &keys[..1000])), None)
            .unwrap();
        assert_eq!(sql.matches(" IN (").count(), 1);
        assert!(sql.ends_with(":Id_In_999))"));
        let sql = builder
            .create_delete_all(&mut qb, "Person", Some((&key, &keys[..])), None)
            .unwrap();
        assert_eq!(sql.matches(" IN (").count(), 2);
        assert!(sql.ends_with(r#" OR "Id" IN (:Id_1_In_0))"#));
        let error = builder
            .create_delete_all(&mut qb, "Person", Some((&key, &keys[..0])), None)
            .unwrap_err();
        assert!(matches!(
            StrataError::kind_of(&error),
            Some(StrataError::InvalidArgument(..))
        ));
    }

    #[test]
    fn paging_guards() {
        let builder = SqliteStatementBuilder::new();
        let mut qb = QueryBuilder::new();
        let fields = Field::from_names(["Id"]);
        let order = [OrderField::ascending("Id")];
        let filter = QueryGroup::parse([("Id", Value::from(1))]);
        let sql = builder
            .create_batch_query(&mut qb, "Person", &fields, 0, 3, &order, Some(&filter), None)
            .unwrap();
        assert!(!sql.contains("OFFSET"));
        let error = builder
            .create_batch_query(&mut qb, "Person", &fields, 0, 0, &order, None, None)
            .unwrap_err();
        assert!(matches!(
            StrataError::kind_of(&error),
            Some(StrataError::ArgumentOutOfRange { name: "rows_per_batch", .. })
        ));
    }
}
