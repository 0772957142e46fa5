#[cfg(test)]
mod tests {
    use indoc::indoc;
    use strata_core::{
        DbField, DbSetting, Field, GenericStatementBuilder, OrderField, QueryBuilder, QueryGroup,
        StatementBuilder, StrataError, Value,
    };

    fn oneline(sql: &str) -> String {
        sql.trim().replace('\n', " ")
    }

    fn kind<T: std::fmt::Debug>(result: strata_core::Result<T>) -> StrataError {
        let error = result.unwrap_err();
        StrataError::kind_of(&error).cloned().unwrap()
    }

    #[test]
    fn query_with_hints_at_the_end() {
        let builder = GenericStatementBuilder::new();
        let mut qb = QueryBuilder::new();
        assert_eq!(
            builder
                .create_query(
                    &mut qb,
                    "Person",
                    &Field::from_names(["Id", "Name"]),
                    Some(&QueryGroup::parse([("Name", Value::from("Ann"))])),
                    &[OrderField::ascending("Id")],
                    Some(10),
                    Some("WITH (NOLOCK)"),
                )
                .unwrap(),
            oneline(indoc! {r#"
                SELECT "Id", "Name" FROM "Person"
                WHERE ("Name" = @Name) ORDER BY "Id" ASC LIMIT 10 WITH (NOLOCK) ;
            "#})
        );
        assert_eq!(
            builder
                .create_query(&mut qb, "Person", &Field::from_names(["Id"]), None, &[], Some(0), None)
                .unwrap(),
            r#"SELECT "Id" FROM "Person" ;"#
        );
    }

    #[test]
    fn batch_query() {
        let builder = GenericStatementBuilder::new();
        let mut qb = QueryBuilder::new();
        let fields = Field::from_names(["Id", "Name"]);
        let order = [OrderField::descending("Name")];
        assert_eq!(
            builder
                .create_batch_query(&mut qb, "Person", &fields, 0, 3, &order, None, None)
                .unwrap(),
            r#"SELECT "Id", "Name" FROM "Person" ORDER BY "Name" DESC LIMIT 3 ;"#
        );
        assert_eq!(
            builder
                .create_batch_query(&mut qb, "Person", &fields, 2, 3, &order, None, None)
                .unwrap(),
            r#"SELECT "Id", "Name" FROM "Person" ORDER BY "Name" DESC LIMIT 3 OFFSET 6 ;"#
        );
        assert!(matches!(
            kind(builder.create_batch_query(&mut qb, "Person", &fields, 0, 3, &[], None, None)),
            StrataError::EmptyOrdering(..)
        ));
    }

    #[test]
    fn insert_returning() {
        let builder = GenericStatementBuilder::new();
        let mut qb = QueryBuilder::new();
        let fields = Field::from_names(["Id", "Name"]);
        assert_eq!(
            builder
                .create_insert(
                    &mut qb,
                    "Person",
                    &fields,
                    None,
                    Some(&DbField::identity("Id").with_type(Value::Int64(None))),
                    None
                )
                .unwrap(),
            r#"INSERT INTO "Person" ( "Name" ) VALUES ( @Name ) RETURNING CAST("Id" AS BIGINT) AS "Result" ;"#
        );
        // Without a native mapping the identity is returned as is
        assert_eq!(
            builder
                .create_insert(
                    &mut qb,
                    "Person",
                    &fields,
                    None,
                    Some(&DbField::identity("Id").with_type(Value::Null)),
                    None
                )
                .unwrap(),
            r#"INSERT INTO "Person" ( "Name" ) VALUES ( @Name ) RETURNING "Id" AS "Result" ;"#
        );
        assert_eq!(
            builder
                .create_insert(&mut qb, "Person", &fields, None, None, None)
                .unwrap(),
            r#"INSERT INTO "Person" ( "Id", "Name" ) VALUES ( @Id, @Name ) RETURNING NULL AS "Result" ;"#
        );
    }

    #[test]
    fn update_all_with_qualifiers() {
        let builder = GenericStatementBuilder::new();
        let mut qb = QueryBuilder::new();
        assert_eq!(
            builder
                .create_update_all(
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
            oneline(indoc! {r#"
                UPDATE "Person" SET "Name" = @Name WHERE ("Code" = @Code) ;
                UPDATE "Person" SET "Name" = @Name_1 WHERE ("Code" = @Code_1) ;
            "#})
        );
        assert_eq!(qb.batch_index(), 1);
    }

    #[test]
    fn multiple_statements_disabled() {
        let builder = GenericStatementBuilder::with_setting(
            DbSetting::default().with_multi_statement_executable(false),
        );
        let mut qb = QueryBuilder::new();
        let fields = Field::from_names(["Id", "Name"]);
        assert!(matches!(
            kind(builder.create_insert_all(&mut qb, "Person", &fields, 2, None, None, None)),
            StrataError::UnsupportedFeature(..)
        ));
        assert_eq!(
            builder
                .create_insert_all(&mut qb, "Person", &fields, 1, None, None, None)
                .unwrap(),
            r#"INSERT INTO "Person" ( "Id", "Name" ) VALUES ( @Id, @Name ) ;"#
        );
        assert!(matches!(
            kind(builder.create_insert_all(&mut qb, "Person", &fields, 0, None, None, None)),
            StrataError::ArgumentOutOfRange {
                name: "batch_size",
                ..
            }
        ));
    }

    #[test]
    fn merge_as_statement() {
        let builder =
            GenericStatementBuilder::with_setting(DbSetting::default().with_use_upsert(false));
        let mut qb = QueryBuilder::new();
        assert_eq!(
            builder
                .create_merge(
                    &mut qb,
                    "dbo.Person",
                    &Field::from_names(["Id", "Name"]),
                    &[],
                    Some(&DbField::primary("Id")),
                    None,
                    Some("WITH (HOLDLOCK)")
                )
                .unwrap(),
            oneline(indoc! {r#"
                MERGE INTO "dbo"."Person"
                USING ( SELECT @Id AS "Id", @Name AS "Name" ) "_SOURCE"
                ON ( "dbo"."Person"."Id" = "_SOURCE"."Id" )
                WHEN MATCHED THEN UPDATE SET "dbo"."Person"."Name" = "_SOURCE"."Name"
                WHEN NOT MATCHED THEN INSERT ( "Id", "Name" ) VALUES ( "_SOURCE"."Id", "_SOURCE"."Name" )
                WITH (HOLDLOCK) ;
            "#})
        );
    }

    #[test]
    fn nameless_predicate() {
        let builder = GenericStatementBuilder::new();
        let mut qb = QueryBuilder::new();
        let filter = QueryGroup::parse([("", Value::from(1))]);
        assert!(matches!(
            kind(builder.create_delete(&mut qb, "Person", Some(&filter), None)),
            StrataError::InvalidArgument(..)
        ));
        assert!(matches!(
            kind(builder.create_query(
                &mut qb,
                "Person",
                &Field::from_names(["Id"]),
                Some(&filter),
                &[],
                None,
                None
            )),
            StrataError::InvalidArgument(..)
        ));
    }

    #[test]
    fn upsert_keeps_identity_qualifier() {
        let builder = GenericStatementBuilder::new();
        let mut qb = QueryBuilder::new();
        let key = DbField {
            is_identity: true,
            ..DbField::primary("Id")
        };
        assert_eq!(
            builder
                .create_merge_all(
                    &mut qb,
                    "Person",
                    &Field::from_names(["Id", "Name"]),
                    &[],
                    2,
                    Some(&key),
                    Some(&key),
                    None
                )
                .unwrap(),
            oneline(indoc! {r#"
                INSERT INTO "Person" ( "Id", "Name" ) VALUES ( @Id, @Name ), ( @Id_1, @Name_1 )
                ON CONFLICT ( "Id" ) DO UPDATE SET "Name" = EXCLUDED."Name" ;
            "#})
        );
    }

    #[test]
    fn delete_all_statement_limit() {
        let builder = GenericStatementBuilder::with_setting(
            DbSetting::default()
                .with_max_in_list_size(2)
                .with_max_statement_parameters(3),
        );
        let mut qb = QueryBuilder::new();
        let keys = [1_i32, 2, 3, 4, 5].map(Value::from);
        assert_eq!(
            builder
                .create_delete_all(&mut qb, "Person", Some((&Field::new("Id"), &keys[..3])), None)
                .unwrap(),
            r#"DELETE FROM "Person" WHERE ("Id" IN (@Id_In_0, @Id_In_1) OR "Id" IN (@Id_1_In_0)) ;"#
        );
        assert_eq!(
            builder
                .create_delete_all(&mut qb, "Person", Some((&Field::new("Id"), &keys[..])), None)
                .unwrap(),
            oneline(indoc! {r#"
                DELETE FROM "Person" WHERE ("Id" IN (@Id_In_0, @Id_In_1)) ;
                DELETE FROM "Person" WHERE ("Id" IN (@Id_1_In_0, @Id_1_In_1)) ;
                DELETE FROM "Person" WHERE ("Id" IN (@Id_2_In_0)) ;
            "#})
        );
        let single = GenericStatementBuilder::with_setting(
            DbSetting::default()
                .with_max_statement_parameters(3)
                .with_multi_statement_executable(false),
        );
        assert!(matches!(
            kind(single.create_delete_all(&mut qb, "Person", Some((&Field::new("Id"), &keys[..])), None)),
            StrataError::UnsupportedFeature(..)
        ));
    }

    #[test]
    fn delete_all_splits_keys() {
        let builder =
            GenericStatementBuilder::with_setting(DbSetting::default().with_max_in_list_size(2));
        let mut qb = QueryBuilder::new();
        let keys = [1_i32, 2, 3].map(Value::from);
        assert_eq!(
            builder
                .create_delete_all(&mut qb, "Person", Some((&Field::new("Id"), &keys[..])), None)
                .unwrap(),
            r#"DELETE FROM "Person" WHERE ("Id" IN (@Id_In_0, @Id_In_1) OR "Id" IN (@Id_1_In_0)) ;"#
        );
        assert_eq!(
            builder.create_delete_all(&mut qb, "Person", None, None).unwrap(),
            r#"DELETE FROM "Person" ;"#
        );
        assert_eq!(
            builder.create_truncate(&mut qb, "Person").unwrap(),
            r#"TRUNCATE TABLE "Person" ;"#
        );
    }

    #[test]
    fn average_cast() {
        let builder = GenericStatementBuilder::new();
        let mut qb = QueryBuilder::new();
        assert_eq!(
            builder
                .create_average(
                    &mut qb,
                    "Sale",
                    &Field::new("Amount").with_type(Value::Decimal(None, 10, 2)),
                    Some(&QueryGroup::parse([("Year", Value::from(2024))])),
                    None
                )
                .unwrap(),
            r#"SELECT AVG (CAST("Amount" AS DECIMAL)) AS "AverageValue" FROM "Sale" WHERE ("Year" = @Year) ;"#
        );
        assert_eq!(
            builder
                .create_average_all(
                    &mut qb,
                    "Sale",
                    &Field::new("Quantity").with_type(Value::Int16(None)),
                    None
                )
                .unwrap(),
            r#"SELECT AVG (CAST("Quantity" AS DOUBLE)) AS "AverageValue" FROM "Sale" ;"#
        );
    }
}
