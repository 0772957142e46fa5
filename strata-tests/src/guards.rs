use std::fmt::Debug;
use strata_core::{
    DbField, Field, OrderField, QueryBuilder, Result, StatementBuilder, StrataError, Value,
};

/// The kind of the error `result` must hold.
pub(crate) fn error_kind<T: Debug>(result: Result<T>) -> StrataError {
    match result {
        Ok(v) => panic!("Expected an error, the statement compiled to {v:?}"),
        Err(e) => StrataError::kind_of(&e)
            .cloned()
            .unwrap_or_else(|| panic!("Expected a StrataError, got {e:#}")),
    }
}

pub fn guards(builder: &dyn StatementBuilder) {
    let mut qb = QueryBuilder::new();
    let fields = Field::from_names(["Id", "Name", "Age"]);

    // Table
    assert!(matches!(
        error_kind(builder.create_query(&mut qb, " ", &fields, None, &[], None, None)),
        StrataError::InvalidArgument(..)
    ));
    assert!(matches!(
        error_kind(builder.create_truncate(&mut qb, "")),
        StrataError::InvalidArgument(..)
    ));

    // Fields
    assert!(matches!(
        error_kind(builder.create_query(&mut qb, "Person", &[], None, &[], None, None)),
        StrataError::InvalidArgument(..)
    ));
    assert!(matches!(
        error_kind(builder.create_query(
            &mut qb,
            "Person",
            &fields,
            None,
            &[OrderField::ascending("Missing")],
            None,
            None
        )),
        StrataError::MissingFields(..)
    ));

    // Primary and identity
    assert!(matches!(
        error_kind(builder.create_insert(
            &mut qb,
            "Person",
            &fields,
            Some(&DbField::new("Id")),
            None,
            None
        )),
        StrataError::InvalidArgument(..)
    ));
    assert!(matches!(
        error_kind(builder.create_insert(
            &mut qb,
            "Person",
            &fields,
            Some(&DbField::primary("Code")),
            None,
            None
        )),
        StrataError::MissingFields(..)
    ));
    assert!(matches!(
        error_kind(builder.create_insert(
            &mut qb,
            "Person",
            &fields,
            None,
            Some(&DbField::primary("Id")),
            None
        )),
        StrataError::InvalidArgument(..)
    ));
    assert!(matches!(
        error_kind(builder.create_insert(
            &mut qb,
            "Person",
            &Field::from_names(["Id"]),
            None,
            Some(&DbField::identity("Id")),
            None
        )),
        StrataError::InvalidArgument(..)
    ));

    // Update
    assert!(matches!(
        error_kind(builder.create_update(
            &mut qb,
            "Person",
            &Field::from_names(["Id"]),
            None,
            Some(&DbField::primary("Id")),
            None,
            None
        )),
        StrataError::EmptyUpdatableFields(..)
    ));
    assert!(matches!(
        error_kind(builder.create_update_all(
            &mut qb,
            "Person",
            &fields,
            &[],
            1,
            None,
            None,
            None
        )),
        StrataError::InvalidQualifiers(..)
    ));
    assert!(matches!(
        error_kind(builder.create_update_all(
            &mut qb,
            "Person",
            &fields,
            &Field::from_names(["Code"]),
            1,
            None,
            None,
            None
        )),
        StrataError::InvalidQualifiers(..)
    ));
    assert!(matches!(
        error_kind(builder.create_update_all(
            &mut qb,
            "Person",
            &fields,
            &[],
            0,
            Some(&DbField::primary("Id")),
            None,
            None
        )),
        StrataError::ArgumentOutOfRange {
            name: "batch_size",
            ..
        }
    ));

    // Aggregates
    assert!(matches!(
        error_kind(builder.create_average(
            &mut qb,
            "Person",
            &Field::new("Name").with_type(Value::Varchar(None)),
            None,
            None
        )),
        StrataError::UnsupportedType(..)
    ));
    let no_keys: &[Value] = &[];
    assert!(matches!(
        error_kind(builder.create_delete_all(
            &mut qb,
            "Person",
            Some((&Field::new("Id"), no_keys)),
            None
        )),
        StrataError::InvalidArgument(..)
    ));

    // Hints
    let hinted = builder.create_query(
        &mut qb,
        "Person",
        &fields,
        None,
        &[],
        None,
        Some("/*+ FIRST_ROWS */"),
    );
    if builder.db_setting().are_table_hints_supported {
        let sql = hinted.expect("Hints are supported by this dialect");
        assert!(sql.contains("/*+ FIRST_ROWS */"));
    } else {
        assert!(matches!(
            error_kind(hinted),
            StrataError::UnsupportedFeature(..)
        ));
    }

    // A failed compilation leaves a reusable builder
    let sql = builder
        .create_count_all(&mut qb, "Person", None)
        .expect("Count all must compile");
    assert!(sql.starts_with("SELECT COUNT (*) AS "), "{sql}");
    assert_eq!(qb.batch_index(), 0);
}
