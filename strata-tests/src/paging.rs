use crate::guards::error_kind;
use strata_core::{Field, OrderField, QueryBuilder, StatementBuilder, StrataError};

pub fn paging(builder: &dyn StatementBuilder) {
    let mut qb = QueryBuilder::new();
    let fields = Field::from_names(["Id", "Name"]);
    let order = [OrderField::ascending("Id")];

    let first = builder
        .create_batch_query(&mut qb, "Person", &fields, 0, 3, &order, None, None)
        .expect("The first page must compile");
    assert!(!first.contains("OFFSET"), "{first}");
    assert!(first.contains('3'), "{first}");

    let third = builder
        .create_batch_query(&mut qb, "Person", &fields, 2, 3, &order, None, None)
        .expect("The third page must compile");
    assert!(third.contains("OFFSET 6"), "{third}");

    assert!(matches!(
        error_kind(builder.create_batch_query(&mut qb, "Person", &fields, 0, 3, &[], None, None)),
        StrataError::EmptyOrdering(..)
    ));
    assert!(matches!(
        error_kind(builder.create_batch_query(&mut qb, "Person", &fields, -1, 3, &order, None, None)),
        StrataError::ArgumentOutOfRange { name: "page", .. }
    ));
    assert!(matches!(
        error_kind(builder.create_batch_query(&mut qb, "Person", &fields, 0, 0, &order, None, None)),
        StrataError::ArgumentOutOfRange {
            name: "rows_per_batch",
            ..
        }
    ));
    assert!(matches!(
        error_kind(builder.create_batch_query(
            &mut qb,
            "Person",
            &fields,
            i64::MAX,
            2,
            &order,
            None,
            None
        )),
        StrataError::ArgumentOutOfRange { name: "page", .. }
    ));

    let top = builder
        .create_query(&mut qb, "Person", &fields, None, &[], Some(2), None)
        .expect("A limited query must compile");
    assert!(!top.contains("WHERE"), "{top}");
    assert!(top.contains('2'), "{top}");
}
