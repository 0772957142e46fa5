use crate::guards::error_kind;
use strata_core::{
    DbField, Field, QueryBuilder, SOURCE_ALIAS, StatementBuilder, StrataError, as_quoted,
};

pub fn merges(builder: &dyn StatementBuilder) {
    let setting = builder.db_setting();
    let mut qb = QueryBuilder::new();
    let fields = Field::from_names(["Id", "Name"]);
    let primary = DbField::primary("Id");
    let id = Field::new("Id").as_field(setting);
    let name = Field::new("Name").as_field(setting);

    // The primary stands in for the missing qualifiers
    let sql = builder
        .create_merge(&mut qb, "Person", &fields, &[], Some(&primary), None, None)
        .expect("Merge must compile");
    if setting.is_use_upsert {
        assert!(sql.contains(&format!("ON CONFLICT ( {id} )")), "{sql}");
    } else {
        let target = as_quoted("Person", true, false, setting);
        let source = as_quoted(SOURCE_ALIAS, true, true, setting);
        assert!(
            sql.contains(&format!("ON ( {target}.{id} = {source}.{id} )")),
            "{sql}"
        );
        assert!(!sql.contains(&format!("{target}.{id} = {source}.{id},")), "{sql}");
    }
    assert!(sql.contains(&name));

    assert!(matches!(
        error_kind(builder.create_merge(&mut qb, "Person", &fields, &[], None, None, None)),
        StrataError::PrimaryFieldNotFound(..)
    ));
    assert!(matches!(
        error_kind(builder.create_merge(
            &mut qb,
            "Person",
            &fields,
            &Field::from_names(["Code"]),
            None,
            None,
            None
        )),
        StrataError::InvalidQualifiers(..)
    ));
    assert!(matches!(
        error_kind(builder.create_merge_all(
            &mut qb,
            "Person",
            &fields,
            &[],
            0,
            Some(&primary),
            None,
            None
        )),
        StrataError::ArgumentOutOfRange {
            name: "batch_size",
            ..
        }
    ));
}
