use std::collections::BTreeSet;
use strata_core::{
    DbField, DbSetting, Field, QueryBuilder, StatementBuilder, Value, as_parameter,
};

/// Every parameter marker of `sql`.
fn parameters(sql: &str, setting: &DbSetting) -> BTreeSet<String> {
    sql.split(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')'))
        .filter(|v| v.starts_with(setting.parameter_prefix.as_str()))
        .map(ToString::to_string)
        .collect()
}

pub fn batches(builder: &dyn StatementBuilder) {
    let setting = builder.db_setting();
    let mut qb = QueryBuilder::new();
    let fields = Field::from_names(["Id", "Name", "Age"]);
    let primary = DbField::primary("Id");
    let rows = if setting.is_multi_statement_executable {
        3
    } else {
        1
    };

    // Row suffixes
    let sql = builder
        .create_insert_all(&mut qb, "Person", &fields, rows, None, None, None)
        .expect("Insert all must compile");
    let expected = fields
        .iter()
        .flat_map(|f| (0..rows).map(|i| as_parameter(&f.name, i, setting)))
        .collect::<BTreeSet<_>>();
    assert_eq!(parameters(&sql, setting), expected, "{sql}");
    assert_eq!(expected.len(), fields.len() * rows);
    assert_eq!(qb.batch_index(), rows - 1);

    // Update all keyed on the primary
    let sql = builder
        .create_update_all(&mut qb, "Person", &fields, &[], rows, Some(&primary), None, None)
        .expect("Update all must compile");
    assert_eq!(sql.matches("UPDATE ").count(), rows, "{sql}");
    let id = Field::new("Id").as_field(setting);
    for i in 0..rows {
        let key = format!("WHERE ({id} = {})", as_parameter("Id", i, setting));
        assert_eq!(sql.matches(&key).count(), 1, "{key} in {sql}");
    }
    assert!(!sql.contains(&format!("SET {id}")), "{sql}");

    // Delete all splits the keys in lists of at most `max_in_list_size`
    let max = setting.max_in_list_size;
    if max > 0 {
        let keys = (0..=max as i64).map(Value::from).collect::<Vec<_>>();
        let key = Field::new("Id");
        let sql = builder
            .create_delete_all(&mut qb, "Person", Some((&key, &keys[..max])), None)
            .expect("Delete all must compile");
        assert_eq!(sql.matches(" IN (").count(), 1);
        assert!(!sql.contains(" OR "));
        let sql = builder
            .create_delete_all(&mut qb, "Person", Some((&key, &keys[..])), None)
            .expect("Delete all must compile");
        assert_eq!(sql.matches(" IN (").count(), 2);
        assert_eq!(parameters(&sql, setting).len(), max + 1);
    }
}
