use strata_core::{StatementBuilder, as_quoted, as_unquoted};

pub fn quoting(builder: &dyn StatementBuilder) {
    let setting = builder.db_setting();
    let (open, close) = (&setting.opening_quote, &setting.closing_quote);
    for name in [
        "Id",
        " Name ",
        "dbo.Person",
        "Person.Address.Line",
        "with space",
    ] {
        let once = as_quoted(name, true, false, setting);
        assert_eq!(
            as_quoted(&once, true, false, setting),
            once,
            "Quoting `{name}` twice must not change it"
        );
        let bare = as_unquoted(&once, true, setting);
        assert_eq!(
            as_unquoted(&bare, true, setting),
            bare,
            "Unquoting `{name}` twice must not change it"
        );
        assert!(!bare.contains(open.as_str()) && !bare.contains(close.as_str()));
    }

    assert_eq!(
        as_quoted("dbo.Person", true, false, setting),
        format!("{open}dbo{close}.{open}Person{close}")
    );
    assert_eq!(
        as_quoted("dbo.Person", true, true, setting),
        format!("{open}dbo.Person{close}")
    );
    assert_eq!(
        as_quoted(" Id ", true, true, setting),
        format!("{open}Id{close}")
    );
    assert_eq!(as_unquoted(&format!(" {open}Id{close} "), true, setting), "Id");
}
