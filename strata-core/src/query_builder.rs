use crate::{
    ConvertFieldResolver, DbSetting, Field, OrderField, QueryGroup, Result, alphanumeric,
    as_quoted, as_unquoted, separated_by,
};

/// Parameter name (without the dialect prefix) of `name` for the row `index` of a batch.
pub fn parameter_name(name: &str, index: usize, setting: &DbSetting) -> String {
    let mut result = alphanumeric(&as_unquoted(name, true, setting));
    if index > 0 {
        result.push('_');
        result.push_str(itoa::Buffer::new().format(index));
    }
    result
}

/// Native parameter marker of `name` for the row `index` of a batch.
pub fn as_parameter(name: &str, index: usize, setting: &DbSetting) -> String {
    format!(
        "{}{}",
        setting.parameter_prefix,
        parameter_name(name, index, setting)
    )
}

/// Accumulates the fragments of one statement (or one multi-statement batch).
///
/// Fragments are joined by a single space. Parameter markers are suffixed with the current batch
/// index (`_<index>`) once [`QueryBuilder::next_batch`] moved past the first row.
#[derive(Debug, Default, Clone)]
pub struct QueryBuilder {
    parts: Vec<String>,
    batch_index: usize,
}

macro_rules! keyword {
    ($($(#[$meta:meta])* $name:ident => $text:literal),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(&mut self) -> &mut Self {
                self.write_text($text)
            }
        )+
    };
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every fragment and rewinds the batch index.
    pub fn clear(&mut self) -> &mut Self {
        self.parts.clear();
        self.batch_index = 0;
        self
    }

    /// The statement so far, it can be called any number of times.
    pub fn get_string(&self) -> String {
        self.parts.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn batch_index(&self) -> usize {
        self.batch_index
    }

    /// Moves to the next row of a batch.
    pub fn next_batch(&mut self) -> &mut Self {
        self.batch_index += 1;
        self
    }

    /// Appends `text` as one fragment, empty text is ignored.
    pub fn write_text(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        if !text.is_empty() {
            self.parts.push(text);
        }
        self
    }

    keyword!(
        select => "SELECT",
        from => "FROM",
        insert => "INSERT",
        into => "INTO",
        values => "VALUES",
        update => "UPDATE",
        set => "SET",
        delete => "DELETE",
        merge => "MERGE",
        using => "USING",
        on => "ON",
        when => "WHEN",
        matched => "MATCHED",
        not => "NOT",
        then => "THEN",
        truncate => "TRUNCATE",
        table => "TABLE",
        union_all => "UNION ALL",
        returning => "RETURNING",
        open_paren => "(",
        close_paren => ")",
        /// Statement terminator.
        end => ";",
    );

    pub fn hints_from(&mut self, hints: Option<&str>) -> &mut Self {
        match hints.map(str::trim) {
            Some(hints) if !hints.is_empty() => self.write_text(hints),
            _ => self,
        }
    }

    pub fn table_name_from(&mut self, table: &str, setting: &DbSetting) -> &mut Self {
        self.write_text(as_quoted(table, true, false, setting))
    }

    /// `"A", "B"`
    pub fn fields_from<'a>(
        &mut self,
        fields: impl IntoIterator<Item = &'a Field>,
        setting: &DbSetting,
    ) -> &mut Self {
        let mut out = String::new();
        separated_by(&mut out, fields, |out, v| out.push_str(&v.as_field(setting)), ", ");
        self.write_text(out)
    }

    /// `:A, :B`
    pub fn parameters_from<'a>(
        &mut self,
        fields: impl IntoIterator<Item = &'a Field>,
        setting: &DbSetting,
    ) -> &mut Self {
        let index = self.batch_index;
        let mut out = String::new();
        separated_by(
            &mut out,
            fields,
            |out, v| out.push_str(&as_parameter(&v.name, index, setting)),
            ", ",
        );
        self.write_text(out)
    }

    /// `:A AS "A", :B AS "B"`
    pub fn parameters_as_fields_from<'a>(
        &mut self,
        fields: impl IntoIterator<Item = &'a Field>,
        setting: &DbSetting,
    ) -> &mut Self {
        let index = self.batch_index;
        let mut out = String::new();
        separated_by(
            &mut out,
            fields,
            |out, v| {
                out.push_str(&as_parameter(&v.name, index, setting));
                out.push_str(" AS ");
                out.push_str(&v.as_field(setting));
            },
            ", ",
        );
        self.write_text(out)
    }

    /// `"A" = :A, "B" = :B`
    pub fn fields_and_parameters_from<'a>(
        &mut self,
        fields: impl IntoIterator<Item = &'a Field>,
        setting: &DbSetting,
    ) -> &mut Self {
        let index = self.batch_index;
        let mut out = String::new();
        separated_by(
            &mut out,
            fields,
            |out, v| {
                out.push_str(&v.as_field(setting));
                out.push_str(" = ");
                out.push_str(&as_parameter(&v.name, index, setting));
            },
            ", ",
        );
        self.write_text(out)
    }

    /// `<left>."A" = <right>."A", …`
    pub fn fields_and_alias_fields_from<'a>(
        &mut self,
        fields: impl IntoIterator<Item = &'a Field>,
        left_alias: &str,
        right_alias: &str,
        setting: &DbSetting,
    ) -> &mut Self {
        let mut out = String::new();
        separated_by(
            &mut out,
            fields,
            |out, v| {
                let field = v.as_field(setting);
                out.push_str(&format!("{left_alias}.{field} = {right_alias}.{field}"));
            },
            ", ",
        );
        self.write_text(out)
    }

    /// `<alias>."A", <alias>."B"`
    pub fn as_alias_fields_from<'a>(
        &mut self,
        fields: impl IntoIterator<Item = &'a Field>,
        alias: &str,
        setting: &DbSetting,
    ) -> &mut Self {
        let mut out = String::new();
        separated_by(
            &mut out,
            fields,
            |out, v| {
                out.push_str(alias);
                out.push('.');
                out.push_str(&v.as_field(setting));
            },
            ", ",
        );
        self.write_text(out)
    }

    /// `<left>."Id" = <right>."Id" AND …`, the join condition of a merge.
    pub fn join_qualifiers_from<'a>(
        &mut self,
        qualifiers: impl IntoIterator<Item = &'a Field>,
        left_alias: &str,
        right_alias: &str,
        setting: &DbSetting,
    ) -> &mut Self {
        let mut out = String::new();
        separated_by(
            &mut out,
            qualifiers,
            |out, v| {
                let field = v.as_field(setting);
                out.push_str(&format!("{left_alias}.{field} = {right_alias}.{field}"));
            },
            " AND ",
        );
        self.write_text(out)
    }

    /// `WHERE (…)`, nothing when the group is absent or empty.
    ///
    /// The batch index of the builder suffixes the parameters, `extra_prefix` is prepended to them.
    pub fn where_from(
        &mut self,
        filter: Option<&QueryGroup>,
        extra_prefix: &str,
        setting: &DbSetting,
    ) -> Result<&mut Self> {
        match filter {
            Some(group) if !group.is_empty() => {
                let text = group.render(self.batch_index, extra_prefix, setting)?;
                Ok(self.write_text("WHERE").write_text(text))
            }
            _ => Ok(self),
        }
    }

    /// `WHERE ("Id" = :Id_<index> AND …)` matching the current row of a batch.
    pub fn where_from_qualifiers<'a>(
        &mut self,
        qualifiers: impl IntoIterator<Item = &'a Field>,
        setting: &DbSetting,
    ) -> &mut Self {
        let index = self.batch_index;
        let mut out = String::from("(");
        separated_by(
            &mut out,
            qualifiers,
            |out, v| {
                out.push_str(&v.as_field(setting));
                out.push_str(" = ");
                out.push_str(&as_parameter(&v.name, index, setting));
            },
            " AND ",
        );
        out.push(')');
        self.write_text("WHERE").write_text(out)
    }

    /// `ORDER BY "A" ASC, "B" DESC`, nothing for an empty list.
    pub fn order_by_from(&mut self, order_by: &[OrderField], setting: &DbSetting) -> &mut Self {
        if order_by.is_empty() {
            return self;
        }
        let mut out = String::new();
        separated_by(
            &mut out,
            order_by,
            |out, v| out.push_str(&v.as_field(setting)),
            ", ",
        );
        self.write_text("ORDER BY").write_text(out)
    }

    /// `COUNT (*)`, or `COUNT ("A")` for a field.
    pub fn count(&mut self, field: Option<&Field>, setting: &DbSetting) -> &mut Self {
        let target = field
            .map(|v| v.as_field(setting))
            .unwrap_or_else(|| "*".into());
        self.write_text(format!("COUNT ({target})"))
    }

    pub fn sum(&mut self, field: &Field, setting: &DbSetting) -> &mut Self {
        self.write_text(format!("SUM ({})", field.as_field(setting)))
    }

    pub fn max(&mut self, field: &Field, setting: &DbSetting) -> &mut Self {
        self.write_text(format!("MAX ({})", field.as_field(setting)))
    }

    pub fn min(&mut self, field: &Field, setting: &DbSetting) -> &mut Self {
        self.write_text(format!("MIN ({})", field.as_field(setting)))
    }

    /// `AVG (<field>)` where the field goes through the convert resolver.
    pub fn average(
        &mut self,
        field: &Field,
        setting: &DbSetting,
        resolver: &dyn ConvertFieldResolver,
    ) -> Result<&mut Self> {
        let converted = resolver.resolve(field, setting)?;
        Ok(self.write_text(format!("AVG ({converted})")))
    }

    /// `AS "<alias>"`
    pub fn as_alias(&mut self, alias: &str, setting: &DbSetting) -> &mut Self {
        self.write_text(format!("AS {}", as_quoted(alias, true, true, setting)))
    }
}
