use crate::{
    DbSetting, Field, Result, StrataError, Value, alphanumeric, as_unquoted, guard_field_names,
};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    Like,
    NotLike,
    Between,
    NotBetween,
    In,
    NotIn,
}

impl Operation {
    pub fn as_text(&self) -> &'static str {
        match self {
            Operation::Equal => "=",
            Operation::NotEqual => "<>",
            Operation::LessThan => "<",
            Operation::GreaterThan => ">",
            Operation::LessThanOrEqual => "<=",
            Operation::GreaterThanOrEqual => ">=",
            Operation::Like => "LIKE",
            Operation::NotLike => "NOT LIKE",
            Operation::Between => "BETWEEN",
            Operation::NotBetween => "NOT BETWEEN",
            Operation::In => "IN",
            Operation::NotIn => "NOT IN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

impl Conjunction {
    pub fn as_text(&self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
        }
    }
}

/// Right hand side of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Single(Value),
    Range(Value, Value),
    List(Vec<Value>),
}

/// A named parameter bound to a rendered marker, the name carries no dialect prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Predicate leaf: `<field> <operation> <operand>`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryField {
    pub field: Field,
    pub operation: Operation,
    pub operand: Operand,
}

impl QueryField {
    pub fn new(name: impl Into<String>, operation: Operation, value: impl Into<Value>) -> Self {
        Self {
            field: Field::new(name),
            operation,
            operand: Operand::Single(value.into()),
        }
    }
    pub fn equal(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(name, Operation::Equal, value)
    }
    pub fn not_equal(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(name, Operation::NotEqual, value)
    }
    pub fn is_null(name: impl Into<String>) -> Self {
        Self::new(name, Operation::Equal, Value::Null)
    }
    pub fn between(name: impl Into<String>, left: impl Into<Value>, right: impl Into<Value>) -> Self {
        Self {
            field: Field::new(name),
            operation: Operation::Between,
            operand: Operand::Range(left.into(), right.into()),
        }
    }
    pub fn in_list<V: Into<Value>>(name: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            field: Field::new(name),
            operation: Operation::In,
            operand: Operand::List(values.into_iter().map(Into::into).collect()),
        }
    }
    /// Swaps the operation for its negated form.
    pub fn negate(mut self) -> Self {
        self.operation = match self.operation {
            Operation::Equal => Operation::NotEqual,
            Operation::NotEqual => Operation::Equal,
            Operation::LessThan => Operation::GreaterThanOrEqual,
            Operation::GreaterThan => Operation::LessThanOrEqual,
            Operation::LessThanOrEqual => Operation::GreaterThan,
            Operation::GreaterThanOrEqual => Operation::LessThan,
            Operation::Like => Operation::NotLike,
            Operation::NotLike => Operation::Like,
            Operation::Between => Operation::NotBetween,
            Operation::NotBetween => Operation::Between,
            Operation::In => Operation::NotIn,
            Operation::NotIn => Operation::In,
        };
        self
    }
}

/// Predicate tree, leaves and nested groups joined by one conjunction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryGroup {
    pub fields: Vec<QueryField>,
    pub groups: Vec<QueryGroup>,
    pub conjunction: Conjunction,
    pub is_not: bool,
}

impl QueryGroup {
    pub fn new(fields: impl IntoIterator<Item = QueryField>, conjunction: Conjunction) -> Self {
        Self {
            fields: fields.into_iter().collect(),
            groups: Vec::new(),
            conjunction,
            is_not: false,
        }
    }
    pub fn and(fields: impl IntoIterator<Item = QueryField>) -> Self {
        Self::new(fields, Conjunction::And)
    }
    pub fn or(fields: impl IntoIterator<Item = QueryField>) -> Self {
        Self::new(fields, Conjunction::Or)
    }
    /// Equality on every pair, joined by `AND`.
    pub fn parse<S: Into<String>>(pairs: impl IntoIterator<Item = (S, Value)>) -> Self {
        Self::and(pairs.into_iter().map(|(k, v)| QueryField::equal(k, v)))
    }
    pub fn with_group(mut self, group: QueryGroup) -> Self {
        self.groups.push(group);
        self
    }
    pub fn not(mut self) -> Self {
        self.is_not = !self.is_not;
        self
    }
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.groups.iter().all(QueryGroup::is_empty)
    }
    /// Every field referenced by the tree, in tree order.
    pub fn get_fields(&self) -> Vec<&Field> {
        let mut result = Vec::new();
        self.collect_fields(&mut result);
        result
    }
    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a Field>) {
        out.extend(self.fields.iter().map(|v| &v.field));
        for group in &self.groups {
            group.collect_fields(out);
        }
    }

    /// Renders the tree, `index` is the batch index and `extra_prefix` is prepended to every
    /// parameter name (`_` for the filter of an update).
    pub fn render(&self, index: usize, extra_prefix: &str, setting: &DbSetting) -> Result<String> {
        let mut state = RenderState::new(index, extra_prefix, setting);
        let mut out = String::with_capacity(64);
        self.walk(&mut state, &mut out)?;
        Ok(out)
    }
    /// The parameters referenced by [`QueryGroup::render`] with the same arguments, in order.
    pub fn get_parameters(
        &self,
        index: usize,
        extra_prefix: &str,
        setting: &DbSetting,
    ) -> Result<Vec<Parameter>> {
        let mut state = RenderState::new(index, extra_prefix, setting);
        let mut out = String::new();
        self.walk(&mut state, &mut out)?;
        Ok(state.parameters)
    }

    fn walk(&self, state: &mut RenderState, out: &mut String) -> Result<()> {
        if self.is_not {
            out.push_str("NOT ");
        }
        out.push('(');
        let separator = format!(" {} ", self.conjunction.as_text());
        let mut first = true;
        for field in &self.fields {
            if !first {
                out.push_str(&separator);
            }
            first = false;
            state.write_field(field, out)?;
        }
        for group in self.groups.iter().filter(|v| !v.is_empty()) {
            if !first {
                out.push_str(&separator);
            }
            first = false;
            group.walk(state, out)?;
        }
        out.push(')');
        Ok(())
    }
}

struct RenderState<'s> {
    index: usize,
    extra_prefix: &'s str,
    setting: &'s DbSetting,
    seen: HashMap<String, usize>,
    /// Every parameter name handed out so far, lowercase.
    used: HashSet<String>,
    parameters: Vec<Parameter>,
}

impl<'s> RenderState<'s> {
    fn new(index: usize, extra_prefix: &'s str, setting: &'s DbSetting) -> Self {
        Self {
            index,
            extra_prefix,
            setting,
            seen: HashMap::new(),
            used: HashSet::new(),
            parameters: Vec::new(),
        }
    }

    /// `<extra><name>[_<n>][_<index>]`, `n` counts the previous occurrences of the same field.
    ///
    /// `n` is bumped further until none of the names derived with `suffixes` was handed out yet,
    /// so a field already named `Id_1` never shares a parameter with the second `Id`.
    fn base_name(&mut self, field: &Field, suffixes: &[String]) -> Result<String> {
        let name = alphanumeric(&as_unquoted(&field.name, true, self.setting));
        if name.is_empty() {
            return Err(StrataError::invalid_argument(format!(
                "The field `{}` has no character usable in a parameter name",
                field.name
            )));
        }
        let key = name.to_ascii_lowercase();
        let mut count = self.seen.get(&key).copied().unwrap_or_default();
        let mut buffer = itoa::Buffer::new();
        let result = loop {
            let mut result = format!("{}{}", self.extra_prefix, name);
            if count > 0 {
                result.push('_');
                result.push_str(buffer.format(count));
            }
            if self.index > 0 {
                result.push('_');
                result.push_str(buffer.format(self.index));
            }
            let taken = suffixes
                .iter()
                .any(|v| self.used.contains(&format!("{result}{v}").to_ascii_lowercase()));
            if !taken {
                break result;
            }
            count += 1;
        };
        self.seen.insert(key, count + 1);
        Ok(result)
    }

    fn push(&mut self, name: String, value: Value, out: &mut String) {
        out.push_str(&self.setting.parameter_prefix);
        out.push_str(&name);
        self.used.insert(name.to_ascii_lowercase());
        self.parameters.push(Parameter { name, value });
    }

    fn write_field(&mut self, query_field: &QueryField, out: &mut String) -> Result<()> {
        guard_field_names([&query_field.field])?;
        out.push_str(&query_field.field.as_field(self.setting));
        out.push(' ');
        let operation = query_field.operation;
        match (&query_field.operand, operation) {
            (Operand::Single(value), Operation::Equal | Operation::NotEqual) if value.is_null() => {
                out.push_str(if operation == Operation::Equal {
                    "IS NULL"
                } else {
                    "IS NOT NULL"
                });
            }
            (Operand::Range(left, right), Operation::Between | Operation::NotBetween) => {
                let name = self.base_name(
                    &query_field.field,
                    &["_Left".to_string(), "_Right".to_string()],
                )?;
                out.push_str(operation.as_text());
                out.push(' ');
                self.push(format!("{name}_Left"), left.clone(), out);
                out.push_str(" AND ");
                self.push(format!("{name}_Right"), right.clone(), out);
            }
            (Operand::List(values), Operation::In | Operation::NotIn) => {
                if values.is_empty() {
                    return Err(StrataError::invalid_argument(format!(
                        "The `{}` operation on `{}` requires at least one value",
                        operation.as_text(),
                        query_field.field.name
                    )));
                }
                let suffixes = (0..values.len())
                    .map(|i| format!("_In_{i}"))
                    .collect::<Vec<_>>();
                let name = self.base_name(&query_field.field, &suffixes)?;
                out.push_str(operation.as_text());
                out.push_str(" (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.push(format!("{name}_In_{i}"), value.clone(), out);
                }
                out.push(')');
            }
            (
                Operand::Single(value),
                Operation::Equal
                | Operation::NotEqual
                | Operation::LessThan
                | Operation::GreaterThan
                | Operation::LessThanOrEqual
                | Operation::GreaterThanOrEqual
                | Operation::Like
                | Operation::NotLike,
            ) => {
                let name = self.base_name(&query_field.field, &[String::new()])?;
                out.push_str(operation.as_text());
                out.push(' ');
                self.push(name, value.clone(), out);
            }
            (operand, operation) => {
                return Err(StrataError::invalid_argument(format!(
                    "The operand {operand:?} cannot be used with the `{}` operation on `{}`",
                    operation.as_text(),
                    query_field.field.name
                )));
            }
        }
        Ok(())
    }
}
