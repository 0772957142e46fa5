use crate::{
    AverageableTypeResolver, ClientTypeResolver, ClientTypeToAverageableClientTypeResolver,
    ClientTypeToDbTypeResolver, ConvertFieldResolver, DbConvertFieldResolver, DbField, DbSetting,
    DbTypeNameResolver, DbTypeToGenericStringNameResolver, Field, Operand, Operation, OrderField,
    QueryBuilder, QueryField, QueryGroup, RESULT_PARAMETER, Result, StrataError, Value,
    as_parameter, as_quoted, join_names, separated_by, truncate_long,
};

/// Alias of the synthetic row source of a merge.
pub const SOURCE_ALIAS: &str = "_SOURCE";

/// Where a dialect expects the optimizer hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintsPlacement {
    /// Right after the leading keyword: `SELECT /*+ HINT */ …`.
    AfterKeyword,
    /// Before the statement terminator.
    StatementEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Count,
    Sum,
    Max,
    Min,
    Average,
}

impl Aggregate {
    /// Name of the result column.
    pub fn alias(&self) -> &'static str {
        match self {
            Aggregate::Count => "CountValue",
            Aggregate::Sum => "SumValue",
            Aggregate::Max => "MaxValue",
            Aggregate::Min => "MinValue",
            Aggregate::Average => "AverageValue",
        }
    }
}

pub fn guard_table_name(table: &str) -> Result<()> {
    if table.trim().is_empty() {
        return Err(StrataError::invalid_argument(
            "The table name cannot be empty",
        ));
    }
    Ok(())
}

fn contains(fields: &[Field], name: &str) -> bool {
    fields.iter().any(|f| f.matches(name))
}

fn guard_fields(table: &str, fields: &[Field]) -> Result<()> {
    if fields.is_empty() {
        return Err(StrataError::invalid_argument(format!(
            "The list of fields cannot be empty for `{table}`"
        )));
    }
    crate::guard_field_names(fields)
}

fn guard_order_fields(order_by: &[OrderField], fields: &[Field]) -> Result<()> {
    let missing = order_by
        .iter()
        .filter(|v| !contains(fields, &v.name))
        .map(|v| v.name.as_str())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(StrataError::MissingFields(format!(
            "The order fields `{}` are not present at the given fields `{}`",
            missing.join(", "),
            join_names(fields)
        ))
        .into());
    }
    Ok(())
}

fn guard_db_field(
    field: Option<&DbField>,
    flagged: fn(&DbField) -> bool,
    fields: &[Field],
    role: &str,
) -> Result<()> {
    let Some(field) = field else {
        return Ok(());
    };
    if !flagged(field) {
        return Err(StrataError::invalid_argument(format!(
            "The field `{}` is not defined as {role}",
            field.name
        )));
    }
    if !contains(fields, &field.name) {
        return Err(StrataError::MissingFields(format!(
            "The {role} field `{}` is not present at the given fields `{}`",
            field.name,
            join_names(fields)
        ))
        .into());
    }
    Ok(())
}

pub fn guard_primary(primary: Option<&DbField>, fields: &[Field]) -> Result<()> {
    guard_db_field(primary, |v| v.is_primary, fields, "primary")
}

pub fn guard_identity(identity: Option<&DbField>, fields: &[Field]) -> Result<()> {
    guard_db_field(identity, |v| v.is_identity, fields, "identity")
}

fn is_named(field: &Field, other: Option<&DbField>) -> bool {
    other.is_some_and(|v| field.matches(&v.name))
}

/// Filter of a delete scoped to `keys`, split in as many `IN` lists as `max_in_list_size` requires.
pub fn delete_all_filter(key: &Field, keys: &[Value], max_in_list_size: usize) -> QueryGroup {
    let size = if max_in_list_size == 0 {
        keys.len().max(1)
    } else {
        max_in_list_size
    };
    QueryGroup::or(keys.chunks(size).map(|chunk| QueryField {
        field: key.clone(),
        operation: Operation::In,
        operand: Operand::List(chunk.to_vec()),
    }))
}

/// Compiles operations into SQL text for one dialect.
///
/// Every `create_*` clears the builder, checks its arguments before writing anything and returns
/// the final text. Dialects override the small `write_*` hooks where their syntax differs.
pub trait StatementBuilder: Send + Sync {
    fn as_dyn(&self) -> &dyn StatementBuilder;

    fn db_setting(&self) -> &DbSetting;

    fn convert_field_resolver(&self) -> &dyn ConvertFieldResolver;

    fn db_type_name_resolver(&self) -> &dyn DbTypeNameResolver;

    fn client_type_resolver(&self) -> &dyn ClientTypeResolver {
        &ClientTypeToDbTypeResolver
    }

    fn averageable_type_resolver(&self) -> &dyn AverageableTypeResolver {
        &ClientTypeToAverageableClientTypeResolver
    }

    fn hints_placement(&self) -> HintsPlacement {
        HintsPlacement::StatementEnd
    }

    fn guard_hints(&self, hints: Option<&str>) -> Result<()> {
        let requested = hints.is_some_and(|v| !v.trim().is_empty());
        if requested && !self.db_setting().are_table_hints_supported {
            return Err(StrataError::unsupported_feature(
                "The hints are not supported by this dialect",
            ));
        }
        Ok(())
    }

    fn validate_multiple_statement_execution(&self, batch_size: usize) -> Result<()> {
        if batch_size == 0 {
            return Err(StrataError::out_of_range(
                "batch_size",
                "The batch size must be equals or greater than 1",
            ));
        }
        if batch_size > 1 && !self.db_setting().is_multi_statement_executable {
            return Err(StrataError::unsupported_feature(format!(
                "Multiple statement execution is not supported, the batch size must be 1 (got {batch_size})"
            )));
        }
        Ok(())
    }

    fn write_hints(&self, builder: &mut QueryBuilder, hints: Option<&str>, at: HintsPlacement) {
        if at == self.hints_placement() {
            builder.hints_from(hints);
        }
    }

    fn write_row_limit(&self, builder: &mut QueryBuilder, top: u64) {
        builder.write_text(format!("LIMIT {top}"));
    }

    fn write_single_row_limit(&self, builder: &mut QueryBuilder) {
        self.write_row_limit(builder, 1);
    }

    fn write_paging(&self, builder: &mut QueryBuilder, skip: u64, take: u64) {
        if skip == 0 {
            builder.write_text(format!("LIMIT {take}"));
        } else {
            builder.write_text(format!("LIMIT {take} OFFSET {skip}"));
        }
    }

    fn write_end(&self, builder: &mut QueryBuilder) {
        builder.end();
    }

    fn write_batch_begin(&self, _builder: &mut QueryBuilder) {}

    fn write_batch_separator(&self, builder: &mut QueryBuilder) {
        builder.end();
    }

    fn write_batch_end(&self, _builder: &mut QueryBuilder) {}

    fn write_insert_return(&self, builder: &mut QueryBuilder, expression: &str) {
        builder
            .returning()
            .write_text(expression)
            .as_alias(RESULT_PARAMETER, self.db_setting());
    }

    fn write_merge_source_row(&self, builder: &mut QueryBuilder, fields: &[Field]) {
        builder
            .select()
            .parameters_as_fields_from(fields, self.db_setting());
    }

    fn write_truncate(&self, builder: &mut QueryBuilder, table: &str) {
        builder
            .truncate()
            .table()
            .table_name_from(table, self.db_setting());
    }

    /// Hints placed at the end, terminator and logging.
    fn finish_statement(&self, builder: &mut QueryBuilder, hints: Option<&str>) -> String {
        self.write_hints(builder, hints, HintsPlacement::StatementEnd);
        self.write_end(builder);
        self.compiled(builder)
    }

    fn compiled(&self, builder: &QueryBuilder) -> String {
        let sql = builder.get_string();
        log::trace!("Compiled: {}", truncate_long!(sql));
        sql
    }

    /// The expression returned by an insert: the identity (cast to its native type when it has a
    /// mapping), else the primary, else `NULL`.
    fn insert_return_expression(
        &self,
        primary: Option<&DbField>,
        identity: Option<&DbField>,
    ) -> String {
        let setting = self.db_setting();
        if let Some(identity) = identity {
            let quoted = as_quoted(&identity.name, true, true, setting);
            let native = identity.value_type.as_ref().and_then(|v| {
                self.client_type_resolver()
                    .resolve(v)
                    .and_then(|t| self.db_type_name_resolver().resolve(t))
                    .ok()
            });
            match native {
                Some(native) => format!("CAST({quoted} AS {native})"),
                None => quoted,
            }
        } else if let Some(primary) = primary {
            as_quoted(&primary.name, true, true, setting)
        } else {
            "NULL".into()
        }
    }

    fn create_query(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        fields: &[Field],
        filter: Option<&QueryGroup>,
        order_by: &[OrderField],
        top: Option<u64>,
        hints: Option<&str>,
    ) -> Result<String> {
        guard_table_name(table)?;
        self.guard_hints(hints)?;
        guard_fields(table, fields)?;
        guard_order_fields(order_by, fields)?;
        let setting = self.db_setting();
        builder.clear().select();
        self.write_hints(builder, hints, HintsPlacement::AfterKeyword);
        builder
            .fields_from(fields, setting)
            .from()
            .table_name_from(table, setting)
            .where_from(filter, "", setting)?
            .order_by_from(order_by, setting);
        if let Some(top) = top.filter(|v| *v > 0) {
            self.write_row_limit(builder, top);
        }
        Ok(self.finish_statement(builder, hints))
    }

    fn create_query_all(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        fields: &[Field],
        order_by: &[OrderField],
        hints: Option<&str>,
    ) -> Result<String> {
        guard_table_name(table)?;
        self.guard_hints(hints)?;
        guard_fields(table, fields)?;
        guard_order_fields(order_by, fields)?;
        let setting = self.db_setting();
        builder.clear().select();
        self.write_hints(builder, hints, HintsPlacement::AfterKeyword);
        builder
            .fields_from(fields, setting)
            .from()
            .table_name_from(table, setting)
            .order_by_from(order_by, setting);
        Ok(self.finish_statement(builder, hints))
    }

    fn create_batch_query(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        fields: &[Field],
        page: i64,
        rows_per_batch: i64,
        order_by: &[OrderField],
        filter: Option<&QueryGroup>,
        hints: Option<&str>,
    ) -> Result<String> {
        guard_table_name(table)?;
        self.guard_hints(hints)?;
        guard_fields(table, fields)?;
        if order_by.is_empty() {
            return Err(StrataError::EmptyOrdering(format!(
                "The ordering is required to page `{table}`"
            ))
            .into());
        }
        guard_order_fields(order_by, fields)?;
        if page < 0 {
            return Err(StrataError::out_of_range(
                "page",
                format!("The page must be equals or greater than 0 (got {page})"),
            ));
        }
        if rows_per_batch < 1 {
            return Err(StrataError::out_of_range(
                "rows_per_batch",
                format!("The rows per batch must be equals or greater than 1 (got {rows_per_batch})"),
            ));
        }
        let skip = page.checked_mul(rows_per_batch).ok_or_else(|| {
            StrataError::out_of_range("page", "The number of rows to skip overflows")
        })?;
        let setting = self.db_setting();
        builder.clear().select();
        self.write_hints(builder, hints, HintsPlacement::AfterKeyword);
        builder
            .fields_from(fields, setting)
            .from()
            .table_name_from(table, setting)
            .where_from(filter, "", setting)?
            .order_by_from(order_by, setting);
        self.write_paging(builder, skip as u64, rows_per_batch as u64);
        Ok(self.finish_statement(builder, hints))
    }

    fn create_exists(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        filter: Option<&QueryGroup>,
        hints: Option<&str>,
    ) -> Result<String> {
        guard_table_name(table)?;
        self.guard_hints(hints)?;
        let setting = self.db_setting();
        builder.clear().select();
        self.write_hints(builder, hints, HintsPlacement::AfterKeyword);
        builder
            .write_text("1")
            .as_alias("ExistsValue", setting)
            .from()
            .table_name_from(table, setting)
            .where_from(filter, "", setting)?;
        self.write_single_row_limit(builder);
        Ok(self.finish_statement(builder, hints))
    }

    /// `SELECT <aggregate> AS "<alias>" FROM <table> [WHERE …]`, `field` is ignored by `Count`.
    fn create_aggregate(
        &self,
        builder: &mut QueryBuilder,
        aggregate: Aggregate,
        table: &str,
        field: Option<&Field>,
        filter: Option<&QueryGroup>,
        hints: Option<&str>,
    ) -> Result<String> {
        guard_table_name(table)?;
        self.guard_hints(hints)?;
        let setting = self.db_setting();
        let field = match (aggregate, field) {
            (Aggregate::Count, _) => None,
            (_, Some(field)) => {
                crate::guard_field_names([field])?;
                Some(field)
            }
            (_, None) => {
                return Err(StrataError::null_argument(format!(
                    "The field is required by the {aggregate:?} aggregate"
                )));
            }
        };
        builder.clear().select();
        self.write_hints(builder, hints, HintsPlacement::AfterKeyword);
        match (aggregate, field) {
            (Aggregate::Sum, Some(field)) => {
                builder.sum(field, setting);
            }
            (Aggregate::Max, Some(field)) => {
                builder.max(field, setting);
            }
            (Aggregate::Min, Some(field)) => {
                builder.min(field, setting);
            }
            (Aggregate::Average, Some(field)) => {
                let value_type = field
                    .value_type
                    .clone()
                    .unwrap_or_else(|| setting.averageable_type.clone());
                let field = Field {
                    name: field.name.clone(),
                    value_type: Some(self.averageable_type_resolver().resolve(&value_type)?),
                };
                builder.average(&field, setting, self.convert_field_resolver())?;
            }
            _ => {
                builder.count(None, setting);
            }
        }
        builder
            .as_alias(aggregate.alias(), setting)
            .from()
            .table_name_from(table, setting)
            .where_from(filter, "", setting)?;
        Ok(self.finish_statement(builder, hints))
    }

    fn create_count(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        filter: Option<&QueryGroup>,
        hints: Option<&str>,
    ) -> Result<String> {
        self.create_aggregate(builder, Aggregate::Count, table, None, filter, hints)
    }

    fn create_count_all(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        hints: Option<&str>,
    ) -> Result<String> {
        self.create_aggregate(builder, Aggregate::Count, table, None, None, hints)
    }

    fn create_sum(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        field: &Field,
        filter: Option<&QueryGroup>,
        hints: Option<&str>,
    ) -> Result<String> {
        self.create_aggregate(builder, Aggregate::Sum, table, Some(field), filter, hints)
    }

    fn create_sum_all(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        field: &Field,
        hints: Option<&str>,
    ) -> Result<String> {
        self.create_aggregate(builder, Aggregate::Sum, table, Some(field), None, hints)
    }

    fn create_max(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        field: &Field,
        filter: Option<&QueryGroup>,
        hints: Option<&str>,
    ) -> Result<String> {
        self.create_aggregate(builder, Aggregate::Max, table, Some(field), filter, hints)
    }

    fn create_max_all(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        field: &Field,
        hints: Option<&str>,
    ) -> Result<String> {
        self.create_aggregate(builder, Aggregate::Max, table, Some(field), None, hints)
    }

    fn create_min(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        field: &Field,
        filter: Option<&QueryGroup>,
        hints: Option<&str>,
    ) -> Result<String> {
        self.create_aggregate(builder, Aggregate::Min, table, Some(field), filter, hints)
    }

    fn create_min_all(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        field: &Field,
        hints: Option<&str>,
    ) -> Result<String> {
        self.create_aggregate(builder, Aggregate::Min, table, Some(field), None, hints)
    }

    fn create_average(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        field: &Field,
        filter: Option<&QueryGroup>,
        hints: Option<&str>,
    ) -> Result<String> {
        self.create_aggregate(builder, Aggregate::Average, table, Some(field), filter, hints)
    }

    fn create_average_all(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        field: &Field,
        hints: Option<&str>,
    ) -> Result<String> {
        self.create_aggregate(builder, Aggregate::Average, table, Some(field), None, hints)
    }

    fn create_insert(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        fields: &[Field],
        primary: Option<&DbField>,
        identity: Option<&DbField>,
        hints: Option<&str>,
    ) -> Result<String> {
        guard_table_name(table)?;
        self.guard_hints(hints)?;
        guard_fields(table, fields)?;
        guard_primary(primary, fields)?;
        guard_identity(identity, fields)?;
        let insertable = insertable_fields(table, fields, identity)?;
        let result = self.insert_return_expression(primary, identity);
        builder.clear();
        self.write_insert_row(builder, table, &insertable, hints);
        self.write_insert_return(builder, &result);
        Ok(self.finish_statement(builder, hints))
    }

    /// `INSERT INTO <table> ( … ) VALUES ( … )` for the current row of the builder.
    fn write_insert_row(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        insertable: &[Field],
        hints: Option<&str>,
    ) {
        let setting = self.db_setting();
        builder.insert();
        self.write_hints(builder, hints, HintsPlacement::AfterKeyword);
        builder
            .into()
            .table_name_from(table, setting)
            .open_paren()
            .fields_from(insertable, setting)
            .close_paren()
            .values()
            .open_paren()
            .parameters_from(insertable, setting)
            .close_paren();
    }

    fn create_insert_all(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        fields: &[Field],
        batch_size: usize,
        primary: Option<&DbField>,
        identity: Option<&DbField>,
        hints: Option<&str>,
    ) -> Result<String> {
        guard_table_name(table)?;
        self.guard_hints(hints)?;
        guard_fields(table, fields)?;
        guard_primary(primary, fields)?;
        guard_identity(identity, fields)?;
        self.validate_multiple_statement_execution(batch_size)?;
        let insertable = insertable_fields(table, fields, identity)?;
        builder.clear();
        self.write_batch(builder, batch_size, hints, &mut |builder: &mut QueryBuilder| {
            self.write_insert_row(builder, table, &insertable, hints);
            Ok(())
        })?;
        Ok(self.compiled(builder))
    }

    /// Repeats `write_row` once per row. More than one row is wrapped in the batch delimiters of
    /// the dialect, a single row is a plain statement.
    fn write_batch(
        &self,
        builder: &mut QueryBuilder,
        batch_size: usize,
        hints: Option<&str>,
        write_row: &mut dyn FnMut(&mut QueryBuilder) -> Result<()>,
    ) -> Result<()> {
        let wrap = batch_size > 1;
        if wrap {
            self.write_batch_begin(builder);
        }
        for index in 0..batch_size {
            if index > 0 {
                builder.next_batch();
            }
            write_row(builder)?;
            self.write_hints(builder, hints, HintsPlacement::StatementEnd);
            if wrap {
                self.write_batch_separator(builder);
            } else {
                self.write_end(builder);
            }
        }
        if wrap {
            self.write_batch_end(builder);
        }
        Ok(())
    }

    fn create_update(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        fields: &[Field],
        filter: Option<&QueryGroup>,
        primary: Option<&DbField>,
        identity: Option<&DbField>,
        hints: Option<&str>,
    ) -> Result<String> {
        guard_table_name(table)?;
        self.guard_hints(hints)?;
        crate::guard_field_names(fields)?;
        guard_primary(primary, fields)?;
        guard_identity(identity, fields)?;
        let updatable = fields
            .iter()
            .filter(|f| !is_named(f, primary) && !is_named(f, identity))
            .collect::<Vec<_>>();
        if updatable.is_empty() {
            return Err(StrataError::EmptyUpdatableFields(format!(
                "The list of updatable fields cannot be empty for `{table}`"
            ))
            .into());
        }
        let setting = self.db_setting();
        builder.clear().update();
        self.write_hints(builder, hints, HintsPlacement::AfterKeyword);
        builder
            .table_name_from(table, setting)
            .set()
            .fields_and_parameters_from(updatable, setting)
            .where_from(filter, "_", setting)?;
        Ok(self.finish_statement(builder, hints))
    }

    fn create_update_all(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        fields: &[Field],
        qualifiers: &[Field],
        batch_size: usize,
        primary: Option<&DbField>,
        identity: Option<&DbField>,
        hints: Option<&str>,
    ) -> Result<String> {
        guard_table_name(table)?;
        self.guard_hints(hints)?;
        guard_primary(primary, fields)?;
        guard_identity(identity, fields)?;
        self.validate_multiple_statement_execution(batch_size)?;
        guard_fields(table, fields)?;
        let qualifiers = if !qualifiers.is_empty() {
            guard_qualifiers(qualifiers, fields)?;
            qualifiers.to_vec()
        } else {
            match primary {
                Some(primary) if contains(fields, &primary.name) => vec![primary.as_field()],
                _ => {
                    return Err(StrataError::InvalidQualifiers(format!(
                        "There are no qualifier fields for `{table}`, the primary field must be present at the given fields `{}`",
                        join_names(fields)
                    ))
                    .into());
                }
            }
        };
        let updatable = fields
            .iter()
            .filter(|f| {
                !is_named(f, primary) && !is_named(f, identity) && !contains(&qualifiers, &f.name)
            })
            .collect::<Vec<_>>();
        if updatable.is_empty() {
            return Err(StrataError::EmptyUpdatableFields(format!(
                "The list of updatable fields cannot be empty for `{table}`"
            ))
            .into());
        }
        let setting = self.db_setting();
        builder.clear();
        self.write_batch(builder, batch_size, hints, &mut |builder: &mut QueryBuilder| {
            builder.update();
            self.write_hints(builder, hints, HintsPlacement::AfterKeyword);
            builder
                .table_name_from(table, setting)
                .set()
                .fields_and_parameters_from(updatable.iter().copied(), setting)
                .where_from_qualifiers(&qualifiers, setting);
            Ok(())
        })?;
        Ok(self.compiled(builder))
    }

    fn create_merge(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        fields: &[Field],
        qualifiers: &[Field],
        primary: Option<&DbField>,
        identity: Option<&DbField>,
        hints: Option<&str>,
    ) -> Result<String> {
        self.create_merge_all(builder, table, fields, qualifiers, 1, primary, identity, hints)
    }

    fn create_merge_all(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        fields: &[Field],
        qualifiers: &[Field],
        batch_size: usize,
        primary: Option<&DbField>,
        identity: Option<&DbField>,
        hints: Option<&str>,
    ) -> Result<String> {
        guard_table_name(table)?;
        self.guard_hints(hints)?;
        guard_primary(primary, fields)?;
        guard_identity(identity, fields)?;
        if batch_size == 0 {
            return Err(StrataError::out_of_range(
                "batch_size",
                "The batch size must be equals or greater than 1",
            ));
        }
        guard_fields(table, fields)?;
        let qualifiers = if !qualifiers.is_empty() {
            guard_qualifiers(qualifiers, fields)?;
            qualifiers.to_vec()
        } else {
            match primary {
                Some(primary) => vec![primary.as_field()],
                None => {
                    return Err(StrataError::PrimaryFieldNotFound(format!(
                        "The list of qualifiers is empty and no primary field is given for `{table}`"
                    ))
                    .into());
                }
            }
        };
        let updatable = fields
            .iter()
            .filter(|f| !contains(&qualifiers, &f.name))
            .cloned()
            .collect::<Vec<_>>();
        let insertable = insertable_fields(table, fields, identity)?;
        builder.clear();
        let merge = MergeParts {
            table,
            fields,
            qualifiers: &qualifiers,
            updatable: &updatable,
            insertable: &insertable,
            batch_size,
            hints,
        };
        if self.db_setting().is_use_upsert {
            self.write_upsert(builder, &merge);
        } else {
            self.write_merge(builder, &merge);
        }
        Ok(self.finish_statement(builder, hints))
    }

    /// `MERGE INTO <table> USING ( <rows> ) "_SOURCE" ON ( … ) WHEN MATCHED … WHEN NOT MATCHED …`
    fn write_merge(&self, builder: &mut QueryBuilder, merge: &MergeParts) {
        let setting = self.db_setting();
        let target = as_quoted(merge.table, true, false, setting);
        let source = as_quoted(SOURCE_ALIAS, true, true, setting);
        builder.merge();
        self.write_hints(builder, merge.hints, HintsPlacement::AfterKeyword);
        builder
            .into()
            .table_name_from(merge.table, setting)
            .using()
            .open_paren();
        for index in 0..merge.batch_size {
            if index > 0 {
                builder.next_batch().union_all();
            }
            self.write_merge_source_row(builder, merge.fields);
        }
        builder
            .close_paren()
            .write_text(source.as_str())
            .on()
            .open_paren()
            .join_qualifiers_from(merge.qualifiers, &target, &source, setting)
            .close_paren();
        if !merge.updatable.is_empty() {
            builder
                .when()
                .matched()
                .then()
                .update()
                .set()
                .fields_and_alias_fields_from(merge.updatable, &target, &source, setting);
        }
        builder
            .when()
            .not()
            .matched()
            .then()
            .insert()
            .open_paren()
            .fields_from(merge.insertable, setting)
            .close_paren()
            .values()
            .open_paren()
            .as_alias_fields_from(merge.insertable, &source, setting)
            .close_paren();
    }

    /// `INSERT INTO <table> ( … ) VALUES ( … ), … ON CONFLICT ( … ) DO UPDATE SET …`
    ///
    /// The qualifiers are always inserted, the identity included, otherwise the conflict on them
    /// could never be detected.
    fn write_upsert(&self, builder: &mut QueryBuilder, merge: &MergeParts) {
        let setting = self.db_setting();
        let columns = merge
            .fields
            .iter()
            .filter(|f| contains(merge.insertable, &f.name) || contains(merge.qualifiers, &f.name))
            .cloned()
            .collect::<Vec<_>>();
        let updatable = merge
            .updatable
            .iter()
            .filter(|f| contains(&columns, &f.name))
            .collect::<Vec<_>>();
        builder.insert();
        self.write_hints(builder, merge.hints, HintsPlacement::AfterKeyword);
        builder
            .into()
            .table_name_from(merge.table, setting)
            .open_paren()
            .fields_from(&columns, setting)
            .close_paren()
            .values();
        let mut rows = String::new();
        for index in 0..merge.batch_size {
            if index > 0 {
                builder.next_batch();
                rows.push_str(", ");
            }
            let index = builder.batch_index();
            rows.push_str("( ");
            separated_by(
                &mut rows,
                &columns,
                |out, v| out.push_str(&as_parameter(&v.name, index, setting)),
                ", ",
            );
            rows.push_str(" )");
        }
        builder
            .write_text(rows)
            .write_text("ON CONFLICT")
            .open_paren()
            .fields_from(merge.qualifiers, setting)
            .close_paren();
        if updatable.is_empty() {
            builder.write_text("DO NOTHING");
        } else {
            let mut assignments = String::new();
            separated_by(
                &mut assignments,
                updatable,
                |out, v| {
                    let field = v.as_field(setting);
                    out.push_str(&format!("{field} = EXCLUDED.{field}"));
                },
                ", ",
            );
            builder
                .write_text("DO UPDATE SET")
                .write_text(assignments);
        }
    }

    fn create_delete(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        filter: Option<&QueryGroup>,
        hints: Option<&str>,
    ) -> Result<String> {
        guard_table_name(table)?;
        self.guard_hints(hints)?;
        builder.clear();
        self.write_delete_row(builder, table, filter, hints)?;
        Ok(self.finish_statement(builder, hints))
    }

    /// `DELETE FROM <table> [WHERE …]` for the current row of the builder.
    fn write_delete_row(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        filter: Option<&QueryGroup>,
        hints: Option<&str>,
    ) -> Result<()> {
        let setting = self.db_setting();
        builder.delete();
        self.write_hints(builder, hints, HintsPlacement::AfterKeyword);
        builder
            .from()
            .table_name_from(table, setting)
            .where_from(filter, "", setting)?;
        Ok(())
    }

    /// Deletes every row, or only the rows whose `key` is one of `keys`.
    ///
    /// Key lists longer than `max_in_list_size` are split over several `IN` lists joined by `OR`,
    /// the parameters follow [`delete_all_filter`]. When the keys exceed `max_statement_parameters`
    /// they are spread over one statement per chunk, each chunk takes the next batch index.
    fn create_delete_all(
        &self,
        builder: &mut QueryBuilder,
        table: &str,
        keys: Option<(&Field, &[Value])>,
        hints: Option<&str>,
    ) -> Result<String> {
        match keys {
            None => self.create_delete(builder, table, None, hints),
            Some((key, values)) => {
                if values.is_empty() {
                    return Err(StrataError::invalid_argument(format!(
                        "The list of keys of `{}` cannot be empty, omit it to delete every row",
                        key.name
                    )));
                }
                let setting = self.db_setting();
                let limit = setting.max_statement_parameters;
                if limit == 0 || values.len() <= limit {
                    let filter = delete_all_filter(key, values, setting.max_in_list_size);
                    return self.create_delete(builder, table, Some(&filter), hints);
                }
                guard_table_name(table)?;
                self.guard_hints(hints)?;
                // One IN list per statement, the batch index alone then keeps the names unique
                let size = match setting.max_in_list_size {
                    0 => limit,
                    v => v.min(limit),
                };
                let mut chunks = values.chunks(size);
                let count = chunks.len();
                self.validate_multiple_statement_execution(count)?;
                builder.clear();
                self.write_batch(builder, count, hints, &mut |builder: &mut QueryBuilder| {
                    let Some(chunk) = chunks.next() else {
                        return Ok(());
                    };
                    let filter = delete_all_filter(key, chunk, size);
                    self.write_delete_row(builder, table, Some(&filter), hints)
                })?;
                Ok(self.compiled(builder))
            }
        }
    }

    fn create_truncate(&self, builder: &mut QueryBuilder, table: &str) -> Result<String> {
        guard_table_name(table)?;
        builder.clear();
        self.write_truncate(builder, table);
        self.write_end(builder);
        Ok(self.compiled(builder))
    }
}

/// Arguments of a merge after validation.
#[derive(Debug)]
pub struct MergeParts<'a> {
    pub table: &'a str,
    /// Every field, they make the source rows.
    pub fields: &'a [Field],
    pub qualifiers: &'a [Field],
    pub updatable: &'a [Field],
    pub insertable: &'a [Field],
    pub batch_size: usize,
    pub hints: Option<&'a str>,
}

fn guard_qualifiers(qualifiers: &[Field], fields: &[Field]) -> Result<()> {
    let missing = qualifiers
        .iter()
        .filter(|v| !contains(fields, &v.name))
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(StrataError::InvalidQualifiers(format!(
            "The qualifiers `{}` are not present at the given fields `{}`",
            join_names(missing),
            join_names(fields)
        ))
        .into());
    }
    Ok(())
}

fn insertable_fields(table: &str, fields: &[Field], identity: Option<&DbField>) -> Result<Vec<Field>> {
    let result = fields
        .iter()
        .filter(|f| !is_named(f, identity))
        .cloned()
        .collect::<Vec<_>>();
    if result.is_empty() {
        return Err(StrataError::invalid_argument(format!(
            "The list of insertable fields cannot be empty for `{table}`"
        )));
    }
    Ok(result)
}

/// ANSI flavoured builder: `LIMIT`/`OFFSET`, `RETURNING … AS "Result"`, `ON CONFLICT` upsert.
#[derive(Debug, Clone)]
pub struct GenericStatementBuilder {
    setting: DbSetting,
    convert_field_resolver:
        DbConvertFieldResolver<ClientTypeToDbTypeResolver, DbTypeToGenericStringNameResolver>,
}

impl GenericStatementBuilder {
    pub fn new() -> Self {
        Self::with_setting(DbSetting::default())
    }
    pub fn with_setting(setting: DbSetting) -> Self {
        Self {
            setting,
            convert_field_resolver: DbConvertFieldResolver::new(
                ClientTypeToDbTypeResolver,
                DbTypeToGenericStringNameResolver,
            ),
        }
    }
}

impl Default for GenericStatementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementBuilder for GenericStatementBuilder {
    fn as_dyn(&self) -> &dyn StatementBuilder {
        self
    }
    fn db_setting(&self) -> &DbSetting {
        &self.setting
    }
    fn convert_field_resolver(&self) -> &dyn ConvertFieldResolver {
        &self.convert_field_resolver
    }
    fn db_type_name_resolver(&self) -> &dyn DbTypeNameResolver {
        &DbTypeToGenericStringNameResolver
    }
}
