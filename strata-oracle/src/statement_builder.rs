use crate::{DbTypeToOracleStringNameResolver, OracleConvertFieldResolver, OracleDbSetting};
use strata_core::{
    ConvertFieldResolver, DbSetting, DbTypeNameResolver, Field, HintsPlacement, QueryBuilder,
    RESULT_PARAMETER, StatementBuilder, as_parameter, as_quoted,
};

/// Oracle flavor of the statement compiler.
///
/// Statements carry no terminator, batches become an anonymous PL/SQL block and limits use the
/// `FETCH` clause.
#[derive(Debug, Clone)]
pub struct OracleStatementBuilder {
    setting: DbSetting,
    convert_field_resolver: OracleConvertFieldResolver,
}

impl OracleStatementBuilder {
    pub fn new() -> Self {
        Self::with_setting(OracleDbSetting::new())
    }
    pub fn with_setting(setting: DbSetting) -> Self {
        Self {
            setting,
            convert_field_resolver: crate::oracle_convert_field_resolver(),
        }
    }
}

impl Default for OracleStatementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementBuilder for OracleStatementBuilder {
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
        &DbTypeToOracleStringNameResolver
    }

    fn hints_placement(&self) -> HintsPlacement {
        HintsPlacement::AfterKeyword
    }

    fn write_row_limit(&self, builder: &mut QueryBuilder, top: u64) {
        builder.write_text(format!("FETCH FIRST {top} ROWS ONLY"));
    }

    fn write_single_row_limit(&self, builder: &mut QueryBuilder) {
        builder.write_text("FETCH FIRST 1 ROW ONLY");
    }

    fn write_paging(&self, builder: &mut QueryBuilder, skip: u64, take: u64) {
        if skip == 0 {
            self.write_row_limit(builder, take);
        } else {
            builder.write_text(format!("OFFSET {skip} ROWS FETCH NEXT {take} ROWS ONLY"));
        }
    }

    fn write_end(&self, _builder: &mut QueryBuilder) {}

    fn write_batch_begin(&self, builder: &mut QueryBuilder) {
        builder.write_text("BEGIN");
    }

    fn write_batch_end(&self, builder: &mut QueryBuilder) {
        builder.write_text("END").end();
    }

    fn write_insert_return(&self, builder: &mut QueryBuilder, expression: &str) {
        let setting = self.db_setting();
        builder
            .returning()
            .write_text(expression)
            .into()
            .write_text(as_parameter(RESULT_PARAMETER, 0, setting));
    }

    fn write_merge_source_row(&self, builder: &mut QueryBuilder, fields: &[Field]) {
        let setting = self.db_setting();
        builder
            .select()
            .parameters_as_fields_from(fields, setting)
            .from()
            .write_text(as_quoted("DUAL", true, true, setting));
    }
}
