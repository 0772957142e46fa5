use crate::{DbHelper, DbSetting, Dialect, Result, StatementBuilder, StrataError};
use std::{collections::BTreeMap, fmt, sync::Arc};

/// Everything a caller needs to compile statements for one dialect.
pub struct Provider {
    pub name: &'static str,
    pub db_setting: DbSetting,
    pub statement_builder: Arc<dyn StatementBuilder>,
    pub db_helper: Arc<dyn DbHelper>,
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("db_setting", &self.db_setting)
            .finish_non_exhaustive()
    }
}

/// Immutable lookup from dialect name to [`Provider`].
///
/// Built once at startup through [`ProviderRegistry::builder`], then shared (it is cheap to
/// clone). Names are matched case-insensitively.
#[derive(Debug, Default, Clone)]
pub struct ProviderRegistry {
    providers: Arc<BTreeMap<String, Arc<Provider>>>,
}

#[derive(Debug, Default)]
pub struct ProviderRegistryBuilder {
    providers: BTreeMap<String, Arc<Provider>>,
}

impl ProviderRegistry {
    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::default()
    }

    pub fn get(&self, name: &str) -> Result<Arc<Provider>> {
        self.providers
            .get(&name.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| {
                StrataError::invalid_argument(format!(
                    "No dialect is registered under the name `{name}`"
                ))
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(&name.to_ascii_lowercase())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.values().map(|v| v.name)
    }
}

impl ProviderRegistryBuilder {
    /// Adds `dialect`, a later registration under the same name replaces the earlier one.
    pub fn register<D: Dialect>(mut self, dialect: D) -> Self {
        let provider = Provider {
            name: D::NAME,
            db_setting: dialect.db_setting(),
            statement_builder: Arc::new(dialect.statement_builder()),
            db_helper: Arc::new(dialect.db_helper()),
        };
        if self
            .providers
            .insert(D::NAME.to_ascii_lowercase(), Arc::new(provider))
            .is_some()
        {
            log::warn!("The dialect `{}` was registered twice", D::NAME);
        }
        self
    }

    pub fn build(self) -> ProviderRegistry {
        ProviderRegistry {
            providers: Arc::new(self.providers),
        }
    }
}
