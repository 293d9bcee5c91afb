//! Caller-owned engine context.
//!
//! A `Session` bundles the configuration, the domain registry, and the name
//! generator. Every table holds an `Arc` to the session that created it, and
//! operator results inherit it, so derived names are unique within a session
//! without any process-wide state.

use std::sync::Arc;

use relalg_core::prelude::*;

use crate::table::Table;

#[derive(Debug)]
pub struct Session {
    config: EngineConfig,
    registry: DomainRegistry,
    namer: TableNamer,
}

impl Session {
    pub fn new(config: EngineConfig) -> Result<Arc<Self>> {
        Self::with_registry(config, DomainRegistry::new())
    }

    /// Session whose string-based constructors resolve domains through `registry`.
    pub fn with_registry(config: EngineConfig, registry: DomainRegistry) -> Result<Arc<Self>> {
        config.validate()?;
        let namer = TableNamer::new(config.naming);
        Ok(Arc::new(Self {
            config,
            registry,
            namer,
        }))
    }

    /// Session with the default configuration.
    pub fn shared() -> Arc<Self> {
        let config = EngineConfig::default();
        Arc::new(Self {
            namer: TableNamer::new(config.naming),
            config,
            registry: DomainRegistry::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &DomainRegistry {
        &self.registry
    }

    pub fn namer(&self) -> &TableNamer {
        &self.namer
    }

    /// Empty table from a structured schema.
    pub fn create_table(self: &Arc<Self>, name: impl Into<String>, schema: Schema) -> Table {
        Table::new(self, name, schema)
    }

    /// Empty table from whitespace-delimited attribute, domain, and key lists.
    pub fn create_table_from_spec(
        self: &Arc<Self>,
        name: impl Into<String>,
        attributes: &str,
        domains: &str,
        key: &str,
    ) -> Result<Table> {
        Table::from_spec(self, name, attributes, domains, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_config() {
        let cfg = EngineConfig {
            join_suffix: String::new(),
            ..EngineConfig::default()
        };
        assert!(matches!(Session::new(cfg), Err(Error::Config(_))));
    }

    #[test]
    fn namer_follows_config() {
        let cfg = EngineConfig {
            naming: NamingStrategy::Uuid,
            ..EngineConfig::default()
        };
        let s = Session::new(cfg).unwrap();
        assert_eq!(s.namer().strategy(), NamingStrategy::Uuid);
    }

    #[test]
    fn custom_registry_is_used_by_spec_constructor() {
        let mut reg = DomainRegistry::new();
        reg.register("Money", DataType::Real).unwrap();
        let s = Session::with_registry(EngineConfig::default(), reg).unwrap();
        let t = s
            .create_table_from_spec("acct", "id balance", "Integer Money", "id")
            .unwrap();
        assert_eq!(
            t.schema().domains().collect::<Vec<_>>(),
            vec![DataType::Integer, DataType::Real]
        );
    }
}
