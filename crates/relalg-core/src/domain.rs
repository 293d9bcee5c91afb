//! Domain registry: folds scalar type names into canonical [`DataType`] tags.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::schema::DataType;

const BUILTIN_ALIASES: &[(&str, DataType)] = &[
    ("integer", DataType::Integer),
    ("int", DataType::Integer),
    ("long", DataType::Integer),
    ("short", DataType::Integer),
    ("byte", DataType::Integer),
    ("bigint", DataType::Integer),
    ("double", DataType::Real),
    ("float", DataType::Real),
    ("real", DataType::Real),
    ("string", DataType::Text),
    ("character", DataType::Text),
    ("char", DataType::Text),
    ("text", DataType::Text),
    ("varchar", DataType::Text),
    ("boolean", DataType::Boolean),
    ("bool", DataType::Boolean),
];

/// Case-insensitive map from type name to domain tag.
#[derive(Debug, Clone)]
pub struct DomainRegistry {
    aliases: HashMap<String, DataType>,
}

impl Default for DomainRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainRegistry {
    /// Registry preloaded with the integer, real, text, and boolean families.
    pub fn new() -> Self {
        let aliases = BUILTIN_ALIASES
            .iter()
            .map(|(name, dt)| (name.to_string(), *dt))
            .collect();
        Self { aliases }
    }

    /// Add an alias. Re-registering the same alias to the same tag is a no-op.
    pub fn register(&mut self, name: &str, data_type: DataType) -> Result<()> {
        let name = name.to_ascii_lowercase();
        match self.aliases.get(&name) {
            Some(existing) if *existing != data_type => Err(Error::InvalidSchema(format!(
                "domain alias '{}' already maps to {}",
                name, existing
            ))),
            Some(_) => Ok(()),
            None => {
                self.aliases.insert(name, data_type);
                Ok(())
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Result<DataType> {
        self.aliases
            .get(&name.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| Error::UnknownDomain(name.to_string()))
    }

    /// Resolve a whitespace-delimited list such as `"Integer String Double"`.
    pub fn parse_list(&self, domains: &str) -> Result<Vec<DataType>> {
        domains.split_whitespace().map(|t| self.lookup(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_families() {
        let r = DomainRegistry::new();
        assert_eq!(
            r.parse_list("Integer Long Short Byte").unwrap(),
            vec![DataType::Integer; 4]
        );
        assert_eq!(r.lookup("Double").unwrap(), DataType::Real);
        assert_eq!(r.lookup("Float").unwrap(), DataType::Real);
        assert_eq!(r.lookup("Character").unwrap(), DataType::Text);
        assert_eq!(r.lookup("STRING").unwrap(), DataType::Text);
        assert_eq!(r.lookup("bool").unwrap(), DataType::Boolean);
    }

    #[test]
    fn unknown_domain_is_an_error() {
        let r = DomainRegistry::new();
        assert_eq!(
            r.parse_list("Integer Widget"),
            Err(Error::UnknownDomain("Widget".into()))
        );
    }

    #[test]
    fn register_rejects_conflicting_alias() {
        let mut r = DomainRegistry::new();
        r.register("Money", DataType::Real).unwrap();
        assert_eq!(r.lookup("money").unwrap(), DataType::Real);
        r.register("MONEY", DataType::Real).unwrap();
        assert!(r.register("money", DataType::Integer).is_err());
        assert!(r.register("Long", DataType::Text).is_err());
    }
}
