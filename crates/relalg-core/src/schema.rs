//! Logical schema types. Pure data; tuples live in `types.rs`.
//!
//! A schema is an ordered list of attributes, each carrying a domain tag, plus
//! a primary key naming an ordered subset of those attributes.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Canonical domain tag. Aliases such as `Long` or `Character` are folded into
/// one of these by the [`DomainRegistry`](crate::domain::DomainRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Integer,
    Real,
    Text,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataType::Boolean => "Boolean",
            DataType::Integer => "Integer",
            DataType::Real => "Real",
            DataType::Text => "Text",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
    pub key: Vec<String>,
}

impl Schema {
    /// Build a schema, checking that attribute names are distinct and that the
    /// key is a non-empty subset of them.
    pub fn new(fields: Vec<Field>, key: Vec<String>) -> Result<Self> {
        if fields.is_empty() {
            return Err(Error::InvalidSchema("schema has no attributes".into()));
        }

        let mut seen = HashSet::with_capacity(fields.len());
        for f in &fields {
            if !seen.insert(f.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate attribute '{}'",
                    f.name
                )));
            }
        }

        if key.is_empty() {
            return Err(Error::InvalidSchema("primary key is empty".into()));
        }
        let mut key_seen = HashSet::with_capacity(key.len());
        for k in &key {
            if !seen.contains(k.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "key attribute '{}' is not a schema attribute",
                    k
                )));
            }
            if !key_seen.insert(k.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "key attribute '{}' listed twice",
                    k
                )));
            }
        }

        Ok(Self { fields, key })
    }

    /// Build a schema from parallel attribute/domain lists.
    pub fn from_parts(
        attributes: Vec<String>,
        domains: Vec<DataType>,
        key: Vec<String>,
    ) -> Result<Self> {
        if attributes.len() != domains.len() {
            return Err(Error::InvalidSchema(format!(
                "{} attributes but {} domains",
                attributes.len(),
                domains.len()
            )));
        }
        let fields = attributes
            .into_iter()
            .zip(domains)
            .map(|(name, dt)| Field::new(name, dt))
            .collect();
        Self::new(fields, key)
    }

    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, idx: usize) -> Option<&Field> {
        self.fields.get(idx)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn domains(&self) -> impl Iterator<Item = DataType> + '_ {
        self.fields.iter().map(|f| f.data_type)
    }

    /// Column position of `name`, or `None` when the schema lacks it.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Resolve every name to its column position. `owner` names the table in
    /// the error when a name is missing.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S], owner: &str) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|n| {
                let n = n.as_ref();
                self.index_of(n).ok_or_else(|| Error::AttributeNotFound {
                    table: owner.to_string(),
                    attribute: n.to_string(),
                })
            })
            .collect()
    }

    /// Positions of the key attributes, in key order.
    pub fn key_positions(&self) -> Vec<usize> {
        // Validated in `new`, so every key attribute resolves.
        self.key.iter().filter_map(|k| self.index_of(k)).collect()
    }

    /// Union compatibility: same arity and the same domain at every position.
    /// Attribute names are not compared.
    pub fn check_compatible(&self, other: &Schema) -> std::result::Result<(), String> {
        if self.arity() != other.arity() {
            return Err(format!(
                "tables have different arity ({} vs {})",
                self.arity(),
                other.arity()
            ));
        }
        for (j, (a, b)) in self.domains().zip(other.domains()).enumerate() {
            if a != b {
                return Err(format!("tables disagree on domain {} ({} vs {})", j, a, b));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", field.name, field.data_type)?;
        }
        write!(f, ") key({})", self.key.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab() -> Schema {
        Schema::from_parts(
            vec!["a".into(), "b".into()],
            vec![DataType::Integer, DataType::Text],
            vec!["a".into()],
        )
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_attributes_and_bad_keys() {
        let dup = Schema::from_parts(
            vec!["a".into(), "a".into()],
            vec![DataType::Integer, DataType::Integer],
            vec!["a".into()],
        );
        assert!(matches!(dup, Err(Error::InvalidSchema(_))));

        let bad_key = Schema::from_parts(
            vec!["a".into()],
            vec![DataType::Integer],
            vec!["z".into()],
        );
        assert!(matches!(bad_key, Err(Error::InvalidSchema(_))));

        let no_key = Schema::from_parts(vec!["a".into()], vec![DataType::Integer], vec![]);
        assert!(matches!(no_key, Err(Error::InvalidSchema(_))));

        let uneven = Schema::from_parts(vec!["a".into()], vec![], vec!["a".into()]);
        assert!(matches!(uneven, Err(Error::InvalidSchema(_))));
    }

    #[test]
    fn resolve_fails_on_missing_name() {
        let s = ab();
        assert_eq!(s.resolve(&["b", "a"], "t").unwrap(), vec![1, 0]);
        let err = s.resolve(&["a", "nope"], "t").unwrap_err();
        assert_eq!(
            err,
            Error::AttributeNotFound {
                table: "t".into(),
                attribute: "nope".into()
            }
        );
    }

    #[test]
    fn compatibility_ignores_names() {
        let s = ab();
        let renamed = Schema::from_parts(
            vec!["x".into(), "y".into()],
            vec![DataType::Integer, DataType::Text],
            vec!["y".into()],
        )
        .unwrap();
        assert!(s.check_compatible(&renamed).is_ok());

        let swapped = Schema::from_parts(
            vec!["a".into(), "b".into()],
            vec![DataType::Text, DataType::Integer],
            vec!["a".into()],
        )
        .unwrap();
        assert!(s.check_compatible(&swapped).is_err());
    }

    #[test]
    fn display_lists_fields_and_key() {
        assert_eq!(ab().to_string(), "(a:Integer, b:Text) key(a)");
    }
}
