//! Engine configuration that downstream crates can serialize/deserialize.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Suffix appended to colliding right-hand join attributes unless configured.
pub const DEFAULT_JOIN_SUFFIX: &str = "2";

/// Backing map for primary indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IndexKind {
    /// BTreeMap; key iteration in key order.
    #[default]
    Ordered,
    /// HashMap; point lookups only.
    Hashed,
}

/// What `insert` does when the key value is already indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicateKeyPolicy {
    /// Fail with `Error::DuplicateKey`; the table is unchanged.
    #[default]
    Reject,
    /// Append the tuple and repoint the index entry at it.
    Overwrite,
}

/// Which baseline `insert` type-checks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TypeCheckMode {
    /// The runtime types of the first stored tuple.
    #[default]
    FirstTuple,
    /// The schema's declared domains.
    Declared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoinStrategy {
    #[default]
    NestedLoop,
    /// Build on the right input, probe in left order. Emits the same row order
    /// as the nested loop.
    Hash,
}

/// How derived tables are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NamingStrategy {
    /// Base name followed by a session-wide counter.
    #[default]
    Counter,
    /// Base name followed by a random UUID.
    Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub index_kind: IndexKind,

    pub duplicate_keys: DuplicateKeyPolicy,

    /// Rebuild the index of tables constructed with pre-loaded tuples (every
    /// operator result). When off, only `insert` populates an index.
    pub index_derived_tables: bool,

    pub type_check: TypeCheckMode,

    pub join_strategy: JoinStrategy,

    /// Appended to right-hand join attributes whose names collide.
    pub join_suffix: String,

    pub naming: NamingStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            index_kind: IndexKind::Ordered,
            duplicate_keys: DuplicateKeyPolicy::Reject,
            index_derived_tables: true,
            type_check: TypeCheckMode::FirstTuple,
            join_strategy: JoinStrategy::NestedLoop,
            join_suffix: DEFAULT_JOIN_SUFFIX.to_string(),
            naming: NamingStrategy::Counter,
        }
    }
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `RELALG_INDEX_KIND`: `ordered` | `hashed`
    /// - `RELALG_DUPLICATE_KEYS`: `reject` | `overwrite`
    /// - `RELALG_INDEX_DERIVED_TABLES`: `true` | `false`
    /// - `RELALG_TYPE_CHECK`: `first-tuple` | `declared`
    /// - `RELALG_JOIN_STRATEGY`: `nested-loop` | `hash`
    /// - `RELALG_JOIN_SUFFIX`: any non-empty string
    /// - `RELALG_NAMING`: `counter` | `uuid`
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from an arbitrary source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("RELALG_INDEX_KIND").and_then(|s| s.parse().ok()) {
            cfg.index_kind = v;
        }

        if let Some(v) = lookup("RELALG_DUPLICATE_KEYS").and_then(|s| s.parse().ok()) {
            cfg.duplicate_keys = v;
        }

        if let Some(v) = lookup("RELALG_INDEX_DERIVED_TABLES").and_then(|s| s.parse().ok()) {
            cfg.index_derived_tables = v;
        }

        if let Some(v) = lookup("RELALG_TYPE_CHECK").and_then(|s| s.parse().ok()) {
            cfg.type_check = v;
        }

        if let Some(v) = lookup("RELALG_JOIN_STRATEGY").and_then(|s| s.parse().ok()) {
            cfg.join_strategy = v;
        }

        if let Some(s) = lookup("RELALG_JOIN_SUFFIX") {
            if !s.is_empty() {
                cfg.join_suffix = s;
            }
        }

        if let Some(v) = lookup("RELALG_NAMING").and_then(|s| s.parse().ok()) {
            cfg.naming = v;
        }

        cfg
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.join_suffix.is_empty() {
            return Err(Error::Config("join_suffix must not be empty".into()));
        }
        Ok(())
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace(['_', ' '], "-")
}

macro_rules! impl_from_str {
    ($ty:ident { $($text:literal => $variant:ident),* $(,)? }) => {
        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match normalize(s).as_str() {
                    $($text => Ok($ty::$variant),)*
                    other => Err(Error::Config(format!(
                        "unknown {} '{}'",
                        stringify!($ty),
                        other
                    ))),
                }
            }
        }
    };
}

impl_from_str!(IndexKind { "ordered" => Ordered, "btree" => Ordered, "hashed" => Hashed, "hash" => Hashed });
impl_from_str!(DuplicateKeyPolicy { "reject" => Reject, "overwrite" => Overwrite });
impl_from_str!(TypeCheckMode { "first-tuple" => FirstTuple, "declared" => Declared });
impl_from_str!(JoinStrategy { "nested-loop" => NestedLoop, "hash" => Hash });
impl_from_str!(NamingStrategy { "counter" => Counter, "uuid" => Uuid });
