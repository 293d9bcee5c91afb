//! Convenient re-exports for downstream crates.

pub use crate::config::{
    DuplicateKeyPolicy, EngineConfig, IndexKind, JoinStrategy, NamingStrategy, TypeCheckMode,
};
pub use crate::domain::DomainRegistry;
pub use crate::error::{Error, Result};
pub use crate::hash::Hash256;
pub use crate::naming::TableNamer;
pub use crate::schema::{DataType, Field, Schema};
pub use crate::types::{Key, Scalar, Tuple};
