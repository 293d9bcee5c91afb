#![forbid(unsafe_code)]
//! relalg-core: domain tags, scalars, schemas, configs, naming, and hashing.
//!
//! Pure data and no I/O. Tables and the algebra operators live in
//! `relalg-operators`.

pub mod config;
pub mod domain;
pub mod error;
pub mod hash;
pub mod naming;
pub mod prelude;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
