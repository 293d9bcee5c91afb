#![forbid(unsafe_code)]
//! relalg: a minimal in-memory relational algebra engine.
//!
//! Build a [`Session`], create base tables, `insert` rows, then compose
//! operators. Each operator returns a new table and leaves its inputs as they
//! were.
//!
//! ```
//! use relalg::{tuple, Session};
//!
//! let s = Session::shared();
//! let mut r = s.create_table_from_spec("r", "a b", "Integer Integer", "a").unwrap();
//! r.insert(tuple![1, 10]).unwrap();
//! r.insert(tuple![2, 20]).unwrap();
//! let mut t = s.create_table_from_spec("s", "a c", "Integer Integer", "a").unwrap();
//! t.insert(tuple![2, 200]).unwrap();
//!
//! let j = r.natural_join(&t).unwrap();
//! assert_eq!(j.tuples(), &[tuple![2, 20, 200]]);
//! ```

pub use relalg_core::prelude::*;
pub use relalg_core::{config, domain, hash, naming, schema, tuple, types};
pub use relalg_operators::{
    EquiJoin, InsertOutcome, Minus, NaturalJoin, Operator, PrimaryIndex, Project, Select,
    Session, Table, Union,
};
