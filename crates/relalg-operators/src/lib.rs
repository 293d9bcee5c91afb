#![forbid(unsafe_code)]
//! relalg-operators: tables, the primary index, and the algebra operators
//! (project/select/union/minus/equi-join/natural-join).
//!
//! Design intent:
//! - Single-threaded and synchronous; every operator runs to completion.
//! - Operators never mutate their inputs. Results are fresh tables whose
//!   tuples are copies, named through the caller's `Session`.

pub mod index;
pub mod join;
pub mod project;
pub mod select;
pub mod session;
pub mod set_ops;
pub mod table;
pub mod traits;

mod trace;

pub use index::PrimaryIndex;
pub use join::{EquiJoin, NaturalJoin};
pub use project::Project;
pub use select::Select;
pub use session::Session;
pub use set_ops::{Minus, Union};
pub use table::{InsertOutcome, Table};
pub use traits::Operator;
