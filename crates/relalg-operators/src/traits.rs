//! Operator trait + common interfaces.
//!
//! `plan` derives the output schema from input schemas alone, so a driver can
//! validate a composition before any data flows. `eval` reads its inputs by
//! shared reference and returns a fresh table; inputs are never mutated and a
//! failing call produces no output.

use relalg_core::prelude::{Error, Result, Schema};

use crate::table::Table;
use crate::trace;

pub trait Operator {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// Output schema for the given input schemas.
    fn plan(&self, inputs: &[&Schema]) -> Result<Schema>;

    /// Evaluate over concrete tables. Unary operators take one input, binary
    /// operators take `[left, right]`.
    fn eval(&self, inputs: &[&Table]) -> Result<Table>;
}

pub(crate) fn expect_inputs<T>(op: &str, inputs: &[T], n: usize) -> Result<()> {
    if inputs.len() != n {
        return Err(Error::Plan(format!(
            "{} expects {} input(s), got {}",
            op,
            n,
            inputs.len()
        )));
    }
    Ok(())
}

/// Placeholder owner name used in `plan` errors, where only schemas are known.
pub(crate) fn input_label(i: usize) -> String {
    format!("input#{}", i)
}

/// Run `f` and emit the operator diagnostic for its outcome.
pub(crate) fn traced<F>(op: &'static str, inputs: &[&Table], f: F) -> Result<Table>
where
    F: FnOnce() -> Result<Table>,
{
    let names: Vec<&str> = inputs.iter().map(|t| t.name()).collect();
    let out = f();
    match &out {
        Ok(t) => trace::operator(op, &names, t.name(), t.len()),
        Err(e) => trace::operator_failed(op, &names, e),
    }
    out
}
