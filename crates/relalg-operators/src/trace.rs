//! Diagnostic hooks for DDL, DML, and algebra events.
//!
//! These are a side channel only; nothing reads them back. Without the
//! `tracing` feature every hook compiles to a no-op.

use relalg_core::error::Error;
use relalg_core::schema::Schema;

#[cfg(feature = "tracing")]
pub(crate) fn create_table(table: &str, schema: &Schema) {
    tracing::debug!(target: "relalg::ddl", %table, %schema, "create table");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn create_table(_table: &str, _schema: &Schema) {}

#[cfg(feature = "tracing")]
pub(crate) fn insert_accepted(table: &str, row: usize, replaced: Option<usize>) {
    match replaced {
        Some(prev) => tracing::debug!(
            target: "relalg::dml",
            %table,
            row,
            previous_row = prev,
            "insert replaced index entry"
        ),
        None => tracing::trace!(target: "relalg::dml", %table, row, "insert"),
    }
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn insert_accepted(_table: &str, _row: usize, _replaced: Option<usize>) {}

#[cfg(feature = "tracing")]
pub(crate) fn insert_rejected(table: &str, err: &Error) {
    tracing::debug!(target: "relalg::dml", %table, error = %err, "insert rejected");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn insert_rejected(_table: &str, _err: &Error) {}

#[cfg(feature = "tracing")]
pub(crate) fn operator(op: &str, inputs: &[&str], output: &str, rows: usize) {
    tracing::debug!(target: "relalg::ra", op, inputs = ?inputs, %output, rows, "operator");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn operator(_op: &str, _inputs: &[&str], _output: &str, _rows: usize) {}

#[cfg(feature = "tracing")]
pub(crate) fn operator_failed(op: &str, inputs: &[&str], err: &Error) {
    tracing::debug!(target: "relalg::ra", op, inputs = ?inputs, error = %err, "operator failed");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn operator_failed(_op: &str, _inputs: &[&str], _err: &Error) {}
