//! Point lookup on the primary key (`key = value`) through the index.

use relalg_core::prelude::*;

use crate::table::Table;
use crate::traits::{expect_inputs, traced, Operator};

#[derive(Debug, Clone)]
pub struct Select {
    pub key: Key,
}

impl Select {
    pub fn new(key: impl Into<Key>) -> Self {
        Self { key: key.into() }
    }
}

impl Operator for Select {
    fn name(&self) -> &'static str {
        "select"
    }

    fn plan(&self, inputs: &[&Schema]) -> Result<Schema> {
        expect_inputs(self.name(), inputs, 1)?;
        Ok(inputs[0].clone())
    }

    /// Zero or one row. Only the index is consulted, so a table whose index
    /// was never populated yields nothing regardless of its tuples.
    fn eval(&self, inputs: &[&Table]) -> Result<Table> {
        expect_inputs(self.name(), inputs, 1)?;
        let input = inputs[0];
        traced(self.name(), inputs, || {
            let rows = input.get(&self.key).cloned().into_iter().collect();
            Ok(input.derive(input.schema().clone(), rows))
        })
    }
}
