//! Projection onto a list of attributes (bag semantics, no deduplication).

use relalg_core::prelude::*;
use relalg_core::types::extract;

use crate::table::Table;
use crate::traits::{expect_inputs, input_label, traced, Operator};

#[derive(Debug, Clone)]
pub struct Project {
    pub attributes: Vec<String>,
}

impl Project {
    pub fn new<S: AsRef<str>>(attributes: &[S]) -> Self {
        Self {
            attributes: attributes.iter().map(|a| a.as_ref().to_string()).collect(),
        }
    }

    fn output_schema(&self, input: &Schema, owner: &str) -> Result<(Schema, Vec<usize>)> {
        let positions = input.resolve(&self.attributes, owner)?;
        let fields = positions.iter().map(|&p| input.fields[p].clone()).collect();

        // The input key survives only if every key attribute is kept;
        // otherwise all projected attributes together form the key.
        let keeps_key = input.key.iter().all(|k| self.attributes.contains(k));
        let key = if keeps_key {
            input.key.clone()
        } else {
            self.attributes.clone()
        };

        Ok((Schema::new(fields, key)?, positions))
    }
}

impl Operator for Project {
    fn name(&self) -> &'static str {
        "project"
    }

    fn plan(&self, inputs: &[&Schema]) -> Result<Schema> {
        expect_inputs(self.name(), inputs, 1)?;
        Ok(self.output_schema(inputs[0], &input_label(0))?.0)
    }

    fn eval(&self, inputs: &[&Table]) -> Result<Table> {
        expect_inputs(self.name(), inputs, 1)?;
        let input = inputs[0];
        traced(self.name(), inputs, || {
            let (schema, positions) = self.output_schema(input.schema(), input.name())?;
            let rows = input
                .tuples()
                .iter()
                .map(|t| extract(t, &positions))
                .collect();
            Ok(input.derive(schema, rows))
        })
    }
}
