//! Relational table: schema, append-only tuple store, and primary index.
//!
//! Tables are immutable after construction except through [`Table::insert`].
//! Every algebra operator reads its inputs by shared reference and returns a
//! brand-new table named by the session's [`TableNamer`](relalg_core::naming::TableNamer).

use std::sync::Arc;

use relalg_core::config::{DuplicateKeyPolicy, TypeCheckMode};
use relalg_core::hash::{digest_rows, Hash256};
use relalg_core::prelude::*;

use crate::index::PrimaryIndex;
use crate::join::{EquiJoin, NaturalJoin};
use crate::project::Project;
use crate::select::Select;
use crate::set_ops::{Minus, Union};
use crate::session::Session;
use crate::trace;
use crate::traits::Operator;

/// What a successful insert did to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new key value was indexed.
    Inserted,
    /// The key value was already indexed; the entry now points at the new row.
    /// Only possible under `DuplicateKeyPolicy::Overwrite`.
    Replaced { previous_row: usize },
}

#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    /// Prefix for the names of tables derived from this one.
    base: String,
    schema: Schema,
    tuples: Vec<Tuple>,
    index: PrimaryIndex,
    key_cols: Vec<usize>,
    session: Arc<Session>,
}

impl Table {
    /// Empty table from a schema.
    pub fn new(session: &Arc<Session>, name: impl Into<String>, schema: Schema) -> Self {
        let name = name.into();
        trace::create_table(&name, &schema);
        Self {
            base: name.clone(),
            name,
            key_cols: schema.key_positions(),
            index: PrimaryIndex::new(session.config().index_kind),
            schema,
            tuples: Vec::new(),
            session: Arc::clone(session),
        }
    }

    /// Empty table from whitespace-delimited strings, e.g.
    /// `("movie", "title year", "String Integer", "title year")`. Domain names
    /// are resolved through the session's registry.
    pub fn from_spec(
        session: &Arc<Session>,
        name: impl Into<String>,
        attributes: &str,
        domains: &str,
        key: &str,
    ) -> Result<Self> {
        let attrs = split_names(attributes);
        let doms = session.registry().parse_list(domains)?;
        let schema = Schema::from_parts(attrs, doms, split_names(key))?;
        Ok(Self::new(session, name, schema))
    }

    /// Table pre-loaded with `tuples`. The index is rebuilt from the tuples only
    /// when the session's `index_derived_tables` is set.
    pub fn with_tuples(
        session: &Arc<Session>,
        name: impl Into<String>,
        schema: Schema,
        tuples: Vec<Tuple>,
    ) -> Result<Self> {
        let arity = schema.arity();
        if let Some(bad) = tuples.iter().find(|t| t.len() != arity) {
            return Err(Error::ArityMismatch {
                expected: arity,
                got: bad.len(),
            });
        }
        let mut table = Self::new(session, name, schema);
        table.tuples = tuples;
        table.index_loaded_rows();
        Ok(table)
    }

    /// Result table of an operator applied to `self`. The caller guarantees
    /// every tuple matches `schema`'s arity.
    pub(crate) fn derive(&self, schema: Schema, tuples: Vec<Tuple>) -> Self {
        let name = self.session.namer().derive(&self.base);
        let mut table = Self {
            name,
            base: self.base.clone(),
            key_cols: schema.key_positions(),
            index: PrimaryIndex::new(self.session.config().index_kind),
            schema,
            tuples,
            session: Arc::clone(&self.session),
        };
        table.index_loaded_rows();
        table
    }

    fn index_loaded_rows(&mut self) {
        if !self.session.config().index_derived_tables {
            return;
        }
        // Resolve duplicate key values the way `insert` would have: the first
        // row under `Reject`, the last row under `Overwrite`.
        let keep_last = self.session.config().duplicate_keys == DuplicateKeyPolicy::Overwrite;
        for (row, t) in self.tuples.iter().enumerate() {
            let key = self.key_of(t);
            if keep_last || !self.index.contains(&key) {
                self.index.insert(key, row);
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_name(&self) -> &str {
        &self.base
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Number of distinct key values in the primary index.
    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.index.contains(key)
    }

    /// Tuple indexed under `key`, if any.
    pub fn get(&self, key: &Key) -> Option<&Tuple> {
        self.index.get(key).and_then(|row| self.tuples.get(row))
    }

    /// Column position of `attribute`, or `None` when not present.
    pub fn column_index(&self, attribute: &str) -> Option<usize> {
        self.schema.index_of(attribute)
    }

    /// Column positions of `attributes`; fails on the first unknown name.
    pub fn resolve<S: AsRef<str>>(&self, attributes: &[S]) -> Result<Vec<usize>> {
        self.schema.resolve(attributes, &self.name)
    }

    /// Project `tuple` onto this table's key columns.
    pub fn key_of(&self, tuple: &[Scalar]) -> Key {
        Key::from_tuple(tuple, &self.key_cols)
    }

    /// Blake3 digest over domains and rows in order.
    pub fn content_digest(&self) -> Hash256 {
        let domains: Vec<DataType> = self.schema.domains().collect();
        digest_rows(&domains, self.tuples.iter().map(|t| t.as_slice()))
    }

    /// Append `tuple` and index it under its key value.
    ///
    /// Fails without touching the table on an arity or type mismatch, or on a
    /// duplicate key under `DuplicateKeyPolicy::Reject`.
    pub fn insert(&mut self, tuple: Tuple) -> Result<InsertOutcome> {
        match self.try_insert(tuple) {
            Ok((row, outcome)) => {
                let replaced = match outcome {
                    InsertOutcome::Replaced { previous_row } => Some(previous_row),
                    InsertOutcome::Inserted => None,
                };
                trace::insert_accepted(&self.name, row, replaced);
                Ok(outcome)
            }
            Err(e) => {
                trace::insert_rejected(&self.name, &e);
                Err(e)
            }
        }
    }

    fn try_insert(&mut self, tuple: Tuple) -> Result<(usize, InsertOutcome)> {
        self.type_check(&tuple)?;

        let key = self.key_of(&tuple);
        if self.index.contains(&key)
            && self.session.config().duplicate_keys == DuplicateKeyPolicy::Reject
        {
            return Err(Error::DuplicateKey {
                table: self.name.clone(),
                key: key.to_string(),
            });
        }

        let row = self.tuples.len();
        self.tuples.push(tuple);
        let outcome = match self.index.insert(key, row) {
            Some(previous_row) => InsertOutcome::Replaced { previous_row },
            None => InsertOutcome::Inserted,
        };
        Ok((row, outcome))
    }

    fn type_check(&self, tuple: &[Scalar]) -> Result<()> {
        let arity = self.schema.arity();
        if tuple.len() != arity {
            return Err(Error::ArityMismatch {
                expected: arity,
                got: tuple.len(),
            });
        }

        let baseline: Vec<DataType> = match self.session.config().type_check {
            TypeCheckMode::Declared => self.schema.domains().collect(),
            TypeCheckMode::FirstTuple => match self.tuples.first() {
                Some(first) => first.iter().map(Scalar::data_type).collect(),
                // The first insert sets the baseline.
                None => return Ok(()),
            },
        };

        for (position, (v, expected)) in tuple.iter().zip(baseline).enumerate() {
            if v.data_type() != expected {
                return Err(Error::TypeMismatch {
                    position,
                    expected: expected.to_string(),
                    got: v.data_type().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn project<S: AsRef<str>>(&self, attributes: &[S]) -> Result<Table> {
        Project::new(attributes).eval(&[self])
    }

    pub fn select(&self, key: impl Into<Key>) -> Result<Table> {
        Select::new(key).eval(&[self])
    }

    pub fn union(&self, other: &Table) -> Result<Table> {
        Union.eval(&[self, other])
    }

    pub fn minus(&self, other: &Table) -> Result<Table> {
        Minus.eval(&[self, other])
    }

    pub fn equi_join<S: AsRef<str>, T: AsRef<str>>(
        &self,
        left_attributes: &[S],
        right_attributes: &[T],
        right: &Table,
    ) -> Result<Table> {
        EquiJoin::new(left_attributes, right_attributes).eval(&[self, right])
    }

    pub fn natural_join(&self, right: &Table) -> Result<Table> {
        NaturalJoin.eval(&[self, right])
    }
}

fn split_names(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}
