//! Equi-join and natural join.
//!
//! Matching pairs are emitted in nested-loop order: left rows in order, and
//! for each left row the matching right rows in order. The hash strategy
//! builds on the right input and probes with the left, which yields the same
//! order. Right-hand names that collide get the session's join suffix; the
//! rename is applied to the result schema only, never to the input.

use std::collections::{HashMap, HashSet};

use relalg_core::config::{JoinStrategy, DEFAULT_JOIN_SUFFIX};
use relalg_core::prelude::*;
use relalg_core::types::{concat, extract};

use crate::table::Table;
use crate::traits::{expect_inputs, input_label, traced, Operator};

/// `(i, j)` index pairs whose `left_cols` values equal the `right_cols` values.
/// Empty column lists match every pair.
fn matching_pairs(
    left: &[Tuple],
    left_cols: &[usize],
    right: &[Tuple],
    right_cols: &[usize],
    strategy: JoinStrategy,
) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    match strategy {
        JoinStrategy::NestedLoop => {
            for (i, l) in left.iter().enumerate() {
                for (j, r) in right.iter().enumerate() {
                    let equal = left_cols
                        .iter()
                        .zip(right_cols)
                        .all(|(&a, &b)| l[a] == r[b]);
                    if equal {
                        pairs.push((i, j));
                    }
                }
            }
        }
        JoinStrategy::Hash => {
            let mut build: HashMap<Key, Vec<usize>> = HashMap::new();
            for (j, r) in right.iter().enumerate() {
                build
                    .entry(Key::from_tuple(r, right_cols))
                    .or_default()
                    .push(j);
            }
            for (i, l) in left.iter().enumerate() {
                if let Some(js) = build.get(&Key::from_tuple(l, left_cols)) {
                    pairs.extend(js.iter().map(|&j| (i, j)));
                }
            }
        }
    }
    pairs
}

/// Join on `left_attributes[k] == right_attributes[k]` for every `k`.
#[derive(Debug, Clone)]
pub struct EquiJoin {
    pub left_attributes: Vec<String>,
    pub right_attributes: Vec<String>,
    /// Overrides the session's join suffix when set.
    pub suffix: Option<String>,
}

impl EquiJoin {
    pub fn new<S: AsRef<str>, T: AsRef<str>>(left: &[S], right: &[T]) -> Self {
        Self {
            left_attributes: left.iter().map(|a| a.as_ref().to_string()).collect(),
            right_attributes: right.iter().map(|a| a.as_ref().to_string()).collect(),
            suffix: None,
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    fn resolve(
        &self,
        left: &Schema,
        left_name: &str,
        right: &Schema,
        right_name: &str,
    ) -> Result<(Vec<usize>, Vec<usize>)> {
        if self.left_attributes.len() != self.right_attributes.len() {
            return Err(Error::JoinArity {
                left: self.left_attributes.len(),
                right: self.right_attributes.len(),
            });
        }
        let left_cols = left.resolve(&self.left_attributes, left_name)?;
        let right_cols = right.resolve(&self.right_attributes, right_name)?;
        Ok((left_cols, right_cols))
    }

    fn output_schema(&self, left: &Schema, right: &Schema, suffix: &str) -> Result<Schema> {
        if suffix.is_empty() {
            return Err(Error::Config("join suffix must not be empty".into()));
        }
        let mut taken: HashSet<String> = left.attributes().map(str::to_string).collect();
        let mut fields = left.fields.clone();
        for f in &right.fields {
            let mut name = f.name.clone();
            while taken.contains(&name) {
                name.push_str(suffix);
            }
            taken.insert(name.clone());
            fields.push(Field::new(name, f.data_type));
        }
        Schema::new(fields, left.key.clone())
    }
}

impl Operator for EquiJoin {
    fn name(&self) -> &'static str {
        "equi_join"
    }

    /// Planning has no session, so without an explicit suffix the default
    /// one is assumed.
    fn plan(&self, inputs: &[&Schema]) -> Result<Schema> {
        expect_inputs(self.name(), inputs, 2)?;
        let (left, right) = (inputs[0], inputs[1]);
        self.resolve(left, &input_label(0), right, &input_label(1))?;
        let suffix = self.suffix.as_deref().unwrap_or(DEFAULT_JOIN_SUFFIX);
        self.output_schema(left, right, suffix)
    }

    fn eval(&self, inputs: &[&Table]) -> Result<Table> {
        expect_inputs(self.name(), inputs, 2)?;
        let (left, right) = (inputs[0], inputs[1]);
        traced(self.name(), inputs, || {
            let (left_cols, right_cols) =
                self.resolve(left.schema(), left.name(), right.schema(), right.name())?;
            let config = left.session().config();
            let suffix = self.suffix.as_deref().unwrap_or(&config.join_suffix);
            let schema = self.output_schema(left.schema(), right.schema(), suffix)?;

            let rows = matching_pairs(
                left.tuples(),
                &left_cols,
                right.tuples(),
                &right_cols,
                config.join_strategy,
            )
            .into_iter()
            .map(|(i, j)| concat(&left.tuples()[i], &right.tuples()[j]))
            .collect();
            Ok(left.derive(schema, rows))
        })
    }
}

/// Equi-join on every attribute name the two schemas share, keeping one copy
/// of each shared column in its left-hand position. With no shared names this
/// is the cross product.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalJoin;

struct NaturalLayout {
    schema: Schema,
    left_cols: Vec<usize>,
    right_cols: Vec<usize>,
    /// Right-hand columns that survive into the result.
    right_keep: Vec<usize>,
}

impl NaturalJoin {
    fn layout(left: &Schema, right: &Schema) -> Result<NaturalLayout> {
        let mut left_cols = Vec::new();
        let mut right_cols = Vec::new();
        for (i, name) in left.attributes().enumerate() {
            if let Some(j) = right.index_of(name) {
                left_cols.push(i);
                right_cols.push(j);
            }
        }

        let right_keep: Vec<usize> = (0..right.arity())
            .filter(|j| !right_cols.contains(j))
            .collect();

        let mut fields = left.fields.clone();
        fields.extend(right_keep.iter().map(|&j| right.fields[j].clone()));
        let schema = Schema::new(fields, left.key.clone())?;

        Ok(NaturalLayout {
            schema,
            left_cols,
            right_cols,
            right_keep,
        })
    }
}

impl Operator for NaturalJoin {
    fn name(&self) -> &'static str {
        "natural_join"
    }

    fn plan(&self, inputs: &[&Schema]) -> Result<Schema> {
        expect_inputs(self.name(), inputs, 2)?;
        Ok(Self::layout(inputs[0], inputs[1])?.schema)
    }

    fn eval(&self, inputs: &[&Table]) -> Result<Table> {
        expect_inputs(self.name(), inputs, 2)?;
        let (left, right) = (inputs[0], inputs[1]);
        traced(self.name(), inputs, || {
            let layout = Self::layout(left.schema(), right.schema())?;
            let rows = matching_pairs(
                left.tuples(),
                &layout.left_cols,
                right.tuples(),
                &layout.right_cols,
                left.session().config().join_strategy,
            )
            .into_iter()
            .map(|(i, j)| {
                concat(
                    &left.tuples()[i],
                    &extract(&right.tuples()[j], &layout.right_keep),
                )
            })
            .collect();
            Ok(left.derive(layout.schema, rows))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use relalg_core::tuple;
    use std::sync::Arc;

    fn session(strategy: JoinStrategy) -> Arc<Session> {
        Session::new(EngineConfig {
            join_strategy: strategy,
            ..EngineConfig::default()
        })
        .unwrap()
    }

    fn table(s: &Arc<Session>, name: &str, attrs: &str, key: &str, rows: Vec<Tuple>) -> Table {
        let domains = vec!["Integer"; attrs.split_whitespace().count()].join(" ");
        let mut t = Table::from_spec(s, name, attrs, &domains, key).unwrap();
        for r in rows {
            t.insert(r).unwrap();
        }
        t
    }

    fn r_and_s(s: &Arc<Session>) -> (Table, Table) {
        let r = table(s, "r", "a b", "a", vec![tuple![1, 10], tuple![2, 20]]);
        let t = table(s, "s", "a c", "a", vec![tuple![2, 200], tuple![3, 300]]);
        (r, t)
    }

    const STRATEGIES: [JoinStrategy; 2] = [JoinStrategy::NestedLoop, JoinStrategy::Hash];

    #[test]
    fn natural_join_drops_shared_column() {
        for strategy in STRATEGIES {
            let s = session(strategy);
            let (r, t) = r_and_s(&s);
            let j = r.natural_join(&t).unwrap();
            assert_eq!(j.schema().attributes().collect::<Vec<_>>(), vec!["a", "b", "c"]);
            assert_eq!(j.tuples(), &[tuple![2, 20, 200]]);
            assert_eq!(j.schema().key, vec!["a"]);
        }
    }

    #[test]
    fn equi_join_renames_collision_without_touching_input() {
        let s = Session::shared();
        let (r, t) = r_and_s(&s);
        let j = r.equi_join(&["a"], &["a"], &t).unwrap();
        assert_eq!(
            j.schema().attributes().collect::<Vec<_>>(),
            vec!["a", "b", "a2", "c"]
        );
        assert_eq!(j.tuples(), &[tuple![2, 20, 2, 200]]);
        assert_eq!(t.schema().attributes().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn suffix_is_repeated_until_unique() {
        let s = Session::shared();
        let l = table(&s, "l", "a a2", "a", vec![tuple![1, 1]]);
        let r = table(&s, "r", "a", "a", vec![tuple![1]]);
        let j = l.equi_join(&["a"], &["a"], &r).unwrap();
        assert_eq!(
            j.schema().attributes().collect::<Vec<_>>(),
            vec!["a", "a2", "a22"]
        );

        let custom = EquiJoin::new(&["a"], &["a"]).with_suffix("_r").eval(&[&l, &r]).unwrap();
        assert_eq!(custom.schema().field(2).unwrap().name, "a_r");
    }

    #[test]
    fn nested_loop_order_is_preserved() {
        for strategy in STRATEGIES {
            let s = session(strategy);
            let l = table(&s, "l", "k v", "v", vec![tuple![1, 1], tuple![2, 2], tuple![1, 3]]);
            let r = table(&s, "r", "k w", "w", vec![tuple![1, 7], tuple![2, 8], tuple![1, 9]]);
            let j = l.equi_join(&["k"], &["k"], &r).unwrap();
            assert_eq!(
                j.tuples(),
                &[
                    tuple![1, 1, 1, 7],
                    tuple![1, 1, 1, 9],
                    tuple![2, 2, 2, 8],
                    tuple![1, 3, 1, 7],
                    tuple![1, 3, 1, 9],
                ]
            );
        }
    }

    #[test]
    fn disjoint_values_give_empty_result_with_full_schema() {
        let s = Session::shared();
        let l = table(&s, "l", "x", "x", vec![tuple![1], tuple![2]]);
        let r = table(&s, "r", "y", "y", vec![tuple![3], tuple![4]]);
        let j = l.equi_join(&["x"], &["y"], &r).unwrap();
        assert!(j.is_empty());
        assert_eq!(j.schema().arity(), 2);
    }

    #[test]
    fn natural_join_without_shared_names_is_cross_product() {
        for strategy in STRATEGIES {
            let s = session(strategy);
            let l = table(&s, "l", "x", "x", vec![tuple![1], tuple![2]]);
            let r = table(&s, "r", "y", "y", vec![tuple![3], tuple![4]]);
            let j = l.natural_join(&r).unwrap();
            assert_eq!(
                j.tuples(),
                &[tuple![1, 3], tuple![1, 4], tuple![2, 3], tuple![2, 4]]
            );
        }
    }

    #[test]
    fn natural_join_on_several_shared_names() {
        let s = Session::shared();
        let l = table(&s, "l", "a b c", "a", vec![tuple![1, 2, 3], tuple![1, 5, 6]]);
        let r = table(&s, "r", "d b a", "d", vec![tuple![9, 2, 1], tuple![8, 6, 1]]);
        let j = l.natural_join(&r).unwrap();
        assert_eq!(j.schema().attributes().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
        assert_eq!(j.tuples(), &[tuple![1, 2, 3, 9]]);
    }

    #[test]
    fn join_errors() {
        let s = Session::shared();
        let (r, t) = r_and_s(&s);
        assert_eq!(
            r.equi_join(&["a", "b"], &["a"], &t).unwrap_err(),
            Error::JoinArity { left: 2, right: 1 }
        );
        assert!(matches!(
            r.equi_join(&["a"], &["zzz"], &t),
            Err(Error::AttributeNotFound { ref table, .. }) if table == "s"
        ));
    }

    #[test]
    fn plan_matches_eval_schema() {
        let s = Session::shared();
        let (r, t) = r_and_s(&s);
        let op = EquiJoin::new(&["a"], &["a"]);
        let planned = op.plan(&[r.schema(), t.schema()]).unwrap();
        assert_eq!(&planned, op.eval(&[&r, &t]).unwrap().schema());
        let nat = NaturalJoin.plan(&[r.schema(), t.schema()]).unwrap();
        assert_eq!(&nat, r.natural_join(&t).unwrap().schema());
    }
}
