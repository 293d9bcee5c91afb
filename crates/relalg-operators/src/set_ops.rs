//! Union and set difference over compatible tables.
//!
//! Compatibility means equal arity and equal domains position by position;
//! attribute names may differ. The result always carries the left schema.

use std::collections::HashMap;

use relalg_core::hash::tuple_fingerprint;
use relalg_core::prelude::*;

use crate::table::Table;
use crate::traits::{expect_inputs, input_label, traced, Operator};

fn check_compatible(
    left: &Schema,
    left_name: &str,
    right: &Schema,
    right_name: &str,
) -> Result<()> {
    left.check_compatible(right)
        .map_err(|reason| Error::SchemaMismatch {
            left: left_name.to_string(),
            right: right_name.to_string(),
            reason,
        })
}

fn plan_compatible(op: &str, inputs: &[&Schema]) -> Result<Schema> {
    expect_inputs(op, inputs, 2)?;
    check_compatible(inputs[0], &input_label(0), inputs[1], &input_label(1))?;
    Ok(inputs[0].clone())
}

/// Every left tuple, then every right tuple whose value on the left key
/// columns is not in the left index.
#[derive(Debug, Clone, Copy, Default)]
pub struct Union;

impl Operator for Union {
    fn name(&self) -> &'static str {
        "union"
    }

    fn plan(&self, inputs: &[&Schema]) -> Result<Schema> {
        plan_compatible(self.name(), inputs)
    }

    fn eval(&self, inputs: &[&Table]) -> Result<Table> {
        expect_inputs(self.name(), inputs, 2)?;
        let (left, right) = (inputs[0], inputs[1]);
        traced(self.name(), inputs, || {
            check_compatible(left.schema(), left.name(), right.schema(), right.name())?;

            let mut rows: Vec<Tuple> = Vec::with_capacity(left.len() + right.len());
            rows.extend(left.tuples().iter().cloned());
            for t in right.tuples() {
                // Same arity, so the left key positions are valid on the right.
                if !left.contains_key(&left.key_of(t)) {
                    rows.push(t.clone());
                }
            }
            Ok(left.derive(left.schema().clone(), rows))
        })
    }
}

/// Left tuples with no whole-tuple equal in the right table, in left order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Minus;

impl Operator for Minus {
    fn name(&self) -> &'static str {
        "minus"
    }

    fn plan(&self, inputs: &[&Schema]) -> Result<Schema> {
        plan_compatible(self.name(), inputs)
    }

    fn eval(&self, inputs: &[&Table]) -> Result<Table> {
        expect_inputs(self.name(), inputs, 2)?;
        let (left, right) = (inputs[0], inputs[1]);
        traced(self.name(), inputs, || {
            check_compatible(left.schema(), left.name(), right.schema(), right.name())?;

            // Bucket right tuples by fingerprint, then confirm by full equality.
            let mut buckets: HashMap<u64, Vec<&Tuple>> = HashMap::new();
            for t in right.tuples() {
                buckets.entry(tuple_fingerprint(t)).or_default().push(t);
            }

            let rows = left
                .tuples()
                .iter()
                .filter(|t| {
                    buckets
                        .get(&tuple_fingerprint(t))
                        .map_or(true, |cands| !cands.iter().any(|c| *c == *t))
                })
                .cloned()
                .collect();
            Ok(left.derive(left.schema().clone(), rows))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use relalg_core::tuple;
    use std::sync::Arc;

    fn ints(s: &Arc<Session>, name: &str, attrs: &str, rows: &[(i64, i64)]) -> Table {
        let key = attrs.split(' ').next().unwrap();
        let mut t = Table::from_spec(s, name, attrs, "Integer Integer", key).unwrap();
        for &(a, b) in rows {
            t.insert(tuple![a, b]).unwrap();
        }
        t
    }

    #[test]
    fn union_skips_right_rows_with_known_keys() {
        let s = Session::shared();
        let r = ints(&s, "r", "a b", &[(1, 10), (2, 20)]);
        let q = ints(&s, "q", "x y", &[(2, 99), (3, 30)]);
        let u = r.union(&q).unwrap();
        assert_eq!(u.tuples(), &[tuple![1, 10], tuple![2, 20], tuple![3, 30]]);
        assert_eq!(u.schema(), r.schema());
    }

    #[test]
    fn union_with_self_is_identity() {
        let s = Session::shared();
        let r = ints(&s, "r", "a b", &[(1, 10), (2, 20)]);
        assert_eq!(r.union(&r).unwrap().tuples(), r.tuples());
    }

    #[test]
    fn incompatible_tables_fail_without_mutation() {
        let s = Session::shared();
        let r = ints(&s, "r", "a b", &[(1, 10)]);
        let mut w = Table::from_spec(&s, "w", "a b", "Integer String", "a").unwrap();
        w.insert(tuple![1, "x"]).unwrap();
        let narrow = Table::from_spec(&s, "n", "a", "Integer", "a").unwrap();

        for other in [&w, &narrow] {
            assert!(matches!(r.union(other), Err(Error::SchemaMismatch { .. })));
            assert!(matches!(r.minus(other), Err(Error::SchemaMismatch { .. })));
        }
        assert_eq!(r.tuples(), &[tuple![1, 10]]);
        assert_eq!(w.tuples(), &[tuple![1, "x"]]);
        // No derived name was consumed by the failures.
        assert_eq!(s.namer().issued(), 0);
    }

    #[test]
    fn minus_uses_whole_tuple_equality() {
        let s = Session::shared();
        let r = ints(&s, "r", "a b", &[(1, 10), (2, 20), (3, 30)]);
        // Same key 2 but different value: not removed.
        let q = ints(&s, "q", "a b", &[(2, 21), (3, 30)]);
        let d = r.minus(&q).unwrap();
        assert_eq!(d.tuples(), &[tuple![1, 10], tuple![2, 20]]);
    }

    #[test]
    fn minus_self_is_empty() {
        let s = Session::shared();
        let r = ints(&s, "r", "a b", &[(1, 10), (2, 20)]);
        let d = r.minus(&r).unwrap();
        assert!(d.is_empty());
        assert_eq!(d.schema().arity(), 2);
    }

    #[test]
    fn plan_checks_compatibility() {
        let s = Session::shared();
        let r = ints(&s, "r", "a b", &[]);
        let n = Table::from_spec(&s, "n", "a", "Integer", "a").unwrap();
        assert!(Union.plan(&[r.schema(), r.schema()]).is_ok());
        let err = Minus.plan(&[r.schema(), n.schema()]).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { ref left, .. } if left == "input#0"));
        assert!(matches!(Union.eval(&[&r]), Err(Error::Plan(_))));
    }
}
