//! Scalar values, tuples, and composite keys.
//!
//! Equality, hashing, and ordering on `Scalar` are total so that keys can live
//! in both ordered and hashed indexes and so join equality is well defined for
//! reals (NaN equals NaN, `0.0` and `-0.0` are distinct).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::schema::DataType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Real(f64),
    Str(String),
}

/// A fixed-arity row, positionally aligned with its schema.
pub type Tuple = Vec<Scalar>;

impl Scalar {
    pub fn data_type(&self) -> DataType {
        match self {
            Scalar::Bool(_) => DataType::Boolean,
            Scalar::Int(_) => DataType::Integer,
            Scalar::Real(_) => DataType::Real,
            Scalar::Str(_) => DataType::Text,
        }
    }

    /// Variant rank used to order values of different domains.
    fn type_order(&self) -> u8 {
        match self {
            Scalar::Bool(_) => 0,
            Scalar::Int(_) => 1,
            Scalar::Real(_) => 2,
            Scalar::Str(_) => 3,
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scalar {}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        use Scalar::*;
        match (self, other) {
            (Bool(x), Bool(y)) => x.cmp(y),
            (Int(x), Int(y)) => x.cmp(y),
            (Real(x), Real(y)) => x.total_cmp(y),
            (Str(x), Str(y)) => x.cmp(y),
            // Mixed types: order by variant rank
            _ => self.type_order().cmp(&other.type_order()),
        }
    }
}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_order().hash(state);
        match self {
            Scalar::Bool(b) => b.hash(state),
            Scalar::Int(i) => i.hash(state),
            // total_cmp equality is bitwise equality, so hashing the bits agrees with Eq.
            Scalar::Real(f) => f.to_bits().hash(state),
            Scalar::Str(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Real(r) => write!(f, "{}", r),
            Scalar::Str(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v as i64)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Real(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

/// Composite primary-key value: a tuple projected onto the key attributes.
/// Ordered lexicographically in key-attribute order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub Vec<Scalar>);

impl Key {
    pub fn new(values: Vec<Scalar>) -> Self {
        Self(values)
    }

    /// Project `tuple` onto `positions`, copying the values.
    pub fn from_tuple(tuple: &[Scalar], positions: &[usize]) -> Self {
        Self(extract(tuple, positions))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}

macro_rules! single_key_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(v: $t) -> Self {
                    Key(vec![Scalar::from(v)])
                }
            }
        )*
    };
}

single_key_from!(bool, i64, i32, f64, &str, String);

impl From<Scalar> for Key {
    fn from(v: Scalar) -> Self {
        Key(vec![v])
    }
}

/// Fresh sub-tuple holding the values at `positions`, in that order.
pub fn extract(tuple: &[Scalar], positions: &[usize]) -> Tuple {
    positions.iter().map(|&p| tuple[p].clone()).collect()
}

/// Fresh tuple with `left`'s values followed by `right`'s.
pub fn concat(left: &[Scalar], right: &[Scalar]) -> Tuple {
    let mut out = Vec::with_capacity(left.len() + right.len());
    out.extend_from_slice(left);
    out.extend_from_slice(right);
    out
}

/// Build a tuple from heterogeneous literals: `tuple![1, "x", 2.5]`.
#[macro_export]
macro_rules! tuple {
    ($($v:expr),* $(,)?) => {
        vec![$($crate::types::Scalar::from($v)),*]
    };
}
