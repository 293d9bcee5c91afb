//! Stable content hashing for tuples and tables.

use blake3::Hasher;

use crate::schema::DataType;
use crate::types::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// Lowercase hex, 64 chars.
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

impl From<blake3::Hash> for Hash256 {
    fn from(h: blake3::Hash) -> Self {
        Self(*h.as_bytes())
    }
}

impl std::fmt::Display for Hash256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Feed one scalar into `hasher`, discriminant first so `Int(1)` and
/// `Real(1.0)` never collide by construction.
pub fn hash_scalar(scalar: &Scalar, hasher: &mut Hasher) {
    hasher.update(&[scalar.data_type() as u8]);
    match scalar {
        Scalar::Bool(b) => {
            hasher.update(&[*b as u8]);
        }
        Scalar::Int(i) => {
            hasher.update(&i.to_le_bytes());
        }
        Scalar::Real(f) => {
            hasher.update(&f.to_bits().to_le_bytes());
        }
        Scalar::Str(s) => {
            // Length prefix keeps ("ab","c") and ("a","bc") apart.
            hasher.update(&(s.len() as u64).to_le_bytes());
            hasher.update(s.as_bytes());
        }
    }
}

/// 64-bit fingerprint of a whole tuple, for bucketing before full comparison.
pub fn tuple_fingerprint(tuple: &[Scalar]) -> u64 {
    let mut hasher = Hasher::new();
    for v in tuple {
        hash_scalar(v, &mut hasher);
    }
    let hash = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(head)
}

/// Order-sensitive digest over domains and rows. Names are excluded, so two
/// tables with identical data under renamed attributes digest the same.
pub fn digest_rows<'a, I>(domains: &[DataType], rows: I) -> Hash256
where
    I: IntoIterator<Item = &'a [Scalar]>,
{
    let mut hasher = Hasher::new();
    hasher.update(&(domains.len() as u64).to_le_bytes());
    for d in domains {
        hasher.update(&[*d as u8]);
    }
    for row in rows {
        hasher.update(&[0xff]);
        for v in row {
            hash_scalar(v, &mut hasher);
        }
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuple;

    #[test]
    fn fingerprint_separates_types_and_boundaries() {
        assert_ne!(
            tuple_fingerprint(&tuple![1]),
            tuple_fingerprint(&tuple![1.0])
        );
        assert_ne!(
            tuple_fingerprint(&tuple!["ab", "c"]),
            tuple_fingerprint(&tuple!["a", "bc"])
        );
        assert_eq!(
            tuple_fingerprint(&tuple![1, "x"]),
            tuple_fingerprint(&tuple![1, "x"])
        );
    }

    #[test]
    fn digest_is_order_sensitive() {
        let a = tuple![1];
        let b = tuple![2];
        let d = [DataType::Integer];
        let ab = digest_rows(&d, [a.as_slice(), b.as_slice()]);
        let ba = digest_rows(&d, [b.as_slice(), a.as_slice()]);
        assert_ne!(ab, ba);
        assert_eq!(ab.to_hex().len(), 64);
    }

    #[test]
    fn hex_matches_blake3_rendering() {
        let raw = blake3::hash(b"relalg");
        let h = Hash256::from(raw);
        assert_eq!(h.to_hex(), raw.to_hex().as_str());
        assert_eq!(h.to_string(), h.to_hex());
    }
}
