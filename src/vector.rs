//! Vector record: a caller-assigned id plus fixed-dimension coordinates.

use crate::error::{HnswError, Result};
use crate::hnsw::distance;
use serde::{Deserialize, Serialize};

/// An immutable vector with a caller-assigned id.
///
/// The constructor copies the coordinate slice, so later mutation of the
/// caller's buffer cannot reach the index. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    id: u64,
    data: Vec<f32>,
}

impl Vector {
    /// Create a vector from an id and a coordinate slice (copied).
    pub fn new(id: u64, data: &[f32]) -> Self {
        Self {
            id,
            data: data.to_vec(),
        }
    }

    /// Caller-assigned identifier.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Number of coordinates.
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Read-only view of the coordinates.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Vector) -> Result<f32> {
        self.check_dimension(other)?;
        Ok(distance::euclidean_distance(&self.data, &other.data))
    }

    /// Cosine similarity to `other` in `[-1, 1]`.
    ///
    /// Returns 0 when either vector has zero norm.
    pub fn cosine_similarity(&self, other: &Vector) -> Result<f32> {
        self.check_dimension(other)?;
        Ok(distance::cosine_similarity(&self.data, &other.data))
    }

    fn check_dimension(&self, other: &Vector) -> Result<()> {
        if self.data.len() != other.data.len() {
            return Err(HnswError::dimension_mismatch(
                self.data.len(),
                other.data.len(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let v = Vector::new(42, &[1.0, 2.0, 3.0]);
        assert_eq!(v.id(), 42);
        assert_eq!(v.dimension(), 3);
        assert_eq!(v.data(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_constructor_copies_input() {
        let mut buf = [0.0f32, 0.0];
        let a = Vector::new(1, &buf);
        let b = Vector::new(2, &[3.0, 4.0]);
        let before = a.distance(&b).unwrap();

        // Mutating the source buffer must not change the stored coordinates.
        buf[0] = 100.0;
        buf[1] = 100.0;
        let after = a.distance(&b).unwrap();
        assert_eq!(before, after);
        assert_eq!(a.data(), &[0.0, 0.0]);
    }

    #[test]
    fn test_distance() {
        let a = Vector::new(1, &[0.0, 0.0]);
        let b = Vector::new(2, &[3.0, 4.0]);
        let d = a.distance(&b).unwrap();
        assert!((d - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_cosine_similarity() {
        let a = Vector::new(1, &[1.0, 0.0]);
        let b = Vector::new(2, &[0.0, 1.0]);
        assert!(a.cosine_similarity(&b).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Vector::new(1, &[1.0, 2.0]);
        let b = Vector::new(2, &[1.0, 2.0, 3.0]);
        assert!(matches!(
            a.distance(&b),
            Err(HnswError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
        assert!(matches!(
            a.cosine_similarity(&b),
            Err(HnswError::DimensionMismatch { .. })
        ));
    }
}
