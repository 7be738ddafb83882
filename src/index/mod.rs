//! In-memory flat vector index.
//!
//! Exact brute-force L2 nearest-neighbor search over embedding vectors.
//! Per-transcript chunk counts are small, so there is no approximate
//! structure here; every search scans all stored vectors.

use crate::error::{HarkError, Result};

/// One nearest-neighbor hit: the slot the vector was inserted at and its
/// Euclidean distance to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Insertion position of the matched vector (0..n-1).
    pub slot: usize,
    /// Euclidean distance to the query (smaller is closer).
    pub distance: f32,
}

/// Flat L2 nearest-neighbor index.
///
/// Vectors are keyed implicitly by insertion position, which must line up
/// 1:1 with the chunk sequence the vectors were computed from. The index
/// owns its vectors; they are never mutated after insertion.
#[derive(Debug)]
pub struct VectorIndex {
    dimensions: usize,
    vectors: Vec<Vec<f32>>,
}

impl VectorIndex {
    /// Create an empty index for vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            vectors: Vec::new(),
        }
    }

    /// Discard all stored vectors. Required before every rebuild so a stale
    /// generation never leaks into a new search.
    pub fn reset(&mut self) {
        self.vectors.clear();
    }

    /// Append vectors in order. Fails with a dimension mismatch if any
    /// vector does not match the index's dimensionality; nothing is inserted
    /// in that case.
    pub fn add_all(&mut self, vectors: Vec<Vec<f32>>) -> Result<()> {
        for vector in &vectors {
            if vector.len() != self.dimensions {
                return Err(HarkError::DimensionMismatch {
                    expected: self.dimensions,
                    actual: vector.len(),
                });
            }
        }
        self.vectors.extend(vectors);
        Ok(())
    }

    /// Return the `k` stored vectors closest to `query`, ascending by
    /// distance, ties broken by smaller slot. If fewer than `k` vectors are
    /// stored, all of them are returned; an empty index returns no hits.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.dimensions {
            return Err(HarkError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut hits: Vec<SearchHit> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(slot, vector)| SearchHit {
                slot,
                distance: euclidean_distance(query, vector),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.slot.cmp(&b.slot))
        });
        hits.truncate(k);

        Ok(hits)
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Dimensionality this index was created with.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Compute the Euclidean (L2) distance between two equal-length vectors.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> VectorIndex {
        let mut index = VectorIndex::new(3);
        index
            .add_all(vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
            ])
            .unwrap();
        index
    }

    #[test]
    fn test_euclidean_distance() {
        assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(euclidean_distance(&[1.0, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_add_all_grows_by_exactly_input_len() {
        let mut index = VectorIndex::new(2);
        assert!(index.is_empty());
        index.add_all(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_search_orders_by_distance() {
        let index = sample_index();
        let hits = index.search(&[0.9, 0.1, 0.0], 3).unwrap();
        assert_eq!(hits[0].slot, 0);
        assert!(hits[0].distance < hits[1].distance);
        assert!(hits[1].distance <= hits[2].distance);
    }

    #[test]
    fn test_search_ties_break_by_slot() {
        let mut index = VectorIndex::new(2);
        // Slots 0 and 1 are equidistant from the query.
        index
            .add_all(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![5.0, 5.0]])
            .unwrap();
        let hits = index.search(&[0.0, 0.0], 2).unwrap();
        assert_eq!(hits[0].slot, 0);
        assert_eq!(hits[1].slot, 1);
    }

    #[test]
    fn test_search_k_larger_than_index_returns_all() {
        let index = sample_index();
        let hits = index.search(&[0.0, 0.0, 0.0], 10).unwrap();
        assert_eq!(hits.len(), 3);
        let slots: Vec<usize> = hits.iter().map(|h| h.slot).collect();
        let mut deduped = slots.clone();
        deduped.dedup();
        assert_eq!(slots, deduped);
    }

    #[test]
    fn test_search_empty_index_returns_no_hits() {
        let index = VectorIndex::new(4);
        let hits = index.search(&[0.0; 4], 5).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_search_is_deterministic() {
        let index = sample_index();
        let first = index.search(&[0.2, 0.3, 0.4], 3).unwrap();
        let second = index.search(&[0.2, 0.3, 0.4], 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_dimension_mismatch_on_insert() {
        let mut index = VectorIndex::new(3);
        let err = index.add_all(vec![vec![1.0, 2.0]]).unwrap_err();
        assert!(matches!(
            err,
            HarkError::DimensionMismatch { expected: 3, actual: 2 }
        ));
        assert!(index.is_empty());
    }

    #[test]
    fn test_dimension_mismatch_on_query() {
        let index = sample_index();
        assert!(index.search(&[1.0, 2.0], 1).is_err());
    }

    #[test]
    fn test_reset_discards_all_vectors() {
        let mut index = sample_index();
        index.reset();
        assert!(index.is_empty());
        assert_eq!(index.dimensions(), 3);
    }
}
