//! HNSW search: single-layer best-first kernel and multi-layer top-k query.
//!
//! The same kernel drives both insertion (candidate collection) and queries
//! (layer descent, then a widened layer-0 pass).

use crate::error::{HnswError, Result};
use crate::hnsw::distance::euclidean_distance;
use crate::hnsw::graph::HnswIndex;
use crate::query::{SearchRequest, SearchResult};
use ordered_float::OrderedFloat;
use std::collections::{BinaryHeap, HashSet};

/// Frontier entry: negated distance turns the max-heap into closest-first order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    neg_distance: OrderedFloat<f32>,
    id: u64,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.neg_distance.cmp(&other.neg_distance)
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Result-set entry: max-heap by distance, so the farthest pops on overflow.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResultEntry {
    distance: OrderedFloat<f32>,
    id: u64,
}

impl Ord for ResultEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.distance.cmp(&other.distance)
    }
}

impl PartialOrd for ResultEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Best-first exploration of a single layer.
///
/// Returns up to `ef` ids reachable from `entry_points` through layer-`layer`
/// edges, paired with their Euclidean distance to `query`, ascending.
/// `visited` is caller-owned scratch, cleared on entry; callers running the
/// kernel several times per operation reuse one allocation.
pub(crate) fn search_layer(
    index: &HnswIndex,
    query: &[f32],
    entry_points: &[u64],
    ef: usize,
    layer: usize,
    visited: &mut HashSet<u64>,
) -> Vec<(f32, u64)> {
    visited.clear();
    let mut candidates: BinaryHeap<Candidate> = BinaryHeap::new();
    let mut results: BinaryHeap<ResultEntry> = BinaryHeap::with_capacity(ef + 1);

    for &ep in entry_points {
        if visited.insert(ep) {
            let dist = euclidean_distance(query, index.nodes[&ep].vector().data());
            candidates.push(Candidate {
                neg_distance: OrderedFloat(-dist),
                id: ep,
            });
            results.push(ResultEntry {
                distance: OrderedFloat(dist),
                id: ep,
            });
            if results.len() > ef {
                results.pop();
            }
        }
    }
    // Largest distance currently held in the result set.
    let mut bound = results.peek().map_or(f32::MAX, |r| r.distance.0);

    while let Some(candidate) = candidates.pop() {
        let c_dist = -candidate.neg_distance.0;

        // The closest remaining candidate is farther than the worst kept
        // result: nothing reachable can improve the set.
        if c_dist > bound {
            break;
        }

        let node = &index.nodes[&candidate.id];
        for &neighbor in node.neighbors(layer) {
            if !visited.insert(neighbor) {
                continue;
            }
            let dist = euclidean_distance(query, index.nodes[&neighbor].vector().data());
            if results.len() < ef || dist < bound {
                candidates.push(Candidate {
                    neg_distance: OrderedFloat(-dist),
                    id: neighbor,
                });
                results.push(ResultEntry {
                    distance: OrderedFloat(dist),
                    id: neighbor,
                });
                if results.len() > ef {
                    results.pop();
                }
                bound = results.peek().map_or(f32::MAX, |r| r.distance.0);
            }
        }
    }

    results
        .into_sorted_vec()
        .into_iter()
        .map(|r| (r.distance.0, r.id))
        .collect()
}

impl HnswIndex {
    /// Return the `top_k` nearest neighbors of the request's query vector,
    /// closest first.
    ///
    /// An empty index yields an empty result for any query. Otherwise the
    /// query dimension must match the indexed vectors.
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        let Some(entry) = self.entry_point else {
            return Ok(Vec::new());
        };
        let query = request.query();
        if let Some(dim) = self.dimension() {
            if query.dimension() != dim {
                return Err(HnswError::dimension_mismatch(dim, query.dimension()));
            }
        }

        let k = request.top_k();
        tracing::trace!(k, "searching index");
        let mut visited = HashSet::new();

        // Greedy descent to layer 1, one nearest node per layer.
        let mut nearest = entry;
        for layer in (1..=self.max_layer).rev() {
            let found = search_layer(self, query.data(), &[nearest], 1, layer, &mut visited);
            if let Some(&(_, closest)) = found.first() {
                nearest = closest;
            }
        }

        // Widened pass at layer 0. The max(k, m) floor keeps recall
        // reasonable when k is small.
        let ef = k.max(self.config.m);
        let found = search_layer(self, query.data(), &[nearest], ef, 0, &mut visited);
        Ok(found
            .into_iter()
            .take(k)
            .map(|(distance, id)| SearchResult::new(id, distance))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hnsw::graph::HnswConfig;
    use crate::vector::Vector;

    fn corner_index(seed: u64) -> HnswIndex {
        let mut index =
            HnswIndex::with_seed(HnswConfig::new(16, 1.0 / 2f64.ln()).unwrap(), seed).unwrap();
        index.insert(Vector::new(1, &[0.0, 0.0])).unwrap();
        index.insert(Vector::new(2, &[1.0, 0.0])).unwrap();
        index.insert(Vector::new(3, &[0.0, 1.0])).unwrap();
        index.insert(Vector::new(4, &[1.0, 1.0])).unwrap();
        index
    }

    #[test]
    fn test_four_corner_lookup() {
        let index = corner_index(11);
        let request = SearchRequest::new(Vector::new(100, &[0.1, 0.1]), 2).unwrap();
        let results = index.search(&request).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id(), 1);
        assert!((results[0].distance() - 0.02f32.sqrt()).abs() < 1e-3);
        assert!(results[0].distance() <= results[1].distance());
    }

    #[test]
    fn test_empty_index_returns_empty() {
        let index = HnswIndex::new(HnswConfig::default()).unwrap();
        let request = SearchRequest::new(Vector::new(1, &[0.0, 0.0]), 5).unwrap();
        assert!(index.search(&request).unwrap().is_empty());
    }

    #[test]
    fn test_oversubscribed_k() {
        let mut index = HnswIndex::with_seed(HnswConfig::default(), 12).unwrap();
        index.insert(Vector::new(1, &[0.0, 0.0])).unwrap();
        index.insert(Vector::new(2, &[1.0, 1.0])).unwrap();

        let request = SearchRequest::new(Vector::new(9, &[0.5, 0.5]), 10).unwrap();
        let results = index.search(&request).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_single_vector_retrieval() {
        let mut index = HnswIndex::with_seed(HnswConfig::default(), 13).unwrap();
        index.insert(Vector::new(1, &[3.0, -2.0])).unwrap();

        let request = SearchRequest::new(Vector::new(9, &[100.0, 100.0]), 1).unwrap();
        let results = index.search(&request).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id(), 1);
    }

    #[test]
    fn test_results_sorted_with_distinct_ids() {
        let mut index = HnswIndex::with_seed(HnswConfig::default(), 14).unwrap();
        for i in 0..60u64 {
            let x = ((i * 13) % 40) as f32 / 4.0;
            let y = ((i * 29) % 40) as f32 / 4.0;
            index.insert(Vector::new(i, &[x, y])).unwrap();
        }

        let request = SearchRequest::new(Vector::new(999, &[5.0, 5.0]), 10).unwrap();
        let results = index.search(&request).unwrap();
        assert_eq!(results.len(), 10);

        let mut seen = HashSet::new();
        for pair in results.windows(2) {
            assert!(pair[0].distance() <= pair[1].distance());
        }
        for r in &results {
            assert!(seen.insert(r.id()), "duplicate id {} in results", r.id());
        }
    }

    #[test]
    fn test_query_dimension_mismatch() {
        let index = corner_index(15);
        let request = SearchRequest::new(Vector::new(9, &[0.1, 0.1, 0.1]), 1).unwrap();
        assert!(matches!(
            index.search(&request),
            Err(HnswError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_search_layer_respects_ef() {
        let index = corner_index(16);
        let mut visited = HashSet::new();
        let found = search_layer(&index, &[0.5, 0.5], &[1], 2, 0, &mut visited);
        assert!(found.len() <= 2);
        for pair in found.windows(2) {
            assert!(pair[0].0 <= pair[1].0);
        }
    }

    #[test]
    fn test_exact_match_is_first() {
        let index = corner_index(17);
        let request = SearchRequest::new(Vector::new(9, &[1.0, 1.0]), 1).unwrap();
        let results = index.search(&request).unwrap();
        assert_eq!(results[0].id(), 4);
        assert_eq!(results[0].distance(), 0.0);
    }
}
