//! Search request and result types.

use crate::error::{HnswError, Result};
use crate::vector::Vector;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Depth sentinel meaning "no traversal limit".
pub const UNBOUNDED_SEARCH_DEPTH: usize = usize::MAX;

/// A validated query: vector, result count, and a traversal depth bound.
///
/// `max_search_depth` is validated and carried on the request but the search
/// loop does not currently consult it.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    query: Vector,
    top_k: usize,
    max_search_depth: usize,
}

impl SearchRequest {
    /// Request the `top_k` nearest neighbors of `query`, unbounded depth.
    pub fn new(query: Vector, top_k: usize) -> Result<Self> {
        Self::with_depth(query, top_k, UNBOUNDED_SEARCH_DEPTH)
    }

    /// Request with an explicit depth bound.
    pub fn with_depth(query: Vector, top_k: usize, max_search_depth: usize) -> Result<Self> {
        if top_k == 0 {
            return Err(HnswError::invalid_argument("top_k must be greater than 0"));
        }
        if max_search_depth == 0 {
            return Err(HnswError::invalid_argument(
                "max_search_depth must be greater than 0",
            ));
        }
        Ok(Self {
            query,
            top_k,
            max_search_depth,
        })
    }

    pub fn query(&self) -> &Vector {
        &self.query
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn max_search_depth(&self) -> usize {
        self.max_search_depth
    }
}

/// One search hit: vector id and true Euclidean distance to the query.
///
/// Ordered ascending by distance, with the id breaking ties so the order is
/// total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    id: u64,
    distance: f32,
}

impl SearchResult {
    pub fn new(id: u64, distance: f32) -> Self {
        Self { id, distance }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

impl Eq for SearchResult {}

impl Ord for SearchResult {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.distance)
            .cmp(&OrderedFloat(other.distance))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for SearchResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> Vector {
        Vector::new(1, &[1.0, 2.0])
    }

    #[test]
    fn test_request_defaults_to_unbounded_depth() {
        let req = SearchRequest::new(query(), 5).unwrap();
        assert_eq!(req.top_k(), 5);
        assert_eq!(req.max_search_depth(), UNBOUNDED_SEARCH_DEPTH);
        assert_eq!(req.query().id(), 1);
    }

    #[test]
    fn test_request_rejects_zero_top_k() {
        assert!(matches!(
            SearchRequest::new(query(), 0),
            Err(HnswError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_request_rejects_zero_depth() {
        assert!(matches!(
            SearchRequest::with_depth(query(), 3, 0),
            Err(HnswError::InvalidArgument(_))
        ));
        assert!(SearchRequest::with_depth(query(), 3, 1).is_ok());
    }

    #[test]
    fn test_request_debug_rendering() {
        let req = SearchRequest::with_depth(query(), 3, 7).unwrap();
        let rendered = format!("{req:?}");
        assert!(rendered.contains("top_k: 3"));
        assert!(rendered.contains("max_search_depth: 7"));
    }

    #[test]
    fn test_results_order_by_distance() {
        let near = SearchResult::new(2, 0.5);
        let far = SearchResult::new(1, 1.5);
        assert!(near < far);

        let mut results = vec![far, near];
        results.sort();
        assert_eq!(results[0].id(), 2);
    }

    #[test]
    fn test_result_ties_break_by_id() {
        let a = SearchResult::new(1, 1.0);
        let b = SearchResult::new(2, 1.0);
        assert!(a < b);
    }
}
