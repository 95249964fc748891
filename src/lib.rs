//! # hnsw-lite
//!
//! An embeddable in-memory index for approximate nearest neighbor search
//! over fixed-dimension `f32` vectors, built on a Hierarchical Navigable
//! Small World (HNSW) graph.
//!
//! ## Features
//!
//! - **Multilayer proximity graph** with probabilistic level assignment and
//!   a single best-first kernel shared by insertion and query
//! - **Bidirectional, degree-bounded edges**: at most `m` neighbors per node
//!   at layers >= 1 and `2 * m` at layer 0, pruned symmetrically
//! - **True Euclidean distances** in search results, plus cosine similarity
//!   as a vector utility
//! - **Seedable construction** for reproducible graphs in tests
//!
//! The crate is single-threaded and synchronous; wrap the index in a
//! reader/writer lock for concurrent use. There is no remove operation and
//! no persistence layer, though the data model derives `serde` traits so an
//! embedder can snapshot it.
//!
//! ## Example
//!
//! ```
//! use hnsw_lite::hnsw::{HnswConfig, HnswIndex};
//! use hnsw_lite::query::SearchRequest;
//! use hnsw_lite::vector::Vector;
//!
//! # fn main() -> hnsw_lite::error::Result<()> {
//! let mut index = HnswIndex::new(HnswConfig::default())?;
//! index.insert(Vector::new(1, &[0.0, 0.0]))?;
//! index.insert(Vector::new(2, &[1.0, 1.0]))?;
//!
//! let request = SearchRequest::new(Vector::new(0, &[0.2, 0.1]), 1)?;
//! let results = index.search(&request)?;
//! assert_eq!(results[0].id(), 1);
//! # Ok(())
//! # }
//! ```

/// Tuning constants: default degree target and level multiplier.
pub mod config;
/// Error enum and crate-wide `Result` alias.
pub mod error;
/// HNSW graph structure, insertion, search, and metric primitives.
pub mod hnsw;
/// Search request and result types.
pub mod query;
/// Vector record with metric operations.
pub mod vector;
