//! Tuning constants for the HNSW index.
//!
//! Runtime overrides go through [`crate::hnsw::HnswConfig`]; these are the
//! compile-time defaults it is wired to.

/// Default number of bidirectional links per node at layers >= 1.
///
/// Higher values improve recall but increase memory and build time.
/// Typical range: 8-64.
pub const HNSW_DEFAULT_M: usize = 16;

/// Smallest accepted `m`.
///
/// Below 2 the graph degenerates into chains that greedy search cannot
/// navigate.
pub const HNSW_MIN_M: usize = 2;

/// Default level-generation multiplier, 1/ln 2.
///
/// New nodes are assigned level `floor(-ln(u) * multiplier)`, so
/// Prob(level >= L) is roughly `exp(-L / multiplier)`. Larger values produce
/// deeper hierarchies.
pub const HNSW_LEVEL_MULTIPLIER: f64 = 1.442_695_040_888_963_4;
