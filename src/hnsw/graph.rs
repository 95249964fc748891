//! HNSW graph state, configuration, and level generation.
//!
//! [`HnswConfig`] carries the tuning parameters (`m`, `m_max0`, level
//! multiplier). [`HnswIndex`] owns every [`Node`] through an id map and
//! tracks the entry point and the highest layer present.

use crate::config;
use crate::error::{HnswError, Result};
use crate::hnsw::node::Node;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tuning parameters for an [`HnswIndex`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HnswConfig {
    /// Target number of bidirectional links per node at layers >= 1.
    pub m: usize,
    /// Degree cap at layer 0, conventionally `2 * m`.
    pub m_max0: usize,
    /// Level-generation multiplier; larger values produce deeper hierarchies.
    pub level_multiplier: f64,
}

impl HnswConfig {
    /// Config with the given `m` and level multiplier; `m_max0` is `2 * m`.
    pub fn new(m: usize, level_multiplier: f64) -> Result<Self> {
        let cfg = Self {
            m,
            m_max0: m * 2,
            level_multiplier,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.m < config::HNSW_MIN_M {
            return Err(HnswError::invalid_argument(format!(
                "m must be at least {}, got {}",
                config::HNSW_MIN_M,
                self.m
            )));
        }
        if self.m_max0 < self.m {
            return Err(HnswError::invalid_argument(format!(
                "m_max0 ({}) must not be below m ({})",
                self.m_max0, self.m
            )));
        }
        if self.level_multiplier.is_nan() || self.level_multiplier <= 0.0 {
            return Err(HnswError::invalid_argument(format!(
                "level_multiplier must be positive, got {}",
                self.level_multiplier
            )));
        }
        Ok(())
    }
}

impl Default for HnswConfig {
    fn default() -> Self {
        Self {
            m: config::HNSW_DEFAULT_M,
            m_max0: config::HNSW_DEFAULT_M * 2,
            level_multiplier: config::HNSW_LEVEL_MULTIPLIER,
        }
    }
}

fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

/// In-memory multilayer proximity graph over caller-identified vectors.
///
/// The id map is the single ownership root: edges are stored as ids, never as
/// references, so the cyclic graph has no ownership cycles. The index is
/// single-threaded; callers wanting concurrent reads put it behind an
/// external reader/writer lock.
#[derive(Debug, Serialize, Deserialize)]
pub struct HnswIndex {
    pub(crate) config: HnswConfig,
    pub(crate) nodes: HashMap<u64, Node>,
    /// Id of the node at the top of the hierarchy; `None` iff the index is empty.
    pub(crate) entry_point: Option<u64>,
    /// Highest layer present; meaningful only while `entry_point` is `Some`.
    pub(crate) max_layer: usize,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

impl HnswIndex {
    /// Create an empty index. Fails if `config` does not validate.
    pub fn new(config: HnswConfig) -> Result<Self> {
        Self::with_rng(config, entropy_rng())
    }

    /// Create an empty index with a deterministic level sequence, for
    /// reproducible builds and tests.
    pub fn with_seed(config: HnswConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: HnswConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            nodes: HashMap::new(),
            entry_point: None,
            max_layer: 0,
            rng,
        })
    }

    /// Number of vectors in the index.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a vector with `id` has been inserted.
    pub fn contains(&self, id: u64) -> bool {
        self.nodes.contains_key(&id)
    }

    /// The node stored for `id`, if any.
    pub fn node(&self, id: u64) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn config(&self) -> &HnswConfig {
        &self.config
    }

    /// Id of the node at the current maximum layer; `None` when empty.
    pub fn entry_point(&self) -> Option<u64> {
        self.entry_point
    }

    /// Highest layer present. 0 when the index is empty.
    pub fn max_layer(&self) -> usize {
        self.max_layer
    }

    /// Dimension of the indexed vectors; `None` until the first insert.
    pub fn dimension(&self) -> Option<usize> {
        self.entry_point
            .map(|id| self.nodes[&id].vector().dimension())
    }

    /// Draw a level from the geometric distribution
    /// `Prob(level >= L) ~= exp(-L / multiplier)`.
    pub(crate) fn random_level(&mut self) -> usize {
        // gen() samples [0, 1); flip to (0, 1] so ln stays finite
        let u: f64 = 1.0 - self.rng.gen::<f64>();
        (-u.ln() * self.config.level_multiplier).floor() as usize
    }
}
