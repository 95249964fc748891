//! HNSW insertion: level assignment, zoom-in descent, per-layer linking, and
//! degree-bounded pruning.
//!
//! Edges are undirected: every add and every prune updates both endpoints,
//! so `A in neighbors(B, l)` always implies `B in neighbors(A, l)`.

use crate::error::{HnswError, Result};
use crate::hnsw::distance::euclidean_distance;
use crate::hnsw::graph::HnswIndex;
use crate::hnsw::node::Node;
use crate::hnsw::search::search_layer;
use crate::vector::Vector;
use std::cmp::Ordering;
use std::collections::HashSet;

impl HnswIndex {
    /// Insert `vector` into the graph.
    ///
    /// Fails on a duplicate id or a dimension mismatch with the vectors
    /// already indexed; both checks run before any state changes.
    pub fn insert(&mut self, vector: Vector) -> Result<()> {
        let id = vector.id();
        if self.nodes.contains_key(&id) {
            return Err(HnswError::DuplicateId(id));
        }
        if let Some(dim) = self.dimension() {
            if vector.dimension() != dim {
                return Err(HnswError::dimension_mismatch(dim, vector.dimension()));
            }
        }

        let level = self.random_level();
        tracing::debug!(id, level, "inserting vector");

        // The node goes into the map before any linking so distance lookups
        // during pruning can resolve it by id.
        let query = vector.clone();
        self.nodes.insert(id, Node::new(vector, level));

        let Some(entry) = self.entry_point else {
            self.entry_point = Some(id);
            self.max_layer = level;
            return Ok(());
        };

        let mut visited = HashSet::new();

        // Zoom-in: greedy descent through the layers the new node does not reach.
        let mut nearest = entry;
        for layer in (level + 1..=self.max_layer).rev() {
            let found = search_layer(self, query.data(), &[nearest], 1, layer, &mut visited);
            if let Some(&(_, closest)) = found.first() {
                nearest = closest;
            }
        }

        // Link layer by layer from min(level, max_layer) down to 0.
        for layer in (0..=level.min(self.max_layer)).rev() {
            let candidates = search_layer(
                self,
                query.data(),
                &[nearest],
                self.config.m,
                layer,
                &mut visited,
            );
            let m_cap = if layer == 0 {
                self.config.m_max0
            } else {
                self.config.m
            };

            for &(_, candidate) in &candidates {
                self.connect(id, candidate, layer);
                if self.nodes[&candidate].neighbor_count(layer) > m_cap {
                    self.prune_neighbors(candidate, m_cap, layer);
                }
            }

            // Closest candidate seeds the next layer down.
            if let Some(&(_, closest)) = candidates.first() {
                nearest = closest;
            }
        }

        if level > self.max_layer {
            tracing::debug!(id, level, "new entry point");
            self.max_layer = level;
            self.entry_point = Some(id);
        }
        Ok(())
    }

    /// Add the undirected edge `a <-> b` at `layer`.
    fn connect(&mut self, a: u64, b: u64, layer: usize) {
        if a == b {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&a) {
            node.add_neighbor(layer, b);
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.add_neighbor(layer, a);
        }
    }

    /// Keep the `m_cap` neighbors closest to `id` at `layer` and drop the
    /// rest from both endpoints, so edges stay undirected.
    fn prune_neighbors(&mut self, id: u64, m_cap: usize, layer: usize) {
        let base = &self.nodes[&id];
        let base_data = base.vector().data();
        let mut ranked: Vec<(f32, u64)> = base
            .neighbors(layer)
            .iter()
            .map(|&nid| {
                (
                    euclidean_distance(base_data, self.nodes[&nid].vector().data()),
                    nid,
                )
            })
            .collect();
        if ranked.len() <= m_cap {
            return;
        }

        // Stable sort: ties keep insertion order.
        ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let removed: Vec<u64> = ranked.split_off(m_cap).into_iter().map(|(_, nid)| nid).collect();
        for nid in removed {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.remove_neighbor(layer, nid);
            }
            if let Some(node) = self.nodes.get_mut(&nid) {
                node.remove_neighbor(layer, id);
            }
        }
    }
}
