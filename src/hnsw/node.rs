//! Graph vertex: an owned vector, its top layer, and per-layer adjacency.

use crate::vector::Vector;
use serde::{Deserialize, Serialize};

/// A vertex in the layered proximity graph.
///
/// A node with level `L` participates in layers `0..=L` and keeps one
/// neighbor list per layer, fixed at construction and initially empty.
/// Neighbor lists stay small (at most `2 * m`), so a flat vector with linear
/// scans wins over a hash set here.
///
/// Mutators are crate-private: every edge change goes through the index,
/// which keeps edges bidirectional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    vector: Vector,
    level: usize,
    connections: Vec<Vec<u64>>,
}

impl Node {
    pub(crate) fn new(vector: Vector, level: usize) -> Self {
        Self {
            vector,
            level,
            connections: vec![Vec::new(); level + 1],
        }
    }

    /// The vector stored in this node.
    pub fn vector(&self) -> &Vector {
        &self.vector
    }

    /// Highest layer this node participates in.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Neighbor ids at `layer`. Layers above `level` read as empty.
    pub fn neighbors(&self, layer: usize) -> &[u64] {
        if layer < self.connections.len() {
            &self.connections[layer]
        } else {
            &[]
        }
    }

    /// Whether `id` is a neighbor at `layer`.
    pub fn has_neighbor(&self, layer: usize, id: u64) -> bool {
        self.neighbors(layer).contains(&id)
    }

    /// Number of neighbors at `layer`.
    pub fn neighbor_count(&self, layer: usize) -> usize {
        self.neighbors(layer).len()
    }

    /// Connect to `id` at `layer`.
    ///
    /// Duplicate adds and self-loops are ignored; layers above `level` are
    /// never created.
    pub(crate) fn add_neighbor(&mut self, layer: usize, id: u64) {
        debug_assert!(
            layer <= self.level,
            "layer {layer} above node level {}",
            self.level
        );
        if id == self.vector.id() {
            return;
        }
        if let Some(ids) = self.connections.get_mut(layer) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }

    /// Disconnect `id` at `layer`, if present.
    pub(crate) fn remove_neighbor(&mut self, layer: usize, id: u64) {
        if let Some(ids) = self.connections.get_mut(layer) {
            if let Some(pos) = ids.iter().position(|&n| n == id) {
                ids.swap_remove(pos);
            }
        }
    }
}
