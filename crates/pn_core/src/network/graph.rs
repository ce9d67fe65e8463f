//! # Weighted Player Graph
//!
//! Undirected simple graph over player ids with accumulating edge
//! weights. Edges are keyed by the canonical (min, max) id pair, so the
//! map doubles as a sparse symmetric accumulator matrix.

use crate::events::{PlayerPlayRow, RosterEntry};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Optional display attributes attached to a node after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAttributes {
    pub name: Option<String>,
    pub position: Option<String>,
    pub team: Option<String>,
}

/// Weighted undirected player interaction graph.
///
/// Nodes exist only as edge endpoints; attribute enrichment never adds
/// nodes. No self-loops.
#[derive(Debug, Clone, Default)]
pub struct PlayerNetwork {
    nodes: FxHashMap<u64, NodeAttributes>,
    edges: FxHashMap<(u64, u64), f64>,
}

impl PlayerNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, nfl_id: u64) -> bool {
        self.nodes.contains_key(&nfl_id)
    }

    /// Add `weight` to the edge between two distinct players, creating
    /// the edge (and any missing endpoint) on first contact.
    ///
    /// A self-loop request mutates nothing.
    pub fn add_edge_weight(&mut self, player1: u64, player2: u64, weight: f64) {
        if player1 == player2 {
            return;
        }
        self.nodes.entry(player1).or_default();
        self.nodes.entry(player2).or_default();
        *self.edges.entry(edge_key(player1, player2)).or_insert(0.0) += weight;
    }

    /// Accumulated weight between two players, if they share an edge.
    pub fn edge_weight(&self, player1: u64, player2: u64) -> Option<f64> {
        self.edges.get(&edge_key(player1, player2)).copied()
    }

    /// Sum of incident edge weights for one node (0 for absent nodes).
    pub fn weighted_degree(&self, nfl_id: u64) -> f64 {
        self.edges
            .iter()
            .filter(|(&(a, b), _)| a == nfl_id || b == nfl_id)
            .map(|(_, &w)| w)
            .sum()
    }

    /// Node ids in ascending order.
    pub fn node_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Attributes for one node.
    pub fn attributes(&self, nfl_id: u64) -> Option<&NodeAttributes> {
        self.nodes.get(&nfl_id)
    }

    /// Edges as (source, target, weight), sorted by canonical key for
    /// deterministic export.
    pub fn sorted_edges(&self) -> Vec<(u64, u64, f64)> {
        let mut edges: Vec<(u64, u64, f64)> = self
            .edges
            .iter()
            .map(|(&(a, b), &w)| (a, b, w))
            .collect();
        edges.sort_unstable_by_key(|&(a, b, _)| (a, b));
        edges
    }

    /// Attach roster name/position to nodes already in the graph.
    /// Players without graph presence are ignored.
    pub fn apply_roster(&mut self, roster: &[RosterEntry]) {
        for entry in roster {
            if let Some(attrs) = self.nodes.get_mut(&entry.nfl_id) {
                attrs.name = Some(entry.name.clone());
                attrs.position = Some(entry.position.clone());
            }
        }
    }

    /// Attach team abbreviations from event rows to nodes already in
    /// the graph. Later rows win when a player appears for several
    /// teams.
    pub fn apply_teams(&mut self, rows: &[PlayerPlayRow]) {
        for row in rows {
            if row.team.is_empty() {
                continue;
            }
            if let Some(attrs) = self.nodes.get_mut(&row.nfl_id) {
                attrs.team = Some(row.team.clone());
            }
        }
    }
}

/// Canonical unordered key: (min, max).
#[inline]
fn edge_key(a: u64, b: u64) -> (u64, u64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
