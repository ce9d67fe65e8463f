//! # Degree Distribution
//!
//! Weighted degree extraction and the reverse-cumulative distribution
//! series consumed by the plotting collaborator (linear and log-log
//! plots read the same table).

use crate::network::PlayerNetwork;
use serde::{Deserialize, Serialize};

/// One point of the cumulative degree distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeBin {
    /// Distinct weighted degree value.
    pub degree: f64,
    /// Number of nodes with exactly this degree.
    pub count: u32,
    /// Fraction of nodes with degree >= this value.
    pub cumulative_fraction: f64,
}

/// Weighted degree of every node, in ascending node-id order.
pub fn weighted_degrees(graph: &PlayerNetwork) -> Vec<f64> {
    graph
        .node_ids()
        .iter()
        .map(|&id| graph.weighted_degree(id))
        .collect()
}

/// Reverse-cumulative distribution over distinct degree values.
///
/// Degrees are grouped by exact value in ascending order; each bin
/// carries the fraction of nodes whose degree is at least the bin
/// value, so the last bin's fraction is `count_max / n` and the first
/// is 1.
pub fn cumulative_distribution(degrees: &[f64]) -> Vec<DegreeBin> {
    if degrees.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<f64> = degrees.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    // Group exact-equal values
    let mut bins: Vec<(f64, u32)> = Vec::new();
    for &d in &sorted {
        match bins.last_mut() {
            Some((value, count)) if *value == d => *count += 1,
            _ => bins.push((d, 1)),
        }
    }

    let total: u32 = degrees.len() as u32;

    // Reverse-cumulative counts: nodes with degree >= bin value
    let mut remaining = total;
    let mut result = Vec::with_capacity(bins.len());
    for (degree, count) in bins {
        result.push(DegreeBin {
            degree,
            count,
            cumulative_fraction: remaining as f64 / total as f64,
        });
        remaining -= count;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_degrees_from_graph() {
        let mut graph = PlayerNetwork::new();
        graph.add_edge_weight(1, 2, 0.5);
        graph.add_edge_weight(2, 3, 1.5);

        // Node order is ascending id: 1, 2, 3
        let degrees = weighted_degrees(&graph);
        assert_eq!(degrees, vec![0.5, 2.0, 1.5]);
    }

    #[test]
    fn test_cumulative_distribution_fractions() {
        let degrees = [1.0, 1.0, 2.0, 3.0];
        let bins = cumulative_distribution(&degrees);

        assert_eq!(bins.len(), 3);

        assert_eq!(bins[0].degree, 1.0);
        assert_eq!(bins[0].count, 2);
        assert!((bins[0].cumulative_fraction - 1.0).abs() < 1e-12);

        assert_eq!(bins[1].degree, 2.0);
        assert_eq!(bins[1].count, 1);
        assert!((bins[1].cumulative_fraction - 0.5).abs() < 1e-12);

        assert_eq!(bins[2].degree, 3.0);
        assert!((bins[2].cumulative_fraction - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_cumulative_distribution_empty() {
        assert!(cumulative_distribution(&[]).is_empty());
    }
}
