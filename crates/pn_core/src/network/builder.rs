//! # Network Builder
//!
//! Single-pass construction of the player interaction graph from
//! play-grouped event rows.
//!
//! ## Algorithm
//! 1. Group rows by (game_id, play_id), keeping source order inside
//!    each group.
//! 2. Per group, hold one "pending first actor" slot per condition pair.
//! 3. Scan rows in order: an empty slot latches the first player to
//!    satisfy the trigger event; any later (or the same) row satisfying
//!    the completion event closes the pair and accumulates the pair
//!    weight onto the edge between latch holder and completer.
//! 4. Slots die with the group; no state crosses plays.

use crate::config::{EventPair, WeightTable};
use crate::events::PlayerPlayRow;
use crate::network::graph::PlayerNetwork;
use std::collections::BTreeMap;

/// Build the weighted interaction graph from event rows.
///
/// `conditions` is the full scan list (configured pairs unioned with
/// their reverses, see [`crate::NetworkConfig::scan_conditions`]); its
/// order is the per-row pair scan order and must stay fixed for
/// reproducible latching when pairs overlap.
///
/// Pure with respect to its inputs: the same rows in the same order
/// always produce the same graph.
pub fn build_network(
    rows: &[PlayerPlayRow],
    conditions: &[EventPair],
    weights: &WeightTable,
) -> PlayerNetwork {
    let mut graph = PlayerNetwork::new();

    for ((game_id, play_id), play_rows) in group_by_play(rows) {
        log::debug!(
            "processing game {} play {} ({} rows)",
            game_id,
            play_id,
            play_rows.len()
        );
        scan_play(&mut graph, &play_rows, conditions, weights);
    }

    graph
}

/// Group rows by (game_id, play_id).
///
/// Group keys iterate in sorted order for reproducible logs; rows inside
/// a group keep their source order, which the first-actor latch depends
/// on.
fn group_by_play(rows: &[PlayerPlayRow]) -> BTreeMap<(u64, u64), Vec<&PlayerPlayRow>> {
    let mut groups: BTreeMap<(u64, u64), Vec<&PlayerPlayRow>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.game_id, row.play_id))
            .or_default()
            .push(row);
    }
    groups
}

/// Scan one play's rows against the condition list.
fn scan_play(
    graph: &mut PlayerNetwork,
    play_rows: &[&PlayerPlayRow],
    conditions: &[EventPair],
    weights: &WeightTable,
) {
    // Pending first-actor latch, one slot per condition pair.
    let mut pending: Vec<Option<u64>> = vec![None; conditions.len()];

    for row in play_rows {
        for (slot, &(trigger, completion)) in conditions.iter().enumerate() {
            // Latch the first player to satisfy the trigger. First in
            // row order wins; the slot is never overwritten within a
            // play.
            if pending[slot].is_none() && row.condition_met(trigger) {
                pending[slot] = Some(row.nfl_id);
            }

            // Not exclusive with the latch above: the same row may both
            // latch and complete (rejected as a self-loop), or complete
            // a pair latched by an earlier row.
            if let Some(player1) = pending[slot] {
                if row.condition_met(completion) {
                    let player2 = row.nfl_id;
                    if player1 != player2 {
                        let weight = weights.get(trigger, completion);
                        graph.add_edge_weight(player1, player2, weight);
                    }
                }
            }
        }
    }
}
