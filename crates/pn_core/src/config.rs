//! # Network Configuration
//!
//! Event value table, condition pair list, and the derived symmetric
//! weight table.
//!
//! The compiled-in defaults reproduce the hand-tuned table used for the
//! 2022 tracking data analysis. Callers may replace any of them; the
//! builder itself only ever sees the finished [`WeightTable`] and the
//! scan-order condition list.

use crate::error::ConfigError;
use crate::events::Event;
use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// An ordered (trigger, completion) event pair.
pub type EventPair = (Event, Event);

/// Numerator of the pair-weight formula `k / (value(a) + value(b))`.
pub const DEFAULT_WEIGHT_SCALE: f64 = 10.0;

/// Extra rarity value shared by turnover-type events, equal to the
/// combined value of the three primary ball-carrier events.
pub const TURNOVER_ADJUSTMENT: f64 = 18.4 + 8.7 + 2.7;

/// Default per-event information values.
///
/// `hadRushAttempt` carries no value in the original tuning; pairs that
/// include it fall back to the other event's value alone.
static DEFAULT_EVENT_VALUES: Lazy<FxHashMap<Event, f64>> = Lazy::new(|| {
    let mut values = FxHashMap::default();
    values.insert(Event::HadDropback, 184.0);
    values.insert(Event::WasTargettedReceiver, 37.0);
    values.insert(Event::HadPassReception, 27.0);
    values.insert(Event::SoloTackle, 23.0);
    values.insert(Event::TackleAssist, 14.0);
    values.insert(Event::HadInterception, 2.0 + TURNOVER_ADJUSTMENT);
    values.insert(Event::FumbleLost, 2.0 + TURNOVER_ADJUSTMENT);
    values.insert(Event::FumbleRecoveries, 1.0 + TURNOVER_ADJUSTMENT);
    values.insert(Event::ForcedFumbleAsDefense, 1.0 + TURNOVER_ADJUSTMENT);
    values.insert(Event::CausedPressure, 10.0 + TURNOVER_ADJUSTMENT);
    values.insert(Event::PressureAllowedAsBlocker, 16.0);
    values.insert(Event::PassDefensed, 3.0 + TURNOVER_ADJUSTMENT);
    values.insert(Event::QuarterbackHit, 4.0 + TURNOVER_ADJUSTMENT);
    values.insert(Event::SackYardsAsDefense, 18.0 + TURNOVER_ADJUSTMENT);
    values
});

/// Default condition pairs, in scan order.
static DEFAULT_CONDITION_PAIRS: Lazy<Vec<EventPair>> = Lazy::new(|| {
    use Event::*;
    vec![
        (HadDropback, HadPassReception),
        (HadDropback, WasTargettedReceiver),
        (HadPassReception, SoloTackle),
        (HadPassReception, TackleAssist),
        (HadRushAttempt, SoloTackle),
        (HadRushAttempt, TackleAssist),
        (HadDropback, HadInterception),
        (FumbleLost, FumbleRecoveries),
        (FumbleLost, ForcedFumbleAsDefense),
        (ForcedFumbleAsDefense, HadPassReception),
        (ForcedFumbleAsDefense, HadRushAttempt),
        (HadDropback, CausedPressure),
        (PressureAllowedAsBlocker, CausedPressure),
        (HadDropback, PassDefensed),
        (WasTargettedReceiver, PassDefensed),
        (HadDropback, QuarterbackHit),
        (HadDropback, SackYardsAsDefense),
        (HadDropback, TackleAssist),
        (HadDropback, SoloTackle),
        (TackleAssist, TackleAssist),
        (ForcedFumbleAsDefense, FumbleRecoveries),
    ]
});

/// Full builder configuration: value table, pair list, weight scale.
///
/// Serializes to/from JSON with events spelled as their source column
/// names, so a config override file reads naturally:
///
/// ```json
/// {
///   "event_values": { "hadDropback": 184.0, "hadPassReception": 27.0 },
///   "condition_pairs": [["hadDropback", "hadPassReception"]],
///   "weight_scale": 10.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Per-event information values; missing events count as 0.
    pub event_values: FxHashMap<Event, f64>,
    /// Directional (trigger, completion) pairs, in scan order.
    pub condition_pairs: Vec<EventPair>,
    /// Numerator of the pair-weight formula.
    pub weight_scale: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            event_values: DEFAULT_EVENT_VALUES.clone(),
            condition_pairs: DEFAULT_CONDITION_PAIRS.clone(),
            weight_scale: DEFAULT_WEIGHT_SCALE,
        }
    }
}

impl NetworkConfig {
    /// Derive the symmetric weight table from this configuration.
    pub fn weight_table(&self) -> Result<WeightTable, ConfigError> {
        WeightTable::derive(&self.event_values, &self.condition_pairs, self.weight_scale)
    }

    /// The condition list the builder scans: configured pairs unioned
    /// with their reverses, first occurrence wins the scan position.
    ///
    /// The union keeps per-pair latch state directional while making
    /// edge detection symmetric across row order. Self-pairs appear
    /// once.
    pub fn scan_conditions(&self) -> Vec<EventPair> {
        let mut seen: FxHashSet<EventPair> = FxHashSet::default();
        let mut conditions = Vec::with_capacity(self.condition_pairs.len() * 2);

        for &pair in &self.condition_pairs {
            if seen.insert(pair) {
                conditions.push(pair);
            }
        }
        for &(a, b) in &self.condition_pairs {
            if seen.insert((b, a)) {
                conditions.push((b, a));
            }
        }
        conditions
    }
}

/// Read-only map from condition pair to edge-weight contribution.
///
/// Derived once per run; the builder never mutates it. Unconfigured
/// pairs have implicit weight 0.
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    weights: FxHashMap<EventPair, f64>,
}

impl WeightTable {
    /// Derive pair weights as `k / (value(a) + value(b))` and symmetrize
    /// so that `get(a, b) == get(b, a)` for every configured pair.
    ///
    /// Events absent from `values` count as 0. A pair whose value sum is
    /// 0 is a configuration error, not an infinite weight.
    pub fn derive(
        values: &FxHashMap<Event, f64>,
        pairs: &[EventPair],
        k: f64,
    ) -> Result<Self, ConfigError> {
        let mut weights = FxHashMap::default();

        for &(first, second) in pairs {
            let sum = values.get(&first).copied().unwrap_or(0.0)
                + values.get(&second).copied().unwrap_or(0.0);
            if sum == 0.0 {
                return Err(ConfigError::ZeroValueSum { first, second });
            }
            let weight = k / sum;
            weights.insert((first, second), weight);
            weights.insert((second, first), weight);
        }

        Ok(Self { weights })
    }

    /// Weight contribution for a condition pair; 0 when unconfigured.
    pub fn get(&self, first: Event, second: Event) -> f64 {
        self.weights.get(&(first, second)).copied().unwrap_or(0.0)
    }

    /// Number of directed entries (both orientations counted).
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
