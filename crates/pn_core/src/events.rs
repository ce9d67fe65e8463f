//! # Event Model
//!
//! Fixed vocabulary of per-play player events and the row record the
//! network builder scans.
//!
//! Event columns in the source data are either boolean flags or numeric
//! counts/yardage. Both kinds are read through the same tagged
//! [`EventValue`] accessor so the condition predicate has a single
//! definition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named player event from the play-by-play table.
///
/// Variants serialize to the source column names (e.g. `hadDropback`),
/// which is also the spelling used in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Event {
    #[serde(rename = "hadDropback")]
    HadDropback,
    #[serde(rename = "hadPassReception")]
    HadPassReception,
    #[serde(rename = "wasTargettedReceiver")]
    WasTargettedReceiver,
    #[serde(rename = "hadRushAttempt")]
    HadRushAttempt,
    #[serde(rename = "hadInterception")]
    HadInterception,
    #[serde(rename = "fumbleLost")]
    FumbleLost,
    #[serde(rename = "causedPressure")]
    CausedPressure,
    #[serde(rename = "pressureAllowedAsBlocker")]
    PressureAllowedAsBlocker,
    #[serde(rename = "soloTackle")]
    SoloTackle,
    #[serde(rename = "tackleAssist")]
    TackleAssist,
    #[serde(rename = "fumbleRecoveries")]
    FumbleRecoveries,
    #[serde(rename = "forcedFumbleAsDefense")]
    ForcedFumbleAsDefense,
    #[serde(rename = "passDefensed")]
    PassDefensed,
    #[serde(rename = "quarterbackHit")]
    QuarterbackHit,
    #[serde(rename = "sackYardsAsDefense")]
    SackYardsAsDefense,
}

impl Event {
    /// Every event in the vocabulary, in a fixed order.
    pub const ALL: [Event; 15] = [
        Event::HadDropback,
        Event::HadPassReception,
        Event::WasTargettedReceiver,
        Event::HadRushAttempt,
        Event::HadInterception,
        Event::FumbleLost,
        Event::CausedPressure,
        Event::PressureAllowedAsBlocker,
        Event::SoloTackle,
        Event::TackleAssist,
        Event::FumbleRecoveries,
        Event::ForcedFumbleAsDefense,
        Event::PassDefensed,
        Event::QuarterbackHit,
        Event::SackYardsAsDefense,
    ];

    /// Source CSV column name for this event.
    pub fn column_name(&self) -> &'static str {
        match self {
            Event::HadDropback => "hadDropback",
            Event::HadPassReception => "hadPassReception",
            Event::WasTargettedReceiver => "wasTargettedReceiver",
            Event::HadRushAttempt => "hadRushAttempt",
            Event::HadInterception => "hadInterception",
            Event::FumbleLost => "fumbleLost",
            Event::CausedPressure => "causedPressure",
            Event::PressureAllowedAsBlocker => "pressureAllowedAsBlocker",
            Event::SoloTackle => "soloTackle",
            Event::TackleAssist => "tackleAssist",
            Event::FumbleRecoveries => "fumbleRecoveries",
            Event::ForcedFumbleAsDefense => "forcedFumbleAsDefense",
            Event::PassDefensed => "passDefensed",
            Event::QuarterbackHit => "quarterbackHit",
            Event::SackYardsAsDefense => "sackYardsAsDefense",
        }
    }

    /// Resolve an event from its source column name.
    pub fn from_column(name: &str) -> Option<Event> {
        Event::ALL.iter().copied().find(|e| e.column_name() == name)
    }

    /// Whether the source column is numeric (count or yardage) rather
    /// than a boolean flag.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Event::SoloTackle
                | Event::TackleAssist
                | Event::FumbleRecoveries
                | Event::ForcedFumbleAsDefense
                | Event::PassDefensed
                | Event::QuarterbackHit
                | Event::SackYardsAsDefense
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Value of one event attribute on one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventValue {
    Bool(bool),
    Number(f64),
    Missing,
}

impl EventValue {
    /// Condition predicate: boolean attributes must be exactly `true`,
    /// numeric attributes must be present, non-NaN and >= 1. Anything
    /// else is "not met".
    pub fn is_met(&self) -> bool {
        match *self {
            EventValue::Bool(b) => b,
            EventValue::Number(x) => !x.is_nan() && x >= 1.0,
            EventValue::Missing => false,
        }
    }
}

/// One player-play record from the event table.
///
/// Within one (game_id, play_id) group, rows keep their source order;
/// the builder's first-actor latch depends on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerPlayRow {
    pub game_id: u64,
    pub play_id: u64,
    pub nfl_id: u64,
    pub team: String,

    // Boolean flags
    pub had_dropback: bool,
    pub had_pass_reception: bool,
    pub was_targetted_receiver: bool,
    pub had_rush_attempt: bool,
    pub had_interception: bool,
    pub fumble_lost: bool,
    pub caused_pressure: bool,
    pub pressure_allowed_as_blocker: bool,

    // Numeric counts / yardage (absent in the source when not applicable)
    pub solo_tackle: Option<f64>,
    pub tackle_assist: Option<f64>,
    pub fumble_recoveries: Option<f64>,
    pub forced_fumble_as_defense: Option<f64>,
    pub pass_defensed: Option<f64>,
    pub quarterback_hit: Option<f64>,
    pub sack_yards_as_defense: Option<f64>,
}

impl PlayerPlayRow {
    /// Tagged accessor for one event attribute.
    pub fn event(&self, event: Event) -> EventValue {
        fn num(v: Option<f64>) -> EventValue {
            match v {
                Some(x) => EventValue::Number(x),
                None => EventValue::Missing,
            }
        }

        match event {
            Event::HadDropback => EventValue::Bool(self.had_dropback),
            Event::HadPassReception => EventValue::Bool(self.had_pass_reception),
            Event::WasTargettedReceiver => EventValue::Bool(self.was_targetted_receiver),
            Event::HadRushAttempt => EventValue::Bool(self.had_rush_attempt),
            Event::HadInterception => EventValue::Bool(self.had_interception),
            Event::FumbleLost => EventValue::Bool(self.fumble_lost),
            Event::CausedPressure => EventValue::Bool(self.caused_pressure),
            Event::PressureAllowedAsBlocker => EventValue::Bool(self.pressure_allowed_as_blocker),
            Event::SoloTackle => num(self.solo_tackle),
            Event::TackleAssist => num(self.tackle_assist),
            Event::FumbleRecoveries => num(self.fumble_recoveries),
            Event::ForcedFumbleAsDefense => num(self.forced_fumble_as_defense),
            Event::PassDefensed => num(self.pass_defensed),
            Event::QuarterbackHit => num(self.quarterback_hit),
            Event::SackYardsAsDefense => num(self.sack_yards_as_defense),
        }
    }

    /// Whether this row satisfies the given event condition.
    pub fn condition_met(&self, event: Event) -> bool {
        self.event(event).is_met()
    }
}

/// Whether a row satisfies an event condition (free-function form).
pub fn condition_met(row: &PlayerPlayRow, event: Event) -> bool {
    row.condition_met(event)
}

/// One roster record, used to attach names and positions to graph nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub nfl_id: u64,
    pub name: String,
    pub position: String,
}
