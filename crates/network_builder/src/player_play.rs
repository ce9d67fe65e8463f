//! # Play-by-Play CSV Parsing
//!
//! Reads the event table (`player_play.csv`) and the roster table
//! (`players.csv`) into typed rows.
//!
//! Column positions are resolved from the header row, so the source
//! files may carry any number of extra columns in any order. Required
//! identifier columns missing from the header fail fast; individual
//! malformed rows are skipped with a warning and counted.

use anyhow::{bail, Context, Result};
use pn_core::{Event, PlayerPlayRow, RosterEntry};
use std::path::Path;

/// Identifier columns of the event table.
const COL_GAME_ID: &str = "gameId";
const COL_PLAY_ID: &str = "playId";
const COL_NFL_ID: &str = "nflId";
const COL_TEAM: &str = "teamAbbr";

/// Columns of the roster table.
const COL_DISPLAY_NAME: &str = "displayName";
const COL_POSITION: &str = "position";

/// CSV parsing statistics.
#[derive(Debug, Clone, Default)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
}

/// Header-resolved column layout of one event table.
struct EventColumns {
    game_id: usize,
    play_id: usize,
    nfl_id: usize,
    team: Option<usize>,
    /// Per-event column index, `None` when the column is absent (all
    /// rows then read as Missing for that event).
    events: Vec<(Event, Option<usize>)>,
}

impl EventColumns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).with_context(|| format!("event table is missing required column '{name}'"))
        };

        let events = Event::ALL
            .iter()
            .map(|&event| {
                let idx = find(event.column_name());
                if idx.is_none() {
                    log::warn!(
                        "event column '{}' not found; treating as missing for all rows",
                        event.column_name()
                    );
                }
                (event, idx)
            })
            .collect();

        Ok(Self {
            game_id: require(COL_GAME_ID)?,
            play_id: require(COL_PLAY_ID)?,
            nfl_id: require(COL_NFL_ID)?,
            team: find(COL_TEAM),
            events,
        })
    }
}

/// Parse the event table into rows, preserving source order.
///
/// Rows with unparseable identifiers are skipped with a warning; the
/// run fails only when the file yields no rows at all.
pub fn read_player_play(csv_path: &Path) -> Result<(Vec<PlayerPlayRow>, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open event table: {}", csv_path.display()))?;

    let columns = EventColumns::resolve(reader.headers().context("Failed to read CSV header")?)?;

    let mut rows = Vec::new();
    let mut stats = ParseStats::default();

    for result in reader.records() {
        stats.total_rows += 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                stats.failed += 1;
                log::warn!("line {}: CSV parse error: {}", stats.total_rows, e);
                continue;
            }
        };

        let id = |idx: usize, name: &str| -> Option<u64> {
            let raw = record.get(idx).unwrap_or("").trim();
            match raw.parse::<u64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    log::warn!(
                        "line {}: invalid {} value '{}', skipping row",
                        stats.total_rows,
                        name,
                        raw
                    );
                    None
                }
            }
        };

        let (game_id, play_id, nfl_id) = match (
            id(columns.game_id, COL_GAME_ID),
            id(columns.play_id, COL_PLAY_ID),
            id(columns.nfl_id, COL_NFL_ID),
        ) {
            (Some(g), Some(p), Some(n)) => (g, p, n),
            _ => {
                stats.failed += 1;
                continue;
            }
        };

        let mut row = PlayerPlayRow {
            game_id,
            play_id,
            nfl_id,
            team: columns
                .team
                .and_then(|idx| record.get(idx))
                .unwrap_or("")
                .trim()
                .to_string(),
            ..Default::default()
        };

        for &(event, idx) in &columns.events {
            let raw = idx.and_then(|i| record.get(i)).unwrap_or("").trim();
            apply_event_value(&mut row, event, raw);
        }

        rows.push(row);
        stats.parsed += 1;
    }

    if rows.is_empty() {
        bail!(
            "No valid rows parsed from event table: {}",
            csv_path.display()
        );
    }

    Ok((rows, stats))
}

/// Write one raw cell into the row's typed event field.
///
/// Boolean columns accept `1`/`true` (any case) as true and anything
/// else as false; numeric columns parse as f64 with empty or
/// unparseable cells mapped to missing.
fn apply_event_value(row: &mut PlayerPlayRow, event: Event, raw: &str) {
    if event.is_numeric() {
        let value = if raw.is_empty() {
            None
        } else {
            raw.parse::<f64>().ok()
        };
        match event {
            Event::SoloTackle => row.solo_tackle = value,
            Event::TackleAssist => row.tackle_assist = value,
            Event::FumbleRecoveries => row.fumble_recoveries = value,
            Event::ForcedFumbleAsDefense => row.forced_fumble_as_defense = value,
            Event::PassDefensed => row.pass_defensed = value,
            Event::QuarterbackHit => row.quarterback_hit = value,
            Event::SackYardsAsDefense => row.sack_yards_as_defense = value,
            _ => unreachable!("is_numeric covers exactly the numeric events"),
        }
    } else {
        let value = raw == "1" || raw.eq_ignore_ascii_case("true");
        match event {
            Event::HadDropback => row.had_dropback = value,
            Event::HadPassReception => row.had_pass_reception = value,
            Event::WasTargettedReceiver => row.was_targetted_receiver = value,
            Event::HadRushAttempt => row.had_rush_attempt = value,
            Event::HadInterception => row.had_interception = value,
            Event::FumbleLost => row.fumble_lost = value,
            Event::CausedPressure => row.caused_pressure = value,
            Event::PressureAllowedAsBlocker => row.pressure_allowed_as_blocker = value,
            _ => unreachable!("non-numeric events are the boolean flags"),
        }
    }
}

/// Parse the roster table.
pub fn read_roster(csv_path: &Path) -> Result<(Vec<RosterEntry>, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open roster table: {}", csv_path.display()))?;

    let headers = reader.headers().context("Failed to read CSV header")?;
    let find = |name: &str| headers.iter().position(|h| h.trim() == name);
    let nfl_id_idx = find(COL_NFL_ID)
        .with_context(|| format!("roster table is missing required column '{COL_NFL_ID}'"))?;
    let name_idx = find(COL_DISPLAY_NAME);
    let position_idx = find(COL_POSITION);

    let mut entries = Vec::new();
    let mut stats = ParseStats::default();

    for result in reader.records() {
        stats.total_rows += 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                stats.failed += 1;
                log::warn!("line {}: CSV parse error: {}", stats.total_rows, e);
                continue;
            }
        };

        let raw_id = record.get(nfl_id_idx).unwrap_or("").trim();
        let nfl_id = match raw_id.parse::<u64>() {
            Ok(v) => v,
            Err(_) => {
                stats.failed += 1;
                log::warn!(
                    "line {}: invalid {} value '{}', skipping row",
                    stats.total_rows,
                    COL_NFL_ID,
                    raw_id
                );
                continue;
            }
        };

        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or("")
                .trim()
                .to_string()
        };

        entries.push(RosterEntry {
            nfl_id,
            name: cell(name_idx),
            position: cell(position_idx),
        });
        stats.parsed += 1;
    }

    Ok((entries, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parses_event_rows_by_header_name() {
        // Extra columns and shuffled order must not matter.
        let file = write_csv(
            "playId,extra,hadPassReception,gameId,nflId,teamAbbr,hadDropback,soloTackle\n\
             64,x,0,2022090800,35472,BUF,1,\n\
             64,y,1,2022090800,42489,BUF,0,2\n",
        );

        let (rows, stats) = read_player_play(file.path()).unwrap();
        assert_eq!(stats.parsed, 2);
        assert_eq!(stats.failed, 0);

        assert_eq!(rows[0].game_id, 2022090800);
        assert_eq!(rows[0].play_id, 64);
        assert_eq!(rows[0].nfl_id, 35472);
        assert_eq!(rows[0].team, "BUF");
        assert!(rows[0].had_dropback);
        assert!(!rows[0].had_pass_reception);
        assert_eq!(rows[0].solo_tackle, None);

        assert!(rows[1].had_pass_reception);
        assert_eq!(rows[1].solo_tackle, Some(2.0));
    }

    #[test]
    fn test_true_false_flag_spellings() {
        let file = write_csv(
            "gameId,playId,nflId,hadDropback\n\
             1,1,10,TRUE\n\
             1,1,20,false\n\
             1,1,30,1\n",
        );

        let (rows, _) = read_player_play(file.path()).unwrap();
        assert!(rows[0].had_dropback);
        assert!(!rows[1].had_dropback);
        assert!(rows[2].had_dropback);
    }

    #[test]
    fn test_bad_identifier_rows_skipped() {
        let file = write_csv(
            "gameId,playId,nflId\n\
             1,1,10\n\
             1,1,\n\
             1,oops,30\n",
        );

        let (rows, stats) = read_player_play(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(stats.total_rows, 3);
        assert_eq!(stats.failed, 2);
    }

    #[test]
    fn test_missing_required_column_fails_fast() {
        let file = write_csv("gameId,nflId\n1,10\n");
        let err = read_player_play(file.path()).unwrap_err();
        assert!(err.to_string().contains("playId"));
    }

    #[test]
    fn test_empty_event_table_is_error() {
        let file = write_csv("gameId,playId,nflId\n");
        assert!(read_player_play(file.path()).is_err());
    }

    #[test]
    fn test_roster_parsing() {
        let file = write_csv(
            "nflId,height,displayName,position\n\
             35472,6-2,Josh Allen,QB\n\
             bad,6-0,Nobody,WR\n",
        );

        let (entries, stats) = read_roster(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(entries[0].nfl_id, 35472);
        assert_eq!(entries[0].name, "Josh Allen");
        assert_eq!(entries[0].position, "QB");
    }
}
