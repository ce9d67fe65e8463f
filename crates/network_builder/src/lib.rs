//! # Network Builder Library
//!
//! CSV → PlayerNetwork → node/edge/distribution tables pipeline.
//!
//! Wraps the `pn_core` engine with file I/O: parses the play-by-play
//! and roster tables, builds and enriches the graph, exports flat CSV
//! tables for downstream plotting, and fits the degree power law.

pub mod player_play;

use anyhow::{Context, Result};
use pn_core::{
    build_network, cumulative_distribution, fit_power_law, pdf_series, weighted_degrees,
    DegreeBin, NetworkConfig, PdfPoint, PlayerNetwork, PowerLawFit,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use player_play::{read_player_play, read_roster, ParseStats};

/// Output file names written into the output directory.
pub const NODES_FILE: &str = "player_network_nodes.csv";
pub const EDGES_FILE: &str = "player_network_edges.csv";
pub const DEGREE_FILE: &str = "degree_distribution.csv";
pub const PDF_FILE: &str = "power_law_pdf.csv";

/// Number of log-spaced bins in the exported density series.
const PDF_BINS: usize = 10;

/// Inputs and options for one build run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Event table (player_play.csv).
    pub plays: PathBuf,
    /// Optional roster table (players.csv) for node names/positions.
    pub roster: Option<PathBuf>,
    /// Directory for the exported tables.
    pub out_dir: PathBuf,
    /// Restrict the build to one game.
    pub game: Option<u64>,
    /// JSON file overriding the default condition/value configuration.
    pub config: Option<PathBuf>,
}

/// Power-law fit results as stored in the run metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitSummary {
    pub alpha: f64,
    pub xmin: f64,
    pub ks_distance: f64,
    pub tail_size: usize,
    pub discrete: bool,
}

impl From<&PowerLawFit> for FitSummary {
    fn from(fit: &PowerLawFit) -> Self {
        Self {
            alpha: fit.alpha,
            xmin: fit.xmin,
            ks_distance: fit.ks_distance,
            tail_size: fit.tail_size,
            discrete: fit.discrete,
        }
    }
}

/// Metadata describing one build run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Creation time (RFC3339).
    pub created_at: String,
    /// Event table the graph was built from.
    pub plays_file: String,
    /// Game filter, if one was applied.
    pub game_filter: Option<u64>,
    /// Event rows parsed / skipped.
    pub rows_parsed: u32,
    pub rows_failed: u32,
    /// Graph size.
    pub node_count: usize,
    pub edge_count: usize,
    /// Sum of all edge weights.
    pub total_edge_weight: f64,
    /// Degree power-law fit, absent when the sample was too small.
    pub fit: Option<FitSummary>,
}

/// Run the full pipeline: parse, build, enrich, export, fit.
pub fn run_build(options: &BuildOptions) -> Result<RunMetadata> {
    // 1. Configuration (defaults or JSON override)
    let config = load_config(options.config.as_deref())?;
    let weights = config
        .weight_table()
        .context("Failed to derive weight table from configuration")?;
    let conditions = config.scan_conditions();

    // 2. Event table
    let (mut rows, stats) = read_player_play(&options.plays)?;
    log::info!(
        "parsed {} event rows ({} failed) from {}",
        stats.parsed,
        stats.failed,
        options.plays.display()
    );

    // 3. Optional single-game trim
    if let Some(game_id) = options.game {
        rows.retain(|row| row.game_id == game_id);
        log::info!("game filter {}: {} rows kept", game_id, rows.len());
    }

    // 4. Build the graph
    let mut graph = build_network(&rows, &conditions, &weights);

    // 5. Best-effort node enrichment
    if let Some(roster_path) = &options.roster {
        let (roster, roster_stats) = read_roster(roster_path)?;
        log::info!(
            "parsed {} roster entries ({} failed)",
            roster_stats.parsed,
            roster_stats.failed
        );
        graph.apply_roster(&roster);
    }
    graph.apply_teams(&rows);

    // 6. Export tables
    fs::create_dir_all(&options.out_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            options.out_dir.display()
        )
    })?;
    export_nodes(&graph, &options.out_dir.join(NODES_FILE))?;
    export_edges(&graph, &options.out_dir.join(EDGES_FILE))?;

    // 7. Degree distribution and power-law fit
    let degrees = weighted_degrees(&graph);
    let bins = cumulative_distribution(&degrees);
    export_degree_distribution(&bins, &options.out_dir.join(DEGREE_FILE))?;

    let fit = match fit_power_law(&degrees) {
        Ok(fit) => {
            let series = pdf_series(&degrees, &fit, PDF_BINS);
            export_pdf_series(&series, &options.out_dir.join(PDF_FILE))?;
            Some(fit)
        }
        Err(e) => {
            log::warn!("power-law fit skipped: {}", e);
            None
        }
    };

    // 8. Run metadata
    Ok(RunMetadata {
        created_at: chrono::Utc::now().to_rfc3339(),
        plays_file: options.plays.display().to_string(),
        game_filter: options.game,
        rows_parsed: stats.parsed,
        rows_failed: stats.failed,
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        total_edge_weight: graph.sorted_edges().iter().map(|&(_, _, w)| w).sum(),
        fit: fit.as_ref().map(FitSummary::from),
    })
}

/// Load the network configuration, applying a JSON override when given.
pub fn load_config(path: Option<&Path>) -> Result<NetworkConfig> {
    match path {
        None => Ok(NetworkConfig::default()),
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        }
    }
}

/// Write the node table: ID, Label, Position, Team.
pub fn export_nodes(graph: &PlayerNetwork, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create node table: {}", path.display()))?;
    writer.write_record(["ID", "Label", "Position", "Team"])?;

    for id in graph.node_ids() {
        let attrs = graph.attributes(id).expect("listed node exists");
        writer.write_record([
            id.to_string(),
            attrs.name.clone().unwrap_or_default(),
            attrs.position.clone().unwrap_or_default(),
            attrs.team.clone().unwrap_or_default(),
        ])?;
    }
    writer.flush().context("Failed to flush node table")?;
    Ok(())
}

/// Write the edge table: Source, Target, Weight.
pub fn export_edges(graph: &PlayerNetwork, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create edge table: {}", path.display()))?;
    writer.write_record(["Source", "Target", "Weight"])?;

    for (source, target, weight) in graph.sorted_edges() {
        writer.write_record([source.to_string(), target.to_string(), weight.to_string()])?;
    }
    writer.flush().context("Failed to flush edge table")?;
    Ok(())
}

/// Write the cumulative degree distribution table.
pub fn export_degree_distribution(bins: &[DegreeBin], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create degree table: {}", path.display()))?;
    writer.write_record(["Degree", "Count", "CumulativeFraction"])?;

    for bin in bins {
        writer.write_record([
            bin.degree.to_string(),
            bin.count.to_string(),
            bin.cumulative_fraction.to_string(),
        ])?;
    }
    writer.flush().context("Failed to flush degree table")?;
    Ok(())
}

/// Write the empirical-vs-fitted density series.
pub fn export_pdf_series(series: &[PdfPoint], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create density table: {}", path.display()))?;
    writer.write_record(["X", "EmpiricalPdf", "FittedPdf"])?;

    for point in series {
        writer.write_record([
            point.x.to_string(),
            point.empirical.to_string(),
            point.fitted.to_string(),
        ])?;
    }
    writer.flush().context("Failed to flush density table")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const W_DROPBACK_RECEPTION: f64 = 10.0 / 211.0;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn small_inputs(dir: &TempDir) -> (PathBuf, PathBuf) {
        let plays = write_file(
            dir,
            "player_play.csv",
            "gameId,playId,nflId,teamAbbr,hadDropback,hadPassReception\n\
             1,1,10,CHI,1,0\n\
             1,1,20,CHI,0,1\n\
             1,2,10,CHI,1,0\n\
             1,2,20,CHI,0,1\n",
        );
        let roster = write_file(
            dir,
            "players.csv",
            "nflId,displayName,position\n\
             10,Justin Fields,QB\n\
             20,Cole Kmet,TE\n",
        );
        (plays, roster)
    }

    #[test]
    fn test_run_build_exports_tables() {
        let dir = TempDir::new().unwrap();
        let (plays, roster) = small_inputs(&dir);
        let out_dir = dir.path().join("out");

        let options = BuildOptions {
            plays,
            roster: Some(roster),
            out_dir: out_dir.clone(),
            game: None,
            config: None,
        };
        let meta = run_build(&options).unwrap();

        assert_eq!(meta.rows_parsed, 4);
        assert_eq!(meta.node_count, 2);
        assert_eq!(meta.edge_count, 1);
        assert!((meta.total_edge_weight - 2.0 * W_DROPBACK_RECEPTION).abs() < 1e-12);
        // Two nodes cannot support a fit
        assert!(meta.fit.is_none());

        let nodes = fs::read_to_string(out_dir.join(NODES_FILE)).unwrap();
        assert!(nodes.starts_with("ID,Label,Position,Team\n"));
        assert!(nodes.contains("10,Justin Fields,QB,CHI"));
        assert!(nodes.contains("20,Cole Kmet,TE,CHI"));

        let edges = fs::read_to_string(out_dir.join(EDGES_FILE)).unwrap();
        let mut lines = edges.lines();
        assert_eq!(lines.next(), Some("Source,Target,Weight"));
        let edge = lines.next().unwrap();
        assert!(edge.starts_with("10,20,"));

        let degrees = fs::read_to_string(out_dir.join(DEGREE_FILE)).unwrap();
        assert!(degrees.starts_with("Degree,Count,CumulativeFraction\n"));
        // Both nodes share the same weighted degree
        assert!(degrees.lines().nth(1).unwrap().contains(",2,1"));
    }

    #[test]
    fn test_game_filter_trims_input() {
        let dir = TempDir::new().unwrap();
        let plays = write_file(
            &dir,
            "player_play.csv",
            "gameId,playId,nflId,hadDropback,hadPassReception\n\
             1,1,10,1,0\n\
             1,1,20,0,1\n\
             2,1,30,1,0\n\
             2,1,40,0,1\n",
        );

        let options = BuildOptions {
            plays,
            roster: None,
            out_dir: dir.path().join("out"),
            game: Some(2),
            config: None,
        };
        let meta = run_build(&options).unwrap();

        assert_eq!(meta.game_filter, Some(2));
        assert_eq!(meta.node_count, 2);

        let nodes = fs::read_to_string(dir.path().join("out").join(NODES_FILE)).unwrap();
        assert!(nodes.contains("30,"));
        assert!(!nodes.contains("10,"));
    }

    #[test]
    fn test_config_override_changes_weights() {
        let dir = TempDir::new().unwrap();
        let (plays, _) = small_inputs(&dir);
        let config = write_file(
            &dir,
            "config.json",
            r#"{
                "event_values": { "hadDropback": 250.0, "hadPassReception": 250.0 },
                "condition_pairs": [["hadDropback", "hadPassReception"]],
                "weight_scale": 10.0
            }"#,
        );

        let options = BuildOptions {
            plays,
            roster: None,
            out_dir: dir.path().join("out"),
            game: None,
            config: Some(config),
        };
        let meta = run_build(&options).unwrap();

        // 10 / 500 per play, two plays
        assert!((meta.total_edge_weight - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_missing_input_fails_with_context() {
        let dir = TempDir::new().unwrap();
        let options = BuildOptions {
            plays: dir.path().join("nope.csv"),
            roster: None,
            out_dir: dir.path().join("out"),
            game: None,
            config: None,
        };
        let err = run_build(&options).unwrap_err();
        assert!(err.to_string().contains("Failed to open event table"));
    }

    #[test]
    fn test_metadata_round_trips_as_json() {
        let meta = RunMetadata {
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
            plays_file: "player_play.csv".to_string(),
            game_filter: None,
            rows_parsed: 4,
            rows_failed: 0,
            node_count: 2,
            edge_count: 1,
            total_edge_weight: 0.5,
            fit: None,
        };
        let json = serde_json::to_string_pretty(&meta).unwrap();
        let back: RunMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back.node_count, 2);
        assert!(back.fit.is_none());
    }
}
