//! Network Builder CLI
//!
//! Play-by-play CSV → weighted player network → node/edge/distribution
//! tables and a degree power-law fit.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "network_builder")]
#[command(about = "Build a player interaction network from play-by-play data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build the network and export node/edge/distribution tables
    Build {
        /// Input event table (player_play.csv)
        #[arg(long)]
        plays: PathBuf,

        /// Roster table (players.csv) for node names and positions
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Output directory for the exported tables
        #[arg(long)]
        out_dir: PathBuf,

        /// Restrict the build to a single gameId
        #[arg(long)]
        game: Option<u64>,

        /// JSON file overriding the condition/value configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output run metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            plays,
            roster,
            out_dir,
            game,
            config,
            metadata,
        } => {
            println!("🏈 Building player interaction network...");
            println!("   Plays:  {}", plays.display());
            if let Some(roster) = &roster {
                println!("   Roster: {}", roster.display());
            }
            println!("   Output: {}", out_dir.display());
            if let Some(game) = game {
                println!("   Game:   {}", game);
            }

            let options = network_builder::BuildOptions {
                plays,
                roster,
                out_dir,
                game,
                config,
            };
            let meta = network_builder::run_build(&options)?;

            print_summary(&meta);

            if let Some(metadata_path) = metadata {
                save_metadata(&metadata_path, &meta)?;
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_summary(meta: &network_builder::RunMetadata) {
    println!(
        "\n✅ Player Interaction Network: {} nodes, {} edges",
        meta.node_count, meta.edge_count
    );
    println!(
        "   Rows parsed:  {} (failed: {})",
        meta.rows_parsed, meta.rows_failed
    );
    println!("   Total weight: {:.4}", meta.total_edge_weight);

    match &meta.fit {
        Some(fit) => {
            println!("\n📈 Degree power-law fit:");
            println!("   alpha: {:.4}", fit.alpha);
            println!("   xmin:  {:.4}", fit.xmin);
            println!(
                "   KS distance: {:.4} over {} tail samples",
                fit.ks_distance, fit.tail_size
            );
        }
        None => println!("\n📈 Degree power-law fit skipped (sample too small)"),
    }
}

#[cfg(feature = "cli")]
fn save_metadata(path: &PathBuf, meta: &network_builder::RunMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)?;
    println!("\n📄 Metadata saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("network_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
