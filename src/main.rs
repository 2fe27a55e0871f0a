use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use revsnake::game::GameConfig;
use revsnake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "revsnake")]
#[command(version, about = "Terminal snake with direction-reversing food")]
struct Cli {
    /// Grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns
    #[arg(long)]
    cols: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// RNG seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// YAML config file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::from_yaml_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.cols = cols;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
