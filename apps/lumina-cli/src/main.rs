//! Lumina CLI - tabular analytics from the terminal
//!
//! Loads a delimited file and prints dashboard numbers as JSON.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lumina_core::LuminaConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lumina")]
#[command(about = "Summaries, correlations, histograms and live feeds for CSV data")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML); defaults to the user config directory
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Numeric summary of every numeric column
    Summary {
        file: PathBuf,

        /// Only summarize rows whose COLUMN contains --filter-value
        #[arg(long, value_name = "COLUMN", requires = "filter_value")]
        filter_column: Option<String>,

        #[arg(long, value_name = "TEXT")]
        filter_value: Option<String>,
    },

    /// Pairwise Pearson correlations between numeric columns
    Correlations { file: PathBuf },

    /// Equal-width histogram of one column
    Histogram {
        file: PathBuf,
        column: String,

        /// Number of buckets (defaults to the configured value)
        #[arg(long, short = 'b')]
        bins: Option<usize>,
    },

    /// Rows whose column contains a substring, ignoring case
    #[command(after_help = "\
Examples:
  lumina filter cities.csv city new
  lumina filter sales.csv units 1 --limit 20")]
    Filter {
        file: PathBuf,
        column: String,
        needle: String,

        /// Maximum rows to print (defaults to the configured preview size)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Run the live feed for a number of ticks and print the final window
    Live {
        file: PathBuf,

        #[arg(long, short = 't', default_value_t = 5)]
        ticks: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => LuminaConfig::from_path(path)?,
        None => LuminaConfig::load_default(),
    };

    let output = match cli.command {
        Commands::Summary {
            file,
            filter_column,
            filter_value,
        } => commands::summary(
            &file,
            filter_column.as_deref().zip(filter_value.as_deref()),
        )?,
        Commands::Correlations { file } => commands::correlations(&file, &config)?,
        Commands::Histogram { file, column, bins } => {
            commands::histogram(&file, &column, bins, &config)?
        }
        Commands::Filter {
            file,
            column,
            needle,
            limit,
        } => commands::filter(&file, &column, &needle, limit, &config)?,
        Commands::Live { file, ticks } => commands::live(&file, ticks, &config).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
