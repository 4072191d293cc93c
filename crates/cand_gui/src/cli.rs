//! Command-line interface.

use std::path::PathBuf;

use cand_core::{DEFAULT_PATTERN, DiscoveryOptions, SortKey};
use clap::Parser;

/// Three-way candidate classifier: label each image False, True or Maybe.
#[derive(Debug, Parser)]
#[command(name = "cand-viewer", version = env!("CAND_VIEWER_VERSION"))]
pub struct Cli {
    /// Directory searched recursively for candidate images.
    #[arg(value_name = "IMGDIR")]
    pub image_dir: PathBuf,

    /// CSV file the labels are written to.
    #[arg(short, long, default_value = "results.csv")]
    pub outfile: PathBuf,

    /// Labels from an earlier run to resume from.
    #[arg(short = 'H', long, alias = "history_file")]
    pub history_file: Option<PathBuf>,

    /// Sort by S/N ratio, highest first.
    #[arg(long, alias = "sort_snr")]
    pub sort_snr: bool,

    /// Sort by rank, highest first. Applied after `--sort-snr`.
    #[arg(long, alias = "sort_rank")]
    pub sort_rank: bool,

    /// File-name pattern for candidates; `*` matches anything.
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolved startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub image_dir: PathBuf,
    pub outfile: PathBuf,
    pub history_file: Option<PathBuf>,
    pub discovery: DiscoveryOptions,
}

impl From<Cli> for ViewerConfig {
    fn from(cli: Cli) -> Self {
        let mut sort_keys = Vec::new();
        if cli.sort_snr {
            sort_keys.push(SortKey::Snr);
        }
        if cli.sort_rank {
            sort_keys.push(SortKey::Rank);
        }
        Self {
            image_dir: cli.image_dir,
            outfile: cli.outfile,
            history_file: cli.history_file,
            discovery: DiscoveryOptions {
                pattern: cli.pattern,
                sort_keys,
            },
        }
    }
}
