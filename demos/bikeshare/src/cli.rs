//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use bs_core::{FallbackOrder, RankMode, SimConfig};

/// Bike-share occupancy simulator.
#[derive(Parser, Debug)]
#[command(name = "bikeshare")]
#[command(about = "Simulate station saturation in a bike-share network")]
pub struct Args {
    #[command(subcommand)]
    pub graph: GraphSource,

    /// JSON file with a full simulation configuration; flags below override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of Demand + Rebalance steps
    #[arg(long, global = true)]
    pub steps: Option<u64>,

    /// Random seed for deterministic runs
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Riders per step
    #[arg(long, global = true)]
    pub riders: Option<u32>,

    /// Demand ranking mode
    #[arg(long, global = true, value_enum)]
    pub mode: Option<Mode>,

    /// Scan the ranking lowest-first when a chosen station is full
    #[arg(long, global = true)]
    pub reverse_fallback: bool,

    /// Truck runs per step (0 disables rebalancing)
    #[arg(long, global = true)]
    pub truck_runs: Option<u32>,

    /// Directory for CSV output
    #[arg(long, global = true, default_value = "output/bikeshare")]
    pub output: PathBuf,

    /// Run this many independent replicates (seeds seed, seed+1, …) and
    /// print one summary row per replicate instead of writing output
    #[arg(long, global = true)]
    pub replicates: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum GraphSource {
    /// Synthetic directed random graph
    Random {
        /// Number of stations
        #[arg(long, default_value_t = 50)]
        stations: usize,

        /// Probability of each directed edge
        #[arg(long, default_value_t = 0.3)]
        edge_prob: f64,

        /// Seed for graph generation (defaults to the simulation seed)
        #[arg(long)]
        graph_seed: Option<u64>,
    },

    /// Geographic graph from a station feed CSV export
    Stations {
        /// Path to the station CSV
        csv: PathBuf,

        /// Maximum distance between connected stations, in km
        #[arg(long, default_value_t = bs_network::DEFAULT_MAX_RADIUS_KM)]
        radius_km: f32,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Mode {
    Am,
    Pm,
}

impl From<Mode> for RankMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Am => RankMode::Am,
            Mode::Pm => RankMode::Pm,
        }
    }
}

impl Args {
    /// Configuration from `--config` (or defaults) with flag overrides applied.
    pub fn sim_config(&self) -> anyhow::Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = std::fs::File::open(path)?;
                serde_json::from_reader(std::io::BufReader::new(file))?
            }
            None => SimConfig::default(),
        };
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(riders) = self.riders {
            config.riders_per_step = riders;
        }
        if let Some(mode) = self.mode {
            config.rank_mode = mode.into();
        }
        if self.reverse_fallback {
            config.fallback_order = FallbackOrder::ReverseRanking;
        }
        if let Some(runs) = self.truck_runs {
            config.truck.runs = runs;
        }
        Ok(config)
    }
}
