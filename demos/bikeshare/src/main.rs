//! bikeshare — command-line driver for the bike-share occupancy simulator.
//!
//! Builds a station graph (synthetic or from a station feed CSV), runs the
//! Demand + Rebalance step loop, writes per-phase station snapshots and
//! per-step summaries, and prints the stations that saturated most often.
//!
//! ```text
//! bikeshare random --stations 100 --edge-prob 0.2 --steps 50
//! bikeshare stations demos/bikeshare/data/dublin_sample.csv --mode am
//! bikeshare random --replicates 8
//! RUST_LOG=bs_sim=debug bikeshare random
//! ```

mod cli;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use bs_core::{Occupancy, SimConfig, SimRng, Step};
use bs_network::{
    StationDirectory, StationNetwork, erdos_renyi, geographic_from_records, load_stations_csv,
};
use bs_output::{CsvWriter, OutputWriter, SimOutputObserver};
use bs_sim::{Phase, SimBuilder, SimObserver, SimSummary, StepReport, run_replicates};
use bs_station::{Counter, StationStore};

use cli::{Args, GraphSource};

/// Stations listed per saturation table.
const TOP_N: usize = 10;

// ── Graph loading ─────────────────────────────────────────────────────────────

struct LoadedGraph {
    network:   StationNetwork,
    directory: StationDirectory,
    occupancy: Option<Vec<Option<Occupancy>>>,
}

fn load_graph(source: &GraphSource, config: &SimConfig) -> Result<LoadedGraph> {
    match source {
        GraphSource::Random { stations, edge_prob, graph_seed } => {
            let mut rng = SimRng::new(graph_seed.unwrap_or(config.seed));
            let network = erdos_renyi(*stations, *edge_prob, &mut rng);
            Ok(LoadedGraph {
                directory: StationDirectory::synthetic(network.station_count()),
                network,
                occupancy: None,
            })
        }
        GraphSource::Stations { csv, radius_km } => {
            let records = load_stations_csv(csv)
                .with_context(|| format!("loading stations from {}", csv.display()))?;
            let graph = geographic_from_records(&records, *radius_km)?;
            Ok(LoadedGraph {
                network:   graph.network,
                directory: graph.directory,
                occupancy: Some(graph.occupancy),
            })
        }
    }
}

// ── Observer wrapper that logs step progress ──────────────────────────────────

struct LoggingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
}

impl<W: OutputWriter> LoggingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for LoggingObserver<W> {
    fn on_phase_end(&mut self, step: Step, phase: Phase, stations: &StationStore) {
        self.inner.on_phase_end(step, phase, stations);
    }

    fn on_step_end(&mut self, step: Step, report: &StepReport) {
        self.summary_rows += 1;
        tracing::info!(
            %step,
            central = report.central_picks,
            peripheral = report.peripheral_picks,
            fallback = report.fallback_deposits,
            dropped = report.dropped_deposits,
            unmatched = report.unmatched_withdrawals,
            truck_moved = report.truck.bikes_delivered,
            "step"
        );
        self.inner.on_step_end(step, report);
    }

    fn on_snapshot(&mut self, _step: Step, stations: &StationStore) {
        // Two rows per station: after demand and after the truck pass.
        self.snapshot_rows += 2 * stations.len();
    }

    fn on_sim_end(&mut self, summary: &SimSummary) {
        self.inner.on_sim_end(summary);
    }
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn print_saturation(title: &str, stations: &StationStore, directory: &StationDirectory, which: Counter) {
    let mut saturated = stations.saturated(which);
    saturated.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.station.cmp(&b.station)));

    println!("{title} ({} stations)", saturated.len());
    println!("{:<8} {:<36} {:>10} {:>8}", "Station", "Name", "Centrality", "Count");
    println!("{}", "-".repeat(65));
    for s in saturated.iter().take(TOP_N) {
        println!(
            "{:<8} {:<36} {:>10.3} {:>8}",
            s.station.0,
            directory.name(s.station),
            s.centrality,
            s.count,
        );
    }
    println!();
}

fn print_summary(summary: &SimSummary) {
    println!("Steps: {}  |  Seed: {}", summary.steps, summary.seed);
    println!(
        "Bikes: {} at start, {} at end  |  dropped deposits {}  |  unmatched withdrawals {}",
        summary.bikes_at_start,
        summary.bikes_at_end,
        summary.dropped_deposits,
        summary.unmatched_withdrawals,
    );
    println!(
        "Full events: {} ({} stations)  |  Empty events: {} ({} stations)  |  truck bikes moved: {}",
        summary.total_full,
        summary.stations_ever_full,
        summary.total_empty,
        summary.stations_ever_empty,
        summary.truck_bikes_moved,
    );
    println!();
}

fn print_replicates(summaries: &[SimSummary]) {
    println!(
        "{:<12} {:>8} {:>8} {:>8} {:>10} {:>8}",
        "Seed", "Full", "Empty", "Dropped", "Unmatched", "Truck"
    );
    println!("{}", "-".repeat(60));
    for s in summaries {
        println!(
            "{:<12} {:>8} {:>8} {:>8} {:>10} {:>8}",
            s.seed, s.total_full, s.total_empty, s.dropped_deposits, s.unmatched_withdrawals,
            s.truck_bikes_moved,
        );
    }
    let n = summaries.len().max(1) as f64;
    let mean_full: f64 = summaries.iter().map(|s| s.total_full as f64).sum::<f64>() / n;
    let mean_empty: f64 = summaries.iter().map(|s| s.total_empty as f64).sum::<f64>() / n;
    println!("{}", "-".repeat(60));
    println!("{:<12} {:>8.1} {:>8.1}", "mean", mean_full, mean_empty);
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bikeshare=info")),
        )
        .init();

    let args = Args::parse();
    let config = args.sim_config()?;

    println!("=== bikeshare — station occupancy simulation ===");
    println!(
        "Steps: {}  |  Riders/step: {}  |  Mode: {:?}  |  Truck runs: {}  |  Seed: {}",
        config.steps, config.riders_per_step, config.rank_mode, config.truck.runs, config.seed
    );

    // 1. Build the station graph.
    let graph = load_graph(&args.graph, &config)?;
    println!(
        "Station network: {} stations, {} edges",
        graph.network.station_count(),
        graph.network.edge_count()
    );
    println!();

    // 2a. Replicate batch: summaries only.
    if let Some(n) = args.replicates {
        let seeds: Vec<u64> = (0..n).map(|i| config.seed.wrapping_add(i)).collect();
        let t0 = Instant::now();
        let summaries = run_replicates(&config, &graph.network, graph.occupancy.as_deref(), &seeds)?;
        tracing::info!(replicates = n, elapsed_s = t0.elapsed().as_secs_f64(), "batch complete");
        print_replicates(&summaries);
        return Ok(());
    }

    // 2b. Single run with output.
    let mut builder = SimBuilder::new(config.clone(), graph.network);
    if let Some(occupancy) = graph.occupancy {
        builder = builder.occupancy(occupancy);
    }
    let mut sim = builder.build()?;
    println!(
        "Boundary index {} of {}  |  total capacity {}  |  bikes {}",
        sim.boundary(),
        sim.ranking.len(),
        sim.stations.total_capacity(),
        sim.stations.total_bikes(),
    );

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let writer = CsvWriter::new(Path::new(&args.output))?;
    let mut obs = LoggingObserver::new(SimOutputObserver::new(writer, &config));

    let t0 = Instant::now();
    let summary = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        return Err(e).with_context(|| format!("writing output to {}", args.output.display()));
    }

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  station_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  step_summaries.csv    : {} rows", obs.summary_rows);
    println!();

    print_summary(&summary);
    print_saturation("Stations that filled up", &sim.stations, &graph.directory, Counter::Full);
    print_saturation("Stations that ran empty", &sim.stations, &graph.directory, Counter::Empty);

    Ok(())
}
