//! `bs-sim` — step loop orchestrator for the bike-share occupancy simulator.
//!
//! # Step loop
//!
//! ```text
//! for step in 0..config.steps:
//!   ① Demand     — riders_per_step riders, one after another:
//!                    pick central / peripheral station from the ranking,
//!                    dock bikes there (fallback scan when full),
//!                    withdraw the same number from an out-neighbour.
//!   ② Rebalance  — truck runs move bikes out of the most central nearly
//!                  full stations into the emptiest ones (never counted).
//!   ③ Observe    — on_phase_end after ① and ②, on_step_end, on_snapshot.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | `run_replicates` runs replicates on Rayon's thread pool. |
//! | `serde`    | Serialize / deserialize reports and summaries.           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bs_core::{SimConfig, SimRng};
//! use bs_network::erdos_renyi;
//! use bs_sim::{NoopObserver, SimBuilder};
//!
//! let network = erdos_renyi(50, 0.3, &mut SimRng::new(1));
//! let mut sim = SimBuilder::new(SimConfig::default(), network).build()?;
//! let summary = sim.run(&mut NoopObserver);
//! println!("full: {}  empty: {}", summary.total_full, summary.total_empty);
//! ```

pub mod batch;
pub mod builder;
pub mod demand;
pub mod error;
pub mod observer;
pub mod rebalance;
pub mod report;
pub mod sim;


pub use batch::run_replicates;
pub use builder::SimBuilder;
pub use demand::DemandFlow;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use rebalance::TruckPass;
pub use report::{Phase, SimSummary, StepReport, TruckReport};
pub use sim::{Sim, SimState};
