//! Independent replicate runs over one network.

use bs_core::{Occupancy, SimConfig};
use bs_network::StationNetwork;

use crate::{NoopObserver, SimBuilder, SimResult, SimSummary};

/// Run one complete simulation per seed and return their summaries in seed
/// order.
///
/// Every replicate gets its own copy of `network` and its own station store,
/// seeded with `seeds[i]`.  With the `parallel` feature the replicates run
/// on Rayon's thread pool; riders inside a replicate are still processed
/// sequentially, so results are identical with and without the feature.
///
/// # Errors
///
/// The first build error encountered (all replicates share the same inputs,
/// so either all build or none do).
pub fn run_replicates(
    config:    &SimConfig,
    network:   &StationNetwork,
    occupancy: Option<&[Option<Occupancy>]>,
    seeds:     &[u64],
) -> SimResult<Vec<SimSummary>> {
    let replicate = |seed: u64| -> SimResult<SimSummary> {
        let config = SimConfig { seed, ..config.clone() };
        let mut builder = SimBuilder::new(config, network.clone());
        if let Some(occ) = occupancy {
            builder = builder.occupancy(occ.to_vec());
        }
        let mut sim = builder.build()?;
        Ok(sim.run(&mut NoopObserver))
    };

    #[cfg(not(feature = "parallel"))]
    {
        seeds.iter().map(|&seed| replicate(seed)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        seeds.par_iter().map(|&seed| replicate(seed)).collect()
    }
}
