//! Fluent builder for constructing a [`Sim`].

use bs_core::{Occupancy, SimConfig};
use bs_network::{CentralityRanking, StationNetwork, in_degree_centrality};
use bs_station::StationStore;

use crate::{DemandFlow, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — steps, seed, riders per step, ratios, truck settings, …
/// - [`StationNetwork`] — from [`bs_network::erdos_renyi`],
///   [`bs_network::geographic`] or a [`bs_network::StationNetworkBuilder`]
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                            |
/// |------------------|----------------------------------------------------|
/// | `.occupancy(v)`  | Every station sized from centrality, half free     |
///
/// # Example
///
/// ```rust,ignore
/// let mut rng = SimRng::new(7);
/// let network = erdos_renyi(50, 0.3, &mut rng);
/// let mut sim = SimBuilder::new(config, network).build()?;
/// let summary = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config:    SimConfig,
    network:   StationNetwork,
    occupancy: Option<Vec<Option<Occupancy>>>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, network: StationNetwork) -> Self {
        Self { config, network, occupancy: None }
    }

    /// Supply per-station capacity and free docks (must be length
    /// `station_count`).
    ///
    /// Stations given `None` are sized from centrality:
    /// `round(centrality * 10) * 10` docks, half of them free.
    pub fn occupancy(mut self, occupancy: Vec<Option<Occupancy>>) -> Self {
        self.occupancy = Some(occupancy);
        self
    }

    /// Validate inputs, compute centrality and the ranking, initialise the
    /// station store, and return a ready-to-run [`Sim`].
    ///
    /// # Errors
    ///
    /// Every precondition the step loop relies on is checked here: a valid
    /// configuration, a non-empty network of at least three stations, a
    /// boundary index leaving both random pools non-empty, matching
    /// occupancy length, consistent occupancy, and non-zero total capacity.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let station_count = self.network.station_count();
        if station_count == 0 {
            return Err(SimError::EmptyNetwork);
        }

        // ── Centrality and ranking ────────────────────────────────────────
        let centrality = in_degree_centrality(&self.network);
        let ranking = CentralityRanking::new(&centrality, self.config.rank_mode);
        let len = ranking.len();
        if len < 3 {
            return Err(SimError::DegenerateRanking { len });
        }
        let boundary = ranking.boundary(self.config.centre_ratio);
        if boundary < 1 || boundary > len - 2 {
            return Err(SimError::BoundaryOutOfRange { boundary, len });
        }

        // ── Resolve occupancy ─────────────────────────────────────────────
        let supplied = match self.occupancy {
            Some(o) => {
                if o.len() != station_count {
                    return Err(SimError::CountMismatch {
                        expected: station_count,
                        got:      o.len(),
                        what:     "station occupancy",
                    });
                }
                o
            }
            None => vec![None; station_count],
        };
        let occupancy: Vec<Occupancy> = supplied
            .iter()
            .zip(&centrality)
            .map(|(occ, &c)| occ.unwrap_or_else(|| Occupancy::from_centrality(c)))
            .collect();

        let stations = StationStore::new(&occupancy, &centrality)?;
        if stations.total_capacity() == 0 {
            return Err(SimError::ZeroCapacity);
        }

        let demand = DemandFlow::new(&self.config, &ranking, boundary);
        tracing::debug!(
            stations = station_count,
            edges = self.network.edge_count(),
            boundary,
            boundary_key = demand.boundary_key(),
            capacity = stations.total_capacity(),
            bikes = stations.total_bikes(),
            "simulation initialised"
        );

        Ok(Sim::from_parts(self.config, self.network, ranking, stations, demand))
    }
}
