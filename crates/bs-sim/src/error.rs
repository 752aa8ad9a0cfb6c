use bs_core::BsError;
use bs_station::StationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] BsError),

    #[error("station network has no stations")]
    EmptyNetwork,

    #[error("station network has zero total docking capacity")]
    ZeroCapacity,

    #[error("centrality ranking of length {len} is degenerate (need at least 3 stations)")]
    DegenerateRanking { len: usize },

    #[error("boundary index {boundary} leaves an empty central or peripheral pool for ranking length {len}")]
    BoundaryOutOfRange { boundary: usize, len: usize },

    #[error("{what} length {got} does not match station count {expected}")]
    CountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("station store error: {0}")]
    Station(#[from] StationError),
}

pub type SimResult<T> = Result<T, SimError>;
