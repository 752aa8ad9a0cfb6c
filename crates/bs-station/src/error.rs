use bs_core::StationId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationError {
    #[error("{what} length {got} does not match station count {expected}")]
    LengthMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("{station} has {spaces_free} free docks but only {total_capacity} in total")]
    Inconsistent {
        station:        StationId,
        spaces_free:    u32,
        total_capacity: u32,
    },
}

pub type StationResult<T> = Result<T, StationError>;
