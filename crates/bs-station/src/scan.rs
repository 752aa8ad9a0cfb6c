//! Ordered scans built from the capacity primitives.
//!
//! Scans call a primitive only on stations that can accept the request, so
//! they never record a speculative failure against a station the scan
//! merely passed over.

use bs_core::StationId;

use crate::{Actor, StationStore};

/// Result of a multi-station scan.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Bikes placed.
    pub moved: u32,
    /// First station that took part, if any.
    pub first: Option<StationId>,
}

impl ScanOutcome {
    pub fn is_complete(&self, requested: u32) -> bool {
        self.moved == requested
    }
}

/// Dock up to `bikes` along `order`, placing `min(remaining, spaces_free)`
/// at each station with room until the bikes are exhausted.
pub fn deposit_along<I>(store: &mut StationStore, order: I, bikes: u32, actor: Actor) -> ScanOutcome
where
    I: IntoIterator<Item = StationId>,
{
    let mut out = ScanOutcome::default();
    for id in order {
        let remaining = bikes - out.moved;
        if remaining == 0 {
            break;
        }
        let n = remaining.min(store.spaces_free(id));
        if n > 0 && store.try_take_space(id, n, actor) {
            out.moved += n;
            out.first.get_or_insert(id);
        }
    }
    out
}

/// Take all `n` bikes from the first candidate holding at least `n`.
///
/// When no candidate qualifies, the release is attempted at the first
/// candidate anyway so the failure is recorded there, and `None` is
/// returned.  An empty candidate list records nothing.
pub fn release_at_first(
    store:      &mut StationStore,
    candidates: &[StationId],
    n:          u32,
    actor:      Actor,
) -> Option<StationId> {
    let &head = candidates.first()?;
    match candidates.iter().copied().find(|&id| store.bikes_present(id) >= n) {
        Some(id) => {
            store.try_release_space(id, n, actor);
            Some(id)
        }
        None => {
            store.try_release_space(head, n, actor);
            None
        }
    }
}

/// Dock all `n` bikes at the first station along `order` with at least `n`
/// free docks.  Returns that station, or `None` when no station qualifies
/// (nothing is recorded in that case).
pub fn take_at_first<I>(store: &mut StationStore, order: I, n: u32, actor: Actor) -> Option<StationId>
where
    I: IntoIterator<Item = StationId>,
{
    let id = order.into_iter().find(|&id| store.spaces_free(id) >= n)?;
    store.try_take_space(id, n, actor);
    Some(id)
}
