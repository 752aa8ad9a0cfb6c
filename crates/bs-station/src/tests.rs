mod helpers {
    use bs_core::Occupancy;

    use crate::StationStore;

    /// Stations with the given `(total_capacity, spaces_free)` and zero centrality.
    pub fn store(occ: &[(u32, u32)]) -> StationStore {
        let occupancy: Vec<Occupancy> = occ
            .iter()
            .map(|&(total_capacity, spaces_free)| Occupancy { total_capacity, spaces_free })
            .collect();
        let centrality = vec![0.0; occupancy.len()];
        StationStore::new(&occupancy, &centrality).unwrap()
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

mod construction {
    use bs_core::{Occupancy, StationId};

    use crate::{StationError, StationStore};

    #[test]
    fn from_centrality_couples_capacity() {
        let store = StationStore::from_centrality(&[1.0, 0.25, 0.0]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(StationId(0)).total_capacity(), 100);
        assert_eq!(store.get(StationId(0)).spaces_free(), 50);
        assert_eq!(store.get(StationId(1)).total_capacity(), 30);
        assert_eq!(store.get(StationId(1)).spaces_free(), 15);
        assert_eq!(store.get(StationId(2)).total_capacity(), 0);
        assert_eq!(store.get(StationId(1)).centrality(), 0.25);
        assert_eq!(store.total_capacity(), 130);
        assert_eq!(store.total_bikes(), 65);
    }

    #[test]
    fn length_mismatch_rejected() {
        let occ = [Occupancy::half_free(10)];
        let err = StationStore::new(&occ, &[0.5, 0.5]).unwrap_err();
        assert!(matches!(err, StationError::LengthMismatch { expected: 2, got: 1, .. }));
    }

    #[test]
    fn inconsistent_occupancy_rejected() {
        let occ = [Occupancy::half_free(10), Occupancy { total_capacity: 4, spaces_free: 5 }];
        let err = StationStore::new(&occ, &[0.0, 0.0]).unwrap_err();
        assert!(matches!(err, StationError::Inconsistent { station: StationId(1), .. }));
    }
}

// ── Capacity primitives ───────────────────────────────────────────────────────

mod primitives {
    use bs_core::StationId;

    use super::helpers::store;
    use crate::{Actor, Counter};

    const S: StationId = StationId(0);

    #[test]
    fn take_space_success() {
        let mut st = store(&[(10, 5)]);
        assert!(st.try_take_space(S, 3, Actor::Rider));
        assert_eq!(st.spaces_free(S), 2);
        assert_eq!(st.bikes_present(S), 8);
        assert_eq!(st.get(S).full_count(), 0);
    }

    #[test]
    fn take_space_failure_counts_full() {
        let mut st = store(&[(10, 0)]);
        assert!(!st.try_take_space(S, 1, Actor::Rider));
        assert_eq!(st.spaces_free(S), 0);
        assert_eq!(st.get(S).full_count(), 1);
        assert_eq!(st.get(S).empty_count(), 0);
    }

    #[test]
    fn take_last_space_counts_full() {
        let mut st = store(&[(10, 2)]);
        assert!(st.try_take_space(S, 2, Actor::Rider));
        assert!(st.get(S).is_full());
        assert_eq!(st.get(S).full_count(), 1);
    }

    #[test]
    fn release_space_failure_counts_empty() {
        let mut st = store(&[(10, 8)]);
        assert!(!st.try_release_space(S, 3, Actor::Rider));
        assert_eq!(st.spaces_free(S), 8);
        assert_eq!(st.get(S).empty_count(), 1);
    }

    #[test]
    fn release_last_bike_counts_empty() {
        let mut st = store(&[(10, 9)]);
        assert!(st.try_release_space(S, 1, Actor::Rider));
        assert!(st.get(S).is_empty());
        assert_eq!(st.get(S).empty_count(), 1);
        assert_eq!(st.get(S).full_count(), 0);
    }

    #[test]
    fn truck_never_counts() {
        let mut st = store(&[(10, 1)]);
        assert!(!st.try_take_space(S, 2, Actor::Truck));
        assert!(st.try_take_space(S, 1, Actor::Truck));
        assert!(st.try_release_space(S, 10, Actor::Truck));
        assert!(!st.try_release_space(S, 1, Actor::Truck));
        assert_eq!(st.total(Counter::Full), 0);
        assert_eq!(st.total(Counter::Empty), 0);
        assert_eq!(st.spaces_free(S), 10);
    }

    #[test]
    fn zero_request_is_noop() {
        let mut st = store(&[(10, 0)]);
        assert!(st.try_take_space(S, 0, Actor::Rider));
        assert!(st.try_release_space(S, 0, Actor::Rider));
        assert_eq!(st.spaces_free(S), 0);
        assert_eq!(st.get(S).full_count(), 0);
    }

    #[test]
    fn saturated_lists_nonzero_counters() {
        let mut st = store(&[(10, 0), (10, 5), (10, 10)]);
        st.try_take_space(StationId(0), 1, Actor::Rider);
        st.try_release_space(StationId(2), 1, Actor::Rider);
        st.try_release_space(StationId(2), 1, Actor::Rider);

        let full = st.saturated(Counter::Full);
        assert_eq!(full.len(), 1);
        assert_eq!(full[0].station, StationId(0));
        assert_eq!(full[0].count, 1);

        let empty = st.saturated(Counter::Empty);
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].station, StationId(2));
        assert_eq!(empty[0].count, 2);

        st.reset_counters();
        assert!(st.saturated(Counter::Full).is_empty());
        assert!(st.saturated(Counter::Empty).is_empty());
        assert_eq!(st.spaces_free(StationId(1)), 5);
    }
}

// ── Scans ─────────────────────────────────────────────────────────────────────

mod scans {
    use bs_core::StationId;

    use super::helpers::store;
    use crate::{Actor, Counter, deposit_along, release_at_first, take_at_first};

    fn ids(raw: &[u32]) -> Vec<StationId> {
        raw.iter().map(|&i| StationId(i)).collect()
    }

    #[test]
    fn deposit_skips_full_without_counting() {
        let mut st = store(&[(10, 0), (10, 2), (10, 5)]);
        let out = deposit_along(&mut st, ids(&[0, 1, 2]), 4, Actor::Truck);
        assert_eq!(out.moved, 4);
        assert_eq!(out.first, Some(StationId(1)));
        assert_eq!(st.spaces_free(StationId(0)), 0);
        assert_eq!(st.spaces_free(StationId(1)), 0);
        assert_eq!(st.spaces_free(StationId(2)), 3);
        assert_eq!(st.total(Counter::Full), 0);
    }

    #[test]
    fn deposit_rider_counts_only_filled_station() {
        let mut st = store(&[(10, 0), (10, 1), (10, 5)]);
        let out = deposit_along(&mut st, ids(&[0, 1, 2]), 1, Actor::Rider);
        assert!(out.is_complete(1));
        assert_eq!(st.get(StationId(0)).full_count(), 0);
        assert_eq!(st.get(StationId(1)).full_count(), 1);
    }

    #[test]
    fn deposit_partial_when_network_full() {
        let mut st = store(&[(10, 1), (10, 0)]);
        let out = deposit_along(&mut st, ids(&[0, 1]), 3, Actor::Truck);
        assert_eq!(out.moved, 1);
        assert!(!out.is_complete(3));
    }

    #[test]
    fn take_at_first_needs_whole_request() {
        let mut st = store(&[(10, 1), (10, 0), (10, 3)]);
        let got = take_at_first(&mut st, ids(&[0, 1, 2]), 2, Actor::Rider);
        assert_eq!(got, Some(StationId(2)));
        assert_eq!(st.spaces_free(StationId(0)), 1);
        assert_eq!(st.spaces_free(StationId(2)), 1);
        assert_eq!(st.total(Counter::Full), 0);

        assert_eq!(take_at_first(&mut st, ids(&[0, 1, 2]), 5, Actor::Rider), None);
        assert_eq!(st.total(Counter::Full), 0);
    }

    #[test]
    fn release_at_first_picks_qualifying_neighbour() {
        let mut st = store(&[(10, 10), (10, 5)]);
        let got = release_at_first(&mut st, &ids(&[0, 1]), 2, Actor::Rider);
        assert_eq!(got, Some(StationId(1)));
        assert_eq!(st.bikes_present(StationId(1)), 3);
        assert_eq!(st.total(Counter::Empty), 0);
    }

    #[test]
    fn release_at_first_records_failure_on_head() {
        let mut st = store(&[(10, 10), (10, 9)]);
        let got = release_at_first(&mut st, &ids(&[0, 1]), 2, Actor::Rider);
        assert_eq!(got, None);
        assert_eq!(st.get(StationId(0)).empty_count(), 1);
        assert_eq!(st.get(StationId(1)).empty_count(), 0);
        assert_eq!(st.total_bikes(), 1);
    }

    #[test]
    fn release_at_first_without_candidates() {
        let mut st = store(&[(10, 10)]);
        assert_eq!(release_at_first(&mut st, &[], 1, Actor::Rider), None);
        assert_eq!(st.total(Counter::Empty), 0);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

mod properties {
    use bs_core::{Occupancy, StationId};
    use proptest::prelude::*;

    use crate::{Actor, Counter, StationStore};

    #[derive(Debug, Clone)]
    struct Op {
        station: usize,
        n:       u32,
        take:    bool,
        rider:   bool,
    }

    fn op() -> impl Strategy<Value = Op> {
        (0usize..4, 0u32..6, any::<bool>(), any::<bool>())
            .prop_map(|(station, n, take, rider)| Op { station, n, take, rider })
    }

    fn occupancy() -> impl Strategy<Value = Vec<Occupancy>> {
        prop::collection::vec(
            (0u32..12).prop_flat_map(|cap| {
                (Just(cap), 0..=cap).prop_map(|(total_capacity, spaces_free)| Occupancy {
                    total_capacity,
                    spaces_free,
                })
            }),
            4,
        )
    }

    proptest! {
        #[test]
        fn primitives_preserve_bounds_and_monotonic_counters(
            occ in occupancy(),
            ops in prop::collection::vec(op(), 0..64),
        ) {
            let mut st = StationStore::new(&occ, &[0.0; 4]).unwrap();
            let mut prev_full = st.total(Counter::Full);
            let mut prev_empty = st.total(Counter::Empty);
            for o in ops {
                let id = StationId(o.station as u32);
                let actor = if o.rider { Actor::Rider } else { Actor::Truck };
                let before = st.total_bikes();
                let ok = if o.take {
                    st.try_take_space(id, o.n, actor)
                } else {
                    st.try_release_space(id, o.n, actor)
                };
                let after = st.total_bikes();
                match (ok, o.take) {
                    (true, true)  => prop_assert_eq!(after, before + o.n as u64),
                    (true, false) => prop_assert_eq!(after + o.n as u64, before),
                    (false, _)    => prop_assert_eq!(after, before),
                }
                prop_assert!(st.is_consistent());

                let full = st.total(Counter::Full);
                let empty = st.total(Counter::Empty);
                prop_assert!(full >= prev_full && empty >= prev_empty);
                if !o.rider {
                    prop_assert_eq!(full, prev_full);
                    prop_assert_eq!(empty, prev_empty);
                }
                prev_full = full;
                prev_empty = empty;
            }
        }
    }
}
