//! Property-based tests for `Reservation` and `ReservationStatus`.

use super::{Reservation, ReservationDraft, ReservationStatus};
use crate::ids::{ReservationId, RestaurantId, TableId, UserId};
use crate::schedule::{ClockTime, TimeWindow};
use chrono::NaiveDate;
use proptest::prelude::*;

fn status_strategy() -> impl Strategy<Value = ReservationStatus> {
    prop::sample::select(ReservationStatus::ALL.to_vec())
}

fn draft(party_size: u32, duration: u32) -> ReservationDraft {
    let start = NaiveDate::from_ymd_opt(2025, 6, 2)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap();
    ReservationDraft {
        restaurant_id: RestaurantId::new(1),
        user_id: UserId::new(1),
        window: TimeWindow::starting_at(start, duration).unwrap(),
        time: ClockTime::from_naive_time(start.time()),
        party_size,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Any walk along allowed edges is short and ends where it cannot move
    #[test]
    fn status_walks_terminate(steps in prop::collection::vec(status_strategy(), 0..10)) {
        let mut current = ReservationStatus::Pending;
        let mut taken = 0;
        for target in steps {
            if current.can_transition_to(target) {
                current = target;
                taken += 1;
            }
        }
        prop_assert!(taken <= 2);
        if current.is_terminal() {
            prop_assert!(ReservationStatus::ALL.iter().all(|s| !current.can_transition_to(*s)));
        }
    }

    // Every edge out of an active status either keeps it active or releases tables
    #[test]
    fn edges_release_exactly_when_leaving_active(from in status_strategy(), to in status_strategy()) {
        if from.can_transition_to(to) {
            prop_assert!(from.is_active());
            prop_assert_eq!(to.releases_tables(), !to.is_active());
        }
    }

    // Display and FromStr agree, whatever the case
    #[test]
    fn status_text_round_trip(status in status_strategy(), lower in any::<bool>()) {
        let text = if lower { status.as_str().to_lowercase() } else { status.to_string() };
        prop_assert_eq!(text.parse::<ReservationStatus>().unwrap(), status);
    }

    // Built reservations keep their tables sorted and unique
    #[test]
    fn builder_normalizes_tables(
        ids in prop::collection::vec(1i64..20, 0..8),
        party in 1u32..30,
        duration in 1u32..600
    ) {
        let reservation = Reservation::builder(ReservationId::new(1), draft(party, duration))
            .table_ids(ids.iter().copied().map(TableId::new).collect())
            .build()
            .unwrap();

        let tables = reservation.table_ids();
        prop_assert!(tables.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(ids.iter().all(|id| tables.contains(&TableId::new(*id))));
        prop_assert_eq!(reservation.duration_minutes(), i64::from(duration));
    }

    // Terminal reservations never carry tables
    #[test]
    fn terminal_reservations_reject_tables(status in status_strategy(), id in 1i64..100) {
        let result = Reservation::builder(ReservationId::new(1), draft(2, 90))
            .status(status)
            .table_ids(vec![TableId::new(id)])
            .build();
        prop_assert_eq!(result.is_ok(), status.is_active());
    }
}
