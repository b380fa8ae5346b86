//! Property-based tests for the table combination search.

use std::collections::HashSet;

use proptest::prelude::*;

use super::{TableAssignmentSolver, MAX_TABLES_PER_PARTY};
use crate::ids::TableId;
use crate::restaurant::FreeTable;

fn free_tables_strategy() -> impl Strategy<Value = Vec<FreeTable>> {
    prop::collection::vec(1u32..=12, 0..8).prop_map(|seats| {
        seats
            .into_iter()
            .enumerate()
            .map(|(i, seats)| FreeTable {
                table_id: TableId::new(i64::try_from(i).unwrap() + 1),
                seats,
            })
            .collect()
    })
}

// Every combination of at most three tables, as (size, surplus) pairs.
fn feasible(free: &[FreeTable], party: u32) -> Vec<(usize, u32)> {
    let n = free.len();
    let mut out = Vec::new();
    for a in 0..n {
        let one = free[a].seats;
        if one >= party {
            out.push((1, one - party));
        }
        for b in a + 1..n {
            let two = one + free[b].seats;
            if two >= party {
                out.push((2, two - party));
            }
            for c in b + 1..n {
                let three = two + free[c].seats;
                if three >= party {
                    out.push((3, three - party));
                }
            }
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_choice_seats_the_party(free in free_tables_strategy(), party in 1u32..=30) {
        if let Some(choice) = TableAssignmentSolver::solve(&free, party) {
            prop_assert!(!choice.table_ids.is_empty());
            prop_assert!(choice.table_ids.len() <= MAX_TABLES_PER_PARTY);

            let unique: HashSet<_> = choice.table_ids.iter().collect();
            prop_assert_eq!(unique.len(), choice.table_ids.len());

            let seats: u32 = choice
                .table_ids
                .iter()
                .map(|id| free.iter().find(|t| t.table_id == *id).unwrap().seats)
                .sum();
            prop_assert_eq!(seats, choice.seats);
            prop_assert!(seats >= party);
            prop_assert_eq!(choice.surplus, seats - party);
        }
    }

    #[test]
    fn prop_choice_is_minimal(free in free_tables_strategy(), party in 1u32..=30) {
        let options = feasible(&free, party);
        match TableAssignmentSolver::solve(&free, party) {
            None => prop_assert!(options.is_empty()),
            Some(choice) => {
                let fewest = options.iter().map(|(size, _)| *size).min().unwrap();
                prop_assert_eq!(choice.table_ids.len(), fewest);

                let least = options
                    .iter()
                    .filter(|(size, _)| *size == fewest)
                    .map(|(_, surplus)| *surplus)
                    .min()
                    .unwrap();
                prop_assert_eq!(choice.surplus, least);
            }
        }
    }

    #[test]
    fn prop_input_order_does_not_matter(free in free_tables_strategy(), party in 1u32..=30) {
        let mut reversed = free.clone();
        reversed.reverse();
        prop_assert_eq!(
            TableAssignmentSolver::solve(&free, party),
            TableAssignmentSolver::solve(&reversed, party)
        );
    }
}
