//! Minimal-waste table combination search.

use serde::Serialize;

use crate::ids::TableId;
use crate::restaurant::FreeTable;

/// Largest number of tables ever combined for one party.
pub const MAX_TABLES_PER_PARTY: usize = 3;

/// The tables picked for a party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatingChoice {
    /// Chosen tables in ascending seat order.
    pub table_ids: Vec<TableId>,
    /// Total seats of the chosen tables.
    pub seats: u32,
    /// Seats left empty (`seats - party_size`).
    pub surplus: u32,
}

/// Picks the smallest group of free tables that seats a party, wasting as
/// few seats as possible.
///
/// Candidates are sorted by seats, then id. Groups of one table are tried
/// first, then pairs, then triples; the first group size with any fit wins.
/// Within that size the group with the least surplus wins, and among equal
/// surpluses the first group met in sorted order.
///
/// # Examples
///
/// ```
/// use tablebook::restaurant::FreeTable;
/// use tablebook::seating::TableAssignmentSolver;
/// use tablebook::TableId;
///
/// let free = [(1, 2), (2, 2), (3, 4), (4, 6)]
///     .map(|(id, seats)| FreeTable { table_id: TableId::new(id), seats });
///
/// let choice = TableAssignmentSolver::solve(&free, 5).unwrap();
/// assert_eq!(choice.table_ids, vec![TableId::new(4)]);
/// assert_eq!(choice.surplus, 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TableAssignmentSolver;

impl TableAssignmentSolver {
    /// Finds the best seating for `party_size`, or `None` when no group of
    /// at most [`MAX_TABLES_PER_PARTY`] tables is large enough.
    #[must_use]
    pub fn solve(free: &[FreeTable], party_size: u32) -> Option<SeatingChoice> {
        let mut candidates = free.to_vec();
        candidates.sort_by_key(|table| (table.seats, table.table_id));

        (1..=MAX_TABLES_PER_PARTY.min(candidates.len()))
            .find_map(|size| Self::best_of_size(&candidates, size, party_size))
    }

    fn best_of_size(candidates: &[FreeTable], size: usize, party_size: u32) -> Option<SeatingChoice> {
        let mut best: Option<SeatingChoice> = None;
        let mut indices: Vec<usize> = (0..size).collect();

        loop {
            let seats = indices
                .iter()
                .fold(0u32, |sum, &i| sum.saturating_add(candidates[i].seats));
            if seats >= party_size {
                let surplus = seats - party_size;
                if best.as_ref().map_or(true, |b| surplus < b.surplus) {
                    best = Some(SeatingChoice {
                        table_ids: indices.iter().map(|&i| candidates[i].table_id).collect(),
                        seats,
                        surplus,
                    });
                }
            }

            if !advance(&mut indices, candidates.len()) {
                return best;
            }
        }
    }
}

/// Steps `indices` to the next k-combination of `0..n` in lexicographic
/// order. Returns false after the last one.
fn advance(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    let Some(pos) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
        return false;
    };
    indices[pos] += 1;
    for i in pos + 1..k {
        indices[i] = indices[i - 1] + 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(spec: &[(i64, u32)]) -> Vec<FreeTable> {
        spec.iter()
            .map(|&(id, seats)| FreeTable {
                table_id: TableId::new(id),
                seats,
            })
            .collect()
    }

    fn ids(choice: &SeatingChoice) -> Vec<i64> {
        choice.table_ids.iter().map(|id| id.value()).collect()
    }

    #[test]
    fn test_single_table_preferred_over_exact_pair() {
        let free = tables(&[(1, 2), (2, 2), (3, 4), (4, 6)]);
        let choice = TableAssignmentSolver::solve(&free, 5).unwrap();
        assert_eq!(ids(&choice), vec![4]);
        assert_eq!(choice.seats, 6);
        assert_eq!(choice.surplus, 1);
    }

    #[test]
    fn test_exact_single_fit() {
        let free = tables(&[(1, 2), (2, 4), (3, 6)]);
        let choice = TableAssignmentSolver::solve(&free, 4).unwrap();
        assert_eq!(ids(&choice), vec![2]);
        assert_eq!(choice.surplus, 0);
    }

    #[test]
    fn test_pair_when_no_single_fits() {
        let free = tables(&[(1, 2), (2, 3), (3, 4)]);
        let choice = TableAssignmentSolver::solve(&free, 6).unwrap();
        assert_eq!(ids(&choice), vec![1, 3]);
        assert_eq!(choice.surplus, 0);
    }

    #[test]
    fn test_tie_goes_to_first_in_sorted_order() {
        // Ids out of order on input; sorted by (seats, id) the two 4s are 3 then 7
        let free = tables(&[(7, 4), (3, 4)]);
        let choice = TableAssignmentSolver::solve(&free, 4).unwrap();
        assert_eq!(ids(&choice), vec![3]);
    }

    #[test]
    fn test_triple() {
        let free = tables(&[(1, 2), (2, 2), (3, 2), (4, 2)]);
        let choice = TableAssignmentSolver::solve(&free, 5).unwrap();
        assert_eq!(ids(&choice), vec![1, 2, 3]);
        assert_eq!(choice.surplus, 1);
    }

    #[test]
    fn test_four_tables_never_considered() {
        let free = tables(&[(1, 2), (2, 2), (3, 2), (4, 2)]);
        assert!(TableAssignmentSolver::solve(&free, 7).is_none());
    }

    #[test]
    fn test_empty_candidates() {
        assert!(TableAssignmentSolver::solve(&[], 1).is_none());
    }

    #[test]
    fn test_advance_enumerates_all_pairs() {
        let mut indices = vec![0, 1];
        let mut seen = vec![indices.clone()];
        while advance(&mut indices, 4) {
            seen.push(indices.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
    }
}
