//! Adjacency violation detection and local repair.
//!
//! # Algorithm
//!
//! 1. List every adjacent occupied pair sharing a branch, in slot order.
//! 2. For each pair still violating when reached, try once to relocate the
//!    later examinee, then the earlier one. Candidates are scanned from the
//!    nearest subsequent slot onwards, then the nearest preceding slot
//!    backwards. A candidate is either a placement of another branch (swap)
//!    or a vacant slot in the same room (move).
//! 3. A relocation is accepted only if no touched slot has a same-branch
//!    neighbor afterwards.
//!
//! Each accepted relocation clears at least one violation and creates none,
//! so the violation count never grows. Moves stay inside a room, so room
//! occupancy is unchanged.

use log::debug;

use super::sequence::SeatSequence;

/// Occupied adjacent pairs `(lower, higher)` whose examinees share a branch.
pub(crate) fn find_violations(
    sequence: &SeatSequence<'_>,
    seats: &[Option<usize>],
    branches: &[&str],
) -> Vec<(usize, usize)> {
    sequence
        .edges()
        .filter(|&(a, b)| same_branch(seats, branches, a, b))
        .collect()
}

/// Repairs violations in place and returns the number of relocations made.
pub(crate) fn repair(
    sequence: &SeatSequence<'_>,
    seats: &mut [Option<usize>],
    branches: &[&str],
) -> usize {
    let mut swaps = 0;
    for (a, b) in find_violations(sequence, seats, branches) {
        if !same_branch(seats, branches, a, b) {
            continue;
        }
        let relocation = find_relocation(sequence, seats, branches, b)
            .map(|c| (b, c))
            .or_else(|| find_relocation(sequence, seats, branches, a).map(|c| (a, c)));
        if let Some((x, y)) = relocation {
            debug!(
                "relocating seat {x} to {y} to separate branch {}",
                branch_at(seats, branches, x).unwrap_or_default()
            );
            seats.swap(x, y);
            swaps += 1;
        }
    }
    swaps
}

fn branch_at<'b>(seats: &[Option<usize>], branches: &[&'b str], g: usize) -> Option<&'b str> {
    seats[g].map(|e| branches[e])
}

fn same_branch(seats: &[Option<usize>], branches: &[&str], a: usize, b: usize) -> bool {
    match (branch_at(seats, branches, a), branch_at(seats, branches, b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Nearest slot `target` can be relocated to without leaving a conflict at
/// either end: another branch's placement anywhere, or a vacant slot in the
/// same room.
fn find_relocation(
    sequence: &SeatSequence<'_>,
    seats: &[Option<usize>],
    branches: &[&str],
    target: usize,
) -> Option<usize> {
    let target_branch = branch_at(seats, branches, target)?;
    let room = sequence.room_of(target);
    let after = (target + 1)..seats.len();
    let before = (0..target).rev();

    after
        .chain(before)
        .find(|&c| match branch_at(seats, branches, c) {
            Some(branch) if branch != target_branch => {
                clean_at(sequence, seats, branches, target, c, branch)
                    && clean_at(sequence, seats, branches, c, target, target_branch)
            }
            Some(_) => false,
            None => {
                sequence.room_of(c) == room
                    && clean_at(sequence, seats, branches, c, target, target_branch)
            }
        })
}

/// Whether `incoming` placed at `slot` would have no same-branch neighbor,
/// ignoring `other`, the slot it trades places with.
fn clean_at(
    sequence: &SeatSequence<'_>,
    seats: &[Option<usize>],
    branches: &[&str],
    slot: usize,
    other: usize,
    incoming: &str,
) -> bool {
    sequence
        .neighbors(slot)
        .filter(|&n| n != other)
        .all(|n| branch_at(seats, branches, n) != Some(incoming))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Density, Room, SeatPlan};
    use crate::plan::build_seat_plan;

    fn row_plan(columns: u32) -> Vec<SeatPlan> {
        let room = Room::new("R1", columns as i32).with_layout(1, columns);
        vec![build_seat_plan(&room, Density::Dense, 0).unwrap()]
    }

    #[test]
    fn test_find_violations() {
        let plans = row_plan(4);
        let seq = SeatSequence::new(&plans);
        let branches = ["CS", "CS", "EE", "EE"];
        let seats = vec![Some(0), Some(1), Some(2), Some(3)];

        assert_eq!(find_violations(&seq, &seats, &branches), vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn test_empty_seats_never_violate() {
        let plans = row_plan(3);
        let seq = SeatSequence::new(&plans);
        let branches = ["CS", "CS"];
        let seats = vec![Some(0), None, Some(1)];

        assert!(find_violations(&seq, &seats, &branches).is_empty());
    }

    #[test]
    fn test_repair_swaps_with_nearest_subsequent() {
        // CS CS EE ME -> CS EE CS ME
        let plans = row_plan(4);
        let seq = SeatSequence::new(&plans);
        let branches = ["CS", "CS", "EE", "ME"];
        let mut seats = vec![Some(0), Some(1), Some(2), Some(3)];

        let swaps = repair(&seq, &mut seats, &branches);
        assert_eq!(swaps, 1);
        assert_eq!(seats, vec![Some(0), Some(2), Some(1), Some(3)]);
        assert!(find_violations(&seq, &seats, &branches).is_empty());
    }

    #[test]
    fn test_repair_falls_back_to_preceding_slots() {
        // EE ME CS CS -> CS ME CS EE: nothing follows the last seat.
        let plans = row_plan(4);
        let seq = SeatSequence::new(&plans);
        let branches = ["EE", "ME", "CS", "CS"];
        let mut seats = vec![Some(0), Some(1), Some(2), Some(3)];

        assert_eq!(find_violations(&seq, &seats, &branches).len(), 1);
        assert_eq!(repair(&seq, &mut seats, &branches), 1);
        assert_eq!(seats, vec![Some(3), Some(1), Some(2), Some(0)]);
        assert!(find_violations(&seq, &seats, &branches).is_empty());
    }

    #[test]
    fn test_repair_moves_into_vacant_seat() {
        // CS CS - - -> CS - CS -
        let plans = row_plan(4);
        let seq = SeatSequence::new(&plans);
        let branches = ["CS", "CS"];
        let mut seats = vec![Some(0), Some(1), None, None];

        assert_eq!(repair(&seq, &mut seats, &branches), 1);
        assert_eq!(seats, vec![Some(0), None, Some(1), None]);
        assert!(find_violations(&seq, &seats, &branches).is_empty());
    }

    #[test]
    fn test_vacant_seat_in_other_room_not_used() {
        let plans = vec![
            build_seat_plan(&Room::new("R1", 2).with_layout(1, 2), Density::Dense, 0).unwrap(),
            build_seat_plan(&Room::new("R2", 2).with_layout(1, 2), Density::Dense, 0).unwrap(),
        ];
        let seq = SeatSequence::new(&plans);
        let branches = ["CS", "CS"];
        let mut seats = vec![Some(0), Some(1), None, None];

        assert_eq!(repair(&seq, &mut seats, &branches), 0);
        assert_eq!(seats, vec![Some(0), Some(1), None, None]);
    }

    #[test]
    fn test_unrepairable_left_in_place() {
        let plans = row_plan(3);
        let seq = SeatSequence::new(&plans);
        let branches = ["CS", "CS", "CS"];
        let mut seats = vec![Some(0), Some(1), Some(2)];

        assert_eq!(repair(&seq, &mut seats, &branches), 0);
        assert_eq!(find_violations(&seq, &seats, &branches).len(), 2);
    }
}
