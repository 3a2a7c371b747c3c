//! Room re-seating for conflicts repair leaves behind.
//!
//! # Algorithm
//!
//! For every room that still holds a violation:
//!
//! 1. Two-color the room's seat graph breadth-first from slot 0 (dense grids
//!    and sparse rows are both bipartite), giving a checkerboard.
//! 2. Order the room's occupants by branch size within the room (largest
//!    first, ties by code), then by roll number.
//! 3. Seat them along the first color's slots, then the second color's,
//!    in plan order. A branch that fits in one color class is never
//!    adjacent to itself.
//! 4. Keep the new seating only if the room has strictly fewer violations.
//!
//! The set of examinees in each room is unchanged.
//!
//! # Complexity
//! O(s · d + k log k) per room for s slots, degree d and k occupants.

use std::cmp::Reverse;
use std::collections::{HashMap, VecDeque};

use log::debug;

use super::sequence::SeatSequence;
use crate::models::{Examinee, SeatPlan};

/// Re-seats rooms with remaining violations and returns how many changed.
pub(crate) fn reseat_rooms(
    sequence: &SeatSequence<'_>,
    seats: &mut [Option<usize>],
    roster: &[&Examinee],
) -> usize {
    let mut changed = 0;
    for p in 0..sequence.room_count() {
        let current = room_violations(sequence, seats, roster, p);
        if current == 0 {
            continue;
        }

        let range = sequence.room_range(p);
        let mut occupants: Vec<usize> = seats[range.clone()].iter().flatten().copied().collect();
        let mut sizes: HashMap<&str, usize> = HashMap::new();
        for &e in &occupants {
            *sizes.entry(roster[e].branch_code()).or_default() += 1;
        }
        occupants.sort_by_key(|&e| {
            let branch = roster[e].branch_code();
            (Reverse(sizes[branch]), branch, roster[e].roll.as_str())
        });

        let mut trial = seats.to_vec();
        trial[range.clone()].fill(None);
        for (local, e) in checkerboard_order(sequence.room_plan(p))
            .into_iter()
            .zip(occupants)
        {
            trial[range.start + local] = Some(e);
        }

        let reseated = room_violations(sequence, &trial, roster, p);
        if reseated < current {
            debug!(
                "re-seated room {}: {current} -> {reseated} violation(s)",
                sequence.room_plan(p).room_id
            );
            seats[range.clone()].copy_from_slice(&trial[range]);
            changed += 1;
        }
    }
    changed
}

fn room_violations(
    sequence: &SeatSequence<'_>,
    seats: &[Option<usize>],
    roster: &[&Examinee],
    p: usize,
) -> usize {
    sequence
        .room_edges(p)
        .filter(|&(a, b)| match (seats[a], seats[b]) {
            (Some(x), Some(y)) => roster[x].branch_code() == roster[y].branch_code(),
            _ => false,
        })
        .count()
}

/// Local slot indices, first color class then second, each in plan order.
fn checkerboard_order(plan: &SeatPlan) -> Vec<usize> {
    let mut color: Vec<Option<bool>> = vec![None; plan.capacity()];
    for start in 0..plan.capacity() {
        if color[start].is_some() {
            continue;
        }
        color[start] = Some(false);
        let mut queue = VecDeque::from([start]);
        while let Some(u) = queue.pop_front() {
            let next = color[u].map(|c| !c);
            for &v in plan.neighbors(u) {
                if color[v].is_none() {
                    color[v] = next;
                    queue.push_back(v);
                }
            }
        }
    }

    let (first, second): (Vec<usize>, Vec<usize>) =
        (0..plan.capacity()).partition(|&i| color[i] == Some(false));
    first.into_iter().chain(second).collect()
}
