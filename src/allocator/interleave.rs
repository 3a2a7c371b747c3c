//! Branch grouping and round-robin interleaving.
//!
//! # Algorithm
//!
//! 1. Group the day's roster by branch. Branches are ordered by descending
//!    size, ties by branch code; members by roll number.
//! 2. Walk the global seating sequence from the first slot. For each slot
//!    take the next examinee of the next branch in rotation, skipping
//!    exhausted branches.
//! 3. A branch that would sit next to an already-seated examinee of the same
//!    branch is passed over in favor of the next one in rotation that does
//!    not conflict. When every remaining branch conflicts, the one with the
//!    most examinees left is used anyway (rotation breaks ties) and the
//!    repair pass deals with it.
//!
//! With [`InterleaveRule::LargestFirst`] step 2 picks, among the
//! non-conflicting branches, the one with the most examinees left; the
//! rotation only breaks ties. This keeps a dominant branch from piling up
//! at the end of the sequence.
//!
//! The rotation starts at branch `phase mod branch_count`, so successive
//! days rotate the starting branch.
//!
//! # Complexity
//! O(n · b · d) for n examinees, b branches and slot degree d (≤ 4).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::sequence::SeatSequence;
use crate::models::Examinee;

/// How the next branch is picked for each slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterleaveRule {
    /// Strict rotation over branches.
    #[default]
    RoundRobin,
    /// Branch with the most examinees left; rotation breaks ties.
    LargestFirst,
}

impl InterleaveRule {
    fn prefers(self, candidate: &BranchGroup<'_>, current: &BranchGroup<'_>) -> bool {
        match self {
            InterleaveRule::RoundRobin => false,
            InterleaveRule::LargestFirst => candidate.remaining() > current.remaining(),
        }
    }
}

/// Examinees of one branch, consumed front to back.
#[derive(Debug, Clone)]
pub(crate) struct BranchGroup<'a> {
    pub(crate) code: &'a str,
    members: Vec<usize>,
    next: usize,
}

impl BranchGroup<'_> {
    fn remaining(&self) -> usize {
        self.members.len() - self.next
    }

    fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self) -> Option<usize> {
        let member = self.members.get(self.next).copied()?;
        self.next += 1;
        Some(member)
    }
}

/// Groups roster indices by branch in allocation order.
pub(crate) fn group_by_branch<'a>(roster: &[&'a Examinee]) -> Vec<BranchGroup<'a>> {
    let mut by_code: BTreeMap<&'a str, Vec<usize>> = BTreeMap::new();
    for (i, e) in roster.iter().enumerate() {
        by_code.entry(e.branch_code()).or_default().push(i);
    }

    let mut groups: Vec<BranchGroup<'a>> = by_code
        .into_iter()
        .map(|(code, mut members)| {
            members.sort_by(|&a, &b| roster[a].roll.cmp(&roster[b].roll));
            BranchGroup {
                code,
                members,
                next: 0,
            }
        })
        .collect();

    // Stable: equal sizes keep ascending code order from the BTreeMap.
    groups.sort_by(|a, b| b.members.len().cmp(&a.members.len()));
    groups
}

/// Seats every grouped examinee along `sequence`, starting at slot 0.
///
/// Returns the occupant (roster index) of each global slot. The caller
/// guarantees the sequence is long enough for the roster.
pub(crate) fn interleave(
    sequence: &SeatSequence<'_>,
    groups: &mut [BranchGroup<'_>],
    phase: usize,
    rule: InterleaveRule,
) -> Vec<Option<usize>> {
    let mut seats: Vec<Option<usize>> = vec![None; sequence.len()];
    let mut branch_of_seat: Vec<Option<usize>> = vec![None; sequence.len()];
    if groups.is_empty() {
        return seats;
    }

    let count = groups.len();
    let total: usize = groups.iter().map(BranchGroup::remaining).sum();
    let mut cursor = phase % count;

    for g in 0..total.min(sequence.len()) {
        let mut fallback: Option<usize> = None;
        let mut chosen: Option<usize> = None;
        for step in 0..count {
            let b = (cursor + step) % count;
            if groups[b].is_exhausted() {
                continue;
            }
            if fallback.map_or(true, |f| groups[b].remaining() > groups[f].remaining()) {
                fallback = Some(b);
            }
            let conflicts = sequence
                .neighbors(g)
                .any(|n| branch_of_seat[n] == Some(b));
            if conflicts {
                continue;
            }
            if chosen.map_or(true, |c| rule.prefers(&groups[b], &groups[c])) {
                chosen = Some(b);
            }
            if rule == InterleaveRule::RoundRobin {
                break;
            }
        }

        let Some(b) = chosen.or(fallback) else {
            break;
        };
        seats[g] = groups[b].take();
        branch_of_seat[g] = Some(b);
        cursor = (b + 1) % count;
    }

    seats
}
