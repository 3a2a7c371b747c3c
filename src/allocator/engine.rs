//! Greedy, deterministic seat allocation for one exam day.
//!
//! # Algorithm
//!
//! 1. Select the day's roster (the whole roster unless the day lists rolls).
//! 2. Reject the day if the roster exceeds the total effective capacity.
//! 3. Group by branch and interleave over the global seating sequence
//!    (rooms in catalog order), rotating the start branch by day.
//! 4. Repair remaining same-branch adjacencies by local swaps or moves into
//!    vacant seats of the same room.
//! 5. Re-seat any room that still has a conflict in checkerboard order when
//!    that lowers its count, then repair once more.
//! 6. Report what could not be repaired as warnings.
//!
//! Every step keeps each room's occupant count, and none increases the
//! number of violations.
//!
//! # Complexity
//! O(n · b) for placement plus O(v · s) for repair and O(s log s) for
//! re-seating, where n is the roster size, b the branch count, s the number
//! of seats and v the number of violations left after placement.

use std::collections::HashSet;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::interleave::{group_by_branch, interleave, InterleaveRule};
use super::repair::{find_violations, repair};
use super::reseat::reseat_rooms;
use super::sequence::SeatSequence;
use crate::error::{Result, SeatingError};
use crate::models::{Assignment, ExamDay, Examinee, Placement, SeatPlan, Warning};

/// Seating of one exam day with its diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAllocation {
    /// The day that was seated.
    pub day: ExamDay,
    /// Examinee → room slot mapping.
    pub assignment: Assignment,
    /// Adjacency conflicts the repair pass could not remove.
    pub warnings: Vec<Warning>,
    /// Repair bookkeeping.
    pub stats: RepairStats,
}

/// Adjacency counts around the repair pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairStats {
    /// Same-branch adjacent pairs after placement.
    pub violations_before: usize,
    /// Same-branch adjacent pairs after repair.
    pub violations_after: usize,
    /// Swaps and vacant-seat moves performed.
    pub swaps: usize,
    /// Rooms re-seated in checkerboard order.
    pub rooms_reseated: usize,
}

impl DayAllocation {
    /// Whether every adjacency conflict was avoided or repaired.
    pub fn is_conflict_free(&self) -> bool {
        self.stats.violations_after == 0
    }
}

/// Seats exam days over a fixed set of seat plans.
///
/// # Example
///
/// ```
/// use u_seating::allocator::{DayAllocator, InterleaveRule};
/// use u_seating::models::{Density, ExamDay, Examinee, Room};
/// use u_seating::plan::build_seat_plan;
///
/// let examinees = vec![
///     Examinee::new("2201CS01", "Asha").with_branch("CS"),
///     Examinee::new("2201CS02", "Bhanu").with_branch("CS"),
///     Examinee::new("2201EE01", "Chitra").with_branch("EE"),
/// ];
/// let plan = build_seat_plan(&Room::new("R1", 4).with_layout(1, 4), Density::Dense, 0).unwrap();
///
/// let allocator = DayAllocator::new().with_rule(InterleaveRule::LargestFirst);
/// let allocation = allocator
///     .allocate(&examinees, &[plan], &ExamDay::new("D1"), 0)
///     .unwrap();
/// assert_eq!(allocation.assignment.placement_count(), 3);
/// assert!(allocation.is_conflict_free());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DayAllocator {
    rule: InterleaveRule,
}

impl DayAllocator {
    /// Creates an allocator using round-robin interleaving.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the interleave rule.
    pub fn with_rule(mut self, rule: InterleaveRule) -> Self {
        self.rule = rule;
        self
    }

    /// The interleave rule in use.
    pub fn rule(&self) -> InterleaveRule {
        self.rule
    }

    /// Seats one exam day.
    ///
    /// `day_index` is the day's position in the run and sets the branch
    /// rotation phase. Examinees must have resolved branches; unresolved
    /// ones are grouped together under the empty code.
    ///
    /// # Errors
    /// - [`SeatingError::EmptyRoster`] / [`SeatingError::EmptyRoomCatalog`]
    ///   for empty inputs.
    /// - [`SeatingError::CapacityExceeded`] when the day's roster does not fit.
    pub fn allocate(
        &self,
        examinees: &[Examinee],
        plans: &[SeatPlan],
        day: &ExamDay,
        day_index: usize,
    ) -> Result<DayAllocation> {
        if examinees.is_empty() {
            return Err(SeatingError::EmptyRoster);
        }
        if plans.is_empty() {
            return Err(SeatingError::EmptyRoomCatalog);
        }

        let roster = day_roster(examinees, day);
        let sequence = SeatSequence::new(plans);
        if roster.len() > sequence.len() {
            warn!(
                "day {}: {} examinees exceed {} available seats",
                day.id,
                roster.len(),
                sequence.len()
            );
            return Err(SeatingError::CapacityExceeded {
                day_id: day.id.clone(),
                required: roster.len(),
                available: sequence.len(),
            });
        }

        let mut groups = group_by_branch(&roster);
        let phase = if groups.is_empty() {
            0
        } else {
            day_index % groups.len()
        };
        let mut seats = interleave(&sequence, &mut groups, phase, self.rule);

        let branches: Vec<&str> = roster.iter().map(|e| e.branch_code()).collect();
        let violations_before = find_violations(&sequence, &seats, &branches).len();
        let mut swaps = repair(&sequence, &mut seats, &branches);
        let mut rooms_reseated = 0;
        if !find_violations(&sequence, &seats, &branches).is_empty() {
            rooms_reseated = reseat_rooms(&sequence, &mut seats, &roster);
            if rooms_reseated > 0 {
                swaps += repair(&sequence, &mut seats, &branches);
            }
        }
        let remaining = find_violations(&sequence, &seats, &branches);

        let mut assignment = Assignment::new(&day.id);
        for (g, occupant) in seats.iter().enumerate() {
            if let Some(e) = *occupant {
                assignment.add_placement(Placement::new(
                    &sequence.plan(g).room_id,
                    sequence.local(g),
                    sequence.slot(g).label(),
                    &roster[e].roll,
                    branches[e],
                ));
            }
        }

        let warnings: Vec<Warning> = remaining
            .iter()
            .filter_map(|&(a, b)| {
                let (ea, eb) = (seats[a]?, seats[b]?);
                Some(Warning::adjacency_violation(
                    &day.id,
                    &sequence.plan(a).room_id,
                    branches[ea],
                    (sequence.slot(a).label(), sequence.slot(b).label()),
                    (roster[ea].roll.clone(), roster[eb].roll.clone()),
                ))
            })
            .collect();
        for w in &warnings {
            warn!("day {} room {}: {}", w.day_id, w.room_id, w.message);
        }

        info!(
            "day {}: seated {} examinees in {} room(s), {} swap(s), {} room(s) re-seated, \
             {} unresolved conflict(s)",
            day.id,
            assignment.placement_count(),
            assignment.rooms_used().len(),
            swaps,
            rooms_reseated,
            remaining.len()
        );

        Ok(DayAllocation {
            day: day.clone(),
            assignment,
            warnings,
            stats: RepairStats {
                violations_before,
                violations_after: remaining.len(),
                swaps,
                rooms_reseated,
            },
        })
    }
}

/// Seats one exam day with round-robin interleaving.
///
/// Shorthand for [`DayAllocator::new`] followed by
/// [`DayAllocator::allocate`].
///
/// # Example
///
/// ```
/// use u_seating::allocator::allocate_day;
/// use u_seating::models::{Density, ExamDay, Examinee, Room};
/// use u_seating::plan::build_seat_plan;
///
/// let examinees = vec![
///     Examinee::new("2201CS01", "Asha").with_branch("CS"),
///     Examinee::new("2201CS02", "Bhanu").with_branch("CS"),
///     Examinee::new("2201EE01", "Chitra").with_branch("EE"),
/// ];
/// let plan = build_seat_plan(&Room::new("R1", 4).with_layout(1, 4), Density::Dense, 0).unwrap();
///
/// let allocation = allocate_day(&examinees, &[plan], &ExamDay::new("D1"), 0).unwrap();
/// assert_eq!(allocation.assignment.placement_count(), 3);
/// assert!(allocation.is_conflict_free());
/// ```
pub fn allocate_day(
    examinees: &[Examinee],
    plans: &[SeatPlan],
    day: &ExamDay,
    day_index: usize,
) -> Result<DayAllocation> {
    DayAllocator::new().allocate(examinees, plans, day, day_index)
}

fn day_roster<'a>(examinees: &'a [Examinee], day: &ExamDay) -> Vec<&'a Examinee> {
    match &day.rolls {
        None => examinees.iter().collect(),
        Some(rolls) => {
            let wanted: HashSet<&str> = rolls.iter().map(String::as_str).collect();
            examinees
                .iter()
                .filter(|e| wanted.contains(e.roll.as_str()))
                .collect()
        }
    }
}
