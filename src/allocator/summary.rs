//! Per-day seating summaries.
//!
//! Computes occupancy figures from a completed day allocation and the
//! engine state it was produced from.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Capacity | Declared seats in the room |
//! | Effective capacity | Usable seats after buffer and density |
//! | Seated | Examinees placed in the room |
//! | Vacant | Effective capacity − seated |
//! | Utilization | Seated / effective capacity |
//! | Branch counts | Seated examinees per branch |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::engine::DayAllocation;
use super::state::EngineState;

/// Occupancy of one room on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummary {
    /// Room identifier.
    pub room_id: String,
    /// Building or block, empty if unknown.
    pub block: String,
    /// Declared capacity.
    pub capacity: usize,
    /// Usable seats after buffer and density.
    pub effective_capacity: usize,
    /// Examinees seated.
    pub seated: usize,
    /// Usable seats left empty.
    pub vacant: usize,
    /// Fraction of usable seats taken (0.0..=1.0).
    pub utilization: f64,
    /// Seated examinees per branch code.
    pub branch_counts: BTreeMap<String, usize>,
}

/// Occupancy of every room on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    /// Day identifier.
    pub day_id: String,
    /// One entry per room, in catalog order.
    pub rooms: Vec<RoomSummary>,
    /// Examinees seated across all rooms.
    pub total_seated: usize,
    /// Usable seats across all rooms.
    pub total_capacity: usize,
    /// Fraction of usable seats taken across all rooms.
    pub utilization: f64,
    /// Adjacency conflicts left after repair.
    pub unresolved_violations: usize,
    /// Seated examinees per branch code.
    pub branch_totals: BTreeMap<String, usize>,
}

impl AllocationSummary {
    /// Computes the summary of a day allocation.
    ///
    /// Rooms of the state without occupants are listed with zero seated.
    pub fn calculate(allocation: &DayAllocation, state: &EngineState) -> Self {
        let mut per_room: BTreeMap<&str, BTreeMap<String, usize>> = BTreeMap::new();
        for p in &allocation.assignment.placements {
            *per_room
                .entry(p.room_id.as_str())
                .or_default()
                .entry(p.branch.clone())
                .or_default() += 1;
        }

        let rooms: Vec<RoomSummary> = state
            .rooms()
            .iter()
            .zip(state.plans())
            .map(|(room, plan)| {
                let branch_counts = per_room.remove(room.id.as_str()).unwrap_or_default();
                let seated: usize = branch_counts.values().sum();
                let effective_capacity = plan.capacity();
                RoomSummary {
                    room_id: room.id.clone(),
                    block: room.block.clone(),
                    capacity: usize::try_from(room.capacity).unwrap_or(0),
                    effective_capacity,
                    seated,
                    vacant: effective_capacity.saturating_sub(seated),
                    utilization: ratio(seated, effective_capacity),
                    branch_counts,
                }
            })
            .collect();

        let total_seated = rooms.iter().map(|r| r.seated).sum();
        let total_capacity = rooms.iter().map(|r| r.effective_capacity).sum();

        Self {
            day_id: allocation.day.id.clone(),
            rooms,
            total_seated,
            total_capacity,
            utilization: ratio(total_seated, total_capacity),
            unresolved_violations: allocation.stats.violations_after,
            branch_totals: allocation.assignment.branch_counts(),
        }
    }

    /// Looks up a room's summary.
    pub fn room(&self, room_id: &str) -> Option<&RoomSummary> {
        self.rooms.iter().find(|r| r.room_id == room_id)
    }

    /// Rooms with at least one examinee.
    pub fn rooms_in_use(&self) -> impl Iterator<Item = &RoomSummary> {
        self.rooms.iter().filter(|r| r.seated > 0)
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AllocationConfig;
    use crate::models::{Density, ExamDay, Examinee, Room};

    fn state(buffer: u32) -> EngineState {
        let mut examinees = Vec::new();
        for i in 1..=20 {
            examinees.push(Examinee::new(format!("2201CS{i:02}"), "cs"));
        }
        for i in 1..=15 {
            examinees.push(Examinee::new(format!("2201EE{i:02}"), "ee"));
        }
        let rooms = vec![
            Room::new("R1", 30).with_layout(5, 6).with_block("Block A"),
            Room::new("R2", 30).with_layout(5, 6),
            Room::new("R3", 12).with_layout(2, 6),
        ];
        EngineState::load(
            examinees,
            rooms,
            vec![ExamDay::new("D1")],
            AllocationConfig::new(buffer, Density::Dense),
        )
        .unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let state = state(0);
        let allocation = state.allocate_day(0).unwrap();
        let summary = AllocationSummary::calculate(&allocation, &state);

        assert_eq!(summary.day_id, "D1");
        assert_eq!(summary.total_seated, 35);
        assert_eq!(summary.total_capacity, 72);
        assert!((summary.utilization - 35.0 / 72.0).abs() < 1e-10);
        assert_eq!(summary.branch_totals["CS"], 20);
        assert_eq!(summary.branch_totals["EE"], 15);

        let r1 = summary.room("R1").unwrap();
        assert_eq!(r1.block, "Block A");
        assert_eq!(r1.seated, 30);
        assert_eq!(r1.vacant, 0);
        assert!((r1.utilization - 1.0).abs() < 1e-10);
        assert_eq!(r1.branch_counts.values().sum::<usize>(), 30);

        let r3 = summary.room("R3").unwrap();
        assert_eq!(r3.seated, 0);
        assert!((r3.utilization - 0.0).abs() < 1e-10);
        assert_eq!(summary.rooms_in_use().count(), 2);
    }

    #[test]
    fn test_summary_with_buffer() {
        let state = state(5);
        let allocation = state.allocate_day(0).unwrap();
        let summary = AllocationSummary::calculate(&allocation, &state);

        let r1 = summary.room("R1").unwrap();
        assert_eq!(r1.capacity, 30);
        assert_eq!(r1.effective_capacity, 25);
        assert_eq!(r1.seated, 25);

        let r2 = summary.room("R2").unwrap();
        assert_eq!(r2.seated, 10);
        assert_eq!(r2.vacant, 15);
        assert_eq!(summary.total_capacity, 25 + 25 + 7);
    }
}
