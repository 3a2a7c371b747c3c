//! Greedy seat allocation and per-day summaries.
//!
//! Seats each exam day's roster across the room catalog so that examinees
//! of the same branch are not adjacent, then reports what could not be
//! separated.
//!
//! # Algorithm
//!
//! `DayAllocator` fills the global seating sequence (every room's seat plan
//! in catalog order) by interleaving branches, then runs a single local
//! repair pass. Rooms that still hold a conflict are re-seated in
//! checkerboard order and repaired once more. It is deterministic and not
//! optimal: a conflict-free arrangement may exist even when warnings are
//! reported.
//!
//! # Summary
//!
//! `AllocationSummary` computes per-room and per-day occupancy: seated,
//! vacant, utilization and branch counts.

mod engine;
mod interleave;
mod repair;
mod reseat;
mod sequence;
mod state;
mod summary;

pub use engine::{allocate_day, DayAllocation, DayAllocator, RepairStats};
pub use interleave::InterleaveRule;
pub use state::{DayOutcome, EngineState};
pub use summary::{AllocationSummary, RoomSummary};
