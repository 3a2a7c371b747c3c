//! Exam seating allocation for the U-Engine ecosystem.
//!
//! Seats a roster of examinees across a catalog of rooms, one exam day at a
//! time, so that no two examinees of the same branch sit next to each other
//! wherever that can be avoided. Produces per-room seating charts and
//! attendance sheets with photo references.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Examinee`, `Room`, `ExamDay`, `SeatPlan`,
//!   `Assignment`, `Warning`
//! - **`validation`**: Input integrity checks (duplicate IDs, capacities,
//!   buffers, branch derivation, day rosters)
//! - **`plan`**: Seat plan construction under a density policy
//! - **`allocator`**: Branch interleaving, repair, room re-seating and summaries
//! - **`projection`**: Seating charts and attendance sheets
//! - **`config`**: Run configuration
//! - **`error`**: Fatal error taxonomy
//!
//! # Example
//!
//! ```
//! use u_seating::allocator::{AllocationSummary, EngineState};
//! use u_seating::config::AllocationConfig;
//! use u_seating::models::{ExamDay, Examinee, Room};
//!
//! let examinees = (1..=6)
//!     .flat_map(|i| {
//!         [
//!             Examinee::new(format!("2201CS{i:02}"), "cs"),
//!             Examinee::new(format!("2201EE{i:02}"), "ee"),
//!         ]
//!     })
//!     .collect();
//! let rooms = vec![Room::new("LT-101", 12).with_layout(3, 4)];
//! let days = vec![ExamDay::new("2025-11-20")];
//!
//! let state = EngineState::load(examinees, rooms, days, AllocationConfig::default()).unwrap();
//! for outcome in state.allocate_all_days() {
//!     let allocation = outcome.result.unwrap();
//!     assert!(allocation.is_conflict_free());
//!
//!     let summary = AllocationSummary::calculate(&allocation, &state);
//!     assert_eq!(summary.total_seated, 12);
//! }
//! ```
//!
//! # Architecture
//!
//! Allocation is deterministic and free of I/O. The only I/O in the crate
//! is reading a configuration file and probing photo files during
//! projection, both outside allocation.

pub mod allocator;
pub mod config;
pub mod error;
pub mod models;
pub mod plan;
pub mod projection;
pub mod validation;

pub use error::{Result, SeatingError};
