//! Seating domain models.
//!
//! Provides the input snapshot types (examinees, rooms, exam days), the
//! seat-plan arena produced from rooms, and the assignment produced per day.
//!
//! # Domain Mapping
//!
//! | u-seating | Exam cell terminology |
//! |-----------|-----------------------|
//! | Examinee | Student (roll number) |
//! | Branch | Course / department code |
//! | Room | Examination hall |
//! | ExamDay | Date + session |
//! | Assignment | Seating plan for one session |

mod assignment;
mod day;
mod examinee;
mod room;
mod seat;

pub use assignment::{Assignment, Placement, Warning, WarningKind};
pub use day::ExamDay;
pub use examinee::{BranchSpan, Examinee};
pub use room::{Density, Room, SeatLayout};
pub use seat::{seat_label, SeatPlan, SeatSlot};
