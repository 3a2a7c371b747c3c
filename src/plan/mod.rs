//! Seat plan construction.
//!
//! Turns a room's declared capacity, buffer and the run's density policy
//! into an ordered arena of [`SeatSlot`](crate::models::SeatSlot)s with
//! index-based adjacency.
//!
//! | Policy | Usable seats | Adjacency |
//! |--------|--------------|-----------|
//! | `Dense` | every physical seat minus buffer | left, right, front, back |
//! | `Sparse` | 0-based odd columns of the dense seats | left, right |

mod builder;

pub use builder::{build_seat_plan, SeatPlanBuilder};
