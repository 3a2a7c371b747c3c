//! Output records for one room on one exam day.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::Warning;

/// One seat of the seating chart. Unoccupied seats have empty examinee
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingChartRecord {
    /// Printable seat label (`A1`, `B3`, ...).
    pub seat_label: String,
    /// Zero-based row.
    pub row: u32,
    /// Zero-based column.
    pub column: u32,
    /// Roll number of the occupant, empty when vacant.
    pub roll: String,
    /// Occupant's name, empty when vacant.
    pub name: String,
    /// Occupant's branch code, empty when vacant.
    pub branch: String,
}

impl SeatingChartRecord {
    /// Whether an examinee sits here.
    pub fn is_occupied(&self) -> bool {
        !self.roll.is_empty()
    }
}

/// One line of the attendance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Seat the examinee was assigned.
    pub seat_label: String,
    /// Examinee roll number.
    pub roll: String,
    /// Examinee name.
    pub name: String,
    /// Resolved photo, or the placeholder.
    pub photo: PathBuf,
    /// Whether `photo` is the placeholder.
    pub photo_fallback: bool,
}

/// Seating chart and attendance sheet of one room on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomProjection {
    /// Exam day identifier.
    pub day_id: String,
    /// Exam day label, empty if the day has none.
    pub day_label: String,
    /// Room identifier.
    pub room_id: String,
    /// Every usable seat, in plan order.
    pub seating_chart: Vec<SeatingChartRecord>,
    /// Occupied seats only, in plan order.
    pub attendance: Vec<AttendanceRecord>,
    /// Missing-photo warnings for this room.
    pub warnings: Vec<Warning>,
}

impl RoomProjection {
    /// Number of occupied seats.
    pub fn occupied(&self) -> usize {
        self.attendance.len()
    }

    /// Number of attendance lines using the placeholder photo.
    pub fn fallback_count(&self) -> usize {
        self.attendance.iter().filter(|a| a.photo_fallback).count()
    }
}
