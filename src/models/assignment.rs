//! Assignment (solution) model.
//!
//! An assignment is the seating of one exam day: which examinee sits in
//! which slot of which room. It is accompanied by non-fatal warnings for
//! conflicts the allocator could not repair and photos that could not be
//! found.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The seating of one exam day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Exam day this seating belongs to.
    pub day_id: String,
    /// One entry per occupied slot, in global fill order.
    pub placements: Vec<Placement>,
}

/// An examinee seated in a room slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Room identifier.
    pub room_id: String,
    /// Slot index within the room's seat plan.
    pub slot: usize,
    /// Printable seat label.
    pub seat_label: String,
    /// Seated examinee's roll number.
    pub roll: String,
    /// Seated examinee's branch (denormalized for query convenience).
    pub branch: String,
}

/// A non-fatal condition surfaced alongside successful output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Type of warning.
    pub kind: WarningKind,
    /// Exam day.
    pub day_id: String,
    /// Room the warning concerns.
    pub room_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Two adjacent seats hold the same branch after repair.
    AdjacencyViolation {
        branch: String,
        seats: (String, String),
        rolls: (String, String),
    },
    /// Photo reference absent from the photo store; placeholder used.
    MissingPhotoAsset { roll: String, reference: String },
}

impl Placement {
    /// Creates a placement.
    pub fn new(
        room_id: impl Into<String>,
        slot: usize,
        seat_label: impl Into<String>,
        roll: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            slot,
            seat_label: seat_label.into(),
            roll: roll.into(),
            branch: branch.into(),
        }
    }
}

impl Warning {
    /// Creates an adjacency-violation warning.
    pub fn adjacency_violation(
        day_id: impl Into<String>,
        room_id: impl Into<String>,
        branch: impl Into<String>,
        seats: (String, String),
        rolls: (String, String),
    ) -> Self {
        let branch = branch.into();
        let message = format!(
            "seats {} and {} are adjacent and both hold branch {} ({}, {})",
            seats.0, seats.1, branch, rolls.0, rolls.1
        );
        Self {
            kind: WarningKind::AdjacencyViolation {
                branch,
                seats,
                rolls,
            },
            day_id: day_id.into(),
            room_id: room_id.into(),
            message,
        }
    }

    /// Creates a missing-photo warning.
    pub fn missing_photo(
        day_id: impl Into<String>,
        room_id: impl Into<String>,
        roll: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        let roll = roll.into();
        let reference = reference.into();
        let message = format!("photo '{reference}' for {roll} not found, using placeholder");
        Self {
            kind: WarningKind::MissingPhotoAsset { roll, reference },
            day_id: day_id.into(),
            room_id: room_id.into(),
            message,
        }
    }

    /// Whether this is an unresolved adjacency violation.
    pub fn is_adjacency_violation(&self) -> bool {
        matches!(self.kind, WarningKind::AdjacencyViolation { .. })
    }
}

impl Assignment {
    /// Creates an empty assignment for a day.
    pub fn new(day_id: impl Into<String>) -> Self {
        Self {
            day_id: day_id.into(),
            placements: Vec::new(),
        }
    }

    /// Adds a placement.
    pub fn add_placement(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    /// Number of seated examinees.
    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Finds the placement of an examinee.
    pub fn placement_for_roll(&self, roll: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.roll == roll)
    }

    /// Returns all placements in a room, in slot order.
    pub fn placements_for_room(&self, room_id: &str) -> Vec<&Placement> {
        let mut placements: Vec<&Placement> = self
            .placements
            .iter()
            .filter(|p| p.room_id == room_id)
            .collect();
        placements.sort_by_key(|p| p.slot);
        placements
    }

    /// Number of occupied slots in a room.
    pub fn occupied_count(&self, room_id: &str) -> usize {
        self.placements
            .iter()
            .filter(|p| p.room_id == room_id)
            .count()
    }

    /// Room identifiers with at least one placement, in first-use order.
    pub fn rooms_used(&self) -> Vec<&str> {
        let mut rooms: Vec<&str> = Vec::new();
        for p in &self.placements {
            if !rooms.contains(&p.room_id.as_str()) {
                rooms.push(&p.room_id);
            }
        }
        rooms
    }

    /// Seated examinees per branch.
    pub fn branch_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for p in &self.placements {
            *counts.entry(p.branch.clone()).or_insert(0) += 1;
        }
        counts
    }
}
