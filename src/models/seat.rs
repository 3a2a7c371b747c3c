//! Seat slots and seat plans.
//!
//! A seat plan is an arena of usable slots for one room, in fill order.
//! Adjacency is stored as index lists into the same arena, so neighbor
//! lookups are O(1) and no pointer graph is needed.

use serde::{Deserialize, Serialize};

use super::Density;

/// A usable seat in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSlot {
    /// Zero-based row (front to back).
    pub row: u32,
    /// Zero-based column.
    pub column: u32,
    /// Indices of adjacent slots in the owning plan, ascending.
    pub neighbors: Vec<usize>,
}

impl SeatSlot {
    /// Creates a slot without neighbors.
    pub fn new(row: u32, column: u32) -> Self {
        Self {
            row,
            column,
            neighbors: Vec::new(),
        }
    }

    /// Printable label, e.g. `A1` for the first seat of the front row.
    pub fn label(&self) -> String {
        seat_label(self.row, self.column)
    }
}

/// Formats a seat position as row letters and a 1-based column.
///
/// Rows run `A`..`Z`, then `AA`, `AB`, ... like spreadsheet columns.
pub fn seat_label(row: u32, column: u32) -> String {
    let mut letters = Vec::new();
    let mut n = row + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    let mut label = String::from_utf8(letters).unwrap_or_default();
    label.push_str(&(column + 1).to_string());
    label
}

/// Ordered usable seats of one room under a density policy and buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPlan {
    /// Owning room.
    pub room_id: String,
    /// Policy the plan was built with.
    pub density: Density,
    /// Buffer seats withheld.
    pub buffer: u32,
    /// Usable slots in fill order.
    pub slots: Vec<SeatSlot>,
}

impl SeatPlan {
    /// Creates an empty plan.
    pub fn new(room_id: impl Into<String>, density: Density, buffer: u32) -> Self {
        Self {
            room_id: room_id.into(),
            density,
            buffer,
            slots: Vec::new(),
        }
    }

    /// Effective capacity: the number of usable slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether the plan has no usable slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Neighbors of the slot at `index`.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.slots
            .get(index)
            .map(|s| s.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Iterates over every adjacency edge once as `(lower, higher)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.slots.iter().enumerate().flat_map(|(i, slot)| {
            slot.neighbors
                .iter()
                .copied()
                .filter(move |&j| j > i)
                .map(move |j| (i, j))
        })
    }

    /// Number of slots in the given row.
    pub fn row_len(&self, row: u32) -> usize {
        self.slots.iter().filter(|s| s.row == row).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_labels() {
        assert_eq!(seat_label(0, 0), "A1");
        assert_eq!(seat_label(1, 4), "B5");
        assert_eq!(seat_label(25, 0), "Z1");
        assert_eq!(seat_label(26, 1), "AA2");
        assert_eq!(seat_label(27, 9), "AB10");
        assert_eq!(SeatSlot::new(2, 2).label(), "C3");
    }

    #[test]
    fn test_plan_edges_listed_once() {
        let mut plan = SeatPlan::new("R1", Density::Dense, 0);
        plan.slots = vec![
            SeatSlot { row: 0, column: 0, neighbors: vec![1] },
            SeatSlot { row: 0, column: 1, neighbors: vec![0, 2] },
            SeatSlot { row: 0, column: 2, neighbors: vec![1] },
        ];

        let edges: Vec<_> = plan.edges().collect();
        assert_eq!(edges, vec![(0, 1), (1, 2)]);
        assert_eq!(plan.capacity(), 3);
        assert_eq!(plan.neighbors(1), &[0, 2]);
        assert!(plan.neighbors(9).is_empty());
        assert_eq!(plan.row_len(0), 3);
    }
}
