//! Builds a room's seat plan from capacity, layout, buffer and density.
//!
//! # Algorithm
//!
//! 1. Resolve the layout (declared, or derived from the default row width).
//! 2. Physical seats are the first `capacity` grid cells in row-major order.
//! 3. Withhold the last `buffer` physical seats.
//! 4. `Dense`: keep every remaining seat; adjacency is left/right/front/back.
//!    `Sparse`: keep 0-based odd columns only; adjacency is the next kept seat
//!    to the left or right in the same row.
//!
//! # Complexity
//! O(rows × columns).

use log::debug;

use crate::config::AllocationConfig;
use crate::error::{Result, SeatingError};
use crate::models::{Density, Room, SeatPlan, SeatSlot};

/// Builds seat plans for rooms under one density policy and run buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatPlanBuilder {
    density: Density,
    buffer: u32,
    default_columns: u32,
}

impl SeatPlanBuilder {
    /// Creates a builder with no buffer and six seats per derived row.
    pub fn new(density: Density) -> Self {
        Self {
            density,
            buffer: 0,
            default_columns: 6,
        }
    }

    /// Creates a builder from a run configuration.
    pub fn from_config(config: &AllocationConfig) -> Self {
        Self {
            density: config.density,
            buffer: config.buffer,
            default_columns: config.default_columns,
        }
    }

    /// Sets the run-level buffer (rooms may override it).
    pub fn with_buffer(mut self, buffer: u32) -> Self {
        self.buffer = buffer;
        self
    }

    /// Sets the row width used for rooms without a layout.
    pub fn with_default_columns(mut self, columns: u32) -> Self {
        self.default_columns = columns;
        self
    }

    /// Builds the seat plan of one room.
    ///
    /// # Errors
    /// [`SeatingError::InvalidRoomConfig`] when the capacity is not positive,
    /// the buffer exceeds the capacity, or the layout does not fit the
    /// capacity (too few cells, or a trailing row left empty).
    pub fn build(&self, room: &Room) -> Result<SeatPlan> {
        let capacity = u32::try_from(room.capacity)
            .ok()
            .filter(|&c| c > 0)
            .ok_or_else(|| {
                SeatingError::room_config(
                    &room.id,
                    format!("capacity {} is not positive", room.capacity),
                )
            })?;

        let buffer = room.buffer_or(self.buffer);
        if buffer > capacity {
            return Err(SeatingError::room_config(
                &room.id,
                format!("buffer {buffer} exceeds capacity {capacity}"),
            ));
        }

        let layout = room
            .layout_or_derived(self.default_columns)
            .ok_or_else(|| SeatingError::room_config(&room.id, "no usable layout"))?;
        if layout.rows == 0 || layout.columns == 0 {
            return Err(SeatingError::room_config(
                &room.id,
                format!("layout {}x{} has no seats", layout.rows, layout.columns),
            ));
        }
        if layout.cells() < u64::from(capacity) {
            return Err(SeatingError::room_config(
                &room.id,
                format!(
                    "layout {}x{} holds {} seats, fewer than capacity {capacity}",
                    layout.rows,
                    layout.columns,
                    layout.cells()
                ),
            ));
        }
        if u64::from(layout.rows - 1) * u64::from(layout.columns) >= u64::from(capacity) {
            return Err(SeatingError::room_config(
                &room.id,
                format!(
                    "layout {}x{} leaves trailing rows empty for capacity {capacity}",
                    layout.rows, layout.columns
                ),
            ));
        }

        let usable = capacity - buffer;
        let columns = layout.columns;
        let positions = (0..usable)
            .map(|i| (i / columns, i % columns))
            .filter(|&(_, column)| match self.density {
                Density::Dense => true,
                Density::Sparse => column % 2 == 1,
            });

        let mut plan = SeatPlan::new(&room.id, self.density, buffer);
        plan.slots = positions.map(|(row, column)| SeatSlot::new(row, column)).collect();

        match self.density {
            Density::Dense => link_grid(&mut plan, columns),
            Density::Sparse => link_rows(&mut plan),
        }

        debug!(
            "seat plan for room {}: {} of {} seats usable ({}, buffer {})",
            room.id,
            plan.capacity(),
            capacity,
            self.density,
            buffer
        );
        Ok(plan)
    }
}

/// Builds the seat plan of `room` with the given policy and run buffer.
pub fn build_seat_plan(room: &Room, density: Density, buffer: u32) -> Result<SeatPlan> {
    SeatPlanBuilder::new(density).with_buffer(buffer).build(room)
}

/// Four-neighbor adjacency over the row-major dense slots.
///
/// Slot `i` sits at `(i / columns, i % columns)`, so neighbors follow from
/// the index alone and the cost is bounded by the usable seats, not the
/// layout area.
fn link_grid(plan: &mut SeatPlan, columns: u32) {
    let len = plan.slots.len() as u64;
    let width = u64::from(columns);
    for (i, slot) in plan.slots.iter_mut().enumerate() {
        let i = i as u64;
        let up = (slot.row > 0).then(|| i - width);
        let left = (slot.column > 0).then(|| i - 1);
        let right = (slot.column + 1 < columns && i + 1 < len).then(|| i + 1);
        let down = (i + width < len).then(|| i + width);
        slot.neighbors = [up, left, right, down]
            .into_iter()
            .flatten()
            .map(|n| n as usize)
            .collect();
    }
}

/// Same-row adjacency between consecutive kept seats.
fn link_rows(plan: &mut SeatPlan) {
    for i in 1..plan.slots.len() {
        if plan.slots[i - 1].row == plan.slots[i].row {
            plan.slots[i - 1].neighbors.push(i);
            plan.slots[i].neighbors.push(i - 1);
        }
    }
    for slot in plan.slots.iter_mut() {
        slot.neighbors.sort_unstable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense(room: &Room, buffer: u32) -> SeatPlan {
        build_seat_plan(room, Density::Dense, buffer).unwrap()
    }

    fn sparse(room: &Room, buffer: u32) -> SeatPlan {
        build_seat_plan(room, Density::Sparse, buffer).unwrap()
    }

    #[test]
    fn test_dense_row_major_order() {
        let plan = dense(&Room::new("R1", 6).with_layout(2, 3), 0);
        let positions: Vec<_> = plan.slots.iter().map(|s| (s.row, s.column)).collect();
        assert_eq!(
            positions,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn test_dense_four_neighbor_adjacency() {
        // A1 A2 A3
        // B1 B2 B3
        let plan = dense(&Room::new("R1", 6).with_layout(2, 3), 0);
        assert_eq!(plan.neighbors(0), &[1, 3]);
        assert_eq!(plan.neighbors(1), &[0, 2, 4]);
        assert_eq!(plan.neighbors(4), &[1, 3, 5]);
        assert_eq!(plan.edges().count(), 7);
    }

    #[test]
    fn test_buffer_removed_from_end() {
        let room = Room::new("R1", 30).with_layout(5, 6);
        assert_eq!(dense(&room, 0).capacity(), 30);

        let plan = dense(&room, 5);
        assert_eq!(plan.capacity(), 25);
        assert_eq!(plan.buffer, 5);
        let last = plan.slots.last().unwrap();
        assert_eq!((last.row, last.column), (4, 0));
        // D2 loses its back neighbor once E2 is withheld.
        assert_eq!(plan.neighbors(19), &[13, 18, 20]);
    }

    #[test]
    fn test_room_buffer_override() {
        let room = Room::new("R1", 30).with_layout(5, 6).with_buffer(10);
        let plan = SeatPlanBuilder::new(Density::Dense)
            .with_buffer(2)
            .build(&room)
            .unwrap();
        assert_eq!(plan.capacity(), 20);
    }

    #[test]
    fn test_sparse_keeps_alternate_columns() {
        let plan = sparse(&Room::new("R1", 12).with_layout(2, 6), 0);
        let columns: Vec<_> = plan.slots.iter().map(|s| s.column).collect();
        assert_eq!(columns, vec![1, 3, 5, 1, 3, 5]);
        // Same-row neighbors only.
        assert_eq!(plan.neighbors(0), &[1]);
        assert_eq!(plan.neighbors(1), &[0, 2]);
        assert_eq!(plan.neighbors(2), &[1]);
        assert_eq!(plan.neighbors(3), &[4]);
    }

    #[test]
    fn test_sparse_is_half_of_dense_per_row() {
        let cases = [
            (Room::new("A", 30).with_layout(5, 6), 0),
            (Room::new("B", 30).with_layout(5, 6), 5),
            (Room::new("C", 35).with_layout(5, 7), 3),
            (Room::new("D", 17), 0),
            (Room::new("E", 9).with_layout(3, 3), 1),
        ];
        for (room, buffer) in cases {
            let d = dense(&room, buffer);
            let s = sparse(&room, buffer);
            let rows = d.slots.iter().map(|s| s.row).max().map_or(0, |r| r + 1);
            let expected: usize = (0..rows).map(|r| d.row_len(r) / 2).sum();
            assert_eq!(s.capacity(), expected, "room {}", room.id);
        }
    }

    #[test]
    fn test_partial_last_row() {
        let plan = dense(&Room::new("R1", 8).with_layout(3, 3), 0);
        assert_eq!(plan.capacity(), 8);
        // C1 (index 6) sits behind B1 (index 3) and next to C2 (index 7).
        assert_eq!(plan.neighbors(6), &[3, 7]);
        // B3 (index 5) has no seat behind it.
        assert_eq!(plan.neighbors(5), &[2, 4]);
    }

    #[test]
    fn test_wide_layout_sized_by_usable_seats() {
        let plan = dense(&Room::new("R1", 10).with_layout(1, u32::MAX), 0);
        assert_eq!(plan.capacity(), 10);
        assert_eq!(plan.neighbors(0), &[1]);
        assert_eq!(plan.neighbors(9), &[8]);
        assert_eq!(plan.edges().count(), 9);

        let plan = sparse(&Room::new("R1", 10).with_layout(1, u32::MAX), 0);
        assert_eq!(plan.capacity(), 5);
    }

    #[test]
    fn test_derived_layout() {
        let plan = SeatPlanBuilder::new(Density::Dense)
            .with_default_columns(4)
            .build(&Room::new("R1", 10))
            .unwrap();
        assert_eq!(plan.capacity(), 10);
        assert_eq!(plan.slots[4].row, 1);
        assert_eq!(plan.slots[4].column, 0);
    }

    #[test]
    fn test_invalid_room_configs() {
        let bad = [
            Room::new("zero", 0),
            Room::new("negative", -1),
            Room::new("small", 10).with_layout(2, 3),
            Room::new("sparse-rows", 6).with_layout(4, 3),
            Room::new("empty", 6).with_layout(0, 6),
        ];
        for room in &bad {
            let err = build_seat_plan(room, Density::Dense, 0).unwrap_err();
            assert!(
                matches!(
                    err,
                    SeatingError::InvalidRoomConfig { ref room_id, .. } if room_id == &room.id
                ),
                "room {}",
                room.id
            );
        }
    }

    #[test]
    fn test_buffer_exceeding_capacity() {
        let err = build_seat_plan(&Room::new("R1", 4), Density::Dense, 5).unwrap_err();
        assert!(matches!(err, SeatingError::InvalidRoomConfig { .. }));
        assert_eq!(dense(&Room::new("R2", 4), 4).capacity(), 0);
    }
}
