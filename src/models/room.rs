//! Room model.
//!
//! A room has a physical seat count, an optional rows × columns layout used
//! to derive seat adjacency, and an optional buffer override. The run-level
//! density policy decides which physical seats are usable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seating-density policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Density {
    /// Every physical seat is usable; front/back/left/right are all adjacent.
    #[default]
    Dense,
    /// Every alternate seat in a row is usable; only same-row neighbors
    /// are adjacent.
    Sparse,
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Density::Dense => f.write_str("Dense"),
            Density::Sparse => f.write_str("Sparse"),
        }
    }
}

impl FromStr for Density {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(Density::Dense),
            "sparse" => Ok(Density::Sparse),
            other => Err(format!("unknown density policy '{other}'")),
        }
    }
}

/// Grid shape of a room's seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatLayout {
    /// Number of rows (front to back).
    pub rows: u32,
    /// Seats per row.
    pub columns: u32,
}

impl SeatLayout {
    /// Creates a layout.
    pub fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Smallest layout of at most `columns` seats per row holding `capacity` seats.
    pub fn derived(capacity: u32, columns: u32) -> Self {
        let columns = columns.min(capacity).max(1);
        Self {
            rows: capacity.div_ceil(columns),
            columns,
        }
    }

    /// Number of grid cells.
    #[inline]
    pub fn cells(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.columns)
    }
}

/// An examination room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Building or block name, informational only.
    pub block: String,
    /// Physical seat count.
    pub capacity: i32,
    /// Seat grid. `None` derives one from the capacity.
    pub layout: Option<SeatLayout>,
    /// Buffer override. `None` uses the run-level buffer.
    pub buffer: Option<u32>,
}

impl Room {
    /// Creates a room with the given physical capacity.
    pub fn new(id: impl Into<String>, capacity: i32) -> Self {
        Self {
            id: id.into(),
            block: String::new(),
            capacity,
            layout: None,
            buffer: None,
        }
    }

    /// Sets the block name.
    pub fn with_block(mut self, block: impl Into<String>) -> Self {
        self.block = block.into();
        self
    }

    /// Sets the seat layout.
    pub fn with_layout(mut self, rows: u32, columns: u32) -> Self {
        self.layout = Some(SeatLayout::new(rows, columns));
        self
    }

    /// Overrides the run-level buffer for this room.
    pub fn with_buffer(mut self, buffer: u32) -> Self {
        self.buffer = Some(buffer);
        self
    }

    /// Buffer in effect given the run-level default.
    #[inline]
    pub fn buffer_or(&self, run_buffer: u32) -> u32 {
        self.buffer.unwrap_or(run_buffer)
    }

    /// Dense effective capacity: capacity minus buffer, floored at 0.
    pub fn effective_capacity(&self, run_buffer: u32) -> u32 {
        let capacity = u32::try_from(self.capacity).unwrap_or(0);
        capacity.saturating_sub(self.buffer_or(run_buffer))
    }

    /// Layout in effect, deriving one with `default_columns` seats per row
    /// when none was declared. `None` for non-positive capacities.
    pub fn layout_or_derived(&self, default_columns: u32) -> Option<SeatLayout> {
        if let Some(layout) = self.layout {
            return Some(layout);
        }
        let capacity = u32::try_from(self.capacity).ok().filter(|&c| c > 0)?;
        Some(SeatLayout::derived(capacity, default_columns))
    }
}
