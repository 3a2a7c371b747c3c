//! Run configuration.
//!
//! One [`AllocationConfig`] is fixed per run. Every field has a default so a
//! partial JSON document is enough:
//!
//! ```
//! use u_seating::config::AllocationConfig;
//! use u_seating::models::Density;
//!
//! let json = r#"{ "buffer": 5, "density": "Sparse" }"#;
//! let config = AllocationConfig::from_json_str(json).unwrap();
//! assert_eq!(config.buffer, 5);
//! assert_eq!(config.density, Density::Sparse);
//! assert_eq!(config.default_columns, 6);
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::allocator::InterleaveRule;
use crate::error::{Result, SeatingError};
use crate::models::{BranchSpan, Density};

/// Largest accepted buffer per room.
pub const MAX_BUFFER: u32 = 50;

/// Configuration for one allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Seats withheld per room unless the room overrides it (0..=50).
    pub buffer: u32,
    /// Seating-density policy.
    pub density: Density,
    /// How branches are picked while filling the seating sequence.
    pub interleave: InterleaveRule,
    /// Roll-number characters holding the branch code.
    pub branch_span: BranchSpan,
    /// Seats per row for rooms declared without a layout.
    pub default_columns: u32,
    /// Image used when an examinee's photo is absent or missing.
    pub placeholder_photo: PathBuf,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            buffer: 0,
            density: Density::Dense,
            interleave: InterleaveRule::RoundRobin,
            branch_span: BranchSpan::default(),
            default_columns: 6,
            placeholder_photo: PathBuf::from("photos/no_image_available.jpg"),
        }
    }
}

impl AllocationConfig {
    /// Creates a configuration with the given buffer and density.
    pub fn new(buffer: u32, density: Density) -> Self {
        Self {
            buffer,
            density,
            ..Default::default()
        }
    }

    /// Sets the interleave rule.
    pub fn with_interleave(mut self, rule: InterleaveRule) -> Self {
        self.interleave = rule;
        self
    }

    /// Sets the branch span.
    pub fn with_branch_span(mut self, span: BranchSpan) -> Self {
        self.branch_span = span;
        self
    }

    /// Sets the default row width.
    pub fn with_default_columns(mut self, columns: u32) -> Self {
        self.default_columns = columns;
        self
    }

    /// Sets the placeholder photo.
    pub fn with_placeholder_photo(mut self, path: impl Into<PathBuf>) -> Self {
        self.placeholder_photo = path.into();
        self
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.buffer > MAX_BUFFER {
            return Err(SeatingError::Config(format!(
                "buffer {} is out of range 0..={MAX_BUFFER}",
                self.buffer
            )));
        }
        if self.branch_span.len == 0 {
            return Err(SeatingError::Config("branch span must not be empty".into()));
        }
        if self.default_columns == 0 {
            return Err(SeatingError::Config(
                "default_columns must be positive".into(),
            ));
        }
        Ok(())
    }
}
