//! Examinee model.
//!
//! An examinee is a person to be seated, keyed by roll number. The
//! branch (course/department) code is the anti-collusion grouping key and
//! is normally read from a fixed position inside the roll number.

use serde::{Deserialize, Serialize};

/// Character range of the roll number that holds the branch code.
///
/// Roll numbers like `2201CS01` carry the branch at characters `4..6`,
/// which is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSpan {
    /// Zero-based start character.
    pub start: usize,
    /// Number of characters.
    pub len: usize,
}

impl BranchSpan {
    /// Creates a span.
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Extracts the branch code from a roll number.
    ///
    /// Returns `None` when the roll number is too short to contain the span
    /// or when the span is empty. Counts characters, not bytes.
    pub fn extract(&self, roll: &str) -> Option<String> {
        if self.len == 0 {
            return None;
        }
        let code: String = roll.trim().chars().skip(self.start).take(self.len).collect();
        (code.chars().count() == self.len).then_some(code)
    }
}

impl Default for BranchSpan {
    fn default() -> Self {
        Self { start: 4, len: 2 }
    }
}

/// A person to be seated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Examinee {
    /// Unique roll number.
    pub roll: String,
    /// Display name.
    pub name: String,
    /// Branch code. `None` until derived from the roll number at load.
    pub branch: Option<String>,
    /// Photo reference (file name or path relative to the photo store).
    pub photo: Option<String>,
}

impl Examinee {
    /// Creates an examinee whose branch will be derived from the roll number.
    pub fn new(roll: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            roll: roll.into(),
            name: name.into(),
            branch: None,
            photo: None,
        }
    }

    /// Sets an explicit branch code, bypassing derivation.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Derives the branch code from the roll number using `span`.
    pub fn with_branch_span(mut self, span: BranchSpan) -> Self {
        self.branch = span.extract(&self.roll);
        self
    }

    /// Sets the photo reference.
    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Fills in the branch from the roll number if none was given.
    ///
    /// Returns whether the examinee has a branch afterwards.
    pub fn resolve_branch(&mut self, span: BranchSpan) -> bool {
        if self.branch.is_none() {
            self.branch = span.extract(&self.roll);
        }
        self.branch.is_some()
    }

    /// Branch code, or the empty string when unresolved.
    #[inline]
    pub fn branch_code(&self) -> &str {
        self.branch.as_deref().unwrap_or("")
    }
}
