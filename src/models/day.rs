//! Exam day model.

use serde::{Deserialize, Serialize};

/// One allocation pass: a date or session label.
///
/// Each day is seated independently of every other day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamDay {
    /// Unique day/session identifier (e.g. `2025-11-20-AM`).
    pub id: String,
    /// Human-readable label for charts.
    pub label: String,
    /// Roll numbers sitting this day. `None` = the whole roster.
    pub rolls: Option<Vec<String>>,
}

impl ExamDay {
    /// Creates a day on which the whole roster sits.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            rolls: None,
        }
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Restricts the day to the given roll numbers.
    pub fn with_rolls<I, S>(mut self, rolls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rolls = Some(rolls.into_iter().map(Into::into).collect());
        self
    }

    /// Label if set, otherwise the identifier.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }

    /// Whether the given roll number sits on this day.
    pub fn includes(&self, roll: &str) -> bool {
        match &self.rolls {
            None => true,
            Some(rolls) => rolls.iter().any(|r| r == roll),
        }
    }
}
