//! Input validation for seating runs.
//!
//! Checks structural integrity of the roster, room catalog and day list
//! before any seat plan is built. Detects:
//! - Missing required fields (roll number, name, room id, day id)
//! - Duplicate roll numbers, room ids and day ids
//! - Non-positive room capacities and out-of-range buffer overrides
//! - Examinees whose branch could not be derived
//! - Day rosters referencing unknown roll numbers
//!
//! Every problem is reported, not just the first one.

use std::collections::HashSet;
use std::fmt;

use crate::config::MAX_BUFFER;
use crate::models::{ExamDay, Examinee, Room};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required field is empty.
    MissingField,
    /// Two entities share the same key.
    DuplicateId,
    /// A room's capacity is zero or negative.
    InvalidCapacity,
    /// A room's buffer override is out of range.
    InvalidBuffer,
    /// No branch code could be derived from the roll number.
    UnresolvedBranch,
    /// A day roster references a roll number not in the roster.
    UnknownExaminee,
    /// No exam days were given.
    NoExamDays,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the input snapshot of a seating run.
///
/// Branches are expected to be resolved already (see
/// [`Examinee::resolve_branch`]).
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    examinees: &[Examinee],
    rooms: &[Room],
    days: &[ExamDay],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut rolls = HashSet::new();
    for (i, e) in examinees.iter().enumerate() {
        if e.roll.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingField,
                format!("Examinee #{} has no roll number", i + 1),
            ));
            continue;
        }
        if !rolls.insert(e.roll.trim()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate roll number: {}", e.roll),
            ));
        }
        if e.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingField,
                format!("Examinee '{}' has no name", e.roll),
            ));
        }
        if e.branch_code().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnresolvedBranch,
                format!("Cannot derive branch from roll number '{}'", e.roll),
            ));
        }
    }

    let mut room_ids = HashSet::new();
    for (i, r) in rooms.iter().enumerate() {
        if r.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingField,
                format!("Room #{} has no identifier", i + 1),
            ));
        } else if !room_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", r.id),
            ));
        }
        if r.capacity <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Room '{}' has non-positive capacity {}", r.id, r.capacity),
            ));
        }
        if let Some(buffer) = r.buffer.filter(|&b| b > MAX_BUFFER) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBuffer,
                format!("Room '{}' buffer {buffer} is out of range 0..={MAX_BUFFER}", r.id),
            ));
        }
    }

    if days.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoExamDays,
            "No exam days given",
        ));
    }

    let mut day_ids = HashSet::new();
    for (i, d) in days.iter().enumerate() {
        if d.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingField,
                format!("Exam day #{} has no identifier", i + 1),
            ));
        } else if !day_ids.insert(d.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate exam day ID: {}", d.id),
            ));
        }

        let Some(day_rolls) = &d.rolls else {
            continue;
        };
        let mut seen = HashSet::new();
        for roll in day_rolls {
            if !rolls.contains(roll.trim()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownExaminee,
                    format!("Exam day '{}' references unknown roll number '{roll}'", d.id),
                ));
            } else if !seen.insert(roll.trim()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Exam day '{}' lists roll number '{roll}' twice", d.id),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_examinees() -> Vec<Examinee> {
        vec![
            Examinee::new("2201CS01", "Asha").with_branch("CS"),
            Examinee::new("2201EE01", "Bilal").with_branch("EE"),
            Examinee::new("2201ME01", "Chen").with_branch("ME"),
        ]
    }

    fn sample_rooms() -> Vec<Room> {
        vec![Room::new("R1", 30).with_layout(5, 6), Room::new("R2", 20)]
    }

    fn sample_days() -> Vec<ExamDay> {
        vec![ExamDay::new("D1"), ExamDay::new("D2").with_rolls(["2201CS01"])]
    }

    fn has_kind(errors: &[ValidationError], kind: ValidationErrorKind) -> bool {
        errors.iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_examinees(), &sample_rooms(), &sample_days()).is_ok());
    }

    #[test]
    fn test_duplicate_roll_number() {
        let mut examinees = sample_examinees();
        examinees.push(Examinee::new("2201CS01", "Dup").with_branch("CS"));

        let errors = validate_input(&examinees, &sample_rooms(), &sample_days()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("roll")));
    }

    #[test]
    fn test_padded_roll_is_duplicate() {
        let mut examinees = sample_examinees();
        examinees.push(Examinee::new(" 2201CS01 ", "Padded").with_branch("CS"));

        let errors = validate_input(&examinees, &sample_rooms(), &sample_days()).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_missing_fields() {
        let examinees = vec![
            Examinee::new("", "Nameless roll").with_branch("CS"),
            Examinee::new("2201CS09", " ").with_branch("CS"),
        ];
        let errors = validate_input(&examinees, &sample_rooms(), &sample_days()).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::MissingField)
                .count(),
            2
        );
    }

    #[test]
    fn test_unresolved_branch() {
        let examinees = vec![Examinee::new("22", "Short roll")];
        let errors = validate_input(&examinees, &sample_rooms(), &sample_days()).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::UnresolvedBranch));
    }

    #[test]
    fn test_room_problems() {
        let rooms = vec![
            Room::new("R1", 0),
            Room::new("R1", 10),
            Room::new("R3", -5),
            Room::new("R4", 10).with_buffer(60),
        ];
        let errors = validate_input(&sample_examinees(), &rooms, &sample_days()).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::DuplicateId));
        assert!(has_kind(&errors, ValidationErrorKind::InvalidBuffer));
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidCapacity)
                .count(),
            2
        );
    }

    #[test]
    fn test_day_problems() {
        let days = vec![
            ExamDay::new("D1").with_rolls(["2201CS01", "NOPE", "2201CS01"]),
            ExamDay::new("D1"),
        ];
        let errors = validate_input(&sample_examinees(), &sample_rooms(), &days).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::UnknownExaminee));
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::DuplicateId)
                .count(),
            2
        );
    }

    #[test]
    fn test_no_days() {
        let errors = validate_input(&sample_examinees(), &sample_rooms(), &[]).unwrap_err();
        assert!(has_kind(&errors, ValidationErrorKind::NoExamDays));
    }

    #[test]
    fn test_multiple_errors_reported_together() {
        let examinees = vec![Examinee::new("22", "")];
        let rooms = vec![Room::new("R1", 0)];
        let errors = validate_input(&examinees, &rooms, &[]).unwrap_err();
        assert!(errors.len() >= 4);
    }
}
