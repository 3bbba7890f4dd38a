//! Input validation for timetabling problems.
//!
//! Checks structural integrity of an [`Instance`] before a model is built.
//! Detects:
//! - Duplicate course, room and slot IDs
//! - Zero enrollments and capacities
//! - Malformed time slots, and prohibited/early marks outside the grid
//! - Distance-table defects (missing pairs, conflicts, unknown rooms)
//!
//! Infeasibility (e.g. more students than seats) is *not* a validation
//! error: it is a legitimate solver outcome.

use std::collections::HashSet;

use crate::models::Instance;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description naming the offending entity.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A course has zero enrollment.
    InvalidEnrollment,
    /// A room has zero capacity.
    InvalidCapacity,
    /// A time slot label or value is not a valid clock time.
    MalformedTimeSlot,
    /// A prohibited or early slot is not part of the grid.
    UnknownTimeSlot,
    /// The distance table references a room that doesn't exist.
    InvalidRoomReference,
    /// A pair of distinct rooms has no distance.
    MissingDistance,
    /// Both directions of a room pair are given with different values.
    AsymmetricDistance,
    /// A distance is negative, non-finite, or a non-zero self distance.
    InvalidDistance,
    /// A penalty rate is negative or non-finite.
    InvalidPenalty,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a timetabling problem.
///
/// Checks:
/// 1. No duplicate course IDs
/// 2. No duplicate room IDs
/// 3. No duplicate time slots
/// 4. All enrollments and capacities are positive
/// 5. All time slots are well-formed clock times
/// 6. Prohibited and early slots belong to the grid
/// 7. The distance table resolves to a full symmetric matrix
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(instance: &Instance) -> ValidationResult {
    let mut errors = Vec::new();

    let mut course_ids = HashSet::new();
    for c in &instance.courses {
        if !course_ids.insert(c.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", c.id),
            ));
        }
        if c.enrollment == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidEnrollment,
                format!("Course '{}' has zero enrollment", c.id),
            ));
        }
    }

    let mut room_ids = HashSet::new();
    for r in &instance.rooms {
        if !room_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", r.id),
            ));
        }
        if r.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Room '{}' has zero capacity", r.id),
            ));
        }
    }

    let grid = &instance.time_grid;
    let mut slots = HashSet::new();
    for t in &grid.slots {
        if !t.is_well_formed() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedTimeSlot,
                format!("Malformed time slot {}", t),
            ));
        }
        if !slots.insert(*t) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate time slot: {}", t),
            ));
        }
    }

    for (label, marked) in [("Prohibited", &grid.prohibited), ("Early", &grid.early)] {
        for t in marked {
            if !slots.contains(t) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownTimeSlot,
                    format!("{label} slot {t} is not part of the time grid"),
                ));
            }
        }
    }

    // Duplicate room IDs make pair resolution ambiguous; report them first.
    if room_ids.len() == instance.rooms.len() {
        if let Err(distance_errors) = instance.distances.resolve(&instance.rooms) {
            errors.extend(distance_errors);
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
    use crate::models::{Course, DistanceTable, Room, TimeGrid, TimeSlot};

    fn sample_instance() -> Instance {
        Instance::new(
            TimeGrid::hourly(8, 12)
                .with_prohibited(TimeSlot::hour(10))
                .with_early(TimeSlot::hour(8)),
        )
        .with_course(Course::new("115", 95))
        .with_course(Course::new("145", 12))
        .with_room(Room::new("ETCH1174", 45))
        .with_room(Room::new("STAN105", 292))
        .with_distances(DistanceTable::new().with_distance("ETCH1174", "STAN105", 2.0))
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_instance(&sample_instance()).is_ok());
    }

    #[test]
    fn test_duplicate_course_id() {
        let inst = sample_instance().with_course(Course::new("115", 30));
        let errors = validate_instance(&inst).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("course")));
    }

    #[test]
    fn test_duplicate_room_id() {
        let inst = sample_instance().with_room(Room::new("STAN105", 10));
        let errors = validate_instance(&inst).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("room")));
    }

    #[test]
    fn test_zero_enrollment_and_capacity() {
        let inst = sample_instance()
            .with_course(Course::new("999", 0))
            .with_room(Room::new("CLOSET", 0))
            .with_distances(
                DistanceTable::new()
                    .with_distance("ETCH1174", "STAN105", 2.0)
                    .with_distance("ETCH1174", "CLOSET", 1.0)
                    .with_distance("STAN105", "CLOSET", 1.0),
            );
        let errors = validate_instance(&inst).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidEnrollment && e.message.contains("999")));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidCapacity && e.message.contains("CLOSET")));
    }

    #[test]
    fn test_malformed_slot() {
        let mut inst = sample_instance();
        inst.time_grid.slots.push(TimeSlot::at(24, 0));
        let errors = validate_instance(&inst).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MalformedTimeSlot && e.message.contains("24:00")));
    }

    #[test]
    fn test_duplicate_slot() {
        let mut inst = sample_instance();
        inst.time_grid.slots.push(TimeSlot::hour(9));
        let errors = validate_instance(&inst).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("9:00")));
    }

    #[test]
    fn test_unknown_marked_slot() {
        let mut inst = sample_instance();
        inst.time_grid = inst.time_grid.with_prohibited(TimeSlot::hour(12));
        let errors = validate_instance(&inst).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::UnknownTimeSlot);
        assert!(errors[0].message.starts_with("Prohibited slot 12:00"));
    }

    #[test]
    fn test_missing_distance() {
        let inst = sample_instance().with_distances(DistanceTable::new());
        let errors = validate_instance(&inst).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingDistance);
    }

    #[test]
    fn test_multiple_errors() {
        let inst = sample_instance()
            .with_course(Course::new("115", 0))
            .with_distances(DistanceTable::new().with_distance("ETCH1174", "NOWHERE", 1.0));
        let errors = validate_instance(&inst).unwrap_err();
        assert!(errors.len() >= 4);
    }

    #[test]
    fn test_error_display() {
        let e = ValidationError::new(ValidationErrorKind::InvalidCapacity, "Room 'X' has zero capacity");
        assert_eq!(e.to_string(), "Room 'X' has zero capacity");
    }
}
