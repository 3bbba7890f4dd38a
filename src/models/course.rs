//! Course model.
//!
//! A course is a single weekly session that must be placed in exactly one
//! room at exactly one time slot.

use serde::{Deserialize, Serialize};

/// A course to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier (e.g., "115", "142A").
    pub id: String,
    /// Number of enrolled students. Must be positive.
    pub enrollment: u32,
}

impl Course {
    /// Creates a new course with the given enrollment.
    pub fn new(id: impl Into<String>, enrollment: u32) -> Self {
        Self {
            id: id.into(),
            enrollment,
        }
    }

    /// Whether the course fits in a room of the given capacity.
    #[inline]
    pub fn fits(&self, capacity: u32) -> bool {
        self.enrollment <= capacity
    }
}
