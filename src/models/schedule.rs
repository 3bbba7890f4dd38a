//! Schedule (solution) model.
//!
//! A schedule places every course in one room at one time slot. It is
//! decoded from the assignment indicators of a solved model.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TimeSlot;

/// A timetable: one session per scheduled course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Placed sessions, in course order.
    pub sessions: Vec<ScheduledSession>,
}

/// A course placed in a room at a time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSession {
    /// Scheduled course ID.
    pub course_id: String,
    /// Assigned room ID.
    pub room_id: String,
    /// Assigned slot.
    pub time: TimeSlot,
}

impl ScheduledSession {
    /// Creates a new session.
    pub fn new(course_id: impl Into<String>, room_id: impl Into<String>, time: TimeSlot) -> Self {
        Self {
            course_id: course_id.into(),
            room_id: room_id.into(),
            time,
        }
    }
}

impl fmt::Display for ScheduledSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Course {} is scheduled in room {} at time {}",
            self.course_id, self.room_id, self.time
        )
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session.
    pub fn add_session(&mut self, session: ScheduledSession) {
        self.sessions.push(session);
    }

    /// Finds the session of a course.
    pub fn session_for_course(&self, course_id: &str) -> Option<&ScheduledSession> {
        self.sessions.iter().find(|s| s.course_id == course_id)
    }

    /// All sessions held in a room.
    pub fn sessions_in_room(&self, room_id: &str) -> Vec<&ScheduledSession> {
        self.sessions.iter().filter(|s| s.room_id == room_id).collect()
    }

    /// All sessions held at a slot.
    pub fn sessions_at(&self, time: &TimeSlot) -> Vec<&ScheduledSession> {
        self.sessions.iter().filter(|s| &s.time == time).collect()
    }

    /// Number of sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Whether two sessions share a room and a slot.
    pub fn has_room_conflict(&self) -> bool {
        self.sessions.iter().enumerate().any(|(i, a)| {
            self.sessions[i + 1..]
                .iter()
                .any(|b| a.room_id == b.room_id && a.time == b.time)
        })
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for session in &self.sessions {
            writeln!(f, "{session}")?;
        }
        Ok(())
    }
}
