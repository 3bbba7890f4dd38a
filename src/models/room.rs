//! Room model.
//!
//! Rooms are the spatial resource of a timetable. Each room seats a fixed
//! number of students; travel between rooms is priced through a
//! [`DistanceTable`](super::DistanceTable).

use serde::{Deserialize, Serialize};

/// A lecture room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier (e.g., "STAN105").
    pub id: String,
    /// Number of seats. Must be positive.
    pub capacity: u32,
}

impl Room {
    /// Creates a new room.
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }

    /// Seats left empty when a class of `enrollment` students uses this room.
    ///
    /// Saturates at zero for over-enrolled classes.
    #[inline]
    pub fn unused_seats(&self, enrollment: u32) -> u32 {
        self.capacity.saturating_sub(enrollment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_json_shape() {
        let r = Room::new("STAN105", 292);
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            serde_json::json!({"id": "STAN105", "capacity": 292})
        );
        let back: Room = serde_json::from_str(r#"{"id": "STAN105", "capacity": 292}"#).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_unused_seats() {
        let r = Room::new("ETCH1174", 45);
        assert_eq!(r.unused_seats(12), 33);
        assert_eq!(r.unused_seats(45), 0);
        assert_eq!(r.unused_seats(95), 0);
    }
}
