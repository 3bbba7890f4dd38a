//! Problem instance: everything one timetabling run needs as input.

use serde::{Deserialize, Serialize};

use super::{Course, DistanceTable, Room, TimeGrid};

/// Courses, rooms, time grid and room distances for one scheduling period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Courses to place.
    pub courses: Vec<Course>,
    /// Rooms available.
    pub rooms: Vec<Room>,
    /// Slots of the scheduling day.
    pub time_grid: TimeGrid,
    /// Travel distances between rooms.
    #[serde(default)]
    pub distances: DistanceTable,
}

impl Instance {
    /// Creates an instance over the given time grid, with no courses or rooms.
    pub fn new(time_grid: TimeGrid) -> Self {
        Self {
            courses: Vec::new(),
            rooms: Vec::new(),
            time_grid,
            distances: DistanceTable::new(),
        }
    }

    /// Adds a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Sets the distance table.
    pub fn with_distances(mut self, distances: DistanceTable) -> Self {
        self.distances = distances;
        self
    }

    /// Finds a course by ID.
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Finds a room by ID.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Sum of all enrollments.
    pub fn total_enrollment(&self) -> u64 {
        self.courses.iter().map(|c| u64::from(c.enrollment)).sum()
    }

    /// Seats offered over all assignable slots (capacity × available slots).
    pub fn total_seat_slots(&self) -> u64 {
        let slots = self.time_grid.available_slots().count() as u64;
        self.rooms.iter().map(|r| u64::from(r.capacity)).sum::<u64>() * slots
    }

    /// Number of (room, slot) places a course could go to, ignoring capacity.
    pub fn place_count(&self) -> usize {
        self.rooms.len() * self.time_grid.available_slots().count()
    }

    /// Courses too large for every room.
    pub fn unplaceable_courses(&self) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|c| !self.rooms.iter().any(|r| c.fits(r.capacity)))
            .collect()
    }
}
