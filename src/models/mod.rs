//! Timetabling domain models.
//!
//! Provides the input types of a room/time assignment problem and the
//! schedule decoded from a solution.
//!
//! | Type | Role |
//! |------|------|
//! | `Course` | What must be placed (with enrollment) |
//! | `Room` | Where it can go (with capacity) |
//! | `TimeSlot` / `TimeGrid` | When it can go (prohibited and early slots) |
//! | `DistanceTable` | Travel cost between rooms |
//! | `Instance` | The bundle of all of the above |
//! | `Schedule` | The placement found by a solver |

mod course;
mod distance;
mod instance;
mod room;
mod schedule;
mod time_slot;

pub use course::Course;
pub use distance::{DistanceEntry, DistanceMatrix, DistanceTable};
pub use instance::Instance;
pub use room::Room;
pub use schedule::{Schedule, ScheduledSession};
pub use time_slot::{TimeGrid, TimeSlot};
