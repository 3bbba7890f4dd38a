//! Course timetabling as a binary MILP.
//!
//! Assigns every course one (room, time slot) so that no room is
//! double-booked, enrollment never exceeds capacity, and nothing runs in a
//! prohibited slot. The objective trades off early-morning slots, oversized
//! rooms and walking distance between consecutive sessions of a course.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Course`, `Room`, `TimeSlot`, `TimeGrid`,
//!   `DistanceTable`, `Instance`, `Schedule`
//! - **`config`**: Objective weights (`PenaltyConfig`)
//! - **`validation`**: Input integrity checks (duplicate IDs, slot labels,
//!   distance table coverage)
//! - **`mip`**: Model formulation — variables, constraint families,
//!   AND-linearization, objective
//! - **`solver`**: `MilpSolver` interface and the `good_lp` backend
//! - **`scheduler`**: End-to-end `MipScheduler` and `ScheduleKpi`
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Course, DistanceTable, Instance, Room, TimeGrid, TimeSlot};
//! use u_timetable::scheduler::MipScheduler;
//! use u_timetable::solver::GoodLpSolver;
//!
//! let rooms = vec![Room::new("ETCH1174", 45), Room::new("STAN105", 292)];
//! let instance = Instance::new(
//!     TimeGrid::hourly(8, 11)
//!         .with_prohibited(TimeSlot::hour(10))
//!         .with_early(TimeSlot::hour(8)),
//! )
//! .with_course(Course::new("145", 12))
//! .with_course(Course::new("120", 137))
//! .with_room(rooms[0].clone())
//! .with_room(rooms[1].clone())
//! .with_distances(DistanceTable::uniform(&rooms, 2.0));
//!
//! let outcome = MipScheduler::new(GoodLpSolver::new()).schedule(&instance).unwrap();
//! let schedule = outcome.schedule.unwrap();
//! assert_eq!(schedule.session_count(), 2);
//! assert!(!schedule.has_room_conflict());
//! ```
//!
//! # References
//!
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"
//! - Wolsey (1998), "Integer Programming"

pub mod config;
pub mod error;
pub mod mip;
pub mod models;
pub mod scheduler;
pub mod solver;
pub mod validation;

pub use config::{CapacityCharge, PenaltyConfig};
pub use error::TimetableError;
pub use scheduler::{MipScheduler, ScheduleOutcome};
pub use solver::{GoodLpSolver, MilpSolver, SolveStatus};
