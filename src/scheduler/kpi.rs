//! Schedule quality metrics (KPIs).
//!
//! Recomputes the penalty components of a schedule directly from the input
//! data, without the MILP model. For a solved model the KPI total equals
//! the model's objective value, which makes this an independent check on
//! the formulation.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Time penalty | Σ slot weight (early weight or 1) |
//! | Capacity penalty | Σ capacity cost of the assigned room |
//! | Distance penalty | Σ rate × distance over a course's consecutive sessions |
//! | Unused seats | Σ (capacity − enrollment) |
//! | Avg seat utilization | mean(enrollment / capacity) |

use crate::config::PenaltyConfig;
use crate::error::TimetableError;
use crate::models::{Instance, Schedule};

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    /// Sessions placed in early slots.
    pub early_sessions: usize,
    /// Early-time term (early weight per early session, 1 otherwise).
    pub time_penalty: f64,
    /// Capacity term.
    pub capacity_penalty: f64,
    /// Distance term.
    pub distance_penalty: f64,
    /// Sum of the three terms.
    pub total_penalty: f64,
    /// Empty seats across all sessions.
    pub unused_seats: u64,
    /// Mean fraction of seats filled (0.0..=1.0 for feasible schedules).
    pub avg_seat_utilization: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and its input instance.
    ///
    /// Sessions naming an unknown course or room are ignored.
    ///
    /// # Errors
    /// [`TimetableError::InvalidInput`] if the distance table does not resolve.
    pub fn calculate(
        schedule: &Schedule,
        instance: &Instance,
        penalties: &PenaltyConfig,
    ) -> Result<Self, TimetableError> {
        let distances = instance.distances.resolve(&instance.rooms)?;
        let grid = &instance.time_grid;

        let mut early_sessions = 0;
        let mut time_penalty = 0.0;
        let mut capacity_penalty = 0.0;
        let mut unused_seats: u64 = 0;
        let mut utilization_sum = 0.0;
        let mut counted = 0usize;

        // (room index, slot) per known session, grouped by course
        let mut placed: Vec<Vec<(usize, usize)>> = vec![Vec::new(); instance.courses.len()];

        for session in &schedule.sessions {
            let Some(c) = instance.courses.iter().position(|c| c.id == session.course_id) else {
                continue;
            };
            let Some(r) = instance.rooms.iter().position(|r| r.id == session.room_id) else {
                continue;
            };
            let course = &instance.courses[c];
            let room = &instance.rooms[r];

            if grid.is_early(&session.time) {
                early_sessions += 1;
            }
            time_penalty += grid.slot_weight(&session.time, penalties.early_time_penalty);
            capacity_penalty += penalties.capacity_cost(room.capacity, course.enrollment);
            unused_seats += u64::from(room.unused_seats(course.enrollment));
            utilization_sum += f64::from(course.enrollment) / f64::from(room.capacity.max(1));
            counted += 1;

            if let Some(t) = grid.index_of(&session.time) {
                placed[c].push((r, t));
            }
        }

        let mut distance_penalty = 0.0;
        for sessions in &placed {
            for &(r1, t1) in sessions {
                for &(r2, t2) in sessions {
                    if grid.slots[t1].is_adjacent_to(&grid.slots[t2]) {
                        distance_penalty += penalties.distance_penalty * distances.get(r1, r2);
                    }
                }
            }
        }

        let avg_seat_utilization = if counted == 0 {
            0.0
        } else {
            utilization_sum / counted as f64
        };

        Ok(Self {
            early_sessions,
            time_penalty,
            capacity_penalty,
            distance_penalty,
            total_penalty: time_penalty + capacity_penalty + distance_penalty,
            unused_seats,
            avg_seat_utilization,
        })
    }

    /// Whether the schedule stays within the given penalty budget and fill rate.
    pub fn meets_thresholds(&self, max_penalty: f64, min_utilization: f64) -> bool {
        self.total_penalty <= max_penalty && self.avg_seat_utilization >= min_utilization
    }
}
