//! MILP-driven scheduler and KPI evaluation.
//!
//! `MipScheduler` runs the whole pipeline: validate the instance, build the
//! model, hand it to a [`MilpSolver`], and decode the assignment indicators
//! into a [`Schedule`]. An infeasible instance yields an outcome with
//! [`SolveStatus::Infeasible`] and no schedule; only invalid input and
//! backend failures are errors.
//!
//! `ScheduleKpi` recomputes the penalty breakdown of a schedule from the
//! input data alone.

mod kpi;

pub use kpi::ScheduleKpi;

use log::{info, warn};

use crate::config::PenaltyConfig;
use crate::error::TimetableError;
use crate::mip::{PairingScope, TimetableMipBuilder, TimetableModel};
use crate::models::{Instance, Schedule, ScheduledSession};
use crate::solver::{MilpSolver, SolveStatus};

/// Result of a scheduling run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleOutcome {
    /// Terminal solver state.
    pub status: SolveStatus,
    /// Decoded timetable, when the solver found one.
    pub schedule: Option<Schedule>,
    /// Objective value of the timetable.
    pub objective: Option<f64>,
}

impl ScheduleOutcome {
    /// Whether a timetable was found (optimal or not).
    pub fn is_feasible(&self) -> bool {
        self.schedule.is_some()
    }
}

/// Validates, formulates, solves and decodes a timetabling instance.
///
/// # Example
///
/// ```
/// use u_timetable::scheduler::MipScheduler;
/// use u_timetable::solver::{GoodLpSolver, SolveStatus};
/// use u_timetable::models::{Course, Instance, Room, TimeGrid, TimeSlot};
///
/// // 8:00 is early, so 9:00 is the only cheapest slot
/// let instance = Instance::new(TimeGrid::hourly(8, 10).with_early(TimeSlot::hour(8)))
///     .with_course(Course::new("145", 12))
///     .with_room(Room::new("ETCH1174", 45));
///
/// let outcome = MipScheduler::new(GoodLpSolver::new()).schedule(&instance).unwrap();
/// assert_eq!(outcome.status, SolveStatus::Optimal);
/// let schedule = outcome.schedule.unwrap();
/// assert_eq!(
///     schedule.sessions[0].to_string(),
///     "Course 145 is scheduled in room ETCH1174 at time 9:00"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MipScheduler<S> {
    solver: S,
    penalties: PenaltyConfig,
    pairing_scope: PairingScope,
}

impl<S: MilpSolver> MipScheduler<S> {
    /// Creates a scheduler with default penalties.
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            penalties: PenaltyConfig::default(),
            pairing_scope: PairingScope::default(),
        }
    }

    /// Sets the objective weights.
    pub fn with_penalties(mut self, penalties: PenaltyConfig) -> Self {
        self.penalties = penalties;
        self
    }

    /// Sets which pairing indicators the model declares.
    pub fn with_pairing_scope(mut self, scope: PairingScope) -> Self {
        self.pairing_scope = scope;
        self
    }

    /// Current penalty configuration.
    pub fn penalties(&self) -> &PenaltyConfig {
        &self.penalties
    }

    /// Builds the model the scheduler would solve.
    pub fn build_model(&self, instance: &Instance) -> Result<TimetableModel, TimetableError> {
        TimetableMipBuilder::new(instance)
            .with_penalties(self.penalties.clone())
            .with_pairing_scope(self.pairing_scope)
            .build()
    }

    /// Schedules the instance.
    ///
    /// # Errors
    /// Invalid input or a backend failure. Infeasibility and limits are
    /// reported through [`ScheduleOutcome::status`].
    pub fn schedule(&self, instance: &Instance) -> Result<ScheduleOutcome, TimetableError> {
        let model = self.build_model(instance)?;
        info!(
            "scheduling {} courses ({} students) over {} places ({} seat-slots)",
            instance.courses.len(),
            instance.total_enrollment(),
            instance.place_count(),
            instance.total_seat_slots()
        );
        if instance.courses.len() > instance.place_count() {
            warn!("more courses than (room, slot) places; no timetable exists");
        }
        for course in instance.unplaceable_courses() {
            warn!("course {} ({} students) fits no room", course.id, course.enrollment);
        }

        let outcome = self.solver.solve(&model)?;
        info!(
            "{} finished with status {:?} (objective {:?})",
            self.solver.name(),
            outcome.status,
            outcome.objective
        );

        let schedule = outcome
            .values
            .as_deref()
            .map(|values| Self::decode(&model, instance, values));

        Ok(ScheduleOutcome {
            status: outcome.status,
            schedule,
            objective: outcome.objective,
        })
    }

    /// Turns assignment indicators equal to 1 into sessions, in course order.
    fn decode(model: &TimetableModel, instance: &Instance, values: &[bool]) -> Schedule {
        let mut schedule = Schedule::new();
        for (course, room, time) in model.placements(values) {
            schedule.add_session(ScheduledSession::new(
                instance.courses[course].id.clone(),
                instance.rooms[room].id.clone(),
                instance.time_grid.slots[time],
            ));
        }
        schedule
    }
}
