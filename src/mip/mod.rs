//! MILP formulation of course timetabling.
//!
//! Translates an [`Instance`] and [`PenaltyConfig`] into a
//! [`TimetableModel`]: binary assignment indicators `x[c,r,t]`, pairing
//! indicators `y[c,r1,r2,t1,t2]`, the hard constraint families and a linear
//! objective to minimize. Building is pure and deterministic; solving is
//! left to a [`MilpSolver`](crate::solver::MilpSolver).
//!
//! # Formulation
//!
//! ```text
//! min  Σ (w(t) + rate·cap[r]) x[c,r,t]  +  Σ_{|h(t1)−h(t2)|=1} dist_rate·d(r1,r2) y[c,r1,r2,t1,t2]
//! s.t. Σ_c enr[c] x[c,r,t] ≤ cap[r]          ∀ r,t
//!      Σ_{r,t} x[c,r,t] = 1                   ∀ c
//!      Σ_c x[c,r,t] ≤ 1                       ∀ r,t
//!      Σ_{c,r} x[c,r,t] = 0                   ∀ prohibited t
//!      y ≤ x[c,r1,t1],  y ≤ x[c,r2,t2],  y ≥ x[c,r1,t1] + x[c,r2,t2] − 1
//! ```
//!
//! # Reference
//! Burke & Petrovic (2002), "Recent research directions in automated
//! timetabling"

mod constraints;
mod linearize;
pub mod model;
mod objective;

use log::debug;

pub use linearize::{and_constraints, PairingScope};
pub use model::{
    ConstraintFamily, LinearConstraint, LinearExpr, ModelDimensions, Objective, Sense,
    TimetableModel, VarId, Variable, VariableKind,
};

use crate::config::PenaltyConfig;
use crate::error::TimetableError;
use crate::models::Instance;
use crate::validation::validate_instance;

/// Builds a MILP model from timetabling domain objects.
///
/// # Example
/// ```
/// use u_timetable::mip::TimetableMipBuilder;
/// use u_timetable::models::{Course, DistanceTable, Instance, Room, TimeGrid, TimeSlot};
///
/// let rooms = vec![Room::new("ETCH1174", 45), Room::new("STAN105", 292)];
/// let instance = Instance::new(TimeGrid::hourly(8, 11).with_prohibited(TimeSlot::hour(10)))
///     .with_course(Course::new("145", 12))
///     .with_room(rooms[0].clone())
///     .with_room(rooms[1].clone())
///     .with_distances(DistanceTable::uniform(&rooms, 2.0));
///
/// let model = TimetableMipBuilder::new(&instance).build().unwrap();
/// assert_eq!(model.assignment_count(), 1 * 2 * 3);
/// assert_eq!(model.pairing_count(), 1 * 2 * 2 * 3 * 3);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableMipBuilder<'a> {
    instance: &'a Instance,
    penalties: PenaltyConfig,
    pairing_scope: PairingScope,
}

impl<'a> TimetableMipBuilder<'a> {
    /// Creates a builder with default penalties and full pairing scope.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            penalties: PenaltyConfig::default(),
            pairing_scope: PairingScope::default(),
        }
    }

    /// Sets the objective weights.
    pub fn with_penalties(mut self, penalties: PenaltyConfig) -> Self {
        self.penalties = penalties;
        self
    }

    /// Sets which pairing indicators are declared.
    pub fn with_pairing_scope(mut self, scope: PairingScope) -> Self {
        self.pairing_scope = scope;
        self
    }

    /// Builds the model.
    ///
    /// Creates, in order:
    /// - `x[c,r,t]` for every course, room and slot (prohibited slots included)
    /// - Capacity, SingleAssignment, NoOverlap and ProhibitedSlot constraints
    /// - `y` indicators with their three linearization inequalities
    /// - Early-time, capacity and distance objective terms
    ///
    /// # Errors
    /// [`TimetableError::InvalidInput`] listing every defect of the instance
    /// or penalty configuration. An infeasible instance is not an error.
    pub fn build(&self) -> Result<TimetableModel, TimetableError> {
        let instance = self.instance;

        let mut errors = validate_instance(instance).err().unwrap_or_default();
        if let Err(penalty_errors) = self.penalties.validate() {
            errors.extend(penalty_errors);
        }
        if !errors.is_empty() {
            return Err(TimetableError::InvalidInput(errors));
        }
        let distances = instance.distances.resolve(&instance.rooms)?;

        let grid = &instance.time_grid;
        let mut model = TimetableModel::new(ModelDimensions {
            courses: instance.courses.len(),
            rooms: instance.rooms.len(),
            times: grid.len(),
        });
        model.declare_assignments(|c, r, t| {
            format!(
                "x[{},{},{}]",
                instance.courses[c].id, instance.rooms[r].id, grid.slots[t]
            )
        });

        constraints::add_capacity(&mut model, instance);
        constraints::add_single_assignment(&mut model, instance);
        constraints::add_no_overlap(&mut model, instance);
        constraints::add_prohibited(&mut model, instance);

        linearize::declare_pairings(&mut model, instance, self.pairing_scope);

        objective::add_assignment_terms(&mut model, instance, &self.penalties);
        let priced = objective::add_adjacency_terms(&mut model, instance, &distances, &self.penalties);

        debug!(
            "built timetable model: {} courses, {} rooms, {} slots -> {} variables ({} pairing, {} priced), {} constraints",
            instance.courses.len(),
            instance.rooms.len(),
            grid.len(),
            model.variable_count(),
            model.pairing_count(),
            priced,
            model.constraint_count()
        );

        Ok(model)
    }
}
