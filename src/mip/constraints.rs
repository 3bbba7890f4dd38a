//! Hard constraint families over the assignment indicators.

use super::model::{ConstraintFamily, LinearConstraint, LinearExpr, Sense, TimetableModel};
use crate::models::Instance;

/// `Σ_c enrollment[c]·x[c,r,t] ≤ capacity[r]` for every (room, slot).
///
/// An over-enrolled course with no large enough room makes the model
/// infeasible; that is left for the solver to report.
pub(crate) fn add_capacity(model: &mut TimetableModel, instance: &Instance) {
    for (r, room) in instance.rooms.iter().enumerate() {
        for (t, slot) in instance.time_grid.slots.iter().enumerate() {
            let mut lhs = LinearExpr::new();
            for (c, course) in instance.courses.iter().enumerate() {
                if let Some(x) = model.assignment_var(c, r, t) {
                    lhs.add_term(x, f64::from(course.enrollment));
                }
            }
            model.add_constraint(LinearConstraint::new(
                ConstraintFamily::Capacity,
                format!("capacity[{},{}]", room.id, slot),
                lhs,
                Sense::Le,
                f64::from(room.capacity),
            ));
        }
    }
}

/// `Σ_{r,t} x[c,r,t] = 1` for every course.
pub(crate) fn add_single_assignment(model: &mut TimetableModel, instance: &Instance) {
    let dims = model.dimensions();
    for (c, course) in instance.courses.iter().enumerate() {
        let mut lhs = LinearExpr::new();
        for r in 0..dims.rooms {
            for t in 0..dims.times {
                if let Some(x) = model.assignment_var(c, r, t) {
                    lhs.add_term(x, 1.0);
                }
            }
        }
        model.add_constraint(LinearConstraint::new(
            ConstraintFamily::SingleAssignment,
            format!("single[{}]", course.id),
            lhs,
            Sense::Eq,
            1.0,
        ));
    }
}

/// `Σ_c x[c,r,t] ≤ 1` for every (room, slot).
pub(crate) fn add_no_overlap(model: &mut TimetableModel, instance: &Instance) {
    let dims = model.dimensions();
    for (r, room) in instance.rooms.iter().enumerate() {
        for (t, slot) in instance.time_grid.slots.iter().enumerate() {
            let mut lhs = LinearExpr::new();
            for c in 0..dims.courses {
                if let Some(x) = model.assignment_var(c, r, t) {
                    lhs.add_term(x, 1.0);
                }
            }
            model.add_constraint(LinearConstraint::new(
                ConstraintFamily::NoOverlap,
                format!("no_overlap[{},{}]", room.id, slot),
                lhs,
                Sense::Le,
                1.0,
            ));
        }
    }
}

/// `Σ_{c,r} x[c,r,t] = 0` for every prohibited slot.
pub(crate) fn add_prohibited(model: &mut TimetableModel, instance: &Instance) {
    let dims = model.dimensions();
    let grid = &instance.time_grid;
    for (t, slot) in grid.slots.iter().enumerate() {
        if !grid.is_prohibited(slot) {
            continue;
        }
        let mut lhs = LinearExpr::new();
        for c in 0..dims.courses {
            for r in 0..dims.rooms {
                if let Some(x) = model.assignment_var(c, r, t) {
                    lhs.add_term(x, 1.0);
                }
            }
        }
        model.add_constraint(LinearConstraint::new(
            ConstraintFamily::ProhibitedSlot,
            format!("prohibited[{slot}]"),
            lhs,
            Sense::Eq,
            0.0,
        ));
    }
}
