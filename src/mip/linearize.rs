//! AND-linearization of pairs of assignment indicators.
//!
//! For binary `a`, `b` and an auxiliary binary `y`, the inequalities
//!
//! ```text
//! y ≤ a
//! y ≤ b
//! y ≥ a + b − 1
//! ```
//!
//! force `y = a ∧ b` without a product term. All three are required: the
//! objective only ever charges `y` with non-negative coefficients, so
//! without the lower bound a minimizing solver would set `y = 0` even when
//! both sessions are scheduled and never pay the distance penalty.
//!
//! # Reference
//! Glover & Woolsey (1974), "Converting the 0-1 polynomial programming
//! problem to a 0-1 linear program"

use super::model::{ConstraintFamily, LinearConstraint, LinearExpr, Sense, TimetableModel, VarId};
use crate::models::Instance;

/// Which pairing indicators are declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PairingScope {
    /// Every course × ordered room pair × ordered slot pair (`|C|·|R|²·|T|²`),
    /// including pairs that can never be priced.
    #[default]
    Full,
    /// Only ordered slot pairs that are consecutive, i.e. the pairs the
    /// distance term can charge.
    AdjacentOnly,
}

/// The three inequalities forcing `y = a ∧ b`.
pub fn and_constraints(y: VarId, a: VarId, b: VarId, name: &str) -> [LinearConstraint; 3] {
    [
        LinearConstraint::new(
            ConstraintFamily::Linearization,
            format!("{name}.le_first"),
            LinearExpr::new().term(y, 1.0).term(a, -1.0),
            Sense::Le,
            0.0,
        ),
        LinearConstraint::new(
            ConstraintFamily::Linearization,
            format!("{name}.le_second"),
            LinearExpr::new().term(y, 1.0).term(b, -1.0),
            Sense::Le,
            0.0,
        ),
        LinearConstraint::new(
            ConstraintFamily::Linearization,
            format!("{name}.ge_both"),
            LinearExpr::new().term(y, 1.0).term(a, -1.0).term(b, -1.0),
            Sense::Ge,
            -1.0,
        ),
    ]
}

/// Declares pairing indicators for `scope` and links each to its two
/// assignment indicators.
///
/// Slot pairs are filtered before the room loops, so `AdjacentOnly` never
/// enumerates the full cross product.
pub(crate) fn declare_pairings(model: &mut TimetableModel, instance: &Instance, scope: PairingScope) {
    let grid = &instance.time_grid;
    let time_pairs: Vec<(usize, usize)> = match scope {
        PairingScope::Full => (0..grid.len())
            .flat_map(|t1| (0..grid.len()).map(move |t2| (t1, t2)))
            .collect(),
        PairingScope::AdjacentOnly => grid.adjacent_pairs(),
    };
    let room_count = instance.rooms.len();

    for (c, course) in instance.courses.iter().enumerate() {
        for r1 in 0..room_count {
            for r2 in 0..room_count {
                for &(t1, t2) in &time_pairs {
                    let (Some(a), Some(b)) =
                        (model.assignment_var(c, r1, t1), model.assignment_var(c, r2, t2))
                    else {
                        continue;
                    };
                    let name = format!(
                        "y[{},{},{},{},{}]",
                        course.id,
                        instance.rooms[r1].id,
                        instance.rooms[r2].id,
                        grid.slots[t1],
                        grid.slots[t2]
                    );
                    let y = model.declare_pairing((c, r1, r2, t1, t2), || name.clone());
                    for constraint in and_constraints(y, a, b, &name) {
                        model.add_constraint(constraint);
                    }
                }
            }
        }
    }
}
