//! Exact reductions applied before a model reaches a backend.
//!
//! All variables are binary, which makes the following rules safe:
//!
//! - **Fixing.** In a `≤` or `=` row whose coefficients are all
//!   non-negative, a variable whose coefficient alone exceeds the row's
//!   right-hand side is 0 in every feasible point. Capacity rows fix
//!   courses that do not fit; prohibited-slot rows fix the whole slot.
//! - **Exclusive pairs.** A pairing `y = a ∧ b` is 0 when either operand is
//!   fixed, or when `a` and `b` share an at-most-one row (all coefficients
//!   1, right-hand side 1).
//! - **Unpriced pairs.** A pairing with a zero objective coefficient does
//!   not influence the optimum and is left out. A positive coefficient only
//!   needs `y ≥ a + b − 1`, since minimization keeps `y` at its lower bound.
//!
//! Pairings left out or relaxed are restored as `a ∧ b` by
//! [`Reduction::restore`], so the expanded solution satisfies every row of
//! the original model.

use crate::mip::model::TOLERANCE;
use crate::mip::{ConstraintFamily, LinearConstraint, Sense, TimetableModel, VarId};

/// Which variables and rows a backend has to see.
#[derive(Debug, Clone)]
pub(crate) struct Reduction {
    active: Vec<bool>,
    fixed: usize,
    rows: Vec<usize>,
    pairings: Vec<(VarId, VarId, VarId)>,
}

impl Reduction {
    /// Analyses `model`.
    pub(crate) fn new(model: &TimetableModel) -> Self {
        let n = model.variable_count();
        let mut fixed_zero = vec![false; n];
        // at-most-one rows each variable belongs to
        let mut exclusive: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (i, c) in model.constraints().iter().enumerate() {
            if c.sense == Sense::Ge {
                continue;
            }
            let terms = c.lhs.terms();
            if terms.iter().any(|&(_, coef)| coef < 0.0) {
                continue;
            }
            let slack = c.rhs - c.lhs.constant();
            for &(v, coef) in terms {
                if coef > slack + TOLERANCE {
                    fixed_zero[v.index()] = true;
                }
            }
            let at_most_one = (slack - 1.0).abs() <= TOLERANCE
                && terms.iter().all(|&(_, coef)| (coef - 1.0).abs() <= TOLERANCE);
            if at_most_one {
                for &(v, _) in terms {
                    exclusive[v.index()].push(i);
                }
            }
        }

        let mut active: Vec<bool> = fixed_zero.iter().map(|f| !f).collect();
        let mut keep_upper = vec![true; n];
        let mut pairings = Vec::with_capacity(model.pairing_count());

        for y in model.pairing_vars() {
            let Some((a, b)) = model.pairing_operands(y) else {
                continue;
            };
            pairings.push((y, a, b));

            let shares_row = a != b
                && exclusive[a.index()]
                    .iter()
                    .any(|row| exclusive[b.index()].contains(row));
            let coef = model.objective().coefficient(y);
            if fixed_zero[a.index()] || fixed_zero[b.index()] || shares_row || coef == 0.0 {
                active[y.index()] = false;
            } else if coef > 0.0 {
                keep_upper[y.index()] = false;
            }
        }

        let rows = model
            .constraints()
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                if c.family != ConstraintFamily::Linearization {
                    return true;
                }
                // linearization rows lead with their pairing variable
                let Some(&(y, _)) = c.lhs.terms().first() else {
                    return true;
                };
                active[y.index()] && (c.sense == Sense::Ge || keep_upper[y.index()])
            })
            .map(|(i, _)| i)
            .collect();

        Self {
            active,
            fixed: fixed_zero.iter().filter(|f| **f).count(),
            rows,
            pairings,
        }
    }

    /// Whether `v` is handed to the backend.
    pub(crate) fn is_active(&self, v: VarId) -> bool {
        self.active.get(v.index()).copied().unwrap_or(false)
    }

    /// Number of variables handed to the backend.
    pub(crate) fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }

    /// Number of variables fixed to 0.
    pub(crate) fn fixed_count(&self) -> usize {
        self.fixed
    }

    /// Rows handed to the backend, in model order.
    pub(crate) fn rows<'m>(
        &'m self,
        model: &'m TimetableModel,
    ) -> impl Iterator<Item = &'m LinearConstraint> + 'm {
        self.rows.iter().map(move |&i| &model.constraints()[i])
    }

    /// Sets every pairing variable to the AND of its operands.
    pub(crate) fn restore(&self, values: &mut [bool]) {
        for &(y, a, b) in &self.pairings {
            values[y.index()] = values[a.index()] && values[b.index()];
        }
    }
}
