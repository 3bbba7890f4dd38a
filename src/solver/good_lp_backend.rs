//! [`MilpSolver`] backed by the `good_lp` modelling layer.
//!
//! Every model variable that survives [`Reduction`] becomes a binary
//! `good_lp` variable; the objective is minimised. The backend is
//! `good_lp::default_solver`, which with the `microlp` feature is a
//! pure-Rust branch-and-bound solver.
//!
//! # Limits
//!
//! | Backend stop | Status |
//! |--------------|--------|
//! | Optimality proven | `Optimal` |
//! | Time or gap limit with an incumbent | `Feasible` |
//! | Time limit before any incumbent | `LimitReached` |

use std::time::{Duration, Instant};

use good_lp::constraint::{eq, geq, leq};
use good_lp::{
    default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolutionStatus, SolverModel, Variable, WithMipGap, WithTimeLimit,
};
use log::{debug, info, warn};

use super::reduce::Reduction;
use super::{MilpSolver, SolveOutcome, SolveStatus};
use crate::error::TimetableError;
use crate::mip::{Sense, TimetableModel, VarId};

/// `good_lp` adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpSolver {
    time_limit: Option<Duration>,
    mip_gap: Option<f32>,
}

impl GoodLpSolver {
    /// Creates the adapter without limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the search after `limit` wall-clock time.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Accepts an incumbent within relative gap `gap` of the bound.
    pub fn with_mip_gap(mut self, gap: f32) -> Self {
        self.mip_gap = Some(gap);
        self
    }
}

fn to_expression(terms: impl Iterator<Item = (VarId, f64)>, vars: &[Option<Variable>]) -> Expression {
    terms
        .filter_map(|(v, coef)| vars[v.index()].map(|var| coef * var))
        .sum()
}

fn solution_status(status: SolutionStatus) -> SolveStatus {
    match status {
        SolutionStatus::Optimal => SolveStatus::Optimal,
        SolutionStatus::TimeLimit | SolutionStatus::GapLimit => SolveStatus::Feasible,
    }
}

impl MilpSolver for GoodLpSolver {
    fn name(&self) -> &'static str {
        "good_lp"
    }

    fn solve(&self, model: &TimetableModel) -> Result<SolveOutcome, TimetableError> {
        let reduction = Reduction::new(model);

        let mut problem = ProblemVariables::new();
        let vars: Vec<Option<Variable>> = model
            .variables()
            .iter()
            .map(|v| reduction.is_active(v.id).then(|| problem.add(variable().binary())))
            .collect();

        let objective = to_expression(model.objective().terms(), &vars);
        let mut lp = problem.minimise(objective).using(default_solver);
        if let Some(limit) = self.time_limit {
            lp = lp.with_time_limit(limit.as_secs_f64());
        }
        if let Some(gap) = self.mip_gap {
            lp = lp
                .with_mip_gap(gap)
                .map_err(|e| TimetableError::Backend(e.to_string()))?;
        }

        let mut rows = 0;
        for c in reduction.rows(model) {
            let rhs = c.rhs - c.lhs.constant();
            let terms = c.lhs.terms().iter().copied();
            // Rows left without variables are decided here; some backends reject empty rows.
            if terms.clone().all(|(v, _)| vars[v.index()].is_none()) {
                let holds = match c.sense {
                    Sense::Le => 0.0 <= rhs,
                    Sense::Eq => rhs == 0.0,
                    Sense::Ge => 0.0 >= rhs,
                };
                if !holds {
                    info!("constraint {} is trivially violated; model infeasible", c.name);
                    return Ok(SolveOutcome::without_solution(SolveStatus::Infeasible));
                }
                continue;
            }

            let lhs = to_expression(terms, &vars);
            lp = lp.with(match c.sense {
                Sense::Le => leq(lhs, rhs),
                Sense::Eq => eq(lhs, rhs),
                Sense::Ge => geq(lhs, rhs),
            });
            rows += 1;
        }

        debug!(
            "solving {} of {} variables ({} fixed) / {} of {} constraints with {}",
            reduction.active_count(),
            model.variable_count(),
            reduction.fixed_count(),
            rows,
            model.constraint_count(),
            self.name()
        );

        let started = Instant::now();
        match lp.solve() {
            Ok(solution) => {
                let status = solution_status(solution.status());
                let mut values: Vec<bool> = vars
                    .iter()
                    .map(|v| matches!(v, Some(var) if solution.value(*var) > 0.5))
                    .collect();
                reduction.restore(&mut values);
                if let Some(c) = model.violated_constraints(&values).first() {
                    return Err(TimetableError::Backend(format!(
                        "backend solution violates {}",
                        c.name
                    )));
                }
                Ok(SolveOutcome::solved(status, model, values))
            }
            Err(ResolutionError::Infeasible) => {
                Ok(SolveOutcome::without_solution(SolveStatus::Infeasible))
            }
            Err(ResolutionError::Unbounded) => {
                Ok(SolveOutcome::without_solution(SolveStatus::Unbounded))
            }
            Err(e) if self.time_limit.is_some_and(|limit| started.elapsed() >= limit) => {
                warn!("time limit reached without a solution: {e}");
                Ok(SolveOutcome::without_solution(SolveStatus::LimitReached))
            }
            Err(e) => Err(TimetableError::Backend(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mip::{PairingScope, TimetableMipBuilder};
    use crate::models::{Course, DistanceTable, Instance, Room, TimeGrid, TimeSlot};

    /// 6 courses, 5 rooms, 8:00-17:00 with noon prohibited and 8:00 early.
    fn campus_instance() -> Instance {
        let mut instance = Instance::new(
            TimeGrid::hourly(8, 18)
                .with_prohibited(TimeSlot::hour(12))
                .with_early(TimeSlot::hour(8)),
        );
        for (id, enrollment) in [("115", 95), ("120", 137), ("145", 12), ("160", 85), ("162", 75), ("174", 71)] {
            instance = instance.with_course(Course::new(id, enrollment));
        }
        let rooms: Vec<Room> = [("ETCH1174", 45), ("ETCH3107", 45), ("STAN105", 292), ("VLSB2040", 158), ("CORY277", 132)]
            .into_iter()
            .map(|(id, capacity)| Room::new(id, capacity))
            .collect();
        for room in &rooms {
            instance = instance.with_room(room.clone());
        }
        instance.with_distances(DistanceTable::uniform(&rooms, 2.0))
    }

    #[test]
    fn test_over_enrolled_is_infeasible() {
        let instance = Instance::new(TimeGrid::hourly(9, 10))
            .with_course(Course::new("BIG", 200))
            .with_room(Room::new("SMALL", 100));
        let model = TimetableMipBuilder::new(&instance).build().unwrap();

        let outcome = GoodLpSolver::new().solve(&model).unwrap();
        assert_eq!(outcome.status, SolveStatus::Infeasible);
        assert!(!outcome.is_solution_found());
    }

    #[test]
    fn test_only_prohibited_slot_is_infeasible() {
        let instance = Instance::new(TimeGrid::hourly(12, 13).with_prohibited(TimeSlot::hour(12)))
            .with_course(Course::new("C1", 10))
            .with_room(Room::new("R1", 100));
        let model = TimetableMipBuilder::new(&instance).build().unwrap();
        assert_eq!(model.assignment_count(), 1);

        let outcome = GoodLpSolver::new().solve(&model).unwrap();
        assert_eq!(outcome.status, SolveStatus::Infeasible);
    }

    #[test]
    fn test_no_rooms_is_infeasible() {
        // single[C1] has no terms: 0 == 1
        let instance = Instance::new(TimeGrid::hourly(9, 10)).with_course(Course::new("C1", 10));
        let model = TimetableMipBuilder::new(&instance).build().unwrap();

        let outcome = GoodLpSolver::new().solve(&model).unwrap();
        assert_eq!(outcome.status, SolveStatus::Infeasible);
    }

    #[test]
    fn test_picks_cheapest_place() {
        let rooms = vec![Room::new("SMALL", 20), Room::new("LARGE", 200)];
        let instance = Instance::new(TimeGrid::hourly(8, 10).with_early(TimeSlot::hour(8)))
            .with_course(Course::new("C1", 15))
            .with_room(rooms[0].clone())
            .with_room(rooms[1].clone())
            .with_distances(DistanceTable::uniform(&rooms, 1.0));
        let model = TimetableMipBuilder::new(&instance).build().unwrap();

        let outcome = GoodLpSolver::new().solve(&model).unwrap();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        let values = outcome.values.as_deref().unwrap();
        assert!(model.is_satisfied_by(values));
        // SMALL at 9:00: weight 1 + 20/30
        assert_eq!(model.placements(values), vec![(0, 0, 1)]);
        assert!((outcome.objective.unwrap() - (1.0 + 20.0 / 30.0)).abs() < 1e-6);
    }

    #[test]
    fn test_campus_solves_in_both_scopes() {
        let instance = campus_instance();
        let solver = GoodLpSolver::new().with_time_limit(Duration::from_secs(120));
        // cheapest fitting room at a regular slot for every course:
        // 4 x CORY277, 1 x VLSB2040, 1 x ETCH1174
        let expected = 6.0 + (4.0 * 132.0 + 158.0 + 45.0) / 30.0;

        for scope in [PairingScope::Full, PairingScope::AdjacentOnly] {
            let model = TimetableMipBuilder::new(&instance)
                .with_pairing_scope(scope)
                .build()
                .unwrap();
            let outcome = solver.solve(&model).unwrap();

            assert_eq!(outcome.status, SolveStatus::Optimal, "{scope:?}");
            let values = outcome.values.as_deref().unwrap();
            assert!(model.is_satisfied_by(values));
            assert_eq!(model.placements(values).len(), 6);
            assert!((outcome.objective.unwrap() - expected).abs() < 1e-6, "{scope:?}");
        }
    }

    #[test]
    fn test_zero_time_limit_reports_limit() {
        let instance = campus_instance();
        let model = TimetableMipBuilder::new(&instance).build().unwrap();

        let outcome = GoodLpSolver::new()
            .with_time_limit(Duration::ZERO)
            .solve(&model)
            .unwrap();
        assert_eq!(outcome.status, SolveStatus::LimitReached);
        assert!(!outcome.is_solution_found());
        assert_eq!(outcome.objective, None);
    }

    #[test]
    fn test_limit_stops_map_to_feasible() {
        assert_eq!(solution_status(SolutionStatus::Optimal), SolveStatus::Optimal);
        assert_eq!(solution_status(SolutionStatus::TimeLimit), SolveStatus::Feasible);
        assert_eq!(solution_status(SolutionStatus::GapLimit), SolveStatus::Feasible);
    }

    #[test]
    fn test_invalid_mip_gap_is_backend_error() {
        let instance = campus_instance();
        let model = TimetableMipBuilder::new(&instance).build().unwrap();
        let result = GoodLpSolver::new().with_mip_gap(-0.5).solve(&model);
        assert!(matches!(result, Err(TimetableError::Backend(_))));
    }

    #[test]
    fn test_empty_model_has_positive_zero_objective() {
        let instance = Instance::new(TimeGrid::hourly(9, 10));
        let model = TimetableMipBuilder::new(&instance).build().unwrap();
        let outcome = GoodLpSolver::new().solve(&model).unwrap();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        let objective = outcome.objective.unwrap();
        assert_eq!(objective, 0.0);
        assert!(objective.is_sign_positive());
    }
}
