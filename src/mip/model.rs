//! Solver-independent MILP representation.
//!
//! A [`TimetableModel`] is a declarative list of binary variables, linear
//! constraints and a linear objective (minimized). It can be inspected and
//! evaluated against a candidate 0/1 assignment without any solver, which
//! is how constraint generation is tested.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Feasibility tolerance used when evaluating constraints.
pub const TOLERANCE: f64 = 1e-9;

/// Handle to a model variable (its position in the variable list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Position in [`TimetableModel::variables`].
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a binary variable means.
///
/// Indices refer to positions in the instance's course, room and slot lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKind {
    /// `x[c, r, t]`: course `c` is held in room `r` at slot `t`.
    Assignment { course: usize, room: usize, time: usize },
    /// `y[c, r1, r2, t1, t2]`: `x[c, r1, t1] AND x[c, r2, t2]`.
    Pairing {
        course: usize,
        room1: usize,
        room2: usize,
        time1: usize,
        time2: usize,
    },
}

/// A binary decision variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub id: VarId,
    pub kind: VariableKind,
    /// Readable name, e.g. `x[115,STAN105,9:00]`.
    pub name: String,
}

/// Affine expression `Σ coef·var + constant`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    /// Creates the zero expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: adds `coef·var`.
    pub fn term(mut self, var: VarId, coef: f64) -> Self {
        self.add_term(var, coef);
        self
    }

    /// Builder: adds a constant.
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant += constant;
        self
    }

    /// Adds `coef·var`.
    pub fn add_term(&mut self, var: VarId, coef: f64) {
        self.terms.push((var, coef));
    }

    /// Terms in insertion order.
    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    /// Constant part.
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Value under a 0/1 assignment indexed by [`VarId::index`].
    pub fn evaluate(&self, values: &[bool]) -> f64 {
        self.terms
            .iter()
            .filter(|(v, _)| values[v.index()])
            .fold(self.constant, |acc, (_, c)| acc + c)
    }
}

/// Constraint direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sense {
    /// `lhs ≤ rhs`
    Le,
    /// `lhs = rhs`
    Eq,
    /// `lhs ≥ rhs`
    Ge,
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sense::Le => "<=",
            Sense::Eq => "==",
            Sense::Ge => ">=",
        })
    }
}

/// Which rule a constraint encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintFamily {
    /// Seated students in a (room, slot) never exceed the room's capacity.
    Capacity,
    /// Each course is placed exactly once.
    SingleAssignment,
    /// At most one course per (room, slot).
    NoOverlap,
    /// Nothing is placed in a prohibited slot.
    ProhibitedSlot,
    /// Ties a pairing indicator to its two assignment indicators.
    Linearization,
}

/// `lhs (≤ | = | ≥) rhs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearConstraint {
    pub family: ConstraintFamily,
    pub name: String,
    pub lhs: LinearExpr,
    pub sense: Sense,
    pub rhs: f64,
}

impl LinearConstraint {
    /// Creates a constraint.
    pub fn new(
        family: ConstraintFamily,
        name: impl Into<String>,
        lhs: LinearExpr,
        sense: Sense,
        rhs: f64,
    ) -> Self {
        Self {
            family,
            name: name.into(),
            lhs,
            sense,
            rhs,
        }
    }

    /// Whether the constraint holds under a 0/1 assignment.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        let lhs = self.lhs.evaluate(values);
        match self.sense {
            Sense::Le => lhs <= self.rhs + TOLERANCE,
            Sense::Eq => (lhs - self.rhs).abs() <= TOLERANCE,
            Sense::Ge => lhs >= self.rhs - TOLERANCE,
        }
    }
}

/// Linear objective to minimize. Coefficients of the same variable add up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    coefficients: BTreeMap<VarId, f64>,
}

impl Objective {
    /// Adds `coef` to the coefficient of `var`.
    pub fn add(&mut self, var: VarId, coef: f64) {
        *self.coefficients.entry(var).or_insert(0.0) += coef;
    }

    /// Coefficient of `var` (0 when absent).
    pub fn coefficient(&self, var: VarId) -> f64 {
        self.coefficients.get(&var).copied().unwrap_or(0.0)
    }

    /// Non-trivial terms, ordered by variable.
    pub fn terms(&self) -> impl Iterator<Item = (VarId, f64)> + '_ {
        self.coefficients.iter().map(|(v, c)| (*v, *c))
    }

    /// Number of stored terms.
    pub fn term_count(&self) -> usize {
        self.coefficients.len()
    }

    /// Value under a 0/1 assignment.
    pub fn evaluate(&self, values: &[bool]) -> f64 {
        self.terms()
            .filter(|(v, _)| values[v.index()])
            .fold(0.0, |acc, (_, c)| acc + c)
    }
}

/// Sizes of the index sets the model was built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDimensions {
    pub courses: usize,
    pub rooms: usize,
    pub times: usize,
}

type PairKey = (usize, usize, usize, usize, usize);

/// The assembled optimization problem.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableModel {
    dims: ModelDimensions,
    variables: Vec<Variable>,
    pairings: BTreeMap<PairKey, VarId>,
    constraints: Vec<LinearConstraint>,
    objective: Objective,
}

impl TimetableModel {
    pub(crate) fn new(dims: ModelDimensions) -> Self {
        Self {
            dims,
            variables: Vec::new(),
            pairings: BTreeMap::new(),
            constraints: Vec::new(),
            objective: Objective::default(),
        }
    }

    /// Declares every `x[c, r, t]` in `(c, r, t)` lexicographic order.
    ///
    /// Must run before any other variable is added so that
    /// [`assignment_var`](Self::assignment_var) can index directly.
    pub(crate) fn declare_assignments(&mut self, name: impl Fn(usize, usize, usize) -> String) {
        debug_assert!(self.variables.is_empty());
        let ModelDimensions { courses, rooms, times } = self.dims;
        for course in 0..courses {
            for room in 0..rooms {
                for time in 0..times {
                    let id = VarId(self.variables.len());
                    self.variables.push(Variable {
                        id,
                        kind: VariableKind::Assignment { course, room, time },
                        name: name(course, room, time),
                    });
                }
            }
        }
    }

    /// Declares `y[c, r1, r2, t1, t2]`, returning the existing handle if already declared.
    pub(crate) fn declare_pairing(
        &mut self,
        (course, room1, room2, time1, time2): PairKey,
        name: impl FnOnce() -> String,
    ) -> VarId {
        let key = (course, room1, room2, time1, time2);
        if let Some(&id) = self.pairings.get(&key) {
            return id;
        }
        let id = VarId(self.variables.len());
        self.variables.push(Variable {
            id,
            kind: VariableKind::Pairing {
                course,
                room1,
                room2,
                time1,
                time2,
            },
            name: name(),
        });
        self.pairings.insert(key, id);
        id
    }

    pub(crate) fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    pub(crate) fn objective_mut(&mut self) -> &mut Objective {
        &mut self.objective
    }

    /// Index-set sizes.
    pub fn dimensions(&self) -> ModelDimensions {
        self.dims
    }

    /// All variables; `variables()[id.index()].id == id`.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Looks up a variable.
    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id.index())
    }

    /// Total number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of assignment variables (`|C|·|R|·|T|`).
    pub fn assignment_count(&self) -> usize {
        self.dims.courses * self.dims.rooms * self.dims.times
    }

    /// Number of pairing variables.
    pub fn pairing_count(&self) -> usize {
        self.pairings.len()
    }

    /// Handle of `x[course, room, time]`.
    pub fn assignment_var(&self, course: usize, room: usize, time: usize) -> Option<VarId> {
        let ModelDimensions { courses, rooms, times } = self.dims;
        if course >= courses || room >= rooms || time >= times {
            return None;
        }
        Some(VarId((course * rooms + room) * times + time))
    }

    /// Handle of `y[course, room1, room2, time1, time2]`, if declared.
    pub fn pairing_var(
        &self,
        course: usize,
        room1: usize,
        room2: usize,
        time1: usize,
        time2: usize,
    ) -> Option<VarId> {
        self.pairings
            .get(&(course, room1, room2, time1, time2))
            .copied()
    }

    /// The two assignment indicators `y` is the AND of, or `None` if `y`
    /// is not a pairing variable.
    pub fn pairing_operands(&self, y: VarId) -> Option<(VarId, VarId)> {
        match self.variable(y)?.kind {
            VariableKind::Pairing {
                course,
                room1,
                room2,
                time1,
                time2,
            } => Some((
                self.assignment_var(course, room1, time1)?,
                self.assignment_var(course, room2, time2)?,
            )),
            VariableKind::Assignment { .. } => None,
        }
    }

    /// Pairing variables in key order.
    pub fn pairing_vars(&self) -> impl Iterator<Item = VarId> + '_ {
        self.pairings.values().copied()
    }

    /// All constraints, in generation order.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Constraints of one family.
    pub fn constraints_in(
        &self,
        family: ConstraintFamily,
    ) -> impl Iterator<Item = &LinearConstraint> + '_ {
        self.constraints.iter().filter(move |c| c.family == family)
    }

    /// Total number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// The objective (minimized).
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// Objective value under a 0/1 assignment.
    pub fn objective_value(&self, values: &[bool]) -> f64 {
        self.objective.evaluate(values)
    }

    /// Constraints violated by a 0/1 assignment.
    ///
    /// # Panics
    /// If `values` is shorter than the variable list.
    pub fn violated_constraints(&self, values: &[bool]) -> Vec<&LinearConstraint> {
        assert!(values.len() >= self.variables.len(), "assignment too short");
        self.constraints
            .iter()
            .filter(|c| !c.is_satisfied_by(values))
            .collect()
    }

    /// Whether a 0/1 assignment satisfies every constraint.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        self.violated_constraints(values).is_empty()
    }

    /// Full assignment implied by a set of placements `(course, room, time)`:
    /// the listed `x` are 1, every other `x` is 0, and each `y` is the AND of
    /// its two indicators.
    pub fn implied_values(&self, placements: &[(usize, usize, usize)]) -> Vec<bool> {
        let mut values = vec![false; self.variables.len()];
        for &(c, r, t) in placements {
            if let Some(x) = self.assignment_var(c, r, t) {
                values[x.index()] = true;
            }
        }
        for (&(c, r1, r2, t1, t2), y) in &self.pairings {
            let a = self.assignment_var(c, r1, t1).is_some_and(|x| values[x.index()]);
            let b = self.assignment_var(c, r2, t2).is_some_and(|x| values[x.index()]);
            values[y.index()] = a && b;
        }
        values
    }

    /// Placements `(course, room, time)` whose `x` is 1.
    pub fn placements(&self, values: &[bool]) -> Vec<(usize, usize, usize)> {
        self.variables
            .iter()
            .filter(|v| values.get(v.id.index()).copied().unwrap_or(false))
            .filter_map(|v| match v.kind {
                VariableKind::Assignment { course, room, time } => Some((course, room, time)),
                VariableKind::Pairing { .. } => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> TimetableModel {
        let mut m = TimetableModel::new(ModelDimensions {
            courses: 2,
            rooms: 2,
            times: 3,
        });
        m.declare_assignments(|c, r, t| format!("x[{c},{r},{t}]"));
        m
    }

    #[test]
    fn test_assignment_indexing() {
        let m = tiny();
        assert_eq!(m.variable_count(), 12);
        assert_eq!(m.assignment_count(), 12);
        for c in 0..2 {
            for r in 0..2 {
                for t in 0..3 {
                    let id = m.assignment_var(c, r, t).unwrap();
                    assert_eq!(
                        m.variable(id).unwrap().kind,
                        VariableKind::Assignment { course: c, room: r, time: t }
                    );
                }
            }
        }
        assert!(m.assignment_var(2, 0, 0).is_none());
        assert!(m.assignment_var(0, 0, 3).is_none());
    }

    #[test]
    fn test_pairing_declared_once() {
        let mut m = tiny();
        let a = m.declare_pairing((0, 0, 1, 0, 1), || "y".into());
        let b = m.declare_pairing((0, 0, 1, 0, 1), || "y".into());
        assert_eq!(a, b);
        assert_eq!(a.index(), 12);
        assert_eq!(m.pairing_count(), 1);
        assert_eq!(m.pairing_var(0, 0, 1, 0, 1), Some(a));
        assert_eq!(m.pairing_var(0, 1, 0, 1, 0), None);
    }

    #[test]
    fn test_expr_and_constraint_evaluation() {
        let m = tiny();
        let x0 = m.assignment_var(0, 0, 0).unwrap();
        let x1 = m.assignment_var(0, 0, 1).unwrap();
        let expr = LinearExpr::new().term(x0, 2.0).term(x1, 3.0).with_constant(-1.0);

        let mut values = vec![false; m.variable_count()];
        assert!((expr.evaluate(&values) + 1.0).abs() < 1e-12);
        values[x1.index()] = true;
        assert!((expr.evaluate(&values) - 2.0).abs() < 1e-12);

        let le = LinearConstraint::new(ConstraintFamily::Capacity, "c", expr.clone(), Sense::Le, 2.0);
        let eq = LinearConstraint::new(ConstraintFamily::Capacity, "c", expr.clone(), Sense::Eq, 2.0);
        let ge = LinearConstraint::new(ConstraintFamily::Capacity, "c", expr, Sense::Ge, 2.5);
        assert!(le.is_satisfied_by(&values));
        assert!(eq.is_satisfied_by(&values));
        assert!(!ge.is_satisfied_by(&values));
    }

    #[test]
    fn test_objective_accumulates() {
        let mut o = Objective::default();
        o.add(VarId(3), 1.5);
        o.add(VarId(3), 2.0);
        o.add(VarId(1), 1.0);
        assert!((o.coefficient(VarId(3)) - 3.5).abs() < 1e-12);
        assert_eq!(o.coefficient(VarId(7)), 0.0);
        assert_eq!(o.term_count(), 2);
        let ids: Vec<usize> = o.terms().map(|(v, _)| v.index()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_empty_sums_are_positive_zero() {
        let o = Objective::default();
        assert!(o.evaluate(&[]).is_sign_positive());
        assert!(LinearExpr::new().evaluate(&[]).is_sign_positive());

        let m = TimetableModel::new(ModelDimensions {
            courses: 0,
            rooms: 0,
            times: 0,
        });
        let value = m.objective_value(&[]);
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }

    #[test]
    fn test_pairing_operands() {
        let mut m = tiny();
        let y = m.declare_pairing((1, 0, 1, 2, 1), || "y".into());
        assert_eq!(
            m.pairing_operands(y),
            Some((m.assignment_var(1, 0, 2).unwrap(), m.assignment_var(1, 1, 1).unwrap()))
        );
        assert_eq!(m.pairing_operands(m.assignment_var(0, 0, 0).unwrap()), None);
        assert_eq!(m.pairing_operands(VarId(99)), None);
    }

    #[test]
    fn test_implied_values_and_placements() {
        let mut m = tiny();
        let y = m.declare_pairing((0, 0, 1, 0, 1), || "y".into());
        let y_off = m.declare_pairing((1, 0, 1, 0, 1), || "y".into());

        let values = m.implied_values(&[(0, 0, 0), (0, 1, 1), (1, 0, 0)]);
        assert!(values[y.index()]);
        assert!(!values[y_off.index()]);
        assert_eq!(m.placements(&values), vec![(0, 0, 0), (0, 1, 1), (1, 0, 0)]);
    }

    #[test]
    fn test_sense_display() {
        assert_eq!(Sense::Le.to_string(), "<=");
        assert_eq!(Sense::Eq.to_string(), "==");
        assert_eq!(Sense::Ge.to_string(), ">=");
    }
}
