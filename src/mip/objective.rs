//! Objective terms.
//!
//! | Term | Coefficient of |
//! |------|----------------|
//! | Early-time | `x[c,r,t]`: `early_time_penalty` if `t` is early, else 1 |
//! | Capacity | `x[c,r,t]`: `capacity_rate × capacity[r]` (or unused seats) |
//! | Distance | `y[c,r1,r2,t1,t2]`: `distance_penalty × dist(r1,r2)` for consecutive `t1`,`t2` |

use log::trace;

use super::model::TimetableModel;
use crate::config::PenaltyConfig;
use crate::models::{DistanceMatrix, Instance};

/// Adds the early-time and capacity terms for every assignment indicator.
pub(crate) fn add_assignment_terms(
    model: &mut TimetableModel,
    instance: &Instance,
    penalties: &PenaltyConfig,
) {
    let grid = &instance.time_grid;
    for (c, course) in instance.courses.iter().enumerate() {
        for (r, room) in instance.rooms.iter().enumerate() {
            let capacity_cost = penalties.capacity_cost(room.capacity, course.enrollment);
            for (t, slot) in grid.slots.iter().enumerate() {
                let Some(x) = model.assignment_var(c, r, t) else {
                    continue;
                };
                let coef = grid.slot_weight(slot, penalties.early_time_penalty) + capacity_cost;
                model.objective_mut().add(x, coef);
            }
        }
    }
}

/// Adds the distance term for every course and every ordered pair of
/// consecutive slots. Returns the number of priced pairing indicators.
///
/// Zero-cost terms (same room, zero distance, zero rate) are not emitted.
pub(crate) fn add_adjacency_terms(
    model: &mut TimetableModel,
    instance: &Instance,
    distances: &DistanceMatrix,
    penalties: &PenaltyConfig,
) -> usize {
    if penalties.distance_penalty == 0.0 {
        return 0;
    }

    let adjacent = instance.time_grid.adjacent_pairs();
    let room_count = instance.rooms.len();
    let mut priced = 0;

    for c in 0..instance.courses.len() {
        for &(t1, t2) in &adjacent {
            for r1 in 0..room_count {
                for r2 in 0..room_count {
                    let coef = penalties.distance_penalty * distances.get(r1, r2);
                    if coef == 0.0 {
                        continue;
                    }
                    let Some(y) = model.pairing_var(c, r1, r2, t1, t2) else {
                        debug_assert!(false, "adjacent pairing ({c},{r1},{r2},{t1},{t2}) not declared");
                        continue;
                    };
                    model.objective_mut().add(y, coef);
                    priced += 1;
                }
            }
        }
    }

    trace!("priced {priced} adjacent pairing indicators");
    priced
}
