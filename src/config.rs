//! Penalty configuration.
//!
//! Three rates weight the soft objective terms:
//!
//! | Option | Meaning |
//! |--------|---------|
//! | `capacity_rate` | Cost per seat per base time unit |
//! | `early_time_penalty` | Multiplier for sessions in early slots |
//! | `distance_penalty` | Cost per unit distance between adjacent sessions |
//!
//! Defaults price a seat at $1 per 30 minutes, an early session at ten
//! times a regular one, and a unit of travel at 5.

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrorKind};

/// How the capacity term charges a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityCharge {
    /// `capacity_rate × capacity`: charges for room size regardless of fill.
    #[default]
    RoomSize,
    /// `capacity_rate × (capacity − enrollment)`: charges only empty seats.
    UnusedSeats,
}

/// Objective weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    /// Cost per seat per base time unit.
    pub capacity_rate: f64,
    /// Weight of a session in an early slot (regular slots weigh 1).
    pub early_time_penalty: f64,
    /// Cost per unit distance between a course's consecutive sessions.
    pub distance_penalty: f64,
    /// Capacity charging rule.
    pub capacity_charge: CapacityCharge,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            capacity_rate: 1.0 / 30.0,
            early_time_penalty: 10.0,
            distance_penalty: 5.0,
            capacity_charge: CapacityCharge::RoomSize,
        }
    }
}

impl PenaltyConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the capacity rate.
    pub fn with_capacity_rate(mut self, rate: f64) -> Self {
        self.capacity_rate = rate;
        self
    }

    /// Sets the early-slot weight.
    pub fn with_early_time_penalty(mut self, weight: f64) -> Self {
        self.early_time_penalty = weight;
        self
    }

    /// Sets the distance rate.
    pub fn with_distance_penalty(mut self, rate: f64) -> Self {
        self.distance_penalty = rate;
        self
    }

    /// Sets the capacity charging rule.
    pub fn with_capacity_charge(mut self, charge: CapacityCharge) -> Self {
        self.capacity_charge = charge;
        self
    }

    /// Capacity-term coefficient for a course of `enrollment` in a room of `capacity`.
    pub fn capacity_cost(&self, capacity: u32, enrollment: u32) -> f64 {
        let seats = match self.capacity_charge {
            CapacityCharge::RoomSize => capacity,
            CapacityCharge::UnusedSeats => capacity.saturating_sub(enrollment),
        };
        self.capacity_rate * f64::from(seats)
    }

    /// Checks that every rate is a finite, non-negative number.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = [
            ("capacity_rate", self.capacity_rate),
            ("early_time_penalty", self.early_time_penalty),
            ("distance_penalty", self.distance_penalty),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_finite() || *v < 0.0)
        .map(|(name, v)| {
            ValidationError::new(
                ValidationErrorKind::InvalidPenalty,
                format!("Penalty '{name}' must be a non-negative number, got {v}"),
            )
        })
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = PenaltyConfig::default();
        assert!((p.capacity_rate - 1.0 / 30.0).abs() < 1e-12);
        assert!((p.early_time_penalty - 10.0).abs() < 1e-12);
        assert!((p.distance_penalty - 5.0).abs() < 1e-12);
        assert_eq!(p.capacity_charge, CapacityCharge::RoomSize);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let p: PenaltyConfig =
            serde_json::from_str(r#"{"distance_penalty": 0.0, "capacity_charge": "unused_seats"}"#)
                .unwrap();
        assert_eq!(p.distance_penalty, 0.0);
        assert!((p.early_time_penalty - 10.0).abs() < 1e-12);
        assert_eq!(p.capacity_charge, CapacityCharge::UnusedSeats);
    }

    #[test]
    fn test_capacity_cost() {
        let p = PenaltyConfig::new().with_capacity_rate(0.5);
        assert!((p.capacity_cost(100, 40) - 50.0).abs() < 1e-12);

        let p = p.with_capacity_charge(CapacityCharge::UnusedSeats);
        assert!((p.capacity_cost(100, 40) - 30.0).abs() < 1e-12);
        assert_eq!(p.capacity_cost(40, 100), 0.0);
    }

    #[test]
    fn test_invalid_rates() {
        let p = PenaltyConfig::new()
            .with_capacity_rate(-1.0)
            .with_distance_penalty(f64::NAN);
        let errors = p.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidPenalty));
        assert!(errors[0].message.contains("capacity_rate"));
    }
}
