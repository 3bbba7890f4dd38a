//! Time slot and time grid models.
//!
//! The scheduling day is a discrete, ordered set of slots labelled by
//! wall-clock time (`"8:00"`, `"13:00"`, ...). A grid marks some slots as
//! **prohibited** (never assignable) and some as **early** (penalized).
//!
//! # Adjacency
//! Two slots are consecutive iff their hour components differ by exactly one.
//! Minutes are ignored, and a prohibited slot between two hours does not
//! break adjacency: `11:00` and `12:00` are consecutive even if `12:00` is
//! prohibited.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::{ValidationError, ValidationErrorKind};

/// A point in the scheduling day.
///
/// Serialized as its `"H:MM"` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    hour: u8,
    minute: u8,
}

impl TimeSlot {
    /// Creates a slot at `hour:minute`.
    ///
    /// Out-of-range values are accepted here and reported by
    /// [`validate_instance`](crate::validation::validate_instance).
    pub const fn at(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Creates a slot on the full hour.
    pub const fn hour(hour: u8) -> Self {
        Self::at(hour, 0)
    }

    /// Hour component (0-23).
    #[inline]
    pub fn hour_of_day(&self) -> u8 {
        self.hour
    }

    /// Minute component (0-59).
    #[inline]
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Whether hour and minute are within a 24-hour clock.
    pub fn is_well_formed(&self) -> bool {
        self.hour < 24 && self.minute < 60
    }

    /// Whether `other` is consecutive with this slot (hours differ by one).
    #[inline]
    pub fn is_adjacent_to(&self, other: &TimeSlot) -> bool {
        self.hour.abs_diff(other.hour) == 1
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeSlot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || {
            ValidationError::new(
                ValidationErrorKind::MalformedTimeSlot,
                format!("Malformed time slot '{s}' (expected H:MM)"),
            )
        };

        let (h, m) = s.trim().split_once(':').ok_or_else(malformed)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(malformed());
        }
        let hour: u8 = h.parse().map_err(|_| malformed())?;
        let minute: u8 = m.parse().map_err(|_| malformed())?;

        let slot = Self::at(hour, minute);
        if !slot.is_well_formed() {
            return Err(malformed());
        }
        Ok(slot)
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

/// The ordered set of slots available in one scheduling period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    /// All slots, in chronological order.
    pub slots: Vec<TimeSlot>,
    /// Slots that must never receive a course.
    #[serde(default)]
    pub prohibited: Vec<TimeSlot>,
    /// Slots that attract the early-time penalty.
    #[serde(default)]
    pub early: Vec<TimeSlot>,
}

impl TimeGrid {
    /// Creates a grid from explicit slots. Slots are sorted chronologically.
    pub fn new(mut slots: Vec<TimeSlot>) -> Self {
        slots.sort();
        Self {
            slots,
            prohibited: Vec::new(),
            early: Vec::new(),
        }
    }

    /// Creates an hourly grid `start:00, ..., (end-1):00`.
    pub fn hourly(start_hour: u8, end_hour: u8) -> Self {
        Self::new((start_hour..end_hour).map(TimeSlot::hour).collect())
    }

    /// Marks a slot as prohibited.
    pub fn with_prohibited(mut self, slot: TimeSlot) -> Self {
        if !self.prohibited.contains(&slot) {
            self.prohibited.push(slot);
        }
        self
    }

    /// Marks a slot as early.
    pub fn with_early(mut self, slot: TimeSlot) -> Self {
        if !self.early.contains(&slot) {
            self.early.push(slot);
        }
        self
    }

    /// Marks every slot strictly before `hour:00` as early.
    pub fn with_early_before(mut self, hour: u8) -> Self {
        let cutoff = TimeSlot::hour(hour);
        let early: Vec<TimeSlot> = self.slots.iter().copied().filter(|s| *s < cutoff).collect();
        for slot in early {
            self = self.with_early(slot);
        }
        self
    }

    /// Number of slots (prohibited ones included).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the grid has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Position of a slot in the grid.
    pub fn index_of(&self, slot: &TimeSlot) -> Option<usize> {
        self.slots.iter().position(|s| s == slot)
    }

    /// Whether the slot is prohibited.
    pub fn is_prohibited(&self, slot: &TimeSlot) -> bool {
        self.prohibited.contains(slot)
    }

    /// Whether the slot is early.
    pub fn is_early(&self, slot: &TimeSlot) -> bool {
        self.early.contains(slot)
    }

    /// Objective multiplier for a slot: `early_weight` for early slots, 1 otherwise.
    pub fn slot_weight(&self, slot: &TimeSlot, early_weight: f64) -> f64 {
        if self.is_early(slot) {
            early_weight
        } else {
            1.0
        }
    }

    /// Slots that may receive a course.
    pub fn available_slots(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots.iter().filter(|s| !self.is_prohibited(s))
    }

    /// Ordered index pairs `(i, j)` of consecutive slots.
    ///
    /// Both `(i, j)` and `(j, i)` are returned.
    pub fn adjacent_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.slots.iter().enumerate() {
            for (j, b) in self.slots.iter().enumerate() {
                if i != j && a.is_adjacent_to(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let t: TimeSlot = "8:00".parse().unwrap();
        assert_eq!(t, TimeSlot::hour(8));
        assert_eq!(t.to_string(), "8:00");

        let t: TimeSlot = "13:30".parse().unwrap();
        assert_eq!(t.hour_of_day(), 13);
        assert_eq!(t.minute(), 30);
        assert_eq!(t.to_string(), "13:30");
    }

    #[test]
    fn test_parse_malformed() {
        for bad in ["", "8", "8:0", "25:00", "12:60", "ab:cd", "8:000", "-1:00"] {
            let err = bad.parse::<TimeSlot>().unwrap_err();
            assert_eq!(err.kind, ValidationErrorKind::MalformedTimeSlot, "{bad}");
        }
    }

    #[test]
    fn test_serde_as_label() {
        let json = serde_json::to_string(&TimeSlot::hour(9)).unwrap();
        assert_eq!(json, "\"9:00\"");
        let back: TimeSlot = serde_json::from_str("\"9:00\"").unwrap();
        assert_eq!(back, TimeSlot::hour(9));
        assert!(serde_json::from_str::<TimeSlot>("\"nine\"").is_err());
    }

    #[test]
    fn test_adjacency_by_hour() {
        let eleven = TimeSlot::hour(11);
        assert!(eleven.is_adjacent_to(&TimeSlot::hour(12)));
        assert!(eleven.is_adjacent_to(&TimeSlot::hour(10)));
        assert!(eleven.is_adjacent_to(&TimeSlot::at(12, 30)));
        assert!(!eleven.is_adjacent_to(&TimeSlot::hour(13)));
        assert!(!eleven.is_adjacent_to(&TimeSlot::at(11, 30)));
    }

    #[test]
    fn test_hourly_grid() {
        let grid = TimeGrid::hourly(8, 18)
            .with_prohibited(TimeSlot::hour(12))
            .with_early_before(9);

        assert_eq!(grid.len(), 10);
        assert_eq!(grid.slots[0].to_string(), "8:00");
        assert_eq!(grid.slots[9].to_string(), "17:00");
        assert!(grid.is_prohibited(&TimeSlot::hour(12)));
        assert!(grid.is_early(&TimeSlot::hour(8)));
        assert!(!grid.is_early(&TimeSlot::hour(9)));
        assert_eq!(grid.available_slots().count(), 9);
        assert_eq!(grid.index_of(&TimeSlot::hour(10)), Some(2));
        assert_eq!(grid.index_of(&TimeSlot::hour(7)), None);
    }

    #[test]
    fn test_slot_weight() {
        let grid = TimeGrid::hourly(8, 11).with_early(TimeSlot::hour(8));
        assert!((grid.slot_weight(&TimeSlot::hour(8), 10.0) - 10.0).abs() < 1e-10);
        assert!((grid.slot_weight(&TimeSlot::hour(9), 10.0) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_adjacent_pairs_cross_prohibited_slot() {
        let grid = TimeGrid::hourly(11, 14).with_prohibited(TimeSlot::hour(12));
        let pairs = grid.adjacent_pairs();
        // 11-12, 12-11, 12-13, 13-12
        assert_eq!(pairs.len(), 4);
        assert!(pairs.contains(&(0, 1)));
        assert!(pairs.contains(&(1, 0)));
        assert!(!pairs.contains(&(0, 2)));
    }

    #[test]
    fn test_duplicate_marks_are_ignored() {
        let grid = TimeGrid::hourly(8, 10)
            .with_early(TimeSlot::hour(8))
            .with_early(TimeSlot::hour(8));
        assert_eq!(grid.early.len(), 1);
    }
}
