//! Inter-room travel distances.
//!
//! Distances are entered as a partial table over unordered room pairs and
//! resolved against the room list into a symmetric [`DistanceMatrix`].
//! Resolution never mutates the input table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Room;
use crate::validation::{ValidationError, ValidationErrorKind};

/// One distance entry between two rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceEntry {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

/// Partial, possibly one-directional distance table.
///
/// Each unordered pair of distinct rooms must be present in at least one
/// direction; when both directions are present their values must agree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistanceTable {
    entries: Vec<DistanceEntry>,
}

impl DistanceTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the same distance between every pair of the given rooms.
    pub fn uniform(rooms: &[Room], distance: f64) -> Self {
        let mut table = Self::new();
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                table.set(a.id.clone(), b.id.clone(), distance);
            }
        }
        table
    }

    /// Records a distance between two rooms.
    pub fn set(&mut self, from: impl Into<String>, to: impl Into<String>, distance: f64) {
        self.entries.push(DistanceEntry {
            from: from.into(),
            to: to.into(),
            distance,
        });
    }

    /// Builder: records a distance and returns self.
    pub fn with_distance(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        distance: f64,
    ) -> Self {
        self.set(from, to, distance);
        self
    }

    /// Raw entries as given.
    pub fn entries(&self) -> &[DistanceEntry] {
        &self.entries
    }

    /// Number of raw entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves the table into a symmetric matrix indexed like `rooms`.
    ///
    /// # Errors
    /// Every defect is reported: unknown rooms, negative or non-finite
    /// distances, non-zero self distances, conflicting directions, and
    /// room pairs with no entry at all.
    pub fn resolve(&self, rooms: &[Room]) -> Result<DistanceMatrix, Vec<ValidationError>> {
        let n = rooms.len();
        let index: HashMap<&str, usize> = rooms
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.as_str(), i))
            .collect();

        let mut errors = Vec::new();
        let mut values: Vec<Option<f64>> = vec![None; n * n];
        for i in 0..n {
            values[i * n + i] = Some(0.0);
        }

        for entry in &self.entries {
            if !entry.distance.is_finite() || entry.distance < 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidDistance,
                    format!(
                        "Distance {}-{} must be a non-negative number, got {}",
                        entry.from, entry.to, entry.distance
                    ),
                ));
                continue;
            }

            let (Some(&i), Some(&j)) = (index.get(entry.from.as_str()), index.get(entry.to.as_str()))
            else {
                for id in [&entry.from, &entry.to] {
                    if !index.contains_key(id.as_str()) {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::InvalidRoomReference,
                            format!("Distance table references unknown room '{id}'"),
                        ));
                    }
                }
                continue;
            };

            if i == j {
                if entry.distance != 0.0 {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidDistance,
                        format!(
                            "Distance from room '{}' to itself must be 0, got {}",
                            entry.from, entry.distance
                        ),
                    ));
                }
                continue;
            }

            match values[i * n + j] {
                Some(existing) if existing != entry.distance => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::AsymmetricDistance,
                        format!(
                            "Conflicting distances between '{}' and '{}': {} vs {}",
                            entry.from, entry.to, existing, entry.distance
                        ),
                    ));
                }
                _ => {
                    values[i * n + j] = Some(entry.distance);
                    values[j * n + i] = Some(entry.distance);
                }
            }
        }

        for i in 0..n {
            for j in (i + 1)..n {
                if values[i * n + j].is_none() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::MissingDistance,
                        format!(
                            "No distance defined between rooms '{}' and '{}'",
                            rooms[i].id, rooms[j].id
                        ),
                    ));
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(DistanceMatrix {
            room_ids: rooms.iter().map(|r| r.id.clone()).collect(),
            values: values.into_iter().map(|v| v.unwrap_or(0.0)).collect(),
        })
    }
}

/// Fully symmetric distance lookup over a fixed room order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    room_ids: Vec<String>,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Distance between rooms at positions `i` and `j`.
    ///
    /// # Panics
    /// If either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let n = self.room_ids.len();
        assert!(i < n && j < n, "room index out of range");
        self.values[i * n + j]
    }

    /// Distance between two rooms by ID.
    pub fn distance(&self, from: &str, to: &str) -> Option<f64> {
        let i = self.room_ids.iter().position(|id| id == from)?;
        let j = self.room_ids.iter().position(|id| id == to)?;
        Some(self.get(i, j))
    }

    /// Number of rooms.
    pub fn room_count(&self) -> usize {
        self.room_ids.len()
    }
}
