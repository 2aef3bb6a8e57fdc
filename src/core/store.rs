//! The workout store: ordered collection of records, single source of truth.

use chrono::Utc;
use uuid::Uuid;

use super::error::{FormField, JournalError};
use super::workout::{Coordinates, KindInput, Workout};

/// Ordered collection of workout records.
///
/// Insertion order is creation order and doubles as list display order.
/// Ids are generated here and never reused after deletion.
#[derive(Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        WorkoutStore::default()
    }

    /// Validate inputs, construct a record, and append it.
    ///
    /// Distance and duration must be finite and strictly positive; the
    /// kind-specific field must be finite and non-negative (a standstill
    /// ride can gain zero elevation).
    pub fn create(
        &mut self,
        kind: KindInput,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
    ) -> Result<&Workout, JournalError> {
        validate_positive(distance_km, FormField::Distance)?;
        validate_positive(duration_min, FormField::Duration)?;
        match kind {
            KindInput::Running { cadence_spm } => {
                validate_non_negative(cadence_spm, FormField::Cadence)?;
            }
            KindInput::Cycling { elevation_gain_m } => {
                validate_non_negative(elevation_gain_m, FormField::Elevation)?;
            }
        }

        let workout = Workout::new(
            Uuid::new_v4().to_string(),
            kind,
            coordinates,
            distance_km,
            duration_min,
            Utc::now(),
        );
        let idx = self.workouts.len();
        self.workouts.push(workout);
        Ok(&self.workouts[idx])
    }

    /// Remove and return the record with the given id
    pub fn remove(&mut self, id: &str) -> Result<Workout, JournalError> {
        let idx = self
            .workouts
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| JournalError::not_found(id))?;
        Ok(self.workouts.remove(idx))
    }

    pub fn find(&self, id: &str) -> Result<&Workout, JournalError> {
        self.workouts
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| JournalError::not_found(id))
    }

    /// Read-only view in insertion order
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Replace contents wholesale from a restored snapshot
    pub fn restore(&mut self, workouts: Vec<Workout>) {
        self.workouts = workouts;
    }
}

fn validate_positive(value: f64, field: FormField) -> Result<(), JournalError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(JournalError::Validation { field })
    }
}

fn validate_non_negative(value: f64, field: FormField) -> Result<(), JournalError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(JournalError::Validation { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords() -> Coordinates {
        Coordinates::new(10.0, 20.0)
    }

    fn running() -> KindInput {
        KindInput::Running { cadence_spm: 150.0 }
    }

    #[test]
    fn test_create_appends_in_order() {
        let mut store = WorkoutStore::new();
        let first = store.create(running(), coords(), 5.0, 30.0).unwrap().id.clone();
        let second = store
            .create(
                KindInput::Cycling {
                    elevation_gain_m: 300.0,
                },
                coords(),
                20.0,
                60.0,
            )
            .unwrap()
            .id
            .clone();
        let ids: Vec<_> = store.all().iter().map(|w| w.id.clone()).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_create_generates_unique_ids() {
        let mut store = WorkoutStore::new();
        let a = store.create(running(), coords(), 5.0, 30.0).unwrap().id.clone();
        let b = store.create(running(), coords(), 5.0, 30.0).unwrap().id.clone();
        assert_ne!(a, b);
    }

    #[test]
    fn test_create_rejects_negative_distance() {
        let mut store = WorkoutStore::new();
        let err = store.create(running(), coords(), -1.0, 30.0).unwrap_err();
        assert_eq!(
            err,
            JournalError::Validation {
                field: FormField::Distance
            }
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_rejects_zero_duration() {
        let mut store = WorkoutStore::new();
        let err = store.create(running(), coords(), 5.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            JournalError::Validation {
                field: FormField::Duration
            }
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_rejects_non_finite_input() {
        let mut store = WorkoutStore::new();
        assert!(store.create(running(), coords(), f64::NAN, 30.0).is_err());
        assert!(store.create(running(), coords(), 5.0, f64::INFINITY).is_err());
        assert!(store
            .create(
                KindInput::Running {
                    cadence_spm: f64::NAN
                },
                coords(),
                5.0,
                30.0
            )
            .is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_zero_kind_field_is_permitted() {
        let mut store = WorkoutStore::new();
        assert!(store
            .create(
                KindInput::Cycling {
                    elevation_gain_m: 0.0
                },
                coords(),
                20.0,
                60.0
            )
            .is_ok());
        assert!(store
            .create(
                KindInput::Cycling {
                    elevation_gain_m: -5.0
                },
                coords(),
                20.0,
                60.0
            )
            .is_err());
    }

    #[test]
    fn test_remove_then_find_is_not_found() {
        let mut store = WorkoutStore::new();
        let keep = store.create(running(), coords(), 5.0, 30.0).unwrap().id.clone();
        let gone = store.create(running(), coords(), 6.0, 30.0).unwrap().id.clone();
        let keep_snapshot = store.find(&keep).unwrap().clone();

        let removed = store.remove(&gone).unwrap();
        assert_eq!(removed.id, gone);
        assert_eq!(store.len(), 1);
        assert!(matches!(
            store.find(&gone),
            Err(JournalError::NotFound { .. })
        ));
        // Surviving record is untouched
        assert_eq!(store.find(&keep).unwrap(), &keep_snapshot);
    }

    #[test]
    fn test_remove_stale_id_is_not_found() {
        let mut store = WorkoutStore::new();
        assert!(matches!(
            store.remove("nope"),
            Err(JournalError::NotFound { .. })
        ));
    }

    #[test]
    fn test_restore_replaces_contents() {
        let mut store = WorkoutStore::new();
        store.create(running(), coords(), 5.0, 30.0).unwrap();
        let records: Vec<Workout> = store.all().to_vec();

        let mut fresh = WorkoutStore::new();
        fresh.restore(records.clone());
        assert_eq!(fresh.all(), records.as_slice());
    }
}
