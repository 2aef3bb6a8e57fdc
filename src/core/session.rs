//! The session controller: a state machine over form visibility.
//!
//! UI events come in, store mutations and view updates go out. The form is
//! either hidden (`Idle`) or open over a pending map location (`Composing`);
//! no operation here mutates the store without also fanning out to the views
//! and snapshotting through the persistence adapter.

use tracing::info;

use super::error::JournalError;
use super::persist::PersistenceAdapter;
use super::ports::{KeyValueStore, Locator, MapSurface, WorkoutList};
use super::store::WorkoutStore;
use super::sync::ViewSynchronizer;
use super::workout::{Coordinates, KindInput, KindTag, Workout};

/// Map zoom used for the initial render and for focusing a workout
pub const DEFAULT_ZOOM: u8 = 13;

/// Raw form contents as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub kind: KindTag,
    pub distance: String,
    pub duration: String,
    /// Cadence for runs, elevation gain for rides
    pub kind_field: String,
}

/// Values pre-seeding the form when an existing workout is edited
#[derive(Debug, Clone, PartialEq)]
pub struct FormPrefill {
    pub kind: KindTag,
    pub distance_km: f64,
    pub duration_min: f64,
    pub kind_field: f64,
}

impl From<&Workout> for FormPrefill {
    fn from(workout: &Workout) -> Self {
        FormPrefill {
            kind: workout.kind.tag(),
            distance_km: workout.distance_km,
            duration_min: workout.duration_min,
            kind_field: workout.kind_field(),
        }
    }
}

/// Whether the form is open, and over which location
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Composing {
        coordinates: Coordinates,
        prefill: Option<FormPrefill>,
    },
}

/// Translates user input into store operations and view updates
pub struct SessionController<M, L, K> {
    store: WorkoutStore,
    views: ViewSynchronizer<M, L>,
    persistence: PersistenceAdapter<K>,
    state: SessionState,
    zoom: u8,
}

impl<M: MapSurface, L: WorkoutList, K: KeyValueStore> SessionController<M, L, K> {
    pub fn new(map: M, list: L, kv: K, zoom: u8) -> Self {
        SessionController {
            store: WorkoutStore::new(),
            views: ViewSynchronizer::new(map, list),
            persistence: PersistenceAdapter::new(kv),
            state: SessionState::Idle,
            zoom,
        }
    }

    /// Restore the snapshot, mirror it into the views, and render the map
    /// at the located position.
    ///
    /// Restoring never writes the snapshot back. With an empty journal a
    /// map click at the current position is synthesized so the form opens
    /// right away. On a failed fix the map falls back to the first restored
    /// workout, if any, and the error is returned for the app to surface.
    pub fn initialize(&mut self, locator: &dyn Locator) -> Result<(), JournalError> {
        let restored = self.persistence.load();
        self.store.restore(restored);
        let records = self.store.all().to_vec();
        self.views.on_restore(&records);
        info!(count = records.len(), "restored journal");

        match locator.current_position() {
            Ok(position) => {
                self.views.map_mut().render_at(position, self.zoom);
                if self.store.is_empty() {
                    self.map_click(position);
                }
                Ok(())
            }
            Err(err) => {
                if let Some(first) = self.store.all().first() {
                    let fallback = first.coordinates;
                    self.views.map_mut().render_at(fallback, self.zoom);
                }
                Err(err)
            }
        }
    }

    /// A click on the map opens the form over that location. Clicking again
    /// while the form is open just moves the pending location.
    pub fn map_click(&mut self, coordinates: Coordinates) {
        let prefill = match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Composing { prefill, .. } => prefill,
            SessionState::Idle => None,
        };
        self.state = SessionState::Composing {
            coordinates,
            prefill,
        };
    }

    /// Validate the form and create the workout.
    ///
    /// On success the views are updated, the snapshot written, and the form
    /// closes. On validation failure nothing changes and the form stays
    /// open. A submit with no form open is a no-op.
    pub fn submit(&mut self, input: &FormInput) -> Result<(), JournalError> {
        let coordinates = match &self.state {
            SessionState::Composing { coordinates, .. } => *coordinates,
            SessionState::Idle => return Ok(()),
        };

        let kind = match input.kind {
            KindTag::Running => KindInput::Running {
                cadence_spm: parse_field(&input.kind_field),
            },
            KindTag::Cycling => KindInput::Cycling {
                elevation_gain_m: parse_field(&input.kind_field),
            },
        };
        let distance_km = parse_field(&input.distance);
        let duration_min = parse_field(&input.duration);

        let workout = self
            .store
            .create(kind, coordinates, distance_km, duration_min)?
            .clone();
        self.views.on_create(&workout);
        self.persistence.save(&self.store);
        self.state = SessionState::Idle;
        info!(id = %workout.id, "logged {}", workout.description);
        Ok(())
    }

    /// Close the form, discarding the pending location and any prefill
    pub fn cancel(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Delete a workout by id. A stale id is benign: the store is already
    /// consistent, so the caller just reports it.
    pub fn delete(&mut self, id: &str) -> Result<(), JournalError> {
        let removed = self.store.remove(id)?;
        self.views.on_delete(&removed.id);
        self.persistence.save(&self.store);
        info!(id = %removed.id, "deleted {}", removed.description);
        Ok(())
    }

    /// Edit a workout: delete it and reopen the form over its location with
    /// every field pre-seeded. Resubmitting creates a fresh id.
    pub fn edit(&mut self, id: &str) -> Result<(), JournalError> {
        let workout = self.store.remove(id)?;
        self.views.on_delete(&workout.id);
        self.persistence.save(&self.store);
        self.state = SessionState::Composing {
            coordinates: workout.coordinates,
            prefill: Some(FormPrefill::from(&workout)),
        };
        Ok(())
    }

    /// Pan the map to a workout's position; no state change
    pub fn focus(&mut self, id: &str) -> Result<(), JournalError> {
        let center = self.store.find(id)?.coordinates;
        self.views.focus(center, self.zoom);
        Ok(())
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_composing(&self) -> bool {
        matches!(self.state, SessionState::Composing { .. })
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn map(&self) -> &M {
        self.views.map()
    }

    pub fn map_mut(&mut self) -> &mut M {
        self.views.map_mut()
    }

    pub fn list(&self) -> &L {
        self.views.list()
    }

    pub fn list_mut(&mut self) -> &mut L {
        self.views.list_mut()
    }
}

/// Parse a form field; anything non-numeric becomes NaN and fails the
/// finiteness check with the field's name attached.
fn parse_field(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}
