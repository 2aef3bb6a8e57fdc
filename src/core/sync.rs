//! Fans store mutations out to the map and list collaborators.
//!
//! Markers and list entries are shadow collections of the store. They are
//! only ever touched through here, and markers are matched to workouts by
//! id, never by coordinates.

use tracing::debug;

use super::ports::{MapSurface, MarkerHandle, WorkoutList};
use super::workout::{Coordinates, Workout};

/// The set of live markers, one per workout in the store
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    entries: Vec<(String, MarkerHandle)>,
}

impl MarkerRegistry {
    pub fn insert(&mut self, workout_id: String, handle: MarkerHandle) {
        self.entries.push((workout_id, handle));
    }

    /// Take the handle owned by `workout_id`, if any
    pub fn take(&mut self, workout_id: &str) -> Option<MarkerHandle> {
        let idx = self.entries.iter().position(|(id, _)| id == workout_id)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Keeps the marker registry and the list view consistent with the store
pub struct ViewSynchronizer<M, L> {
    map: M,
    list: L,
    markers: MarkerRegistry,
}

impl<M: MapSurface, L: WorkoutList> ViewSynchronizer<M, L> {
    pub fn new(map: M, list: L) -> Self {
        ViewSynchronizer {
            map,
            list,
            markers: MarkerRegistry::default(),
        }
    }

    /// Mirror a freshly created record: marker tagged with its id, list
    /// entry appended at the end to preserve creation order.
    pub fn on_create(&mut self, workout: &Workout) {
        let handle = self
            .map
            .place_marker(workout.coordinates, &workout.description, &workout.id);
        self.markers.insert(workout.id.clone(), handle);
        self.list.append_entry(workout);
        debug!(id = %workout.id, "placed marker and list entry");
    }

    /// Mirror a deletion. Lookup is by id only; two workouts at the same
    /// coordinates must not interfere.
    pub fn on_delete(&mut self, id: &str) {
        if let Some(handle) = self.markers.take(id) {
            self.map.remove_marker(handle);
        }
        self.list.remove_entry(id);
    }

    /// Mirror the restored store at startup, in order. Persisting is the
    /// caller's concern and must not happen here.
    pub fn on_restore(&mut self, workouts: &[Workout]) {
        for workout in workouts {
            self.on_create(workout);
        }
    }

    /// Pan the map to a workout's position
    pub fn focus(&mut self, center: Coordinates, zoom: u8) {
        self.map.pan_to(center, zoom, true);
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut L {
        &mut self.list
    }
}
