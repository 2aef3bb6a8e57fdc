//! In-memory collaborator fakes shared by the core tests.

use std::cell::Cell;
use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use super::error::JournalError;
use super::ports::{KeyValueStore, Locator, MapSurface, MarkerHandle, WorkoutList};
use super::workout::{Coordinates, KindInput, Workout};

/// Build a running workout at the given position with a fresh id
pub fn workout_at(lat: f64, lng: f64) -> Workout {
    Workout::new(
        Uuid::new_v4().to_string(),
        KindInput::Running { cadence_spm: 150.0 },
        Coordinates::new(lat, lng),
        5.0,
        30.0,
        Utc::now(),
    )
}

#[derive(Debug, Clone)]
pub struct FakeMarker {
    pub handle: MarkerHandle,
    pub at: Coordinates,
    pub label: String,
    pub tag: String,
}

#[derive(Debug, Default)]
pub struct FakeMap {
    pub markers: Vec<FakeMarker>,
    pub center: Option<(Coordinates, u8)>,
    pub pans: Vec<(Coordinates, u8, bool)>,
    next_handle: u64,
}

impl MapSurface for FakeMap {
    fn render_at(&mut self, center: Coordinates, zoom: u8) {
        self.center = Some((center, zoom));
    }

    fn place_marker(&mut self, at: Coordinates, label: &str, tag: &str) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.markers.push(FakeMarker {
            handle,
            at,
            label: label.to_string(),
            tag: tag.to_string(),
        });
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.retain(|m| m.handle != handle);
    }

    fn pan_to(&mut self, center: Coordinates, zoom: u8, animated: bool) {
        self.pans.push((center, zoom, animated));
    }
}

#[derive(Debug, Default)]
pub struct FakeList {
    /// Ids of visible entries, in display order
    pub entries: Vec<String>,
}

impl WorkoutList for FakeList {
    fn append_entry(&mut self, workout: &Workout) {
        self.entries.push(workout.id.clone());
    }

    fn remove_entry(&mut self, id: &str) {
        self.entries.retain(|e| e != id);
    }
}

/// In-memory key-value store that counts writes
#[derive(Debug, Default)]
pub struct MemoryKv {
    map: HashMap<String, String>,
    pub writes: Cell<usize>,
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes.set(self.writes.get() + 1);
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.map.remove(key);
        Ok(())
    }
}

/// Locator resolving to a fixed position, or failing when `None`
pub struct FixedLocator(pub Option<Coordinates>);

impl Locator for FixedLocator {
    fn current_position(&self) -> Result<Coordinates, JournalError> {
        self.0.ok_or_else(|| JournalError::LocationUnavailable {
            reason: "no fix configured".to_string(),
        })
    }
}
