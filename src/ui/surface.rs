//! Terminal-side implementations of the map and list collaborators.
//!
//! The core fans mutations out through the `MapSurface` and `WorkoutList`
//! traits; these retained-state implementations are what the widgets read
//! when drawing a frame.

use std::time::{Duration, Instant};

use crate::core::ports::{MapSurface, MarkerHandle, WorkoutList};
use crate::core::workout::{Coordinates, Workout};

/// How long a deleted list entry stays visible while fading out
pub const REMOVAL_DELAY: Duration = Duration::from_millis(400);

/// A marker placed on the terminal map
#[derive(Debug, Clone)]
pub struct PlacedMarker {
    pub handle: MarkerHandle,
    pub at: Coordinates,
    pub label: String,
    /// Owning workout id; the identity used for removal
    pub tag: String,
}

/// Retained map state rendered by the map panel
#[derive(Debug)]
pub struct TerminalMap {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<PlacedMarker>,
    next_handle: u64,
}

impl TerminalMap {
    pub fn new(zoom: u8) -> Self {
        TerminalMap {
            center: Coordinates::new(0.0, 0.0),
            zoom,
            markers: Vec::new(),
            next_handle: 0,
        }
    }

    /// Width of the visible window in degrees of longitude, slippy-style:
    /// each zoom level halves the span.
    pub fn span_deg(&self) -> f64 {
        360.0 / f64::from(1u32 << u32::from(self.zoom.min(20)))
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(18);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(1);
    }
}

impl MapSurface for TerminalMap {
    fn render_at(&mut self, center: Coordinates, zoom: u8) {
        self.center = center;
        self.zoom = zoom;
    }

    fn place_marker(&mut self, at: Coordinates, label: &str, tag: &str) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.markers.push(PlacedMarker {
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

    fn pan_to(&mut self, center: Coordinates, zoom: u8, _animated: bool) {
        // Terminal pans are instant; the animation flag is for map backends
        // that support it
        self.center = center;
        self.zoom = zoom;
    }
}

/// One visible list row
#[derive(Debug, Clone)]
pub struct ListEntry {
    pub workout: Workout,
    /// Set once deleted; the row lingers until the deadline passes
    pub fading_until: Option<Instant>,
}

impl ListEntry {
    pub fn is_fading(&self) -> bool {
        self.fading_until.is_some()
    }
}

/// Retained list state rendered by the workouts panel.
///
/// Deletion marks a row as fading rather than dropping it; the row is
/// physically removed on a later tick. The store is already updated by
/// then, so operations issued during the fade act on live data only.
#[derive(Debug, Default)]
pub struct TerminalList {
    entries: Vec<ListEntry>,
}

impl TerminalList {
    pub fn new() -> Self {
        TerminalList::default()
    }

    /// All rows still on screen, fading ones included
    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    /// Ids of rows that are still live (selectable)
    pub fn active_ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| !e.is_fading())
            .map(|e| e.workout.id.as_str())
            .collect()
    }

    pub fn active_len(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_fading()).count()
    }

    /// Drop rows whose fade deadline has passed
    pub fn tick(&mut self, now: Instant) {
        self.entries
            .retain(|e| e.fading_until.map(|t| now < t).unwrap_or(true));
    }
}

impl WorkoutList for TerminalList {
    fn append_entry(&mut self, workout: &Workout) {
        self.entries.push(ListEntry {
            workout: workout.clone(),
            fading_until: None,
        });
    }

    fn remove_entry(&mut self, id: &str) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.workout.id == id && !e.is_fading())
        {
            entry.fading_until = Some(Instant::now() + REMOVAL_DELAY);
        }
    }
}
