//! Collaborator traits at the edges of the core.
//!
//! The core never touches the terminal, the database, or the platform
//! location source directly; it talks to these traits and the front end
//! supplies the implementations. Tests supply in-memory fakes.

use anyhow::Result;

use super::error::JournalError;
use super::workout::{Coordinates, Workout};

/// Opaque handle to a placed map marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// The map the journal draws on
pub trait MapSurface {
    /// Center the map view
    fn render_at(&mut self, center: Coordinates, zoom: u8);

    /// Place a marker tagged with the owning workout's id.
    ///
    /// The tag is the identity used for later removal; implementations must
    /// keep it with the marker.
    fn place_marker(&mut self, at: Coordinates, label: &str, tag: &str) -> MarkerHandle;

    fn remove_marker(&mut self, handle: MarkerHandle);

    fn pan_to(&mut self, center: Coordinates, zoom: u8, animated: bool);
}

/// The list view mirroring the store
pub trait WorkoutList {
    fn append_entry(&mut self, workout: &Workout);

    /// Remove the entry for `id`. Implementations may keep the entry visible
    /// briefly for a removal transition; the store is already updated.
    fn remove_entry(&mut self, id: &str);
}

/// Key-value persistence boundary; the journal uses exactly one key
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// One-shot position source gating the initial map render
pub trait Locator {
    fn current_position(&self) -> Result<Coordinates, JournalError>;
}
