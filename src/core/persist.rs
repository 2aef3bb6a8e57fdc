//! Snapshot persistence: the whole store as one versioned JSON value.
//!
//! A missing, unparsable, or wrong-version snapshot is the same as a first
//! run. Storage failures never reach the user; they are logged and the
//! session continues in memory.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ports::KeyValueStore;
use super::store::WorkoutStore;
use super::workout::Workout;

/// Single key holding the entire journal
pub const SNAPSHOT_KEY: &str = "workouts";

/// Bumped when the snapshot shape changes
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    workouts: Vec<Workout>,
}

/// Serializes the store to, and restores it from, the key-value collaborator
pub struct PersistenceAdapter<K> {
    kv: K,
}

impl<K: KeyValueStore> PersistenceAdapter<K> {
    pub fn new(kv: K) -> Self {
        PersistenceAdapter { kv }
    }

    /// Overwrite the snapshot with the store's current contents
    pub fn save(&mut self, store: &WorkoutStore) {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            workouts: store.all().to_vec(),
        };
        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, "failed to serialize snapshot");
                return;
            }
        };
        if let Err(err) = self.kv.set(SNAPSHOT_KEY, &json) {
            warn!(%err, "failed to write snapshot");
        }
    }

    /// Read the snapshot back; anything abnormal degrades to empty
    pub fn load(&self) -> Vec<Workout> {
        let json = match self.kv.get(SNAPSHOT_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(%err, "failed to read snapshot, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Snapshot>(&json) {
            Ok(snapshot) if snapshot.version == SNAPSHOT_VERSION => snapshot.workouts,
            Ok(snapshot) => {
                warn!(
                    found = snapshot.version,
                    expected = SNAPSHOT_VERSION,
                    "snapshot version mismatch, starting empty"
                );
                Vec::new()
            }
            Err(err) => {
                warn!(%err, "corrupt snapshot, starting empty");
                Vec::new()
            }
        }
    }

    /// Drop the snapshot entirely
    pub fn clear(&mut self) {
        if let Err(err) = self.kv.remove(SNAPSHOT_KEY) {
            warn!(%err, "failed to clear snapshot");
        }
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }
}
