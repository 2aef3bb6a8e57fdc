//! The workout journal core: records, store, view sync, persistence, and
//! the session state machine. Everything here is UI-free and talks to the
//! outside world through the traits in [`ports`].

pub mod error;
pub mod persist;
pub mod ports;
pub mod session;
pub mod store;
pub mod sync;
pub mod workout;

#[cfg(test)]
mod testutil;

pub use error::{FormField, JournalError};
pub use session::{FormInput, FormPrefill, SessionController, SessionState, DEFAULT_ZOOM};
pub use store::WorkoutStore;
pub use workout::{Coordinates, KindInput, KindTag, Workout, WorkoutKind};
