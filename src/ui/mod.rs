//! Terminal User Interface components for waylog.

mod help;
pub mod map;
pub mod surface;
pub mod theme;
pub mod widgets;

pub use help::HelpOverlay;
