//! View state machine driving the terminal UI.

mod navigator;
mod state;

pub use navigator::Navigator;
pub use state::{Key, MenuEntry, NavState, Outcome, UrlField, View};
