#![warn(clippy::all, missing_docs)]

//! Core logic for the diamonds terminal tool.
//!
//! This crate hosts the project models, configuration handling,
//! JSON persistence and the view state machine used by the
//! terminal UI. It has no terminal dependency of its own.

pub mod clipboard;
pub mod config;
pub mod models;
pub mod nav;
pub mod store;

pub use clipboard::{ClipboardError, ClipboardSink};
pub use config::{AppConfig, ThemeConfig};
pub use models::{NamedUrl, Project};
pub use nav::{Key, Navigator, Outcome, View};
pub use store::{JsonFileStore, ProjectStore, StoreError};
