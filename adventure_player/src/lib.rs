//! # Adventure Player
//!
//! The playback runtime for branching adventures. This crate takes a graph
//! from `adventure_graph`, tracks where the reader is, reacts to their
//! input, resolves the theme for each node, and stages live style previews
//! while an author edits.
//!
//! ## Core Components
//!
//! - **loader**: Builds a validated graph from a source or standalone text
//! - **session**: One playback instance owning a graph and its history
//! - **history**: Visited-node stack with branch truncation
//! - **input**: Keyboard and sentinel-gesture routing
//! - **theme**: Props to colors and CSS variables
//! - **preview**: Rate-limited, restorable live style overrides
//!
//! ## Design Philosophy
//!
//! - **Silent Degradation**: Only loading reports errors; navigation, theming and
//!   previews decline quietly when their preconditions fail
//! - **Single-Threaded**: Transitions are synchronous; the only suspension points are
//!   the loader's fetch and the preview scheduler's frame callbacks
//! - **Explicit Sessions**: No global state; every playback instance is a value

pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod loader;
pub mod preview;
pub mod session;
pub mod theme;

pub use config::*;
pub use error::*;
pub use history::*;
pub use input::*;
pub use loader::{load_standalone, AdventureSource, Loader};
pub use preview::*;
pub use session::*;
pub use theme::{resolve, resolve_raw, FontFace, ThemeOutput, ThemeSlot};
