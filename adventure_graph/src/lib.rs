//! # Adventure Graph
//!
//! The data model for a branching interactive narrative ("adventure").
//! This crate is the single source of truth for what a loaded adventure
//! looks like and contains no playback, input or rendering logic.
//!
//! ## Core Components
//!
//! - **model**: Identifiers, nodes, links and the raw adventure record
//! - **props**: The string-keyed style dictionary shared by adventures and nodes
//! - **graph**: The validated, immutable graph with O(1) lookups

pub mod error;
pub mod graph;
pub mod model;
pub mod props;

pub use error::*;
pub use graph::*;
pub use model::*;
pub use props::*;
