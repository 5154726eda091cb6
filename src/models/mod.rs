//! Data models for the game catalog.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod document;
mod game;
mod stats;

pub use document::*;
pub use game::*;
pub use stats::*;
