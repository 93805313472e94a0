//! Terminal rendering for the ebdeploy binary
//!
//! - `blocks`: header, summary and error blocks
//! - `console`: progress lines for deploy events
//! - `views`: deploy-specific compositions of blocks

pub mod blocks;
pub mod ci;
pub mod console;
pub mod context;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
