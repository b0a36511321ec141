//! Cave pathfinder CLI library.
//!
//! This crate provides the command-line handlers for the cave pathfinder,
//! including logging setup and solution formatting.

pub mod commands;
pub mod logging;
pub mod output;
