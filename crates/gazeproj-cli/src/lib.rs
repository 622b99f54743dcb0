//! gazeproj command-line library - project inspection commands and logging setup.
//!
//! Separated from main.rs so the commands can be tested without spawning the binary.

pub mod commands;
pub mod logging;
pub mod metadata;
