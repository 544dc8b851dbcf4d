//! Provides handlers for subcommands.
//!
//! Each handler loads a timer from the store, acts on it and writes it back.
//! The `control` module changes timers, `stats` prints them.

pub mod control;
pub mod stats;
