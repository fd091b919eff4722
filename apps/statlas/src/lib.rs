//! # statlas
//!
//! Library surface of the Statlas binary.
//!
//! Exposes the CLI definitions, application configuration, and the run
//! driver so integration tests can exercise them without spawning the
//! binary.

pub mod cli;
pub mod config;
pub mod runner;
