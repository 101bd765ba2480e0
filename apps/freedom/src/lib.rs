//! # freedom
//!
//! Library half of the `freedom` binary: configuration loading, settings
//! resolution, time-bounded collection and report rendering around
//! `freedom-core`.

pub mod config;
pub mod error;
pub mod report;
pub mod settings;
