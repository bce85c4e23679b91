//! CLI library components for the record type studio.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod summary;
