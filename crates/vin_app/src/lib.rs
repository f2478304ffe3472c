//! VIN harvester front ends: command line and browser UI.
pub mod cli;
pub mod server;
pub mod settings;

mod commands;

pub use commands::{init_logging, run};
