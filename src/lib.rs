pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod persist;
pub mod report;
pub mod session;
pub mod settings;
pub mod state;
pub mod stats;
pub mod tracker;
pub mod units;

pub use error::{HydroError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_INVALID_INPUT: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;
