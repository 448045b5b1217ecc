//! CLI module
//!
//! Command-line interface over the air-quality client.
//!
//! # Commands
//!
//! - `cities` - List cities with monitoring stations
//! - `stations` - List stations of a city
//! - `sensors` - List pollutants measured at a station
//! - `measurements` - Print the measurement history of one pollutant
//! - `profiles` - List built-in API profiles
//! - `endpoints` - Show the resolved API profile

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
