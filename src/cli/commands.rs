//! CLI commands and argument parsing

use crate::profiles::DEFAULT_PROFILE;
use crate::types::OutputFormat;
use clap::{Parser, Subcommand};

/// Air-quality data from the GIOS monitoring network
#[derive(Parser, Debug)]
#[command(name = "airq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API profile: a built-in name (legacy, v1) or a YAML file
    #[arg(short, long, global = true, default_value = DEFAULT_PROFILE)]
    pub api: String,

    /// Override the profile's base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List cities with at least one station
    Cities,

    /// List stations of a city
    Stations {
        /// City name (exact match)
        #[arg(long)]
        city: String,
    },

    /// List pollutants measured at a station
    Sensors {
        /// City name (exact match)
        #[arg(long)]
        city: String,

        /// Station name (exact match, first one wins on duplicates)
        #[arg(long)]
        station: String,
    },

    /// Print the measurement history of one pollutant at a station
    Measurements {
        /// City name (exact match)
        #[arg(long)]
        city: String,

        /// Station name (exact match, first one wins on duplicates)
        #[arg(long)]
        station: String,

        /// Pollutant name or code (e.g. "PM10")
        #[arg(long)]
        param: String,
    },

    /// List built-in API profiles
    Profiles,

    /// Show the resolved API profile
    Endpoints,
}
