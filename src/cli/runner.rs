//! CLI runner - executes commands

use crate::api::{select_station, AirQualityClient};
use crate::cli::commands::{Cli, Commands};
use crate::config::ApiConfig;
use crate::error::Result;
use crate::model::{parameter_names, Catalog};
use crate::pagination::AggregationStatus;
use crate::profiles;
use crate::types::OutputFormat;
use serde_json::json;
use std::fmt::Write as _;
use tracing::{debug, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, printing its output to stdout
    pub async fn run(&self) -> Result<()> {
        let output = self.render().await?;
        print!("{output}");
        Ok(())
    }

    /// Run the CLI command and return what it would print
    pub async fn render(&self) -> Result<String> {
        match &self.cli.command {
            Commands::Cities => self.cities().await,
            Commands::Stations { city } => self.stations(city).await,
            Commands::Sensors { city, station } => self.sensors(city, station).await,
            Commands::Measurements {
                city,
                station,
                param,
            } => self.measurements(city, station, param).await,
            Commands::Profiles => self.profiles(),
            Commands::Endpoints => self.endpoints(),
        }
    }

    /// Load the API profile, applying the base URL override
    fn load_config(&self) -> Result<ApiConfig> {
        let config = ApiConfig::load(&self.cli.api)?;
        let config = match &self.cli.base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        };
        config.validate()?;
        debug!(profile = %config.name, base_url = %config.base_url, "Loaded API profile");
        Ok(config)
    }

    fn client(&self) -> Result<AirQualityClient> {
        AirQualityClient::new(self.load_config()?)
    }

    async fn catalog(&self, client: &AirQualityClient) -> Result<Catalog> {
        let catalog = client.fetch_catalog().await?;
        report_partial("stations", catalog.status());
        Ok(catalog)
    }

    /// List cities
    async fn cities(&self) -> Result<String> {
        let client = self.client()?;
        let catalog = self.catalog(&client).await?;
        let cities = catalog.cities();

        match self.cli.format {
            OutputFormat::Json => to_json(&json!({
                "status": catalog.status(),
                "cities": cities,
            })),
            OutputFormat::Pretty => Ok(lines(cities.iter().map(ToString::to_string))),
        }
    }

    /// List stations of a city
    async fn stations(&self, city: &str) -> Result<String> {
        let client = self.client()?;
        let catalog = self.catalog(&client).await?;
        let stations = catalog.stations_in_city(city);
        if stations.is_empty() {
            return Err(crate::Error::not_found("City", city));
        }

        match self.cli.format {
            OutputFormat::Json => to_json(&json!({
                "status": catalog.status(),
                "city": city,
                "stations": stations,
            })),
            OutputFormat::Pretty => Ok(lines(stations.iter().map(|s| {
                let coords = s
                    .coordinates()
                    .map(|(lat, lon)| format!("{lat:.6}, {lon:.6}"))
                    .unwrap_or_else(|| "-".to_string());
                format!("{}\t{}\t{}", s.id, s.name, coords)
            }))),
        }
    }

    /// List pollutants measured at a station
    async fn sensors(&self, city: &str, station_name: &str) -> Result<String> {
        let client = self.client()?;
        let catalog = self.catalog(&client).await?;
        let station = select_station(&catalog, city, station_name)?;
        let sensors = client.fetch_sensors(station.id).await?;
        report_partial("sensors", &sensors.status);

        match self.cli.format {
            OutputFormat::Json => to_json(&json!({
                "station": station,
                "status": sensors.status,
                "parameters": parameter_names(&sensors.items),
                "sensors": sensors.items,
            })),
            OutputFormat::Pretty => Ok(lines(sensors.items.iter().map(|s| {
                match &s.parameter_code {
                    Some(code) => format!("{}\t{} ({code})", s.id, s.parameter),
                    None => format!("{}\t{}", s.id, s.parameter),
                }
            }))),
        }
    }

    /// Print the history of one pollutant
    async fn measurements(&self, city: &str, station_name: &str, param: &str) -> Result<String> {
        let client = self.client()?;
        let catalog = self.catalog(&client).await?;
        let history = client
            .station_history(&catalog, city, station_name, param)
            .await?;
        report_partial("measurements", &history.measurements.status);

        match self.cli.format {
            OutputFormat::Json => to_json(&history),
            OutputFormat::Pretty => {
                let mut out = String::new();
                let _ = writeln!(
                    out,
                    "# {} / {} ({} readings, {})",
                    history.station.name,
                    history.sensor.parameter,
                    history.measurements.len(),
                    history.measurements.status
                );
                for m in &history.measurements.items {
                    let value = m
                        .value
                        .map_or_else(|| "-".to_string(), |v| v.to_string());
                    let _ = writeln!(out, "{}\t{}", m.date, value);
                }
                Ok(out)
            }
        }
    }

    /// List built-in profiles
    fn profiles(&self) -> Result<String> {
        let names = profiles::list_builtin();
        match self.cli.format {
            OutputFormat::Json => to_json(&json!({ "profiles": names })),
            OutputFormat::Pretty => Ok(lines(names.iter().map(ToString::to_string))),
        }
    }

    /// Show the resolved profile
    fn endpoints(&self) -> Result<String> {
        let config = self.load_config()?;
        match self.cli.format {
            OutputFormat::Json => to_json(&config),
            OutputFormat::Pretty => Ok(serde_yaml::to_string(&config)?),
        }
    }
}

/// Warn when an aggregation stopped on a failed page
fn report_partial(what: &str, status: &AggregationStatus) {
    if status.is_failed() {
        warn!("{what} are incomplete: {status}");
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

fn lines(items: impl Iterator<Item = String>) -> String {
    items.fold(String::new(), |mut out, line| {
        out.push_str(&line);
        out.push('\n');
        out
    })
}
