//! Air-quality API client
//!
//! Aggregates the three endpoints of a profile into typed records and chains
//! the city → station → pollutant selection. Nothing is cached between
//! calls: callers keep the [`Catalog`] snapshot and pass it back in.

use crate::config::{ApiConfig, EndpointConfig};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::model::{find_sensor, Catalog, Measurement, Sensor, Station};
use crate::pagination::{Aggregated, Aggregator, HttpPageFetcher};
use crate::template::TemplateContext;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// Measurement history of one pollutant at one station
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationHistory {
    /// Selected station
    pub station: Station,
    /// Sensor measuring the selected pollutant
    pub sensor: Sensor,
    /// Readings in upstream order, with aggregation status
    pub measurements: Aggregated<Measurement>,
}

/// Client for one API profile
#[derive(Debug, Clone)]
pub struct AirQualityClient {
    http: HttpClient,
    config: ApiConfig,
}

impl AirQualityClient {
    /// Create a client for a validated profile
    pub fn new(config: ApiConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_config(config.http_client_config())?;
        Ok(Self { http, config })
    }

    /// The profile in use
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Aggregate every station
    pub async fn fetch_all_stations(&self) -> Result<Aggregated<Station>> {
        let endpoint = &self.config.stations;
        self.aggregate(endpoint, &TemplateContext::new(), |item| {
            Station::from_value(&item, &endpoint.fields)
        })
        .await
    }

    /// Aggregate every station into an indexed catalog
    pub async fn fetch_catalog(&self) -> Result<Catalog> {
        Ok(Catalog::from_aggregated(self.fetch_all_stations().await?))
    }

    /// Aggregate the sensors of one station
    pub async fn fetch_sensors(&self, station_id: u64) -> Result<Aggregated<Sensor>> {
        let endpoint = &self.config.sensors;
        let ctx = TemplateContext::new().with_var("station_id", station_id);
        self.aggregate(endpoint, &ctx, |item| Sensor::from_value(&item, &endpoint.fields))
            .await
    }

    /// Aggregate the measurements of one sensor
    pub async fn fetch_measurements_by_sensor_id(
        &self,
        sensor_id: u64,
    ) -> Result<Aggregated<Measurement>> {
        let endpoint = &self.config.measurements;
        let ctx = TemplateContext::new().with_var("sensor_id", sensor_id);
        self.aggregate(endpoint, &ctx, |item| {
            Measurement::from_value(&item, &endpoint.fields)
        })
        .await
    }

    /// Resolve a station by city and name, then a sensor by pollutant, and
    /// fetch that sensor's history
    ///
    /// Duplicate names resolve to the first match in fetch order. A miss at
    /// any step is a `NotFound` error.
    pub async fn station_history(
        &self,
        catalog: &Catalog,
        city: &str,
        station_name: &str,
        parameter: &str,
    ) -> Result<StationHistory> {
        let station = select_station(catalog, city, station_name)?.clone();

        let sensors = self.fetch_sensors(station.id).await?;
        let sensor = find_sensor(&sensors.items, parameter)
            .cloned()
            .ok_or_else(|| Error::not_found("Parameter", parameter))?;

        let measurements = self.fetch_measurements_by_sensor_id(sensor.id).await?;

        Ok(StationHistory {
            station,
            sensor,
            measurements,
        })
    }

    /// Walk one endpoint and map its raw items into records
    async fn aggregate<F, T>(
        &self,
        endpoint: &EndpointConfig<F>,
        ctx: &TemplateContext,
        map: impl FnMut(Value) -> Result<T>,
    ) -> Result<Aggregated<T>> {
        let url_template = endpoint.url_template(ctx);
        info!(url = %url_template, paged = endpoint.is_paged(), "Aggregating endpoint");

        let fetcher = HttpPageFetcher::new(self.http.clone(), endpoint.decoder());
        let aggregated = Aggregator::new(fetcher)
            .with_max_pages(self.config.max_pages)
            .aggregate(&url_template)
            .await?;

        aggregated.try_map(map)
    }
}

/// Pick a station of a city by exact name
pub fn select_station<'a>(catalog: &'a Catalog, city: &str, station_name: &str) -> Result<&'a Station> {
    if catalog.stations_in_city(city).is_empty() {
        return Err(Error::not_found("City", city));
    }
    catalog
        .station_in_city(city, station_name)
        .ok_or_else(|| Error::not_found("Station", station_name))
}
