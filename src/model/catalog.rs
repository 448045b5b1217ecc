//! Station catalog and selection
//!
//! A [`Catalog`] is an immutable snapshot of one station aggregation. Lookups
//! go through indexes built once at construction; when several stations share
//! a name, the first one in fetch order wins.

use super::records::{Sensor, Station};
use crate::pagination::{Aggregated, AggregationStatus};
use std::collections::{BTreeMap, HashMap};

/// Indexed snapshot of fetched stations
#[derive(Debug, Clone)]
pub struct Catalog {
    stations: Vec<Station>,
    status: AggregationStatus,
    by_id: HashMap<u64, usize>,
    by_city_name: HashMap<(String, String), usize>,
    by_city: BTreeMap<String, Vec<usize>>,
}

impl Catalog {
    /// Build a catalog from stations in fetch order
    pub fn new(stations: Vec<Station>) -> Self {
        Self::with_status(stations, AggregationStatus::Exhausted)
    }

    /// Build a catalog from a station aggregation, keeping its status
    pub fn from_aggregated(aggregated: Aggregated<Station>) -> Self {
        Self::with_status(aggregated.items, aggregated.status)
    }

    fn with_status(stations: Vec<Station>, status: AggregationStatus) -> Self {
        let mut by_id = HashMap::new();
        let mut by_city_name = HashMap::new();
        let mut by_city: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (idx, station) in stations.iter().enumerate() {
            by_id.entry(station.id).or_insert(idx);
            if let Some(city) = &station.city {
                by_city.entry(city.clone()).or_default().push(idx);
                by_city_name
                    .entry((city.clone(), station.name.clone()))
                    .or_insert(idx);
            }
        }

        Self {
            stations,
            status,
            by_id,
            by_city_name,
            by_city,
        }
    }

    /// All stations in fetch order
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// How the underlying aggregation ended
    pub fn status(&self) -> &AggregationStatus {
        &self.status
    }

    /// Number of stations
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the catalog has no stations
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Distinct city names, sorted
    pub fn cities(&self) -> Vec<&str> {
        self.by_city.keys().map(String::as_str).collect()
    }

    /// Stations of a city in fetch order; empty for unknown cities
    pub fn stations_in_city(&self, city: &str) -> Vec<&Station> {
        self.by_city
            .get(city)
            .map(|indices| indices.iter().map(|&i| &self.stations[i]).collect())
            .unwrap_or_default()
    }

    /// Station by identifier
    pub fn station(&self, id: u64) -> Option<&Station> {
        self.by_id.get(&id).map(|&i| &self.stations[i])
    }

    /// First station with this exact name within a city
    pub fn station_in_city(&self, city: &str, name: &str) -> Option<&Station> {
        self.by_city_name
            .get(&(city.to_string(), name.to_string()))
            .map(|&i| &self.stations[i])
    }
}

/// Parameter names of a station's sensors, in fetch order
pub fn parameter_names(sensors: &[Sensor]) -> Vec<&str> {
    sensors.iter().map(|s| s.parameter.as_str()).collect()
}

/// First sensor measuring `parameter` (by name or code)
pub fn find_sensor<'a>(sensors: &'a [Sensor], parameter: &str) -> Option<&'a Sensor> {
    sensors
        .iter()
        .find(|s| s.parameter == parameter)
        .or_else(|| sensors.iter().find(|s| s.measures(parameter)))
}
