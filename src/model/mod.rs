//! Domain records and selection
//!
//! Stations, sensors and measurements read from raw API items, plus the
//! [`Catalog`] used to pick a city, a station and a pollutant.

mod catalog;
mod records;

pub use catalog::{find_sensor, parameter_names, Catalog};
pub use records::{
    Measurement, MeasurementFields, Sensor, SensorFields, Station, StationFields,
};
