//! Typed records and the field maps that read them from raw JSON items
//!
//! Field maps default to the legacy API's names; the v1 profile overrides
//! them with its Polish keys.

use crate::decode::{extract_path, value_as_f64, value_as_string, value_as_u64};
use crate::error::{Error, Result};
use crate::types::OptionStringExt;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Timestamp layout used by every API version
const MEASUREMENT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Station
// ============================================================================

/// A monitoring station
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    /// Upstream identifier
    pub id: u64,
    /// Station name, unique only by convention
    pub name: String,
    /// City the station belongs to
    pub city: Option<String>,
    /// WGS84 latitude
    pub latitude: Option<f64>,
    /// WGS84 longitude
    pub longitude: Option<f64>,
    /// Street address
    pub street: Option<String>,
}

/// Where station attributes live in a raw item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationFields {
    pub id: String,
    pub name: String,
    pub city: String,
    pub latitude: String,
    pub longitude: String,
    pub street: Option<String>,
}

impl Default for StationFields {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            name: "stationName".to_string(),
            city: "city.name".to_string(),
            latitude: "gegrLat".to_string(),
            longitude: "gegrLon".to_string(),
            street: Some("addressStreet".to_string()),
        }
    }
}

impl Station {
    /// Read a station from a raw item
    pub fn from_value(value: &Value, fields: &StationFields) -> Result<Self> {
        Ok(Self {
            id: required_id(value, &fields.id)?,
            name: required_string(value, &fields.name)?,
            city: optional_string(value, &fields.city),
            latitude: extract_path(value, &fields.latitude).and_then(value_as_f64),
            longitude: extract_path(value, &fields.longitude).and_then(value_as_f64),
            street: fields
                .street
                .as_deref()
                .and_then(|path| optional_string(value, path)),
        })
    }

    /// Latitude and longitude, when both are known
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

// ============================================================================
// Sensor
// ============================================================================

/// A measurement channel at a station for one pollutant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sensor {
    /// Upstream identifier
    pub id: u64,
    /// Station the sensor belongs to
    pub station_id: Option<u64>,
    /// Pollutant name (e.g. "pył zawieszony PM10")
    pub parameter: String,
    /// Pollutant code (e.g. "PM10")
    pub parameter_code: Option<String>,
}

/// Where sensor attributes live in a raw item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorFields {
    pub id: String,
    pub station_id: String,
    pub parameter: String,
    pub parameter_code: Option<String>,
}

impl Default for SensorFields {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            station_id: "stationId".to_string(),
            parameter: "param.paramName".to_string(),
            parameter_code: Some("param.paramCode".to_string()),
        }
    }
}

impl Sensor {
    /// Read a sensor from a raw item
    pub fn from_value(value: &Value, fields: &SensorFields) -> Result<Self> {
        Ok(Self {
            id: required_id(value, &fields.id)?,
            station_id: extract_path(value, &fields.station_id).and_then(value_as_u64),
            parameter: required_string(value, &fields.parameter)?,
            parameter_code: fields
                .parameter_code
                .as_deref()
                .and_then(|path| optional_string(value, path)),
        })
    }

    /// Whether `name` matches this sensor's parameter name or code exactly
    pub fn measures(&self, name: &str) -> bool {
        self.parameter == name || self.parameter_code.as_deref() == Some(name)
    }
}

// ============================================================================
// Measurement
// ============================================================================

/// One reading of a sensor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// Timestamp as sent by the upstream
    pub date: String,
    /// Parsed timestamp (ISO 8601 in JSON), when it follows the usual layout
    pub timestamp: Option<NaiveDateTime>,
    /// Reading; `None` when the upstream reports no value
    pub value: Option<f64>,
}

/// Where measurement attributes live in a raw item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementFields {
    pub date: String,
    pub value: String,
}

impl Default for MeasurementFields {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            value: "value".to_string(),
        }
    }
}

impl Measurement {
    /// Read a measurement from a raw item
    pub fn from_value(value: &Value, fields: &MeasurementFields) -> Result<Self> {
        let date = required_string(value, &fields.date)?;
        let timestamp = NaiveDateTime::parse_from_str(date.trim(), MEASUREMENT_DATE_FORMAT).ok();
        Ok(Self {
            date,
            timestamp,
            value: extract_path(value, &fields.value).and_then(value_as_f64),
        })
    }
}

// ============================================================================
// Field helpers
// ============================================================================

fn required_id(value: &Value, path: &str) -> Result<u64> {
    extract_path(value, path)
        .and_then(value_as_u64)
        .ok_or_else(|| Error::record_extraction(path, "missing or non-numeric identifier"))
}

fn required_string(value: &Value, path: &str) -> Result<String> {
    optional_string(value, path)
        .ok_or_else(|| Error::record_extraction(path, "missing or empty field"))
}

fn optional_string(value: &Value, path: &str) -> Option<String> {
    extract_path(value, path)
        .and_then(value_as_string)
        .none_if_empty()
}
