//! API profile configuration
//!
//! An [`ApiConfig`] names the three endpoints (stations, sensors per station,
//! measurements per sensor), where each response keeps its items and total
//! page count, and how items map to records. Paths are `{{ var }}` templates;
//! `page` and `size` are filled in during paging, `station_id` and
//! `sensor_id` by the client.

use crate::decode::JsonPageDecoder;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::model::{MeasurementFields, SensorFields, StationFields};
use crate::pagination::DEFAULT_MAX_PAGES;
use crate::profiles;
use crate::template::{self, TemplateContext};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete API profile loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Profile name (e.g. "v1")
    pub name: String,

    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,

    /// Base URL for all endpoint paths
    pub base_url: String,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Ceiling on pages walked per aggregation
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Station listing
    pub stations: EndpointConfig<StationFields>,

    /// Sensors of one station (`{{ station_id }}`)
    pub sensors: EndpointConfig<SensorFields>,

    /// Measurements of one sensor (`{{ sensor_id }}`)
    pub measurements: EndpointConfig<MeasurementFields>,
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Optional client-side rate limit
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            rate_limit: None,
            headers: HashMap::new(),
        }
    }
}

// ============================================================================
// Endpoint Config
// ============================================================================

/// One paged (or unpaged) endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig<F> {
    /// Path template relative to the base URL
    pub path: String,

    /// Path to the item list; absent means the body is the list
    #[serde(default)]
    pub items_path: Option<String>,

    /// Path to the declared total page count
    #[serde(default)]
    pub total_pages_path: Option<String>,

    /// Value substituted for `{{ size }}`
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Record field names
    #[serde(default)]
    pub fields: F,
}

fn default_page_size() -> u32 {
    100
}

impl<F> EndpointConfig<F> {
    /// Decoder for this endpoint's responses
    pub fn decoder(&self) -> JsonPageDecoder {
        let decoder = match &self.items_path {
            Some(path) => JsonPageDecoder::with_items_path(path),
            None => JsonPageDecoder::new(),
        };
        match &self.total_pages_path {
            Some(path) => decoder.total_pages_path(path),
            None => decoder,
        }
    }

    /// Render everything but `{{ page }}`, which the pager fills in
    pub fn url_template(&self, ctx: &TemplateContext) -> String {
        let ctx = ctx.clone().with_var("size", self.page_size);
        template::render_optional(&self.path, &ctx)
    }

    /// Whether the path walks pages at all
    pub fn is_paged(&self) -> bool {
        template::extract_variables(&self.path)
            .iter()
            .any(|v| v == "page")
    }

    fn validate(&self, endpoint: &str, allowed: &[&str]) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(Error::missing_field(format!("{endpoint}.path")));
        }
        if self.page_size == 0 {
            return Err(Error::invalid_value(
                format!("{endpoint}.page_size"),
                "must be greater than zero",
            ));
        }
        for var in template::extract_variables(&self.path) {
            if var != "page" && var != "size" && !allowed.contains(&var.as_str()) {
                return Err(Error::invalid_value(
                    format!("{endpoint}.path"),
                    format!("unknown template variable '{var}'"),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Loading
// ============================================================================

impl ApiConfig {
    /// Load a built-in profile by name, or a YAML file by path
    pub fn load(name_or_path: impl AsRef<Path>) -> Result<Self> {
        let path = name_or_path.as_ref();
        let path_str = path.to_string_lossy();

        if let Some(yaml) = profiles::get_builtin(&path_str) {
            return Self::from_yaml_str(yaml);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::config(format!(
                    "API profile '{}' not found. Built-in profiles: {}. Or provide a path to a YAML file.",
                    path.display(),
                    profiles::list_builtin().join(", ")
                )));
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_yaml_str(&content)
    }

    /// Load a built-in profile by name
    pub fn builtin(name: &str) -> Result<Self> {
        let yaml = profiles::get_builtin(name).ok_or_else(|| {
            Error::config(format!(
                "Unknown built-in profile '{name}'. Available: {}",
                profiles::list_builtin().join(", ")
            ))
        })?;
        Self::from_yaml_str(yaml)
    }

    /// Parse and validate a profile from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Point the profile at another host (used for mirrors and tests)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Validate the profile
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::config("Profile name cannot be empty"));
        }
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        Url::parse(&self.base_url)?;
        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_value(
                "http.timeout_secs",
                "must be greater than zero",
            ));
        }

        self.stations.validate("stations", &[])?;
        self.sensors.validate("sensors", &["station_id"])?;
        self.measurements.validate("measurements", &["sensor_id"])?;
        Ok(())
    }

    /// HTTP client configuration derived from this profile
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.http.timeout_secs));

        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(limit) = &self.http.rate_limit {
            builder = builder.rate_limit(limit.clone());
        }
        for (key, value) in &self.http.headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }
}
