use crate::adapters::presenter::OutputFormat;
use crate::core::query::{build_request_url, USGS_QUERY_ENDPOINT};
use crate::domain::ports::{PreferenceStore, LIMIT_KEY, MIN_MAGNITUDE_KEY, ORDER_BY_KEY};
use crate::utils::error::{QuakeError, Result};
use crate::utils::validation::{
    validate_magnitude, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::time::Duration;

/// Contents of a `quake-report` settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceSettings,
    pub query: QuerySettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub endpoint: String,
    pub connect_timeout_seconds: u64,
    pub read_timeout_seconds: u64,
    pub check_connectivity: bool,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            endpoint: USGS_QUERY_ENDPOINT.to_string(),
            connect_timeout_seconds: 15,
            read_timeout_seconds: 10,
            check_connectivity: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    #[serde(deserialize_with = "string_or_number")]
    pub min_magnitude: Option<String>,
    pub order_by: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

// `min_magnitude = 4.5` and `min_magnitude = "4.5"` are both accepted.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Integer(i) => i.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}

impl Settings {
    /// Loads settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuakeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QuakeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QuakeError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.source.connect_timeout_seconds)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.source.read_timeout_seconds)
    }

    /// Full feed URL built from the endpoint and the stored query filters.
    pub fn request_url(&self) -> Result<String> {
        build_request_url(&self.source.endpoint, &self.query_preferences()?)
    }
}

impl PreferenceStore for Settings {
    fn get_string(&self, key: &str) -> Option<String> {
        match key {
            MIN_MAGNITUDE_KEY => self.query.min_magnitude.clone(),
            ORDER_BY_KEY => self.query.order_by.clone(),
            LIMIT_KEY => self.query.limit.map(|limit| limit.to_string()),
            _ => None,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("source.endpoint", &self.source.endpoint)?;
        validate_positive_number(
            "source.connect_timeout_seconds",
            self.source.connect_timeout_seconds,
            1,
        )?;
        validate_positive_number(
            "source.read_timeout_seconds",
            self.source.read_timeout_seconds,
            1,
        )?;

        let prefs = self.query_preferences()?;
        validate_magnitude("query.min_magnitude", &prefs.min_magnitude)?;
        // USGS rejects larger page sizes
        validate_range("query.limit", prefs.limit, 1, 20000)?;

        Ok(())
    }
}
