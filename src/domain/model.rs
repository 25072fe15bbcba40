use serde::{Deserialize, Serialize};
use std::fmt;

/// One seismic event from the USGS feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Earthquake {
    magnitude: f64,
    place: String,
    #[serde(rename = "time")]
    time_ms: i64,
    url: String,
}

impl Earthquake {
    /// `time_ms` is milliseconds since the Unix epoch.
    pub fn new(magnitude: f64, place: impl Into<String>, time_ms: i64, url: impl Into<String>) -> Self {
        Self {
            magnitude,
            place: place.into(),
            time_ms,
            url: url.into(),
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn time_ms(&self) -> i64 {
        self.time_ms
    }

    /// Detail page for the event on the USGS site.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// What the presentation layer is asked to show.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded(Vec<Earthquake>),
    /// No records, whether the feed was empty or the fetch or parse failed.
    Empty,
    /// The connectivity probe failed before any request was made.
    NoNetwork,
}

impl LoadState {
    /// An empty list is never published as `Loaded`.
    pub fn from_records(records: Vec<Earthquake>) -> Self {
        if records.is_empty() {
            LoadState::Empty
        } else {
            LoadState::Loaded(records)
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, LoadState::Loading)
    }

    pub fn records(&self) -> &[Earthquake] {
        match self {
            LoadState::Loaded(records) => records,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub offset: String,
    pub primary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Time,
    Magnitude,
}

impl OrderBy {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            OrderBy::Time => "time",
            OrderBy::Magnitude => "magnitude",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

impl std::str::FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(OrderBy::Time),
            "magnitude" => Ok(OrderBy::Magnitude),
            other => Err(format!(
                "unknown ordering '{}', expected 'time' or 'magnitude'",
                other
            )),
        }
    }
}

pub const DEFAULT_MIN_MAGNITUDE: &str = "6";
pub const DEFAULT_LIMIT: u32 = 10;

/// Query filters as the settings collaborator stores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPreferences {
    pub min_magnitude: String,
    pub order_by: OrderBy,
    pub limit: u32,
}

impl Default for QueryPreferences {
    fn default() -> Self {
        Self {
            min_magnitude: DEFAULT_MIN_MAGNITUDE.to_string(),
            order_by: OrderBy::Time,
            limit: DEFAULT_LIMIT,
        }
    }
}
