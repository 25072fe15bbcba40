use crate::domain::model::{LoadState, OrderBy, QueryPreferences, DEFAULT_LIMIT, DEFAULT_MIN_MAGNITUDE};
use crate::utils::error::{QuakeError, Result};
use async_trait::async_trait;
use std::collections::HashMap;

pub const MIN_MAGNITUDE_KEY: &str = "min_magnitude";
pub const ORDER_BY_KEY: &str = "order_by";
pub const LIMIT_KEY: &str = "limit";

/// Transport for a single GET. Failures are logged by the implementation and
/// reported as `None`, never as an error.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<String>;
}

pub trait ConnectivityProbe: Send + Sync {
    fn is_connected(&self, url: &str) -> impl std::future::Future<Output = bool> + Send;
}

pub trait Presenter {
    fn render(&mut self, state: &LoadState) -> Result<()>;
}

/// Opaque key/value settings storage.
pub trait PreferenceStore {
    fn get_string(&self, key: &str) -> Option<String>;

    fn query_preferences(&self) -> Result<QueryPreferences> {
        let min_magnitude = self
            .get_string(MIN_MAGNITUDE_KEY)
            .unwrap_or_else(|| DEFAULT_MIN_MAGNITUDE.to_string());

        let order_by = match self.get_string(ORDER_BY_KEY) {
            Some(raw) => raw
                .parse::<OrderBy>()
                .map_err(|reason| QuakeError::InvalidConfigValueError {
                    field: ORDER_BY_KEY.to_string(),
                    value: raw.clone(),
                    reason,
                })?,
            None => OrderBy::default(),
        };

        let limit = match self.get_string(LIMIT_KEY) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| QuakeError::InvalidConfigValueError {
                    field: LIMIT_KEY.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_LIMIT,
        };

        Ok(QueryPreferences {
            min_magnitude,
            order_by,
            limit,
        })
    }
}

impl PreferenceStore for HashMap<String, String> {
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
