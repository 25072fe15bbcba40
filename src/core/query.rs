use crate::domain::model::QueryPreferences;
use crate::utils::error::{QuakeError, Result};
use crate::utils::validation::{validate_magnitude, validate_positive_number};
use url::Url;

pub const USGS_QUERY_ENDPOINT: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Appends `format`, `limit`, `minmag` and `orderby` to the base URL.
pub fn build_request_url(base: &str, prefs: &QueryPreferences) -> Result<String> {
    let mut url = Url::parse(base).map_err(|e| QuakeError::InvalidConfigValueError {
        field: "endpoint".to_string(),
        value: base.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    validate_magnitude("min_magnitude", &prefs.min_magnitude)?;
    validate_positive_number("limit", u64::from(prefs.limit), 1)?;

    url.query_pairs_mut()
        .append_pair("format", "geojson")
        .append_pair("limit", &prefs.limit.to_string())
        .append_pair("minmag", prefs.min_magnitude.trim())
        .append_pair("orderby", prefs.order_by.as_query_value());

    tracing::debug!("Built request URL: {}", url);
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::OrderBy;

    #[test]
    fn test_default_query() {
        let url = build_request_url(USGS_QUERY_ENDPOINT, &QueryPreferences::default()).unwrap();
        assert_eq!(
            url,
            "https://earthquake.usgs.gov/fdsnws/event/1/query?format=geojson&limit=10&minmag=6&orderby=time"
        );
    }

    #[test]
    fn test_custom_preferences() {
        let prefs = QueryPreferences {
            min_magnitude: "4.5".to_string(),
            order_by: OrderBy::Magnitude,
            limit: 50,
        };
        let url = build_request_url("http://localhost:8080/query", &prefs).unwrap();
        let parsed = Url::parse(&url).unwrap();
        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("format".to_string(), "geojson".to_string()),
                ("limit".to_string(), "50".to_string()),
                ("minmag".to_string(), "4.5".to_string()),
                ("orderby".to_string(), "magnitude".to_string()),
            ]
        );
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        assert!(build_request_url("not a url", &QueryPreferences::default()).is_err());

        let prefs = QueryPreferences {
            min_magnitude: "strong".to_string(),
            ..QueryPreferences::default()
        };
        assert!(build_request_url(USGS_QUERY_ENDPOINT, &prefs).is_err());

        let prefs = QueryPreferences {
            limit: 0,
            ..QueryPreferences::default()
        };
        assert!(build_request_url(USGS_QUERY_ENDPOINT, &prefs).is_err());
    }
}
