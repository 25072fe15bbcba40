//! Decoding of the USGS GeoJSON feed into [`Earthquake`] records.

use crate::domain::model::Earthquake;
use crate::utils::error::{QuakeError, Result};
use serde_json::{Map, Value};

/// Parses a feed body, collapsing every failure to an empty list.
///
/// Absent and empty input both mean "no data". A single malformed feature
/// discards the whole batch rather than returning the records read so far.
pub fn extract_earthquakes(body: Option<&str>) -> Vec<Earthquake> {
    let Some(body) = body.filter(|b| !b.is_empty()) else {
        tracing::debug!("Empty feed body, nothing to parse");
        return Vec::new();
    };

    match try_extract_earthquakes(body) {
        Ok(earthquakes) => earthquakes,
        Err(e) => {
            tracing::error!("Problem parsing the earthquake JSON results: {}", e);
            Vec::new()
        }
    }
}

pub fn try_extract_earthquakes(body: &str) -> Result<Vec<Earthquake>> {
    let root: Value = serde_json::from_str(body)?;
    let root = root
        .as_object()
        .ok_or_else(|| QuakeError::parse("top-level value is not an object"))?;

    let features = root
        .get("features")
        .ok_or_else(|| QuakeError::parse("missing field 'features'"))?
        .as_array()
        .ok_or_else(|| QuakeError::parse("field 'features' is not an array"))?;

    let mut earthquakes = Vec::with_capacity(features.len());
    for (index, feature) in features.iter().enumerate() {
        let earthquake = parse_feature(feature)
            .map_err(|e| QuakeError::parse(format!("feature {}: {}", index, e)))?;
        earthquakes.push(earthquake);
    }

    tracing::debug!("Parsed {} earthquakes", earthquakes.len());
    Ok(earthquakes)
}

fn parse_feature(feature: &Value) -> std::result::Result<Earthquake, String> {
    let properties = feature
        .as_object()
        .ok_or("feature is not an object")?
        .get("properties")
        .ok_or("missing field 'properties'")?
        .as_object()
        .ok_or("field 'properties' is not an object")?;

    let magnitude = get_f64(properties, "mag")?;
    let place = get_string(properties, "place")?;
    let time_ms = get_i64(properties, "time")?;
    let url = get_string(properties, "url")?;

    Ok(Earthquake::new(magnitude, place, time_ms, url))
}

fn get_field<'a>(object: &'a Map<String, Value>, key: &str) -> std::result::Result<&'a Value, String> {
    match object.get(key) {
        None => Err(format!("missing field '{}'", key)),
        Some(Value::Null) => Err(format!("field '{}' is null", key)),
        Some(value) => Ok(value),
    }
}

// Numeric strings are accepted the way lenient JSON object readers accept them.
fn get_f64(object: &Map<String, Value>, key: &str) -> std::result::Result<f64, String> {
    let value = get_field(object, key)?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("field '{}' is not a finite number: {}", key, value))
}

fn get_i64(object: &Map<String, Value>, key: &str) -> std::result::Result<i64, String> {
    let value = get_field(object, key)?;
    let number = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    number.ok_or_else(|| format!("field '{}' is not an integer: {}", key, value))
}

fn get_string(object: &Map<String, Value>, key: &str) -> std::result::Result<String, String> {
    match get_field(object, key)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(format!("field '{}' is not a string: {}", key, other)),
    }
}
