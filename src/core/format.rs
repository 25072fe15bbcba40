//! Pure formatting helpers shared by every presenter.

use crate::domain::model::Location;
use chrono::{DateTime, Utc};
use std::fmt;

pub const LOCATION_SEPARATOR: &str = " of ";
pub const NEAR_THE: &str = "Near the";

/// One decimal place, rounding half away from zero (6.25 -> "6.3").
///
/// The rounding applies to the binary `f64` product `magnitude * 10.0`, not to
/// the decimal literal, so 0.35 becomes "0.4".
pub fn format_magnitude(magnitude: f64) -> String {
    let rounded = (magnitude * 10.0).round() / 10.0;
    // avoid printing "-0.0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.1}", rounded)
}

/// Ten ordinal severity bands keyed on the floor of the magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeverityBucket {
    Minor,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    TenPlus,
}

impl SeverityBucket {
    pub fn from_magnitude(magnitude: f64) -> Self {
        let floor = magnitude.floor();
        if floor.is_nan() || floor < 2.0 {
            return SeverityBucket::Minor;
        }
        match floor as i64 {
            2 => SeverityBucket::Two,
            3 => SeverityBucket::Three,
            4 => SeverityBucket::Four,
            5 => SeverityBucket::Five,
            6 => SeverityBucket::Six,
            7 => SeverityBucket::Seven,
            8 => SeverityBucket::Eight,
            9 => SeverityBucket::Nine,
            _ => SeverityBucket::TenPlus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeverityBucket::Minor => "1",
            SeverityBucket::Two => "2",
            SeverityBucket::Three => "3",
            SeverityBucket::Four => "4",
            SeverityBucket::Five => "5",
            SeverityBucket::Six => "6",
            SeverityBucket::Seven => "7",
            SeverityBucket::Eight => "8",
            SeverityBucket::Nine => "9",
            SeverityBucket::TenPlus => "10+",
        }
    }

    /// Background colour of the magnitude circle.
    pub fn color_hex(&self) -> &'static str {
        match self {
            SeverityBucket::Minor => "#4A7BA7",
            SeverityBucket::Two => "#04B4B3",
            SeverityBucket::Three => "#10CAC9",
            SeverityBucket::Four => "#F5A623",
            SeverityBucket::Five => "#FF7D50",
            SeverityBucket::Six => "#FC6644",
            SeverityBucket::Seven => "#E75F40",
            SeverityBucket::Eight => "#E13A20",
            SeverityBucket::Nine => "#D93218",
            SeverityBucket::TenPlus => "#C03823",
        }
    }
}

impl fmt::Display for SeverityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Splits "5km SW of Example Town" into its offset and primary location.
pub fn split_location(place: &str) -> Location {
    match place.split_once(LOCATION_SEPARATOR) {
        Some((offset, primary)) => Location {
            offset: format!("{}{}", offset, LOCATION_SEPARATOR),
            primary: primary.to_string(),
        },
        None => Location {
            offset: NEAR_THE.to_string(),
            primary: place.to_string(),
        },
    }
}

fn to_datetime(time_ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(time_ms)
}

/// "Mar 3, 1984", in UTC.
pub fn format_date(time_ms: i64) -> String {
    to_datetime(time_ms)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// "4:30 PM", in UTC.
pub fn format_time(time_ms: i64) -> String {
    to_datetime(time_ms)
        .map(|dt| dt.format("%-I:%M %p").to_string())
        .unwrap_or_default()
}
