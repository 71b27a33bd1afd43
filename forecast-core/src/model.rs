use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hour of the day, 0-23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hour(pub u8);

/// Conditions for a single hour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub time: Option<DateTime<Utc>>,
    pub location: String,
    pub temperature: i32,
    pub wind_direction: i32,
    pub wind_speed_mph: i32,
    pub wind_gust_mph: i32,
    pub weather_type: i32,
}

/// Simplified summary of a single day.
///
/// Providers currently fill in `description` only; `forecasts` is reserved
/// for per-hour data and stays empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OneDayForecast {
    pub time: Option<DateTime<Utc>>,
    pub headline: String,
    pub description: String,
    pub forecasts: BTreeMap<Hour, Forecast>,
}
