//! Wire model of the DataPoint JSON responses.
//!
//! Field names follow the API verbatim. Every scalar is kept as text: the API
//! quotes numbers inconsistently, and `"0"` is a meaningful weather code.
//! Unknown fields are ignored.

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// Root of `val/wxfcs/all/json/{location}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteRepMessage {
    #[serde(rename = "SiteRep")]
    pub site_rep: SiteForecast,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteForecast {
    #[serde(rename = "Wx")]
    pub wx: WeatherParameters,
    #[serde(rename = "DV")]
    pub dv: DataView,
}

/// Declares which fields appear in each [`Report`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherParameters {
    #[serde(rename = "Param", default)]
    pub param: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub units: String,
    #[serde(rename = "$", default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataView {
    #[serde(rename = "dataDate", default)]
    pub data_date: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "Location")]
    pub location: Location,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    #[serde(rename = "i", default)]
    pub id: String,
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub lon: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub continent: String,
    #[serde(default)]
    pub elevation: String,
    #[serde(rename = "Period", default)]
    pub period: Vec<Period>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Period {
    /// "Day" or "Night" for daily data, "Day" for 3-hourly.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "Rep", default)]
    pub rep: Vec<Report>,
}

/// One time point. Which fields are present depends on the resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Report {
    /// Wind direction.
    #[serde(rename = "D")]
    pub wind_direction: Option<String>,
    /// Wind gust at noon.
    #[serde(rename = "Gn")]
    pub wind_gust_noon: Option<String>,
    /// Relative humidity at noon.
    #[serde(rename = "Hn")]
    pub humidity_noon: Option<String>,
    /// Precipitation probability, day.
    #[serde(rename = "PPd")]
    pub precipitation_probability: Option<String>,
    /// Wind speed.
    #[serde(rename = "S")]
    pub wind_speed: Option<String>,
    /// Visibility.
    #[serde(rename = "V")]
    pub visibility: Option<String>,
    /// Day maximum temperature.
    #[serde(rename = "Dm")]
    pub day_max_temperature: Option<String>,
    /// Feels-like day maximum temperature.
    #[serde(rename = "FDm")]
    pub feels_like_day_max: Option<String>,
    /// Weather type code.
    #[serde(rename = "W")]
    pub weather_type: Option<String>,
    /// Max UV index.
    #[serde(rename = "U")]
    pub uv_index: Option<String>,
    /// Minutes after midnight for 3-hourly data, "Day"/"Night" for daily.
    #[serde(rename = "$")]
    pub value: Option<String>,
}

/// Root of `txt/wxfcs/regionalforecast/json/{region}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionalFcstMessage {
    #[serde(rename = "RegionalFcst")]
    pub regional_fcst: RegionalForecast,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionalForecast {
    #[serde(rename = "createdOn", default)]
    pub created_on: String,
    #[serde(rename = "issuedAt", default)]
    pub issued_at: String,
    #[serde(rename = "regionId", default)]
    pub region_id: String,
    #[serde(rename = "FcstPeriods")]
    pub fcst_periods: FcstPeriods,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FcstPeriods {
    #[serde(rename = "Period", default)]
    pub period: Vec<RegionalPeriod>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionalPeriod {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "Paragraph", default)]
    pub paragraphs: ParagraphList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Paragraph {
    /// The leading narrative paragraph has no title.
    #[serde(default)]
    pub title: String,
    #[serde(rename = "$", default)]
    pub text: String,
}

/// Paragraphs of a regional period.
///
/// The API sends a bare object when a period has a single paragraph and an
/// array otherwise. Both decode to the same ordered list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphList(pub Vec<Paragraph>);

impl ParagraphList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Paragraph> {
        self.0.get(index)
    }
}

impl<'de> Deserialize<'de> for ParagraphList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        // Derived structs also accept positional arrays, so only objects
        // (and other non-array values) get the single-paragraph attempt.
        let single = match &value {
            Value::Array(_) => None,
            other => Some(Paragraph::deserialize(other)),
        };

        match single {
            Some(Ok(paragraph)) => Ok(ParagraphList(vec![paragraph])),
            Some(Err(err)) if value.is_object() => Err(de::Error::custom(err)),
            _ => Vec::<Paragraph>::deserialize(&value)
                .map(ParagraphList)
                .map_err(de::Error::custom),
        }
    }
}
