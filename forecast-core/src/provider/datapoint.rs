use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::{
    config::ProviderConfig,
    error::{AssemblyError, ForecastError, Result},
    model::OneDayForecast,
    transport::HttpClient,
};

use super::WeatherProvider;

pub mod schema;

use schema::{RegionalFcstMessage, RegionalForecast, SiteForecast, SiteRepMessage};

/// Time granularity of site forecast data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Daily,
    ThreeHourly,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Daily => "daily",
            Resolution::ThreeHourly => "3hourly",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Met Office DataPoint.
#[derive(Debug, Clone)]
pub struct DatapointProvider {
    config: ProviderConfig,
    http: HttpClient,
}

impl DatapointProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_client(config, HttpClient::new())
    }

    pub fn with_client(config: ProviderConfig, http: HttpClient) -> Self {
        Self { config, http }
    }

    /// Structured forecast for one site.
    pub async fn site_forecast(
        &self,
        location_id: &str,
        resolution: Resolution,
    ) -> Result<SiteForecast> {
        let url = self.url(&["val/wxfcs/all/json", location_id]);
        let body = self
            .http
            .fetch(
                &url,
                &[
                    ("res", resolution.as_str()),
                    ("key", self.config.api_key.as_str()),
                ],
            )
            .await?;

        let msg: SiteRepMessage = decode("site forecast", &body)?;
        Ok(msg.site_rep)
    }

    /// Narrative forecast for one region.
    pub async fn regional_forecast(&self, region_id: &str) -> Result<RegionalForecast> {
        let url = self.url(&["txt/wxfcs/regionalforecast/json", region_id]);
        let body = self
            .http
            .fetch(&url, &[("key", self.config.api_key.as_str())])
            .await?;

        let msg: RegionalFcstMessage = decode("regional forecast", &body)?;
        Ok(msg.regional_fcst)
    }

    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.config.base_url.trim_end_matches('/').to_string();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }
}

#[async_trait]
impl WeatherProvider for DatapointProvider {
    async fn one_day_forecast(&self, day_delta: i32) -> Result<OneDayForecast> {
        // Only today's forecast is fetched for now; `day_delta` does not shift the request.
        debug!(day_delta, "building one-day forecast");

        // The site data is not part of the summary yet. Fetching it still
        // checks that the location is served, and any failure aborts.
        let site = self
            .site_forecast(&self.config.location_id, Resolution::ThreeHourly)
            .await?;
        debug!(
            location = %site.dv.location.name,
            periods = site.dv.location.period.len(),
            "site forecast fetched"
        );

        let regional = self.regional_forecast(&self.config.region_id).await?;
        info!(
            region = %regional.region_id,
            issued_at = %regional.issued_at,
            "regional forecast fetched"
        );

        let forecast = assemble(&regional)?;
        Ok(forecast)
    }
}

fn decode<T: DeserializeOwned>(resource: &'static str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| ForecastError::Decode { resource, source })
}

/// Build the summary from the first period of a regional forecast.
pub fn assemble(regional: &RegionalForecast) -> Result<OneDayForecast, AssemblyError> {
    Ok(OneDayForecast {
        description: compose_description(regional)?,
        ..Default::default()
    })
}

/// Narrative, first titled section, second titled section.
pub const MIN_PARAGRAPHS: usize = 3;

/// Narrative paragraph, then the next two paragraphs as titled sections.
pub fn compose_description(regional: &RegionalForecast) -> Result<String, AssemblyError> {
    let period = regional
        .fcst_periods
        .period
        .first()
        .ok_or(AssemblyError::NoPeriods)?;

    let paragraphs = &period.paragraphs;
    let (Some(narrative), Some(first), Some(second)) =
        (paragraphs.get(0), paragraphs.get(1), paragraphs.get(2))
    else {
        return Err(AssemblyError::TooFewParagraphs {
            found: paragraphs.len(),
        });
    };

    Ok(format!(
        "{}\n\n{}\n{}\n\n{}\n{}",
        narrative.text, first.title, first.text, second.title, second.text
    ))
}
