use crate::{Config, OneDayForecast, error::Result, provider::datapoint::DatapointProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod datapoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Datapoint,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Datapoint => "datapoint",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Datapoint]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "datapoint" => Ok(ProviderId::Datapoint),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: datapoint."
            )),
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Summary for today plus `day_delta` days.
    async fn one_day_forecast(&self, day_delta: i32) -> Result<OneDayForecast>;
}

/// Named providers in registration order.
///
/// The first provider registered is the default. Build it once at start-up
/// and share it by reference.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: Vec<(String, Box<dyn WeatherProvider>)>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider under `name`.
    ///
    /// Registering an existing name swaps the implementation in place, so the
    /// default only changes if the first entry is replaced.
    pub fn register(&mut self, name: impl Into<String>, provider: Box<dyn WeatherProvider>) {
        let name = name.into();

        match self.providers.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = provider,
            None => self.providers.push((name, provider)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn WeatherProvider> {
        self.providers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p.as_ref())
    }

    pub fn default_provider(&self) -> Option<&dyn WeatherProvider> {
        self.providers.first().map(|(_, p)| p.as_ref())
    }

    pub fn default_name(&self) -> Option<&str> {
        self.providers.first().map(|(n, _)| n.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|(n, _)| n.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    if !config.is_provider_configured(id) {
        return Err(anyhow::anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: run `forecast configure {id}` or set DATAPOINT_API_KEY."
        ));
    }
    let provider_config = config
        .provider_config(id)
        .ok_or_else(|| anyhow::anyhow!("No configuration for provider '{id}'"))?;

    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::Datapoint => Box::new(DatapointProvider::new(provider_config.clone())),
    };

    Ok(boxed)
}

/// Register every configured provider, the configured default first.
pub fn registry_from_config(config: &Config) -> anyhow::Result<ProviderRegistry> {
    let default = config.default_provider_id()?;
    let mut registry = ProviderRegistry::new();

    registry.register(default.as_str(), provider_from_config(default, config)?);

    for id in ProviderId::all().iter().copied().filter(|id| *id != default) {
        if config.is_provider_configured(id) {
            registry.register(id.as_str(), provider_from_config(id, config)?);
        }
    }

    tracing::debug!(providers = registry.len(), default = %default, "provider registry built");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[derive(Debug)]
    struct FixedProvider(&'static str);

    #[async_trait]
    impl WeatherProvider for FixedProvider {
        async fn one_day_forecast(&self, _day_delta: i32) -> Result<OneDayForecast> {
            Ok(OneDayForecast {
                description: self.0.to_string(),
                ..Default::default()
            })
        }
    }

    async fn describe(provider: &dyn WeatherProvider) -> String {
        provider.one_day_forecast(0).await.unwrap().description
    }

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
        assert_eq!(ProviderId::try_from("DataPoint").unwrap(), ProviderId::Datapoint);
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn empty_registry_has_no_default() {
        let registry = ProviderRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.default_provider().is_none());
        assert!(registry.get("first").is_none());
    }

    #[tokio::test]
    async fn first_registered_provider_is_default() {
        let mut registry = ProviderRegistry::new();
        registry.register("first", Box::new(FixedProvider("one")));
        registry.register("second", Box::new(FixedProvider("two")));

        assert_eq!(registry.default_name(), Some("first"));
        assert_eq!(describe(registry.default_provider().unwrap()).await, "one");
        assert_eq!(describe(registry.get("second").unwrap()).await, "two");
        assert_eq!(registry.names().collect::<Vec<_>>(), ["first", "second"]);
    }

    #[tokio::test]
    async fn reregistering_replaces_in_place() {
        let mut registry = ProviderRegistry::new();
        registry.register("first", Box::new(FixedProvider("one")));
        registry.register("second", Box::new(FixedProvider("two")));
        registry.register("second", Box::new(FixedProvider("three")));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.default_name(), Some("first"));
        assert_eq!(describe(registry.get("second").unwrap()).await, "three");
    }

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(ProviderId::Datapoint, &cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured for provider"));
    }

    #[test]
    fn registry_from_config_errors_when_not_set() {
        let cfg = Config::default();
        let err = registry_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No default provider configured"));
        assert!(msg.contains("Hint: run `forecast configure"));
    }

    #[test]
    fn registry_from_config_works_when_set_and_configured() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::Datapoint, "KEY".to_string());

        let registry = registry_from_config(&cfg).unwrap();
        assert_eq!(registry.default_name(), Some("datapoint"));
        assert!(registry.get("datapoint").is_some());
    }
}
