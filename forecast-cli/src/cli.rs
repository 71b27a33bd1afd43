use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, ProviderConfig, ProviderId,
    provider::{ProviderRegistry, registry_from_config},
};
use inquire::{Password, PasswordDisplayMode, Text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Met Office DataPoint forecast CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials and location for a specific provider.
    Configure {
        /// Provider short name, e.g. "datapoint".
        provider: String,
    },

    /// Print the one-day forecast description.
    Show {
        /// Provider to use instead of the default one.
        #[arg(long)]
        provider: Option<String>,

        /// Days from today. Only today is supported by the current providers.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        day_delta: i32,
    },

    /// List the configured providers.
    Providers,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show {
                provider,
                day_delta,
            } => {
                let registry = load_registry()?;
                show(&registry, provider.as_deref(), day_delta).await
            }
            Command::Providers => {
                let registry = load_registry()?;
                for name in registry.names() {
                    if Some(name) == registry.default_name() {
                        println!("{name} (default)");
                    } else {
                        println!("{name}");
                    }
                }
                Ok(())
            }
        }
    }
}

fn load_registry() -> Result<ProviderRegistry> {
    let config = Config::load_with_env()?;
    registry_from_config(&config)
}

async fn show(registry: &ProviderRegistry, name: Option<&str>, day_delta: i32) -> Result<()> {
    let provider = match name {
        Some(name) => registry
            .get(name)
            .with_context(|| format!("Provider '{name}' is not configured"))?,
        None => registry
            .default_provider()
            .context("No providers configured")?,
    };

    let forecast = provider
        .one_day_forecast(day_delta)
        .await
        .context("Failed to fetch the one-day forecast")?;

    println!("{}", forecast.description);
    Ok(())
}

fn configure(provider: &str) -> Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    let current = config
        .provider_config(id)
        .cloned()
        .unwrap_or_else(|| ProviderConfig::new(String::new()));

    let api_key = Password::new(&format!("API key for {id}:"))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()?;

    let location_id = Text::new("Site location id:")
        .with_default(&current.location_id)
        .prompt()?;

    let region_id = Text::new("Region id:")
        .with_default(&current.region_id)
        .prompt()?;

    let api_key = if api_key.trim().is_empty() {
        current.api_key.clone()
    } else {
        api_key.trim().to_string()
    };
    if api_key.is_empty() {
        anyhow::bail!("An API key is required for provider '{id}'");
    }

    config.upsert_provider(
        id,
        ProviderConfig {
            api_key,
            location_id: location_id.trim().to_string(),
            region_id: region_id.trim().to_string(),
            ..current
        },
    );
    config.save()?;

    println!(
        "Saved {id} configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}
