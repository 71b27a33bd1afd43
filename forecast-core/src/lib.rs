//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The provider registry and the Met Office DataPoint provider
//! - The DataPoint JSON wire model
//! - Shared output models and error types
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod transport;

pub use config::{Config, ProviderConfig};
pub use error::{AssemblyError, ForecastError, TransportError};
pub use model::{Forecast, Hour, OneDayForecast};
pub use provider::{ProviderId, ProviderRegistry, WeatherProvider};
