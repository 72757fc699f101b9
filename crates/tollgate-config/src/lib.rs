// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for tollgate request gates.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`TOLLGATE_*`), with `*_FILE`
//!   support for secrets
//!
//! # Usage
//!
//! ```ignore
//! use tollgate_config::load_config;
//!
//! let config = load_config()?;
//! let gates = tollgate::Gates::from_config(&config);
//! ```

pub mod env;
pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use env::{load_secret_env, SecretEnvError};
pub use error::ConfigError;
pub use layer::GateConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};
pub use tollgate_common_secret::{Secret, SecretString, REDACTED};

use tracing::{debug, info};

/// Fully resolved gate configuration.
#[derive(Debug, Clone, Default)]
pub struct GateConfig {
	pub local: LocalRequestConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`TOLLGATE_*`)
/// 2. Config file (`/etc/tollgate/gate.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<GateConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<GateConfig, ConfigError> {
	let mut merged = GateConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<GateConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<GateConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = GateConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: GateConfigLayer) -> Result<GateConfig, ConfigError> {
	let local = layer.local.unwrap_or_default().finalize();

	validate_local(&local)?;

	info!(
		local_secret_configured = local.has_secret(),
		local_query_param = %local.query_param,
		"Gate configuration loaded"
	);

	Ok(GateConfig { local })
}

fn validate_local(local: &LocalRequestConfig) -> Result<(), ConfigError> {
	let name = &local.query_param;
	if name.trim().is_empty() {
		return Err(ConfigError::Validation(
			"local query parameter name must not be empty".to_string(),
		));
	}
	if name.contains(['&', '=', '?', '#']) {
		return Err(ConfigError::InvalidValue {
			key: "local.query_param".to_string(),
			message: format!("'{name}' is not a valid query parameter name"),
		});
	}
	Ok(())
}
