// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for bootstrap user provisioning.
//!
//! This crate provides:
//! - Layered configuration from defaults, a TOML file and the environment
//! - `MDB_BOOTSTRAP_*` environment variables, with `_FILE` support for the
//!   admin password
//! - Validation of the MongoDB URI and write concern timeout
//!
//! # Usage
//!
//! ```ignore
//! use mdb_users_config::load_config;
//!
//! let config = load_config()?;
//! let write_concern = config.mongo.write_concern();
//! let plan = ProvisioningPlan::build(&config.flags, &config.principals, &write_concern)?;
//! ```

pub mod error;
pub mod layer;
pub mod secret_env;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::BootstrapConfigLayer;
pub use secret_env::{load_secret_env, SecretEnvError};
pub use sections::*;
pub use sources::{
	ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource, SYSTEM_CONFIG_PATH,
};

use mdb_users_core::{FlagSet, Principals};
use tracing::debug;

/// Fully resolved bootstrap configuration.
#[derive(Debug, Clone, Default)]
pub struct BootstrapConfig {
	pub flags: FlagSet,
	pub principals: Principals,
	pub mongo: MongoConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`MDB_BOOTSTRAP_*`)
/// 2. Config file (`/etc/mdb-bootstrap/users.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<BootstrapConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only.
pub fn load_config_from_env() -> Result<BootstrapConfig, ConfigError> {
	load_from_sources(vec![Box::new(DefaultsSource), Box::new(EnvSource)])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<BootstrapConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge `sources` in precedence order and resolve the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<BootstrapConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = BootstrapConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: BootstrapConfigLayer) -> Result<BootstrapConfig, ConfigError> {
	let flags = layer.flags.unwrap_or_default().finalize();
	let principals = layer.principals.unwrap_or_default().finalize();
	let mongo = layer.mongo.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&mongo)?;

	Ok(BootstrapConfig {
		flags,
		principals,
		mongo,
		logging,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(mongo: &MongoConfig) -> Result<(), ConfigError> {
	if !(mongo.uri.starts_with("mongodb://") || mongo.uri.starts_with("mongodb+srv://")) {
		return Err(ConfigError::Validation(
			"MDB_BOOTSTRAP_MONGO_URI must start with mongodb:// or mongodb+srv://".to_string(),
		));
	}

	if mongo.write_concern_timeout_ms == 0 {
		return Err(ConfigError::Validation(
			"MDB_BOOTSTRAP_WRITE_CONCERN_TIMEOUT_MS must be greater than zero. \
			 A zero wtimeout waits for majority acknowledgement indefinitely."
				.to_string(),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	struct FixedSource {
		precedence: Precedence,
		layer: BootstrapConfigLayer,
	}

	impl ConfigSource for FixedSource {
		fn name(&self) -> &'static str {
			"fixed"
		}

		fn precedence(&self) -> Precedence {
			self.precedence
		}

		fn load(&self) -> Result<BootstrapConfigLayer, ConfigError> {
			Ok(self.layer.clone())
		}
	}

	fn uri_layer(uri: &str) -> BootstrapConfigLayer {
		BootstrapConfigLayer {
			mongo: Some(MongoConfigLayer {
				uri: Some(uri.to_string()),
				..Default::default()
			}),
			..Default::default()
		}
	}

	#[test]
	fn test_defaults_resolve() {
		let config = load_from_sources(vec![Box::new(DefaultsSource)]).unwrap();
		assert_eq!(config.flags, FlagSet::default());
		assert_eq!(config.mongo.uri, DEFAULT_MONGO_URI);
		assert_eq!(config.logging.level, "info");
		assert!(!config.logging.json);
		assert!(config.principals.admin_password.is_none());
	}

	#[test]
	fn test_environment_beats_file_regardless_of_order() {
		let sources: Vec<Box<dyn ConfigSource>> = vec![
			Box::new(FixedSource {
				precedence: Precedence::Environment,
				layer: uri_layer("mongodb://from-env:27017"),
			}),
			Box::new(FixedSource {
				precedence: Precedence::ConfigFile,
				layer: uri_layer("mongodb://from-file:27017"),
			}),
			Box::new(DefaultsSource),
		];

		let config = load_from_sources(sources).unwrap();
		assert_eq!(config.mongo.uri, "mongodb://from-env:27017");
	}

	#[test]
	fn test_file_values_survive_when_environment_is_silent() {
		let mut file = NamedTempFile::new().unwrap();
		write!(
			file,
			r#"
[flags]
admin_user_enabled = true

[logging]
json = true
"#
		)
		.unwrap();

		let sources: Vec<Box<dyn ConfigSource>> = vec![
			Box::new(DefaultsSource),
			Box::new(TomlSource::new(file.path())),
			Box::new(FixedSource {
				precedence: Precedence::Environment,
				layer: BootstrapConfigLayer::default(),
			}),
		];

		let config = load_from_sources(sources).unwrap();
		assert!(config.flags.admin_user_enabled);
		assert!(config.logging.json);
	}

	#[test]
	fn test_rejects_non_mongodb_uri() {
		let sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(FixedSource {
			precedence: Precedence::ConfigFile,
			layer: uri_layer("postgres://localhost:5432"),
		})];

		let err = load_from_sources(sources).unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[test]
	fn test_accepts_srv_uri() {
		let mongo = MongoConfig {
			uri: "mongodb+srv://cluster0.example.net".to_string(),
			..Default::default()
		};
		assert!(validate_config(&mongo).is_ok());
	}

	#[test]
	fn test_rejects_zero_timeout() {
		let mongo = MongoConfig {
			write_concern_timeout_ms: 0,
			..Default::default()
		};
		let err = validate_config(&mongo).unwrap_err();
		assert!(err.to_string().contains("greater than zero"));
	}
}
