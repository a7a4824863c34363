// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::BootstrapConfigLayer;
use crate::secret_env::load_secret_env;
use crate::sections::{
	FlagsConfigLayer, LoggingConfigLayer, MongoConfigLayer, PrincipalsConfigLayer,
};

pub const SYSTEM_CONFIG_PATH: &str = "/etc/mdb-bootstrap/users.toml";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<BootstrapConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<BootstrapConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(BootstrapConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is skipped.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new(SYSTEM_CONFIG_PATH)
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<BootstrapConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(BootstrapConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: BootstrapConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: MDB_BOOTSTRAP_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<BootstrapConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(BootstrapConfigLayer {
			flags: Some(load_flags_from_env()),
			principals: Some(load_principals_from_env()?),
			mongo: Some(load_mongo_from_env()?),
			logging: Some(load_logging_from_env()),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_bool(name: &str) -> Option<bool> {
	env_var(name).map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

fn env_u64(name: &str) -> Result<Option<u64>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u64 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn load_flags_from_env() -> FlagsConfigLayer {
	FlagsConfigLayer {
		admin_user_enabled: env_bool("MDB_BOOTSTRAP_ADMIN_USER_ENABLED"),
		service_user_enabled: env_bool("MDB_BOOTSTRAP_SERVICE_USER_ENABLED"),
		monitor_user_enabled: env_bool("MDB_BOOTSTRAP_MONITOR_USER_ENABLED"),
	}
}

fn load_principals_from_env() -> Result<PrincipalsConfigLayer, ConfigError> {
	Ok(PrincipalsConfigLayer {
		admin_username: env_var("MDB_BOOTSTRAP_ADMIN_USERNAME"),
		admin_password: load_secret_env("MDB_BOOTSTRAP_ADMIN_PASSWORD")?,
		service_username: env_var("MDB_BOOTSTRAP_SERVICE_USERNAME"),
		monitor_username: env_var("MDB_BOOTSTRAP_MONITOR_USERNAME"),
	})
}

fn load_mongo_from_env() -> Result<MongoConfigLayer, ConfigError> {
	Ok(MongoConfigLayer {
		uri: env_var("MDB_BOOTSTRAP_MONGO_URI"),
		app_name: env_var("MDB_BOOTSTRAP_MONGO_APP_NAME"),
		write_concern_timeout_ms: env_u64("MDB_BOOTSTRAP_WRITE_CONCERN_TIMEOUT_MS")?,
	})
}

fn load_logging_from_env() -> LoggingConfigLayer {
	LoggingConfigLayer {
		level: env_var("MDB_BOOTSTRAP_LOG_LEVEL"),
		json: env_bool("MDB_BOOTSTRAP_LOG_JSON"),
	}
}
