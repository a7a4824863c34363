// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! MongoDB connection configuration.

use std::time::Duration;

use mdb_users_core::{WriteConcern, DEFAULT_WRITE_CONCERN_TIMEOUT_MS};
use serde::Deserialize;

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/?directConnection=true";
pub const DEFAULT_APP_NAME: &str = "mdb-configure-users";

/// MongoDB configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct MongoConfig {
	pub uri: String,
	pub app_name: String,
	pub write_concern_timeout_ms: u64,
}

impl MongoConfig {
	/// Write concern for principals created in `$external`.
	pub fn write_concern(&self) -> WriteConcern {
		WriteConcern::majority(Duration::from_millis(self.write_concern_timeout_ms))
	}
}

impl Default for MongoConfig {
	fn default() -> Self {
		MongoConfigLayer::default().finalize()
	}
}

/// MongoDB configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MongoConfigLayer {
	#[serde(default)]
	pub uri: Option<String>,
	#[serde(default)]
	pub app_name: Option<String>,
	#[serde(default)]
	pub write_concern_timeout_ms: Option<u64>,
}

impl MongoConfigLayer {
	pub fn merge(&mut self, other: MongoConfigLayer) {
		if other.uri.is_some() {
			self.uri = other.uri;
		}
		if other.app_name.is_some() {
			self.app_name = other.app_name;
		}
		if other.write_concern_timeout_ms.is_some() {
			self.write_concern_timeout_ms = other.write_concern_timeout_ms;
		}
	}

	pub fn finalize(self) -> MongoConfig {
		MongoConfig {
			uri: self.uri.unwrap_or_else(|| DEFAULT_MONGO_URI.to_string()),
			app_name: self.app_name.unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
			write_concern_timeout_ms: self
				.write_concern_timeout_ms
				.unwrap_or(DEFAULT_WRITE_CONCERN_TIMEOUT_MS),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = MongoConfigLayer::default().finalize();
		assert_eq!(config.uri, DEFAULT_MONGO_URI);
		assert_eq!(config.app_name, "mdb-configure-users");
		assert_eq!(config.write_concern_timeout_ms, 5000);
		assert_eq!(config.write_concern(), WriteConcern::default());
	}

	#[test]
	fn test_custom_timeout_flows_into_write_concern() {
		let config = MongoConfigLayer {
			write_concern_timeout_ms: Some(12_000),
			..Default::default()
		}
		.finalize();
		assert_eq!(config.write_concern().timeout_ms(), 12_000);
	}
}
