// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Principal names and the admin password.

use mdb_users_core::{Principals, SecretString};
use serde::Deserialize;

/// Principals configuration layer (partial, for merging).
///
/// Names are not checked here; the plan builder rejects a missing name only
/// for principals that are actually enabled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrincipalsConfigLayer {
	#[serde(default)]
	pub admin_username: Option<String>,
	#[serde(default)]
	pub admin_password: Option<SecretString>,
	#[serde(default)]
	pub service_username: Option<String>,
	#[serde(default)]
	pub monitor_username: Option<String>,
}

impl PrincipalsConfigLayer {
	pub fn merge(&mut self, other: PrincipalsConfigLayer) {
		if other.admin_username.is_some() {
			self.admin_username = other.admin_username;
		}
		if other.admin_password.is_some() {
			self.admin_password = other.admin_password;
		}
		if other.service_username.is_some() {
			self.service_username = other.service_username;
		}
		if other.monitor_username.is_some() {
			self.monitor_username = other.monitor_username;
		}
	}

	pub fn finalize(self) -> Principals {
		Principals {
			admin_username: self.admin_username,
			admin_password: self.admin_password,
			service_username: self.service_username,
			monitor_username: self.monitor_username,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_password_is_redacted_in_debug() {
		let layer = PrincipalsConfigLayer {
			admin_password: Some(SecretString::new("hunter2".to_string())),
			..Default::default()
		};
		let debug = format!("{layer:?}");
		assert!(!debug.contains("hunter2"));
	}

	#[test]
	fn test_merge_keeps_earlier_password() {
		let mut base = PrincipalsConfigLayer {
			admin_username: Some("root".to_string()),
			admin_password: Some(SecretString::new("from-file".to_string())),
			..Default::default()
		};
		base.merge(PrincipalsConfigLayer {
			admin_username: Some("clusterAdmin".to_string()),
			..Default::default()
		});

		let principals = base.finalize();
		assert_eq!(principals.admin_username.as_deref(), Some("clusterAdmin"));
		assert_eq!(
			principals.admin_password.as_ref().map(|p| p.expose().as_str()),
			Some("from-file")
		);
	}
}
