// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Principal enable flags.

use mdb_users_core::FlagSet;
use serde::Deserialize;

/// Flags configuration layer (partial, for merging). Unset flags are off.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlagsConfigLayer {
	#[serde(default)]
	pub admin_user_enabled: Option<bool>,
	#[serde(default)]
	pub service_user_enabled: Option<bool>,
	#[serde(default)]
	pub monitor_user_enabled: Option<bool>,
}

impl FlagsConfigLayer {
	pub fn merge(&mut self, other: FlagsConfigLayer) {
		if other.admin_user_enabled.is_some() {
			self.admin_user_enabled = other.admin_user_enabled;
		}
		if other.service_user_enabled.is_some() {
			self.service_user_enabled = other.service_user_enabled;
		}
		if other.monitor_user_enabled.is_some() {
			self.monitor_user_enabled = other.monitor_user_enabled;
		}
	}

	pub fn finalize(self) -> FlagSet {
		FlagSet::new(
			self.admin_user_enabled.unwrap_or(false),
			self.service_user_enabled.unwrap_or(false),
			self.monitor_user_enabled.unwrap_or(false),
		)
	}
}
