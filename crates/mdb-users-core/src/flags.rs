// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use crate::principal::PrincipalKind;

/// Which principals the deployment asked for.
///
/// Service and monitor principals live in `$external`, and creating them
/// requires authenticating as the admin principal created in the same run.
/// They are therefore only provisioned when `admin_user_enabled` is also set;
/// otherwise their flags are inert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSet {
	pub admin_user_enabled: bool,
	pub service_user_enabled: bool,
	pub monitor_user_enabled: bool,
}

impl FlagSet {
	pub fn new(admin: bool, service: bool, monitor: bool) -> Self {
		Self {
			admin_user_enabled: admin,
			service_user_enabled: service,
			monitor_user_enabled: monitor,
		}
	}

	/// Principals that will actually be created, in creation order.
	pub fn effective(&self) -> Vec<PrincipalKind> {
		if !self.admin_user_enabled {
			return Vec::new();
		}

		let mut kinds = vec![PrincipalKind::Admin];
		if self.service_user_enabled {
			kinds.push(PrincipalKind::Service);
		}
		if self.monitor_user_enabled {
			kinds.push(PrincipalKind::Monitor);
		}
		kinds
	}

	/// Principals requested but unreachable because admin is disabled.
	pub fn inert(&self) -> Vec<PrincipalKind> {
		if self.admin_user_enabled {
			return Vec::new();
		}

		let mut kinds = Vec::new();
		if self.service_user_enabled {
			kinds.push(PrincipalKind::Service);
		}
		if self.monitor_user_enabled {
			kinds.push(PrincipalKind::Monitor);
		}
		kinds
	}

	/// Whether the run needs to authenticate as the admin principal.
	pub fn requires_admin_auth(&self) -> bool {
		self.admin_user_enabled && (self.service_user_enabled || self.monitor_user_enabled)
	}
}
