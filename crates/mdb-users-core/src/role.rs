// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Built-in MongoDB roles granted during bootstrap.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical database holding the user catalog and the cluster-wide roles.
pub const ADMIN_DB: &str = "admin";

/// Virtual database for principals authenticated outside the native
/// credential store (X.509 client certificates).
pub const EXTERNAL_DB: &str = "$external";

/// The built-in roles this bootstrap grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuiltinRole {
	UserAdminAnyDatabase,
	ClusterManager,
	ClusterAdmin,
	ReadWriteAnyDatabase,
	ClusterMonitor,
}

impl BuiltinRole {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::UserAdminAnyDatabase => "userAdminAnyDatabase",
			Self::ClusterManager => "clusterManager",
			Self::ClusterAdmin => "clusterAdmin",
			Self::ReadWriteAnyDatabase => "readWriteAnyDatabase",
			Self::ClusterMonitor => "clusterMonitor",
		}
	}
}

impl fmt::Display for BuiltinRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A role granted on a database scope, written `role@db`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleAssignment {
	pub role: BuiltinRole,
	pub db: String,
}

impl RoleAssignment {
	pub fn new(role: BuiltinRole, db: impl Into<String>) -> Self {
		Self {
			role,
			db: db.into(),
		}
	}

	/// Role scoped to the `admin` database. Every grant in this bootstrap is.
	pub fn admin(role: BuiltinRole) -> Self {
		Self::new(role, ADMIN_DB)
	}
}

impl fmt::Display for RoleAssignment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}@{}", self.role, self.db)
	}
}

/// Unordered, duplicate-free set of grants for one principal.
pub type RoleSet = BTreeSet<RoleAssignment>;

/// Formats a role set as `a@db,b@db` for log fields.
pub fn display_roles(roles: &RoleSet) -> String {
	roles
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(",")
}
