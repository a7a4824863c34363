// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User specifications for the three bootstrap principals.

use std::fmt;

use serde::Serialize;

use crate::role::{BuiltinRole, RoleAssignment, RoleSet, ADMIN_DB, EXTERNAL_DB};
use crate::secret::SecretString;

/// Which of the bootstrap principals a spec describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
	/// User administrator, password authenticated.
	Admin,
	/// Application account used by the cluster's service nodes.
	Service,
	/// Read-only account for the monitoring agent.
	Monitor,
}

impl PrincipalKind {
	/// Roles granted to this kind of principal.
	pub fn roles(&self) -> RoleSet {
		let roles: &[BuiltinRole] = match self {
			Self::Admin => &[BuiltinRole::UserAdminAnyDatabase, BuiltinRole::ClusterManager],
			Self::Service => &[BuiltinRole::ClusterAdmin, BuiltinRole::ReadWriteAnyDatabase],
			Self::Monitor => &[BuiltinRole::ClusterMonitor],
		};
		roles.iter().copied().map(RoleAssignment::admin).collect()
	}

	/// Database the principal authenticates against.
	pub fn auth_db(&self) -> &'static str {
		match self {
			Self::Admin => ADMIN_DB,
			Self::Service | Self::Monitor => EXTERNAL_DB,
		}
	}
}

impl fmt::Display for PrincipalKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Admin => write!(f, "admin"),
			Self::Service => write!(f, "service"),
			Self::Monitor => write!(f, "monitor"),
		}
	}
}

/// How a principal proves its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "password")]
pub enum CredentialSource {
	/// SCRAM password held in the native credential store.
	Password(SecretString),
	/// Identity asserted by an external mechanism; nothing is stored here.
	External,
}

impl CredentialSource {
	pub fn password(&self) -> Option<&SecretString> {
		match self {
			Self::Password(password) => Some(password),
			Self::External => None,
		}
	}
}

/// Everything needed to issue one `createUser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSpec {
	pub kind: PrincipalKind,
	pub name: String,
	pub auth_db: String,
	pub roles: RoleSet,
	pub credential: CredentialSource,
}

impl UserSpec {
	pub fn admin(name: impl Into<String>, password: SecretString) -> Self {
		Self::for_kind(PrincipalKind::Admin, name, CredentialSource::Password(password))
	}

	pub fn service(name: impl Into<String>) -> Self {
		Self::for_kind(PrincipalKind::Service, name, CredentialSource::External)
	}

	pub fn monitor(name: impl Into<String>) -> Self {
		Self::for_kind(PrincipalKind::Monitor, name, CredentialSource::External)
	}

	fn for_kind(
		kind: PrincipalKind,
		name: impl Into<String>,
		credential: CredentialSource,
	) -> Self {
		Self {
			kind,
			name: name.into(),
			auth_db: kind.auth_db().to_string(),
			roles: kind.roles(),
			credential,
		}
	}
}
