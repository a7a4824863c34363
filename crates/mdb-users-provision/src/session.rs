// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use mdb_users_core::{display_roles, SecretString, UserSpec, WriteConcern};

use crate::admin::UserAdmin;
use crate::error::AdminError;

/// Who the session's connection is currently authenticated as.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
	#[default]
	Unauthenticated,
	Authenticated { db: String, principal: String },
}

/// A user-administration connection plus its authentication state.
///
/// Every provisioning step receives the session explicitly; nothing else
/// holds the connection.
pub struct AdminSession<A> {
	admin: A,
	auth: AuthState,
}

impl<A: UserAdmin> AdminSession<A> {
	pub fn new(admin: A) -> Self {
		Self {
			admin,
			auth: AuthState::Unauthenticated,
		}
	}

	pub fn auth_state(&self) -> &AuthState {
		&self.auth
	}

	pub fn is_authenticated_as(&self, db: &str, principal: &str) -> bool {
		matches!(
			&self.auth,
			AuthState::Authenticated { db: d, principal: p } if d == db && p == principal
		)
	}

	pub fn backend(&self) -> &A {
		&self.admin
	}

	pub fn into_inner(self) -> A {
		self.admin
	}

	#[tracing::instrument(
		skip(self, spec, write_concern),
		fields(principal = %spec.name, db = %spec.auth_db, roles = %display_roles(&spec.roles))
	)]
	pub async fn create_principal(
		&mut self,
		spec: &UserSpec,
		write_concern: Option<&WriteConcern>,
	) -> Result<(), AdminError> {
		if let Some(wc) = write_concern {
			tracing::debug!(write_concern = %wc, "creating principal");
		} else {
			tracing::debug!("creating principal");
		}

		self.admin.create_principal(spec, write_concern).await?;
		tracing::info!("principal created");
		Ok(())
	}

	/// Authenticate as `principal`. A no-op when the session already is.
	/// On failure the previous state is kept.
	#[tracing::instrument(skip(self, password))]
	pub async fn authenticate(
		&mut self,
		db: &str,
		principal: &str,
		password: &SecretString,
	) -> Result<(), AdminError> {
		if self.is_authenticated_as(db, principal) {
			tracing::debug!("session already authenticated, skipping");
			return Ok(());
		}

		self.admin.authenticate(db, principal, password).await?;
		self.auth = AuthState::Authenticated {
			db: db.to_string(),
			principal: principal.to_string(),
		};
		tracing::info!("session authenticated");
		Ok(())
	}
}
