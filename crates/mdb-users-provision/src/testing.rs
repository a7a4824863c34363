// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory [`UserAdmin`] that models a user catalog and records every call.
//!
//! Behaves like the server where it matters for ordering tests:
//! - creating a principal that exists fails with `PrincipalAlreadyExists`
//! - creating in `$external` requires an authenticated connection
//! - authenticating checks the name and password against the catalog
//!
//! Clones share state, so a test can hand one clone to a session and inspect
//! the other afterwards.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mdb_users_core::{RoleSet, SecretString, UserSpec, WriteConcern, EXTERNAL_DB};

use crate::admin::UserAdmin;
use crate::error::AdminError;

/// One call as seen by the backend, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCall {
	CreatePrincipal {
		db: String,
		principal: String,
		roles: RoleSet,
		has_password: bool,
		write_concern: Option<WriteConcern>,
	},
	Authenticate {
		db: String,
		principal: String,
	},
}

#[derive(Debug, Clone)]
struct StoredUser {
	roles: RoleSet,
	password: Option<SecretString>,
}

#[derive(Default)]
struct Catalog {
	users: BTreeMap<(String, String), StoredUser>,
	calls: Vec<AdminCall>,
	authenticated: Option<(String, String)>,
	create_failures: HashMap<String, AdminError>,
	auth_failure: Option<AdminError>,
}

#[derive(Clone, Default)]
pub struct InMemoryUserAdmin {
	catalog: Arc<Mutex<Catalog>>,
}

impl InMemoryUserAdmin {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seed the catalog as if `spec` had been created by an earlier run.
	pub fn with_user(self, spec: &UserSpec) -> Self {
		self.lock().users.insert(
			(spec.auth_db.clone(), spec.name.clone()),
			StoredUser {
				roles: spec.roles.clone(),
				password: spec.credential.password().cloned(),
			},
		);
		self
	}

	/// Make the next creation of `principal` fail with `error`.
	pub fn fail_create(&self, principal: &str, error: AdminError) {
		self
			.lock()
			.create_failures
			.insert(principal.to_string(), error);
	}

	/// Make the next authentication fail with `error`.
	pub fn fail_authenticate(&self, error: AdminError) {
		self.lock().auth_failure = Some(error);
	}

	pub fn calls(&self) -> Vec<AdminCall> {
		self.lock().calls.clone()
	}

	pub fn contains(&self, db: &str, principal: &str) -> bool {
		self
			.lock()
			.users
			.contains_key(&(db.to_string(), principal.to_string()))
	}

	pub fn roles_of(&self, db: &str, principal: &str) -> Option<RoleSet> {
		self
			.lock()
			.users
			.get(&(db.to_string(), principal.to_string()))
			.map(|u| u.roles.clone())
	}

	pub fn user_count(&self) -> usize {
		self.lock().users.len()
	}

	fn lock(&self) -> MutexGuard<'_, Catalog> {
		self.catalog.lock().expect("in-memory catalog mutex poisoned")
	}
}

#[async_trait]
impl UserAdmin for InMemoryUserAdmin {
	async fn create_principal(
		&mut self,
		spec: &UserSpec,
		write_concern: Option<&WriteConcern>,
	) -> Result<(), AdminError> {
		let mut catalog = self.lock();
		catalog.calls.push(AdminCall::CreatePrincipal {
			db: spec.auth_db.clone(),
			principal: spec.name.clone(),
			roles: spec.roles.clone(),
			has_password: spec.credential.password().is_some(),
			write_concern: write_concern.cloned(),
		});

		if let Some(error) = catalog.create_failures.remove(&spec.name) {
			return Err(error);
		}

		if spec.auth_db == EXTERNAL_DB && catalog.authenticated.is_none() {
			return Err(AdminError::AuthenticationFailure {
				principal: spec.name.clone(),
				message: format!("not authorized on {EXTERNAL_DB} to execute command createUser"),
			});
		}

		let key = (spec.auth_db.clone(), spec.name.clone());
		if catalog.users.contains_key(&key) {
			return Err(AdminError::PrincipalAlreadyExists {
				db: spec.auth_db.clone(),
				principal: spec.name.clone(),
			});
		}

		catalog.users.insert(
			key,
			StoredUser {
				roles: spec.roles.clone(),
				password: spec.credential.password().cloned(),
			},
		);
		Ok(())
	}

	async fn authenticate(
		&mut self,
		db: &str,
		principal: &str,
		password: &SecretString,
	) -> Result<(), AdminError> {
		let mut catalog = self.lock();
		catalog.calls.push(AdminCall::Authenticate {
			db: db.to_string(),
			principal: principal.to_string(),
		});

		if let Some(error) = catalog.auth_failure.take() {
			return Err(error);
		}

		let matches = catalog
			.users
			.get(&(db.to_string(), principal.to_string()))
			.and_then(|u| u.password.as_ref())
			.is_some_and(|stored| stored == password);

		if !matches {
			return Err(AdminError::AuthenticationFailure {
				principal: principal.to_string(),
				message: "Authentication failed.".to_string(),
			});
		}

		catalog.authenticated = Some((db.to_string(), principal.to_string()));
		Ok(())
	}
}
