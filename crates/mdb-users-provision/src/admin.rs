// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use mdb_users_core::{SecretString, UserSpec, WriteConcern};

use crate::error::AdminError;

/// The database's user-administration interface.
///
/// Implementations hold one connection. Calls take `&mut self` because
/// authentication changes what later calls on the same connection may do.
#[async_trait]
pub trait UserAdmin: Send {
	/// Create `spec.name` in `spec.auth_db` with exactly `spec.roles`.
	///
	/// When `write_concern` is set the call must not return success before
	/// the acknowledgment is satisfied or its timeout expires.
	async fn create_principal(
		&mut self,
		spec: &UserSpec,
		write_concern: Option<&WriteConcern>,
	) -> Result<(), AdminError>;

	/// Authenticate the connection as `principal` against `db`.
	async fn authenticate(
		&mut self,
		db: &str,
		principal: &str,
		password: &SecretString,
	) -> Result<(), AdminError>;
}
