// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use mdb_users_core::{SecretString, UserSpec, WriteConcern, ADMIN_DB};
use mdb_users_provision::{AdminError, UserAdmin};
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, Credential};
use mongodb::Client;

use crate::command::{check_write_concern_reply, create_user_command};
use crate::error::{classify, CallContext};

/// [`UserAdmin`] over the MongoDB driver.
///
/// The driver authenticates at connection handshake rather than on a live
/// connection, so [`authenticate`](UserAdmin::authenticate) builds a new
/// credentialed client from the original options and swaps it in once the
/// handshake succeeds.
pub struct MongoUserAdmin {
	client: Client,
	options: ClientOptions,
}

impl MongoUserAdmin {
	/// Parse `uri` and build an unauthenticated client. No I/O happens until
	/// the first command; call [`ping`](Self::ping) to fail fast.
	#[tracing::instrument(skip(uri))]
	pub async fn connect(uri: &str, app_name: Option<&str>) -> Result<Self, AdminError> {
		let mut options = ClientOptions::parse(uri)
			.await
			.map_err(|e| classify(&e, &CallContext::connect()))?;
		if let Some(name) = app_name {
			options.app_name = Some(name.to_string());
		}

		let client = Client::with_options(options.clone())
			.map_err(|e| classify(&e, &CallContext::connect()))?;

		tracing::debug!(hosts = options.hosts.len(), "mongodb client created");
		Ok(Self { client, options })
	}

	#[tracing::instrument(skip(self))]
	pub async fn ping(&self) -> Result<(), AdminError> {
		self
			.client
			.database(ADMIN_DB)
			.run_command(doc! { "ping": 1 })
			.await
			.map_err(|e| classify(&e, &CallContext::connect()))?;
		tracing::debug!("mongodb reachable");
		Ok(())
	}
}

#[async_trait]
impl UserAdmin for MongoUserAdmin {
	async fn create_principal(
		&mut self,
		spec: &UserSpec,
		write_concern: Option<&WriteConcern>,
	) -> Result<(), AdminError> {
		let ctx = CallContext::create(
			&spec.auth_db,
			&spec.name,
			write_concern.map(WriteConcern::timeout_ms),
		);
		let command = create_user_command(spec, write_concern);

		let reply = self
			.client
			.database(&spec.auth_db)
			.run_command(command)
			.await
			.map_err(|e| classify(&e, &ctx))?;

		check_write_concern_reply(&reply, &ctx)
	}

	async fn authenticate(
		&mut self,
		db: &str,
		principal: &str,
		password: &SecretString,
	) -> Result<(), AdminError> {
		let ctx = CallContext::authenticate(db, principal);

		let mut options = self.options.clone();
		options.credential = Some(
			Credential::builder()
				.username(principal.to_string())
				.password(password.expose().clone())
				.source(db.to_string())
				.build(),
		);

		let client = Client::with_options(options).map_err(|e| classify(&e, &ctx))?;
		client
			.database(db)
			.run_command(doc! { "connectionStatus": 1 })
			.await
			.map_err(|e| classify(&e, &ctx))?;

		self.client = client;
		Ok(())
	}
}
