// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod args;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use mdb_users_config::{load_config, load_config_with_file, BootstrapConfig};
use mdb_users_core::ProvisioningPlan;
use mdb_users_mongo::MongoUserAdmin;
use mdb_users_provision::{AdminSession, UserProvisioner};
use tracing::{info, warn};

use crate::args::Args;

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	let config = match &args.config {
		Some(path) => load_config_with_file(path),
		None => load_config(),
	}
	.context("failed to load configuration")?;

	logging::init(&config.logging);
	info!(
		version = env!("CARGO_PKG_VERSION"),
		dry_run = args.dry_run,
		"Starting mdb-configure-users"
	);
	logging::config_summary(&config);

	let plan = build_plan(&config)?;

	if args.dry_run {
		let rendered =
			serde_json::to_string_pretty(&plan).context("failed to render provisioning plan")?;
		println!("{rendered}");
		return Ok(());
	}

	if plan.is_empty() {
		info!("admin user disabled, nothing to provision");
		return Ok(());
	}

	let admin = MongoUserAdmin::connect(&config.mongo.uri, Some(config.mongo.app_name.as_str()))
		.await
		.context("failed to create MongoDB client")?;
	admin.ping().await.context("MongoDB is not reachable")?;

	let mut session = AdminSession::new(admin);
	let provisioner = UserProvisioner::new(config.mongo.write_concern());
	let report = provisioner
		.run(&mut session, &plan)
		.await
		.context("user provisioning failed")?;

	for created in &report.created {
		info!(principal = %created.name, db = %created.db, kind = %created.kind, "user created");
	}

	Ok(())
}

fn build_plan(config: &BootstrapConfig) -> Result<ProvisioningPlan> {
	let plan = ProvisioningPlan::build(
		&config.flags,
		&config.principals,
		&config.mongo.write_concern(),
	)
	.context("invalid provisioning configuration")?;

	for kind in plan.inert_flags() {
		warn!(principal = %kind, "user enabled but admin user is disabled, skipping");
	}

	Ok(plan)
}
