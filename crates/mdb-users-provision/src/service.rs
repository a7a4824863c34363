// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use mdb_users_core::{
	FlagSet, PlanStep, PrincipalKind, Principals, ProvisioningPlan, WriteConcern,
};
use serde::Serialize;

use crate::admin::UserAdmin;
use crate::error::{AdminError, ProvisioningError};
use crate::session::AdminSession;

/// Result type for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisioningError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedPrincipal {
	pub kind: PrincipalKind,
	pub db: String,
	pub name: String,
}

impl std::fmt::Display for CreatedPrincipal {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}@{}", self.kind, self.name, self.db)
	}
}

/// Returned only when every step succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisioningReport {
	pub created: Vec<CreatedPrincipal>,
}

impl ProvisioningReport {
	pub fn is_empty(&self) -> bool {
		self.created.is_empty()
	}
}

/// Creates the bootstrap principals in order, stopping at the first failure.
///
/// There is no rollback: principals created before a failing step stay in
/// the catalog, and a second run with the same flags fails on the first of
/// them.
#[derive(Debug, Clone, Default)]
pub struct UserProvisioner {
	write_concern: WriteConcern,
}

impl UserProvisioner {
	/// `write_concern` applies to the external (service and monitor) principals.
	pub fn new(write_concern: WriteConcern) -> Self {
		Self { write_concern }
	}

	pub fn write_concern(&self) -> &WriteConcern {
		&self.write_concern
	}

	/// Build the plan for `flags` and run it.
	#[tracing::instrument(skip(self, session, principals))]
	pub async fn provision<A: UserAdmin>(
		&self,
		session: &mut AdminSession<A>,
		flags: FlagSet,
		principals: &Principals,
	) -> Result<ProvisioningReport> {
		let plan = ProvisioningPlan::build(&flags, principals, &self.write_concern)?;
		for kind in plan.inert_flags() {
			tracing::warn!(principal = %kind, "user enabled but admin user is disabled, skipping");
		}
		self.run(session, &plan).await
	}

	/// Execute `plan` step by step. Each call completes, including its
	/// acknowledgment wait, before the next one starts.
	#[tracing::instrument(skip_all, fields(steps = plan.steps().len()))]
	pub async fn run<A: UserAdmin>(
		&self,
		session: &mut AdminSession<A>,
		plan: &ProvisioningPlan,
	) -> Result<ProvisioningReport> {
		let mut report = ProvisioningReport::default();

		for step in plan.steps() {
			let kind = step.kind();
			tracing::debug!(step = %kind, "running step");

			match execute(session, step).await {
				Ok(Some(created)) => report.created.push(created),
				Ok(None) => {}
				Err(source) => {
					tracing::error!(step = %kind, error = %source, "provisioning aborted");
					return Err(ProvisioningError::Step { step: kind, source });
				}
			}
		}

		tracing::info!(created = report.created.len(), "provisioning complete");
		Ok(report)
	}
}

async fn execute<A: UserAdmin>(
	session: &mut AdminSession<A>,
	step: &PlanStep,
) -> std::result::Result<Option<CreatedPrincipal>, AdminError> {
	match step {
		PlanStep::CreateUser {
			spec,
			write_concern,
		} => {
			session
				.create_principal(spec, write_concern.as_ref())
				.await?;
			Ok(Some(CreatedPrincipal {
				kind: spec.kind,
				db: spec.auth_db.clone(),
				name: spec.name.clone(),
			}))
		}
		PlanStep::Authenticate {
			db,
			principal,
			password,
		} => {
			session.authenticate(db, principal, password).await?;
			Ok(None)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{AdminCall, InMemoryUserAdmin};
	use mdb_users_core::SecretString;

	fn principals() -> Principals {
		Principals {
			admin_username: Some("root".to_string()),
			admin_password: Some(SecretString::from("pw")),
			service_username: Some("CN=svc".to_string()),
			monitor_username: Some("CN=mon".to_string()),
		}
	}

	#[tokio::test]
	async fn reports_created_principals_in_order() {
		let backend = InMemoryUserAdmin::new();
		let mut session = AdminSession::new(backend.clone());

		let report = UserProvisioner::default()
			.provision(&mut session, FlagSet::new(true, true, true), &principals())
			.await
			.unwrap();

		let names: Vec<_> = report.created.iter().map(|c| c.name.as_str()).collect();
		assert_eq!(names, vec!["root", "CN=svc", "CN=mon"]);
		assert_eq!(report.created[0].to_string(), "admin root@admin");
	}

	#[tokio::test]
	async fn authentication_happens_once_for_both_external_principals() {
		let backend = InMemoryUserAdmin::new();
		let mut session = AdminSession::new(backend.clone());

		UserProvisioner::default()
			.provision(&mut session, FlagSet::new(true, true, true), &principals())
			.await
			.unwrap();

		let auths = backend
			.calls()
			.iter()
			.filter(|c| matches!(c, AdminCall::Authenticate { .. }))
			.count();
		assert_eq!(auths, 1);
	}

	#[tokio::test]
	async fn plan_errors_make_no_calls() {
		let backend = InMemoryUserAdmin::new();
		let mut session = AdminSession::new(backend.clone());
		let mut p = principals();
		p.service_username = None;

		let err = UserProvisioner::default()
			.provision(&mut session, FlagSet::new(true, true, false), &p)
			.await
			.unwrap_err();

		assert!(matches!(err, ProvisioningError::Plan(_)));
		assert!(backend.calls().is_empty());
	}

	#[tokio::test]
	async fn custom_write_concern_is_passed_through() {
		let backend = InMemoryUserAdmin::new();
		let mut session = AdminSession::new(backend.clone());
		let wc = WriteConcern::majority(std::time::Duration::from_millis(1500));

		UserProvisioner::new(wc.clone())
			.provision(&mut session, FlagSet::new(true, false, true), &principals())
			.await
			.unwrap();

		let monitor_wc = backend.calls().into_iter().find_map(|c| match c {
			AdminCall::CreatePrincipal {
				principal,
				write_concern,
				..
			} if principal == "CN=mon" => write_concern,
			_ => None,
		});
		assert_eq!(monitor_wc, Some(wc));
	}

	#[tokio::test]
	async fn empty_plan_is_empty_report() {
		let backend = InMemoryUserAdmin::new();
		let mut session = AdminSession::new(backend.clone());

		let report = UserProvisioner::default()
			.run(&mut session, &ProvisioningPlan::default())
			.await
			.unwrap();

		assert!(report.is_empty());
	}
}
