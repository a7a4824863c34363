// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ordered provisioning plan derived from the flag set.
//!
//! The plan is plain data: a short list of steps the provisioner executes in
//! order, stopping at the first failure. Building it validates every value an
//! enabled step needs, so a missing username is reported before the first
//! mutation reaches the database.

use std::fmt;

use serde::Serialize;

use crate::error::PlanError;
use crate::flags::FlagSet;
use crate::principal::{PrincipalKind, UserSpec};
use crate::role::ADMIN_DB;
use crate::secret::SecretString;
use crate::write_concern::WriteConcern;

/// Principal names and the admin password, as supplied by the deployment.
#[derive(Debug, Clone, Default)]
pub struct Principals {
	pub admin_username: Option<String>,
	pub admin_password: Option<SecretString>,
	pub service_username: Option<String>,
	pub monitor_username: Option<String>,
}

/// Names a step in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
	CreateAdmin,
	Authenticate,
	CreateService,
	CreateMonitor,
}

impl fmt::Display for StepKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CreateAdmin => write!(f, "create admin user"),
			Self::Authenticate => write!(f, "authenticate as admin"),
			Self::CreateService => write!(f, "create service user"),
			Self::CreateMonitor => write!(f, "create monitor user"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlanStep {
	CreateUser {
		spec: UserSpec,
		/// `None` leaves acknowledgment to the connection default.
		write_concern: Option<WriteConcern>,
	},
	Authenticate {
		db: String,
		principal: String,
		password: SecretString,
	},
}

impl PlanStep {
	pub fn kind(&self) -> StepKind {
		match self {
			Self::Authenticate { .. } => StepKind::Authenticate,
			Self::CreateUser { spec, .. } => match spec.kind {
				PrincipalKind::Admin => StepKind::CreateAdmin,
				PrincipalKind::Service => StepKind::CreateService,
				PrincipalKind::Monitor => StepKind::CreateMonitor,
			},
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisioningPlan {
	steps: Vec<PlanStep>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	inert: Vec<PrincipalKind>,
}

impl ProvisioningPlan {
	/// Build the plan for `flags`.
	///
	/// External principals are created with `write_concern`; the admin
	/// principal is created with the connection default.
	pub fn build(
		flags: &FlagSet,
		principals: &Principals,
		write_concern: &WriteConcern,
	) -> Result<Self, PlanError> {
		let inert = flags.inert();
		if !flags.admin_user_enabled {
			tracing::debug!(inert = ?inert, "admin user disabled, nothing to provision");
			return Ok(Self {
				steps: Vec::new(),
				inert,
			});
		}

		let admin_name = required_name(principals.admin_username.as_deref(), PrincipalKind::Admin)?;
		let admin_password = principals
			.admin_password
			.as_ref()
			.filter(|p| !p.is_empty())
			.ok_or(PlanError::MissingAdminPassword)?;
		let service_name = if flags.service_user_enabled {
			Some(required_name(
				principals.service_username.as_deref(),
				PrincipalKind::Service,
			)?)
		} else {
			None
		};
		let monitor_name = if flags.monitor_user_enabled {
			Some(required_name(
				principals.monitor_username.as_deref(),
				PrincipalKind::Monitor,
			)?)
		} else {
			None
		};

		let mut steps = vec![PlanStep::CreateUser {
			spec: UserSpec::admin(admin_name, admin_password.clone()),
			write_concern: None,
		}];

		if flags.requires_admin_auth() {
			steps.push(PlanStep::Authenticate {
				db: ADMIN_DB.to_string(),
				principal: admin_name.to_string(),
				password: admin_password.clone(),
			});
		}

		if let Some(name) = service_name {
			steps.push(PlanStep::CreateUser {
				spec: UserSpec::service(name),
				write_concern: Some(write_concern.clone()),
			});
		}

		if let Some(name) = monitor_name {
			steps.push(PlanStep::CreateUser {
				spec: UserSpec::monitor(name),
				write_concern: Some(write_concern.clone()),
			});
		}

		Ok(Self { steps, inert })
	}

	pub fn steps(&self) -> &[PlanStep] {
		&self.steps
	}

	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	/// Principals whose flag was set but which the plan leaves out because
	/// the admin principal is disabled.
	pub fn inert_flags(&self) -> &[PrincipalKind] {
		&self.inert
	}
}

fn required_name(name: Option<&str>, kind: PrincipalKind) -> Result<&str, PlanError> {
	name
		.map(str::trim)
		.filter(|n| !n.is_empty())
		.ok_or(PlanError::MissingPrincipalName(kind))
}
