// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use mdb_users_core::{PlanError, StepKind};

/// Failures reported by a [`UserAdmin`](crate::UserAdmin) backend.
///
/// None of these are retried; each one aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminError {
	#[error("authentication failed for {principal}: {message}")]
	AuthenticationFailure { principal: String, message: String },

	#[error("principal {principal} already exists in {db}")]
	PrincipalAlreadyExists { db: String, principal: String },

	/// The principal may exist on a minority of members; the caller cannot tell.
	#[error("write concern for {principal} not satisfied within {timeout_ms}ms: {message}")]
	WriteConcernTimeout {
		principal: String,
		timeout_ms: u64,
		message: String,
	},

	#[error("connection failure: {0}")]
	ConnectionFailure(String),

	#[error("command failed with code {code}: {message}")]
	Command { code: i32, message: String },
}

/// Errors returned by a provisioning run.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
	#[error("invalid provisioning plan: {0}")]
	Plan(#[from] PlanError),

	#[error("{step} failed: {source}")]
	Step {
		step: StepKind,
		#[source]
		source: AdminError,
	},
}

impl ProvisioningError {
	/// Step the run aborted at, if it got as far as the database.
	pub fn failed_step(&self) -> Option<StepKind> {
		match self {
			Self::Step { step, .. } => Some(*step),
			Self::Plan(_) => None,
		}
	}

	pub fn admin_error(&self) -> Option<&AdminError> {
		match self {
			Self::Step { source, .. } => Some(source),
			Self::Plan(_) => None,
		}
	}
}
