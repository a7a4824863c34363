// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::principal::PrincipalKind;

/// Errors building a provisioning plan. Raised before any database call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
	#[error("{0} user is enabled but no username was provided")]
	MissingPrincipalName(PrincipalKind),

	#[error("admin user is enabled but no admin password was provided")]
	MissingAdminPassword,
}
