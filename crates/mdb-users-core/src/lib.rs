// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for bootstrapping MongoDB cluster users.
//!
//! - [`FlagSet`]: which principals the deployment enabled
//! - [`UserSpec`]: name, auth database, roles and credential for one principal
//! - [`WriteConcern`]: acknowledgment requested for external principals
//! - [`ProvisioningPlan`]: the ordered steps derived from the flags
//! - [`Secret<T>`]: redacting wrapper for the admin password

pub mod error;
pub mod flags;
pub mod plan;
pub mod principal;
pub mod role;
pub mod secret;
pub mod write_concern;

pub use error::PlanError;
pub use flags::FlagSet;
pub use plan::{PlanStep, Principals, ProvisioningPlan, StepKind};
pub use principal::{CredentialSource, PrincipalKind, UserSpec};
pub use role::{display_roles, BuiltinRole, RoleAssignment, RoleSet, ADMIN_DB, EXTERNAL_DB};
pub use secret::{Secret, SecretString, REDACTED};
pub use write_concern::{Acknowledgment, WriteConcern, DEFAULT_WRITE_CONCERN_TIMEOUT_MS};
