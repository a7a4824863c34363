// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bootstrap provisioning of MongoDB cluster users.
//!
//! A run creates, in order and only as far as the flags allow:
//! 1. the admin principal (password, `admin` database)
//! 2. the service principal (`$external`, after authenticating as admin)
//! 3. the monitor principal (`$external`, after authenticating as admin)
//!
//! The first failing call aborts the run. Nothing is retried or rolled back.

mod admin;
mod error;
mod service;
mod session;
pub mod testing;

pub use admin::UserAdmin;
pub use error::{AdminError, ProvisioningError};
pub use service::{CreatedPrincipal, ProvisioningReport, Result, UserProvisioner};
pub use session::{AdminSession, AuthState};
