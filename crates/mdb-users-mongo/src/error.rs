// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mapping of driver and server errors onto [`AdminError`].

use mdb_users_provision::AdminError;
use mongodb::error::{Error as DriverError, ErrorKind, WriteFailure};

pub(crate) const UNAUTHORIZED: i32 = 13;
pub(crate) const AUTHENTICATION_FAILED: i32 = 18;
pub(crate) const WRITE_CONCERN_FAILED: i32 = 64;
pub(crate) const DUPLICATE_KEY: i32 = 11000;
pub(crate) const USER_ALREADY_EXISTS: i32 = 51003;

/// What the failing call was doing, for error messages.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CallContext<'a> {
	db: &'a str,
	principal: &'a str,
	timeout_ms: Option<u64>,
}

impl<'a> CallContext<'a> {
	pub(crate) fn create(db: &'a str, principal: &'a str, timeout_ms: Option<u64>) -> Self {
		Self {
			db,
			principal,
			timeout_ms,
		}
	}

	pub(crate) fn authenticate(db: &'a str, principal: &'a str) -> Self {
		Self::create(db, principal, None)
	}

	pub(crate) fn connect() -> Self {
		Self::create("admin", "", None)
	}

	pub(crate) fn write_concern_timeout(&self, message: String) -> AdminError {
		AdminError::WriteConcernTimeout {
			principal: self.principal.to_string(),
			timeout_ms: self.timeout_ms.unwrap_or_default(),
			message,
		}
	}
}

pub(crate) fn classify_server_code(
	code: i32,
	message: String,
	ctx: &CallContext<'_>,
) -> AdminError {
	match code {
		USER_ALREADY_EXISTS | DUPLICATE_KEY => AdminError::PrincipalAlreadyExists {
			db: ctx.db.to_string(),
			principal: ctx.principal.to_string(),
		},
		AUTHENTICATION_FAILED | UNAUTHORIZED => AdminError::AuthenticationFailure {
			principal: ctx.principal.to_string(),
			message,
		},
		WRITE_CONCERN_FAILED => ctx.write_concern_timeout(message),
		_ => AdminError::Command { code, message },
	}
}

pub(crate) fn classify(err: &DriverError, ctx: &CallContext<'_>) -> AdminError {
	match err.kind.as_ref() {
		ErrorKind::Authentication { message, .. } => AdminError::AuthenticationFailure {
			principal: ctx.principal.to_string(),
			message: message.clone(),
		},
		ErrorKind::Command(command) => {
			classify_server_code(command.code, command.message.clone(), ctx)
		}
		ErrorKind::Write(WriteFailure::WriteConcernError(wce)) => {
			let wtimeout = wce
				.details
				.as_ref()
				.and_then(|d| d.get_bool("wtimeout").ok())
				.unwrap_or(false);
			if wtimeout {
				ctx.write_concern_timeout(wce.message.clone())
			} else {
				classify_server_code(wce.code, wce.message.clone(), ctx)
			}
		}
		ErrorKind::Write(WriteFailure::WriteError(we)) => {
			classify_server_code(we.code, we.message.clone(), ctx)
		}
		ErrorKind::Io(_)
		| ErrorKind::ServerSelection { .. }
		| ErrorKind::ConnectionPoolCleared { .. }
		| ErrorKind::DnsResolve { .. } => AdminError::ConnectionFailure(err.to_string()),
		_ => AdminError::Command {
			code: 0,
			message: err.to_string(),
		},
	}
}
