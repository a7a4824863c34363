// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `createUser` command documents and reply inspection.
//!
//! Documents built here may contain the admin password in clear text. They
//! are handed straight to the driver and never logged.

use mdb_users_core::{Acknowledgment, UserSpec, WriteConcern};
use mdb_users_provision::AdminError;
use mongodb::bson::{doc, Bson, Document};

use crate::error::{classify_server_code, CallContext, WRITE_CONCERN_FAILED};

pub(crate) fn create_user_command(
	spec: &UserSpec,
	write_concern: Option<&WriteConcern>,
) -> Document {
	let roles: Vec<Bson> = spec
		.roles
		.iter()
		.map(|grant| {
			Bson::Document(doc! {
				"role": grant.role.as_str(),
				"db": grant.db.as_str(),
			})
		})
		.collect();

	let mut command = doc! { "createUser": spec.name.as_str() };
	if let Some(password) = spec.credential.password() {
		command.insert("pwd", password.expose().as_str());
	}
	command.insert("roles", roles);
	if let Some(wc) = write_concern {
		command.insert("writeConcern", write_concern_document(wc));
	}
	command
}

pub(crate) fn write_concern_document(wc: &WriteConcern) -> Document {
	let w = match &wc.level {
		Acknowledgment::Majority => Bson::String("majority".to_string()),
		Acknowledgment::Nodes(n) => Bson::Int32(i32::try_from(*n).unwrap_or(i32::MAX)),
		Acknowledgment::Tag(tag) => Bson::String(tag.clone()),
	};
	doc! {
		"w": w,
		"wtimeout": i64::try_from(wc.timeout_ms()).unwrap_or(i64::MAX),
	}
}

/// `ok: 1` replies can still carry a `writeConcernError`.
pub(crate) fn check_write_concern_reply(
	reply: &Document,
	ctx: &CallContext<'_>,
) -> Result<(), AdminError> {
	let Ok(wce) = reply.get_document("writeConcernError") else {
		return Ok(());
	};

	let code = wce.get("code").and_then(bson_i32).unwrap_or(WRITE_CONCERN_FAILED);
	let message = wce
		.get_str("errmsg")
		.unwrap_or("write concern error")
		.to_string();
	let wtimeout = wce
		.get_document("errInfo")
		.ok()
		.and_then(|info| info.get_bool("wtimeout").ok())
		.unwrap_or(false);

	if wtimeout {
		return Err(ctx.write_concern_timeout(message));
	}
	Err(classify_server_code(code, message, ctx))
}

fn bson_i32(value: &Bson) -> Option<i32> {
	match value {
		Bson::Int32(v) => Some(*v),
		Bson::Int64(v) => i32::try_from(*v).ok(),
		Bson::Double(v) => Some(*v as i32),
		_ => None,
	}
}
