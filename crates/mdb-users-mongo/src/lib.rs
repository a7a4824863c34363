// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! MongoDB backend for bootstrap user provisioning.
//!
//! Issues `createUser` as a raw command so the write concern and the
//! `$external` target are explicit, and classifies server replies into
//! [`AdminError`](mdb_users_provision::AdminError).

mod client;
mod command;
mod error;

pub use client::MongoUserAdmin;
