// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration merged across sources.

use serde::Deserialize;

use crate::sections::{
	FlagsConfigLayer, LoggingConfigLayer, MongoConfigLayer, PrincipalsConfigLayer,
};

/// One source's view of the configuration. Later layers override earlier
/// ones field by field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BootstrapConfigLayer {
	#[serde(default)]
	pub flags: Option<FlagsConfigLayer>,
	#[serde(default)]
	pub principals: Option<PrincipalsConfigLayer>,
	#[serde(default)]
	pub mongo: Option<MongoConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl BootstrapConfigLayer {
	pub fn merge(&mut self, other: BootstrapConfigLayer) {
		merge_option(&mut self.flags, other.flags, FlagsConfigLayer::merge);
		merge_option(&mut self.principals, other.principals, PrincipalsConfigLayer::merge);
		merge_option(&mut self.mongo, other.mongo, MongoConfigLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_option<T>(base: &mut Option<T>, other: Option<T>, merge: impl FnOnce(&mut T, T)) {
	match (base.as_mut(), other) {
		(Some(b), Some(o)) => merge(b, o),
		(None, Some(o)) => *base = Some(o),
		(_, None) => {}
	}
}
