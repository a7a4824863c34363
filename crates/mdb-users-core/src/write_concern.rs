// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Write acknowledgment requested for user-catalog mutations.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

/// Bound on the acknowledgment wait for external principals.
pub const DEFAULT_WRITE_CONCERN_TIMEOUT_MS: u64 = 5000;

/// The `w` field of a write concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acknowledgment {
	Majority,
	Nodes(u32),
	Tag(String),
}

impl fmt::Display for Acknowledgment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Majority => write!(f, "majority"),
			Self::Nodes(n) => write!(f, "{n}"),
			Self::Tag(tag) => write!(f, "{tag}"),
		}
	}
}

impl Serialize for Acknowledgment {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Self::Nodes(n) => serializer.serialize_u32(*n),
			other => serializer.serialize_str(&other.to_string()),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteConcern {
	pub level: Acknowledgment,
	#[serde(rename = "timeout_ms", serialize_with = "serialize_millis")]
	pub timeout: Duration,
}

impl WriteConcern {
	pub fn majority(timeout: Duration) -> Self {
		Self {
			level: Acknowledgment::Majority,
			timeout,
		}
	}

	pub fn timeout_ms(&self) -> u64 {
		u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
	}
}

impl Default for WriteConcern {
	/// Majority acknowledgment within five seconds.
	fn default() -> Self {
		Self::majority(Duration::from_millis(DEFAULT_WRITE_CONCERN_TIMEOUT_MS))
	}
}

impl fmt::Display for WriteConcern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "w={} wtimeout={}ms", self.level, self.timeout_ms())
	}
}

fn serialize_millis<S>(timeout: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_u64(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_is_majority_five_seconds() {
		let wc = WriteConcern::default();
		assert_eq!(wc.level, Acknowledgment::Majority);
		assert_eq!(wc.timeout_ms(), 5000);
	}

	#[test]
	fn display() {
		assert_eq!(WriteConcern::default().to_string(), "w=majority wtimeout=5000ms");
		let wc = WriteConcern {
			level: Acknowledgment::Nodes(2),
			timeout: Duration::from_secs(1),
		};
		assert_eq!(wc.to_string(), "w=2 wtimeout=1000ms");
	}

	#[test]
	fn serializes_level_by_kind() {
		let json = serde_json::to_value(WriteConcern::default()).unwrap();
		assert_eq!(json["level"], "majority");
		assert_eq!(json["timeout_ms"], 5000);

		let json = serde_json::to_value(Acknowledgment::Nodes(3)).unwrap();
		assert_eq!(json, 3);

		let json = serde_json::to_value(Acknowledgment::Tag("dc-east".to_string())).unwrap();
		assert_eq!(json, "dc-east");
	}
}
