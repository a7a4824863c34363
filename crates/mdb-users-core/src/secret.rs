// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacting wrapper for credentials handed to the bootstrap.
//!
//! The admin principal's password travels from the secret store, through
//! configuration and the provisioning plan, into a `createUser` command and a
//! SCRAM handshake. [`Secret<T>`] keeps it out of every other place:
//!
//! - `Debug` and `Display` print `[REDACTED]`, so `tracing` fields and error
//!   chains are safe
//! - `Serialize` writes `"[REDACTED]"`, so dry-run plan dumps are safe
//! - the inner value is zeroized on drop
//! - reading the value requires an explicit `.expose()`
//!
//! ```
//! use mdb_users_core::SecretString;
//!
//! let password = SecretString::new("hunter2".to_string());
//! assert_eq!(format!("{password}"), "[REDACTED]");
//! assert_eq!(password.expose(), "hunter2");
//! ```

use std::fmt;

use zeroize::Zeroize;

/// Placeholder printed wherever a secret would otherwise appear.
pub const REDACTED: &str = "[REDACTED]";

#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

/// Secret strings are the only kind the bootstrap handles (passwords).
pub type SecretString = Secret<String>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Access the wrapped value. Call sites doing this should be few and obvious.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl SecretString {
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl<T> Clone for Secret<T>
where
	T: Zeroize + Clone,
{
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T> fmt::Debug for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Secret").field(&REDACTED).finish()
	}
}

impl<T> fmt::Display for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> PartialEq for Secret<T>
where
	T: Zeroize + PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T> Eq for Secret<T> where T: Zeroize + Eq {}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

mod serde_impl {
	use super::{Secret, REDACTED};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};
	use zeroize::Zeroize;

	impl<T> Serialize for Secret<T>
	where
		T: Serialize + Zeroize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			serializer.serialize_str(REDACTED)
		}
	}

	impl<'de, T> Deserialize<'de> for Secret<T>
	where
		T: Deserialize<'de> + Zeroize,
	{
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			T::deserialize(deserializer).map(Secret::new)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn debug_and_display_are_redacted() {
		let password = SecretString::from("bootstrap-admin-pw");

		let debug = format!("{password:?}");
		let display = format!("{password}");

		assert!(!debug.contains("bootstrap-admin-pw"));
		assert_eq!(debug, "Secret(\"[REDACTED]\")");
		assert_eq!(display, REDACTED);
	}

	#[test]
	fn expose_returns_the_password() {
		let password = SecretString::from("bootstrap-admin-pw");
		assert_eq!(password.expose(), "bootstrap-admin-pw");
	}

	#[test]
	fn serializes_as_placeholder() {
		let password = SecretString::from("bootstrap-admin-pw");
		let json = serde_json::to_string(&password).unwrap();
		assert_eq!(json, "\"[REDACTED]\"");
	}

	#[test]
	fn deserializes_the_real_value() {
		let password: SecretString = serde_json::from_str("\"from-config\"").unwrap();
		assert_eq!(password.expose(), "from-config");
	}

	#[test]
	fn empty_detection() {
		assert!(SecretString::from("").is_empty());
		assert!(!SecretString::from("x").is_empty());
	}

	proptest! {
		#[test]
		fn never_leaks_through_formatting(value in "[a-z0-9]{8,64}") {
			let secret = SecretString::new(value.clone());
			let debug = format!("{secret:?}");
			let display = secret.to_string();
			let json = serde_json::to_string(&secret).unwrap();
			prop_assert!(!debug.contains(&value));
			prop_assert!(!display.contains(&value));
			prop_assert!(!json.contains(&value));
		}
	}
}
