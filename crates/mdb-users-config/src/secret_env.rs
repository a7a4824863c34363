// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Secrets from `VAR` or from the file named by `VAR_FILE`.
//!
//! Kubernetes and Docker mount secrets as files; pointing `VAR_FILE` at the
//! mount keeps the admin password out of the process environment.

use std::path::PathBuf;
use std::{env, fs};

use mdb_users_core::SecretString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Load `var`, preferring `{var}_FILE` when both are set.
///
/// One trailing newline is stripped from file contents. Empty values count
/// as unset.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path_str) = env::var(&file_var) {
		if path_str.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(&path_str);
		let content = fs::read_to_string(&path).map_err(|e| SecretEnvError::Io {
			path: path.clone(),
			source: e,
		})?;

		let secret = content.strip_suffix('\n').unwrap_or(&content).to_string();
		return Ok(Some(SecretString::new(secret)).filter(|s| !s.is_empty()));
	}

	Ok(env::var(var)
		.ok()
		.filter(|v| !v.is_empty())
		.map(SecretString::new))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[test]
	fn unset_is_none() {
		let var = "MDB_BOOTSTRAP_TEST_SECRET_UNSET_7731";
		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));

		assert!(load_secret_env(var).unwrap().is_none());
	}

	#[test]
	fn reads_direct_value() {
		let var = "MDB_BOOTSTRAP_TEST_SECRET_DIRECT_7732";
		env::remove_var(format!("{var}_FILE"));
		env::set_var(var, "direct-pw");

		let secret = load_secret_env(var).unwrap().unwrap();
		assert_eq!(secret.expose(), "direct-pw");

		env::remove_var(var);
	}

	#[test]
	fn file_wins_and_trailing_newline_is_stripped() {
		let var = "MDB_BOOTSTRAP_TEST_SECRET_FILE_7733";
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "from-file").unwrap();

		env::set_var(var, "from-env");
		env::set_var(format!("{var}_FILE"), file.path());

		let secret = load_secret_env(var).unwrap().unwrap();
		assert_eq!(secret.expose(), "from-file");

		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn empty_file_path_is_error() {
		let var = "MDB_BOOTSTRAP_TEST_SECRET_EMPTY_PATH_7734";
		env::set_var(format!("{var}_FILE"), "");

		let err = load_secret_env(var).unwrap_err();
		assert!(matches!(err, SecretEnvError::EmptyPath { .. }));

		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn missing_file_is_io_error() {
		let var = "MDB_BOOTSTRAP_TEST_SECRET_MISSING_7735";
		env::set_var(format!("{var}_FILE"), "/nonexistent/mdb-bootstrap/admin-password");

		let err = load_secret_env(var).unwrap_err();
		assert!(matches!(err, SecretEnvError::Io { .. }));

		env::remove_var(format!("{var}_FILE"));
	}
}
