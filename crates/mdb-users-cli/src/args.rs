// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use clap::Parser;

/// Create the bootstrap users of a MongoDB cluster.
///
/// Everything except the options below comes from `MDB_BOOTSTRAP_*`
/// environment variables and the TOML config file.
#[derive(Parser, Debug)]
#[command(name = "mdb-configure-users", version)]
pub struct Args {
	/// TOML config file (default: /etc/mdb-bootstrap/users.toml)
	#[arg(long, env = "MDB_BOOTSTRAP_CONFIG")]
	pub config: Option<PathBuf>,

	/// Print the provisioning plan as JSON without connecting
	#[arg(long)]
	pub dry_run: bool,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_flags() {
		let args = Args::parse_from([
			"mdb-configure-users",
			"--config",
			"/tmp/users.toml",
			"--dry-run",
		]);
		assert_eq!(args.config, Some(PathBuf::from("/tmp/users.toml")));
		assert!(args.dry_run);
	}

	#[test]
	fn dry_run_defaults_off() {
		let args = Args::parse_from(["mdb-configure-users"]);
		assert!(!args.dry_run);
	}
}
