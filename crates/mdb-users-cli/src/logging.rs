// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use mdb_users_config::{BootstrapConfig, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
///
/// Logs go to stderr so `--dry-run` output on stdout stays parseable.
pub fn init(config: &LoggingConfig) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

	let json = config.json.then(|| {
		tracing_subscriber::fmt::layer()
			.json()
			.with_writer(std::io::stderr)
	});
	let text = (!config.json)
		.then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

	tracing_subscriber::registry()
		.with(filter)
		.with(json)
		.with(text)
		.init();
}

/// Log the resolved configuration. Call after [`init`]; events emitted while
/// loading the configuration precede the subscriber and are not recorded.
pub fn config_summary(config: &BootstrapConfig) {
	tracing::info!(
		admin_user_enabled = config.flags.admin_user_enabled,
		service_user_enabled = config.flags.service_user_enabled,
		monitor_user_enabled = config.flags.monitor_user_enabled,
		admin_password_set = config.principals.admin_password.is_some(),
		app_name = %config.mongo.app_name,
		write_concern_timeout_ms = config.mongo.write_concern_timeout_ms,
		"Bootstrap configuration loaded"
	);
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io;
	use std::sync::{Arc, Mutex};

	use mdb_users_core::{FlagSet, SecretString};

	#[derive(Clone, Default)]
	struct Capture(Arc<Mutex<Vec<u8>>>);

	impl io::Write for Capture {
		fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
			self.0.lock().unwrap().extend_from_slice(buf);
			Ok(buf.len())
		}

		fn flush(&mut self) -> io::Result<()> {
			Ok(())
		}
	}

	#[test]
	fn summary_is_recorded_without_the_password() {
		let mut config = BootstrapConfig {
			flags: FlagSet::new(true, true, false),
			..Default::default()
		};
		config.principals.admin_password = Some(SecretString::from("summary-secret"));

		let capture = Capture::default();
		let writer = capture.clone();
		let subscriber = tracing_subscriber::fmt()
			.with_ansi(false)
			.with_writer(move || writer.clone())
			.finish();
		tracing::subscriber::with_default(subscriber, || config_summary(&config));

		let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
		assert!(output.contains("Bootstrap configuration loaded"));
		assert!(output.contains("admin_user_enabled=true"));
		assert!(output.contains("admin_password_set=true"));
		assert!(output.contains("write_concern_timeout_ms=5000"));
		assert!(!output.contains("summary-secret"));
	}
}
