// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing_subscriber::EnvFilter;

use crate::defaults;

/// Output shape of the installed subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
	#[default]
	Full,
	Compact,
	Json,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
	/// Filter directive used when `RUST_LOG` is unset, e.g. `info` or
	/// `resultdb_table=debug`.
	pub level: String,
	pub format: LogFormat,
	pub with_target: bool,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: defaults::LOG_LEVEL.to_string(),
			format: LogFormat::default(),
			with_target: true,
		}
	}
}

impl LoggingConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn level(mut self, level: impl Into<String>) -> Self {
		self.level = level.into();
		self
	}

	pub fn format(mut self, format: LogFormat) -> Self {
		self.format = format;
		self
	}

	pub fn with_target(mut self, with_target: bool) -> Self {
		self.with_target = with_target;
		self
	}

	fn env_filter(&self) -> EnvFilter {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
	}
}

/// Install a global `tracing` subscriber. `RUST_LOG` wins over the
/// configured level.
///
/// Returns `false` when a subscriber was already installed, which leaves the
/// existing one in place.
pub fn init_logging(config: &LoggingConfig) -> bool {
	let builder = tracing_subscriber::fmt().with_env_filter(config.env_filter()).with_target(config.with_target);

	let result = match config.format {
		LogFormat::Full => builder.try_init(),
		LogFormat::Compact => builder.compact().try_init(),
		LogFormat::Json => builder.json().try_init(),
	};
	result.is_ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_config() {
		let config = LoggingConfig::default();
		assert_eq!(config.level, "info");
		assert_eq!(config.format, LogFormat::Full);
		assert!(config.with_target);
	}

	#[test]
	fn test_builder() {
		let config = LoggingConfig::new().level("resultdb_table=debug").format(LogFormat::Json).with_target(false);
		assert_eq!(config.level, "resultdb_table=debug");
		assert_eq!(config.format, LogFormat::Json);
		assert!(!config.with_target);
	}

	#[test]
	fn test_init_twice() {
		let config = LoggingConfig::new().format(LogFormat::Compact);
		init_logging(&config);
		assert!(!init_logging(&config));
	}
}
