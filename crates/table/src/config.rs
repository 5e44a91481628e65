// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::Path;

use resultdb_sqlite::SqliteConfig;

/// How read queries report failures such as a malformed filter value or a
/// sort on an unknown column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryMode {
	/// Failures are returned as errors.
	#[default]
	Strict,
	/// Best effort: failures are logged and reported as an empty result or
	/// a zero count, so list views never break on a bad filter.
	Lenient,
}

#[derive(Debug, Clone)]
pub struct WriterConfig {
	pub sqlite: SqliteConfig,
	/// Commit automatically after this many inserts.
	pub commit_every: Option<usize>,
}

impl WriterConfig {
	pub fn new(path: impl AsRef<Path>) -> Self {
		Self {
			sqlite: SqliteConfig::new(path),
			commit_every: None,
		}
	}

	pub fn commit_every(mut self, inserts: usize) -> Self {
		self.commit_every = Some(inserts.max(1));
		self
	}

	pub fn sqlite(mut self, sqlite: SqliteConfig) -> Self {
		self.sqlite = sqlite;
		self
	}
}

#[derive(Debug, Clone)]
pub struct ReaderConfig {
	pub sqlite: SqliteConfig,
	pub mode: QueryMode,
}

impl ReaderConfig {
	pub fn new(path: impl AsRef<Path>) -> Self {
		Self {
			sqlite: SqliteConfig::read_only(path),
			mode: QueryMode::Strict,
		}
	}

	pub fn lenient(mut self) -> Self {
		self.mode = QueryMode::Lenient;
		self
	}

	pub fn mode(mut self, mode: QueryMode) -> Self {
		self.mode = mode;
		self
	}

	pub fn sqlite(mut self, sqlite: SqliteConfig) -> Self {
		self.sqlite = sqlite;
		self
	}
}
