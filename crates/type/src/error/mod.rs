// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::Kind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to open result table at {path}: {reason}")]
	StorageOpen {
		path: String,
		reason: String,
	},

	#[error("Failed to execute `{sql}`: {reason}")]
	StorageQuery {
		sql: String,
		reason: String,
	},

	#[error("Invalid schema: {reason}")]
	Schema {
		reason: String,
	},

	#[error("Stored table is missing columns: {}", missing.join(", "))]
	SchemaMismatch {
		missing: Vec<String>,
	},

	#[error("Unknown column `{name}`")]
	UnknownColumn {
		name: String,
	},

	#[error("Column `{column}` of kind {kind} cannot hold {value}")]
	TypeMismatch {
		column: String,
		kind: Kind,
		value: String,
	},

	#[error("Column `{column}` has no label for enum value {value}")]
	EnumLabelMissing {
		column: String,
		value: String,
	},

	#[error("Invalid filter `{filter}`: {reason}")]
	InvalidFilter {
		filter: String,
		reason: String,
	},

	#[error("Invalid sort term `{term}`: {reason}")]
	InvalidSort {
		term: String,
		reason: String,
	},

	#[error("Format failed: {reason}")]
	Format {
		reason: String,
	},

	#[error("Result table handle is closed")]
	Closed,
}

impl Error {
	pub fn schema(reason: impl Into<String>) -> Self {
		Error::Schema {
			reason: reason.into(),
		}
	}

	pub fn format(reason: impl Into<String>) -> Self {
		Error::Format {
			reason: reason.into(),
		}
	}

	pub fn unknown_column(name: impl Into<String>) -> Self {
		Error::UnknownColumn {
			name: name.into(),
		}
	}

	/// Errors raised while building or running a read query.
	///
	/// These are the failures the lenient read mode turns into empty
	/// results.
	pub fn is_query_failure(&self) -> bool {
		matches!(
			self,
			Error::StorageQuery { .. }
				| Error::InvalidFilter { .. }
				| Error::InvalidSort { .. }
				| Error::UnknownColumn { .. }
		)
	}
}
