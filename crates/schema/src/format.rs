// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Debug, Formatter},
	sync::Arc,
};

use resultdb_type::{Result, Value};
use serde::{Deserialize, Serialize};

/// A caller-supplied formatter. Receives one value for a plain column and
/// one value per source column for a view group.
pub type FormatFn = Arc<dyn Fn(&[Value]) -> Result<String> + Send + Sync>;

/// How a column or view item turns its value into display text.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
	/// printf-style template, one placeholder per value
	Template(String),
	/// Name of a formatter registered with the formatter registry
	Named(String),
	/// Runtime-only callable; never persisted
	#[serde(skip)]
	Custom(FormatFn),
}

impl Format {
	pub fn template(template: impl Into<String>) -> Self {
		Format::Template(template.into())
	}

	pub fn named(name: impl Into<String>) -> Self {
		Format::Named(name.into())
	}

	pub fn custom<F>(f: F) -> Self
	where
		F: Fn(&[Value]) -> Result<String> + Send + Sync + 'static,
	{
		Format::Custom(Arc::new(f))
	}
}

impl Debug for Format {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Format::Template(template) => f.debug_tuple("Template").field(template).finish(),
			Format::Named(name) => f.debug_tuple("Named").field(name).finish(),
			Format::Custom(_) => f.write_str("Custom(..)"),
		}
	}
}

impl From<&str> for Format {
	fn from(template: &str) -> Self {
		Format::Template(template.to_string())
	}
}
