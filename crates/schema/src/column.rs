// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use resultdb_type::{IndexKind, Kind, Visibility};
use serde::{Deserialize, Serialize};

use crate::Format;

/// Describes one output column of a result table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnDescriptor {
	/// Physical column name and the key used by filters and sorts
	pub name: String,
	#[serde(default)]
	pub kind: Kind,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	#[serde(default)]
	pub visibility: Visibility,
	#[serde(default, rename = "index")]
	pub index_kind: IndexKind,
	/// (value, label) pairs; required for [`Kind::Enum`]
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub enum_labels: Vec<(i64, String)>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub format: Option<Format>,
}

impl ColumnDescriptor {
	pub fn new(name: impl Into<String>, kind: Kind) -> Self {
		Self {
			name: name.into(),
			kind,
			display_name: None,
			visibility: Visibility::Visible,
			index_kind: IndexKind::None,
			enum_labels: Vec::new(),
			format: None,
		}
	}

	pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
		self.display_name = Some(display_name.into());
		self
	}

	pub fn with_visibility(mut self, visibility: Visibility) -> Self {
		self.visibility = visibility;
		self
	}

	pub fn hidden(self) -> Self {
		self.with_visibility(Visibility::Hidden)
	}

	pub fn with_index(mut self, index_kind: IndexKind) -> Self {
		self.index_kind = index_kind;
		self
	}

	pub fn with_enum_labels<I, L>(mut self, labels: I) -> Self
	where
		I: IntoIterator<Item = (i64, L)>,
		L: Into<String>,
	{
		self.enum_labels = labels.into_iter().map(|(value, label)| (value, label.into())).collect();
		self
	}

	pub fn with_format(mut self, format: impl Into<Format>) -> Self {
		self.format = Some(format.into());
		self
	}

	/// Display label, falling back to the column name.
	pub fn label(&self) -> &str {
		self.display_name.as_deref().unwrap_or(&self.name)
	}

	pub fn is_hidden(&self) -> bool {
		self.visibility == Visibility::Hidden
	}
}
