// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use resultdb_type::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::{Format, Schema};

/// One cell of a read-time projection.
///
/// Either a direct reference to a stored column, optionally relabelled or
/// reformatted, or a group that combines several stored columns into one
/// display value.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ViewItem {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub format: Option<Format>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub group: Option<Vec<String>>,
}

impl ViewItem {
	pub fn column(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			display_name: None,
			format: None,
			group: None,
		}
	}

	pub fn group<I, S>(name: impl Into<String>, columns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			group: Some(columns.into_iter().map(Into::into).collect()),
			..Self::column(name)
		}
	}

	pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
		self.display_name = Some(display_name.into());
		self
	}

	pub fn with_format(mut self, format: impl Into<Format>) -> Self {
		self.format = Some(format.into());
		self
	}

	/// Stored columns this item reads, in placeholder order.
	pub fn sources(&self) -> Vec<&str> {
		match &self.group {
			Some(group) => group.iter().map(String::as_str).collect(),
			None => vec![self.name.as_str()],
		}
	}
}

/// An ordered read-time projection over a result table. Never persisted.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct View {
	items: Vec<ViewItem>,
}

impl View {
	pub fn new(items: impl IntoIterator<Item = ViewItem>) -> Self {
		Self {
			items: items.into_iter().collect(),
		}
	}

	pub fn items(&self) -> &[ViewItem] {
		&self.items
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Check that every referenced stored column exists in `schema`.
	pub fn validate(&self, schema: &Schema) -> Result<()> {
		for item in &self.items {
			if let Some(group) = &item.group {
				if group.is_empty() {
					return Err(Error::schema(format!("view group `{}` has no columns", item.name)));
				}
			}
			for source in item.sources() {
				if !schema.contains(source) {
					return Err(Error::unknown_column(source));
				}
			}
		}
		Ok(())
	}

	/// Header label of `item`: its own display name, then the stored
	/// column's label, then its name.
	pub fn label<'a>(&self, item: &'a ViewItem, schema: &'a Schema) -> &'a str {
		if let Some(display_name) = &item.display_name {
			return display_name;
		}
		match schema.column(&item.name) {
			Some(column) => column.label(),
			None => &item.name,
		}
	}
}

impl FromIterator<ViewItem> for View {
	fn from_iter<T: IntoIterator<Item = ViewItem>>(iter: T) -> Self {
		View::new(iter)
	}
}

#[cfg(test)]
mod tests {
	use resultdb_type::Kind;

	use super::*;
	use crate::ColumnDescriptor;

	fn schema() -> Schema {
		Schema::new(vec![
			ColumnDescriptor::new("intcol1", Kind::Integer).with_display_name("Integer C1"),
			ColumnDescriptor::new("floatcol2", Kind::Float),
		])
		.unwrap()
	}

	#[test]
	fn test_validate_unknown_source() {
		let view = View::new([ViewItem::group("pair", ["intcol1", "missing"])]);
		let err = view.validate(&schema()).unwrap_err();
		assert!(matches!(err, Error::UnknownColumn { ref name } if name == "missing"));
	}

	#[test]
	fn test_labels() {
		let schema = schema();
		let view = View::new([
			ViewItem::group("pair", ["intcol1", "floatcol2"]).with_display_name("Pair"),
			ViewItem::column("intcol1"),
			ViewItem::column("floatcol2"),
		]);
		view.validate(&schema).unwrap();

		let labels: Vec<_> = view.items().iter().map(|item| view.label(item, &schema)).collect();
		assert_eq!(labels, vec!["Pair", "Integer C1", "floatcol2"]);
	}

	#[test]
	fn test_deserialize() {
		let view: View = serde_json::from_str(
			r#"[{"name": "pair1", "group": ["intcol1", "floatcol2"], "format": {"template": "%d -> %f"}}]"#,
		)
		.unwrap();
		assert_eq!(view.items()[0].sources(), vec!["intcol1", "floatcol2"]);
	}
}
