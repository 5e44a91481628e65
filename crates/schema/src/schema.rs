// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, ops::Deref, sync::Arc};

use resultdb_type::{Error, Kind, ROW_ID, Result, Visibility};

use crate::ColumnDescriptor;

/// The ordered columns of a result table.
///
/// Position 0 is always the synthetic row identifier; the declared columns
/// follow in the order they were supplied. Cloning is cheap.
#[derive(Clone, Debug)]
pub struct Schema(Arc<SchemaInner>);

#[derive(Debug)]
pub struct SchemaInner {
	columns: Vec<ColumnDescriptor>,
	positions: HashMap<String, usize>,
}

impl Deref for Schema {
	type Target = SchemaInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Schema {
	/// Build a schema from the declared columns.
	///
	/// Fails when a name is empty, repeated, collides with the reserved row
	/// identifier, or when an enum column carries no labels.
	pub fn new(declared: impl IntoIterator<Item = ColumnDescriptor>) -> Result<Self> {
		let mut columns = vec![Self::row_id_column()];
		let mut positions = HashMap::new();
		positions.insert(ROW_ID.to_string(), 0);

		for column in declared {
			if column.name.is_empty() {
				return Err(Error::schema("column name must not be empty"));
			}
			if column.name.eq_ignore_ascii_case(ROW_ID) {
				return Err(Error::schema(format!(
					"column name `{}` is reserved for the row identifier",
					column.name
				)));
			}
			if column.kind == Kind::Enum && column.enum_labels.is_empty() {
				return Err(Error::schema(format!("enum column `{}` has no labels", column.name)));
			}
			if positions.contains_key(&column.name) {
				return Err(Error::schema(format!("duplicate column `{}`", column.name)));
			}

			positions.insert(column.name.clone(), columns.len());
			columns.push(column);
		}

		Ok(Self(Arc::new(SchemaInner {
			columns,
			positions,
		})))
	}

	fn row_id_column() -> ColumnDescriptor {
		ColumnDescriptor::new(ROW_ID, Kind::Integer).with_display_name("Row ID").hidden()
	}
}

impl SchemaInner {
	/// All columns, row identifier first.
	pub fn columns(&self) -> &[ColumnDescriptor] {
		&self.columns
	}

	/// The caller-declared columns, without the row identifier.
	pub fn declared(&self) -> &[ColumnDescriptor] {
		&self.columns[1..]
	}

	pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
		self.positions.get(name).map(|&idx| &self.columns[idx])
	}

	pub fn position(&self, name: &str) -> Option<usize> {
		self.positions.get(name).copied()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.positions.contains_key(name)
	}

	/// Number of columns including the row identifier.
	pub fn len(&self) -> usize {
		self.columns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.columns.len() == 1
	}

	/// Columns shown by default: everything that is not hidden.
	pub fn displayed(&self) -> impl Iterator<Item = &ColumnDescriptor> {
		self.columns.iter().filter(|c| !c.is_hidden())
	}

	/// Columns with [`Visibility::Visible`] only.
	pub fn visible(&self) -> impl Iterator<Item = &ColumnDescriptor> {
		self.columns.iter().filter(|c| c.visibility == Visibility::Visible)
	}
}
