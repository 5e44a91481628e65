// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::Path;

use resultdb_schema::{ColumnDescriptor, Schema};
use resultdb_sqlite::{SqliteStorage, quote_identifier, storage_type};
use resultdb_type::{Error, IndexKind, Kind, RESULT_TABLE, Result, Value};
use tracing::{debug, instrument, trace, warn};

use crate::{Record, WriterConfig};

/// Creates a result table file and appends rows to it.
///
/// Inserts run inside a transaction that is committed by [`flush`], by
/// [`close`], or every `commit_every` inserts when configured. Rows that
/// were not committed are lost if the process dies. Only one writer may
/// have a file open, and readers should open it after the writer closed.
///
/// [`flush`]: ResultWriter::flush
/// [`close`]: ResultWriter::close
pub struct ResultWriter {
	storage: SqliteStorage,
	schema: Schema,
	insert_sql: String,
	commit_every: Option<usize>,
	pending: usize,
}

impl ResultWriter {
	pub fn create(path: impl AsRef<Path>, schema: Schema) -> Result<Self> {
		Self::create_with(WriterConfig::new(path), schema)
	}

	/// Create the `RESULT` table and its indexes.
	///
	/// Fails when the file already holds a result table; a schema cannot be
	/// changed once written.
	#[instrument(name = "result::writer::create", level = "debug", skip(config, schema), fields(
		db_path = ?config.sqlite.path,
		columns = schema.declared().len()
	))]
	pub fn create_with(config: WriterConfig, schema: Schema) -> Result<Self> {
		let storage = SqliteStorage::open(&config.sqlite)?;

		storage.begin()?;
		storage.execute_batch(&create_table_sql(&schema))?;
		for column in schema.declared().iter().filter(|c| c.index_kind != IndexKind::None) {
			debug!(column = %column.name, index = column.index_kind.label(), "creating index");
			storage.execute_batch(&create_index_sql(column))?;
		}
		storage.commit()?;

		Ok(Self {
			insert_sql: insert_sql(&schema),
			storage,
			schema,
			commit_every: config.commit_every,
			pending: 0,
		})
	}

	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	pub fn path(&self) -> &Path {
		self.storage.path()
	}

	/// Inserts not yet committed.
	pub fn pending(&self) -> usize {
		self.pending
	}

	/// Insert one row and return its row identifier.
	///
	/// Columns missing from `record` are stored as null; names that are not
	/// declared columns are rejected. A value must carry the variant its
	/// column reads back as: `Bool` for BOOLEAN, `Integer` for INTEGER and
	/// ENUM, `Float` for FLOAT, `Text` for the rest.
	pub fn add_result(&mut self, record: &Record) -> Result<i64> {
		if let Some(name) = record.keys().find(|name| !is_declared(&self.schema, name)) {
			return Err(Error::unknown_column(name.as_str()));
		}

		let params = self
			.schema
			.declared()
			.iter()
			.map(|column| {
				let value = record.get(&column.name).cloned().unwrap_or(Value::Null);
				check_value(column, &value)?;
				Ok(value)
			})
			.collect::<Result<Vec<_>>>()?;

		self.storage.begin()?;
		self.storage.execute(&self.insert_sql, &params)?;
		let row_id = self.storage.last_insert_rowid()?;
		self.pending += 1;
		trace!(row_id, pending = self.pending, "row added");

		if self.commit_every.is_some_and(|every| self.pending >= every) {
			self.flush()?;
		}
		Ok(row_id)
	}

	/// Commit every insert since open or the previous flush.
	pub fn flush(&mut self) -> Result<()> {
		if self.storage.is_closed() {
			return Err(Error::Closed);
		}
		if self.pending > 0 {
			debug!(rows = self.pending, "flushing result rows");
		}
		self.storage.commit()?;
		self.pending = 0;
		Ok(())
	}

	/// Flush and release the file. Closing twice is a no-op.
	pub fn close(&mut self) -> Result<()> {
		if self.storage.is_closed() {
			return Ok(());
		}
		self.flush()?;
		self.storage.close()
	}
}

impl Drop for ResultWriter {
	fn drop(&mut self) {
		if let Err(err) = self.close() {
			warn!(%err, "failed to close result writer");
		}
	}
}

fn is_declared(schema: &Schema, name: &str) -> bool {
	schema.position(name).is_some_and(|idx| idx > 0)
}

/// Reject values that would not read back unchanged from the column's
/// storage class.
fn check_value(column: &ColumnDescriptor, value: &Value) -> Result<()> {
	let fits = match (column.kind, value) {
		(_, Value::Null) => true,
		(Kind::Boolean, Value::Bool(_)) => true,
		(Kind::Integer | Kind::Enum, Value::Integer(_)) => true,
		(Kind::Float, Value::Float(_)) => true,
		(kind, Value::Text(_)) => kind.is_text(),
		_ => false,
	};
	if fits {
		return Ok(());
	}
	Err(Error::TypeMismatch {
		column: column.name.clone(),
		kind: column.kind,
		value: format!("{} {}", value.type_name(), value),
	})
}

fn create_table_sql(schema: &Schema) -> String {
	let columns = schema
		.declared()
		.iter()
		.map(|c| format!("{} {}", quote_identifier(&c.name), storage_type(c.kind)))
		.collect::<Vec<_>>()
		.join(", ");
	format!("CREATE TABLE {} ( {} );", quote_identifier(RESULT_TABLE), columns)
}

fn create_index_sql(column: &ColumnDescriptor) -> String {
	let unique = if column.index_kind == IndexKind::Unique { "UNIQUE " } else { "" };
	format!(
		"CREATE {}INDEX {} ON {} ({});",
		unique,
		quote_identifier(&format!("{}_idx", column.name)),
		quote_identifier(RESULT_TABLE),
		quote_identifier(&column.name)
	)
}

fn insert_sql(schema: &Schema) -> String {
	let declared = schema.declared();
	let fields = declared.iter().map(|c| quote_identifier(&c.name)).collect::<Vec<_>>().join(", ");
	let values = (1..=declared.len()).map(|idx| format!("?{}", idx)).collect::<Vec<_>>().join(", ");
	format!("INSERT INTO {} ({}) VALUES ({});", quote_identifier(RESULT_TABLE), fields, values)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn schema() -> Schema {
		Schema::new(vec![
			ColumnDescriptor::new("intcol1", Kind::Integer).with_index(IndexKind::Unique),
			ColumnDescriptor::new("floatcol2", Kind::Float).with_index(IndexKind::NonUnique),
			ColumnDescriptor::new("stringcol3", Kind::String),
		])
		.unwrap()
	}

	#[test]
	fn test_create_table_sql() {
		assert_eq!(
			create_table_sql(&schema()),
			"CREATE TABLE \"RESULT\" ( \"intcol1\" INTEGER, \"floatcol2\" REAL, \"stringcol3\" TEXT );"
		);
	}

	#[test]
	fn test_create_index_sql() {
		let schema = schema();
		assert_eq!(
			create_index_sql(schema.column("intcol1").unwrap()),
			"CREATE UNIQUE INDEX \"intcol1_idx\" ON \"RESULT\" (\"intcol1\");"
		);
		assert_eq!(
			create_index_sql(schema.column("floatcol2").unwrap()),
			"CREATE INDEX \"floatcol2_idx\" ON \"RESULT\" (\"floatcol2\");"
		);
	}

	#[test]
	fn test_insert_sql() {
		assert_eq!(
			insert_sql(&schema()),
			"INSERT INTO \"RESULT\" (\"intcol1\", \"floatcol2\", \"stringcol3\") VALUES (?1, ?2, ?3);"
		);
	}

	#[test]
	fn test_check_value() {
		let schema = schema();
		let intcol = schema.column("intcol1").unwrap();
		assert!(check_value(intcol, &Value::Integer(1)).is_ok());
		assert!(check_value(intcol, &Value::Null).is_ok());
		assert!(matches!(check_value(intcol, &Value::text("one")), Err(Error::TypeMismatch { .. })));

		let stringcol = schema.column("stringcol3").unwrap();
		assert!(check_value(stringcol, &Value::text("x")).is_ok());
		assert!(check_value(stringcol, &Value::Integer(3)).is_err());

		let untyped = ColumnDescriptor::new("anything", Kind::None);
		assert!(check_value(&untyped, &Value::text("1.5")).is_ok());
		assert!(check_value(&untyped, &Value::Float(1.5)).is_err());
	}

	#[test]
	fn test_check_value_rejects_storage_class_changes() {
		let flag = ColumnDescriptor::new("flag", Kind::Boolean);
		assert!(check_value(&flag, &Value::Bool(true)).is_ok());
		assert!(check_value(&flag, &Value::Integer(1)).is_err());

		let level = ColumnDescriptor::new("level", Kind::Enum).with_enum_labels([(0, "Low")]);
		assert!(check_value(&level, &Value::Integer(0)).is_ok());
		assert!(check_value(&level, &Value::Bool(false)).is_err());

		let count = ColumnDescriptor::new("n", Kind::Integer);
		assert!(check_value(&count, &Value::Bool(true)).is_err());
		assert!(check_value(&count, &Value::Float(2.0)).is_err());

		let score = ColumnDescriptor::new("f", Kind::Float);
		assert!(check_value(&score, &Value::Float(2.0)).is_ok());
		assert!(check_value(&score, &Value::Integer(2)).is_err());
	}

	#[test]
	fn test_is_declared_excludes_row_id() {
		let schema = schema();
		assert!(is_declared(&schema, "intcol1"));
		assert!(!is_declared(&schema, "rowid"));
		assert!(!is_declared(&schema, "nope"));
	}
}
