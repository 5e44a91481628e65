// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::Path;

use resultdb_format::{Cell, Formatters};
use resultdb_schema::{Schema, View};
use resultdb_sqlite::{SqliteStorage, quote_identifier};
use resultdb_type::{Error, Kind, RESULT_TABLE, ROW_ID, Result, Value};
use tracing::{debug, instrument, warn};

use crate::{
	IntoPredicate, Predicate, QueryMode, ReaderConfig, Record, SortTerm, Tuple,
	query::{Query, Statement},
};

/// Filtered, sorted, paged and display-formatted reads over a result file.
///
/// The schema handed to [`open`](ResultReader::open) drives display; its
/// column names must exist in the stored table. Several readers may have
/// the same file open.
pub struct ResultReader {
	storage: SqliteStorage,
	schema: Schema,
	kinds: Vec<Kind>,
	mode: QueryMode,
	formatters: Formatters,
	filters: Vec<Predicate>,
	view: Option<View>,
}

impl ResultReader {
	pub fn open(path: impl AsRef<Path>, schema: Schema) -> Result<Self> {
		Self::open_with(ReaderConfig::new(path), schema)
	}

	#[instrument(name = "result::reader::open", level = "debug", skip(config, schema), fields(
		db_path = ?config.sqlite.path,
		mode = ?config.mode
	))]
	pub fn open_with(config: ReaderConfig, schema: Schema) -> Result<Self> {
		let storage = SqliteStorage::open(&config.sqlite)?;

		let stored = storage.table_columns(RESULT_TABLE)?;
		if stored.is_empty() {
			return Err(Error::schema(format!("file has no `{}` table", RESULT_TABLE)));
		}
		let missing: Vec<String> = schema
			.declared()
			.iter()
			.filter(|column| !stored.contains(&column.name))
			.map(|column| column.name.clone())
			.collect();
		if !missing.is_empty() {
			return Err(Error::SchemaMismatch {
				missing,
			});
		}

		debug!(stored = stored.len(), declared = schema.declared().len(), "result table opened");
		Ok(Self {
			kinds: schema.columns().iter().map(|c| c.kind).collect(),
			storage,
			schema,
			mode: config.mode,
			formatters: Formatters::default(),
			filters: Vec::new(),
			view: None,
		})
	}

	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	pub fn mode(&self) -> QueryMode {
		self.mode
	}

	pub fn set_mode(&mut self, mode: QueryMode) {
		self.mode = mode;
	}

	pub fn formatters(&self) -> &Formatters {
		&self.formatters
	}

	/// Register named formatters here before rendering.
	pub fn formatters_mut(&mut self) -> &mut Formatters {
		&mut self.formatters
	}

	pub fn with_formatters(mut self, formatters: Formatters) -> Self {
		self.formatters = formatters;
		self
	}

	/// Number of rows matching the active filters. In lenient mode a failing
	/// query counts as zero.
	pub fn get_item_count(&self) -> Result<usize> {
		let result = Query::new(&self.schema, &self.filters)
			.count()
			.and_then(|statement| self.storage.query_count(&statement.sql, &statement.params))
			.map(|count| count.max(0) as usize);
		self.recover("get_item_count", result, || 0)
	}

	/// Append a filter, given as a [`Predicate`], a `(field, op, value)`
	/// triple or a `field~OP~value` string.
	///
	/// A filter on a column the schema does not know is ignored, with a
	/// warning, and `false` is returned.
	pub fn add_filter(&mut self, filter: impl IntoPredicate) -> Result<bool> {
		let predicate = filter.into_predicate()?;
		if !self.schema.contains(&predicate.field) {
			warn!(filter = %predicate, "ignoring filter on unknown column");
			return Ok(false);
		}
		debug!(filter = %predicate, "filter added");
		self.filters.push(predicate);
		Ok(true)
	}

	pub fn clear_filters(&mut self) {
		self.filters.clear();
	}

	pub fn filters(&self) -> &[Predicate] {
		&self.filters
	}

	/// Rows matching the active filters, ordered by `sort`, skipping `offset`
	/// rows and returning at most `limit` (`0` is unbounded). Each tuple
	/// starts with the row identifier. In lenient mode a failing query
	/// returns no rows.
	pub fn get_result_tuples(&self, sort: &[SortTerm], offset: usize, limit: usize) -> Result<Vec<Tuple>> {
		let result = Query::new(&self.schema, &self.filters)
			.select(sort, offset, limit)
			.and_then(|statement| self.run(&statement));
		self.recover("get_result_tuples", result, Vec::new)
	}

	/// Point lookup by row identifier, ignoring the active filters.
	pub fn get_result_tuple(&self, row_id: i64) -> Result<Option<Tuple>> {
		let sql = format!(
			"SELECT {} FROM {} WHERE {} = ?",
			Query::projection(&self.schema),
			quote_identifier(RESULT_TABLE),
			ROW_ID
		);
		self.storage.query_row(&sql, &[Value::Integer(row_id)], &self.kinds)
	}

	pub fn get_result_dict(&self, row_id: i64, show_all: bool) -> Result<Option<Record>> {
		Ok(self.get_result_tuple(row_id)?.map(|tuple| self.tuple_to_dict(&tuple, show_all)))
	}

	pub fn get_result_dicts(
		&self,
		sort: &[SortTerm],
		offset: usize,
		limit: usize,
		show_all: bool,
	) -> Result<Vec<Record>> {
		Ok(self
			.get_result_tuples(sort, offset, limit)?
			.iter()
			.map(|tuple| self.tuple_to_dict(tuple, show_all))
			.collect())
	}

	/// Key a raw tuple by column name, hidden columns included.
	pub fn get_dict_for_tuple(&self, tuple: &[Value]) -> Record {
		self.tuple_to_dict(tuple, true)
	}

	/// `(label, display value)` of every strictly visible column of a row.
	pub fn get_result_info_at_index(&self, row_id: i64) -> Result<Option<Vec<(String, String)>>> {
		let Some(tuple) = self.get_result_tuple(row_id)? else {
			return Ok(None);
		};
		self.schema
			.visible()
			.map(|column| {
				let idx = self.schema.position(&column.name).ok_or_else(|| Error::unknown_column(&column.name))?;
				let text =
					self.formatters.render(&Cell::from(column), std::slice::from_ref(&tuple[idx]), false)?;
				Ok((column.label().to_string(), text))
			})
			.collect::<Result<Vec<_>>>()
			.map(Some)
	}

	/// Install a read-time projection. Every column it references must exist.
	pub fn set_view_info(&mut self, view: View) -> Result<()> {
		view.validate(&self.schema)?;
		self.view = Some(view);
		Ok(())
	}

	pub fn clear_view_info(&mut self) {
		self.view = None;
	}

	pub fn view_info(&self) -> Option<&View> {
		self.view.as_ref()
	}

	/// `(name, label)` per display column: the view's items when a view is
	/// set, the non-hidden schema columns otherwise.
	pub fn get_display_headers(&self) -> Vec<(String, String)> {
		match &self.view {
			Some(view) => view
				.items()
				.iter()
				.map(|item| (item.name.clone(), view.label(item, &self.schema).to_string()))
				.collect(),
			None => self.schema.displayed().map(|c| (c.name.clone(), c.label().to_string())).collect(),
		}
	}

	/// Render a raw tuple for display.
	///
	/// With a view, one string per view item. Without, one per column,
	/// hidden columns only when `show_hidden` is set. `for_csv` renders URL
	/// columns as bare links.
	pub fn interpret_tuple(&self, tuple: &[Value], for_csv: bool, show_hidden: bool) -> Result<Vec<String>> {
		if tuple.len() != self.schema.len() {
			return Err(Error::schema(format!(
				"tuple has {} values, schema has {} columns",
				tuple.len(),
				self.schema.len()
			)));
		}

		let Some(view) = &self.view else {
			return self
				.schema
				.columns()
				.iter()
				.zip(tuple)
				.filter(|(column, _)| show_hidden || !column.is_hidden())
				.map(|(column, value)| {
					self.formatters.render(&Cell::from(column), std::slice::from_ref(value), for_csv)
				})
				.collect();
		};

		view.items()
			.iter()
			.map(|item| {
				let values = item
					.sources()
					.into_iter()
					.map(|name| {
						let idx = self.schema.position(name).ok_or_else(|| Error::unknown_column(name))?;
						Ok(tuple[idx].clone())
					})
					.collect::<Result<Vec<_>>>()?;

				let cell = match self.schema.column(&item.name) {
					Some(column) => Cell::from(column),
					None => Cell::detached(&item.name),
				}
				.with_format(item.format.as_ref());

				self.formatters.render(&cell, &values, for_csv)
			})
			.collect()
	}

	/// Release the file. Closing twice is a no-op.
	pub fn close(&mut self) -> Result<()> {
		self.storage.close()
	}

	fn run(&self, statement: &Statement) -> Result<Vec<Tuple>> {
		self.storage.query(&statement.sql, &statement.params, &self.kinds)
	}

	fn tuple_to_dict(&self, tuple: &[Value], show_all: bool) -> Record {
		self.schema
			.columns()
			.iter()
			.zip(tuple)
			.filter(|(column, _)| show_all || !column.is_hidden())
			.map(|(column, value)| (column.name.clone(), value.clone()))
			.collect()
	}

	fn recover<T>(&self, operation: &str, result: Result<T>, fallback: impl FnOnce() -> T) -> Result<T> {
		match result {
			Err(err) if self.mode == QueryMode::Lenient && err.is_query_failure() => {
				warn!(operation, %err, "read query failed, returning empty result");
				Ok(fallback())
			}
			other => other,
		}
	}
}
