// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::{Path, PathBuf};

use resultdb_type::{Error, Kind, Result, Value};
use rusqlite::{Connection, params_from_iter};
use tracing::{debug, instrument, trace};

use crate::{
	SqliteConfig,
	connection::connect,
	types::{from_value_ref, quote_identifier, to_sql_value},
};

/// One open handle on a result table file.
///
/// Every value reaches the engine as a bound parameter. The handle is not
/// shared; callers serialize access (single writer, many readers).
pub struct SqliteStorage {
	conn: Option<Connection>,
	path: PathBuf,
}

fn query_failed(sql: &str, e: rusqlite::Error) -> Error {
	Error::StorageQuery {
		sql: sql.to_string(),
		reason: e.to_string(),
	}
}

impl SqliteStorage {
	#[instrument(name = "result::sqlite::open", level = "debug", skip(config), fields(
		db_path = ?config.path,
		read_write = config.flags.read_write,
		journal_mode = %config.journal_mode.as_str()
	))]
	pub fn open(config: &SqliteConfig) -> Result<Self> {
		let conn = connect(config)?;
		Ok(Self {
			conn: Some(conn),
			path: config.path.clone(),
		})
	}

	/// Private in-memory storage.
	pub fn in_memory() -> Result<Self> {
		Self::open(&SqliteConfig::in_memory())
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn is_closed(&self) -> bool {
		self.conn.is_none()
	}

	fn conn(&self) -> Result<&Connection> {
		self.conn.as_ref().ok_or(Error::Closed)
	}

	#[instrument(name = "result::sqlite::execute", level = "trace", skip(self, params), fields(param_count = params.len()))]
	pub fn execute(&self, sql: &str, params: &[Value]) -> Result<usize> {
		let conn = self.conn()?;
		let mut stmt = conn.prepare_cached(sql).map_err(|e| query_failed(sql, e))?;
		stmt.execute(params_from_iter(params.iter().map(to_sql_value))).map_err(|e| query_failed(sql, e))
	}

	/// Run one or more parameterless statements.
	pub fn execute_batch(&self, sql: &str) -> Result<()> {
		self.conn()?.execute_batch(sql).map_err(|e| query_failed(sql, e))
	}

	/// Run a query and convert every row, using `kinds` as per-position
	/// hints. Positions without a hint are read as [`Kind::None`].
	#[instrument(name = "result::sqlite::query", level = "trace", skip(self, params, kinds), fields(param_count = params.len()))]
	pub fn query(&self, sql: &str, params: &[Value], kinds: &[Kind]) -> Result<Vec<Vec<Value>>> {
		let conn = self.conn()?;
		let mut stmt = conn.prepare(sql).map_err(|e| query_failed(sql, e))?;
		let column_count = stmt.column_count();

		let rows = stmt
			.query_map(params_from_iter(params.iter().map(to_sql_value)), |row| {
				(0..column_count)
					.map(|idx| {
						let kind = kinds.get(idx).copied().unwrap_or_default();
						Ok(from_value_ref(row.get_ref(idx)?, kind))
					})
					.collect::<rusqlite::Result<Vec<_>>>()
			})
			.map_err(|e| query_failed(sql, e))?;

		let result = rows.collect::<rusqlite::Result<Vec<_>>>().map_err(|e| query_failed(sql, e))?;
		trace!(rows = result.len(), "query finished");
		Ok(result)
	}

	pub fn query_row(&self, sql: &str, params: &[Value], kinds: &[Kind]) -> Result<Option<Vec<Value>>> {
		Ok(self.query(sql, params, kinds)?.into_iter().next())
	}

	/// Run a query returning a single integer, such as `COUNT(*)`.
	pub fn query_count(&self, sql: &str, params: &[Value]) -> Result<i64> {
		let conn = self.conn()?;
		conn.query_row(sql, params_from_iter(params.iter().map(to_sql_value)), |row| row.get::<_, i64>(0))
			.map_err(|e| query_failed(sql, e))
	}

	pub fn last_insert_rowid(&self) -> Result<i64> {
		Ok(self.conn()?.last_insert_rowid())
	}

	/// Start a transaction unless one is already open.
	pub fn begin(&self) -> Result<()> {
		if !self.conn()?.is_autocommit() {
			return Ok(());
		}
		self.execute_batch("BEGIN")
	}

	/// Commit the open transaction, if any.
	pub fn commit(&self) -> Result<()> {
		if self.conn()?.is_autocommit() {
			return Ok(());
		}
		debug!(path = %self.path.display(), "commit");
		self.execute_batch("COMMIT")
	}

	/// Names of the physical columns of `table`, in declaration order.
	pub fn table_columns(&self, table: &str) -> Result<Vec<String>> {
		let sql = format!("PRAGMA table_info({})", quote_identifier(table));
		let conn = self.conn()?;
		let mut stmt = conn.prepare(&sql).map_err(|e| query_failed(&sql, e))?;
		let names = stmt
			.query_map([], |row| row.get::<_, String>(1))
			.map_err(|e| query_failed(&sql, e))?
			.collect::<rusqlite::Result<Vec<_>>>()
			.map_err(|e| query_failed(&sql, e))?;
		Ok(names)
	}

	/// Release the connection. Closing an already closed handle is a no-op.
	#[instrument(name = "result::sqlite::close", level = "debug", skip(self), fields(db_path = ?self.path))]
	pub fn close(&mut self) -> Result<()> {
		let Some(conn) = self.conn.take() else {
			return Ok(());
		};
		conn.close().map_err(|(_, e)| Error::StorageQuery {
			sql: "close".to_string(),
			reason: e.to_string(),
		})
	}
}

impl Drop for SqliteStorage {
	fn drop(&mut self) {
		let _ = self.close();
	}
}
