// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Result tables: one SQLite file holding one `RESULT` table.
//!
//! A [`ResultWriter`] creates the table from a [`Schema`] and appends rows.
//! A [`ResultReader`] opens the finished file and serves filtered, sorted,
//! paged rows, either raw or rendered for display through the schema's
//! formats or an installed [`View`].
//!
//! There is no internal locking. Finish and close the writer before
//! opening readers; any number of readers may share a file.

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod config;
mod filter;
mod query;
mod reader;
mod record;
mod sort;
mod writer;

use std::path::Path;

pub use config::{QueryMode, ReaderConfig, WriterConfig};
pub use filter::{FILTER_SEPARATOR, IntoPredicate, Operand, Operator, Predicate};
pub use reader::ResultReader;
pub use record::{Record, Tuple};
pub use resultdb_format::Formatters;
pub use resultdb_schema::{ColumnDescriptor, Format, Schema, View, ViewItem};
pub use resultdb_type::{Error, IndexKind, Kind, Result, Value, Visibility};
pub use sort::{Direction, SortTerm};
pub use writer::ResultWriter;

pub fn create_result_writer(path: impl AsRef<Path>, schema: Schema) -> Result<ResultWriter> {
	ResultWriter::create(path, schema)
}

pub fn create_result_reader(path: impl AsRef<Path>, schema: Schema) -> Result<ResultReader> {
	ResultReader::open(path, schema)
}
