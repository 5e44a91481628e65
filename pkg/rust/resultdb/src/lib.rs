// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod logging;

pub use logging::{LogFormat, LoggingConfig, init_logging};
pub use resultdb_format as format;
pub use resultdb_format::{Cell, Formatters};
pub use resultdb_schema as schema;
pub use resultdb_sqlite as sqlite;
pub use resultdb_sqlite::{JournalMode, OpenFlags, SqliteConfig, SynchronousMode, TempStore};
pub use resultdb_table as table;
pub use resultdb_table::{
	ColumnDescriptor, Direction, Error, FILTER_SEPARATOR, Format, IndexKind, IntoPredicate, Kind, Operand,
	Operator, Predicate, QueryMode, ReaderConfig, Record, Result, ResultReader, ResultWriter, Schema, SortTerm,
	Tuple, Value, View, ViewItem, Visibility, WriterConfig, create_result_reader, create_result_writer, record,
};
pub use resultdb_type as types;
pub use resultdb_type::{RESULT_TABLE, ROW_ID};

/// Default configuration values
pub mod defaults {
	/// Log level used when `RUST_LOG` is not set
	pub const LOG_LEVEL: &str = "info";

}
