// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;
use resultdb_type::Value;

/// One row keyed by column name, in column order.
pub type Record = IndexMap<String, Value>;

/// One raw row: the row identifier followed by the declared columns.
pub type Tuple = Vec<Value>;

/// Build a [`Record`] from `name => value` pairs.
///
/// ```
/// use resultdb_table::record;
///
/// let record = record! { "intcol1" => 2, "stringcol3" => "Eéaya" };
/// assert_eq!(record.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
	($($name:expr => $value:expr),* $(,)?) => {{
		let mut record = $crate::Record::new();
		$(record.insert(::std::string::String::from($name), $crate::Value::from($value));)*
		record
	}};
}
