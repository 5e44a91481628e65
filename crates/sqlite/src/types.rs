// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use resultdb_type::{Kind, Value};
use rusqlite::types::{Value as SqlValue, ValueRef};

/// Storage class a column of `kind` is declared with.
pub fn storage_type(kind: Kind) -> &'static str {
	match kind {
		Kind::Integer | Kind::Boolean | Kind::Enum => "INTEGER",
		Kind::Float => "REAL",
		_ => "TEXT",
	}
}

/// Quote an identifier for use in a statement, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> String {
	format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn to_sql_value(value: &Value) -> SqlValue {
	match value {
		Value::Null => SqlValue::Null,
		Value::Bool(v) => SqlValue::Integer(*v as i64),
		Value::Integer(v) => SqlValue::Integer(*v),
		Value::Float(v) => SqlValue::Real(*v),
		Value::Text(v) => SqlValue::Text(v.clone()),
	}
}

/// Convert an engine value back, restoring booleans from their column kind.
pub fn from_value_ref(value: ValueRef<'_>, kind: Kind) -> Value {
	match value {
		ValueRef::Null => Value::Null,
		ValueRef::Integer(v) if kind == Kind::Boolean => Value::Bool(v != 0),
		ValueRef::Integer(v) => Value::Integer(v),
		ValueRef::Real(v) => Value::Float(v),
		ValueRef::Text(bytes) | ValueRef::Blob(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_storage_type() {
		assert_eq!(storage_type(Kind::Integer), "INTEGER");
		assert_eq!(storage_type(Kind::Boolean), "INTEGER");
		assert_eq!(storage_type(Kind::Enum), "INTEGER");
		assert_eq!(storage_type(Kind::Float), "REAL");
		assert_eq!(storage_type(Kind::String), "TEXT");
		assert_eq!(storage_type(Kind::Url), "TEXT");
		assert_eq!(storage_type(Kind::Uuid), "TEXT");
		assert_eq!(storage_type(Kind::None), "TEXT");
	}

	#[test]
	fn test_quote_identifier() {
		assert_eq!(quote_identifier("intcol1"), "\"intcol1\"");
		assert_eq!(quote_identifier("odd\"name"), "\"odd\"\"name\"");
	}

	#[test]
	fn test_boolean_restored_from_kind() {
		assert_eq!(from_value_ref(ValueRef::Integer(1), Kind::Boolean), Value::Bool(true));
		assert_eq!(from_value_ref(ValueRef::Integer(1), Kind::Integer), Value::Integer(1));
		assert_eq!(from_value_ref(ValueRef::Text(b"abc"), Kind::String), Value::text("abc"));
		assert_eq!(to_sql_value(&Value::Bool(false)), SqlValue::Integer(0));
	}
}
