// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A single cell of a result table, represented as a native Rust type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	/// Value is not defined (think null in common programming languages)
	#[default]
	Null,
	/// A boolean: true or false.
	Bool(bool),
	/// An 8-byte signed integer
	Integer(i64),
	/// An 8-byte floating point
	Float(f64),
	/// A UTF-8 encoded text.
	Text(String),
}

impl Value {
	pub fn text(v: impl Into<String>) -> Self {
		Value::Text(v.into())
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::Integer(_) => "integer",
			Value::Float(_) => "float",
			Value::Text(_) => "text",
		}
	}

	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Value::Integer(v) => Some(*v),
			Value::Bool(v) => Some(*v as i64),
			Value::Float(v) if v.fract() == 0.0 => Some(*v as i64),
			Value::Text(v) => v.trim().parse().ok(),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Float(v) => Some(*v),
			Value::Integer(v) => Some(*v as f64),
			Value::Bool(v) => Some(*v as i64 as f64),
			Value::Text(v) => v.trim().parse().ok(),
			Value::Null => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Text(v) => Some(v),
			_ => None,
		}
	}

	/// Truthiness used by boolean rendering: non-zero numbers and `true`.
	pub fn is_truthy(&self) -> bool {
		match self {
			Value::Null => false,
			Value::Bool(v) => *v,
			Value::Integer(v) => *v != 0,
			Value::Float(v) => *v != 0.0,
			Value::Text(v) => v.trim().parse::<i64>().map(|v| v != 0).unwrap_or(!v.is_empty()),
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Null => Ok(()),
			Value::Bool(true) => f.write_str("true"),
			Value::Bool(false) => f.write_str("false"),
			Value::Integer(value) => Display::fmt(value, f),
			Value::Float(value) => Display::fmt(value, f),
			Value::Text(value) => Display::fmt(value, f),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Integer(v as i64)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Integer(v)
	}
}

impl From<u32> for Value {
	fn from(v: u32) -> Self {
		Value::Integer(v as i64)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Text(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Text(v)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map(Into::into).unwrap_or(Value::Null)
	}
}
