// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Filter predicates and their compilation to bound-parameter clauses.

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use resultdb_schema::ColumnDescriptor;
use resultdb_sqlite::quote_identifier;
use resultdb_type::{Error, Kind, Result, Value};

/// Separator of the serialized `field~OP~value` form.
pub const FILTER_SEPARATOR: char = '~';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
	Ge,
	Le,
	Eq,
	In,
}

impl Operator {
	fn sql(&self) -> &'static str {
		match self {
			Operator::Ge => ">=",
			Operator::Le => "<=",
			Operator::Eq => "=",
			Operator::In => "IN",
		}
	}
}

impl Display for Operator {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Operator::Ge => f.write_str("GE"),
			Operator::Le => f.write_str("LE"),
			Operator::Eq => f.write_str("EQ"),
			Operator::In => f.write_str("IN"),
		}
	}
}

impl FromStr for Operator {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.to_ascii_uppercase().as_str() {
			"GE" => Ok(Operator::Ge),
			"LE" => Ok(Operator::Le),
			"EQ" => Ok(Operator::Eq),
			"IN" => Ok(Operator::In),
			other => Err(format!("unknown operator `{}`", other)),
		}
	}
}

/// Right-hand side of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
	Single(Value),
	List(Vec<Value>),
}

impl Display for Operand {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Operand::Single(value) => Display::fmt(value, f),
			Operand::List(values) => {
				let joined = values.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
				f.write_str(&joined)
			}
		}
	}
}

/// One filter condition. Several predicates are AND-combined in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
	pub field: String,
	pub op: Operator,
	pub operand: Operand,
}

impl Predicate {
	pub fn new(field: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
		Self {
			field: field.into(),
			op,
			operand: Operand::Single(value.into()),
		}
	}

	pub fn ge(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::new(field, Operator::Ge, value)
	}

	pub fn le(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::new(field, Operator::Le, value)
	}

	pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::new(field, Operator::Eq, value)
	}

	pub fn is_in<I, V>(field: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		Self {
			field: field.into(),
			op: Operator::In,
			operand: Operand::List(values.into_iter().map(Into::into).collect()),
		}
	}

	/// Parse the serialized `field~OP~value` form. The value is everything
	/// after the second separator; `IN` values are comma separated.
	pub fn parse(filter: &str) -> Result<Self> {
		let invalid = |reason: &str| Error::InvalidFilter {
			filter: filter.to_string(),
			reason: reason.to_string(),
		};

		let mut parts = filter.splitn(3, FILTER_SEPARATOR);
		let (Some(field), Some(op), Some(value)) = (parts.next(), parts.next(), parts.next()) else {
			return Err(invalid("expected `field~OP~value`"));
		};
		if field.is_empty() {
			return Err(invalid("field is empty"));
		}
		let op: Operator = op.parse().map_err(|e: String| invalid(&e))?;

		Ok(Self {
			field: field.to_string(),
			op,
			operand: Operand::Single(Value::text(value)),
		})
	}

	/// Compile into a clause with `?` placeholders, pushing the bound values
	/// onto `params`. Values are coerced to the column's storage family.
	pub(crate) fn compile(&self, column: &ColumnDescriptor, params: &mut Vec<Value>) -> Result<String> {
		let field = quote_identifier(&self.field);

		match (&self.op, &self.operand) {
			(Operator::In, operand) => {
				let values = match operand {
					Operand::List(values) => values.clone(),
					Operand::Single(Value::Text(text)) => text.split(',').map(|v| Value::text(v.trim())).collect(),
					Operand::Single(value) => vec![value.clone()],
				};
				if values.is_empty() {
					return Err(self.invalid("IN requires at least one value"));
				}
				let mut placeholders = Vec::with_capacity(values.len());
				for value in &values {
					params.push(self.coerce(column, value)?);
					placeholders.push("?");
				}
				Ok(format!("{} IN ({})", field, placeholders.join(", ")))
			}
			(_, Operand::List(_)) => Err(self.invalid("only IN takes a list of values")),
			(Operator::Eq, Operand::Single(Value::Null)) => Ok(format!("{} IS NULL", field)),
			(op, Operand::Single(value)) => {
				params.push(self.coerce(column, value)?);
				Ok(format!("{} {} ?", field, op.sql()))
			}
		}
	}

	fn coerce(&self, column: &ColumnDescriptor, value: &Value) -> Result<Value> {
		let coerced = match column.kind {
			_ if value.is_null() => None,
			kind if kind.is_integer() => match value {
				Value::Text(text) if kind == Kind::Boolean => parse_bool(text).map(|v| Value::Integer(v as i64)),
				other => other.as_i64().map(Value::Integer),
			},
			Kind::Float => value.as_f64().map(Value::Float),
			_ => Some(Value::Text(value.to_string())),
		};
		coerced.ok_or_else(|| {
			self.invalid(&format!("value `{}` does not fit column `{}` of kind {}", value, column.name, column.kind))
		})
	}

	fn invalid(&self, reason: &str) -> Error {
		Error::InvalidFilter {
			filter: self.to_string(),
			reason: reason.to_string(),
		}
	}
}

fn parse_bool(text: &str) -> Option<bool> {
	match text.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "y" | "yes" => Some(true),
		"0" | "false" | "n" | "no" => Some(false),
		_ => None,
	}
}

impl Display for Predicate {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}{}{}{}{}", self.field, FILTER_SEPARATOR, self.op, FILTER_SEPARATOR, self.operand)
	}
}

/// Anything [`crate::ResultReader::add_filter`] accepts.
pub trait IntoPredicate {
	fn into_predicate(self) -> Result<Predicate>;
}

impl IntoPredicate for Predicate {
	fn into_predicate(self) -> Result<Predicate> {
		Ok(self)
	}
}

impl IntoPredicate for &str {
	fn into_predicate(self) -> Result<Predicate> {
		Predicate::parse(self)
	}
}

impl IntoPredicate for String {
	fn into_predicate(self) -> Result<Predicate> {
		Predicate::parse(&self)
	}
}

impl<F, V> IntoPredicate for (F, Operator, V)
where
	F: Into<String>,
	V: Into<Value>,
{
	fn into_predicate(self) -> Result<Predicate> {
		Ok(Predicate::new(self.0, self.1, self.2))
	}
}
