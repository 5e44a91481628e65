// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use resultdb_schema::{ColumnDescriptor, Format};
use resultdb_type::{Error, Kind, Result, Value};
use tracing::trace;

use crate::{Formatters, builtin, template};

/// The column metadata rendering depends on.
///
/// Built from a stored column, then optionally overridden by a view item.
#[derive(Clone, Copy, Debug)]
pub struct Cell<'a> {
	pub name: &'a str,
	pub kind: Kind,
	pub enum_labels: &'a [(i64, String)],
	pub format: Option<&'a Format>,
}

impl<'a> Cell<'a> {
	/// A cell with no stored column behind it.
	pub fn detached(name: &'a str) -> Self {
		Self {
			name,
			kind: Kind::None,
			enum_labels: &[],
			format: None,
		}
	}

	/// Replace the format when `format` is set.
	pub fn with_format(mut self, format: Option<&'a Format>) -> Self {
		if format.is_some() {
			self.format = format;
		}
		self
	}

	fn enum_label(&self, value: i64) -> Option<&'a str> {
		self.enum_labels.iter().find(|(v, _)| *v == value).map(|(_, label)| label.as_str())
	}
}

impl<'a> From<&'a ColumnDescriptor> for Cell<'a> {
	fn from(column: &'a ColumnDescriptor) -> Self {
		Self {
			name: &column.name,
			kind: column.kind,
			enum_labels: &column.enum_labels,
			format: column.format.as_ref(),
		}
	}
}

impl Formatters {
	/// Render `values` for display.
	///
	/// A single value renders by, in order: the attached format, the
	/// boolean `Y`/`N` rule, the enum label, the URL link rule, and finally
	/// its default text. A null single value is the empty string. Several
	/// values (a view group) go through the attached format, or are joined
	/// with `", "` when there is none.
	pub fn render(&self, cell: &Cell<'_>, values: &[Value], for_csv: bool) -> Result<String> {
		if let [value] = values {
			if value.is_null() {
				return Ok(String::new());
			}
		}

		if let Some(format) = cell.format {
			return self.apply(format, values);
		}

		let [value] = values else {
			return Ok(values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "));
		};

		match cell.kind {
			Kind::Boolean => Ok(if value.is_truthy() { "Y" } else { "N" }.to_string()),
			Kind::Enum => value.as_i64().and_then(|v| cell.enum_label(v)).map(str::to_string).ok_or_else(|| {
				Error::EnumLabelMissing {
					column: cell.name.to_string(),
					value: value.to_string(),
				}
			}),
			Kind::Url => Ok(builtin::link(&value.to_string(), for_csv)),
			_ => Ok(value.to_string()),
		}
	}

	/// Resolve a format through its one dispatch point. A template whose
	/// text is a registered formatter name runs that formatter.
	fn apply(&self, format: &Format, values: &[Value]) -> Result<String> {
		match format {
			Format::Named(name) => {
				let f = self.get(name).ok_or_else(|| Error::format(format!("unknown formatter `{}`", name)))?;
				f(values)
			}
			Format::Custom(f) => f(values),
			Format::Template(text) => match self.get(text) {
				Some(f) => {
					trace!(formatter = %text, "template resolved to registered formatter");
					f(values)
				}
				None => template::apply(text, values),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn column(kind: Kind) -> ColumnDescriptor {
		ColumnDescriptor::new("col", kind)
	}

	fn render(column: &ColumnDescriptor, value: Value) -> Result<String> {
		Formatters::default().render(&Cell::from(column), &[value], false)
	}

	#[test]
	fn test_boolean() {
		assert_eq!(render(&column(Kind::Boolean), Value::Bool(true)).unwrap(), "Y");
		assert_eq!(render(&column(Kind::Boolean), Value::Integer(0)).unwrap(), "N");
	}

	#[test]
	fn test_format_beats_boolean() {
		let column = column(Kind::Boolean).with_format(Format::custom(|values| {
			Ok(if values[0].is_truthy() { "yes".to_string() } else { "no".to_string() })
		}));
		assert_eq!(render(&column, Value::Bool(true)).unwrap(), "yes");

		let column = ColumnDescriptor::new("flag", Kind::Boolean).with_format("flag=%d");
		assert_eq!(render(&column, Value::Bool(false)).unwrap(), "flag=0");
	}

	#[test]
	fn test_enum() {
		let column = column(Kind::Enum).with_enum_labels([(0, "Low"), (1, "High")]);
		assert_eq!(render(&column, Value::Integer(1)).unwrap(), "High");

		let err = render(&column, Value::Integer(5)).unwrap_err();
		assert!(matches!(err, Error::EnumLabelMissing { ref value, .. } if value == "5"));
	}

	#[test]
	fn test_url() {
		let column = column(Kind::Url);
		let formatters = Formatters::default();
		let value = [Value::text("Click|http://example.com")];

		let html = formatters.render(&Cell::from(&column), &value, false).unwrap();
		assert_eq!(html, "<a target='_blank' href='http://example.com'>Click</a>");

		let csv = formatters.render(&Cell::from(&column), &value, true).unwrap();
		assert_eq!(csv, "http://example.com");
	}

	#[test]
	fn test_default_text() {
		assert_eq!(render(&column(Kind::Float), Value::Float(99.3)).unwrap(), "99.3");
		assert_eq!(render(&column(Kind::String), Value::text("Eéaya")).unwrap(), "Eéaya");
		assert_eq!(render(&column(Kind::Integer), Value::Null).unwrap(), "");
	}

	#[test]
	fn test_named_formatter() {
		let column = column(Kind::Url).with_format(Format::named("html_url"));
		assert_eq!(render(&column, Value::text("x|y")).unwrap(), "<a target='_blank' href='y'>x</a>");

		let column = ColumnDescriptor::new("col", Kind::String).with_format(Format::named("nope"));
		assert!(matches!(render(&column, Value::text("x")), Err(Error::Format { .. })));
	}

	#[test]
	fn test_template_naming_registered_formatter() {
		let formatters = Formatters::default();
		let format = Format::template("location");
		let cell = Cell::detached("where").with_format(Some(&format));
		let values = [Value::text("chr2"), Value::Integer(5), Value::Integer(9)];
		assert_eq!(formatters.render(&cell, &values, false).unwrap(), "chr2:5-9");
	}

	#[test]
	fn test_group_without_format() {
		let values = [Value::Integer(2), Value::Float(2.3)];
		assert_eq!(Formatters::default().render(&Cell::detached("pair"), &values, false).unwrap(), "2, 2.3");
	}

	#[test]
	fn test_group_template() {
		let format = Format::template("%d -> %f");
		let cell = Cell::detached("pair").with_format(Some(&format));
		let values = [Value::Integer(2), Value::Float(2.3)];
		assert_eq!(Formatters::default().render(&cell, &values, false).unwrap(), "2 -> 2.300000");
	}
}
