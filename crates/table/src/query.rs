// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Assembles read statements from predicates, sort terms and paging.
//!
//! Only identifiers taken from the schema are spliced into the statement;
//! every value, including paging, is a bound parameter.

use resultdb_schema::Schema;
use resultdb_sqlite::quote_identifier;
use resultdb_type::{Error, RESULT_TABLE, ROW_ID, Result, Value};

use crate::{Predicate, SortTerm};

pub(crate) struct Statement {
	pub sql: String,
	pub params: Vec<Value>,
}

pub(crate) struct Query<'a> {
	schema: &'a Schema,
	predicates: &'a [Predicate],
}

impl<'a> Query<'a> {
	pub fn new(schema: &'a Schema, predicates: &'a [Predicate]) -> Self {
		Self {
			schema,
			predicates,
		}
	}

	/// `rowid` followed by every declared column, in schema order.
	pub fn projection(schema: &Schema) -> String {
		std::iter::once(ROW_ID.to_string())
			.chain(schema.declared().iter().map(|c| quote_identifier(&c.name)))
			.collect::<Vec<_>>()
			.join(", ")
	}

	pub fn select(&self, sort: &[SortTerm], offset: usize, limit: usize) -> Result<Statement> {
		let mut params = Vec::new();
		let mut sql =
			format!("SELECT {} FROM {}", Self::projection(self.schema), quote_identifier(RESULT_TABLE));
		sql.push_str(&self.where_clause(&mut params)?);
		sql.push_str(&self.order_clause(sort)?);

		if limit > 0 || offset > 0 {
			sql.push_str(" LIMIT ? OFFSET ?");
			params.push(Value::Integer(if limit > 0 { saturating_i64(limit) } else { -1 }));
			params.push(Value::Integer(saturating_i64(offset)));
		}

		Ok(Statement {
			sql,
			params,
		})
	}

	pub fn count(&self) -> Result<Statement> {
		let mut params = Vec::new();
		let mut sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(RESULT_TABLE));
		sql.push_str(&self.where_clause(&mut params)?);
		Ok(Statement {
			sql,
			params,
		})
	}

	fn where_clause(&self, params: &mut Vec<Value>) -> Result<String> {
		if self.predicates.is_empty() {
			return Ok(String::new());
		}
		let clauses = self
			.predicates
			.iter()
			.map(|predicate| {
				let column =
					self.schema.column(&predicate.field).ok_or_else(|| Error::unknown_column(&predicate.field))?;
				predicate.compile(column, params)
			})
			.collect::<Result<Vec<_>>>()?;
		Ok(format!(" WHERE {}", clauses.join(" AND ")))
	}

	fn order_clause(&self, sort: &[SortTerm]) -> Result<String> {
		if sort.is_empty() {
			return Ok(String::new());
		}
		let terms = sort
			.iter()
			.map(|term| {
				if !self.schema.contains(&term.field) {
					return Err(Error::InvalidSort {
						term: term.to_string(),
						reason: "unknown column".to_string(),
					});
				}
				Ok(format!("{} {}", quote_identifier(&term.field), term.direction))
			})
			.collect::<Result<Vec<_>>>()?;
		Ok(format!(" ORDER BY {}", terms.join(", ")))
	}
}

/// Paging bounds past `i64::MAX` already cover every row.
fn saturating_i64(n: usize) -> i64 {
	i64::try_from(n).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
	use resultdb_schema::ColumnDescriptor;
	use resultdb_type::Kind;

	use super::*;

	fn schema() -> Schema {
		Schema::new(vec![
			ColumnDescriptor::new("intcol1", Kind::Integer),
			ColumnDescriptor::new("stringcol3", Kind::String),
		])
		.unwrap()
	}

	#[test]
	fn test_select_all() {
		let schema = schema();
		let statement = Query::new(&schema, &[]).select(&[], 0, 0).unwrap();
		assert_eq!(statement.sql, "SELECT rowid, \"intcol1\", \"stringcol3\" FROM \"RESULT\"");
		assert!(statement.params.is_empty());
	}

	#[test]
	fn test_select_filtered_sorted_paged() {
		let schema = schema();
		let predicates = [Predicate::parse("intcol1~LE~10").unwrap(), Predicate::eq("stringcol3", "x")];
		let statement = Query::new(&schema, &predicates)
			.select(&[SortTerm::asc("intcol1"), SortTerm::desc("stringcol3")], 0, 2)
			.unwrap();
		assert_eq!(
			statement.sql,
			"SELECT rowid, \"intcol1\", \"stringcol3\" FROM \"RESULT\" WHERE \"intcol1\" <= ? AND \"stringcol3\" = ? ORDER BY \"intcol1\" ASC, \"stringcol3\" DESC LIMIT ? OFFSET ?"
		);
		assert_eq!(
			statement.params,
			vec![Value::Integer(10), Value::text("x"), Value::Integer(2), Value::Integer(0)]
		);
	}

	#[test]
	fn test_offset_without_limit() {
		let schema = schema();
		let statement = Query::new(&schema, &[]).select(&[], 3, 0).unwrap();
		assert!(statement.sql.ends_with(" LIMIT ? OFFSET ?"));
		assert_eq!(statement.params, vec![Value::Integer(-1), Value::Integer(3)]);
	}

	#[test]
	fn test_huge_paging_saturates() {
		let schema = schema();
		let statement = Query::new(&schema, &[]).select(&[], usize::MAX, usize::MAX).unwrap();
		assert_eq!(statement.params, vec![Value::Integer(i64::MAX), Value::Integer(i64::MAX)]);
	}

	#[test]
	fn test_count() {
		let schema = schema();
		let predicates = [Predicate::ge("intcol1", 3)];
		let statement = Query::new(&schema, &predicates).count().unwrap();
		assert_eq!(statement.sql, "SELECT COUNT(*) FROM \"RESULT\" WHERE \"intcol1\" >= ?");
		assert_eq!(statement.params, vec![Value::Integer(3)]);
	}

	#[test]
	fn test_unknown_sort_field() {
		let schema = schema();
		let err = Query::new(&schema, &[]).select(&[SortTerm::asc("nope")], 0, 0).err().unwrap();
		assert!(matches!(err, Error::InvalidSort { .. }));
	}

	#[test]
	fn test_sort_by_row_id() {
		let schema = schema();
		let statement = Query::new(&schema, &[]).select(&[SortTerm::desc("rowid")], 0, 0).unwrap();
		assert!(statement.sql.ends_with("ORDER BY \"rowid\" DESC"));
	}
}
