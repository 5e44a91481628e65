// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use resultdb_type::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
	#[default]
	Asc,
	Desc,
}

impl Display for Direction {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Direction::Asc => f.write_str("ASC"),
			Direction::Desc => f.write_str("DESC"),
		}
	}
}

impl FromStr for Direction {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_ascii_uppercase().as_str() {
			"ASC" => Ok(Direction::Asc),
			"DESC" => Ok(Direction::Desc),
			_ => Err(Error::InvalidSort {
				term: s.to_string(),
				reason: "direction must be ASC or DESC".to_string(),
			}),
		}
	}
}

/// One ordering key; terms apply in sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortTerm {
	pub field: String,
	pub direction: Direction,
}

impl SortTerm {
	pub fn new(field: impl Into<String>, direction: Direction) -> Self {
		Self {
			field: field.into(),
			direction,
		}
	}

	pub fn asc(field: impl Into<String>) -> Self {
		Self::new(field, Direction::Asc)
	}

	pub fn desc(field: impl Into<String>) -> Self {
		Self::new(field, Direction::Desc)
	}

	/// Parse `field` or `field DIRECTION`.
	pub fn parse(term: &str) -> Result<Self> {
		let mut parts = term.split_whitespace();
		let Some(field) = parts.next() else {
			return Err(Error::InvalidSort {
				term: term.to_string(),
				reason: "field is empty".to_string(),
			});
		};
		let direction = match parts.next() {
			Some(direction) => direction.parse()?,
			None => Direction::Asc,
		};
		if parts.next().is_some() {
			return Err(Error::InvalidSort {
				term: term.to_string(),
				reason: "expected `field [ASC|DESC]`".to_string(),
			});
		}
		Ok(Self::new(field, direction))
	}
}

impl<F: Into<String>> From<(F, Direction)> for SortTerm {
	fn from((field, direction): (F, Direction)) -> Self {
		Self::new(field, direction)
	}
}

impl Display for SortTerm {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", self.field, self.direction)
	}
}
