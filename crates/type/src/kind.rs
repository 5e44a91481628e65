// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The logical data type of a result column.
///
/// Drives both the storage type a column is created with and the default
/// display rule applied when a value is rendered. The numeric codes are
/// stable and shared with the records schema producers hand over.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Kind {
	#[default]
	None,
	File,
	String,
	Integer,
	Float,
	Boolean,
	Enum,
	Label,
	Url,
	Uuid,
}

impl Kind {
	pub const fn code(&self) -> u16 {
		match self {
			Kind::None => 0,
			Kind::File => 10,
			Kind::String => 20,
			Kind::Integer => 30,
			Kind::Float => 40,
			Kind::Boolean => 50,
			Kind::Enum => 60,
			Kind::Label => 100,
			Kind::Url => 110,
			Kind::Uuid => 120,
		}
	}

	pub const fn from_code(code: u16) -> Option<Self> {
		match code {
			0 => Some(Kind::None),
			10 => Some(Kind::File),
			20 => Some(Kind::String),
			30 => Some(Kind::Integer),
			40 => Some(Kind::Float),
			50 => Some(Kind::Boolean),
			60 => Some(Kind::Enum),
			100 => Some(Kind::Label),
			110 => Some(Kind::Url),
			120 => Some(Kind::Uuid),
			_ => None,
		}
	}

	pub const fn label(&self) -> &'static str {
		match self {
			Kind::None => "None",
			Kind::File => "FILE",
			Kind::String => "String",
			Kind::Integer => "Integer",
			Kind::Float => "Float",
			Kind::Boolean => "Bool",
			Kind::Enum => "Enum",
			Kind::Label => "Label",
			Kind::Url => "URL",
			Kind::Uuid => "UUID",
		}
	}

	/// Kinds whose values are stored as engine integers.
	pub fn is_integer(&self) -> bool {
		matches!(self, Kind::Integer | Kind::Boolean | Kind::Enum)
	}

	/// Kinds whose values are stored as text.
	pub fn is_text(&self) -> bool {
		!self.is_integer() && *self != Kind::Float
	}
}

impl Display for Kind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Kind::None => f.write_str("NONE"),
			Kind::File => f.write_str("FILE"),
			Kind::String => f.write_str("STRING"),
			Kind::Integer => f.write_str("INTEGER"),
			Kind::Float => f.write_str("FLOAT"),
			Kind::Boolean => f.write_str("BOOLEAN"),
			Kind::Enum => f.write_str("ENUM"),
			Kind::Label => f.write_str("LABEL"),
			Kind::Url => f.write_str("URL"),
			Kind::Uuid => f.write_str("UUID"),
		}
	}
}

impl TryFrom<u16> for Kind {
	type Error = String;

	fn try_from(code: u16) -> Result<Self, Self::Error> {
		Kind::from_code(code).ok_or_else(|| format!("unknown column kind code {}", code))
	}
}

impl From<Kind> for u16 {
	fn from(kind: Kind) -> Self {
		kind.code()
	}
}

/// Whether a column is part of the default display.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Visibility {
	#[default]
	Visible,
	/// Excluded from default display and enumeration, still queryable.
	Hidden,
	/// Already shown as part of a summary elsewhere; listed but not detailed.
	Limited,
}

impl Visibility {
	pub const fn code(&self) -> u16 {
		match self {
			Visibility::Visible => 0,
			Visibility::Hidden => 10,
			Visibility::Limited => 20,
		}
	}

	pub const fn from_code(code: u16) -> Option<Self> {
		match code {
			0 => Some(Visibility::Visible),
			10 => Some(Visibility::Hidden),
			20 => Some(Visibility::Limited),
			_ => None,
		}
	}

	pub const fn label(&self) -> &'static str {
		match self {
			Visibility::Visible => "Visible",
			Visibility::Hidden => "Hidden",
			Visibility::Limited => "Limited",
		}
	}
}

impl TryFrom<u16> for Visibility {
	type Error = String;

	fn try_from(code: u16) -> Result<Self, Self::Error> {
		Visibility::from_code(code).ok_or_else(|| format!("unknown visibility code {}", code))
	}
}

impl From<Visibility> for u16 {
	fn from(visibility: Visibility) -> Self {
		visibility.code()
	}
}

/// Index created for a column when the table is created.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum IndexKind {
	#[default]
	None,
	NonUnique,
	Unique,
}

impl IndexKind {
	pub const fn code(&self) -> u16 {
		match self {
			IndexKind::None => 0,
			IndexKind::NonUnique => 5,
			IndexKind::Unique => 10,
		}
	}

	pub const fn from_code(code: u16) -> Option<Self> {
		match code {
			0 => Some(IndexKind::None),
			5 => Some(IndexKind::NonUnique),
			10 => Some(IndexKind::Unique),
			_ => None,
		}
	}

	pub const fn label(&self) -> &'static str {
		match self {
			IndexKind::None => "None",
			IndexKind::NonUnique => "Non Unique",
			IndexKind::Unique => "Unique",
		}
	}
}

impl TryFrom<u16> for IndexKind {
	type Error = String;

	fn try_from(code: u16) -> Result<Self, Self::Error> {
		IndexKind::from_code(code).ok_or_else(|| format!("unknown index code {}", code))
	}
}

impl From<IndexKind> for u16 {
	fn from(index: IndexKind) -> Self {
		index.code()
	}
}
