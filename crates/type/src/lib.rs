// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod kind;
pub mod value;

pub use error::{Error, Result};
pub use kind::{IndexKind, Kind, Visibility};
pub use value::Value;

/// Name of the engine-native row identifier every result table exposes.
pub const ROW_ID: &str = "rowid";

/// Name of the single logical table stored in a result file.
pub const RESULT_TABLE: &str = "RESULT";
