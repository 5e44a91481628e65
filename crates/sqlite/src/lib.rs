// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! SQLite storage adapter.
//!
//! Opens the single file backing a result table, maps column kinds onto
//! SQLite storage classes and runs statements with bound parameters only.

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod config;
mod connection;
mod storage;
mod types;

pub use config::{JournalMode, OpenFlags, SqliteConfig, SynchronousMode, TempStore};
pub use storage::SqliteStorage;
pub use types::{from_value_ref, quote_identifier, storage_type, to_sql_value};
