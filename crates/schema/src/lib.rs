// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod column;
mod format;
mod schema;
mod view;

pub use column::ColumnDescriptor;
pub use format::{Format, FormatFn};
pub use schema::Schema;
pub use view::{View, ViewItem};
