// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Turns stored values into display text.
//!
//! Formatting is read-path only: nothing here touches stored data.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod builtin;
mod registry;
mod render;
pub mod template;

pub use registry::Formatters;
pub use render::Cell;
