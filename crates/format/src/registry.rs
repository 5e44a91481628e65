// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use resultdb_schema::FormatFn;
use resultdb_type::{Result, Value};

use crate::builtin;

/// Named formatters, looked up by [`resultdb_schema::Format::Named`].
///
/// [`Formatters::default`] carries the built-ins (`location`, `html_url`);
/// callers register their own on top.
#[derive(Clone)]
pub struct Formatters {
	named: HashMap<String, FormatFn>,
}

impl Formatters {
	/// A registry without any formatter.
	pub fn empty() -> Self {
		Self {
			named: HashMap::new(),
		}
	}

	pub fn get(&self, name: &str) -> Option<&FormatFn> {
		self.named.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.named.contains_key(name)
	}

	pub fn register<F>(&mut self, name: impl Into<String>, f: F)
	where
		F: Fn(&[Value]) -> Result<String> + Send + Sync + 'static,
	{
		self.named.insert(name.into(), Arc::new(f));
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.named.keys().map(String::as_str)
	}
}

impl Default for Formatters {
	fn default() -> Self {
		let mut formatters = Self::empty();
		formatters.register(builtin::LOCATION, builtin::location);
		formatters.register(builtin::HTML_URL, builtin::html_url);
		formatters
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builtins_registered() {
		let formatters = Formatters::default();
		assert!(formatters.contains("location"));
		assert!(formatters.contains("html_url"));
		assert!(!Formatters::empty().contains("location"));
	}

	#[test]
	fn test_register_custom() {
		let mut formatters = Formatters::default();
		formatters.register("shout", |values: &[Value]| Ok(values[0].to_string().to_uppercase()));

		let shout = formatters.get("shout").unwrap();
		assert_eq!(shout(&[Value::text("hi")]).unwrap(), "HI");

		let mut names: Vec<_> = formatters.names().collect();
		names.sort();
		assert_eq!(names, vec!["html_url", "location", "shout"]);
	}
}
