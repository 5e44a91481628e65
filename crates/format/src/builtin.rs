// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use resultdb_type::{Error, Result, Value};

pub const LOCATION: &str = "location";
pub const HTML_URL: &str = "html_url";

const DEFAULT_LINK_LABEL: &str = "Link";

/// Split a `label|link` value. Values without a pipe get the default label.
pub fn split_link(value: &str) -> (&str, &str) {
	match value.split_once('|') {
		Some((label, link)) => (label, link),
		None => (DEFAULT_LINK_LABEL, value),
	}
}

/// Render a `label|link` value as an anchor, or as the bare link for CSV.
pub fn link(value: &str, for_csv: bool) -> String {
	let (label, link) = split_link(value);
	if for_csv {
		return link.to_string();
	}
	format!("<a target='_blank' href='{}'>{}</a>", escape_html(link), escape_html(label))
}

fn escape_html(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'\'' => out.push_str("&#39;"),
			'"' => out.push_str("&quot;"),
			c => out.push(c),
		}
	}
	out
}

/// `sequence:start-end`, from three values.
pub fn location(values: &[Value]) -> Result<String> {
	let [sequence, start, end] = values else {
		return Err(Error::format(format!("{} expects 3 values, got {}", LOCATION, values.len())));
	};
	let position = |value: &Value| {
		value.as_i64().ok_or_else(|| Error::format(format!("{} position must be an integer, got {:?}", LOCATION, value)))
	};
	Ok(format!("{}:{}-{}", sequence, position(start)?, position(end)?))
}

pub fn html_url(values: &[Value]) -> Result<String> {
	match values {
		[value] => Ok(link(&value.to_string(), false)),
		_ => Err(Error::format(format!("{} expects 1 value, got {}", HTML_URL, values.len()))),
	}
}
