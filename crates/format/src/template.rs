// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! printf-style templates.
//!
//! Supports the conversions `s d i u f F e E g G x X o c %` with the `-`,
//! `+`, ` `, `0` and `#` flags, a field width and a precision. Each
//! placeholder consumes one value in order; leftover or missing values are
//! an error.

use std::{iter::Peekable, str::Chars};

use resultdb_type::{Error, Result, Value};

#[derive(Debug, Default)]
struct Spec {
	left: bool,
	plus: bool,
	space: bool,
	zero: bool,
	alternate: bool,
	width: usize,
	precision: Option<usize>,
}

/// Substitute `values` into `template`.
pub fn apply(template: &str, values: &[Value]) -> Result<String> {
	let mut out = String::with_capacity(template.len());
	let mut values = values.iter();
	let mut chars = template.chars().peekable();

	while let Some(c) = chars.next() {
		if c != '%' {
			out.push(c);
			continue;
		}
		if chars.peek() == Some(&'%') {
			chars.next();
			out.push('%');
			continue;
		}

		let spec = parse_spec(template, &mut chars)?;
		let conversion = chars.next().ok_or_else(|| Error::format(format!("incomplete format in `{}`", template)))?;
		let value = values
			.next()
			.ok_or_else(|| Error::format(format!("not enough values for template `{}`", template)))?;
		out.push_str(&convert(conversion, &spec, value)?);
	}

	if values.next().is_some() {
		return Err(Error::format(format!("not all values converted by template `{}`", template)));
	}
	Ok(out)
}

/// Widest field width or precision a placeholder may ask for.
const MAX_FIELD: usize = u16::MAX as usize;

fn parse_spec(template: &str, chars: &mut Peekable<Chars<'_>>) -> Result<Spec> {
	let mut spec = Spec::default();

	while let Some(&c) = chars.peek() {
		match c {
			'-' => spec.left = true,
			'+' => spec.plus = true,
			' ' => spec.space = true,
			'0' => spec.zero = true,
			'#' => spec.alternate = true,
			_ => break,
		}
		chars.next();
	}

	spec.width = parse_number(template, chars)?.unwrap_or(0);

	if chars.peek() == Some(&'.') {
		chars.next();
		spec.precision = Some(parse_number(template, chars)?.unwrap_or(0));
	}

	// length modifiers carry no meaning here
	while matches!(chars.peek(), Some('h' | 'l' | 'L' | 'q' | 'j' | 'z' | 't')) {
		chars.next();
	}

	Ok(spec)
}

fn parse_number(template: &str, chars: &mut Peekable<Chars<'_>>) -> Result<Option<usize>> {
	let mut number: Option<usize> = None;
	while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
		let next = number
			.unwrap_or(0)
			.checked_mul(10)
			.and_then(|n| n.checked_add(digit as usize))
			.filter(|&n| n <= MAX_FIELD)
			.ok_or_else(|| {
				Error::format(format!("width or precision above {} in `{}`", MAX_FIELD, template))
			})?;
		number = Some(next);
		chars.next();
	}
	Ok(number)
}

fn convert(conversion: char, spec: &Spec, value: &Value) -> Result<String> {
	match conversion {
		's' => {
			let text = value.to_string();
			let text = match spec.precision {
				Some(precision) => text.chars().take(precision).collect(),
				None => text,
			};
			Ok(pad(spec, "", &text, false))
		}
		'd' | 'i' | 'u' => {
			let v = integer(conversion, value)?;
			Ok(pad(spec, sign(spec, v < 0), &v.unsigned_abs().to_string(), true))
		}
		'x' | 'X' | 'o' => {
			let v = integer(conversion, value)?;
			let abs = v.unsigned_abs();
			let (digits, prefix) = match conversion {
				'x' => (format!("{:x}", abs), "0x"),
				'X' => (format!("{:X}", abs), "0X"),
				_ => (format!("{:o}", abs), "0o"),
			};
			let digits = if spec.alternate { format!("{}{}", prefix, digits) } else { digits };
			Ok(pad(spec, sign(spec, v < 0), &digits, true))
		}
		'f' | 'F' | 'e' | 'E' | 'g' | 'G' => {
			let v = float(conversion, value)?;
			let body = if v.is_finite() {
				let precision = spec.precision.unwrap_or(6);
				match conversion {
					'f' | 'F' => format!("{:.*}", precision, v.abs()),
					'e' | 'E' => exponential(v.abs(), precision),
					_ => general(v.abs(), precision, spec.alternate),
				}
			} else if v.is_nan() {
				"nan".to_string()
			} else {
				"inf".to_string()
			};
			let body = if conversion.is_ascii_uppercase() { body.to_uppercase() } else { body };
			Ok(pad(spec, sign(spec, v.is_sign_negative() && !v.is_nan()), &body, v.is_finite()))
		}
		'c' => {
			let c = match value {
				Value::Text(s) if s.chars().count() == 1 => s.chars().next(),
				other => other.as_i64().and_then(|v| u32::try_from(v).ok()).and_then(char::from_u32),
			}
			.ok_or_else(|| Error::format(format!("%c requires a single character, got {:?}", value)))?;
			Ok(pad(spec, "", &c.to_string(), false))
		}
		other => Err(Error::format(format!("unsupported conversion `%{}`", other))),
	}
}

fn integer(conversion: char, value: &Value) -> Result<i64> {
	let v = match value {
		Value::Float(v) if v.is_finite() => Some(v.trunc() as i64),
		other => other.as_i64(),
	};
	v.ok_or_else(|| Error::format(format!("%{} requires a number, got {:?}", conversion, value)))
}

fn float(conversion: char, value: &Value) -> Result<f64> {
	value.as_f64().ok_or_else(|| Error::format(format!("%{} requires a number, got {:?}", conversion, value)))
}

fn sign(spec: &Spec, negative: bool) -> &'static str {
	if negative {
		"-"
	} else if spec.plus {
		"+"
	} else if spec.space {
		" "
	} else {
		""
	}
}

fn pad(spec: &Spec, sign: &str, body: &str, numeric: bool) -> String {
	let len = sign.chars().count() + body.chars().count();
	if len >= spec.width {
		return format!("{}{}", sign, body);
	}
	let fill = spec.width - len;
	if spec.left {
		format!("{}{}{}", sign, body, " ".repeat(fill))
	} else if spec.zero && numeric {
		format!("{}{}{}", sign, "0".repeat(fill), body)
	} else {
		format!("{}{}{}", " ".repeat(fill), sign, body)
	}
}

/// `d.ddde±XX`, exponent at least two digits.
fn exponential(v: f64, precision: usize) -> String {
	let formatted = format!("{:.*e}", precision, v);
	let Some((mantissa, exponent)) = formatted.split_once('e') else {
		return formatted;
	};
	let exponent: i32 = exponent.parse().unwrap_or(0);
	let sign = if exponent < 0 { '-' } else { '+' };
	format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}

fn general(v: f64, precision: usize, alternate: bool) -> String {
	let precision = precision.max(1);
	if v == 0.0 {
		return if alternate { format!("{:.*}", precision - 1, 0.0) } else { "0".to_string() };
	}

	let formatted = format!("{:.*e}", precision - 1, v);
	let exponent: i32 = formatted.split_once('e').and_then(|(_, e)| e.parse().ok()).unwrap_or(0);

	let body = if exponent < -4 || exponent >= precision as i32 {
		exponential(v, precision - 1)
	} else {
		let decimals = (precision as i32 - 1 - exponent) as usize;
		format!("{:.*}", decimals.min(MAX_FIELD), v)
	};
	if alternate { body } else { strip_zeros(&body) }
}

fn strip_zeros(body: &str) -> String {
	let (mantissa, exponent) = match body.find('e') {
		Some(idx) => body.split_at(idx),
		None => (body, ""),
	};
	let mantissa = if mantissa.contains('.') { mantissa.trim_end_matches('0').trim_end_matches('.') } else { mantissa };
	format!("{}{}", mantissa, exponent)
}
