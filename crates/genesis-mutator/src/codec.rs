// KILT Blockchain – https://botlabs.org
// Copyright (C) 2019-2024 BOTLabs GmbH

// The KILT Blockchain is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The KILT Blockchain is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

// If you feel like getting in touch with us, you can do so at info@botlabs.org

//! Lossless JSON encoding of chain specs.
//!
//! Numbers are kept as their exact literal (`serde_json`'s
//! `arbitrary_precision`), so balances beyond `2^53` never pass through a
//! float. On the way out every literal written in exponential notation is
//! expanded to plain decimal, since node binaries reject `1e18` in a chain
//! spec.

use serde::{ser::Error as _, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::context::Balance;

/// A parsed chain spec document.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSpec(Value);

impl ChainSpec {
	pub fn from_value(value: Value) -> Self {
		Self(value)
	}

	/// Parses a chain spec, keeping every number literal exactly as written.
	pub fn parse(text: &str) -> serde_json::Result<Self> {
		serde_json::from_str(text).map(Self)
	}

	/// Pretty-prints the document with all numbers in plain decimal form.
	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string_pretty(&PlainDecimal(&self.0))
	}

	pub fn as_value(&self) -> &Value {
		&self.0
	}

	pub fn as_value_mut(&mut self) -> &mut Value {
		&mut self.0
	}

	pub fn into_value(self) -> Value {
		self.0
	}

	pub fn name(&self) -> Option<&str> {
		self.0.get("name").and_then(Value::as_str)
	}

	pub fn genesis(&self) -> Option<&Map<String, Value>> {
		self.0.get("genesis").and_then(Value::as_object)
	}

	pub fn genesis_mut(&mut self) -> Option<&mut Map<String, Value>> {
		self.0.get_mut("genesis").and_then(Value::as_object_mut)
	}

	/// Raw specs carry hashed storage instead of a runtime genesis config.
	pub fn is_raw(&self) -> bool {
		self.0.pointer("/genesis/raw").is_some()
	}
}

struct PlainDecimal<'a>(&'a Value);

impl Serialize for PlainDecimal<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self.0 {
			Value::Number(number) => match expand_exponent(&number.to_string()).map_err(S::Error::custom)? {
				Some(plain) => serde_json::from_str::<Number>(&plain)
					.map_err(S::Error::custom)?
					.serialize(serializer),
				None => number.serialize(serializer),
			},
			Value::Array(items) => serializer.collect_seq(items.iter().map(PlainDecimal)),
			Value::Object(map) => serializer.collect_map(map.iter().map(|(key, value)| (key, PlainDecimal(value)))),
			other => other.serialize(serializer),
		}
	}
}

/// Largest exponent magnitude that is written out as plain decimal.
pub const MAX_PLAIN_EXPONENT: u64 = 1024;

/// Decimal digits of `u128::MAX`.
const BALANCE_DIGITS: u64 = 39;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("exponent of `{literal}` exceeds the plain decimal limit of {limit}")]
pub struct ExponentOutOfRange {
	pub literal: String,
	pub limit: u64,
}

/// Rewrites a JSON number literal in exponential notation into the same value
/// in plain decimal notation. Returns `None` if the literal has no exponent.
///
/// # Errors
/// Fails without allocating the expansion if the exponent magnitude exceeds
/// [`MAX_PLAIN_EXPONENT`].
pub fn expand_exponent(literal: &str) -> Result<Option<String>, ExponentOutOfRange> {
	expand_within(literal, MAX_PLAIN_EXPONENT)
}

fn expand_within(literal: &str, limit: u64) -> Result<Option<String>, ExponentOutOfRange> {
	let Some(split) = literal.find(['e', 'E']) else {
		return Ok(None);
	};
	let out_of_range = || ExponentOutOfRange {
		literal: literal.to_owned(),
		limit,
	};
	let (mantissa, exponent) = (&literal[..split], &literal[split + 1..]);
	let exponent: i64 = exponent.trim_start_matches('+').parse().map_err(|_| out_of_range())?;
	if exponent.unsigned_abs() > limit {
		return Err(out_of_range());
	}

	let (negative, mantissa) = match mantissa.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, mantissa),
	};
	let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
	let digits = format!("{int_part}{frac_part}");
	let point = i64::try_from(int_part.len())
		.ok()
		.and_then(|len| len.checked_add(exponent))
		.ok_or_else(out_of_range)?;

	let (int_digits, frac_digits) = if point <= 0 {
		let padding = usize::try_from(point.unsigned_abs()).map_err(|_| out_of_range())?;
		(String::from("0"), format!("{}{digits}", "0".repeat(padding)))
	} else {
		let point = usize::try_from(point).map_err(|_| out_of_range())?;
		if point >= digits.len() {
			(format!("{digits}{}", "0".repeat(point - digits.len())), String::new())
		} else {
			let (int_digits, frac_digits) = digits.split_at(point);
			(int_digits.to_owned(), frac_digits.to_owned())
		}
	};

	let int_digits = match int_digits.trim_start_matches('0') {
		"" => "0",
		trimmed => trimmed,
	};
	let frac_digits = frac_digits.trim_end_matches('0');

	let mut plain = String::with_capacity(int_digits.len() + frac_digits.len() + 2);
	if negative && (int_digits != "0" || !frac_digits.is_empty()) {
		plain.push('-');
	}
	plain.push_str(int_digits);
	if !frac_digits.is_empty() {
		plain.push('.');
		plain.push_str(frac_digits);
	}
	Ok(Some(plain))
}

/// Reads a balance out of a genesis value, accepting both number literals
/// (in any notation) and decimal strings.
pub(crate) fn to_balance(value: &Value) -> Option<Balance> {
	match value {
		Value::Number(number) => {
			let literal = number.to_string();
			match expand_within(&literal, BALANCE_DIGITS) {
				Ok(Some(plain)) => plain.parse().ok(),
				Ok(None) => literal.parse().ok(),
				Err(_) => None,
			}
		},
		Value::String(text) => text.parse().ok(),
		_ => None,
	}
}
