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

//! Opaque head-state and validation-code payloads of parachains.

use std::{fs, path::PathBuf};

use serde_json::Value;

use crate::Error;

/// Content of a genesis head or WASM blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
	Bytes(Vec<u8>),
	/// Hex text, with or without `0x` prefix.
	Hex(String),
}

impl Payload {
	/// The genesis representation: a `0x`-prefixed hex string.
	pub fn to_value(&self) -> Value {
		match self {
			Self::Bytes(bytes) => Value::String(format!("0x{}", hex::encode(bytes))),
			Self::Hex(text) if text.starts_with("0x") => Value::String(text.clone()),
			Self::Hex(text) => Value::String(format!("0x{text}")),
		}
	}
}

impl From<Vec<u8>> for Payload {
	fn from(bytes: Vec<u8>) -> Self {
		Self::Bytes(bytes)
	}
}

/// Something that can produce a payload.
pub trait PayloadSource {
	/// # Errors
	/// Fails if the payload cannot be loaded.
	fn load(&self) -> Result<Payload, Error>;
}

impl PayloadSource for Payload {
	fn load(&self) -> Result<Payload, Error> {
		Ok(self.clone())
	}
}

/// A payload stored in a file, either as hex text (the format of
/// `export-genesis-state` / `export-genesis-wasm`) or as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload(pub PathBuf);

impl PayloadSource for FilePayload {
	fn load(&self) -> Result<Payload, Error> {
		let bytes = fs::read(&self.0).map_err(|source| Error::Payload {
			path: self.0.clone(),
			source,
		})?;
		match std::str::from_utf8(&bytes).map(str::trim) {
			Ok(text) if is_hex(text) => Ok(Payload::Hex(text.to_owned())),
			_ => Ok(Payload::Bytes(bytes)),
		}
	}
}

fn is_hex(text: &str) -> bool {
	let digits = text.strip_prefix("0x").unwrap_or(text);
	!digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_hexdigit())
}
