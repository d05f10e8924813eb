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

//! Errors that abort a mutation.
//!
//! Conditions that only turn an operation into a no-op (a consensus section
//! the runtime does not have, an override key the genesis does not know) are
//! not errors; they are reported as [`crate::Warning`]s instead.

use std::{io, path::PathBuf};

use crate::locator::Registry;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The chain spec file could not be read.
	#[error("failed to read chain spec {}: {source}", path.display())]
	Read { path: PathBuf, source: io::Error },
	/// The chain spec is not well-formed JSON.
	#[error("chain spec {} is not valid JSON: {source}", path.display())]
	Parse { path: PathBuf, source: serde_json::Error },
	/// The document could not be turned back into text.
	#[error("failed to encode chain spec: {0}")]
	Encode(#[source] serde_json::Error),
	/// The chain spec could not be written back.
	#[error("failed to write chain spec {}: {source}", path.display())]
	Persist { path: PathBuf, source: io::Error },
	/// A parachain or HRMP registry is required but the runtime has none.
	#[error("{0} not found in the runtime genesis config")]
	RegistryAbsent(Registry),
	/// A node account lacks the raw public key a role needs.
	#[error("account `{role}` of node `{node}` has no valid ECDSA public key")]
	InvalidPublicKey { node: String, role: &'static str },
	/// No key pair could be derived from the given seed.
	#[error("failed to derive a key pair from seed `{0}`")]
	KeyDerivation(String),
	/// A head or WASM payload could not be loaded.
	#[error("failed to load payload {}: {source}", path.display())]
	Payload { path: PathBuf, source: io::Error },
}
