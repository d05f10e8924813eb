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

//! Mutations of plain Substrate chain specifications.
//!
//! A chain spec is parsed into a [`ChainSpec`] without losing numeric
//! precision, the runtime genesis configuration is located through
//! [`locator`] regardless of which historical layout the spec uses, and the
//! operations in [`mutations`] edit it in place. Every operation returns a
//! [`Report`] describing what was applied and what was skipped, which callers
//! render through a [`Reporter`].
//!
//! [`ChainSpecFile`] wraps each operation into a full load, mutate and persist
//! cycle against a file on disk.

pub mod codec;
pub mod context;
pub mod error;
pub mod keys;
pub mod locator;
pub mod merge;
pub mod mutations;
pub mod payload;
pub mod report;
pub mod store;

#[cfg(test)]
mod mock;
#[cfg(test)]
mod tests;

pub use codec::ChainSpec;
pub use context::{Balance, MutationContext, FALLBACK_STAKING_BOND};
pub use error::Error;
pub use keys::{Account, Accounts, GenesisAuthorityKey, KeyGenerator, KeyOwner, Node, SessionKeys, Sr25519Seeds};
pub use locator::{AuthorityKind, Registry};
pub use mutations::parachains::HrmpChannel;
pub use payload::{FilePayload, Payload, PayloadSource};
pub use report::{LogReporter, Report, Reporter, Warning};
pub use store::ChainSpecFile;

pub(crate) const LOG_TARGET: &str = "genesis-mutator";
