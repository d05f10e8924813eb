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

//! Chain specs on disk.
//!
//! Each operation reads the file fresh, applies one mutation and writes the
//! result back if anything changed. There is no locking: calls against the
//! same file have to be serialized by the caller.

use std::{
	fs,
	path::{Path, PathBuf},
};

use rand::Rng;
use serde_json::{Map, Value};

use crate::{
	codec::ChainSpec,
	context::MutationContext,
	keys::{GenesisAuthorityKey, KeyGenerator, Node},
	locator::AuthorityKind,
	mutations::{self, HrmpChannel},
	payload::PayloadSource,
	report::Report,
	Error, LOG_TARGET,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSpecFile {
	path: PathBuf,
}

impl ChainSpecFile {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// # Errors
	/// Fails if the file cannot be read or is not valid JSON.
	pub fn load(&self) -> Result<ChainSpec, Error> {
		let text = fs::read_to_string(&self.path).map_err(|source| Error::Read {
			path: self.path.clone(),
			source,
		})?;
		ChainSpec::parse(&text).map_err(|source| Error::Parse {
			path: self.path.clone(),
			source,
		})
	}

	/// # Errors
	/// Fails if the file cannot be written.
	pub fn persist(&self, spec: &ChainSpec) -> Result<(), Error> {
		let text = spec.to_json().map_err(Error::Encode)?;
		fs::write(&self.path, text).map_err(|source| Error::Persist {
			path: self.path.clone(),
			source,
		})
	}

	/// Runs `mutation` against a freshly loaded copy of the spec and persists
	/// the result, unless the mutation failed or changed nothing.
	///
	/// # Errors
	/// Propagates load, mutation and persistence failures. The file is never
	/// written after a failure.
	pub fn apply<F>(&self, mutation: F) -> Result<Report, Error>
	where
		F: FnOnce(&mut ChainSpec) -> Result<Report, Error>,
	{
		let mut spec = self.load()?;
		let report = mutation(&mut spec)?;
		if report.is_modified() {
			self.persist(&spec)?;
			log::debug!(target: LOG_TARGET, "Persisted {}.", self.path.display());
		} else {
			log::debug!(target: LOG_TARGET, "Nothing changed in {}.", self.path.display());
		}
		Ok(report)
	}

	pub fn clear_authorities(&self, context: &mut MutationContext) -> Result<Report, Error> {
		self.apply(|spec| Ok(mutations::clear_authorities(spec, context)))
	}

	pub fn add_balances(&self, context: &MutationContext, nodes: &[Node]) -> Result<Report, Error> {
		self.apply(|spec| Ok(mutations::add_balances(spec, context, nodes)))
	}

	pub fn add_authority(&self, key: &GenesisAuthorityKey, kind: AuthorityKind) -> Result<Report, Error> {
		self.apply(|spec| Ok(mutations::add_authority(spec, key, kind)))
	}

	pub fn add_aura_authority(&self, address: &str) -> Result<Report, Error> {
		self.apply(|spec| Ok(mutations::add_aura_authority(spec, address)))
	}

	pub fn add_grandpa_authority(&self, address: &str) -> Result<Report, Error> {
		self.apply(|spec| Ok(mutations::add_grandpa_authority(spec, address)))
	}

	pub fn add_staking(&self, context: &MutationContext, node: &Node) -> Result<Report, Error> {
		self.apply(|spec| Ok(mutations::add_staking(spec, context, node)))
	}

	pub fn add_collator_selection(&self, node: &Node) -> Result<Report, Error> {
		self.apply(|spec| Ok(mutations::add_collator_selection(spec, node)))
	}

	pub fn generate_nominators<K, R>(
		&self,
		context: &MutationContext,
		keys: &K,
		rng: &mut R,
		count: usize,
		max_nominations: usize,
		validators: &[String],
	) -> Result<Report, Error>
	where
		K: KeyGenerator + ?Sized,
		R: Rng + ?Sized,
	{
		self.apply(|spec| {
			mutations::generate_nominators(spec, context, keys, rng, count, max_nominations, validators)
		})
	}

	pub fn add_para_to_genesis<H, W>(&self, para_id: u32, head: &H, wasm: &W, parachain: bool) -> Result<Report, Error>
	where
		H: PayloadSource + ?Sized,
		W: PayloadSource + ?Sized,
	{
		self.apply(|spec| mutations::add_para_to_genesis(spec, para_id, head, wasm, parachain))
	}

	/// Adds all `channels` in one load/persist cycle.
	pub fn add_hrmp_channels(&self, channels: &[HrmpChannel]) -> Result<Report, Error> {
		self.apply(|spec| mutations::add_hrmp_channels(spec, channels))
	}

	pub fn add_boot_nodes(&self, addresses: &[String]) -> Result<Report, Error> {
		self.apply(|spec| Ok(mutations::add_boot_nodes(spec, addresses)))
	}

	pub fn change_genesis_config(&self, updates: &Map<String, Value>) -> Result<Report, Error> {
		self.apply(|spec| Ok(mutations::change_genesis_config(spec, updates)))
	}

	pub fn set_para_id(&self, para_id: u32) -> Result<Report, Error> {
		self.apply(|spec| Ok(mutations::set_para_id(spec, para_id)))
	}
}
