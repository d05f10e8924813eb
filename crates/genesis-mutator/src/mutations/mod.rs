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

//! The catalogue of genesis edits.
//!
//! Every operation works on an already loaded [`ChainSpec`] and returns a
//! [`Report`]. A runtime section the operation needs but the spec lacks makes
//! it a no-op with a warning, except for the parachain and HRMP registries,
//! whose absence is an [`crate::Error::RegistryAbsent`].

use serde_json::Value;

use crate::{
	codec::ChainSpec,
	locator::{self, ListLookup},
	report::{Report, Warning},
};

pub mod authorities;
pub mod network;
pub mod parachains;
pub mod staking;

pub use authorities::{
	add_aura_authority, add_authority, add_collator_selection, add_grandpa_authority, clear_authorities,
};
pub use network::{add_boot_nodes, change_genesis_config};
pub use parachains::{add_hrmp_channels, add_para_to_genesis, para_id, set_para_id, HrmpChannel};
pub use staking::{add_balances, add_staking, generate_nominators};

pub(crate) const RUNTIME_GENESIS_CONFIG: &str = "genesis.runtime";

/// Appends `entry` to the list behind `lookup`.
pub(crate) fn append(spec: &mut ChainSpec, lookup: &ListLookup, entry: Value, message: impl FnOnce() -> String) -> Report {
	let Some(runtime) = locator::runtime_config_mut(spec) else {
		return Report::skipped(Warning::SectionAbsent(RUNTIME_GENESIS_CONFIG));
	};
	let Some(list) = locator::list_mut(runtime, lookup) else {
		return Report::skipped(Warning::SectionAbsent(lookup.label));
	};
	list.push(entry);

	let mut report = Report::new();
	report.applied(message());
	report
}
