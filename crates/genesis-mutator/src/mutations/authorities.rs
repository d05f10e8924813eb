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

//! Authority sets: session keys, Aura, GRANDPA and collator invulnerables.

use serde_json::{json, Value};

use super::{append, RUNTIME_GENESIS_CONFIG};
use crate::{
	codec::{to_balance, ChainSpec},
	context::MutationContext,
	keys::{GenesisAuthorityKey, Node},
	locator::{self, AuthorityKind, AURA_AUTHORITIES, COLLATOR_INVULNERABLES, GRANDPA_AUTHORITIES, SESSION_KEYS, STAKING},
	report::{Report, Warning},
	LOG_TARGET,
};

/// Voting weight every injected GRANDPA authority gets.
const GRANDPA_WEIGHT: u64 = 1;

/// Removes every authority, collator and staker the spec ships with.
///
/// The bond of the first staker becomes the default bond of the run, unless
/// the context captured one before.
pub fn clear_authorities(spec: &mut ChainSpec, context: &mut MutationContext) -> Report {
	let Some(runtime) = locator::runtime_config_mut(spec) else {
		return Report::skipped(Warning::SectionAbsent(RUNTIME_GENESIS_CONFIG));
	};
	let mut report = Report::new();

	for lookup in [SESSION_KEYS, AURA_AUTHORITIES, GRANDPA_AUTHORITIES, COLLATOR_INVULNERABLES] {
		if let Some(list) = locator::list_mut(runtime, &lookup) {
			list.clear();
			report.applied(format!("cleared `{}`", lookup.label));
		}
	}

	if let Some(staking) = locator::section_mut(runtime, STAKING) {
		let first_bond = staking
			.get("stakers")
			.and_then(Value::as_array)
			.and_then(|stakers| stakers.first())
			.and_then(|staker| staker.get(2));
		if let Some(bond) = first_bond {
			match to_balance(bond) {
				Some(bond) if context.capture_default_bond(bond) => {
					log::debug!(target: LOG_TARGET, "Default staking bond set to {bond}.");
				},
				Some(_) => {},
				None => report.warn(Warning::UnreadableBond(bond.to_string())),
			}
		}

		staking.insert("stakers".into(), json!([]));
		staking.insert("invulnerables".into(), json!([]));
		staking.insert("validatorCount".into(), json!(0));
		report.applied("cleared `staking`");
	}

	report
}

/// Appends a session key record to the authority list of `kind`.
pub fn add_authority(spec: &mut ChainSpec, key: &GenesisAuthorityKey, kind: AuthorityKind) -> Report {
	let lookup = kind.lookup();
	append(spec, &lookup, key.to_value(), || {
		format!("added `{}` to `{}`", key.account, lookup.label)
	})
}

pub fn add_aura_authority(spec: &mut ChainSpec, address: &str) -> Report {
	append(spec, &AURA_AUTHORITIES, json!(address), || {
		format!("added `{address}` to `{}`", AURA_AUTHORITIES.label)
	})
}

pub fn add_grandpa_authority(spec: &mut ChainSpec, address: &str) -> Report {
	append(spec, &GRANDPA_AUTHORITIES, json!([address, GRANDPA_WEIGHT]), || {
		format!("added `{address}` to `{}`", GRANDPA_AUTHORITIES.label)
	})
}

/// Registers the node's account as an invulnerable collator.
pub fn add_collator_selection(spec: &mut ChainSpec, node: &Node) -> Report {
	let address = &node.accounts.sr_account.address;
	append(spec, &COLLATOR_INVULNERABLES, json!(address), || {
		format!("added `{address}` ({}) to `{}`", node.name, COLLATOR_INVULNERABLES.label)
	})
}
