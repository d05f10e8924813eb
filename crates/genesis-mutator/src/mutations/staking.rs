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

//! Endowments, validator bonds and synthetic nominators.

use rand::{seq::SliceRandom, Rng};
use serde_json::{json, Map, Value};

use super::RUNTIME_GENESIS_CONFIG;
use crate::{
	codec::ChainSpec,
	context::{Balance, MutationContext},
	keys::{KeyGenerator, Node},
	locator::{self, BALANCES, STAKING},
	report::{Report, Warning},
	Error,
};

const STAKERS: &str = "staking.stakers";
const INVULNERABLES: &str = "staking.invulnerables";

fn list_field<'a>(section: &'a mut Map<String, Value>, field: &str) -> Option<&'a mut Vec<Value>> {
	section.get_mut(field).and_then(Value::as_array_mut)
}

/// The amount a node is endowed with.
///
/// Validators that bring more than the default bond keep their balance,
/// everybody else gets just enough to bond.
pub(crate) fn endowment_of(node: &Node, balance: Balance, context: &MutationContext) -> Balance {
	match context.default_bond() {
		Some(bond) if node.validator && balance > bond => balance,
		Some(_) => context.endowment(),
		None => balance,
	}
}

/// Endows the stash account of every node that declares a positive balance.
pub fn add_balances(spec: &mut ChainSpec, context: &MutationContext, nodes: &[Node]) -> Report {
	let Some(runtime) = locator::runtime_config_mut(spec) else {
		return Report::skipped(Warning::SectionAbsent(RUNTIME_GENESIS_CONFIG));
	};
	let Some(balances) = locator::list_mut(runtime, &BALANCES) else {
		return Report::skipped(Warning::SectionAbsent(BALANCES.label));
	};

	let mut report = Report::new();
	for node in nodes {
		let Some(balance) = node.balance.filter(|balance| *balance > 0) else {
			continue;
		};
		let amount = endowment_of(node, balance, context);
		balances.push(json!([node.accounts.sr_stash.address, amount]));
		report.applied(format!("added balance {amount} for `{}`", node.name));
	}
	report
}

/// Bonds the node's stash as a validator.
///
/// An invulnerable node is also added to `staking.invulnerables`; without
/// that list it is still bonded and the missing list is reported.
pub fn add_staking(spec: &mut ChainSpec, context: &MutationContext, node: &Node) -> Report {
	let Some(runtime) = locator::runtime_config_mut(spec) else {
		return Report::skipped(Warning::SectionAbsent(RUNTIME_GENESIS_CONFIG));
	};
	let Some(staking) = locator::section_mut(runtime, STAKING) else {
		return Report::skipped(Warning::SectionAbsent(STAKING));
	};
	let stash = &node.accounts.sr_stash.address;
	let bond = context.staking_bond();
	let Some(stakers) = list_field(staking, "stakers") else {
		return Report::skipped(Warning::SectionAbsent(STAKERS));
	};
	stakers.push(json!([stash, node.accounts.sr_account.address, bond, "Validator"]));
	let validator_count = staking.get("validatorCount").and_then(Value::as_u64).unwrap_or_default();
	staking.insert("validatorCount".into(), json!(validator_count.saturating_add(1)));

	let mut report = Report::new();
	report.applied(format!("added `{stash}` ({}) as validator with bond {bond}", node.name));
	if node.invulnerable {
		match list_field(staking, "invulnerables") {
			Some(invulnerables) => {
				invulnerables.push(json!(stash));
				report.applied(format!("added `{stash}` to `{INVULNERABLES}`"));
			},
			None => report.warn(Warning::SectionAbsent(INVULNERABLES)),
		}
	}
	report
}

/// Picks the validators one nominator backs: a random, non-empty subset of
/// at most `max_nominations - 1` (but at least one) distinct validators.
pub(crate) fn pick_nominations<'a, R: Rng + ?Sized>(
	rng: &mut R,
	validators: &'a [String],
	max_nominations: usize,
) -> Vec<&'a String> {
	let amount = rng.gen_range(0..max_nominations.max(1)).max(1);
	validators.choose_multiple(rng, amount).collect()
}

/// Adds `count` nominators with deterministic `nom-<index>` keys, each
/// endowed and bonded with the default bond and nominating random
/// `validators`.
///
/// # Errors
/// Fails if a nominator key cannot be derived; the spec is left untouched.
pub fn generate_nominators<K: KeyGenerator + ?Sized, R: Rng + ?Sized>(
	spec: &mut ChainSpec,
	context: &MutationContext,
	keys: &K,
	rng: &mut R,
	count: usize,
	max_nominations: usize,
	validators: &[String],
) -> Result<Report, Error> {
	if count == 0 {
		return Ok(Report::new());
	}
	if validators.is_empty() {
		return Ok(Report::skipped(Warning::NoValidators));
	}
	let Some(runtime) = locator::runtime_config_mut(spec) else {
		return Ok(Report::skipped(Warning::SectionAbsent(RUNTIME_GENESIS_CONFIG)));
	};
	if locator::list_mut(runtime, &BALANCES).is_none() {
		return Ok(Report::skipped(Warning::SectionAbsent(BALANCES.label)));
	}
	if locator::section_mut(runtime, STAKING).and_then(|staking| list_field(staking, "stakers")).is_none() {
		return Ok(Report::skipped(Warning::SectionAbsent(STAKERS)));
	}

	let bond = context.staking_bond();
	let endowment = context.endowment();
	let mut endowments = Vec::with_capacity(count);
	let mut nominators = Vec::with_capacity(count);
	for index in 0..count {
		let address = keys.account_from_seed(&format!("nom-{index}"))?.address;
		let nominations = pick_nominations(rng, validators, max_nominations);
		endowments.push(json!([address, endowment]));
		nominators.push(json!([address, address, bond, { "Nominator": nominations }]));
	}

	if let Some(balances) = locator::list_mut(runtime, &BALANCES) {
		balances.extend(endowments);
	}
	if let Some(stakers) = locator::section_mut(runtime, STAKING).and_then(|staking| list_field(staking, "stakers")) {
		stakers.extend(nominators);
	}

	let mut report = Report::new();
	report.applied(format!("added {count} nominator(s) with bond {bond}"));
	Ok(report)
}
