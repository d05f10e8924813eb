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

use serde_json::{json, Map, Value};
use sp_core::{
	crypto::{ByteArray, Ss58Codec},
	ecdsa, ed25519, sr25519, Pair,
};

use crate::{
	codec::ChainSpec,
	context::Balance,
	keys::{Account, Accounts, Node},
	locator,
};

pub(crate) const ALICE: &str = "Alice";
pub(crate) const BOB: &str = "Bob";
pub(crate) const CHARLIE: &str = "Charlie";
pub(crate) const DAVE: &str = "Dave";

pub(crate) const STAKER_BOND: Balance = 500;

fn public<P: Pair>(uri: &str) -> P::Public {
	P::from_string(uri, None).expect("static values are valid; qed").public()
}

/// A node whose accounts are derived from `//<name>` like the well-known
/// development keys.
pub(crate) fn node(name: &str) -> Node {
	let ec = public::<ecdsa::Pair>(&format!("//{name}"));
	Node {
		name: name.to_lowercase(),
		balance: None,
		validator: false,
		invulnerable: false,
		accounts: Accounts {
			sr_stash: Account::new(public::<sr25519::Pair>(&format!("//{name}//stash")).to_ss58check()),
			sr_account: Account::new(public::<sr25519::Pair>(&format!("//{name}")).to_ss58check()),
			ed_account: Account::new(public::<ed25519::Pair>(&format!("//{name}")).to_ss58check()),
			ec_account: Account::new(ec.to_ss58check()).with_public_key(ec.to_raw_vec()),
		},
	}
}

pub(crate) fn validator(name: &str, balance: Balance) -> Node {
	Node {
		balance: Some(balance),
		validator: true,
		..node(name)
	}
}

pub(crate) fn endowed(name: &str, balance: Balance) -> Node {
	Node {
		balance: Some(balance),
		..node(name)
	}
}

/// Nesting style of the runtime genesis config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Layout {
	/// `genesis.runtime.runtime_genesis_config`
	#[default]
	Nested,
	/// `genesis.runtime`
	Flat,
	/// `genesis.runtimeGenesis.patch`
	Patch,
}

#[derive(Debug, Clone)]
pub(crate) struct SpecBuilder {
	layout: Layout,
	top: Map<String, Value>,
	runtime: Map<String, Value>,
}

impl Default for SpecBuilder {
	fn default() -> Self {
		let mut top = Map::new();
		top.insert("name".into(), json!("Rococo Local Testnet"));
		top.insert("id".into(), json!("rococo_local_testnet"));
		top.insert("chainType".into(), json!("Local"));
		top.insert(
			"bootNodes".into(),
			json!(["/ip4/127.0.0.1/tcp/30333/p2p/12D3KooWEyoppNCUx8Yx66oV9fJnriXwCcXwDDUA2kj6vnc6iDEp"]),
		);
		Self {
			layout: Layout::default(),
			top,
			runtime: Map::new(),
		}
	}
}

impl SpecBuilder {
	pub(crate) fn with_layout(mut self, layout: Layout) -> Self {
		self.layout = layout;
		self
	}

	pub(crate) fn with_top(mut self, key: &str, value: Value) -> Self {
		self.top.insert(key.into(), value);
		self
	}

	pub(crate) fn with_section(mut self, name: &str, value: Value) -> Self {
		self.runtime.insert(name.into(), value);
		self
	}

	pub(crate) fn with_stakers(self, stakers: Value) -> Self {
		self.with_section(
			"staking",
			json!({
				"validatorCount": 2,
				"minimumValidatorCount": 1,
				"invulnerables": ["5GNJqTPyNqANBkUVMN1LPPrxXnFouWXoe2wNSmmEoLctxiZY"],
				"forceEra": "NotForcing",
				"slashRewardFraction": 100000000,
				"stakers": stakers,
			}),
		)
	}

	pub(crate) fn build(self) -> ChainSpec {
		let runtime = Value::Object(self.runtime);
		let genesis = match self.layout {
			Layout::Nested => json!({ "runtime": { "runtime_genesis_config": runtime } }),
			Layout::Flat => json!({ "runtime": runtime }),
			Layout::Patch => json!({ "runtimeGenesis": { "code": "0x0061736d", "patch": runtime } }),
		};
		let mut document = self.top;
		document.insert("genesis".into(), genesis);
		ChainSpec::from_value(Value::Object(document))
	}
}

/// A rococo-like relay chain spec with one staker bonded at [`STAKER_BOND`].
pub(crate) fn relay_chain_spec() -> ChainSpec {
	SpecBuilder::default()
		.with_section("system", json!({ "code": "0x0061736d" }))
		.with_section(
			"balances",
			json!({ "balances": [["5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY", 1152921504606846976u64]] }),
		)
		.with_section(
			"session",
			json!({ "keys": [[
				"5GNJqTPyNqANBkUVMN1LPPrxXnFouWXoe2wNSmmEoLctxiZY",
				"5GNJqTPyNqANBkUVMN1LPPrxXnFouWXoe2wNSmmEoLctxiZY",
				{ "grandpa": "5FA9nQDVg267DEd8m1ZypXLBnvN7SFxYwV7ndqSYGiN9TTpu", "babe": "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY" }
			]] }),
		)
		.with_section("grandpa", json!({ "authorities": [] }))
		.with_section("babe", json!({ "authorities": [], "epochConfig": { "c": [1, 4], "allowed_slots": "PrimaryAndSecondaryVRFSlots" } }))
		.with_stakers(json!([[
			"5GNJqTPyNqANBkUVMN1LPPrxXnFouWXoe2wNSmmEoLctxiZY",
			"5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY",
			STAKER_BOND,
			"Validator"
		]]))
		.with_section("paras", json!({ "paras": [] }))
		.with_section("hrmp", json!({ "preopenHrmpChannels": [] }))
		.with_section("configuration", json!({ "config": { "max_code_size": 3145728, "max_validators": null } }))
		.build()
}

/// A cumulus-like parachain spec with Aura and collator selection.
pub(crate) fn parachain_spec() -> ChainSpec {
	SpecBuilder::default()
		.with_layout(Layout::Flat)
		.with_top("name", json!("Asset Hub Local"))
		.with_top("para_id", json!(1000))
		.with_top("relay_chain", json!("rococo_local_testnet"))
		.with_section("balances", json!({ "balances": [] }))
		.with_section("parachainInfo", json!({ "parachainId": 1000 }))
		.with_section(
			"collatorSelection",
			json!({ "invulnerables": ["5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"], "candidacyBond": 16000000000u64, "desiredCandidates": 0 }),
		)
		.with_section("session", json!({ "keys": [] }))
		.with_section("aura", json!({ "authorities": ["5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"] }))
		.build()
}

pub(crate) fn raw_spec() -> ChainSpec {
	ChainSpec::from_value(json!({
		"name": "Rococo Local Testnet",
		"bootNodes": [],
		"genesis": { "raw": { "top": { "0x3a636f6465": "0x0061736d" }, "childrenDefault": {} } }
	}))
}

pub(crate) fn runtime(spec: &ChainSpec) -> &Map<String, Value> {
	locator::runtime_config(spec).expect("mock specs carry a runtime genesis config")
}
