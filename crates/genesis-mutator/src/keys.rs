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

//! Network participants and the genesis key records derived from them.
//!
//! Key material is produced elsewhere; nodes arrive with their accounts fully
//! derived. The only derivation done here is the deterministic one for
//! synthetic nominators, behind [`KeyGenerator`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sp_core::{
	crypto::{ByteArray, Ss58Codec},
	ecdsa, sr25519, Pair,
};

use crate::{context::Balance, Error};

/// A single key pair of a node, as far as the genesis is concerned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
	pub address: String,
	#[serde(default, skip_serializing_if = "Option::is_none", with = "hex_bytes")]
	pub public_key: Option<Vec<u8>>,
}

impl Account {
	pub fn new(address: impl Into<String>) -> Self {
		Self {
			address: address.into(),
			public_key: None,
		}
	}

	pub fn with_public_key(mut self, public_key: impl Into<Vec<u8>>) -> Self {
		self.public_key = Some(public_key.into());
		self
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accounts {
	pub sr_stash: Account,
	pub sr_account: Account,
	pub ed_account: Account,
	pub ec_account: Account,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
	pub name: String,
	#[serde(default)]
	pub balance: Option<Balance>,
	#[serde(default)]
	pub validator: bool,
	#[serde(default)]
	pub invulnerable: bool,
	pub accounts: Accounts,
}

/// Which account a [`GenesisAuthorityKey`] is registered for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyOwner {
	#[default]
	Stash,
	Account,
}

/// Session keys of one authority, by role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionKeys {
	pub grandpa: String,
	pub babe: String,
	pub im_online: String,
	pub parachain_validator: String,
	pub authority_discovery: String,
	pub para_validator: String,
	pub para_assignment: String,
	pub beefy: String,
	pub aura: String,
}

/// An entry of `session.keys`: `(account, validator, keys)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisAuthorityKey {
	pub account: String,
	pub validator: String,
	pub keys: SessionKeys,
}

impl GenesisAuthorityKey {
	/// Builds the session key record of `node`.
	///
	/// `grandpa` uses the ed25519 account, `beefy` the SS58 encoding of the
	/// raw ECDSA public key and every other role the sr25519 account.
	///
	/// # Errors
	/// Fails if the node's `ec_account` carries no valid ECDSA public key.
	pub fn for_node(node: &Node, owner: KeyOwner) -> Result<Self, Error> {
		let Accounts {
			sr_stash,
			sr_account,
			ed_account,
			ec_account,
		} = &node.accounts;

		let owner = match owner {
			KeyOwner::Stash => &sr_stash.address,
			KeyOwner::Account => &sr_account.address,
		};
		let sr = || sr_account.address.clone();

		Ok(Self {
			account: owner.clone(),
			validator: owner.clone(),
			keys: SessionKeys {
				grandpa: ed_account.address.clone(),
				babe: sr(),
				im_online: sr(),
				parachain_validator: sr(),
				authority_discovery: sr(),
				para_validator: sr(),
				para_assignment: sr(),
				beefy: beefy_address(node)?,
				aura: sr(),
			},
		})
	}

	pub fn to_value(&self) -> Value {
		json!([self.account, self.validator, self.keys])
	}
}

fn beefy_address(node: &Node) -> Result<String, Error> {
	let invalid = || Error::InvalidPublicKey {
		node: node.name.clone(),
		role: "ec_account",
	};
	let raw = node.accounts.ec_account.public_key.as_deref().ok_or_else(invalid)?;
	let public = ecdsa::Public::try_from(raw).map_err(|_| invalid())?;
	Ok(public.to_ss58check())
}

/// Deterministic key derivation for synthetic accounts.
pub trait KeyGenerator {
	/// # Errors
	/// Fails if `seed` does not yield a key pair.
	fn account_from_seed(&self, seed: &str) -> Result<Account, Error>;
}

/// Derives sr25519 accounts from the hard derivation path `//<seed>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sr25519Seeds;

impl KeyGenerator for Sr25519Seeds {
	fn account_from_seed(&self, seed: &str) -> Result<Account, Error> {
		let public = sr25519::Pair::from_string(&format!("//{seed}"), None)
			.map_err(|_| Error::KeyDerivation(seed.to_owned()))?
			.public();
		Ok(Account::new(public.to_ss58check()).with_public_key(public.to_raw_vec()))
	}
}

mod hex_bytes {
	use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

	pub(super) fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
		match bytes {
			Some(bytes) => serializer.serialize_str(&format!("0x{}", hex::encode(bytes))),
			None => serializer.serialize_none(),
		}
	}

	pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
		Option::<String>::deserialize(deserializer)?
			.map(|text| hex::decode(text.trim_start_matches("0x")).map_err(D::Error::custom))
			.transpose()
	}
}
