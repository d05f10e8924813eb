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

//! Lookup of the mutable parts of a chain spec across schema versions.
//!
//! Chain specs produced by different Substrate versions nest the runtime
//! genesis config differently, and older relay runtimes prefixed the
//! parachain pallets (`parachainsParas`, `parachainsHrmp`). Every lookup is a
//! ranked list of candidates tried in order; the first present one wins.

use std::fmt;

use serde_json::{Map, Value};

use crate::{codec::ChainSpec, LOG_TARGET};

/// Paths to the runtime genesis config, highest priority first.
pub const RUNTIME_CONFIG: &[&[&str]] = &[
	&["genesis", "runtime", "runtime_genesis_config"],
	&["genesis", "runtime"],
	&["genesis", "runtimeGenesis", "patch"],
	&["genesis", "runtimeGenesis", "config"],
];

/// A list stored in `field` of the pallet section `section`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionField {
	pub section: &'static str,
	pub field: &'static str,
}

impl SectionField {
	pub const fn new(section: &'static str, field: &'static str) -> Self {
		Self { section, field }
	}
}

/// A list inside the runtime genesis config that may live under one of
/// several section names.
///
/// The first candidate whose section exists is selected; its field then has
/// to be a list; later candidates are not consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLookup {
	pub label: &'static str,
	pub candidates: &'static [SectionField],
}

pub const SESSION_KEYS: ListLookup = ListLookup {
	label: "session.keys",
	candidates: &[SectionField::new("session", "keys")],
};

pub const AURA_AUTHORITIES: ListLookup = ListLookup {
	label: "aura.authorities",
	candidates: &[SectionField::new("aura", "authorities")],
};

pub const GRANDPA_AUTHORITIES: ListLookup = ListLookup {
	label: "grandpa.authorities",
	candidates: &[SectionField::new("grandpa", "authorities")],
};

pub const COLLATOR_INVULNERABLES: ListLookup = ListLookup {
	label: "collatorSelection.invulnerables",
	candidates: &[SectionField::new("collatorSelection", "invulnerables")],
};

pub const BALANCES: ListLookup = ListLookup {
	label: "balances.balances",
	candidates: &[SectionField::new("balances", "balances")],
};

pub const PARAS: ListLookup = ListLookup {
	label: "paras.paras",
	candidates: &[
		SectionField::new("paras", "paras"),
		SectionField::new("parachainsParas", "paras"),
	],
};

pub const HRMP_CHANNELS: ListLookup = ListLookup {
	label: "hrmp.preopenHrmpChannels",
	candidates: &[
		SectionField::new("hrmp", "preopenHrmpChannels"),
		SectionField::new("parachainsHrmp", "preopenHrmpChannels"),
	],
};

pub const STAKING: &str = "staking";

/// Consensus mechanism whose authority list is addressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthorityKind {
	#[default]
	Session,
	Aura,
	Grandpa,
}

impl AuthorityKind {
	pub fn lookup(self) -> ListLookup {
		match self {
			Self::Session => SESSION_KEYS,
			Self::Aura => AURA_AUTHORITIES,
			Self::Grandpa => GRANDPA_AUTHORITIES,
		}
	}
}

/// Registries whose absence is a hard error rather than a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registry {
	Paras,
	Hrmp,
}

impl Registry {
	pub fn lookup(self) -> ListLookup {
		match self {
			Self::Paras => PARAS,
			Self::Hrmp => HRMP_CHANNELS,
		}
	}
}

impl fmt::Display for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let candidates = self
			.lookup()
			.candidates
			.iter()
			.map(|candidate| format!("`{}.{}`", candidate.section, candidate.field))
			.collect::<Vec<_>>();
		write!(f, "{}", candidates.join(" / "))
	}
}

fn object_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Map<String, Value>> {
	path.iter()
		.try_fold(root, |node, key| node.get(key))
		.and_then(Value::as_object)
}

fn object_at_mut<'a>(root: &'a mut Value, path: &[&str]) -> Option<&'a mut Map<String, Value>> {
	path.iter()
		.try_fold(root, |node, key| node.get_mut(key))
		.and_then(Value::as_object_mut)
}

/// The runtime genesis config of a plain chain spec.
pub fn runtime_config(spec: &ChainSpec) -> Option<&Map<String, Value>> {
	RUNTIME_CONFIG
		.iter()
		.find_map(|path| object_at(spec.as_value(), path))
}

pub fn runtime_config_mut(spec: &mut ChainSpec) -> Option<&mut Map<String, Value>> {
	let Some(path) = RUNTIME_CONFIG
		.iter()
		.find(|path| object_at(spec.as_value(), path).is_some())
	else {
		log::trace!(target: LOG_TARGET, "No runtime genesis config found, raw spec: {}.", spec.is_raw());
		return None;
	};
	log::trace!(target: LOG_TARGET, "Runtime genesis config found at `{}`.", path.join("."));
	object_at_mut(spec.as_value_mut(), path)
}

pub fn section_mut<'a>(runtime: &'a mut Map<String, Value>, section: &str) -> Option<&'a mut Map<String, Value>> {
	runtime.get_mut(section).and_then(Value::as_object_mut)
}

pub fn list_mut<'a>(runtime: &'a mut Map<String, Value>, lookup: &ListLookup) -> Option<&'a mut Vec<Value>> {
	let candidate = lookup
		.candidates
		.iter()
		.find(|candidate| runtime.get(candidate.section).is_some_and(Value::is_object))?;
	log::trace!(
		target: LOG_TARGET,
		"Resolved `{}` to `{}.{}`.",
		lookup.label,
		candidate.section,
		candidate.field
	);
	runtime
		.get_mut(candidate.section)?
		.get_mut(candidate.field)?
		.as_array_mut()
}

pub fn authority_keys_mut(runtime: &mut Map<String, Value>, kind: AuthorityKind) -> Option<&mut Vec<Value>> {
	list_mut(runtime, &kind.lookup())
}

pub fn registry_mut(runtime: &mut Map<String, Value>, registry: Registry) -> Option<&mut Vec<Value>> {
	list_mut(runtime, &registry.lookup())
}
