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

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use genesis_mutator::{AuthorityKind, Balance, KeyOwner};

/// Edits a plain Substrate chain spec in place.
#[derive(Debug, Parser)]
#[command(name = "genesis-mutator", version, about)]
pub struct Cli {
	/// The chain spec file to edit.
	#[arg(long, global = true, default_value = "chain-spec.json")]
	pub spec: PathBuf,

	/// Bond used for stakers and endowments. Captured from the spec by
	/// `clear-authorities` when not given.
	#[arg(long, global = true)]
	pub default_bond: Option<Balance>,

	/// Bond used while no default bond is known.
	#[arg(long, global = true)]
	pub fallback_bond: Option<Balance>,

	#[command(subcommand)]
	pub subcommand: Subcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
	/// Remove every authority, collator and staker of the spec.
	ClearAuthorities,

	/// Endow the stash account of every node with a balance.
	AddBalances(NodesArgs),

	/// Add the session keys of every validator node.
	AddAuthorities {
		#[command(flatten)]
		nodes: NodesArgs,

		#[arg(long, value_enum, default_value_t = Kind::Session)]
		kind: Kind,

		/// Register the keys for the stash or for the plain account.
		#[arg(long, value_enum, default_value_t = Owner::Stash)]
		owner: Owner,
	},

	/// Add the sr25519 account of every validator node to Aura.
	AddAura(NodesArgs),

	/// Add the ed25519 account of every validator node to GRANDPA.
	AddGrandpa(NodesArgs),

	/// Bond every validator node as a staking validator.
	AddStaking(NodesArgs),

	/// Register every validator node as an invulnerable collator.
	AddCollators(NodesArgs),

	/// Reset the authorities and set up all nodes in one go: balances,
	/// session keys and validator bonds.
	Prepare {
		#[command(flatten)]
		nodes: NodesArgs,

		/// Synthetic nominators to add after the validators.
		#[arg(long, default_value_t = 0)]
		nominators: usize,

		#[arg(long, default_value_t = 16)]
		max_nominations: usize,
	},

	/// Add synthetic nominators backing the given validators.
	AddNominators {
		#[arg(long)]
		count: usize,

		#[arg(long, default_value_t = 16)]
		max_nominations: usize,

		/// Stash addresses of the validators to nominate.
		#[arg(long = "validator", required = true)]
		validators: Vec<String>,

		/// Seed for the nomination choices, random if not given.
		#[arg(long)]
		seed: Option<u64>,
	},

	/// Register a parachain in the relay chain genesis.
	AddPara {
		#[arg(long)]
		id: u32,

		/// File holding the genesis head, as exported by the collator.
		#[arg(long)]
		head: PathBuf,

		/// File holding the validation code, as exported by the collator.
		#[arg(long)]
		wasm: PathBuf,

		/// Register as parathread instead of parachain.
		#[arg(long)]
		parathread: bool,
	},

	/// Pre-open the HRMP channels listed in a JSON file.
	AddHrmp {
		#[arg(long)]
		channels: PathBuf,
	},

	/// Replace the boot nodes of the spec.
	BootNodes {
		/// Multiaddresses; none clears the list.
		addresses: Vec<String>,
	},

	/// Override existing genesis values with the JSON tree in a file.
	Override {
		#[arg(long)]
		updates: PathBuf,
	},

	/// Set the parachain id of a parachain spec.
	SetParaId { id: u32 },
}

#[derive(Debug, Clone, clap::Args)]
pub struct NodesArgs {
	/// JSON file holding the list of nodes.
	#[arg(long)]
	pub nodes: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
	Session,
	Aura,
	Grandpa,
}

impl From<Kind> for AuthorityKind {
	fn from(kind: Kind) -> Self {
		match kind {
			Kind::Session => Self::Session,
			Kind::Aura => Self::Aura,
			Kind::Grandpa => Self::Grandpa,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Owner {
	Stash,
	Account,
}

impl From<Owner> for KeyOwner {
	fn from(owner: Owner) -> Self {
		match owner {
			Owner::Stash => Self::Stash,
			Owner::Account => Self::Account,
		}
	}
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn cli_is_well_formed() {
		Cli::command().debug_assert();
	}

	#[test]
	fn global_flags_follow_the_subcommand() {
		let cli = Cli::parse_from([
			"genesis-mutator",
			"add-staking",
			"--nodes",
			"nodes.json",
			"--spec",
			"rococo.json",
			"--default-bond",
			"500",
		]);

		assert_eq!(cli.spec, PathBuf::from("rococo.json"));
		assert_eq!(cli.default_bond, Some(500));
		assert!(matches!(cli.subcommand, Subcommand::AddStaking(NodesArgs { ref nodes }) if nodes == &PathBuf::from("nodes.json")));
	}

	#[test]
	fn boot_nodes_may_be_empty() {
		let cli = Cli::parse_from(["genesis-mutator", "boot-nodes"]);

		assert!(matches!(cli.subcommand, Subcommand::BootNodes { ref addresses } if addresses.is_empty()));
	}
}
