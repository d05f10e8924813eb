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

use std::{fs, path::Path};

use anyhow::Context;
use genesis_mutator::{
	mutations, AuthorityKind, ChainSpec, ChainSpecFile, Error, FilePayload, GenesisAuthorityKey, HrmpChannel, KeyOwner,
	LogReporter, MutationContext, Node, Report, Sr25519Seeds,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::cli::{Cli, NodesArgs, Subcommand};

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
	let text = fs::read_to_string(path).with_context(|| format!("reading {what} from {}", path.display()))?;
	serde_json::from_str(&text).with_context(|| format!("parsing {what} in {}", path.display()))
}

fn load_nodes(args: &NodesArgs) -> anyhow::Result<Vec<Node>> {
	read_json(&args.nodes, "nodes")
}

fn validators(nodes: &[Node]) -> impl Iterator<Item = &Node> {
	nodes.iter().filter(|node| node.validator)
}

/// Runs `edit` for every validator in `nodes` within one load/persist cycle.
fn for_validators<F>(file: &ChainSpecFile, nodes: &[Node], mut edit: F) -> Result<Report, Error>
where
	F: FnMut(&mut ChainSpec, &Node) -> Result<Report, Error>,
{
	file.apply(|spec| {
		let mut report = Report::new();
		for node in validators(nodes) {
			report.extend(edit(spec, node)?);
		}
		Ok(report)
	})
}

fn add_authorities(spec: &mut ChainSpec, node: &Node, kind: AuthorityKind, owner: KeyOwner) -> Result<Report, Error> {
	Ok(match kind {
		AuthorityKind::Session => mutations::add_authority(spec, &GenesisAuthorityKey::for_node(node, owner)?, kind),
		AuthorityKind::Aura => mutations::add_aura_authority(spec, &node.accounts.sr_account.address),
		AuthorityKind::Grandpa => mutations::add_grandpa_authority(spec, &node.accounts.ed_account.address),
	})
}

fn nomination_rng(seed: Option<u64>) -> StdRng {
	match seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_entropy(),
	}
}

fn context_of(cli: &Cli) -> MutationContext {
	let context = match cli.default_bond {
		Some(bond) => MutationContext::with_default_bond(bond),
		None => MutationContext::new(),
	};
	match cli.fallback_bond {
		Some(bond) => context.with_fallback_bond(bond),
		None => context,
	}
}

fn execute(cli: &Cli, file: &ChainSpecFile, context: &mut MutationContext) -> anyhow::Result<Report> {
	let report = match &cli.subcommand {
		Subcommand::ClearAuthorities => {
			let report = file.clear_authorities(context)?;
			match context.default_bond() {
				Some(bond) => log::info!("Default bond is {bond}, pass `--default-bond {bond}` to later runs."),
				None => log::info!("No default bond captured, stakers will use {}.", context.staking_bond()),
			}
			report
		},
		Subcommand::AddBalances(args) => file.add_balances(context, &load_nodes(args)?)?,
		Subcommand::AddAuthorities { nodes, kind, owner } => {
			let nodes = load_nodes(nodes)?;
			for_validators(file, &nodes, |spec, node| {
				add_authorities(spec, node, (*kind).into(), (*owner).into())
			})?
		},
		Subcommand::AddAura(args) => for_validators(file, &load_nodes(args)?, |spec, node| {
			add_authorities(spec, node, AuthorityKind::Aura, KeyOwner::default())
		})?,
		Subcommand::AddGrandpa(args) => for_validators(file, &load_nodes(args)?, |spec, node| {
			add_authorities(spec, node, AuthorityKind::Grandpa, KeyOwner::default())
		})?,
		Subcommand::AddStaking(args) => for_validators(file, &load_nodes(args)?, |spec, node| {
			Ok(mutations::add_staking(spec, context, node))
		})?,
		Subcommand::AddCollators(args) => for_validators(file, &load_nodes(args)?, |spec, node| {
			Ok(mutations::add_collator_selection(spec, node))
		})?,
		Subcommand::Prepare {
			nodes,
			nominators,
			max_nominations,
		} => {
			let nodes = load_nodes(nodes)?;
			let stashes: Vec<String> = validators(&nodes)
				.map(|node| node.accounts.sr_stash.address.clone())
				.collect();
			let mut rng = nomination_rng(None);
			file.apply(|spec| {
				let mut report = mutations::clear_authorities(spec, context);
				report.extend(mutations::add_balances(spec, context, &nodes));
				for node in validators(&nodes) {
					report.extend(add_authorities(spec, node, AuthorityKind::Session, KeyOwner::Stash)?);
					report.extend(mutations::add_staking(spec, context, node));
				}
				report.extend(mutations::generate_nominators(
					spec,
					context,
					&Sr25519Seeds,
					&mut rng,
					*nominators,
					*max_nominations,
					&stashes,
				)?);
				Ok(report)
			})?
		},
		Subcommand::AddNominators {
			count,
			max_nominations,
			validators,
			seed,
		} => file.generate_nominators(
			context,
			&Sr25519Seeds,
			&mut nomination_rng(*seed),
			*count,
			*max_nominations,
			validators,
		)?,
		Subcommand::AddPara {
			id,
			head,
			wasm,
			parathread,
		} => file.add_para_to_genesis(*id, &FilePayload(head.clone()), &FilePayload(wasm.clone()), !parathread)?,
		Subcommand::AddHrmp { channels } => {
			let channels: Vec<HrmpChannel> = read_json(channels, "HRMP channels")?;
			file.add_hrmp_channels(&channels)?
		},
		Subcommand::BootNodes { addresses } => file.add_boot_nodes(addresses)?,
		Subcommand::Override { updates } => {
			let updates: Map<String, Value> = read_json(updates, "genesis overrides")?;
			file.change_genesis_config(&updates)?
		},
		Subcommand::SetParaId { id } => file.set_para_id(*id)?,
	};
	Ok(report)
}

/// Parses the command line and applies the requested edit to the spec file.
pub fn run(cli: Cli) -> anyhow::Result<()> {
	let file = ChainSpecFile::new(&cli.spec);
	let mut context = context_of(&cli);

	let report = execute(&cli, &file, &mut context).with_context(|| format!("editing {}", file.path().display()))?;
	report.render(&mut LogReporter);
	Ok(())
}

#[cfg(test)]
mod tests {
	use clap::Parser;
	use serde_json::json;

	use super::*;

	const SPEC: &str = r#"{
		"name": "Rococo Local Testnet",
		"bootNodes": ["/ip4/127.0.0.1/tcp/30333"],
		"genesis": { "runtime": {
			"balances": { "balances": [] },
			"hrmp": { "preopenHrmpChannels": [] },
			"staking": { "stakers": [["stash", "controller", 500, "Validator"]], "invulnerables": [], "validatorCount": 1 }
		} }
	}"#;

	fn cli(spec: &Path, args: &[&str]) -> Cli {
		let spec = spec.to_str().unwrap();
		Cli::parse_from(["genesis-mutator", "--spec", spec].iter().chain(args))
	}

	fn spec_in(dir: &tempfile::TempDir) -> std::path::PathBuf {
		let path = dir.path().join("chain-spec.json");
		fs::write(&path, SPEC).unwrap();
		path
	}

	#[test]
	fn clear_authorities_captures_bond() {
		let dir = tempfile::tempdir().unwrap();
		let path = spec_in(&dir);
		let cli = cli(&path, &["clear-authorities"]);
		let mut context = context_of(&cli);

		execute(&cli, &ChainSpecFile::new(&path), &mut context).unwrap();

		assert_eq!(context.default_bond(), Some(500));
	}

	#[test]
	fn hrmp_channels_are_read_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = spec_in(&dir);
		let channels = dir.path().join("channels.json");
		fs::write(
			&channels,
			json!([{ "sender": 1000, "recipient": 2000, "maxCapacity": 8, "maxMessageSize": 1024 }]).to_string(),
		)
		.unwrap();

		run(cli(&path, &["add-hrmp", "--channels", channels.to_str().unwrap()])).unwrap();

		let spec = ChainSpecFile::new(&path).load().unwrap();
		assert_eq!(
			spec.as_value()["genesis"]["runtime"]["hrmp"]["preopenHrmpChannels"],
			json!([[1000, 2000, 8, 1024]])
		);
	}

	#[test]
	fn missing_registry_fails_the_run() {
		let dir = tempfile::tempdir().unwrap();
		let path = spec_in(&dir);
		let head = dir.path().join("head");
		fs::write(&head, "0x00").unwrap();
		let head = head.to_str().unwrap();

		let result = run(cli(&path, &["add-para", "--id", "2000", "--head", head, "--wasm", head]));

		assert!(result.is_err());
		assert_eq!(fs::read_to_string(&path).unwrap(), SPEC);
	}

	#[test]
	fn missing_nodes_file_is_reported() {
		let dir = tempfile::tempdir().unwrap();
		let path = spec_in(&dir);

		let error = run(cli(&path, &["add-balances", "--nodes", "/nonexistent/nodes.json"])).unwrap_err();

		assert!(format!("{error:#}").contains("reading nodes"), "{error:#}");
	}
}
