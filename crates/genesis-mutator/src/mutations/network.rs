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

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::{
	codec::ChainSpec,
	merge::merge,
	report::{Report, Warning},
};

/// Replaces the boot nodes of the spec with `addresses`, dropping duplicates.
pub fn add_boot_nodes(spec: &mut ChainSpec, addresses: &[String]) -> Report {
	let Some(document) = spec.as_value_mut().as_object_mut() else {
		return Report::skipped(Warning::SectionAbsent("bootNodes"));
	};

	let mut seen = HashSet::new();
	let boot_nodes: Vec<Value> = addresses
		.iter()
		.filter(|address| seen.insert(address.as_str()))
		.map(|address| Value::String(address.clone()))
		.collect();
	let count = boot_nodes.len();
	document.insert("bootNodes".into(), Value::Array(boot_nodes));

	let mut report = Report::new();
	match count {
		0 => report.applied("cleared `bootNodes`"),
		count => report.applied(format!("set {count} boot node(s)")),
	}
	report
}

/// Overrides existing values of the `genesis` section with `updates`.
///
/// Keys the genesis does not contain are reported, as JSON pointers into the
/// document, and skipped.
pub fn change_genesis_config(spec: &mut ChainSpec, updates: &Map<String, Value>) -> Report {
	let mut scratch = Map::new();
	let genesis = spec.genesis_mut().unwrap_or(&mut scratch);
	let outcome = merge(updates, genesis);

	let mut report = Report::new();
	for path in outcome.applied {
		report.applied(format!("overrode `/genesis{path}`"));
	}
	for path in outcome.mismatched {
		report.warn(Warning::OverrideKeyMismatch(format!("/genesis{path}")));
	}
	report
}
