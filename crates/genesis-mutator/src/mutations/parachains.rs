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

//! Relay chain registrations: genesis parachains and pre-opened HRMP
//! channels, plus the parachain id of a parachain spec.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
	codec::ChainSpec,
	locator::{self, Registry},
	payload::PayloadSource,
	report::{Report, Warning},
	Error,
};

/// Top-level fields a parachain spec stores its id in, by priority.
const PARA_ID_FIELDS: &[&str] = &["para_id", "paraId"];

/// A channel opened at genesis from `sender` to `recipient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrmpChannel {
	pub sender: u32,
	pub recipient: u32,
	pub max_capacity: u32,
	pub max_message_size: u32,
}

impl HrmpChannel {
	pub fn to_value(&self) -> Value {
		json!([self.sender, self.recipient, self.max_capacity, self.max_message_size])
	}
}

/// Registers a parachain (or parathread, if `parachain` is false) at genesis.
///
/// # Errors
/// Fails if a payload cannot be loaded or if the relay runtime has no
/// parachain registry.
pub fn add_para_to_genesis<H, W>(
	spec: &mut ChainSpec,
	para_id: u32,
	head: &H,
	wasm: &W,
	parachain: bool,
) -> Result<Report, Error>
where
	H: PayloadSource + ?Sized,
	W: PayloadSource + ?Sized,
{
	let head = head.load()?;
	let wasm = wasm.load()?;
	let paras = locator::runtime_config_mut(spec)
		.and_then(|runtime| locator::registry_mut(runtime, Registry::Paras))
		.ok_or(Error::RegistryAbsent(Registry::Paras))?;

	paras.push(json!([para_id, [head.to_value(), wasm.to_value(), parachain]]));

	let mut report = Report::new();
	report.applied(format!("added para {para_id} to the relay chain genesis"));
	Ok(report)
}

/// Pre-opens `channels` in the relay chain genesis.
///
/// # Errors
/// Fails if the relay runtime has no HRMP registry; no channel is added then.
pub fn add_hrmp_channels(spec: &mut ChainSpec, channels: &[HrmpChannel]) -> Result<Report, Error> {
	let registry = locator::runtime_config_mut(spec)
		.and_then(|runtime| locator::registry_mut(runtime, Registry::Hrmp))
		.ok_or(Error::RegistryAbsent(Registry::Hrmp))?;

	let mut report = Report::new();
	for channel in channels {
		registry.push(channel.to_value());
		report.applied(format!(
			"added HRMP channel {} -> {}",
			channel.sender, channel.recipient
		));
	}
	Ok(report)
}

/// The parachain id a parachain spec declares at its top level.
pub fn para_id(spec: &ChainSpec) -> Option<u32> {
	PARA_ID_FIELDS
		.iter()
		.find_map(|field| spec.as_value().get(field))
		.and_then(Value::as_u64)
		.and_then(|id| u32::try_from(id).ok())
}

/// Rewrites the parachain id in every place a parachain spec carries it: the
/// top-level id field and `parachainInfo.parachainId`.
pub fn set_para_id(spec: &mut ChainSpec, para_id: u32) -> Report {
	let mut report = Report::new();

	if let Some(document) = spec.as_value_mut().as_object_mut() {
		for field in PARA_ID_FIELDS {
			if let Some(value) = document.get_mut(*field) {
				*value = json!(para_id);
				report.applied(format!("set `{field}` to {para_id}"));
			}
		}
	}

	match locator::runtime_config_mut(spec).and_then(|runtime| locator::section_mut(runtime, "parachainInfo")) {
		Some(info) => {
			info.insert("parachainId".into(), json!(para_id));
			report.applied(format!("set `parachainInfo.parachainId` to {para_id}"));
		},
		None if report.is_modified() => {},
		None => report.warn(Warning::SectionAbsent("parachainInfo")),
	}

	report
}
