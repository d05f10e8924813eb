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

use hex_literal::hex;
use serde_json::json;

use crate::{
	locator::Registry,
	mock::*,
	mutations::{add_hrmp_channels, add_para_to_genesis, para_id, set_para_id},
	Error, HrmpChannel, Payload, Warning,
};

const GENESIS_HEAD: [u8; 4] = hex!("00c0ffee");

fn channel(sender: u32, recipient: u32) -> HrmpChannel {
	HrmpChannel {
		sender,
		recipient,
		max_capacity: 8,
		max_message_size: 1024,
	}
}

// #############################################################################
// add_para_to_genesis

#[test]
fn test_add_para_to_genesis() {
	let mut spec = relay_chain_spec();
	let head = Payload::from(GENESIS_HEAD.to_vec());
	let wasm = Payload::Hex("0061736d".into());

	let report = add_para_to_genesis(&mut spec, 2000, &head, &wasm, true).unwrap();

	assert!(report.is_modified());
	assert_eq!(
		runtime(&spec)["paras"]["paras"],
		json!([[2000, ["0x00c0ffee", "0x0061736d", true]]])
	);
}

#[test]
fn test_add_parathread_to_legacy_registry() {
	let mut spec = SpecBuilder::default()
		.with_section("parachainsParas", json!({ "paras": [] }))
		.build();
	let head = Payload::Hex("0x00".into());

	add_para_to_genesis(&mut spec, 3000, &head, &head, false).unwrap();

	assert_eq!(
		runtime(&spec)["parachainsParas"]["paras"],
		json!([[3000, ["0x00", "0x00", false]]])
	);
}

#[test]
fn test_add_para_without_registry_fails() {
	let mut spec = parachain_spec();
	let before = spec.clone();
	let head = Payload::Hex("0x00".into());

	let result = add_para_to_genesis(&mut spec, 2000, &head, &head, true);

	assert!(matches!(result, Err(Error::RegistryAbsent(Registry::Paras))));
	assert_eq!(spec, before);
}

// #############################################################################
// add_hrmp_channels

#[test]
fn test_add_hrmp_channels() {
	let mut spec = relay_chain_spec();

	let report = add_hrmp_channels(&mut spec, &[channel(1000, 2000)]).unwrap();

	assert!(report.is_modified());
	assert_eq!(runtime(&spec)["hrmp"]["preopenHrmpChannels"], json!([[1000, 2000, 8, 1024]]));
}

#[test]
fn test_add_hrmp_channels_in_order_to_legacy_registry() {
	let mut spec = SpecBuilder::default()
		.with_section("parachainsHrmp", json!({ "preopenHrmpChannels": [] }))
		.build();

	add_hrmp_channels(&mut spec, &[channel(1000, 2000), channel(2000, 1000)]).unwrap();

	assert_eq!(
		runtime(&spec)["parachainsHrmp"]["preopenHrmpChannels"],
		json!([[1000, 2000, 8, 1024], [2000, 1000, 8, 1024]])
	);
}

#[test]
fn test_add_hrmp_channels_without_registry_fails() {
	let mut spec = parachain_spec();
	let before = spec.clone();

	let result = add_hrmp_channels(&mut spec, &[channel(1000, 2000)]);

	assert!(matches!(result, Err(Error::RegistryAbsent(Registry::Hrmp))));
	assert_eq!(spec, before);
}

#[test]
fn test_hrmp_channel_deserializes_from_camel_case() {
	let parsed: HrmpChannel = serde_json::from_value(json!({
		"sender": 1000,
		"recipient": 2000,
		"maxCapacity": 8,
		"maxMessageSize": 1024
	}))
	.unwrap();

	assert_eq!(parsed, channel(1000, 2000));
}

// #############################################################################
// para id

#[test]
fn test_para_id() {
	assert_eq!(para_id(&parachain_spec()), Some(1000));
	assert_eq!(para_id(&relay_chain_spec()), None);

	let legacy = SpecBuilder::default().with_top("paraId", json!(2000)).build();
	assert_eq!(para_id(&legacy), Some(2000));
}

#[test]
fn test_set_para_id_updates_every_occurrence() {
	let mut spec = parachain_spec();

	let report = set_para_id(&mut spec, 2001);

	assert!(report.is_modified());
	assert_eq!(para_id(&spec), Some(2001));
	assert_eq!(runtime(&spec)["parachainInfo"]["parachainId"], json!(2001));
}

#[test]
fn test_set_para_id_on_relay_chain_is_a_noop() {
	let mut spec = relay_chain_spec();
	let before = spec.clone();

	let report = set_para_id(&mut spec, 2001);

	assert_eq!(report.warnings().collect::<Vec<_>>(), [&Warning::SectionAbsent("parachainInfo")]);
	assert_eq!(spec, before);
}
