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

//! Sparse overrides of existing genesis values.
//!
//! An override can change any value of the genesis but never introduce a
//! key: updates addressing a key that does not exist are dropped and reported
//! back, while their siblings still apply. Objects are merged recursively,
//! everything else (arrays included) is replaced as a whole.

use serde_json::{Map, Value};

/// Key paths touched by a [`merge`], as JSON pointers relative to the target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
	pub applied: Vec<String>,
	pub mismatched: Vec<String>,
}

pub fn merge(updates: &Map<String, Value>, target: &mut Map<String, Value>) -> MergeOutcome {
	let mut outcome = MergeOutcome::default();
	merge_at(updates, target, "", &mut outcome);
	outcome
}

/// Appends `key` to the JSON pointer `prefix` (RFC 6901 escaping).
fn pointer(prefix: &str, key: &str) -> String {
	format!("{prefix}/{}", key.replace('~', "~0").replace('/', "~1"))
}

fn merge_at(updates: &Map<String, Value>, target: &mut Map<String, Value>, prefix: &str, outcome: &mut MergeOutcome) {
	for (key, update) in updates {
		let path = pointer(prefix, key);

		match (target.get_mut(key), update) {
			(None, _) => outcome.mismatched.push(path),
			(Some(Value::Object(existing)), Value::Object(nested)) => merge_at(nested, existing, &path, outcome),
			// Merging an object into a scalar or array would create keys.
			(Some(_), Value::Object(nested)) => outcome
				.mismatched
				.extend(nested.keys().map(|nested_key| pointer(&path, nested_key))),
			(Some(existing), _) => {
				*existing = update.clone();
				outcome.applied.push(path);
			},
		}
	}
}
