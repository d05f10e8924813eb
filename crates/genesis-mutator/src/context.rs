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

/// Balance type of the Substrate runtimes whose genesis is being edited.
pub type Balance = u128;

/// Bond used for staking entries as long as no bond was captured from the
/// spec itself.
pub const FALLBACK_STAKING_BOND: Balance = 1_000_000_000_000;

/// Run-scoped state shared by all mutations of one orchestration run.
///
/// Construct one per run and pass it to every operation. The default bond is
/// captured once by [`crate::mutations::authorities::clear_authorities`] and
/// is never replaced afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationContext {
	default_bond: Option<Balance>,
	fallback_bond: Balance,
}

impl Default for MutationContext {
	fn default() -> Self {
		Self {
			default_bond: None,
			fallback_bond: FALLBACK_STAKING_BOND,
		}
	}
}

impl MutationContext {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts a run with an already known default bond, e.g. one captured by
	/// a previous process.
	pub fn with_default_bond(bond: Balance) -> Self {
		Self {
			default_bond: Some(bond),
			..Self::default()
		}
	}

	pub fn with_fallback_bond(mut self, bond: Balance) -> Self {
		self.fallback_bond = bond;
		self
	}

	pub fn default_bond(&self) -> Option<Balance> {
		self.default_bond
	}

	/// Records `bond` as the default bond unless one was captured already.
	/// Returns whether the value was taken.
	pub fn capture_default_bond(&mut self, bond: Balance) -> bool {
		if self.default_bond.is_some() {
			return false;
		}
		self.default_bond = Some(bond);
		true
	}

	/// The bond new staking entries are created with.
	pub fn staking_bond(&self) -> Balance {
		self.default_bond.unwrap_or(self.fallback_bond)
	}

	/// The balance endowed to accounts that have to be able to bond.
	pub fn endowment(&self) -> Balance {
		self.staking_bond().saturating_add(1)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_bond_is_captured_only_once() {
		let mut context = MutationContext::new();
		assert_eq!(context.staking_bond(), FALLBACK_STAKING_BOND);

		assert!(context.capture_default_bond(500));
		assert!(!context.capture_default_bond(700));

		assert_eq!(context.default_bond(), Some(500));
		assert_eq!(context.endowment(), 501);
	}

	#[test]
	fn fallback_bond_is_configurable() {
		let context = MutationContext::new().with_fallback_bond(42);

		assert_eq!(context.default_bond(), None);
		assert_eq!(context.staking_bond(), 42);
		assert_eq!(context.endowment(), 43);
	}
}
