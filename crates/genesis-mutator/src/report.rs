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

//! Outcome of a mutation and the sinks it is rendered to.

use std::fmt;

use crate::LOG_TARGET;

/// A condition that made (part of) an operation a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
	/// The runtime genesis config has no such section, e.g. a relay chain
	/// without `collatorSelection` or a raw spec without any runtime config.
	SectionAbsent(&'static str),
	/// An override addressed a key the genesis does not contain; the update
	/// for that key was dropped.
	OverrideKeyMismatch(String),
	/// The bond of the first staker is not an integer and was not captured.
	UnreadableBond(String),
	/// Nominators were requested but there are no validators to nominate.
	NoValidators,
}

impl fmt::Display for Warning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::SectionAbsent(section) => write!(f, "`{section}` not found in the runtime genesis config"),
			Self::OverrideKeyMismatch(path) => write!(f, "override key `{path}` does not exist in the genesis"),
			Self::UnreadableBond(bond) => write!(f, "staker bond `{bond}` is not an integer, default bond left unset"),
			Self::NoValidators => write!(f, "no validators to nominate, skipping nominators"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
	Applied(String),
	Skipped(Warning),
}

/// Everything an operation did to a document, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
	events: Vec<Event>,
}

impl Report {
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn skipped(warning: Warning) -> Self {
		Self {
			events: vec![Event::Skipped(warning)],
		}
	}

	pub(crate) fn applied(&mut self, message: impl Into<String>) {
		self.events.push(Event::Applied(message.into()));
	}

	pub(crate) fn warn(&mut self, warning: Warning) {
		self.events.push(Event::Skipped(warning));
	}

	pub fn extend(&mut self, other: Report) {
		self.events.extend(other.events);
	}

	pub fn events(&self) -> &[Event] {
		&self.events
	}

	/// Whether the document was changed, i.e. whether it has to be persisted.
	pub fn is_modified(&self) -> bool {
		self.events.iter().any(|event| matches!(event, Event::Applied(_)))
	}

	pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
		self.events.iter().filter_map(|event| match event {
			Event::Skipped(warning) => Some(warning),
			Event::Applied(_) => None,
		})
	}

	pub fn render<R: Reporter + ?Sized>(&self, reporter: &mut R) {
		for event in &self.events {
			match event {
				Event::Applied(message) => reporter.success(message),
				Event::Skipped(warning) => reporter.warning(&warning.to_string()),
			}
		}
	}
}

/// Receives human readable progress messages. Mutations never depend on what
/// a reporter does with them.
pub trait Reporter {
	fn success(&mut self, message: &str);
	fn warning(&mut self, message: &str);
}

/// Forwards reports to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
	fn success(&mut self, message: &str) {
		log::info!(target: LOG_TARGET, "{message}");
	}

	fn warning(&mut self, message: &str) {
		log::warn!(target: LOG_TARGET, "{message}");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Default)]
	struct Collect(Vec<String>);

	impl Reporter for Collect {
		fn success(&mut self, message: &str) {
			self.0.push(format!("ok: {message}"));
		}

		fn warning(&mut self, message: &str) {
			self.0.push(format!("warn: {message}"));
		}
	}

	#[test]
	fn report_renders_events_in_order() {
		let mut report = Report::new();
		report.applied("added 1 balance(s)");
		report.warn(Warning::SectionAbsent("staking"));

		let mut sink = Collect::default();
		report.render(&mut sink);

		assert!(report.is_modified());
		assert_eq!(
			sink.0,
			[
				"ok: added 1 balance(s)",
				"warn: `staking` not found in the runtime genesis config"
			]
		);
	}

	#[test]
	fn report_with_only_warnings_is_unmodified() {
		let report = Report::skipped(Warning::NoValidators);

		assert!(!report.is_modified());
		assert_eq!(report.warnings().collect::<Vec<_>>(), [&Warning::NoValidators]);
	}
}
