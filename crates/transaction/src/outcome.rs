// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use mibkit_type::{Error, Outcome};

use crate::MemberState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberOutcome {
	pub position: usize,
	pub state: MemberState,
	pub outcome: Outcome,
	pub error: Option<Error>,
}

/// What a phase reports back to the transport: the aggregate outcome and,
/// for member failures, the 0-based position of the offending write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOutcome {
	pub outcome: Outcome,
	pub failed: Option<usize>,
	pub error: Option<Error>,
	pub members: Vec<MemberOutcome>,
}

impl BatchOutcome {
	pub fn is_ok(&self) -> bool {
		self.outcome.is_ok()
	}

	/// AgentX error index: 1-based, 0 when no single member is to blame.
	pub fn error_index(&self) -> u16 {
		self.failed.map_or(0, |position| u16::try_from(position + 1).unwrap_or(u16::MAX))
	}

	/// Members that failed, in batch order.
	pub fn failures(&self) -> impl Iterator<Item = &MemberOutcome> {
		self.members.iter().filter(|member| member.error.is_some())
	}
}
