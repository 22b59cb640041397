// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use mibkit_type::{Error, Result};
use serde::{Deserialize, Serialize};

/// A SET phase, numbered as the AgentX PDU types that request it.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
	TestSet = 8,
	Commit = 9,
	Undo = 10,
	Cleanup = 11,
}

impl Phase {
	pub fn from_code(code: u8) -> Result<Self> {
		match code {
			8 => Ok(Phase::TestSet),
			9 => Ok(Phase::Commit),
			10 => Ok(Phase::Undo),
			11 => Ok(Phase::Cleanup),
			code => Err(Error::UnknownPhase {
				code,
			}),
		}
	}

	pub fn code(&self) -> u8 {
		*self as u8
	}
}

impl Display for Phase {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Phase::TestSet => f.write_str("TEST_SET"),
			Phase::Commit => f.write_str("COMMIT"),
			Phase::Undo => f.write_str("UNDO"),
			Phase::Cleanup => f.write_str("CLEANUP"),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberState {
	Proposed,
	Tested,
	Committed,
	Undone,
	Cleaned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchState {
	/// Created; TEST_SET has not run yet.
	Testing,
	AllTested,
	TestFailed,
	Committing,
	AllCommitted,
	CommitFailed,
	Cleaning,
	Unwinding,
	Done,
}

impl Display for BatchState {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			BatchState::Testing => "TESTING",
			BatchState::AllTested => "ALL_TESTED",
			BatchState::TestFailed => "TEST_FAILED",
			BatchState::Committing => "COMMITTING",
			BatchState::AllCommitted => "ALL_COMMITTED",
			BatchState::CommitFailed => "COMMIT_FAILED",
			BatchState::Cleaning => "CLEANING",
			BatchState::Unwinding => "UNWINDING",
			BatchState::Done => "DONE",
		};
		f.write_str(name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_phase_codes() {
		for phase in [Phase::TestSet, Phase::Commit, Phase::Undo, Phase::Cleanup] {
			assert_eq!(Phase::from_code(phase.code()).unwrap(), phase);
		}
		assert_eq!(
			Phase::from_code(12),
			Err(Error::UnknownPhase {
				code: 12
			})
		);
	}
}
