// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Per-member and per-batch result codes surfaced to the requesting manager.
///
/// Discriminants are the SNMP/AgentX error-status values.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
	NoError = 0,
	WrongType = 7,
	WrongLength = 8,
	NoCreation = 11,
	InconsistentValue = 12,
	ResourceUnavailable = 13,
	NotWritable = 17,
	ProcessingError = 268,
}

impl Outcome {
	pub fn code(&self) -> u16 {
		*self as u16
	}

	pub fn is_ok(&self) -> bool {
		matches!(self, Outcome::NoError)
	}
}

impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Outcome::NoError => f.write_str("noError"),
			Outcome::WrongType => f.write_str("wrongType"),
			Outcome::WrongLength => f.write_str("wrongLength"),
			Outcome::NoCreation => f.write_str("noCreation"),
			Outcome::InconsistentValue => f.write_str("inconsistentValue"),
			Outcome::ResourceUnavailable => f.write_str("resourceUnavailable"),
			Outcome::NotWritable => f.write_str("notWritable"),
			Outcome::ProcessingError => f.write_str("processingError"),
		}
	}
}
