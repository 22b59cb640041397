// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	Outcome,
	value::{Oid, RowIndex, Type},
};

/// Every failure the agent core can report.
///
/// Variants fall into three classes. Validation errors are raised only
/// while testing a write and abort the batch before anything is mutated.
/// Resource errors come from lock contention or allocation limits and may
/// surface while testing or while committing. Protocol errors cover phases
/// requested out of order or with an unknown code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("wrong type for {column}: expected {expected}, got {actual}")]
	WrongType {
		column: String,
		expected: Type,
		actual: Type,
	},

	#[error("wrong length for {column}: {len} bytes is outside {min}..={max}")]
	WrongLength {
		column: String,
		len: usize,
		min: usize,
		max: usize,
	},

	#[error("{column} is not writable")]
	NotWritable {
		column: String,
	},

	#[error("inconsistent value for {column}: {reason}")]
	InconsistentValue {
		column: String,
		reason: String,
	},

	#[error("row {index} does not exist and {column} cannot create it")]
	NoCreation {
		column: String,
		index: RowIndex,
	},

	#[error("resource unavailable: {reason}")]
	ResourceUnavailable {
		reason: String,
	},

	#[error("row {index} is busy in another transaction")]
	RowBusy {
		index: RowIndex,
	},

	#[error("index {index} already exists")]
	IndexExists {
		index: RowIndex,
	},

	#[error("row {index} is enrolled in an open transaction")]
	RowEnrolled {
		index: RowIndex,
	},

	#[error("row {index} not found")]
	RowNotFound {
		index: RowIndex,
	},

	#[error("attribute {attribute} is not present on this row")]
	AttributeMissing {
		attribute: String,
	},

	#[error("no such object: {address}")]
	NoSuchObject {
		address: Oid,
	},

	#[error("malformed index: {reason}")]
	MalformedIndex {
		reason: String,
	},

	#[error("invalid object identifier: {input}")]
	InvalidOid {
		input: String,
	},

	#[error("unknown phase code {code}")]
	UnknownPhase {
		code: u8,
	},

	#[error("phase {phase} requested while batch is {state}")]
	PhaseOutOfSequence {
		phase: String,
		state: String,
	},

	#[error("internal error: {0}")]
	Internal(String),
}

impl Error {
	/// The outcome code reported to the requesting manager for this error.
	pub fn outcome(&self) -> Outcome {
		match self {
			Error::WrongType {
				..
			} => Outcome::WrongType,
			Error::WrongLength {
				..
			} => Outcome::WrongLength,
			Error::NotWritable {
				..
			}
			| Error::NoSuchObject {
				..
			} => Outcome::NotWritable,
			Error::InconsistentValue {
				..
			} => Outcome::InconsistentValue,
			Error::NoCreation {
				..
			} => Outcome::NoCreation,
			Error::ResourceUnavailable {
				..
			}
			| Error::RowBusy {
				..
			}
			| Error::IndexExists {
				..
			}
			| Error::RowEnrolled {
				..
			} => Outcome::ResourceUnavailable,
			Error::RowNotFound {
				..
			}
			| Error::AttributeMissing {
				..
			}
			| Error::MalformedIndex {
				..
			}
			| Error::InvalidOid {
				..
			}
			| Error::UnknownPhase {
				..
			}
			| Error::PhaseOutOfSequence {
				..
			}
			| Error::Internal(_) => Outcome::ProcessingError,
		}
	}

	/// Validation errors never reach the commit phase.
	pub fn is_validation(&self) -> bool {
		matches!(
			self.outcome(),
			Outcome::WrongType
				| Outcome::WrongLength
				| Outcome::NotWritable
				| Outcome::InconsistentValue
				| Outcome::NoCreation
		)
	}

	pub fn is_protocol(&self) -> bool {
		matches!(
			self,
			Error::UnknownPhase {
				..
			} | Error::PhaseOutOfSequence {
				..
			}
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_outcome_mapping() {
		let err = Error::RowBusy {
			index: RowIndex::from([1]),
		};
		assert_eq!(err.outcome(), Outcome::ResourceUnavailable);
		assert!(!err.is_validation());

		let err = Error::WrongType {
			column: "status".to_string(),
			expected: Type::Integer,
			actual: Type::OctetString,
		};
		assert_eq!(err.outcome(), Outcome::WrongType);
		assert!(err.is_validation());

		let err = Error::UnknownPhase {
			code: 42,
		};
		assert_eq!(err.outcome(), Outcome::ProcessingError);
		assert!(err.is_protocol());
	}

	#[test]
	fn test_display() {
		let err = Error::NoCreation {
			column: "netConfigIPAddress".to_string(),
			index: RowIndex::from([7]),
		};
		assert_eq!(err.to_string(), "row [7] does not exist and netConfigIPAddress cannot create it");
	}
}
