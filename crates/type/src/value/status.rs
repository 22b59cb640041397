// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The SMIv2 RowStatus textual convention governing row creation and deletion.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowStatus {
	Active = 1,
	NotInService = 2,
	NotReady = 3,
	CreateAndGo = 4,
	CreateAndWait = 5,
	Destroy = 6,
}

impl RowStatus {
	/// Whether a manager writes this value to request a new row.
	pub fn is_create(&self) -> bool {
		matches!(self, RowStatus::CreateAndGo | RowStatus::CreateAndWait)
	}

	/// The state a row enters when created with this value.
	pub fn created_state(&self) -> Option<RowStatus> {
		match self {
			RowStatus::CreateAndGo => Some(RowStatus::Active),
			RowStatus::CreateAndWait => Some(RowStatus::NotInService),
			_ => None,
		}
	}
}

impl From<RowStatus> for i32 {
	fn from(status: RowStatus) -> Self {
		status as i32
	}
}

impl TryFrom<i32> for RowStatus {
	type Error = Error;

	fn try_from(value: i32) -> Result<Self, Self::Error> {
		match value {
			1 => Ok(RowStatus::Active),
			2 => Ok(RowStatus::NotInService),
			3 => Ok(RowStatus::NotReady),
			4 => Ok(RowStatus::CreateAndGo),
			5 => Ok(RowStatus::CreateAndWait),
			6 => Ok(RowStatus::Destroy),
			_ => Err(Error::InconsistentValue {
				column: "RowStatus".to_string(),
				reason: format!("{value} is not a RowStatus value"),
			}),
		}
	}
}

impl Display for RowStatus {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			RowStatus::Active => f.write_str("active"),
			RowStatus::NotInService => f.write_str("notInService"),
			RowStatus::NotReady => f.write_str("notReady"),
			RowStatus::CreateAndGo => f.write_str("createAndGo"),
			RowStatus::CreateAndWait => f.write_str("createAndWait"),
			RowStatus::Destroy => f.write_str("destroy"),
		}
	}
}
