// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use mibkit_core::{ColumnDef, PendingWrite, Row};
use mibkit_type::{Error, Value};

use crate::MemberState;

/// What CLEANUP of a successful batch does to the member's row besides
/// releasing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
	None,
	Publish,
	Destroy,
}

#[derive(Debug)]
pub(crate) struct Member {
	pub write: PendingWrite,
	pub state: MemberState,
	pub error: Option<Error>,
	/// Resolved at TEST_SET.
	pub row: Option<Arc<Row>>,
	pub column: Option<ColumnDef>,
	/// Value COMMIT stores; differs from the requested one for row creation.
	pub value: Option<Value>,
	pub effect: Effect,
	/// This member holds one enrollment on `row`.
	pub enrolled: bool,
	/// This member reserved `row` and owns removing it on abort.
	pub reserved: bool,
}

impl Member {
	pub fn new(write: PendingWrite) -> Self {
		Self {
			write,
			state: MemberState::Proposed,
			error: None,
			row: None,
			column: None,
			value: None,
			effect: Effect::None,
			enrolled: false,
			reserved: false,
		}
	}

	pub fn targets(&self, other: &PendingWrite) -> bool {
		Arc::ptr_eq(&self.write.table, &other.table) && self.write.index == other.index
	}
}
