// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use mibkit_type::{RowIndex, Value};

use crate::{schema::ColumnDef, table::Table};

/// One requested write: `column` of the row at `index` in `table` becomes
/// `value`. The row is resolved at TEST_SET and may not exist yet.
#[derive(Clone, Debug)]
pub struct PendingWrite {
	pub table: Arc<Table>,
	pub index: RowIndex,
	pub column: String,
	pub value: Value,
}

impl PendingWrite {
	pub fn new(table: Arc<Table>, index: impl Into<RowIndex>, column: impl Into<String>, value: Value) -> Self {
		Self {
			table,
			index: index.into(),
			column: column.into(),
			value,
		}
	}

	pub fn column_def(&self) -> Option<&ColumnDef> {
		self.table.schema().column(&self.column)
	}
}

impl std::fmt::Display for PendingWrite {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}{} = {}", self.table.name(), self.column, self.index, self.value)
	}
}
