// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use mibkit_core::{ColumnDef, Error, IndexPart, Table, TableSchema, Type};

use crate::FaultInjector;

pub const HOST_CONTROL_ENTRY: [u32; 10] = [1, 3, 6, 1, 2, 1, 16, 4, 1, 1];

/// A RowStatus-governed control table in the style of `hostControlEntry`.
/// The data source may only change while the row is not active.
pub fn host_control(max_rows: usize, faults: &FaultInjector) -> Arc<Table> {
	let schema = TableSchema::builder("hostControlEntry", HOST_CONTROL_ENTRY)
		.index([IndexPart::Integer])
		.column(
			ColumnDef::new(2, "hostControlDataSource", Type::ObjectIdentifier)
				.read_create()
				.check(|_, current, _| match current.get("hostControlStatus") {
					Some(status) if status.as_i64() == Some(1) => Err(Error::InconsistentValue {
						column: "hostControlDataSource".to_string(),
						reason: "row is active".to_string(),
					}),
					_ => Ok(()),
				})
				.on_apply(faults.hook()),
		)
		.column(ColumnDef::new(3, "hostControlTableSize", Type::Integer))
		.column(
			ColumnDef::new(5, "hostControlOwner", Type::OctetString)
				.read_create()
				.size(0, 127)
				.on_apply(faults.hook()),
		)
		.column(ColumnDef::row_status(6, "hostControlStatus").on_apply(faults.hook()))
		.max_rows(max_rows)
		.build();

	match schema {
		Ok(schema) => Arc::new(Table::new(schema)),
		Err(err) => panic!("hostControlEntry fixture: {err}"),
	}
}
