// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use mibkit_core::{ColumnDef, IndexPart, Table, TableSchema, Type};

use crate::FaultInjector;

pub const NET_CONFIG_ENTRY: [u32; 10] = [1, 3, 6, 1, 2, 1, 16, 19, 11, 1];

/// `netConfigEntry`: one writable IPv4 address and mask per interface, plus a
/// status bounded to 1..=10. Every writable column commits through `faults`.
pub fn net_config(faults: &FaultInjector) -> Arc<Table> {
	let schema = TableSchema::builder("netConfigEntry", NET_CONFIG_ENTRY)
		.index([IndexPart::Integer])
		.column(
			ColumnDef::new(1, "netConfigIPAddress", Type::OctetString)
				.read_write()
				.size(4, 4)
				.on_apply(faults.hook()),
		)
		.column(
			ColumnDef::new(2, "netConfigSubnetMask", Type::OctetString)
				.read_write()
				.size(4, 4)
				.on_apply(faults.hook()),
		)
		.column(ColumnDef::new(3, "netConfigStatus", Type::Integer).read_write().range(1, 10).on_apply(faults.hook()))
		.build();

	match schema {
		Ok(schema) => Arc::new(Table::new(schema)),
		Err(err) => panic!("netConfigEntry fixture: {err}"),
	}
}
