// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use mibkit_core::{Access, ColumnDef, IndexPart, NotificationType, Table, TableSchema, Type, Value};

pub const RP_JACK_ENTRY: [u32; 10] = [1, 3, 6, 1, 2, 1, 26, 1, 3, 1];
pub const IF_MAU_ENTRY: [u32; 10] = [1, 3, 6, 1, 2, 1, 26, 2, 1, 1];
pub const IF_MAU_JABBER_TRAP: [u32; 9] = [1, 3, 6, 1, 2, 1, 26, 0, 2];

/// `rpJackEntry`, keyed by group, port, MAU and jack number.
pub fn rp_jack() -> Arc<Table> {
	let schema = TableSchema::builder("rpJackEntry", RP_JACK_ENTRY)
		.index([IndexPart::Integer; 4])
		.column(ColumnDef::new(1, "rpJackIndex", Type::Integer).access(Access::NotAccessible))
		.column(ColumnDef::new(2, "rpJackType", Type::Integer).default_value(Value::Integer(1)))
		.build();

	match schema {
		Ok(schema) => Arc::new(Table::new(schema)),
		Err(err) => panic!("rpJackEntry fixture: {err}"),
	}
}

/// `ifMauEntry`, keyed by interface and MAU number.
pub fn if_mau() -> Arc<Table> {
	let schema = TableSchema::builder("ifMauEntry", IF_MAU_ENTRY)
		.index([IndexPart::Integer; 2])
		.column(ColumnDef::new(1, "ifMauIfIndex", Type::Integer))
		.column(ColumnDef::new(2, "ifMauIndex", Type::Integer))
		.column(ColumnDef::new(3, "ifMauType", Type::ObjectIdentifier))
		.column(ColumnDef::new(4, "ifMauStatus", Type::Enumerated).read_write().enumeration([1, 2, 3, 4, 5, 6]))
		.column(ColumnDef::new(7, "ifMauJabberState", Type::Enumerated).enumeration([1, 2, 3, 4]))
		.column(ColumnDef::new(8, "ifMauJabberingStateEnters", Type::Counter32))
		.build();

	match schema {
		Ok(schema) => Arc::new(Table::new(schema)),
		Err(err) => panic!("ifMauEntry fixture: {err}"),
	}
}

/// `ifMauJabberTrap`, carrying the jabber state of one `ifMauEntry` row.
pub fn jabber_trap() -> NotificationType {
	NotificationType::new("ifMauJabberTrap", IF_MAU_JABBER_TRAP).object(0, "ifMauJabberState")
}
