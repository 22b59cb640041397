// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use mibkit_core::{ColumnDef, IndexPart, Table, TableSchema, Type};

pub const AL_MATRIX_DS_ENTRY: [u32; 10] = [1, 3, 6, 1, 2, 1, 16, 17, 2, 1];

/// `alMatrixDSEntry`: control index, time mark, protocol index, then the
/// destination and source network addresses as length-prefixed strings.
pub fn al_matrix_ds() -> Arc<Table> {
	let schema = TableSchema::builder("alMatrixDSEntry", AL_MATRIX_DS_ENTRY)
		.index([IndexPart::Integer, IndexPart::Integer, IndexPart::Integer, IndexPart::Octets, IndexPart::Octets])
		.column(ColumnDef::new(1, "alMatrixDSPkts", Type::Gauge32))
		.column(ColumnDef::new(2, "alMatrixDSOctets", Type::Gauge32))
		.column(ColumnDef::new(3, "alMatrixDSCreateTime", Type::TimeTicks))
		.build();

	match schema {
		Ok(schema) => Arc::new(Table::new(schema)),
		Err(err) => panic!("alMatrixDSEntry fixture: {err}"),
	}
}
