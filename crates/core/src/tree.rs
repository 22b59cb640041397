// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::BTreeMap, sync::Arc};

use mibkit_type::{Error, Oid, Result, RowIndex, Value};
use parking_lot::RwLock;
use tracing::{debug, instrument};

use crate::{notification::VarBind, schema::ColumnDef, table::Table, write::PendingWrite};

/// A variable address split into its table, column and row key.
#[derive(Clone, Debug)]
pub struct Target {
	pub table: Arc<Table>,
	pub column: String,
	pub index: RowIndex,
}

/// Registry of the tables an agent serves, keyed by entry OID. Resolves the
/// full variable addresses a transport hands in.
#[derive(Default)]
pub struct MibTree {
	tables: RwLock<BTreeMap<Oid, Arc<Table>>>,
}

impl MibTree {
	pub fn new() -> Self {
		Self::default()
	}

	#[instrument(name = "tree::register", level = "debug", skip_all, fields(table = %table.name()))]
	pub fn register(&self, table: Arc<Table>) -> Result<()> {
		let entry = table.schema().entry().clone();
		let mut tables = self.tables.write();
		if let Some(existing) = tables.keys().find(|other| other.starts_with(&entry) || entry.starts_with(other)) {
			return Err(Error::Internal(format!("{entry} overlaps registered subtree {existing}")));
		}
		debug!(entry = %entry, "table registered");
		tables.insert(entry, table);
		Ok(())
	}

	pub fn table(&self, entry: &Oid) -> Option<Arc<Table>> {
		self.tables.read().get(entry).cloned()
	}

	pub fn table_by_name(&self, name: &str) -> Option<Arc<Table>> {
		self.tables.read().values().find(|table| table.name() == name).cloned()
	}

	/// Splits `address` into table, column and row key. The row need not
	/// exist; the column must.
	pub fn resolve(&self, address: &Oid) -> Result<Target> {
		let no_such_object = || Error::NoSuchObject {
			address: address.clone(),
		};

		let table = {
			let tables = self.tables.read();
			tables.iter()
				.rev()
				.find(|(entry, _)| address.starts_with(entry))
				.map(|(_, table)| table.clone())
				.ok_or_else(no_such_object)?
		};

		let rest = &address[table.schema().entry().len()..];
		let (column_id, index) = rest.split_first().ok_or_else(no_such_object)?;
		let column = table.schema().column_by_id(*column_id).ok_or_else(no_such_object)?.name().to_string();
		Ok(Target {
			table,
			column,
			index: RowIndex::from(index),
		})
	}

	/// Turns a SET varbind into a write for the coordinator. Whether the row
	/// exists is decided at TEST_SET.
	pub fn resolve_set(&self, address: &Oid, value: Value) -> Result<PendingWrite> {
		let target = self.resolve(address)?;
		Ok(PendingWrite {
			table: target.table,
			index: target.index,
			column: target.column,
			value,
		})
	}

	/// Committed value at `address`.
	pub fn get(&self, address: &Oid) -> Result<VarBind> {
		let target = self.resolve(address)?;
		let no_such_object = || Error::NoSuchObject {
			address: address.clone(),
		};

		let readable = target.table.schema().column(&target.column).is_some_and(|c| c.get_access().is_readable());
		if !readable {
			return Err(no_such_object());
		}
		let row = target.table.lookup(&target.index).ok_or_else(no_such_object)?;
		let value = row.committed(&target.column).ok_or_else(no_such_object)?;
		Ok(VarBind::new(address.clone(), value))
	}

	/// The first readable instance strictly after `address`, walking tables
	/// in OID order, each column by column and each column row by row.
	/// `None` is end of view.
	pub fn get_next(&self, address: &Oid) -> Option<VarBind> {
		let tables: Vec<Arc<Table>> = self.tables.read().values().cloned().collect();

		for table in tables {
			let schema = table.schema();
			let entry = schema.entry();

			let (from_column, after) = if address.starts_with(entry) {
				let rest = &address[entry.len()..];
				match rest.split_first() {
					Some((column, index)) => (*column, Some(RowIndex::from(index))),
					None => (0, None),
				}
			} else if address < entry {
				(0, None)
			} else {
				continue;
			};

			for column in schema.columns().iter().filter(|c| c.get_access().is_readable()) {
				let row = match &after {
					Some(index) if column.id() == from_column => table.successor(index),
					_ if column.id() > from_column => table.first(),
					_ => continue,
				};
				if let Some(row) = row {
					if let Some(varbind) = instance(&table, column, &row) {
						return Some(varbind);
					}
				}
			}
		}
		None
	}
}

fn instance(table: &Table, column: &ColumnDef, row: &crate::row::Row) -> Option<VarBind> {
	let value = row.committed(column.name())?;
	Some(VarBind::new(row.index().instance_of(&table.schema().column_oid(column)), value))
}

impl std::fmt::Debug for MibTree {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MibTree").field("tables", &self.tables.read().keys().collect::<Vec<_>>()).finish()
	}
}
