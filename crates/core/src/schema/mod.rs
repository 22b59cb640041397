// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Table descriptors. A generated per-table row class becomes one
//! [`TableSchema`] value: the entry OID, the index layout and the columns.

mod column;

use std::collections::HashSet;

pub use column::{Access, ApplyFn, CheckFn, ColumnDef, Constraint};
use mibkit_type::{Error, Oid, Result};

use crate::{
	index::{IndexCodec, IndexPart},
	store::AttributeStore,
};

#[derive(Debug, Clone)]
pub struct TableSchema {
	name: String,
	entry: Oid,
	index: IndexCodec,
	columns: Vec<ColumnDef>,
	max_rows: Option<usize>,
}

impl TableSchema {
	pub fn builder(name: impl Into<String>, entry: impl Into<Oid>) -> TableSchemaBuilder {
		TableSchemaBuilder {
			name: name.into(),
			entry: entry.into(),
			index: Vec::new(),
			columns: Vec::new(),
			max_rows: None,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// OID of the conceptual row, e.g. `ifMauEntry`.
	pub fn entry(&self) -> &Oid {
		&self.entry
	}

	pub fn index(&self) -> &IndexCodec {
		&self.index
	}

	pub fn columns(&self) -> &[ColumnDef] {
		&self.columns
	}

	pub fn max_rows(&self) -> Option<usize> {
		self.max_rows
	}

	pub fn column(&self, name: &str) -> Option<&ColumnDef> {
		self.columns.iter().find(|c| c.name() == name)
	}

	pub fn column_by_id(&self, id: u32) -> Option<&ColumnDef> {
		self.columns.iter().find(|c| c.id() == id)
	}

	pub fn row_status_column(&self) -> Option<&ColumnDef> {
		self.columns.iter().find(|c| c.is_row_status())
	}

	/// OID of a column: the entry OID followed by the column id.
	pub fn column_oid(&self, column: &ColumnDef) -> Oid {
		self.entry.child(&[column.id()])
	}

	/// Attribute values of a freshly created row.
	pub fn defaults(&self) -> AttributeStore {
		let mut store = AttributeStore::new();
		for column in &self.columns {
			store.set(column.name(), column.initial().clone());
		}
		store
	}
}

pub struct TableSchemaBuilder {
	name: String,
	entry: Oid,
	index: Vec<IndexPart>,
	columns: Vec<ColumnDef>,
	max_rows: Option<usize>,
}

impl TableSchemaBuilder {
	pub fn index(mut self, parts: impl Into<Vec<IndexPart>>) -> Self {
		self.index = parts.into();
		self
	}

	pub fn column(mut self, column: ColumnDef) -> Self {
		self.columns.push(column);
		self
	}

	pub fn max_rows(mut self, max_rows: usize) -> Self {
		self.max_rows = Some(max_rows);
		self
	}

	pub fn build(self) -> Result<TableSchema> {
		let index = IndexCodec::new(self.index)?;

		{
			let mut names = HashSet::new();
			let mut ids = HashSet::new();
			for column in &self.columns {
				if !names.insert(column.name()) {
					return Err(Error::Internal(format!(
						"{}: duplicate column {}",
						self.name,
						column.name()
					)));
				}
				if column.id() == 0 || !ids.insert(column.id()) {
					return Err(Error::Internal(format!(
						"{}: invalid or duplicate column id {}",
						self.name,
						column.id()
					)));
				}
			}
		}
		if self.columns.iter().filter(|c| c.is_row_status()).count() > 1 {
			return Err(Error::Internal(format!("{}: more than one RowStatus column", self.name)));
		}

		let mut columns = self.columns;
		columns.sort_by_key(ColumnDef::id);

		Ok(TableSchema {
			name: self.name,
			entry: self.entry,
			index,
			columns,
			max_rows: self.max_rows,
		})
	}
}

#[cfg(test)]
mod tests {
	use mibkit_type::{Type, Value};

	use super::*;

	#[test]
	fn test_build_sorts_columns() {
		let schema = TableSchema::builder("netConfigEntry", [1, 3, 6, 1, 2, 1, 16, 19, 11, 1])
			.index([IndexPart::Integer])
			.column(ColumnDef::new(3, "netConfigStatus", Type::Integer).read_write())
			.column(ColumnDef::new(1, "netConfigIPAddress", Type::OctetString).read_write())
			.build()
			.unwrap();

		let ids: Vec<_> = schema.columns().iter().map(ColumnDef::id).collect();
		assert_eq!(ids, vec![1, 3]);
		assert_eq!(schema.column("netConfigStatus").unwrap().id(), 3);
		assert_eq!(schema.column_by_id(1).unwrap().name(), "netConfigIPAddress");
		assert_eq!(schema.column_oid(schema.column_by_id(3).unwrap()).to_string(), "1.3.6.1.2.1.16.19.11.1.3");
	}

	#[test]
	fn test_build_rejects_duplicates() {
		let result = TableSchema::builder("t", [1])
			.column(ColumnDef::new(1, "a", Type::Integer))
			.column(ColumnDef::new(1, "b", Type::Integer))
			.build();
		assert!(result.is_err());

		let result = TableSchema::builder("t", [1])
			.column(ColumnDef::new(1, "a", Type::Integer))
			.column(ColumnDef::new(2, "a", Type::Integer))
			.build();
		assert!(result.is_err());
	}

	#[test]
	fn test_defaults() {
		let schema = TableSchema::builder("t", [1])
			.index([IndexPart::Integer])
			.column(ColumnDef::new(1, "count", Type::Counter32))
			.column(ColumnDef::row_status(2, "status"))
			.build()
			.unwrap();
		let defaults = schema.defaults();
		assert_eq!(defaults.get("count"), Some(&Value::Counter32(0)));
		assert_eq!(defaults.get("status"), Some(&Value::Enumerated(3)));
		assert_eq!(schema.row_status_column().unwrap().name(), "status");
	}
}
