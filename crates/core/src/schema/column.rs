// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fmt, sync::Arc};

use mibkit_type::{Error, Result, RowIndex, RowStatus, Type, Value};

use crate::store::AttributeStore;

/// Row-specific precondition run while testing a write. Receives the row key,
/// the row's current values and the proposed value.
pub type CheckFn = Arc<dyn Fn(&RowIndex, &AttributeStore, &Value) -> Result<()> + Send + Sync>;

/// Side effect run while committing a write, before the value is stored.
/// An error here fails the commit and unwinds the members already applied.
pub type ApplyFn = Arc<dyn Fn(&RowIndex, &Value) -> Result<()> + Send + Sync>;

/// MAX-ACCESS of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Access {
	NotAccessible,
	AccessibleForNotify,
	ReadOnly,
	ReadWrite,
	ReadCreate,
}

impl Access {
	pub fn is_writable(&self) -> bool {
		matches!(self, Access::ReadWrite | Access::ReadCreate)
	}

	pub fn is_readable(&self) -> bool {
		matches!(self, Access::ReadOnly | Access::ReadWrite | Access::ReadCreate)
	}
}

/// Value restriction declared on a column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
	/// Inclusive numeric range
	Range {
		min: i64,
		max: i64,
	},
	/// Inclusive octet-string length bounds
	Size {
		min: usize,
		max: usize,
	},
	/// Permitted enumeration labels
	Enumeration(Vec<i32>),
}

/// One column of a table row: its sub-identifier under the entry OID, its
/// type and access, and the hooks that make up its write behavior.
#[derive(Clone)]
pub struct ColumnDef {
	id: u32,
	name: String,
	ty: Type,
	access: Access,
	constraint: Option<Constraint>,
	default: Value,
	row_status: bool,
	check: Option<CheckFn>,
	apply: Option<ApplyFn>,
}

impl ColumnDef {
	pub fn new(id: u32, name: impl Into<String>, ty: Type) -> Self {
		Self {
			id,
			name: name.into(),
			ty,
			access: Access::ReadOnly,
			constraint: None,
			default: default_for(ty),
			row_status: false,
			check: None,
			apply: None,
		}
	}

	/// A RowStatus column: read-create, enumerated 1..=6.
	pub fn row_status(id: u32, name: impl Into<String>) -> Self {
		let mut column = Self::new(id, name, Type::Enumerated)
			.access(Access::ReadCreate)
			.enumeration([1, 2, 3, 4, 5, 6])
			.default_value(Value::status(RowStatus::NotReady));
		column.row_status = true;
		column
	}

	pub fn access(mut self, access: Access) -> Self {
		self.access = access;
		self
	}

	pub fn read_write(self) -> Self {
		self.access(Access::ReadWrite)
	}

	pub fn read_create(self) -> Self {
		self.access(Access::ReadCreate)
	}

	pub fn range(mut self, min: i64, max: i64) -> Self {
		self.constraint = Some(Constraint::Range {
			min,
			max,
		});
		self
	}

	pub fn size(mut self, min: usize, max: usize) -> Self {
		self.constraint = Some(Constraint::Size {
			min,
			max,
		});
		self
	}

	pub fn enumeration(mut self, labels: impl Into<Vec<i32>>) -> Self {
		self.constraint = Some(Constraint::Enumeration(labels.into()));
		self
	}

	pub fn default_value(mut self, value: Value) -> Self {
		self.default = value;
		self
	}

	pub fn check<F>(mut self, check: F) -> Self
	where
		F: Fn(&RowIndex, &AttributeStore, &Value) -> Result<()> + Send + Sync + 'static,
	{
		self.check = Some(Arc::new(check));
		self
	}

	pub fn on_apply<F>(mut self, apply: F) -> Self
	where
		F: Fn(&RowIndex, &Value) -> Result<()> + Send + Sync + 'static,
	{
		self.apply = Some(Arc::new(apply));
		self
	}

	pub fn id(&self) -> u32 {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn ty(&self) -> Type {
		self.ty
	}

	pub fn get_access(&self) -> Access {
		self.access
	}

	pub fn constraint(&self) -> Option<&Constraint> {
		self.constraint.as_ref()
	}

	pub fn initial(&self) -> &Value {
		&self.default
	}

	pub fn is_row_status(&self) -> bool {
		self.row_status
	}

	/// Type check alone; the first thing a write must pass.
	pub fn check_type(&self, value: &Value) -> Result<()> {
		let actual = value.get_type();
		if actual != self.ty {
			return Err(Error::WrongType {
				column: self.name.clone(),
				expected: self.ty,
				actual,
			});
		}
		Ok(())
	}

	/// Type, access and declared-constraint validation. Mutates nothing.
	pub fn validate(&self, value: &Value) -> Result<()> {
		self.check_type(value)?;

		if !self.access.is_writable() {
			return Err(Error::NotWritable {
				column: self.name.clone(),
			});
		}

		match &self.constraint {
			Some(Constraint::Range {
				min,
				max,
			}) => {
				let v = value.as_i64().ok_or_else(|| {
					Error::Internal(format!("range constraint on non-numeric column {}", self.name))
				})?;
				if v < *min || v > *max {
					return Err(Error::InconsistentValue {
						column: self.name.clone(),
						reason: format!("{v} is outside {min}..={max}"),
					});
				}
			}
			Some(Constraint::Size {
				min,
				max,
			}) => {
				let len = value.octet_len().ok_or_else(|| {
					Error::Internal(format!("size constraint on non-string column {}", self.name))
				})?;
				if len < *min || len > *max {
					return Err(Error::WrongLength {
						column: self.name.clone(),
						len,
						min: *min,
						max: *max,
					});
				}
			}
			Some(Constraint::Enumeration(labels)) => {
				let v = value.as_i64().unwrap_or(i64::MIN);
				if !labels.iter().any(|label| *label as i64 == v) {
					return Err(Error::InconsistentValue {
						column: self.name.clone(),
						reason: format!("{value} is not an enumerated label"),
					});
				}
			}
			None => {}
		}
		Ok(())
	}

	/// Runs the row-specific precondition, if any.
	pub fn precondition(&self, index: &RowIndex, current: &AttributeStore, value: &Value) -> Result<()> {
		match &self.check {
			Some(check) => check(index, current, value),
			None => Ok(()),
		}
	}

	/// Runs the commit hook, if any.
	pub fn apply(&self, index: &RowIndex, value: &Value) -> Result<()> {
		match &self.apply {
			Some(apply) => apply(index, value),
			None => Ok(()),
		}
	}
}

impl fmt::Debug for ColumnDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ColumnDef")
			.field("id", &self.id)
			.field("name", &self.name)
			.field("ty", &self.ty)
			.field("access", &self.access)
			.field("constraint", &self.constraint)
			.field("row_status", &self.row_status)
			.finish_non_exhaustive()
	}
}

fn default_for(ty: Type) -> Value {
	match ty {
		Type::Integer => Value::Integer(0),
		Type::Counter32 => Value::Counter32(0),
		Type::Counter64 => Value::Counter64(0),
		Type::Gauge32 => Value::Gauge32(0),
		Type::TimeTicks => Value::TimeTicks(0),
		Type::OctetString => Value::OctetString(Vec::new()),
		Type::IpAddress => Value::IpAddress([0; 4]),
		Type::ObjectIdentifier => Value::oid([0, 0]),
		Type::Enumerated => Value::Enumerated(1),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_validate_type_first() {
		let column = ColumnDef::new(3, "status", Type::Integer).range(1, 10);
		let err = column.validate(&Value::octets(vec![1])).unwrap_err();
		assert!(matches!(err, Error::WrongType { .. }));
	}

	#[test]
	fn test_validate_read_only() {
		let column = ColumnDef::new(5, "createTime", Type::TimeTicks);
		assert_eq!(
			column.validate(&Value::TimeTicks(1)),
			Err(Error::NotWritable {
				column: "createTime".to_string()
			})
		);
	}

	#[test]
	fn test_validate_range() {
		let column = ColumnDef::new(3, "status", Type::Integer).read_write().range(1, 10);
		assert!(column.validate(&Value::Integer(3)).is_ok());
		let err = column.validate(&Value::Integer(99)).unwrap_err();
		assert!(matches!(err, Error::InconsistentValue { .. }));
	}

	#[test]
	fn test_validate_size() {
		let column = ColumnDef::new(1, "addr", Type::OctetString).read_write().size(4, 4);
		assert!(column.validate(&Value::octets(vec![10, 0, 0, 1])).is_ok());
		let err = column.validate(&Value::octets(vec![10, 0])).unwrap_err();
		assert!(matches!(err, Error::WrongLength { len: 2, .. }));
	}

	#[test]
	fn test_validate_enumeration() {
		let column = ColumnDef::row_status(9, "rowStatus");
		assert!(column.validate(&Value::status(RowStatus::CreateAndGo)).is_ok());
		assert!(column.validate(&Value::Enumerated(7)).is_err());
		assert!(column.is_row_status());
	}

	#[test]
	fn test_hooks_default_to_ok() {
		let column = ColumnDef::new(1, "x", Type::Integer);
		let index = RowIndex::from([1]);
		assert!(column.apply(&index, &Value::Integer(1)).is_ok());
		assert!(column.precondition(&index, &AttributeStore::new(), &Value::Integer(1)).is_ok());
	}
}
