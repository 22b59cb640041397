// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

use mibkit_type::{Error, Result, RowIndex, Value};
use parking_lot::{Mutex, RwLock};
use tracing::trace;

use crate::{
	schema::{ColumnDef, TableSchema},
	store::{AttributeStore, Snapshot},
};

/// Opaque identity of the batch holding a row's enrollment lock.
pub type EnrollmentOwner = u128;

#[derive(Debug)]
struct Enrollment {
	owner: EnrollmentOwner,
	/// Members of the owning batch that target this row and are not yet cleaned.
	holds: usize,
}

/// One entry of a managed table.
///
/// Lock order is store, then pending snapshot. The enrollment lock is only
/// ever taken on its own or before the store.
pub struct Row {
	index: RowIndex,
	schema: Arc<TableSchema>,
	store: RwLock<AttributeStore>,
	pending: Mutex<Option<Snapshot>>,
	enrollment: Mutex<Option<Enrollment>>,
	visible: AtomicBool,
}

impl Row {
	pub fn new(schema: Arc<TableSchema>, index: RowIndex) -> Self {
		let store = schema.defaults();
		Self {
			index,
			schema,
			store: RwLock::new(store),
			pending: Mutex::new(None),
			enrollment: Mutex::new(None),
			visible: AtomicBool::new(true),
		}
	}

	/// A row allocated by a creating SET: present in its table but hidden from
	/// lookups and traversal until [`Row::publish`].
	pub fn reserved(schema: Arc<TableSchema>, index: RowIndex) -> Self {
		let row = Self::new(schema, index);
		row.visible.store(false, Ordering::Release);
		row
	}

	/// Builder-style initial value, type-checked against the schema.
	pub fn with_value(self, name: &str, value: Value) -> Result<Self> {
		self.column(name)?.check_type(&value)?;
		self.store.write().set(name, value);
		Ok(self)
	}

	pub fn index(&self) -> &RowIndex {
		&self.index
	}

	pub fn schema(&self) -> &Arc<TableSchema> {
		&self.schema
	}

	pub fn is_visible(&self) -> bool {
		self.visible.load(Ordering::Acquire)
	}

	pub fn publish(&self) {
		self.visible.store(true, Ordering::Release);
	}

	/// Current value, including writes applied by an in-flight commit.
	pub fn get(&self, name: &str) -> Option<Value> {
		self.store.read().get(name).cloned()
	}

	/// Last committed value: an attribute captured by an in-flight
	/// transaction reports its captured value.
	pub fn committed(&self, name: &str) -> Option<Value> {
		let store = self.store.read();
		let pending = self.pending.lock();
		if let Some(value) = pending.as_ref().and_then(|snapshot| snapshot.get(name)) {
			return Some(value.clone());
		}
		store.get(name).cloned()
	}

	/// All committed values.
	pub fn values(&self) -> AttributeStore {
		let store = self.store.read();
		let pending = self.pending.lock();
		let mut values = store.clone();
		if let Some(snapshot) = pending.as_ref() {
			values.restore(snapshot.clone());
		}
		values
	}

	/// Runs `f` against the current attribute store.
	pub fn with_store<R>(&self, f: impl FnOnce(&AttributeStore) -> R) -> R {
		f(&self.store.read())
	}

	/// Agent-side instrumentation update (counters, timestamps). Refused while
	/// a transaction holds the row.
	pub fn load(&self, name: &str, value: Value) -> Result<()> {
		self.column(name)?.check_type(&value)?;
		let enrollment = self.enrollment.lock();
		if enrollment.is_some() {
			return Err(Error::RowEnrolled {
				index: self.index.clone(),
			});
		}
		self.store.write().set(name, value);
		Ok(())
	}

	/// Non-blocking acquisition of the enrollment lock. Re-entrant for the
	/// owning batch; every successful call needs a matching [`Row::release`].
	pub fn try_enroll(&self, owner: EnrollmentOwner) -> Result<()> {
		let mut enrollment = self.enrollment.lock();
		match enrollment.as_mut() {
			None => {
				*enrollment = Some(Enrollment {
					owner,
					holds: 1,
				});
				trace!(index = %self.index, "row enrolled");
				Ok(())
			}
			Some(held) if held.owner == owner => {
				held.holds += 1;
				Ok(())
			}
			Some(_) => Err(Error::RowBusy {
				index: self.index.clone(),
			}),
		}
	}

	/// Drops one hold of `owner`. Returns true once the row is free again.
	pub fn release(&self, owner: EnrollmentOwner) -> bool {
		let mut enrollment = self.enrollment.lock();
		match enrollment.as_mut() {
			Some(held) if held.owner == owner => {
				held.holds -= 1;
				if held.holds == 0 {
					*enrollment = None;
					trace!(index = %self.index, "row released");
					true
				} else {
					false
				}
			}
			Some(_) => false,
			None => true,
		}
	}

	pub fn is_enrolled(&self) -> bool {
		self.enrollment.lock().is_some()
	}

	pub fn is_enrolled_by(&self, owner: EnrollmentOwner) -> bool {
		self.enrollment.lock().as_ref().is_some_and(|held| held.owner == owner)
	}

	pub fn has_pending(&self) -> bool {
		self.pending.lock().is_some()
	}

	/// Applies `value` to `column`, capturing the prior value into the pending
	/// snapshot in the same critical section. The column's commit hook runs
	/// first; if it fails nothing is captured or changed.
	pub fn commit_value(&self, column: &ColumnDef, value: Value) -> Result<()> {
		column.apply(&self.index, &value)?;

		let mut store = self.store.write();
		let mut pending = self.pending.lock();
		let captured = store.snapshot(&[column.name()])?;
		match pending.as_mut() {
			Some(snapshot) => snapshot.merge(captured),
			None => *pending = Some(captured),
		}
		store.set(column.name(), value);
		Ok(())
	}

	/// Restores the pending snapshot, if any, and clears it. Returns whether
	/// anything was restored, so repeated calls are no-ops.
	pub fn revert_pending(&self) -> bool {
		let mut store = self.store.write();
		let mut pending = self.pending.lock();
		match pending.take() {
			Some(snapshot) => {
				store.restore(snapshot);
				true
			}
			None => false,
		}
	}

	/// Discards the pending snapshot, keeping the applied values.
	pub fn clear_pending(&self) -> bool {
		self.pending.lock().take().is_some()
	}

	fn column(&self, name: &str) -> Result<&ColumnDef> {
		self.schema.column(name).ok_or_else(|| Error::AttributeMissing {
			attribute: name.to_string(),
		})
	}
}

impl std::fmt::Debug for Row {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Row")
			.field("table", &self.schema.name())
			.field("index", &self.index)
			.field("visible", &self.is_visible())
			.field("values", &*self.store.read())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use mibkit_type::Type;

	use super::*;
	use crate::index::IndexPart;

	fn schema() -> Arc<TableSchema> {
		Arc::new(
			TableSchema::builder("netConfigEntry", [1, 3, 6, 1, 2, 1, 16, 19, 11, 1])
				.index([IndexPart::Integer])
				.column(ColumnDef::new(1, "addr", Type::OctetString).read_write().size(4, 4))
				.column(ColumnDef::new(3, "status", Type::Integer).read_write().range(1, 10))
				.build()
				.unwrap(),
		)
	}

	#[test]
	fn test_commit_then_revert() {
		let schema = schema();
		let row = Row::new(schema.clone(), RowIndex::from([1])).with_value("status", Value::Integer(1)).unwrap();
		let column = schema.column("status").unwrap();

		row.commit_value(column, Value::Integer(3)).unwrap();
		assert!(row.has_pending());
		assert_eq!(row.get("status"), Some(Value::Integer(3)));
		assert_eq!(row.committed("status"), Some(Value::Integer(1)));

		assert!(row.revert_pending());
		assert!(!row.has_pending());
		assert_eq!(row.get("status"), Some(Value::Integer(1)));
		assert!(!row.revert_pending());
	}

	#[test]
	fn test_commit_twice_reverts_to_oldest() {
		let schema = schema();
		let row = Row::new(schema.clone(), RowIndex::from([1]));
		let column = schema.column("status").unwrap();

		row.commit_value(column, Value::Integer(2)).unwrap();
		row.commit_value(column, Value::Integer(5)).unwrap();
		row.revert_pending();
		assert_eq!(row.get("status"), Some(Value::Integer(0)));
	}

	#[test]
	fn test_failing_hook_changes_nothing() {
		let column = ColumnDef::new(3, "status", Type::Integer).read_write().on_apply(|_, _| {
			Err(Error::ResourceUnavailable {
				reason: "full".to_string(),
			})
		});
		let row = Row::new(schema(), RowIndex::from([1]));

		assert!(row.commit_value(&column, Value::Integer(4)).is_err());
		assert!(!row.has_pending());
		assert_eq!(row.get("status"), Some(Value::Integer(0)));
	}

	#[test]
	fn test_enrollment_is_exclusive() {
		let row = Row::new(schema(), RowIndex::from([1]));
		row.try_enroll(1).unwrap();
		row.try_enroll(1).unwrap();
		assert!(matches!(row.try_enroll(2), Err(Error::RowBusy { .. })));

		assert!(!row.release(1));
		assert!(row.is_enrolled_by(1));
		assert!(row.release(1));
		assert!(!row.is_enrolled());
		row.try_enroll(2).unwrap();
	}

	#[test]
	fn test_load_refused_while_enrolled() {
		let row = Row::new(schema(), RowIndex::from([1]));
		row.load("status", Value::Integer(2)).unwrap();
		row.try_enroll(7).unwrap();
		assert!(matches!(row.load("status", Value::Integer(3)), Err(Error::RowEnrolled { .. })));
		assert!(matches!(row.load("status", Value::octets(vec![1])), Err(Error::WrongType { .. })));
	}

	#[test]
	fn test_values_report_committed_view() {
		let schema = schema();
		let row = Row::new(schema.clone(), RowIndex::from([1]));
		row.commit_value(schema.column("addr").unwrap(), Value::octets(vec![10, 0, 0, 1])).unwrap();
		assert_eq!(row.values().get("addr"), Some(&Value::octets(vec![])));
		row.clear_pending();
		assert_eq!(row.values().get("addr"), Some(&Value::octets(vec![10, 0, 0, 1])));
	}
}
