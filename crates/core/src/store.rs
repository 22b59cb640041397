// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;
use mibkit_type::{Error, Result, Value};

/// Per-row mapping from attribute name to its current value.
///
/// Attributes keep the order in which the schema declares them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeStore {
	values: IndexMap<String, Value>,
}

impl AttributeStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	/// Overwrites `name`, returning the previous value.
	pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
		self.values.insert(name.into(), value)
	}

	/// Captures the current values of `names`.
	pub fn snapshot(&self, names: &[&str]) -> Result<Snapshot> {
		let mut entries = IndexMap::with_capacity(names.len());
		for name in names {
			let value = self.values.get(*name).ok_or_else(|| Error::AttributeMissing {
				attribute: name.to_string(),
			})?;
			entries.insert(name.to_string(), value.clone());
		}
		Ok(Snapshot {
			entries,
		})
	}

	/// Writes every captured value back.
	pub fn restore(&mut self, snapshot: Snapshot) {
		for (name, value) in snapshot.entries {
			self.values.insert(name, value);
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

/// Prior values of a subset of attributes, kept for rollback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
	entries: IndexMap<String, Value>,
}

impl Snapshot {
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.entries.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Folds `other` into this snapshot. Attributes already captured keep
	/// their earlier value so a restore returns to the oldest state.
	pub fn merge(&mut self, other: Snapshot) {
		for (name, value) in other.entries {
			self.entries.entry(name).or_insert(value);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn store() -> AttributeStore {
		let mut store = AttributeStore::new();
		store.set("addr", Value::octets(vec![10, 0, 0, 1]));
		store.set("status", Value::Integer(1));
		store
	}

	#[test]
	fn test_restore_returns_original() {
		let mut store = store();
		let snapshot = store.snapshot(&["status"]).unwrap();
		store.set("status", Value::Integer(3));
		assert_eq!(store.get("status"), Some(&Value::Integer(3)));

		store.restore(snapshot);
		assert_eq!(store.get("status"), Some(&Value::Integer(1)));
	}

	#[test]
	fn test_restore_leaves_other_attributes() {
		let mut store = store();
		let snapshot = store.snapshot(&["status"]).unwrap();
		store.set("status", Value::Integer(3));
		store.set("addr", Value::octets(vec![10, 0, 0, 9]));

		store.restore(snapshot);
		assert_eq!(store.get("status"), Some(&Value::Integer(1)));
		assert_eq!(store.get("addr"), Some(&Value::octets(vec![10, 0, 0, 9])));
	}

	#[test]
	fn test_snapshot_missing_attribute() {
		let store = store();
		assert_eq!(
			store.snapshot(&["mask"]),
			Err(Error::AttributeMissing {
				attribute: "mask".to_string()
			})
		);
	}

	#[test]
	fn test_merge_keeps_oldest() {
		let mut store = store();
		let mut first = store.snapshot(&["status"]).unwrap();
		store.set("status", Value::Integer(2));
		let second = store.snapshot(&["status", "addr"]).unwrap();
		store.set("status", Value::Integer(3));

		first.merge(second);
		assert_eq!(first.get("status"), Some(&Value::Integer(1)));
		assert!(first.contains("addr"));

		store.restore(first);
		assert_eq!(store.get("status"), Some(&Value::Integer(1)));
	}

	#[test]
	fn test_preserves_declaration_order() {
		let store = store();
		let names: Vec<_> = store.iter().map(|(name, _)| name).collect();
		assert_eq!(names, vec!["addr", "status"]);
	}
}
