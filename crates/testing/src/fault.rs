// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};

use mibkit_type::{Error, Result, RowIndex, Value};
use parking_lot::Mutex;
use tracing::debug;

#[derive(Default)]
struct Inner {
	applies: AtomicUsize,
	fail_at: Mutex<Option<usize>>,
	fail_rows: Mutex<Vec<RowIndex>>,
}

/// Commit hook that can be told to fail, standing in for an instrumentation
/// write that runs out of resources halfway through a batch.
///
/// Cloning shares the injector; arm it after the fixture table is built.
#[derive(Clone, Default)]
pub struct FaultInjector {
	inner: Arc<Inner>,
}

impl FaultInjector {
	pub fn new() -> Self {
		Self::default()
	}

	/// Fails the `n`th apply counted from the next one (1-based).
	pub fn fail_on_apply(&self, n: usize) -> &Self {
		let seen = self.inner.applies.load(Ordering::SeqCst);
		*self.inner.fail_at.lock() = Some(seen + n);
		self
	}

	/// Fails every apply on the row at `index`.
	pub fn fail_on_row(&self, index: impl Into<RowIndex>) -> &Self {
		self.inner.fail_rows.lock().push(index.into());
		self
	}

	pub fn disarm(&self) {
		*self.inner.fail_at.lock() = None;
		self.inner.fail_rows.lock().clear();
	}

	/// Number of apply calls seen so far, failed ones included.
	pub fn applies(&self) -> usize {
		self.inner.applies.load(Ordering::SeqCst)
	}

	pub fn hook(&self) -> impl Fn(&RowIndex, &Value) -> Result<()> + Send + Sync + 'static {
		let inner = self.inner.clone();
		move |index, _| {
			let seen = inner.applies.fetch_add(1, Ordering::SeqCst) + 1;
			let armed = *inner.fail_at.lock() == Some(seen);
			if armed || inner.fail_rows.lock().contains(index) {
				debug!(index = %index, apply = seen, "injected commit fault");
				return Err(Error::ResourceUnavailable {
					reason: format!("injected fault at apply {seen}"),
				});
			}
			Ok(())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fail_on_apply() {
		let faults = FaultInjector::new();
		let hook = faults.hook();
		let index = RowIndex::from([1]);
		hook(&index, &Value::Integer(1)).unwrap();

		faults.fail_on_apply(2);
		hook(&index, &Value::Integer(1)).unwrap();
		assert!(hook(&index, &Value::Integer(1)).is_err());
		hook(&index, &Value::Integer(1)).unwrap();
		assert_eq!(faults.applies(), 4);
	}

	#[test]
	fn test_fail_on_row() {
		let faults = FaultInjector::new();
		faults.fail_on_row([2]);
		let hook = faults.hook();
		hook(&RowIndex::from([1]), &Value::Integer(1)).unwrap();
		assert!(hook(&RowIndex::from([2]), &Value::Integer(1)).is_err());
		faults.disarm();
		hook(&RowIndex::from([2]), &Value::Integer(1)).unwrap();
	}
}
