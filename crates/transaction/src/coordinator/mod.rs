// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod member;
mod transaction;

use mibkit_core::{MibTree, PendingWrite, VarBind};
use mibkit_type::{Error, Outcome};
use tracing::{debug, instrument};
pub use transaction::SetTransaction;

use crate::{BatchOutcome, CoordinatorConfig, MemberOutcome, MemberState};

/// Runs whole SET batches: TEST_SET, then COMMIT, then UNDO if COMMIT
/// failed, then CLEANUP.
#[derive(Debug, Clone, Default)]
pub struct SetCoordinator {
	config: CoordinatorConfig,
}

impl SetCoordinator {
	pub fn new(config: CoordinatorConfig) -> Self {
		Self {
			config,
		}
	}

	pub fn config(&self) -> &CoordinatorConfig {
		&self.config
	}

	/// Starts a batch the caller drives phase by phase.
	pub fn begin(&self, batch: Vec<PendingWrite>) -> SetTransaction {
		SetTransaction::with_config(batch, self.config.clone())
	}

	#[instrument(name = "transaction::execute", level = "debug", skip_all, fields(members = batch.len()))]
	pub fn execute(&self, batch: Vec<PendingWrite>) -> BatchOutcome {
		let mut transaction = self.begin(batch);

		if !transaction.test_set().is_ok() {
			return transaction.cleanup();
		}
		if !transaction.commit().is_ok() {
			transaction.undo();
		}
		transaction.cleanup()
	}

	/// Resolves SET varbinds against `tree` and executes them as one batch.
	/// An address that resolves to no writable object fails the batch at its
	/// position before any row is enrolled.
	pub fn execute_set(&self, tree: &MibTree, varbinds: Vec<VarBind>) -> BatchOutcome {
		let len = varbinds.len();
		let mut batch = Vec::with_capacity(len);
		for (position, varbind) in varbinds.into_iter().enumerate() {
			match tree.resolve_set(&varbind.oid, varbind.value) {
				Ok(write) => batch.push(write),
				Err(err) => {
					debug!(position, error = %err, "SET address did not resolve");
					return unresolved(len, position, err);
				}
			}
		}
		self.execute(batch)
	}
}

/// Outcome of a batch rejected before TEST_SET: every member is reported,
/// only the one at `position` carries the error.
fn unresolved(len: usize, position: usize, err: Error) -> BatchOutcome {
	let members = (0..len)
		.map(|member| {
			let error = (member == position).then(|| err.clone());
			MemberOutcome {
				position: member,
				state: MemberState::Cleaned,
				outcome: error.as_ref().map_or(Outcome::NoError, Error::outcome),
				error,
			}
		})
		.collect();
	BatchOutcome {
		outcome: err.outcome(),
		failed: Some(position),
		error: Some(err),
		members,
	}
}
