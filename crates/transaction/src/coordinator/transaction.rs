// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use mibkit_core::{EnrollmentOwner, PendingWrite, Table};
use mibkit_type::{Error, Outcome, Result, RowStatus, Value};
use tracing::{debug, instrument, trace, warn};

use super::member::{Effect, Member};
use crate::{BatchId, BatchOutcome, BatchState, CoordinatorConfig, MemberOutcome, MemberState, Phase};

#[derive(Debug)]
struct Failure {
	position: Option<usize>,
	error: Error,
}

/// One SET batch driven phase by phase.
///
/// Every phase runs across the whole batch before it returns. Rows are
/// enrolled without blocking at TEST_SET and stay enrolled until CLEANUP,
/// which always runs: explicitly, when a phase arrives out of sequence, or
/// when the transaction is dropped.
#[derive(Debug)]
pub struct SetTransaction {
	id: BatchId,
	config: CoordinatorConfig,
	members: Vec<Member>,
	state: BatchState,
	failure: Option<Failure>,
}

impl SetTransaction {
	pub fn new(batch: Vec<PendingWrite>) -> Self {
		Self::with_config(batch, CoordinatorConfig::default())
	}

	pub fn with_config(batch: Vec<PendingWrite>, config: CoordinatorConfig) -> Self {
		Self {
			id: BatchId::generate(),
			config,
			members: batch.into_iter().map(Member::new).collect(),
			state: BatchState::Testing,
			failure: None,
		}
	}

	pub fn id(&self) -> BatchId {
		self.id
	}

	pub fn state(&self) -> BatchState {
		self.state
	}

	pub fn len(&self) -> usize {
		self.members.len()
	}

	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}

	pub fn member_state(&self, position: usize) -> Option<MemberState> {
		self.members.get(position).map(|member| member.state)
	}

	/// Runs the phase named by an AgentX PDU type.
	pub fn dispatch(&mut self, code: u8) -> BatchOutcome {
		match Phase::from_code(code) {
			Ok(phase) => self.run(phase),
			Err(err) => self.protocol_error(err),
		}
	}

	pub fn run(&mut self, phase: Phase) -> BatchOutcome {
		match phase {
			Phase::TestSet => self.test_set(),
			Phase::Commit => self.commit(),
			Phase::Undo => self.undo(),
			Phase::Cleanup => self.cleanup(),
		}
	}

	/// Validates every member and enrolls its row. Nothing is mutated; the
	/// first failing member fails the batch.
	#[instrument(
		name = "transaction::test_set",
		level = "debug",
		skip(self),
		fields(batch = %self.id, members = self.members.len())
	)]
	pub fn test_set(&mut self) -> BatchOutcome {
		if self.state != BatchState::Testing {
			return self.out_of_sequence(Phase::TestSet);
		}

		for position in 0..self.members.len() {
			if let Err(err) = self.test_member(position) {
				debug!(position, error = %err, "member failed TEST_SET");
				self.fail(position, err);
				self.state = BatchState::TestFailed;
				return self.outcome();
			}
			self.members[position].state = MemberState::Tested;
		}

		self.state = BatchState::AllTested;
		trace!("all members tested");
		self.outcome()
	}

	/// Applies members in batch order. A failing member unwinds the ones
	/// committed before it, in reverse.
	#[instrument(name = "transaction::commit", level = "debug", skip(self), fields(batch = %self.id))]
	pub fn commit(&mut self) -> BatchOutcome {
		if self.state != BatchState::AllTested {
			return self.out_of_sequence(Phase::Commit);
		}
		self.state = BatchState::Committing;

		for position in 0..self.members.len() {
			match self.commit_member(position) {
				Ok(()) => self.members[position].state = MemberState::Committed,
				Err(err) => {
					warn!(position, error = %err, "COMMIT failed, unwinding committed members");
					self.fail(position, err);
					self.revert_committed();
					self.state = BatchState::CommitFailed;
					return self.outcome();
				}
			}
		}

		self.state = BatchState::AllCommitted;
		trace!("all members committed");
		self.outcome()
	}

	/// Restores every committed member. Repeating it changes nothing.
	#[instrument(name = "transaction::undo", level = "debug", skip(self), fields(batch = %self.id))]
	pub fn undo(&mut self) -> BatchOutcome {
		match self.state {
			BatchState::AllCommitted | BatchState::CommitFailed | BatchState::Unwinding => {
				self.revert_committed();
				self.state = BatchState::Unwinding;
				self.outcome()
			}
			_ => self.out_of_sequence(Phase::Undo),
		}
	}

	/// Settles the batch and releases its rows. Never fails; a second call
	/// is a no-op.
	#[instrument(name = "transaction::cleanup", level = "debug", skip(self), fields(batch = %self.id))]
	pub fn cleanup(&mut self) -> BatchOutcome {
		match self.state {
			BatchState::Done => trace!("already cleaned"),
			BatchState::AllCommitted => {
				self.state = BatchState::Cleaning;
				self.settle(true);
			}
			_ => {
				self.state = BatchState::Unwinding;
				self.settle(false);
			}
		}
		self.outcome()
	}

	/// Drops a batch that has not been tested yet.
	pub fn abandon(&mut self) -> Result<()> {
		if self.state != BatchState::Testing {
			let err = Error::PhaseOutOfSequence {
				phase: "ABANDON".to_string(),
				state: self.state.to_string(),
			};
			self.protocol_error(err.clone());
			return Err(err);
		}
		for member in &mut self.members {
			member.state = MemberState::Cleaned;
		}
		self.state = BatchState::Done;
		debug!(batch = %self.id, "batch abandoned");
		Ok(())
	}

	pub fn outcome(&self) -> BatchOutcome {
		BatchOutcome {
			outcome: self.failure.as_ref().map_or(Outcome::NoError, |failure| failure.error.outcome()),
			failed: self.failure.as_ref().and_then(|failure| failure.position),
			error: self.failure.as_ref().map(|failure| failure.error.clone()),
			members: self
				.members
				.iter()
				.enumerate()
				.map(|(position, member)| MemberOutcome {
					position,
					state: member.state,
					outcome: member.error.as_ref().map_or(Outcome::NoError, Error::outcome),
					error: member.error.clone(),
				})
				.collect(),
		}
	}

	fn test_member(&mut self, position: usize) -> Result<()> {
		if position >= self.config.max_batch_size {
			return Err(Error::ResourceUnavailable {
				reason: format!("batch exceeds {} members", self.config.max_batch_size),
			});
		}

		let owner = self.id.owner();
		let creating = self.creates(&self.members[position].write);
		let member = &mut self.members[position];
		let write = member.write.clone();
		let table = write.table.clone();
		let schema = table.schema();

		let column = schema.column(&write.column).cloned().ok_or_else(|| Error::NotWritable {
			column: write.column.clone(),
		})?;
		column.validate(&write.value)?;

		let no_creation = || Error::NoCreation {
			column: write.column.clone(),
			index: write.index.clone(),
		};
		let row = match table.enroll(&write.index, owner)? {
			Some(row) => {
				member.enrolled = true;
				row
			}
			None if creating => {
				schema.index().decode(&write.index).map_err(|_| no_creation())?;
				let row = table.reserve(write.index.clone(), owner)?;
				member.enrolled = true;
				member.reserved = true;
				row
			}
			None => return Err(no_creation()),
		};
		member.row = Some(row.clone());

		let mut value = write.value.clone();
		if column.is_row_status() {
			let inconsistent = |reason: &str| Error::InconsistentValue {
				column: write.column.clone(),
				reason: reason.to_string(),
			};
			match row_status(&value).ok_or_else(|| inconsistent("not a RowStatus value"))? {
				RowStatus::NotReady => return Err(inconsistent("notReady cannot be written")),
				status if status.is_create() => {
					if row.is_visible() {
						return Err(inconsistent("row already exists"));
					}
					if let Some(created) = status.created_state() {
						value = Value::status(created);
					}
					member.effect = Effect::Publish;
				}
				RowStatus::Destroy => member.effect = Effect::Destroy,
				_ => {}
			}
		}

		row.with_store(|store| column.precondition(&write.index, store, &value))?;

		if member.effect != Effect::Destroy {
			member.value = Some(value);
		}
		member.column = Some(column);
		Ok(())
	}

	/// Whether some member asks to create the row `write` targets.
	fn creates(&self, write: &PendingWrite) -> bool {
		self.members.iter().any(|member| {
			member.targets(write)
				&& member.write.column_def().is_some_and(|column| column.is_row_status())
				&& row_status(&member.write.value).is_some_and(|status| status.is_create())
		})
	}

	fn commit_member(&self, position: usize) -> Result<()> {
		let member = &self.members[position];
		let (Some(row), Some(column)) = (&member.row, &member.column) else {
			return Err(Error::Internal(format!("member {position} reached COMMIT untested")));
		};
		match &member.value {
			Some(value) => row.commit_value(column, value.clone()),
			None => Ok(()),
		}
	}

	fn revert_committed(&mut self) {
		for member in self.members.iter_mut().rev().filter(|member| member.state == MemberState::Committed) {
			if let Some(row) = &member.row {
				row.revert_pending();
			}
			member.state = MemberState::Undone;
		}
	}

	fn settle(&mut self, succeeded: bool) {
		let owner = self.id.owner();

		for member in self.members.iter().rev() {
			if let Some(row) = &member.row {
				if succeeded {
					row.clear_pending();
				} else {
					row.revert_pending();
				}
			}
		}

		for member in &self.members {
			let Some(row) = &member.row else {
				continue;
			};
			let table = &member.write.table;
			match (succeeded, member.effect) {
				(true, Effect::Publish) => {
					row.publish();
					debug!(table = %table.name(), index = %row.index(), "row created");
				}
				(true, Effect::Destroy) => remove(table, member, owner),
				(false, _) if member.reserved => remove(table, member, owner),
				_ => {}
			}
		}

		for member in &mut self.members {
			if member.enrolled {
				if let Some(row) = &member.row {
					row.release(owner);
				}
				member.enrolled = false;
			}
			member.state = MemberState::Cleaned;
		}

		self.state = BatchState::Done;
		trace!(succeeded, "batch cleaned");
	}

	fn fail(&mut self, position: usize, error: Error) {
		self.members[position].error = Some(error.clone());
		if self.failure.is_none() {
			self.failure = Some(Failure {
				position: Some(position),
				error,
			});
		}
	}

	fn out_of_sequence(&mut self, phase: Phase) -> BatchOutcome {
		self.protocol_error(Error::PhaseOutOfSequence {
			phase: phase.to_string(),
			state: self.state.to_string(),
		})
	}

	fn protocol_error(&mut self, error: Error) -> BatchOutcome {
		warn!(batch = %self.id, state = %self.state, error = %error, "protocol error, forcing cleanup");
		if self.state == BatchState::Done {
			let mut outcome = self.outcome();
			outcome.outcome = error.outcome();
			outcome.failed = None;
			outcome.error = Some(error);
			return outcome;
		}
		self.failure = Some(Failure {
			position: None,
			error,
		});
		self.state = BatchState::Unwinding;
		self.settle(false);
		self.outcome()
	}
}

impl Drop for SetTransaction {
	fn drop(&mut self) {
		if !matches!(self.state, BatchState::Testing | BatchState::Done) {
			warn!(batch = %self.id, state = %self.state, "transaction dropped before CLEANUP");
			self.settle(false);
		}
	}
}

fn row_status(value: &Value) -> Option<RowStatus> {
	match value {
		Value::Enumerated(v) => RowStatus::try_from(*v).ok(),
		_ => None,
	}
}

fn remove(table: &Table, member: &Member, owner: EnrollmentOwner) {
	match table.remove_owned(&member.write.index, owner) {
		Ok(_) => debug!(table = %table.name(), index = %member.write.index, "row removed"),
		Err(err) => trace!(error = %err, "row already removed"),
	}
}
