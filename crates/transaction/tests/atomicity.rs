// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use mibkit_core::{RowIndex, Table, Value};
use mibkit_testing::{FaultInjector, fixture::net_config};
use mibkit_transaction::{BatchState, MemberState, PendingWrite, SetCoordinator, SetTransaction};
use mibkit_type::Outcome;

fn rows(faults: &FaultInjector) -> Arc<Table> {
	let table = net_config(faults);
	for i in 1..=3 {
		let row = table.create(RowIndex::from([i])).unwrap();
		row.load("netConfigIPAddress", Value::octets(vec![192, 168, 0, i as u8])).unwrap();
		row.load("netConfigStatus", Value::Integer(1)).unwrap();
	}
	table
}

fn get(table: &Table, row: u32, column: &str) -> Value {
	table.lookup(&RowIndex::from([row])).unwrap().get(column).unwrap()
}

#[test]
fn test_out_of_range_member_leaves_batch_untouched() {
	let faults = FaultInjector::new();
	let table = rows(&faults);

	let outcome = SetCoordinator::default().execute(vec![
		PendingWrite::new(table.clone(), [1], "netConfigStatus", Value::Integer(3)),
		PendingWrite::new(table.clone(), [2], "netConfigStatus", Value::Integer(99)),
	]);

	assert_eq!(outcome.outcome, Outcome::InconsistentValue);
	assert_eq!(outcome.failed, Some(1));
	assert_eq!(get(&table, 1, "netConfigStatus"), Value::Integer(1));
	assert_eq!(get(&table, 2, "netConfigStatus"), Value::Integer(1));
	assert_eq!(faults.applies(), 0);
}

#[test]
fn test_commit_fault_on_second_member_reverts_first() {
	let faults = FaultInjector::new();
	let table = rows(&faults);
	faults.fail_on_apply(2);

	let outcome = SetCoordinator::default().execute(vec![
		PendingWrite::new(table.clone(), [1], "netConfigIPAddress", Value::octets(vec![10, 0, 0, 1])),
		PendingWrite::new(table.clone(), [2], "netConfigIPAddress", Value::octets(vec![10, 0, 0, 2])),
	]);

	assert_eq!(outcome.outcome, Outcome::ResourceUnavailable);
	assert_eq!(outcome.error_index(), 2);
	assert_eq!(get(&table, 1, "netConfigIPAddress"), Value::octets(vec![192, 168, 0, 1]));
	assert_eq!(get(&table, 2, "netConfigIPAddress"), Value::octets(vec![192, 168, 0, 2]));
	assert_eq!(outcome.members[0].outcome, Outcome::NoError);
	assert_eq!(outcome.members[1].outcome, Outcome::ResourceUnavailable);
	assert_eq!(outcome.failures().map(|member| member.position).collect::<Vec<_>>(), vec![1]);
	for i in 1..=2 {
		let row = table.lookup(&RowIndex::from([i])).unwrap();
		assert!(!row.has_pending());
		assert!(!row.is_enrolled());
	}
}

#[test]
fn test_commit_fault_on_member_k_of_many() {
	for k in 1..=3 {
		let faults = FaultInjector::new();
		let table = rows(&faults);
		faults.fail_on_apply(k);

		let batch = (1..=3)
			.map(|i| PendingWrite::new(table.clone(), [i], "netConfigStatus", Value::Integer(5)))
			.collect();
		let mut transaction = SetTransaction::new(batch);
		assert!(transaction.test_set().is_ok());

		let outcome = transaction.commit();
		assert_eq!(transaction.state(), BatchState::CommitFailed);
		assert_eq!(outcome.failed, Some(k - 1));
		for position in 0..3 {
			let expected = if position < k - 1 {
				MemberState::Undone
			} else {
				MemberState::Tested
			};
			assert_eq!(transaction.member_state(position), Some(expected));
		}

		transaction.undo();
		transaction.cleanup();
		for i in 1..=3 {
			assert_eq!(get(&table, i, "netConfigStatus"), Value::Integer(1));
		}
	}
}

#[test]
fn test_fault_on_shared_row_restores_whole_row() {
	let faults = FaultInjector::new();
	let table = rows(&faults);
	faults.fail_on_apply(3);

	let outcome = SetCoordinator::default().execute(vec![
		PendingWrite::new(table.clone(), [1], "netConfigStatus", Value::Integer(4)),
		PendingWrite::new(table.clone(), [1], "netConfigIPAddress", Value::octets(vec![10, 1, 1, 1])),
		PendingWrite::new(table.clone(), [1], "netConfigSubnetMask", Value::octets(vec![255, 0, 0, 0])),
	]);

	assert_eq!(outcome.outcome, Outcome::ResourceUnavailable);
	assert_eq!(get(&table, 1, "netConfigStatus"), Value::Integer(1));
	assert_eq!(get(&table, 1, "netConfigIPAddress"), Value::octets(vec![192, 168, 0, 1]));
	assert_eq!(get(&table, 1, "netConfigSubnetMask"), Value::octets(vec![]));
}

#[test]
fn test_cleanup_twice_equals_once() {
	let faults = FaultInjector::new();
	let table = rows(&faults);
	let mut transaction =
		SetTransaction::new(vec![PendingWrite::new(table.clone(), [3], "netConfigStatus", Value::Integer(8))]);
	transaction.test_set();
	transaction.commit();

	let first = transaction.cleanup();
	let second = transaction.cleanup();
	assert_eq!(first, second);
	assert_eq!(get(&table, 3, "netConfigStatus"), Value::Integer(8));
	assert_eq!(faults.applies(), 1);
}
