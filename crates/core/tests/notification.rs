// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::thread;

use mibkit_core::{
	ChannelSink, MibTree, NotificationBuilder, NotificationRegistry, NotificationSink, Oid, RowIndex, Type, Value,
};
use mibkit_testing::fixture::{IF_MAU_JABBER_TRAP, if_mau, jabber_trap};

#[test]
fn test_jabber_trap_through_registry_and_sink() {
	let registry = NotificationRegistry::new().with(jabber_trap()).unwrap().install().unwrap();
	let kind = registry.get("ifMauJabberTrap").unwrap();

	let table = if_mau();
	let row = table.create(RowIndex::from([3, 1])).unwrap();
	row.load("ifMauJabberState", Value::Enumerated(4)).unwrap();

	let (sink, receiver) = ChannelSink::bounded(4);
	let producer = thread::spawn(move || {
		let notification = NotificationBuilder::build(kind, &[row.as_ref()]).unwrap();
		sink.deliver(notification).unwrap();
	});
	producer.join().unwrap();

	let notification = receiver.recv().unwrap();
	assert_eq!(notification.kind(), "ifMauJabberTrap");
	assert_eq!(notification.trap_oid(), Some(&Oid::from(IF_MAU_JABBER_TRAP)));

	let triples = notification.into_triples();
	assert_eq!(triples.len(), 2);
	assert_eq!(triples[0].0.to_string(), "1.3.6.1.6.3.1.1.4.1.0");
	assert_eq!(triples[1].0.to_string(), "1.3.6.1.2.1.26.2.1.1.7.3.1");
	assert_eq!(triples[1].1, Type::Enumerated);
	assert_eq!(triples[1].2, Value::Enumerated(4));

	assert!(NotificationRegistry::global().is_some());
	assert!(NotificationRegistry::new().install().is_err());
}

#[test]
fn test_tree_walk_over_mau_table() {
	let table = if_mau();
	table.create(RowIndex::from([1, 1])).unwrap();
	table.create(RowIndex::from([2, 1])).unwrap();
	let tree = MibTree::new();
	tree.register(table).unwrap();

	let mut address = Oid::from([1, 3, 6, 1, 2, 1, 26]);
	let mut count = 0;
	while let Some(varbind) = tree.get_next(&address) {
		assert!(varbind.oid > address);
		address = varbind.oid;
		count += 1;
	}
	// six readable columns, two rows each
	assert_eq!(count, 12);
}
