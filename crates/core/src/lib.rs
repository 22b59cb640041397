// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod index;
pub mod notification;
pub mod row;
pub mod schema;
pub mod store;
pub mod table;
pub mod tree;
pub mod write;

pub use index::{IndexCodec, IndexPart, IndexValue};
pub use mibkit_type::{Error, Oid, Outcome, Result, RowIndex, RowStatus, Type, Value};
pub use notification::{
	ChannelSink, Notification, NotificationBuilder, NotificationRegistry, NotificationSink, NotificationType,
	VarBind,
};
pub use row::{EnrollmentOwner, Row};
pub use schema::{Access, ColumnDef, Constraint, TableSchema};
pub use store::{AttributeStore, Snapshot};
pub use table::Table;
pub use tree::{MibTree, Target};
pub use write::PendingWrite;
