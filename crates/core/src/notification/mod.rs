// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Notification (trap) construction.
//!
//! A [`NotificationType`] declares which columns of which source rows an
//! event carries. [`NotificationBuilder::build`] reads the committed values
//! of those columns and produces an immutable [`Notification`] whose first
//! varbind is `snmpTrapOID.0` naming the event.

mod registry;
mod sink;

use mibkit_type::{Error, Oid, Result, Type, Value};
use once_cell::sync::Lazy;
pub use registry::NotificationRegistry;
use serde::{Deserialize, Serialize};
pub use sink::{ChannelSink, NotificationSink};
use tracing::{instrument, trace};

use crate::row::Row;

/// `snmpTrapOID.0`, the address of every notification's leading varbind.
/// Initialized on first use and never mutated.
pub static SNMP_TRAP_OID: Lazy<Oid> = Lazy::new(|| Oid::from([1, 3, 6, 1, 6, 3, 1, 1, 4, 1, 0]));

/// An (address, value) pair; the value carries its own type tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarBind {
	pub oid: Oid,
	pub value: Value,
}

impl VarBind {
	pub fn new(oid: Oid, value: Value) -> Self {
		Self {
			oid,
			value,
		}
	}

	pub fn type_tag(&self) -> Type {
		self.value.get_type()
	}
}

/// One object carried by a notification: column `column` of source row
/// number `source`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationObject {
	pub source: usize,
	pub column: String,
}

/// Declaration of an event kind, e.g. `ifMauJabberTrap`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationType {
	name: String,
	oid: Oid,
	objects: Vec<NotificationObject>,
}

impl NotificationType {
	pub fn new(name: impl Into<String>, oid: impl Into<Oid>) -> Self {
		Self {
			name: name.into(),
			oid: oid.into(),
			objects: Vec::new(),
		}
	}

	/// Adds the column `column` of source row `source` as the next varbind.
	pub fn object(mut self, source: usize, column: impl Into<String>) -> Self {
		self.objects.push(NotificationObject {
			source,
			column: column.into(),
		});
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn oid(&self) -> &Oid {
		&self.oid
	}

	pub fn objects(&self) -> &[NotificationObject] {
		&self.objects
	}
}

/// A built event, ready for the transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
	kind: String,
	varbinds: Vec<VarBind>,
}

impl Notification {
	pub fn kind(&self) -> &str {
		&self.kind
	}

	pub fn varbinds(&self) -> &[VarBind] {
		&self.varbinds
	}

	/// The notification OID carried by the leading varbind.
	pub fn trap_oid(&self) -> Option<&Oid> {
		match self.varbinds.first().map(|vb| &vb.value) {
			Some(Value::ObjectIdentifier(oid)) => Some(oid),
			_ => None,
		}
	}

	/// Flattens into (address, type tag, value) triples.
	pub fn into_triples(self) -> Vec<(Oid, Type, Value)> {
		self.varbinds
			.into_iter()
			.map(|vb| {
				let tag = vb.type_tag();
				(vb.oid, tag, vb.value)
			})
			.collect()
	}
}

pub struct NotificationBuilder;

impl NotificationBuilder {
	/// Builds a notification of kind `kind` from `sources`. Pure read: no row
	/// is mutated and values captured by an in-flight transaction are
	/// reported as committed before it.
	#[instrument(name = "notification::build", level = "trace", skip_all, fields(kind = %kind.name()))]
	pub fn build(kind: &NotificationType, sources: &[&Row]) -> Result<Notification> {
		let mut varbinds = Vec::with_capacity(kind.objects.len() + 1);
		varbinds.push(VarBind::new(SNMP_TRAP_OID.clone(), Value::ObjectIdentifier(kind.oid.clone())));

		for object in &kind.objects {
			let row = sources.get(object.source).ok_or_else(|| {
				Error::Internal(format!(
					"{} references source row {} but {} were given",
					kind.name,
					object.source,
					sources.len()
				))
			})?;
			let schema = row.schema();
			let missing = || Error::AttributeMissing {
				attribute: object.column.clone(),
			};
			let column = schema.column(&object.column).ok_or_else(missing)?;
			let value = row.committed(&object.column).ok_or_else(missing)?;
			let address = row.index().instance_of(&schema.column_oid(column));
			varbinds.push(VarBind::new(address, value));
		}

		trace!(varbinds = varbinds.len(), "notification built");
		Ok(Notification {
			kind: kind.name.clone(),
			varbinds,
		})
	}
}
