// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

mod index;
mod oid;
mod status;
mod r#type;

pub use index::RowIndex;
pub use oid::Oid;
pub use status::RowStatus;
pub use r#type::Type;

/// A managed-object value, represented as a native Rust type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
	/// A 32-bit signed integer
	Integer(i32),
	/// A wrapping 32-bit counter
	Counter32(u32),
	/// A wrapping 64-bit counter
	Counter64(u64),
	/// A non-wrapping 32-bit gauge
	Gauge32(u32),
	/// Hundredths of a second since some epoch
	TimeTicks(u32),
	/// An arbitrary byte string
	OctetString(Vec<u8>),
	/// An IPv4 address in network byte order
	IpAddress([u8; 4]),
	/// An object identifier
	ObjectIdentifier(Oid),
	/// An enumerated integer such as a RowStatus or a textual-convention status
	Enumerated(i32),
}

impl Value {
	pub fn octets(v: impl Into<Vec<u8>>) -> Self {
		Value::OctetString(v.into())
	}

	pub fn oid(v: impl Into<Oid>) -> Self {
		Value::ObjectIdentifier(v.into())
	}

	pub fn status(status: RowStatus) -> Self {
		Value::Enumerated(status.into())
	}

	pub fn get_type(&self) -> Type {
		match self {
			Value::Integer(_) => Type::Integer,
			Value::Counter32(_) => Type::Counter32,
			Value::Counter64(_) => Type::Counter64,
			Value::Gauge32(_) => Type::Gauge32,
			Value::TimeTicks(_) => Type::TimeTicks,
			Value::OctetString(_) => Type::OctetString,
			Value::IpAddress(_) => Type::IpAddress,
			Value::ObjectIdentifier(_) => Type::ObjectIdentifier,
			Value::Enumerated(_) => Type::Enumerated,
		}
	}

	/// Numeric view used by range constraints; `None` for non-numeric values.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Value::Integer(v) | Value::Enumerated(v) => Some(*v as i64),
			Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => Some(*v as i64),
			Value::Counter64(v) => i64::try_from(*v).ok(),
			_ => None,
		}
	}

	/// Byte length of string-like values; `None` for scalars.
	pub fn octet_len(&self) -> Option<usize> {
		match self {
			Value::OctetString(bytes) => Some(bytes.len()),
			Value::IpAddress(bytes) => Some(bytes.len()),
			_ => None,
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Integer(v) => write!(f, "{v}"),
			Value::Counter32(v) => write!(f, "{v}"),
			Value::Counter64(v) => write!(f, "{v}"),
			Value::Gauge32(v) => write!(f, "{v}"),
			Value::TimeTicks(v) => write!(f, "({v})"),
			Value::OctetString(bytes) => {
				f.write_str("0x")?;
				for b in bytes {
					write!(f, "{b:02x}")?;
				}
				Ok(())
			}
			Value::IpAddress([a, b, c, d]) => write!(f, "{a}.{b}.{c}.{d}"),
			Value::ObjectIdentifier(oid) => write!(f, "{oid}"),
			Value::Enumerated(v) => write!(f, "{v}"),
		}
	}
}

impl From<RowStatus> for Value {
	fn from(status: RowStatus) -> Self {
		Value::status(status)
	}
}

impl From<Oid> for Value {
	fn from(oid: Oid) -> Self {
		Value::ObjectIdentifier(oid)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_get_type() {
		assert_eq!(Value::Integer(1).get_type(), Type::Integer);
		assert_eq!(Value::octets(vec![1, 2]).get_type(), Type::OctetString);
		assert_eq!(Value::status(RowStatus::Active).get_type(), Type::Enumerated);
		assert_eq!(Value::oid([1, 3, 6]).get_type(), Type::ObjectIdentifier);
	}

	#[test]
	fn test_as_i64() {
		assert_eq!(Value::Integer(-3).as_i64(), Some(-3));
		assert_eq!(Value::Counter32(u32::MAX).as_i64(), Some(u32::MAX as i64));
		assert_eq!(Value::Counter64(u64::MAX).as_i64(), None);
		assert_eq!(Value::octets(vec![1]).as_i64(), None);
	}

	#[test]
	fn test_display() {
		assert_eq!(Value::octets(vec![0x0a, 0x00, 0xff]).to_string(), "0x0a00ff");
		assert_eq!(Value::IpAddress([10, 0, 0, 1]).to_string(), "10.0.0.1");
		assert_eq!(Value::TimeTicks(42).to_string(), "(42)");
	}

	#[test]
	fn test_serde() {
		let value = Value::IpAddress([192, 168, 1, 1]);
		let json = serde_json::to_string(&value).unwrap();
		let back: Value = serde_json::from_str(&json).unwrap();
		assert_eq!(back, value);
	}
}
