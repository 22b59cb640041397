// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The type tag carried next to every value on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	Integer,
	Counter32,
	Counter64,
	Gauge32,
	TimeTicks,
	OctetString,
	IpAddress,
	ObjectIdentifier,
	Enumerated,
}

impl Type {
	/// The BER/AgentX type tag.
	pub fn to_u8(&self) -> u8 {
		match self {
			Type::Integer | Type::Enumerated => 0x02,
			Type::OctetString => 0x04,
			Type::ObjectIdentifier => 0x06,
			Type::IpAddress => 0x40,
			Type::Counter32 => 0x41,
			Type::Gauge32 => 0x42,
			Type::TimeTicks => 0x43,
			Type::Counter64 => 0x46,
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Integer => f.write_str("INTEGER"),
			Type::Counter32 => f.write_str("Counter32"),
			Type::Counter64 => f.write_str("Counter64"),
			Type::Gauge32 => f.write_str("Gauge32"),
			Type::TimeTicks => f.write_str("TimeTicks"),
			Type::OctetString => f.write_str("OCTET STRING"),
			Type::IpAddress => f.write_str("IpAddress"),
			Type::ObjectIdentifier => f.write_str("OBJECT IDENTIFIER"),
			Type::Enumerated => f.write_str("INTEGER { .. }"),
		}
	}
}
