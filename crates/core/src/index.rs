// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Index codec: flattens composite row keys into the integer sequence that
//! follows a column OID, and back.
//!
//! Each component of a composite key maps to sub-identifiers as follows:
//!
//! * [`IndexPart::Integer`]: a single sub-identifier.
//! * [`IndexPart::FixedOctets`]: one sub-identifier per byte, no length.
//! * [`IndexPart::Octets`]: the length, then one sub-identifier per byte.
//! * [`IndexPart::Oid`]: the number of sub-identifiers, then the sub-identifiers.
//! * [`IndexPart::ImpliedOctets`] / [`IndexPart::ImpliedOid`]: like their
//!   non-implied forms but without the length. Only allowed last.
//!
//! Because every variable-length component is either length-prefixed or
//! runs to the end of the key, distinct component sequences never produce
//! the same [`RowIndex`]. The derived ordering of `RowIndex` is the GETNEXT
//! order.

use std::cmp::Ordering;

use mibkit_type::{Error, Oid, Result, RowIndex};
use serde::{Deserialize, Serialize};

/// One component of an index layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexPart {
	Integer,
	FixedOctets(usize),
	Octets,
	ImpliedOctets,
	Oid,
	ImpliedOid,
}

impl IndexPart {
	fn is_implied(&self) -> bool {
		matches!(self, IndexPart::ImpliedOctets | IndexPart::ImpliedOid)
	}
}

/// A typed index component before flattening.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexValue {
	Integer(u32),
	Octets(Vec<u8>),
	Oid(Oid),
}

impl From<u32> for IndexValue {
	fn from(v: u32) -> Self {
		IndexValue::Integer(v)
	}
}

impl From<Vec<u8>> for IndexValue {
	fn from(v: Vec<u8>) -> Self {
		IndexValue::Octets(v)
	}
}

impl From<&[u8]> for IndexValue {
	fn from(v: &[u8]) -> Self {
		IndexValue::Octets(v.to_vec())
	}
}

impl From<Oid> for IndexValue {
	fn from(v: Oid) -> Self {
		IndexValue::Oid(v)
	}
}

/// Encodes and decodes the row keys of one table according to its layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexCodec {
	parts: Vec<IndexPart>,
}

impl IndexCodec {
	pub fn new(parts: impl Into<Vec<IndexPart>>) -> Result<Self> {
		let parts = parts.into();
		if let Some(position) = parts.iter().position(IndexPart::is_implied) {
			if position != parts.len() - 1 {
				return Err(Error::MalformedIndex {
					reason: format!("implied component at position {position} is not last"),
				});
			}
		}
		Ok(Self {
			parts,
		})
	}

	pub fn parts(&self) -> &[IndexPart] {
		&self.parts
	}

	pub fn encode(&self, values: &[IndexValue]) -> Result<RowIndex> {
		if values.len() != self.parts.len() {
			return Err(Error::MalformedIndex {
				reason: format!("expected {} components, got {}", self.parts.len(), values.len()),
			});
		}

		let mut out = Vec::new();
		for (position, (part, value)) in self.parts.iter().zip(values).enumerate() {
			match (part, value) {
				(IndexPart::Integer, IndexValue::Integer(v)) => out.push(*v),
				(IndexPart::FixedOctets(len), IndexValue::Octets(bytes)) => {
					if bytes.len() != *len {
						return Err(Error::MalformedIndex {
							reason: format!(
								"component {position} needs {len} bytes, got {}",
								bytes.len()
							),
						});
					}
					out.extend(bytes.iter().map(|b| *b as u32));
				}
				(IndexPart::Octets, IndexValue::Octets(bytes)) => {
					out.push(bytes.len() as u32);
					out.extend(bytes.iter().map(|b| *b as u32));
				}
				(IndexPart::ImpliedOctets, IndexValue::Octets(bytes)) => {
					out.extend(bytes.iter().map(|b| *b as u32));
				}
				(IndexPart::Oid, IndexValue::Oid(oid)) => {
					out.push(oid.len() as u32);
					out.extend_from_slice(oid);
				}
				(IndexPart::ImpliedOid, IndexValue::Oid(oid)) => out.extend_from_slice(oid),
				(part, value) => {
					return Err(Error::MalformedIndex {
						reason: format!("component {position} is {part:?}, got {value:?}"),
					});
				}
			}
		}
		Ok(RowIndex::new(out))
	}

	pub fn decode(&self, index: &RowIndex) -> Result<Vec<IndexValue>> {
		let mut input = index.components();
		let mut values = Vec::with_capacity(self.parts.len());

		for part in &self.parts {
			let value = match part {
				IndexPart::Integer => {
					let (head, rest) = take(input, 1)?;
					input = rest;
					IndexValue::Integer(head[0])
				}
				IndexPart::FixedOctets(len) => {
					let (head, rest) = take(input, *len)?;
					input = rest;
					IndexValue::Octets(to_bytes(head)?)
				}
				IndexPart::Octets => {
					let (len, rest) = take(input, 1)?;
					let (head, rest) = take(rest, len[0] as usize)?;
					input = rest;
					IndexValue::Octets(to_bytes(head)?)
				}
				IndexPart::ImpliedOctets => {
					let bytes = to_bytes(input)?;
					input = &[];
					IndexValue::Octets(bytes)
				}
				IndexPart::Oid => {
					let (len, rest) = take(input, 1)?;
					let (head, rest) = take(rest, len[0] as usize)?;
					input = rest;
					IndexValue::Oid(Oid::from(head))
				}
				IndexPart::ImpliedOid => {
					let oid = Oid::from(input);
					input = &[];
					IndexValue::Oid(oid)
				}
			};
			values.push(value);
		}

		if !input.is_empty() {
			return Err(Error::MalformedIndex {
				reason: format!("unexpected trailing components {input:?} in {index}"),
			});
		}
		Ok(values)
	}
}

fn take(input: &[u32], n: usize) -> Result<(&[u32], &[u32])> {
	if input.len() < n {
		return Err(Error::MalformedIndex {
			reason: format!("needed {n} components, {} left", input.len()),
		});
	}
	Ok(input.split_at(n))
}

fn to_bytes(components: &[u32]) -> Result<Vec<u8>> {
	components
		.iter()
		.map(|c| {
			u8::try_from(*c).map_err(|_| Error::MalformedIndex {
				reason: format!("component {c} is not a byte"),
			})
		})
		.collect()
}

/// Builds a row key directly from its flat components.
pub fn encode(components: &[u32]) -> RowIndex {
	RowIndex::from(components)
}

/// Extracts the trailing `suffix_len` sub-identifiers of a full variable
/// address: the row key part of `<column>.<index>`.
pub fn decode(address: &Oid, suffix_len: usize) -> Result<Vec<u32>> {
	if suffix_len > address.len() {
		return Err(Error::MalformedIndex {
			reason: format!("suffix of {suffix_len} exceeds address {address}"),
		});
	}
	Ok(address[address.len() - suffix_len..].to_vec())
}

pub fn compare(a: &RowIndex, b: &RowIndex) -> Ordering {
	a.cmp(b)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn matrix_codec() -> IndexCodec {
		IndexCodec::new([
			IndexPart::Integer,
			IndexPart::Integer,
			IndexPart::Integer,
			IndexPart::Octets,
			IndexPart::Octets,
		])
		.unwrap()
	}

	#[test]
	fn test_encode_composite() {
		let codec = matrix_codec();
		let index = codec
			.encode(&[
				IndexValue::Integer(1),
				IndexValue::Integer(500),
				IndexValue::Integer(7),
				IndexValue::Octets(vec![10, 0, 0, 1]),
				IndexValue::Octets(vec![10, 0, 0, 2]),
			])
			.unwrap();
		assert_eq!(index.components(), &[1, 500, 7, 4, 10, 0, 0, 1, 4, 10, 0, 0, 2]);
	}

	#[test]
	fn test_decode_composite() {
		let codec = matrix_codec();
		let values = codec.decode(&RowIndex::from([1, 500, 7, 2, 1, 2, 0])).unwrap();
		assert_eq!(
			values,
			vec![
				IndexValue::Integer(1),
				IndexValue::Integer(500),
				IndexValue::Integer(7),
				IndexValue::Octets(vec![1, 2]),
				IndexValue::Octets(vec![]),
			]
		);
	}

	#[test]
	fn test_length_prefix_keeps_keys_distinct() {
		let codec = IndexCodec::new([IndexPart::Octets, IndexPart::Octets]).unwrap();
		let a = codec.encode(&[vec![1u8, 2].into(), vec![3u8].into()]).unwrap();
		let b = codec.encode(&[vec![1u8].into(), vec![2u8, 3].into()]).unwrap();
		assert_ne!(a, b);
	}

	#[test]
	fn test_fixed_octets() {
		let codec = IndexCodec::new([IndexPart::FixedOctets(4)]).unwrap();
		let index = codec.encode(&[vec![192u8, 168, 0, 1].into()]).unwrap();
		assert_eq!(index.components(), &[192, 168, 0, 1]);
		assert!(codec.encode(&[vec![1u8, 2].into()]).is_err());
		assert!(codec.decode(&RowIndex::from([1, 2, 3])).is_err());
	}

	#[test]
	fn test_implied_must_be_last() {
		assert!(IndexCodec::new([IndexPart::ImpliedOctets, IndexPart::Integer]).is_err());

		let codec = IndexCodec::new([IndexPart::Integer, IndexPart::ImpliedOid]).unwrap();
		let index = codec.encode(&[3u32.into(), Oid::from([1, 3, 6]).into()]).unwrap();
		assert_eq!(index.components(), &[3, 1, 3, 6]);
		assert_eq!(codec.decode(&index).unwrap()[1], IndexValue::Oid(Oid::from([1, 3, 6])));
	}

	#[test]
	fn test_decode_rejects_bad_input() {
		let codec = IndexCodec::new([IndexPart::Octets]).unwrap();
		assert!(codec.decode(&RowIndex::from([3, 1, 2])).is_err());
		assert!(codec.decode(&RowIndex::from([1, 256])).is_err());
		assert!(codec.decode(&RowIndex::from([1, 2, 9])).is_err());
	}

	#[test]
	fn test_decode_suffix() {
		let address = Oid::from([1, 3, 6, 1, 2, 1, 26, 2, 1, 1, 7, 3, 2, 1]);
		assert_eq!(decode(&address, 3).unwrap(), vec![3, 2, 1]);
		assert!(decode(&address, 20).is_err());
	}

	#[test]
	fn test_compare() {
		assert_eq!(compare(&encode(&[1, 2]), &encode(&[2, 1])), Ordering::Less);
		assert_eq!(compare(&encode(&[1]), &encode(&[1, 0])), Ordering::Less);
		assert_eq!(compare(&encode(&[2]), &encode(&[2])), Ordering::Equal);
	}
}
