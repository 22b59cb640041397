// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
	ops::Deref,
};

use serde::{Deserialize, Serialize};

use crate::value::Oid;

/// The flattened key of a table row: the instance suffix appended to a
/// column's OID to address that row's cell.
///
/// A `RowIndex` never changes once the row exists. The derived ordering is
/// lexicographic over components with a proper prefix first.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowIndex(Vec<u32>);

impl RowIndex {
	pub fn new(components: impl Into<Vec<u32>>) -> Self {
		Self(components.into())
	}

	pub fn components(&self) -> &[u32] {
		&self.0
	}

	pub fn compare(&self, other: &RowIndex) -> Ordering {
		self.cmp(other)
	}

	/// The address of this row's cell under the given column OID.
	pub fn instance_of(&self, column: &Oid) -> Oid {
		column.child(&self.0)
	}
}

impl Deref for RowIndex {
	type Target = [u32];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<Vec<u32>> for RowIndex {
	fn from(components: Vec<u32>) -> Self {
		Self(components)
	}
}

impl From<&[u32]> for RowIndex {
	fn from(components: &[u32]) -> Self {
		Self(components.to_vec())
	}
}

impl<const N: usize> From<[u32; N]> for RowIndex {
	fn from(components: [u32; N]) -> Self {
		Self(components.to_vec())
	}
}

impl Display for RowIndex {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("[")?;
		for (i, component) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(".")?;
			}
			write!(f, "{component}")?;
		}
		f.write_str("]")
	}
}
