// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::Deref,
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::Error;

/// An object identifier: the address of a managed object in the MIB tree.
///
/// Ordering is lexicographic over sub-identifiers, with a proper prefix
/// ordered before any of its extensions. This is the order GETNEXT walks.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Oid(Vec<u32>);

impl Oid {
	pub fn new(subids: impl Into<Vec<u32>>) -> Self {
		Self(subids.into())
	}

	pub fn as_slice(&self) -> &[u32] {
		&self.0
	}

	pub fn starts_with(&self, prefix: &Oid) -> bool {
		self.0.starts_with(&prefix.0)
	}

	/// Returns a new identifier with `suffix` appended.
	pub fn child(&self, suffix: &[u32]) -> Self {
		let mut subids = Vec::with_capacity(self.0.len() + suffix.len());
		subids.extend_from_slice(&self.0);
		subids.extend_from_slice(suffix);
		Self(subids)
	}
}

impl Deref for Oid {
	type Target = [u32];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<Vec<u32>> for Oid {
	fn from(subids: Vec<u32>) -> Self {
		Self(subids)
	}
}

impl From<&[u32]> for Oid {
	fn from(subids: &[u32]) -> Self {
		Self(subids.to_vec())
	}
}

impl<const N: usize> From<[u32; N]> for Oid {
	fn from(subids: [u32; N]) -> Self {
		Self(subids.to_vec())
	}
}

impl Display for Oid {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let mut first = true;
		for subid in &self.0 {
			if !first {
				f.write_str(".")?;
			}
			write!(f, "{subid}")?;
			first = false;
		}
		Ok(())
	}
}

impl FromStr for Oid {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.strip_prefix('.').unwrap_or(s);
		if trimmed.is_empty() {
			return Ok(Self::default());
		}
		trimmed.split('.')
			.map(|part| {
				part.parse::<u32>().map_err(|_| Error::InvalidOid {
					input: s.to_string(),
				})
			})
			.collect::<Result<Vec<_>, _>>()
			.map(Self)
	}
}

/// Builds an [`Oid`] from sub-identifiers. Each one must be a `u32`; a
/// negative or oversized literal does not compile.
///
/// ```compile_fail
/// let _ = mibkit_type::oid!(1, 3, -6);
/// ```
#[macro_export]
macro_rules! oid {
	($($subid:expr),* $(,)?) => {{
		let subids: ::std::vec::Vec<u32> = ::std::vec![$($subid),*];
		$crate::value::Oid::new(subids)
	}};
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display_and_parse() {
		let oid: Oid = "1.3.6.1.2.1.26".parse().unwrap();
		assert_eq!(oid.as_slice(), &[1, 3, 6, 1, 2, 1, 26]);
		assert_eq!(oid.to_string(), "1.3.6.1.2.1.26");

		let leading_dot: Oid = ".1.3.6".parse().unwrap();
		assert_eq!(leading_dot, oid!(1, 3, 6));
	}

	#[test]
	fn test_parse_invalid() {
		assert!("1.3.x".parse::<Oid>().is_err());
		assert!("1..3".parse::<Oid>().is_err());
		assert!("1.3.4294967296".parse::<Oid>().is_err());
	}

	#[test]
	fn test_prefix_orders_first() {
		assert!(oid!(1, 3, 6) < oid!(1, 3, 6, 0));
		assert!(oid!(1, 3, 6, 9) < oid!(1, 3, 7));
		assert!(oid!(1, 3, 7) > oid!(1, 3, 6, 1, 2));
	}

	#[test]
	fn test_child() {
		let entry = oid!(1, 3, 6, 1, 2, 1, 26, 2, 1, 1);
		let column = entry.child(&[7]);
		assert!(column.starts_with(&entry));
		assert_eq!(column.len(), entry.len() + 1);
	}
}
