// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::Deref,
};

use mibkit_core::EnrollmentOwner;
use uuid::Uuid;

mod config;
mod coordinator;
mod outcome;
mod phase;

pub use config::CoordinatorConfig;
pub use coordinator::{SetCoordinator, SetTransaction};
pub use mibkit_core::PendingWrite;
pub use outcome::{BatchOutcome, MemberOutcome};
pub use phase::{BatchState, MemberState, Phase};

/// Identifies one SET batch. UUIDv7, so ids sort by creation time.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BatchId(Uuid);

impl Default for BatchId {
	fn default() -> Self {
		Self::generate()
	}
}

impl Deref for BatchId {
	type Target = Uuid;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl BatchId {
	pub fn generate() -> Self {
		Self(Uuid::now_v7())
	}

	/// The owner tag this batch enrolls rows under.
	pub fn owner(&self) -> EnrollmentOwner {
		self.0.as_u128()
	}
}

impl From<Uuid> for BatchId {
	fn from(uuid: Uuid) -> Self {
		Self(uuid)
	}
}

impl Display for BatchId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}
