// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;
use mibkit_type::{Error, Result};
use once_cell::sync::OnceCell;

use super::NotificationType;

static GLOBAL: OnceCell<NotificationRegistry> = OnceCell::new();

/// Read-only table of the event kinds an agent can emit, keyed by name.
///
/// Built once at startup. [`NotificationRegistry::install`] publishes it
/// process-wide; it is never mutated afterwards.
#[derive(Debug, Default, Clone)]
pub struct NotificationRegistry {
	types: IndexMap<String, NotificationType>,
}

impl NotificationRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, kind: NotificationType) -> Result<Self> {
		if self.types.contains_key(kind.name()) {
			return Err(Error::Internal(format!("notification {} declared twice", kind.name())));
		}
		self.types.insert(kind.name().to_string(), kind);
		Ok(self)
	}

	pub fn get(&self, name: &str) -> Option<&NotificationType> {
		self.types.get(name)
	}

	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// Publishes `self` as the process-wide registry. Fails if one is
	/// already installed.
	pub fn install(self) -> Result<&'static NotificationRegistry> {
		GLOBAL.set(self).map_err(|_| Error::Internal("notification registry already installed".to_string()))?;
		GLOBAL.get().ok_or_else(|| Error::Internal("notification registry missing after install".to_string()))
	}

	pub fn global() -> Option<&'static NotificationRegistry> {
		GLOBAL.get()
	}
}
