// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use mibkit_type::{Error, Result};
use tracing::debug;

use super::Notification;

/// The transport boundary for events. Implementations take a whole
/// notification or nothing.
pub trait NotificationSink: Send + Sync {
	fn deliver(&self, notification: Notification) -> Result<()>;
}

/// Hands notifications to a consumer thread over a channel.
#[derive(Clone)]
pub struct ChannelSink {
	sender: Sender<Notification>,
}

impl ChannelSink {
	pub fn unbounded() -> (Self, Receiver<Notification>) {
		let (sender, receiver) = unbounded();
		(
			Self {
				sender,
			},
			receiver,
		)
	}

	pub fn bounded(capacity: usize) -> (Self, Receiver<Notification>) {
		let (sender, receiver) = bounded(capacity);
		(
			Self {
				sender,
			},
			receiver,
		)
	}
}

impl NotificationSink for ChannelSink {
	fn deliver(&self, notification: Notification) -> Result<()> {
		let kind = notification.kind().to_string();
		self.sender.try_send(notification).map_err(|err| Error::ResourceUnavailable {
			reason: format!("notification {kind} not delivered: {err}"),
		})?;
		debug!(kind = %kind, "notification delivered");
		Ok(())
	}
}
