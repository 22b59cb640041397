// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use mibkit_type::Result;
use tracing::debug;

use crate::TracingBuilder;

/// Owns the logging setup of an agent process. Starting installs the global
/// subscriber; starting again does nothing.
#[derive(Debug)]
pub struct TracingSubsystem {
	builder: Option<TracingBuilder>,
	running: bool,
}

impl TracingSubsystem {
	pub(crate) fn new(builder: TracingBuilder) -> Self {
		Self {
			builder: Some(builder),
			running: false,
		}
	}

	pub fn start(&mut self) -> Result<()> {
		if let Some(builder) = self.builder.take() {
			let level = builder.level();
			builder.init()?;
			self.running = true;
			debug!(%level, "tracing subsystem started");
		}
		Ok(())
	}

	pub fn is_running(&self) -> bool {
		self.running
	}
}
