// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use mibkit_type::{Error, Result};
use tracing::{Level, Subscriber};
use tracing_subscriber::{EnvFilter, Registry, filter::LevelFilter, layer::SubscriberExt};

use crate::{TracingConfig, TracingSubsystem};

/// Builder for the process-wide `tracing` subscriber
#[derive(Debug, Clone)]
pub struct TracingBuilder {
	level: Level,
	filter: Option<String>,
	json: bool,
	ansi: bool,
	thread_names: bool,
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self {
			level: Level::INFO,
			filter: None,
			json: false,
			ansi: true,
			thread_names: false,
		}
	}

	pub fn from_config(config: &TracingConfig) -> Result<Self> {
		let level = config.level.parse::<Level>().map_err(|err| {
			Error::Internal(format!("invalid tracing level {:?}: {err}", config.level))
		})?;
		Ok(Self {
			level,
			filter: config.filter.clone(),
			json: config.json,
			ansi: config.ansi,
			thread_names: config.thread_names,
		})
	}

	pub fn with_level(mut self, level: Level) -> Self {
		self.level = level;
		self
	}

	/// `EnvFilter` directives; these replace `RUST_LOG` and the level.
	pub fn with_filter(mut self, directives: impl Into<String>) -> Self {
		self.filter = Some(directives.into());
		self
	}

	pub fn with_json(mut self, json: bool) -> Self {
		self.json = json;
		self
	}

	pub fn with_ansi(mut self, ansi: bool) -> Self {
		self.ansi = ansi;
		self
	}

	pub fn with_thread_names(mut self, thread_names: bool) -> Self {
		self.thread_names = thread_names;
		self
	}

	pub fn level(&self) -> Level {
		self.level
	}

	fn env_filter(&self) -> Result<EnvFilter> {
		match &self.filter {
			Some(directives) => EnvFilter::try_new(directives)
				.map_err(|err| Error::Internal(format!("invalid tracing filter {directives:?}: {err}"))),
			None => Ok(EnvFilter::builder()
				.with_default_directive(LevelFilter::from_level(self.level).into())
				.from_env_lossy()),
		}
	}

	/// The configured subscriber, not yet installed.
	pub fn subscriber(&self) -> Result<Box<dyn Subscriber + Send + Sync>> {
		let filter = self.env_filter()?;
		let layer = tracing_subscriber::fmt::layer().with_thread_names(self.thread_names);

		if self.json {
			Ok(Box::new(Registry::default().with(filter).with(layer.json())))
		} else {
			Ok(Box::new(Registry::default().with(filter).with(layer.with_ansi(self.ansi))))
		}
	}

	/// Installs the subscriber as the global default.
	pub fn init(self) -> Result<()> {
		let subscriber = self.subscriber()?;
		tracing::subscriber::set_global_default(subscriber)
			.map_err(|err| Error::Internal(format!("tracing subscriber already installed: {err}")))
	}

	pub fn build(self) -> TracingSubsystem {
		TracingSubsystem::new(self)
	}
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}
