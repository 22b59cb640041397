// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
	/// Default level when neither `filter` nor `RUST_LOG` says otherwise.
	pub level: String,
	/// `EnvFilter` directives, e.g. `mibkit_transaction=debug,warn`.
	pub filter: Option<String>,
	pub json: bool,
	pub ansi: bool,
	pub thread_names: bool,
}

impl Default for TracingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			filter: None,
			json: false,
			ansi: true,
			thread_names: false,
		}
	}
}
