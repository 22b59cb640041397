// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
	/// Members beyond this count fail TEST_SET with resourceUnavailable.
	pub max_batch_size: usize,
}

impl Default for CoordinatorConfig {
	fn default() -> Self {
		Self {
			max_batch_size: 1024,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_deserialize_with_defaults() {
		let config: CoordinatorConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config, CoordinatorConfig::default());

		let config: CoordinatorConfig = serde_json::from_str(r#"{"max_batch_size": 8}"#).unwrap();
		assert_eq!(config.max_batch_size, 8);
	}
}
