// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod builder;
mod config;
mod factory;
mod subsystem;

pub use builder::TracingBuilder;
pub use config::TracingConfig;
pub use factory::{TracingConfigurator, TracingSubsystemFactory};
pub use subsystem::TracingSubsystem;
