// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod fault;
pub mod fixture;

pub use fault::FaultInjector;
