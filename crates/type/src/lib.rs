// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod error;
pub mod outcome;
pub mod value;

pub use error::Error;
pub use outcome::Outcome;
pub use value::{Oid, RowIndex, RowStatus, Type, Value};

pub type Result<T> = std::result::Result<T, Error>;
