// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Table shapes taken from RMON, RMON2 and the MAU MIB, small enough to
//! reason about in a test and varied enough to cover every index layout.

mod control;
mod mau;
mod matrix;
mod net_config;

pub use control::{HOST_CONTROL_ENTRY, host_control};
pub use mau::{IF_MAU_ENTRY, IF_MAU_JABBER_TRAP, RP_JACK_ENTRY, if_mau, jabber_trap, rp_jack};
pub use matrix::{AL_MATRIX_DS_ENTRY, al_matrix_ds};
pub use net_config::{NET_CONFIG_ENTRY, net_config};
