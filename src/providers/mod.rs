// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Production implementations of the bridge trait abstractions.
//!
//! These talk to real chains through Alloy, to Circle's Iris API, to the
//! Wormhole guardian REST API, and to the Tokio clock. Tests use the fakes in
//! [`crate::testing`] instead.

mod alloy;
mod iris;
mod tokio_clock;
mod wormhole;

pub use self::alloy::AlloyChainClient;
pub use self::iris::IrisAttestationProvider;
pub use self::tokio_clock::TokioClock;
pub use self::wormhole::WormholeRpcProvider;
