// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Bridge contract bindings
//!
//! This module contains `sol!` bindings for the contracts the bridge flow
//! touches, and thin wrappers that build transaction requests and decode
//! read-only calls through a [`ChainClient`](crate::ChainClient).
//!
//! - Circle CCTP: [`TokenMessengerContract`](token_messenger::TokenMessengerContract),
//!   [`MessageTransmitterContract`](message_transmitter::MessageTransmitterContract)
//! - Wormhole: [`CircleRelayerContract`](circle_relayer::CircleRelayerContract),
//!   [`CircleIntegrationContract`](circle_integration::CircleIntegrationContract),
//!   core bridge events
//! - USDC: [`Erc20Contract`](erc20::Erc20Contract)

use alloy_primitives::Address;
use alloy_rpc_types::{TransactionInput, TransactionRequest};

pub mod circle_integration;
pub mod circle_relayer;
pub mod erc20;
pub mod message_transmitter;
pub mod token_messenger;
pub mod wormhole_core;

/// A call to `address` carrying the given ABI-encoded calldata.
pub(crate) fn transaction_to(address: Address, calldata: Vec<u8>) -> TransactionRequest {
    TransactionRequest::default()
        .to(address)
        .input(TransactionInput::new(calldata.into()))
}
