// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! MessageTransmitter contract bindings
//!
//! The Circle emitter: it emits `MessageSent` on the source chain and mints
//! on the destination chain through `receiveMessage`.

use alloy_primitives::{Address, Bytes};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{sol, SolCall};
use tracing::info;

use super::transaction_to;
use MessageTransmitter::receiveMessageCall;

/// The Circle emitter (MessageTransmitter) contract wrapper
#[derive(Debug, Clone, Copy)]
pub struct MessageTransmitterContract {
    address: Address,
}

impl MessageTransmitterContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Create the transaction request that redeems an attested message.
    pub fn receive_message_transaction(
        &self,
        from_address: Address,
        message: Bytes,
        attestation: Bytes,
    ) -> TransactionRequest {
        info!(
            from_address = %from_address,
            message_len = message.len(),
            attestation_len = attestation.len(),
            contract_address = %self.address,
            event = "receive_message_transaction_created"
        );

        let call = receiveMessageCall {
            message,
            attestation,
        };
        transaction_to(self.address, call.abi_encode()).from(from_address)
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

sol!(
    #[allow(missing_docs)]
    contract MessageTransmitter {
        event MessageSent(bytes message);

        function receiveMessage(bytes message, bytes attestation) external returns (bool success);
    }
);
