// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! TokenMessenger contract bindings and wrapper
//!
//! The Circle bridge contract that burns USDC on the source chain and emits
//! the cross-chain message through the MessageTransmitter.

use alloy_primitives::{Address, U256};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{sol, SolCall};
use tracing::info;

use super::transaction_to;
use crate::spans;
use TokenMessenger::depositForBurnCall;

/// The Circle bridge (TokenMessenger) contract wrapper
#[derive(Debug, Clone, Copy)]
pub struct TokenMessengerContract {
    address: Address,
}

impl TokenMessengerContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Create the transaction request for the `depositForBurn` function.
    ///
    /// The recipient is left-padded to 32 bytes as the contract expects.
    pub fn deposit_for_burn_transaction(
        &self,
        from_address: Address,
        recipient: Address,
        destination_domain: u32,
        token_address: Address,
        amount: U256,
    ) -> TransactionRequest {
        let span = spans::deposit_for_burn(
            &from_address,
            &recipient,
            destination_domain,
            &token_address,
            &amount,
        );
        let _guard = span.enter();

        info!(
            from_address = %from_address,
            recipient = %recipient,
            destination_domain = destination_domain,
            token_address = %token_address,
            amount = %amount,
            contract_address = %self.address,
            event = "deposit_for_burn_transaction_created"
        );

        let call = depositForBurnCall {
            amount,
            destinationDomain: destination_domain,
            mintRecipient: recipient.into_word(),
            burnToken: token_address,
        };
        transaction_to(self.address, call.abi_encode()).from(from_address)
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

sol!(
    #[allow(missing_docs)]
    contract TokenMessenger {
        function depositForBurn(
            uint256 amount,
            uint32 destinationDomain,
            bytes32 mintRecipient,
            address burnToken
        ) external returns (uint64 nonce);
    }
);
