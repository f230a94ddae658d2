// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Wormhole Circle integration contract bindings

use alloy_primitives::{Address, B256};
use alloy_sol_types::{sol, SolCall, SolValue};
use tracing::debug;

use super::transaction_to;
use crate::error::Result;
use crate::traits::ChainClient;
use CircleIntegration::isMessageConsumedCall;

/// The Wormhole Circle integration contract wrapper
#[derive(Debug, Clone, Copy)]
pub struct CircleIntegrationContract {
    address: Address,
}

impl CircleIntegrationContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Whether the VAA with the given digest was already redeemed.
    pub async fn is_message_consumed<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        digest: B256,
    ) -> Result<bool> {
        let output = client
            .call(transaction_to(
                self.address,
                isMessageConsumedCall { hash: digest }.abi_encode(),
            ))
            .await?;
        let consumed = bool::abi_decode(&output)?;

        debug!(
            digest = %digest,
            consumed = consumed,
            contract_address = %self.address,
            event = "message_consumed_checked"
        );

        Ok(consumed)
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

sol!(
    #[allow(missing_docs)]
    contract CircleIntegration {
        function isMessageConsumed(bytes32 hash) external view returns (bool);
    }
);
