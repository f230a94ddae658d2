// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Wormhole USDC relayer contract bindings
//!
//! The relayer takes USDC on the source chain, publishes a Wormhole message
//! through the Circle integration contract and, on the destination chain,
//! redeems the transfer while swapping part of it for native gas.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{sol, SolCall, SolValue};
use tracing::{debug, info};

use super::transaction_to;
use crate::error::Result;
use crate::spans;
use crate::traits::ChainClient;
use CircleRelayer::{
    calculateNativeSwapAmountCall, redeemTokensCall, transferTokensWithRelayCall,
    RedeemParameters,
};

/// The Wormhole USDC relayer contract wrapper
#[derive(Debug, Clone, Copy)]
pub struct CircleRelayerContract {
    address: Address,
}

impl CircleRelayerContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Create the transaction request for `transferTokensWithRelay`.
    pub fn transfer_tokens_with_relay_transaction(
        &self,
        from_address: Address,
        token: Address,
        amount: U256,
        to_native_token_amount: U256,
        target_chain: u16,
        target_recipient_wallet: B256,
    ) -> TransactionRequest {
        let span = spans::transfer_tokens_with_relay(
            &from_address,
            target_chain,
            &token,
            &amount,
            &to_native_token_amount,
        );
        let _guard = span.enter();

        info!(
            from_address = %from_address,
            token = %token,
            amount = %amount,
            to_native_token_amount = %to_native_token_amount,
            target_chain = target_chain,
            contract_address = %self.address,
            event = "transfer_tokens_with_relay_transaction_created"
        );

        let call = transferTokensWithRelayCall {
            token,
            amount,
            toNativeTokenAmount: to_native_token_amount,
            targetChain: target_chain,
            targetRecipientWallet: target_recipient_wallet,
        };
        transaction_to(self.address, call.abi_encode()).from(from_address)
    }

    /// Quote the native value that must accompany `redeemTokens`.
    pub async fn calculate_native_swap_amount<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        token: Address,
        to_native_amount: U256,
    ) -> Result<U256> {
        debug!(
            token = %token,
            to_native_amount = %to_native_amount,
            contract_address = %self.address,
            event = "quoting_native_swap"
        );

        let call = calculateNativeSwapAmountCall {
            token,
            toNativeAmount: to_native_amount,
        };
        let output = client
            .call(transaction_to(self.address, call.abi_encode()))
            .await?;
        let quote = U256::abi_decode(&output)?;

        info!(
            token = %token,
            quote = %quote,
            contract_address = %self.address,
            event = "native_swap_quoted"
        );

        Ok(quote)
    }

    /// Create the payable `redeemTokens` transaction.
    pub fn redeem_tokens_transaction(
        &self,
        from_address: Address,
        encoded_wormhole_message: Bytes,
        circle_bridge_message: Bytes,
        circle_attestation: Bytes,
        value: U256,
    ) -> TransactionRequest {
        info!(
            from_address = %from_address,
            value = %value,
            contract_address = %self.address,
            event = "redeem_tokens_transaction_created"
        );

        let call = redeemTokensCall {
            redeemParams: RedeemParameters {
                encodedWormholeMessage: encoded_wormhole_message,
                circleBridgeMessage: circle_bridge_message,
                circleAttestation: circle_attestation,
            },
        };
        transaction_to(self.address, call.abi_encode())
            .from(from_address)
            .value(value)
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

sol!(
    #[allow(missing_docs)]
    contract CircleRelayer {
        struct RedeemParameters {
            bytes encodedWormholeMessage;
            bytes circleBridgeMessage;
            bytes circleAttestation;
        }

        function transferTokensWithRelay(
            address token,
            uint256 amount,
            uint256 toNativeTokenAmount,
            uint16 targetChain,
            bytes32 targetRecipientWallet
        ) external payable returns (uint64 messageSequence);

        function calculateNativeSwapAmount(
            address token,
            uint256 toNativeAmount
        ) external view returns (uint256);

        function redeemTokens(RedeemParameters redeemParams) external payable;
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redeem_tokens_attaches_value() {
        let relayer = CircleRelayerContract::new(Address::repeat_byte(0x7b));
        let tx = relayer.redeem_tokens_transaction(
            Address::repeat_byte(0x01),
            Bytes::from_static(&[1]),
            Bytes::from_static(&[2]),
            Bytes::from_static(&[3]),
            U256::from(42u64),
        );

        assert_eq!(tx.value, Some(U256::from(42u64)));
        let call = redeemTokensCall::abi_decode(tx.input.input().unwrap()).unwrap();
        assert_eq!(call.redeemParams.encodedWormholeMessage.as_ref(), &[1]);
        assert_eq!(call.redeemParams.circleBridgeMessage.as_ref(), &[2]);
        assert_eq!(call.redeemParams.circleAttestation.as_ref(), &[3]);
    }

    #[test]
    fn test_redeem_tokens_selector_matches_tuple_signature() {
        insta::assert_snapshot!(
            redeemTokensCall::SIGNATURE,
            @"redeemTokens((bytes,bytes,bytes))"
        );
    }
}
