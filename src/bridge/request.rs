// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
use alloy_chains::NamedChain;
use alloy_primitives::{Address, U256};
use bon::Builder;

use crate::chain::BridgeChain;
use crate::error::{BridgeError, Result};
use crate::protocol::UsdcAmount;

/// A transfer as submitted by the user. Immutable once the flow starts.
///
/// ```rust
/// use usdc_bridge::{TransferRequest, UsdcAmount};
/// use alloy_chains::NamedChain;
///
/// let request = TransferRequest::builder()
///     .source_chain(NamedChain::Goerli)
///     .target_chain(NamedChain::AvalancheFuji)
///     .amount("25".parse::<UsdcAmount>().unwrap())
///     .relay(true)
///     .build();
/// assert_eq!(request.to_native_token_amount, UsdcAmount::DEFAULT_NATIVE_GAS);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct TransferRequest {
    pub source_chain: NamedChain,
    pub target_chain: NamedChain,
    pub amount: UsdcAmount,
    /// Route through the Wormhole relayer instead of redeeming by hand
    #[builder(default)]
    pub relay: bool,
    /// USDC swapped into destination gas on the relay path
    #[builder(default = UsdcAmount::DEFAULT_NATIVE_GAS)]
    pub to_native_token_amount: UsdcAmount,
}

impl TransferRequest {
    /// The contract that pulls USDC from the sender: the relayer on the relay
    /// path, the Circle bridge otherwise.
    pub fn spender(&self) -> Result<Address> {
        if self.relay {
            self.source_chain.usdc_relayer_address()
        } else {
            self.source_chain.circle_bridge_address()
        }
    }

    /// Rejects empty amounts and same-chain transfers.
    pub fn validate(&self) -> Result<()> {
        if self.amount.is_zero() {
            return Err(BridgeError::InvalidAmount(
                "Amount must be greater than zero".to_string(),
            ));
        }
        if self.source_chain == self.target_chain {
            return Err(BridgeError::NotReady(format!(
                "source and target are both {}",
                self.source_chain
            )));
        }
        Ok(())
    }
}

/// How much allowance to grant the spender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalAmount {
    /// Exactly the transfer amount
    Exact,
    /// `uint256::MAX`
    Unlimited,
}

impl ApprovalAmount {
    pub fn base_units(&self, request: &TransferRequest) -> U256 {
        match self {
            Self::Exact => request.amount.base_units(),
            Self::Unlimited => U256::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(relay: bool) -> TransferRequest {
        TransferRequest::builder()
            .source_chain(NamedChain::Goerli)
            .target_chain(NamedChain::AvalancheFuji)
            .amount(UsdcAmount::parse("10").unwrap())
            .relay(relay)
            .build()
    }

    #[test]
    fn test_spender_depends_on_path() {
        assert_eq!(
            request(false).spender().unwrap(),
            NamedChain::Goerli.circle_bridge_address().unwrap()
        );
        assert_eq!(
            request(true).spender().unwrap(),
            NamedChain::Goerli.usdc_relayer_address().unwrap()
        );
    }

    #[test]
    fn test_validate() {
        assert!(request(false).validate().is_ok());

        let zero = TransferRequest {
            amount: UsdcAmount::ZERO,
            ..request(false)
        };
        insta::assert_snapshot!(
            zero.validate().unwrap_err().to_string(),
            @"Invalid amount: Amount must be greater than zero"
        );

        let same_chain = TransferRequest {
            target_chain: NamedChain::Goerli,
            ..request(false)
        };
        assert!(matches!(same_chain.validate(), Err(BridgeError::NotReady(_))));
    }

    #[test]
    fn test_approval_amounts() {
        let request = request(false);
        assert_eq!(
            ApprovalAmount::Exact.base_units(&request),
            U256::from(10_000_000u64)
        );
        assert_eq!(ApprovalAmount::Unlimited.base_units(&request), U256::MAX);
    }
}
