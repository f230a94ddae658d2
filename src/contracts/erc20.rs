// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! ERC20 contract bindings for approval and allowance operations
//!
//! This module provides utilities for checking and setting the USDC allowance,
//! which is required before the Circle bridge or the relayer can pull tokens.

use alloy_primitives::{Address, U256};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{sol, SolCall, SolValue};
use tracing::{debug, info};

use super::transaction_to;
use crate::error::Result;
use crate::traits::ChainClient;
use Erc20::{allowanceCall, approveCall, balanceOfCall};

/// ERC20 contract wrapper for approval operations
///
/// # Example
///
/// ```rust,no_run
/// use alloy_chains::NamedChain;
/// use alloy_primitives::{Address, U256};
/// use usdc_bridge::contracts::erc20::Erc20Contract;
/// use usdc_bridge::{BridgeChain, ChainClient};
///
/// # async fn example(
/// #     client: impl ChainClient,
/// #     owner: Address,
/// #     spender: Address,
/// # ) -> usdc_bridge::Result<()> {
/// let erc20 = Erc20Contract::new(NamedChain::Goerli.usdc_address()?);
///
/// // Approve if needed
/// let allowance = erc20.allowance(&client, owner, spender).await?;
/// if allowance < U256::from(1_000_000u64) {
///     let tx = erc20.approve_transaction(owner, spender, U256::from(1_000_000u64));
///     client.send_transaction(tx).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Erc20Contract {
    address: Address,
}

impl Erc20Contract {
    /// Create a new ERC20 contract wrapper
    pub fn new(address: Address) -> Self {
        debug!(
            contract_address = %address,
            event = "erc20_contract_initialized"
        );
        Self { address }
    }

    /// Get the current allowance for a spender
    ///
    /// Returns the amount of tokens that `spender` is allowed to spend on behalf of `owner`.
    pub async fn allowance<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        owner: Address,
        spender: Address,
    ) -> Result<U256> {
        debug!(
            owner = %owner,
            spender = %spender,
            contract_address = %self.address,
            event = "checking_allowance"
        );

        let call = allowanceCall { owner, spender };
        let output = client
            .call(transaction_to(self.address, call.abi_encode()))
            .await?;
        let result = U256::abi_decode(&output)?;

        info!(
            owner = %owner,
            spender = %spender,
            allowance = %result,
            contract_address = %self.address,
            event = "allowance_retrieved"
        );

        Ok(result)
    }

    /// Create a transaction request to approve a spender
    ///
    /// This creates but does not send the approval transaction.
    pub fn approve_transaction(
        &self,
        from: Address,
        spender: Address,
        amount: U256,
    ) -> TransactionRequest {
        info!(
            from = %from,
            spender = %spender,
            amount = %amount,
            contract_address = %self.address,
            event = "approve_transaction_created"
        );

        transaction_to(self.address, approveCall { spender, amount }.abi_encode()).from(from)
    }

    /// Get the token balance of an address
    pub async fn balance_of<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        account: Address,
    ) -> Result<U256> {
        debug!(
            account = %account,
            contract_address = %self.address,
            event = "checking_balance"
        );

        let output = client
            .call(transaction_to(
                self.address,
                balanceOfCall { account }.abi_encode(),
            ))
            .await?;
        let result = U256::abi_decode(&output)?;

        info!(
            account = %account,
            balance = %result,
            contract_address = %self.address,
            event = "balance_retrieved"
        );

        Ok(result)
    }

    /// Returns the contract address
    pub fn address(&self) -> Address {
        self.address
    }
}

// Minimal ERC20 interface for approval operations
sol!(
    #[allow(missing_docs)]
    contract Erc20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_approve_transaction_targets_token() {
        let usdc = address!("07865c6e87b9f70255377e024ace6630c1eaa37f");
        let owner = Address::repeat_byte(0x01);
        let spender = Address::repeat_byte(0x02);

        let tx = Erc20Contract::new(usdc).approve_transaction(owner, spender, U256::MAX);

        assert_eq!(tx.to, Some(usdc.into()));
        assert_eq!(tx.from, Some(owner));
        let input = tx.input.input().unwrap();
        assert_eq!(&input[..4], approveCall::SELECTOR.as_slice());
        let decoded = approveCall::abi_decode(input).unwrap();
        assert_eq!(decoded.spender, spender);
        assert_eq!(decoded.amount, U256::MAX);
    }
}
