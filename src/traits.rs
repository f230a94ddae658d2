// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Core trait abstractions for the bridge flow.
//!
//! Every piece of I/O the orchestrators perform goes through one of these
//! traits: chain RPC, Circle's attestation API, the Wormhole guardian API,
//! time, and the host's navigation guard. Production implementations live in
//! [`crate::providers`] and fakes in [`crate::testing`].
//!
//! # Example: Implementing a Test Fake
//!
//! ```rust,ignore
//! use usdc_bridge::{AttestationProvider, AttestationResponse, Result};
//! use alloy_primitives::B256;
//!
//! struct AlwaysComplete;
//!
//! #[async_trait::async_trait]
//! impl AttestationProvider for AlwaysComplete {
//!     async fn get_attestation(&self, _hash: B256) -> Result<AttestationResponse> {
//!         Ok(AttestationResponse::complete(vec![0xde, 0xad]))
//!     }
//! }
//! ```

use alloy_primitives::{Address, Bytes, Log, TxHash, B256};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::protocol::{AttestationResponse, WormholeChain};

/// A mined transaction reduced to what the bridge flow inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinedReceipt {
    pub transaction_hash: TxHash,
    /// `false` when the transaction reverted
    pub success: bool,
    pub logs: Vec<Log>,
}

/// Trait for the chain RPC operations of one EVM chain.
///
/// A client is bound to one chain and, for writes, to the connected wallet.
/// Test fakes can simulate rejected signatures, missing receipts, reverts and
/// arbitrary `eth_call` results.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// The address of the connected wallet, if any.
    fn signer_address(&self) -> Option<Address>;

    /// Signs and broadcasts a transaction, returning its hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the wallet rejects the request or the RPC call fails.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash>;

    /// Waits until the transaction is mined.
    ///
    /// Returns `None` if no receipt became available.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<Option<MinedReceipt>>;

    /// Executes a read-only call and returns the raw return data.
    async fn call(&self, tx: TransactionRequest) -> Result<Bytes>;
}

/// Trait for attestation retrieval from Circle's Iris API.
///
/// # Test Scenarios
///
/// Implementing this trait with fakes enables testing:
/// - Rate limiting (429 responses)
/// - Not found (404) while the burn is still unknown to Circle
/// - State transitions (Pending → Complete)
/// - Slow/flaky API responses
#[async_trait]
pub trait AttestationProvider: Send + Sync {
    /// Fetches attestation status and data for a message hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the response cannot be
    /// parsed, or the API returns an error status code.
    async fn get_attestation(&self, message_hash: B256) -> Result<AttestationResponse>;
}

/// Trait for signed VAA retrieval from the Wormhole guardian network.
#[async_trait]
pub trait SignedVaaProvider: Send + Sync {
    /// Fetches the signed VAA for a message.
    ///
    /// Returns `None` while the guardians have not signed it yet.
    async fn get_signed_vaa(
        &self,
        emitter_chain: WormholeChain,
        emitter_address: B256,
        sequence: u64,
    ) -> Result<Option<Bytes>>;
}

/// Trait for time-based operations.
///
/// Polling loops sleep through this trait so tests can fast-forward.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Asynchronously sleeps for the given duration.
    async fn sleep(&self, duration: Duration);

    /// Returns the current instant in time.
    fn now(&self) -> Instant;
}

/// Host capability that keeps the user from leaving while a transfer is in flight.
///
/// The session calls `subscribe` on the rising edge and `unsubscribe` on the
/// falling edge; implementations never see two subscribes in a row.
pub trait NavigationGuard {
    fn subscribe(&mut self);
    fn unsubscribe(&mut self);
}
