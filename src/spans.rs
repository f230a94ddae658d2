// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! OpenTelemetry span helpers for bridge operations
//!
//! Static span names, structured attributes, and separation from business
//! logic. The orchestrators use these internally; they are public for users
//! who want the same spans around custom flows.
//!
//! # Example
//!
//! ```rust,no_run
//! use usdc_bridge::spans;
//! use alloy_primitives::B256;
//!
//! let span = spans::poll_attestation(&B256::ZERO, Some(30), 2);
//! let _guard = span.enter();
//! // Your custom attestation logic here
//! ```

use alloy_chains::NamedChain;
use alloy_primitives::{hex, Address, TxHash, B256, U256};
use tracing::Span;

/// Create span for a whole source-chain transfer.
///
/// Parent: caller span
/// Children: deposit_for_burn / transfer_tokens_with_relay, wait_for_receipt,
/// poll_attestation, poll_signed_vaa
#[inline]
pub fn transfer(source_chain: &NamedChain, target_chain: &NamedChain, relay: bool) -> Span {
    tracing::info_span!(
        "usdc_bridge.transfer",
        source_chain = %source_chain,
        target_chain = %target_chain,
        relay = relay,
        tx_hash = tracing::field::Empty,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a destination-chain redemption.
#[inline]
pub fn redeem(source_chain: &NamedChain, target_chain: &NamedChain, relay: bool) -> Span {
    tracing::info_span!(
        "usdc_bridge.redeem",
        source_chain = %source_chain,
        target_chain = %target_chain,
        relay = relay,
        tx_hash = tracing::field::Empty,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for an ERC20 approval.
#[inline]
pub fn approve(chain: &NamedChain, spender: &Address, amount: &U256) -> Span {
    tracing::info_span!(
        "usdc_bridge.approve",
        chain = %chain,
        spender = %spender,
        amount = %amount,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for polling the attestation API.
///
/// Parent: usdc_bridge.transfer
/// Children: HTTP requests made by the attestation provider
#[inline]
pub fn poll_attestation(
    message_hash: &B256,
    max_attempts: Option<u32>,
    poll_interval_secs: u64,
) -> Span {
    tracing::info_span!(
        "usdc_bridge.poll_attestation",
        message_hash = %hex::encode(message_hash),
        max_attempts = ?max_attempts,
        poll_interval_secs = poll_interval_secs,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for polling the guardian network for a signed VAA.
#[inline]
pub fn poll_signed_vaa(
    emitter_chain: u16,
    emitter_address: &B256,
    sequence: u64,
    max_attempts: Option<u32>,
) -> Span {
    tracing::info_span!(
        "usdc_bridge.poll_signed_vaa",
        emitter_chain = emitter_chain,
        emitter_address = %hex::encode(emitter_address),
        sequence = sequence,
        max_attempts = ?max_attempts,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for USDC deposit and burn transaction creation.
///
/// Parent: usdc_bridge.transfer
#[inline]
pub fn deposit_for_burn(
    from_address: &Address,
    recipient: &Address,
    destination_domain: u32,
    token_address: &Address,
    amount: &U256,
) -> Span {
    tracing::info_span!(
        "usdc_bridge.deposit_for_burn",
        from_address = %from_address,
        recipient = %recipient,
        destination_domain = destination_domain,
        token_address = %token_address,
        amount = %amount,
    )
}

/// Create span for relayed transfer transaction creation.
///
/// Parent: usdc_bridge.transfer
#[inline]
pub fn transfer_tokens_with_relay(
    from_address: &Address,
    target_chain: u16,
    token_address: &Address,
    amount: &U256,
    to_native_token_amount: &U256,
) -> Span {
    tracing::info_span!(
        "usdc_bridge.transfer_tokens_with_relay",
        from_address = %from_address,
        target_chain = target_chain,
        token_address = %token_address,
        amount = %amount,
        to_native_token_amount = %to_native_token_amount,
    )
}

/// Create span for waiting for transaction confirmation.
#[inline]
pub fn wait_for_receipt(tx_hash: TxHash, max_attempts: Option<u32>) -> Span {
    tracing::debug_span!(
        "usdc_bridge.wait_for_receipt",
        tx_hash = %tx_hash,
        max_attempts = ?max_attempts,
    )
}

/// Create span for watching whether the relayer redeemed a transfer.
#[inline]
pub fn watch_relayer_redemption(target_chain: &NamedChain, digest: &B256) -> Span {
    tracing::info_span!(
        "usdc_bridge.watch_relayer_redemption",
        target_chain = %target_chain,
        digest = %hex::encode(digest),
    )
}

/// Record error attributes on the current span.
///
/// Follows OpenTelemetry semantic conventions for error tracking.
pub fn record_error<E: std::error::Error>(error: &E) {
    let current_span = tracing::Span::current();
    current_span.record(
        "error.type",
        error.to_string().split(':').next().unwrap_or("Unknown"),
    );
    current_span.record("error.message", error.to_string());
    current_span.record("otel.status_code", "ERROR");
}

/// Record error attributes with custom context on the current span.
///
/// # Example
///
/// ```rust,no_run
/// use usdc_bridge::spans;
///
/// let span = tracing::info_span!("usdc_bridge.operation");
/// let _guard = span.enter();
///
/// spans::record_error_with_context(
///     "TransactionFailed",
///     "Invalid receipt",
///     Some("Wallet returned a hash that never got mined"),
/// );
/// ```
pub fn record_error_with_context(
    error_type: &str,
    error_message: &str,
    additional_context: Option<&str>,
) {
    let current_span = tracing::Span::current();
    current_span.record("error.type", error_type);
    current_span.record("error.message", error_message);
    current_span.record("otel.status_code", "ERROR");

    if let Some(context) = additional_context {
        current_span.record("error.context", context);
    }
}
