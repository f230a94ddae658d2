// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
use alloy_json_rpc::RpcError;
use alloy_primitives::TxHash;
use alloy_transport::TransportErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Chain not supported: {chain}")]
    ChainNotSupported { chain: String },

    #[error("Not ready: {0}")]
    NotReady(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Contract call failed: {0}")]
    ContractCall(String),

    #[error("Transaction failed: {reason}")]
    TransactionFailed { reason: String },

    #[error("Error parsing receipt for {tx_hash}")]
    MessageNotFound { tx_hash: TxHash },

    #[error("Wormhole sequence not found in receipt for {tx_hash}")]
    SequenceNotFound { tx_hash: TxHash },

    #[error("Rate limit exceeded, retry after {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u64 },

    #[error("Attestation not found (will retry)")]
    AttestationNotFound,

    #[error("Timeout waiting for attestation after {attempts} attempts")]
    AttestationTimeout { attempts: u32 },

    #[error("Timeout waiting for signed VAA after {attempts} attempts")]
    VaaTimeout { attempts: u32 },

    #[error("Invalid VAA: {0}")]
    InvalidVaa(String),

    #[error("Invalid relay payload: {0}")]
    InvalidPayload(String),

    #[error("Unknown toDomain {0}")]
    UnknownDomain(u32),

    #[error("Invalid transition: {event} while {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },

    #[error("Invalid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError<TransportErrorKind>),

    #[error("ABI encoding/decoding error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex conversion error: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),

    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl BridgeError {
    /// Human readable message for a failed flow step.
    ///
    /// JSON-RPC errors carry the node's own message (usually the revert reason),
    /// which is what a user wants to see instead of the transport wrapper.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rpc(RpcError::ErrorResp(payload)) => payload.message.to_string(),
            Self::TransactionFailed { reason } => reason.clone(),
            other => other.to_string(),
        }
    }

    /// Returns true for input problems that should abort an action silently.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::NotReady(_) | Self::InvalidAmount(_))
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_not_found_mentions_tx_hash() {
        let err = BridgeError::MessageNotFound {
            tx_hash: TxHash::from([0xab; 32]),
        };
        insta::assert_snapshot!(err.user_message(), @"Error parsing receipt for 0xabababababababababababababababababababababababababababababababab");
    }

    #[test]
    fn test_transaction_failed_user_message_is_reason() {
        let err = BridgeError::TransactionFailed {
            reason: "Invalid receipt".to_string(),
        };
        assert_eq!(err.user_message(), "Invalid receipt");
    }

    #[test]
    fn test_validation_errors() {
        assert!(BridgeError::NotReady("no signer".into()).is_validation());
        assert!(BridgeError::InvalidAmount("-1".into()).is_validation());
        assert!(!BridgeError::UnknownDomain(9).is_validation());
    }
}
