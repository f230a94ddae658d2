// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
use alloy_primitives::{keccak256, Bytes, TxHash, B256};

/// Whether a submitted transaction has been mined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationStatus {
    Pending,
    Confirmed,
}

/// Everything the source chain and the attestation services produced for a
/// transfer. Filled in as the flow advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub source_tx_hash: TxHash,
    pub status: ConfirmationStatus,
    /// The Circle `MessageSent` payload
    pub message: Option<Bytes>,
    /// Circle's signature over `keccak256(message)`
    pub attestation: Option<Bytes>,
    /// Wormhole sequence of the relay message
    pub sequence: Option<u64>,
    /// The signed relay VAA
    pub vaa: Option<Bytes>,
}

impl TransferReceipt {
    pub fn pending(source_tx_hash: TxHash) -> Self {
        Self {
            source_tx_hash,
            status: ConfirmationStatus::Pending,
            message: None,
            attestation: None,
            sequence: None,
            vaa: None,
        }
    }

    /// A receipt can be redeemed once message and attestation are present,
    /// plus the VAA on the relay path.
    pub fn is_complete(&self, relay: bool) -> bool {
        self.message.is_some() && self.attestation.is_some() && (!relay || self.vaa.is_some())
    }

    /// The hash Circle attests to.
    pub fn message_hash(&self) -> Option<B256> {
        self.message.as_ref().map(keccak256)
    }
}

/// Outcome of a destination-chain redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedeemReceipt {
    pub tx_hash: TxHash,
    pub status: ConfirmationStatus,
}
