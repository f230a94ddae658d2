// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Circle integration "deposit with payload" message carried inside relay VAAs
//!
//! # Format
//!
//! - payloadId: uint8 (1 byte) at 0
//! - token: bytes32 (32 bytes) at 1..33
//! - amount: uint256 (32 bytes) at 33..65
//! - sourceDomain: uint32 (4 bytes) at 65..69
//! - targetDomain: uint32 (4 bytes) at 69..73
//! - nonce: uint64 (8 bytes) at 73..81
//! - fromAddress: bytes32 (32 bytes) at 81..113
//! - mintRecipient: bytes32 (32 bytes) at 113..145
//! - payloadLength: uint16 (2 bytes) at 145..147
//! - relayer payload:
//!   - payloadId: uint8 (1 byte) at 147
//!   - targetRelayerFee: uint256 (32 bytes) at 148..180
//!   - toNativeTokenAmount: uint256 (32 bytes) at 180..212
//!   - targetRecipientWallet: bytes32 (32 bytes) at 212..244

use std::ops::Range;

use alloy_primitives::{Address, B256, U256};

use crate::error::{BridgeError, Result};

pub const TOKEN_RANGE: Range<usize> = 1..33;
pub const AMOUNT_RANGE: Range<usize> = 33..65;
pub const SOURCE_DOMAIN_OFFSET: usize = 65;
pub const TARGET_DOMAIN_OFFSET: usize = 69;
pub const NONCE_OFFSET: usize = 73;
pub const FROM_ADDRESS_RANGE: Range<usize> = 81..113;
pub const MINT_RECIPIENT_RANGE: Range<usize> = 113..145;
pub const TARGET_RELAYER_FEE_RANGE: Range<usize> = 148..180;
pub const TO_NATIVE_TOKEN_AMOUNT_RANGE: Range<usize> = 180..212;
pub const TARGET_RECIPIENT_WALLET_RANGE: Range<usize> = 212..244;

/// Decoded relay transfer payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayTransferPayload {
    pub token: B256,
    pub amount: U256,
    pub source_domain: u32,
    pub target_domain: u32,
    pub nonce: u64,
    pub from_address: B256,
    pub mint_recipient: B256,
    pub target_relayer_fee: U256,
    pub to_native_token_amount: U256,
    pub target_recipient_wallet: B256,
}

impl RelayTransferPayload {
    pub const SIZE: usize = 244;

    pub fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() < Self::SIZE {
            return Err(BridgeError::InvalidPayload(format!(
                "expected at least {} bytes, got {}",
                Self::SIZE,
                payload.len()
            )));
        }

        let mut nonce = [0u8; 8];
        nonce.copy_from_slice(&payload[NONCE_OFFSET..NONCE_OFFSET + 8]);

        Ok(Self {
            token: B256::from_slice(&payload[TOKEN_RANGE]),
            amount: U256::from_be_slice(&payload[AMOUNT_RANGE]),
            source_domain: read_u32(payload, SOURCE_DOMAIN_OFFSET),
            target_domain: read_u32(payload, TARGET_DOMAIN_OFFSET),
            nonce: u64::from_be_bytes(nonce),
            from_address: B256::from_slice(&payload[FROM_ADDRESS_RANGE]),
            mint_recipient: B256::from_slice(&payload[MINT_RECIPIENT_RANGE]),
            target_relayer_fee: U256::from_be_slice(&payload[TARGET_RELAYER_FEE_RANGE]),
            to_native_token_amount: U256::from_be_slice(&payload[TO_NATIVE_TOKEN_AMOUNT_RANGE]),
            target_recipient_wallet: B256::from_slice(&payload[TARGET_RECIPIENT_WALLET_RANGE]),
        })
    }

    /// The token as an EVM address (the low 20 bytes of the bytes32 field).
    pub fn token_address(&self) -> Address {
        Address::from_word(self.token)
    }
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::encode_relay_payload as encode_payload;

    #[test]
    fn test_decode_fixed_offsets() {
        let token = Address::repeat_byte(0xab);
        let raw = encode_payload(token, U256::from(7_000_000u64), 1, U256::from(1_000u64));
        assert_eq!(raw.len(), RelayTransferPayload::SIZE);

        let payload = RelayTransferPayload::decode(&raw).unwrap();
        assert_eq!(payload.token_address(), token);
        assert_eq!(payload.amount, U256::from(7_000_000u64));
        assert_eq!(payload.source_domain, 0);
        assert_eq!(payload.target_domain, 1);
        assert_eq!(payload.nonce, 9);
        assert_eq!(payload.target_relayer_fee, U256::from(5u64));
        assert_eq!(payload.to_native_token_amount, U256::from(1_000u64));
        assert_eq!(payload.target_recipient_wallet, B256::repeat_byte(0x44));
    }

    #[test]
    fn test_target_domain_read_at_offset_69() {
        let mut raw = encode_payload(Address::ZERO, U256::ZERO, 0, U256::ZERO);
        raw[72] = 1;
        assert_eq!(RelayTransferPayload::decode(&raw).unwrap().target_domain, 1);
    }

    #[test]
    fn test_decode_rejects_short_payload() {
        let raw = encode_payload(Address::ZERO, U256::ZERO, 0, U256::ZERO);
        assert!(matches!(
            RelayTransferPayload::decode(&raw[..211]),
            Err(BridgeError::InvalidPayload(_))
        ));
    }
}
