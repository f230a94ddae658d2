// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Wormhole VAA (Verified Action Approval) parsing
//!
//! Only version 1 VAAs are supported.
//!
//! # Format
//!
//! Header:
//! - version: uint8 (1 byte)
//! - guardianSetIndex: uint32 (4 bytes)
//! - signatureCount: uint8 (1 byte)
//! - signatures: signatureCount × (guardianIndex uint8 + 65 byte signature)
//!
//! Body:
//! - timestamp: uint32 (4 bytes)
//! - nonce: uint32 (4 bytes)
//! - emitterChain: uint16 (2 bytes)
//! - emitterAddress: bytes32 (32 bytes)
//! - sequence: uint64 (8 bytes)
//! - consistencyLevel: uint8 (1 byte)
//! - payload: remaining bytes
//!
//! Reference: <https://docs.wormhole.com/wormhole/explore-wormhole/vaa>

use alloy_primitives::{keccak256, Bytes, FixedBytes, B256};

use crate::error::{BridgeError, Result};

/// A single guardian signature over the VAA body hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardianSignature {
    pub guardian_index: u8,
    pub signature: FixedBytes<65>,
}

/// A parsed version 1 VAA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vaa {
    pub version: u8,
    pub guardian_set_index: u32,
    pub signatures: Vec<GuardianSignature>,
    pub timestamp: u32,
    pub nonce: u32,
    pub emitter_chain: u16,
    pub emitter_address: B256,
    pub sequence: u64,
    pub consistency_level: u8,
    pub payload: Bytes,
    hash: B256,
}

impl Vaa {
    const HEADER_SIZE: usize = 6;
    const SIGNATURE_SIZE: usize = 66;
    const BODY_FIXED_SIZE: usize = 51;

    /// Parses a signed VAA.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::HEADER_SIZE {
            return Err(BridgeError::InvalidVaa(format!(
                "expected at least {} header bytes, got {}",
                Self::HEADER_SIZE,
                bytes.len()
            )));
        }

        let version = bytes[0];
        if version != 1 {
            return Err(BridgeError::InvalidVaa(format!(
                "unsupported version {version}"
            )));
        }
        let guardian_set_index = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
        let signature_count = bytes[5] as usize;

        let body_start = Self::HEADER_SIZE + signature_count * Self::SIGNATURE_SIZE;
        if bytes.len() < body_start + Self::BODY_FIXED_SIZE {
            return Err(BridgeError::InvalidVaa(format!(
                "truncated: {} signatures need {} bytes, got {}",
                signature_count,
                body_start + Self::BODY_FIXED_SIZE,
                bytes.len()
            )));
        }

        let signatures = bytes[Self::HEADER_SIZE..body_start]
            .chunks_exact(Self::SIGNATURE_SIZE)
            .map(|chunk| GuardianSignature {
                guardian_index: chunk[0],
                signature: FixedBytes::from_slice(&chunk[1..]),
            })
            .collect();

        let body = &bytes[body_start..];
        let timestamp = u32::from_be_bytes([body[0], body[1], body[2], body[3]]);
        let nonce = u32::from_be_bytes([body[4], body[5], body[6], body[7]]);
        let emitter_chain = u16::from_be_bytes([body[8], body[9]]);
        let emitter_address = B256::from_slice(&body[10..42]);
        let mut sequence = [0u8; 8];
        sequence.copy_from_slice(&body[42..50]);
        let consistency_level = body[50];
        let payload = Bytes::copy_from_slice(&body[Self::BODY_FIXED_SIZE..]);

        Ok(Self {
            version,
            guardian_set_index,
            signatures,
            timestamp,
            nonce,
            emitter_chain,
            emitter_address,
            sequence: u64::from_be_bytes(sequence),
            consistency_level,
            payload,
            hash: keccak256(body),
        })
    }

    /// keccak256 of the body, the value guardians sign over.
    pub fn hash(&self) -> B256 {
        self.hash
    }

    /// keccak256 of [`Vaa::hash`], used by the Circle integration contract to
    /// track consumed messages.
    pub fn digest(&self) -> B256 {
        keccak256(self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::build_vaa;

    #[test]
    fn test_parse_body_fields() {
        let raw = build_vaa(2, 42, &[0xaa, 0xbb]);
        let vaa = Vaa::parse(&raw).unwrap();

        assert_eq!(vaa.version, 1);
        assert_eq!(vaa.signatures.len(), 1);
        assert_eq!(vaa.emitter_chain, 2);
        assert_eq!(vaa.emitter_address, B256::repeat_byte(0x11));
        assert_eq!(vaa.sequence, 42);
        assert_eq!(vaa.nonce, 7);
        assert_eq!(vaa.consistency_level, 1);
        assert_eq!(vaa.payload.as_ref(), &[0xaa, 0xbb]);
    }

    #[test]
    fn test_hash_and_digest_cover_body_only() {
        let raw = build_vaa(6, 1, &[0x01]);
        let vaa = Vaa::parse(&raw).unwrap();
        let body = &raw[6 + 66..];

        assert_eq!(vaa.hash(), keccak256(body));
        assert_eq!(vaa.digest(), keccak256(keccak256(body)));
    }

    #[test]
    fn test_rejects_truncated_and_wrong_version() {
        let raw = build_vaa(2, 1, &[]);
        assert!(matches!(
            Vaa::parse(&raw[..40]),
            Err(BridgeError::InvalidVaa(_))
        ));

        let mut wrong_version = raw.clone();
        wrong_version[0] = 2;
        assert!(matches!(
            Vaa::parse(&wrong_version),
            Err(BridgeError::InvalidVaa(_))
        ));
    }
}
