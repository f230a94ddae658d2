// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
use alloy_primitives::{hex::FromHex, Bytes};
use serde::{Deserialize, Deserializer};

/// Represents the response from Circle's attestation service
///
/// It contains the status of the attestation and optionally the attestation data itself.
/// The attestation data is a hex-encoded string (with or without "0x" prefix) that is
/// automatically deserialized into bytes.
///
/// **API Quirk**: the sandbox Iris API sometimes returns the string `"PENDING"` for the
/// attestation field instead of `null` while the attestation is not yet ready. That
/// case deserializes to `None`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttestationResponse {
    pub status: AttestationStatus,
    #[serde(default, deserialize_with = "deserialize_optional_bytes_or_pending")]
    pub attestation: Option<Bytes>,
}

impl AttestationResponse {
    /// A pending response without attestation bytes.
    pub fn pending() -> Self {
        Self {
            status: AttestationStatus::Pending,
            attestation: None,
        }
    }

    /// A complete response carrying the given attestation.
    pub fn complete(attestation: impl Into<Bytes>) -> Self {
        Self {
            status: AttestationStatus::Complete,
            attestation: Some(attestation.into()),
        }
    }

    /// Returns the attestation bytes only when the status is terminal and data is present.
    pub fn into_signature(self) -> Option<Bytes> {
        match self.status {
            AttestationStatus::Complete => self.attestation,
            _ => None,
        }
    }
}

fn deserialize_optional_bytes_or_pending<'de, D>(deserializer: D) -> Result<Option<Bytes>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;

    match opt {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("pending") => Ok(None),
        Some(s) => {
            let bytes = Bytes::from_hex(s).map_err(serde::de::Error::custom)?;
            Ok(Some(bytes))
        }
    }
}

/// Represents the status of the attestation.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttestationStatus {
    Complete,
    Pending,
    PendingConfirmations,
    Failed,
}
