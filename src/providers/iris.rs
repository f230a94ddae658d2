// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Circle Iris API attestation provider implementation.

use alloy_primitives::B256;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, trace};

use crate::bridge::{ATTESTATION_PATH, IRIS_API, IRIS_API_SANDBOX};
use crate::error::{BridgeError, Result};
use crate::protocol::AttestationResponse;
use crate::traits::AttestationProvider;

/// Production attestation provider using Circle's Iris API.
///
/// # Examples
///
/// ```rust,no_run
/// use usdc_bridge::providers::IrisAttestationProvider;
/// use usdc_bridge::AttestationProvider;
/// use alloy_primitives::B256;
///
/// # async fn example() -> Result<(), usdc_bridge::BridgeError> {
/// let provider = IrisAttestationProvider::sandbox();
/// let response = provider.get_attestation(B256::ZERO).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IrisAttestationProvider {
    base_url: String,
    client: Client,
}

impl IrisAttestationProvider {
    /// Creates a new Iris attestation provider.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for the Iris API (e.g., <https://iris-api-sandbox.circle.com>)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Creates a provider for Circle's production environment.
    pub fn production() -> Self {
        Self::new(IRIS_API)
    }

    /// Creates a provider for Circle's sandbox (testnet) environment.
    pub fn sandbox() -> Self {
        Self::new(IRIS_API_SANDBOX)
    }

    /// Constructs the full API URL for a given message hash.
    pub fn attestation_url(&self, message_hash: B256) -> String {
        format!("{}{}{}", self.base_url, ATTESTATION_PATH, message_hash)
    }
}

#[async_trait]
impl AttestationProvider for IrisAttestationProvider {
    #[instrument(skip(self), fields(message_hash = %message_hash))]
    async fn get_attestation(&self, message_hash: B256) -> Result<AttestationResponse> {
        let url = self.attestation_url(message_hash);
        trace!(url = %url, event = "attestation_request");

        let response = self.client.get(&url).send().await?;

        let status_code = response.status();
        trace!(status_code = %status_code, event = "attestation_response_received");

        if status_code == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(300);

            debug!(retry_after_seconds = retry_after, event = "rate_limit_exceeded");
            return Err(BridgeError::RateLimitExceeded {
                retry_after_seconds: retry_after,
            });
        }

        // Circle answers 404 until it has seen the burn
        if status_code == reqwest::StatusCode::NOT_FOUND {
            debug!(event = "attestation_not_found");
            return Err(BridgeError::AttestationNotFound);
        }

        response.error_for_status_ref()?;

        let attestation = response.json::<AttestationResponse>().await?;
        debug!(status = ?attestation.status, event = "attestation_response_parsed");

        Ok(attestation)
    }
}
