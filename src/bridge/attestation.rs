// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Polling loops for Circle attestations and Wormhole signed VAAs
//!
//! Every failure short of the attempt bound is retried: transport errors,
//! 404s, malformed bodies and non-complete statuses all wait one poll
//! interval. A 429 waits for the server's `Retry-After` instead.

use std::time::Duration;

use alloy_primitives::{Bytes, B256};
use tracing::{debug, info, warn, Instrument};

use super::PollingConfig;
use crate::error::{BridgeError, Result};
use crate::protocol::{AttestationStatus, WormholeChain};
use crate::spans;
use crate::traits::{AttestationProvider, Clock, SignedVaaProvider};

/// Polls the attestation API until Circle has signed `message_hash`.
pub async fn poll_attestation<A, C>(
    provider: &A,
    clock: &C,
    message_hash: B256,
    config: &PollingConfig,
) -> Result<Bytes>
where
    A: AttestationProvider + ?Sized,
    C: Clock + ?Sized,
{
    let span = spans::poll_attestation(&message_hash, config.max_attempts, config.poll_interval_secs);

    async move {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let wait = match provider.get_attestation(message_hash).await {
                Ok(response) => match (response.status, response.attestation) {
                    (AttestationStatus::Complete, Some(attestation)) => {
                        info!(
                            attempt = attempt,
                            attestation_len = attestation.len(),
                            event = "attestation_complete"
                        );
                        return Ok(attestation);
                    }
                    (AttestationStatus::Complete, None) => {
                        warn!(attempt = attempt, event = "attestation_complete_without_data");
                        config.poll_interval()
                    }
                    (status, _) => {
                        debug!(attempt = attempt, status = ?status, event = "attestation_pending");
                        config.poll_interval()
                    }
                },
                Err(BridgeError::RateLimitExceeded {
                    retry_after_seconds,
                }) => {
                    warn!(
                        attempt = attempt,
                        retry_after_seconds = retry_after_seconds,
                        event = "attestation_rate_limited"
                    );
                    Duration::from_secs(retry_after_seconds)
                }
                Err(e) => {
                    debug!(attempt = attempt, error = %e, event = "attestation_request_failed");
                    config.poll_interval()
                }
            };

            if config.exhausted(attempt) {
                let err = BridgeError::AttestationTimeout { attempts: attempt };
                spans::record_error(&err);
                return Err(err);
            }

            clock.sleep(wait).await;
        }
    }
    .instrument(span)
    .await
}

/// Polls the guardian network until the VAA for `(emitter_chain, emitter_address, sequence)` is signed.
pub async fn poll_signed_vaa<V, C>(
    provider: &V,
    clock: &C,
    emitter_chain: WormholeChain,
    emitter_address: B256,
    sequence: u64,
    config: &PollingConfig,
) -> Result<Bytes>
where
    V: SignedVaaProvider + ?Sized,
    C: Clock + ?Sized,
{
    let span = spans::poll_signed_vaa(
        emitter_chain.as_u16(),
        &emitter_address,
        sequence,
        config.max_attempts,
    );

    async move {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            match provider
                .get_signed_vaa(emitter_chain, emitter_address, sequence)
                .await
            {
                Ok(Some(vaa)) => {
                    info!(attempt = attempt, vaa_len = vaa.len(), event = "signed_vaa_found");
                    return Ok(vaa);
                }
                Ok(None) => debug!(attempt = attempt, event = "signed_vaa_pending"),
                Err(e) => debug!(attempt = attempt, error = %e, event = "signed_vaa_request_failed"),
            }

            if config.exhausted(attempt) {
                let err = BridgeError::VaaTimeout { attempts: attempt };
                spans::record_error(&err);
                return Err(err);
            }

            clock.sleep(config.poll_interval()).await;
        }
    }
    .instrument(span)
    .await
}
