// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Wormhole guardian REST provider for signed VAAs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use alloy_primitives::{hex, Bytes, B256};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, trace};

use crate::bridge::{SIGNED_VAA_PATH, WORMHOLE_TESTNET_RPC_HOSTS};
use crate::error::{BridgeError, Result};
use crate::protocol::WormholeChain;
use crate::traits::SignedVaaProvider;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignedVaaResponse {
    vaa_bytes: String,
}

/// Fetches signed VAAs from guardian REST endpoints.
///
/// Each request goes to the next host in the list, so a flaky guardian only
/// costs one retry interval.
#[derive(Debug, Clone)]
pub struct WormholeRpcProvider {
    hosts: Vec<String>,
    next_host: Arc<AtomicUsize>,
    client: Client,
}

impl WormholeRpcProvider {
    pub fn new<I, S>(hosts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hosts: Vec<String> = hosts
            .into_iter()
            .map(|host| host.into().trim_end_matches('/').to_string())
            .collect();
        if hosts.is_empty() {
            return Err(BridgeError::InvalidUrl {
                reason: "at least one Wormhole RPC host is required".to_string(),
            });
        }

        Ok(Self {
            hosts,
            next_host: Arc::new(AtomicUsize::new(0)),
            client: Client::new(),
        })
    }

    /// Guardian hosts for the Wormhole testnet.
    pub fn testnet() -> Self {
        Self {
            hosts: WORMHOLE_TESTNET_RPC_HOSTS
                .iter()
                .map(|host| host.to_string())
                .collect(),
            next_host: Arc::new(AtomicUsize::new(0)),
            client: Client::new(),
        }
    }

    /// Constructs the signed VAA URL on `host`.
    ///
    /// The emitter is hex without the `0x` prefix, as the guardian API expects.
    pub fn signed_vaa_url(
        host: &str,
        emitter_chain: WormholeChain,
        emitter_address: B256,
        sequence: u64,
    ) -> String {
        format!(
            "{host}{SIGNED_VAA_PATH}{}/{}/{sequence}",
            emitter_chain.as_u16(),
            hex::encode(emitter_address)
        )
    }

    fn pick_host(&self) -> &str {
        let index = self.next_host.fetch_add(1, Ordering::Relaxed) % self.hosts.len();
        &self.hosts[index]
    }
}

#[async_trait]
impl SignedVaaProvider for WormholeRpcProvider {
    #[instrument(skip(self), fields(emitter_chain = %emitter_chain, sequence = sequence))]
    async fn get_signed_vaa(
        &self,
        emitter_chain: WormholeChain,
        emitter_address: B256,
        sequence: u64,
    ) -> Result<Option<Bytes>> {
        let url = Self::signed_vaa_url(self.pick_host(), emitter_chain, emitter_address, sequence);
        trace!(url = %url, event = "signed_vaa_request");

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            debug!(event = "signed_vaa_not_found");
            return Ok(None);
        }

        response.error_for_status_ref()?;

        let body = response.json::<SignedVaaResponse>().await?;
        let vaa = STANDARD.decode(body.vaa_bytes)?;
        debug!(vaa_len = vaa.len(), event = "signed_vaa_found");

        Ok(Some(Bytes::from(vaa)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_vaa_url_format() {
        let emitter = alloy_primitives::address!("bdcc4ebe3157df347671e078a41ee5ce137cd306");
        let url = WormholeRpcProvider::signed_vaa_url(
            "https://wormhole-v2-testnet-api.certus.one",
            WormholeChain::Ethereum,
            emitter.into_word(),
            1234,
        );
        insta::assert_snapshot!(url, @"https://wormhole-v2-testnet-api.certus.one/v1/signed_vaa/2/000000000000000000000000bdcc4ebe3157df347671e078a41ee5ce137cd306/1234");
    }

    #[test]
    fn test_hosts_rotate() {
        let provider = WormholeRpcProvider::new(["http://a.test/", "http://b.test"]).unwrap();
        assert_eq!(provider.pick_host(), "http://a.test");
        assert_eq!(provider.pick_host(), "http://b.test");
        assert_eq!(provider.pick_host(), "http://a.test");
    }

    #[test]
    fn test_requires_a_host() {
        assert!(matches!(
            WormholeRpcProvider::new(Vec::<String>::new()),
            Err(BridgeError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_response_body_is_base64() {
        let body: SignedVaaResponse = serde_json::from_str(r#"{"vaaBytes":"AQID"}"#).unwrap();
        assert_eq!(STANDARD.decode(body.vaa_bytes).unwrap(), vec![1, 2, 3]);
    }
}
