// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;

use alloy_network::{Ethereum, EthereumWallet};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use bon::Builder;
use url::Url;

use crate::error::{BridgeError, Result};

/// Circle Iris API environment URLs
///
/// See <https://developers.circle.com/stablecoins/cctp-apis>
pub const IRIS_API: &str = "https://iris-api.circle.com";
pub const IRIS_API_SANDBOX: &str = "https://iris-api-sandbox.circle.com";

/// Attestation API path
pub const ATTESTATION_PATH: &str = "/attestations/";

/// Wormhole guardian REST hosts for testnet
pub const WORMHOLE_TESTNET_RPC_HOSTS: &[&str] = &["https://wormhole-v2-testnet-api.certus.one"];

/// Signed VAA API path
pub const SIGNED_VAA_PATH: &str = "/v1/signed_vaa/";

/// Configuration for a polling loop.
///
/// `max_attempts: None` polls until the remote side answers, which is what a
/// human-attended session wants. Bounded configurations fail with a timeout
/// error once the attempts are used up.
///
/// # Examples
///
/// ```rust
/// use usdc_bridge::PollingConfig;
///
/// // Circle attestation: every 2 seconds, forever
/// let config = PollingConfig::attestation();
/// assert_eq!(config.max_attempts, None);
///
/// // Give up after 10 minutes
/// let config = PollingConfig::attestation().with_max_attempts(300);
/// assert_eq!(config.total_timeout_secs(), Some(600));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    /// Maximum number of polling attempts before giving up.
    pub max_attempts: Option<u32>,
    /// Seconds to wait between polling attempts.
    pub poll_interval_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self::attestation()
    }
}

impl PollingConfig {
    /// Circle attestation polling: 2 second interval, unbounded.
    pub const fn attestation() -> Self {
        Self {
            max_attempts: None,
            poll_interval_secs: 2,
        }
    }

    /// Guardian signed VAA polling: 1 second interval, unbounded.
    pub const fn signed_vaa() -> Self {
        Self {
            max_attempts: None,
            poll_interval_secs: 1,
        }
    }

    /// Relayer redemption watcher: 5 second interval, unbounded.
    pub const fn redemption_watch() -> Self {
        Self {
            max_attempts: None,
            poll_interval_secs: 5,
        }
    }

    /// Transaction receipt polling: 1 second interval, 300 attempts.
    pub const fn receipt() -> Self {
        Self {
            max_attempts: Some(300),
            poll_interval_secs: 1,
        }
    }

    /// Sets the maximum number of polling attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Removes the attempt bound.
    pub fn unbounded(mut self) -> Self {
        self.max_attempts = None;
        self
    }

    /// Sets the interval between polling attempts in seconds.
    pub fn with_poll_interval_secs(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Whether `attempt` (1-based) used up the configured attempts.
    pub fn exhausted(&self, attempt: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempt >= max)
    }

    /// Returns the total maximum wait time in seconds, if bounded.
    pub fn total_timeout_secs(&self) -> Option<u64> {
        self.max_attempts
            .map(|attempts| attempts as u64 * self.poll_interval_secs)
    }
}

/// Polling behaviour of every waiting step of the bridge flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct FlowConfig {
    #[builder(default = PollingConfig::attestation())]
    pub attestation: PollingConfig,
    #[builder(default = PollingConfig::signed_vaa())]
    pub signed_vaa: PollingConfig,
    #[builder(default = PollingConfig::redemption_watch())]
    pub redemption_watch: PollingConfig,
    #[builder(default = PollingConfig::receipt())]
    pub receipt: PollingConfig,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Endpoints and credentials read from the environment (and `.env`).
///
/// | Variable | Default |
/// |---|---|
/// | `SOURCE_RPC_URL` | required for a wallet provider |
/// | `TARGET_RPC_URL` | required for a wallet provider |
/// | `IRIS_API_URL` | [`IRIS_API_SANDBOX`] |
/// | `WORMHOLE_RPC_HOSTS` | [`WORMHOLE_TESTNET_RPC_HOSTS`], comma separated |
/// | `PRIVATE_KEY` | none |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub source_rpc_url: Option<String>,
    pub target_rpc_url: Option<String>,
    pub iris_api_url: String,
    pub wormhole_rpc_hosts: Vec<String>,
    private_key: Option<String>,
}

impl EnvConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let wormhole_rpc_hosts = non_empty("WORMHOLE_RPC_HOSTS")
            .map(|hosts| {
                hosts
                    .split(',')
                    .map(|host| host.trim().trim_end_matches('/').to_string())
                    .filter(|host| !host.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| {
                WORMHOLE_TESTNET_RPC_HOSTS
                    .iter()
                    .map(|host| host.to_string())
                    .collect()
            });

        Self {
            source_rpc_url: non_empty("SOURCE_RPC_URL"),
            target_rpc_url: non_empty("TARGET_RPC_URL"),
            iris_api_url: non_empty("IRIS_API_URL")
                .unwrap_or_else(|| IRIS_API_SANDBOX.to_string()),
            wormhole_rpc_hosts,
            private_key: non_empty("PRIVATE_KEY"),
        }
    }

    /// Parses `PRIVATE_KEY` into a local signer.
    pub fn signer(&self) -> Result<PrivateKeySigner> {
        let key = self
            .private_key
            .as_deref()
            .ok_or_else(|| BridgeError::NotReady("PRIVATE_KEY is not set".to_string()))?;
        key.parse()
            .map_err(|e| BridgeError::Provider(format!("invalid PRIVATE_KEY: {e}")))
    }

    /// A signing HTTP provider for the source chain.
    pub fn source_provider(&self) -> Result<impl Provider<Ethereum> + Clone> {
        self.wallet_provider(self.source_rpc_url.as_deref(), "SOURCE_RPC_URL")
    }

    /// A signing HTTP provider for the target chain.
    pub fn target_provider(&self) -> Result<impl Provider<Ethereum> + Clone> {
        self.wallet_provider(self.target_rpc_url.as_deref(), "TARGET_RPC_URL")
    }

    fn wallet_provider(
        &self,
        rpc_url: Option<&str>,
        variable: &str,
    ) -> Result<impl Provider<Ethereum> + Clone> {
        let rpc_url = rpc_url.ok_or_else(|| BridgeError::InvalidUrl {
            reason: format!("{variable} is not set"),
        })?;
        let url = Url::parse(rpc_url).map_err(|e| BridgeError::InvalidUrl {
            reason: format!("{variable}: {e}"),
        })?;
        let wallet = EthereumWallet::from(self.signer()?);

        Ok(ProviderBuilder::new().wallet(wallet).connect_http(url))
    }
}
