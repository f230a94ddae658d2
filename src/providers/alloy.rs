// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Alloy-based chain client implementation.

use alloy_network::Ethereum;
use alloy_primitives::{Address, Bytes, TxHash};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use tracing::{debug, instrument, trace, Instrument};

use super::TokioClock;
use crate::bridge::PollingConfig;
use crate::error::{BridgeError, Result};
use crate::spans;
use crate::traits::{ChainClient, Clock, MinedReceipt};

/// Production chain client wrapping Alloy's [`Provider`] trait.
///
/// Writes go through the provider's wallet filler, so the provider must be
/// built with `.wallet(...)` for [`ChainClient::send_transaction`] to sign.
///
/// # Examples
///
/// ```rust,no_run
/// use usdc_bridge::providers::AlloyChainClient;
/// use alloy_provider::ProviderBuilder;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new().connect_http("https://rpc.ankr.com/eth_goerli".parse()?);
/// let client = AlloyChainClient::new(provider);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AlloyChainClient<P>
where
    P: Provider<Ethereum> + Clone,
{
    provider: P,
    signer: Option<Address>,
    receipt_polling: PollingConfig,
    clock: TokioClock,
}

impl<P> AlloyChainClient<P>
where
    P: Provider<Ethereum> + Clone,
{
    /// Creates a read-only client wrapping the given Alloy provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            signer: None,
            receipt_polling: PollingConfig::receipt(),
            clock: TokioClock::new(),
        }
    }

    /// Sets the address the wallet filler signs with.
    pub fn with_signer(mut self, signer: Address) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn with_receipt_polling(mut self, polling: PollingConfig) -> Self {
        self.receipt_polling = polling;
        self
    }

    /// Returns a reference to the underlying Alloy provider.
    pub fn inner(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P> ChainClient for AlloyChainClient<P>
where
    P: Provider<Ethereum> + Clone + Send + Sync,
{
    fn signer_address(&self) -> Option<Address> {
        self.signer
    }

    #[instrument(skip(self, tx))]
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash> {
        let tx = match (tx.from, self.signer) {
            (None, Some(signer)) => tx.from(signer),
            _ => tx,
        };

        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        debug!(tx_hash = %tx_hash, event = "transaction_sent");

        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<Option<MinedReceipt>> {
        let span = spans::wait_for_receipt(tx_hash, self.receipt_polling.max_attempts);

        async {
            let mut attempt: u32 = 0;
            loop {
                attempt += 1;
                trace!(attempt = attempt, event = "fetching_receipt");

                let receipt = self
                    .provider
                    .get_transaction_receipt(tx_hash)
                    .await
                    .map_err(|e| BridgeError::Provider(e.to_string()))?;

                if let Some(receipt) = receipt {
                    let logs = receipt
                        .inner
                        .logs()
                        .iter()
                        .map(|log| log.inner.clone())
                        .collect();
                    debug!(
                        status = receipt.status(),
                        attempt = attempt,
                        event = "receipt_found"
                    );
                    return Ok(Some(MinedReceipt {
                        transaction_hash: tx_hash,
                        success: receipt.status(),
                        logs,
                    }));
                }

                if self.receipt_polling.exhausted(attempt) {
                    debug!(attempts = attempt, event = "receipt_not_found");
                    return Ok(None);
                }

                self.clock.sleep(self.receipt_polling.poll_interval()).await;
            }
        }
        .instrument(span)
        .await
    }

    #[instrument(skip(self, tx))]
    async fn call(&self, tx: TransactionRequest) -> Result<Bytes> {
        let output = self.provider.call(tx).await?;
        trace!(output_len = output.len(), event = "call_returned");
        Ok(output)
    }
}
