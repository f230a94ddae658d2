// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Destination-chain half of a transfer
//!
//! A complete [`TransferReceipt`] is redeemed either by hand, through
//! `receiveMessage` on the direct path or `redeemTokens` on the relay path, or
//! by the relayer, which [`RedeemOrchestrator::watch_relayer_redemption`]
//! detects by polling `isMessageConsumed`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use alloy_primitives::{Address, Bytes, B256};
use alloy_rpc_types::TransactionRequest;
use bon::Builder;
use tracing::{debug, error, info, warn, Instrument};

use super::receipt::{ConfirmationStatus, RedeemReceipt, TransferReceipt};
use super::request::TransferRequest;
use super::state::{FlowObserver, FlowUpdate, Notice, RedeemEvent, RedeemMachine, RedeemState};
use super::transfer::confirmed_receipt;
use super::FlowConfig;
use crate::chain::{chain_for_domain, BridgeChain};
use crate::contracts::circle_integration::CircleIntegrationContract;
use crate::contracts::circle_relayer::CircleRelayerContract;
use crate::contracts::message_transmitter::MessageTransmitterContract;
use crate::error::{BridgeError, Result};
use crate::protocol::{RelayTransferPayload, Vaa};
use crate::spans;
use crate::traits::{ChainClient, Clock};

/// Stops a running relayer watch at its next poll.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Redeems attested transfers on the destination chain.
#[derive(Builder, Debug, Clone)]
pub struct RedeemOrchestrator<D, C> {
    target: D,
    clock: C,
    #[builder(default)]
    config: FlowConfig,
}

impl<D, C> RedeemOrchestrator<D, C>
where
    D: ChainClient,
    C: Clock,
{
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Submits the redemption for a complete transfer and waits for it to be mined.
    ///
    /// Failures return the flow to `NotRedeeming` so the user can retry.
    pub async fn redeem<O>(
        &self,
        request: &TransferRequest,
        receipt: &TransferReceipt,
        observer: &O,
    ) -> Result<RedeemReceipt>
    where
        O: FlowObserver + ?Sized,
    {
        if !receipt.is_complete(request.relay) {
            return Err(BridgeError::NotReady(
                "transfer has not been attested yet".to_string(),
            ));
        }
        let signer = self
            .target
            .signer_address()
            .ok_or_else(|| BridgeError::NotReady("no wallet connected".to_string()))?;
        let span = spans::redeem(&request.source_chain, &request.target_chain, request.relay);

        async move {
            let mut machine = RedeemMachine::new();

            match self.run(request, receipt, signer, &mut machine, observer).await {
                Ok(redeemed) => Ok(redeemed),
                Err(err) => {
                    let reason = err.user_message();
                    spans::record_error_with_context("RedeemFailed", &reason, None);
                    error!(
                        state = machine.state().name(),
                        error = %err,
                        event = "redeem_failed"
                    );

                    if machine.apply(RedeemEvent::Failed).is_ok() {
                        observer.publish(machine.update());
                    }
                    observer.publish(FlowUpdate::Notice(Notice::error(reason)));
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run<O>(
        &self,
        request: &TransferRequest,
        receipt: &TransferReceipt,
        signer: Address,
        machine: &mut RedeemMachine,
        observer: &O,
    ) -> Result<RedeemReceipt>
    where
        O: FlowObserver + ?Sized,
    {
        machine.apply(RedeemEvent::Submitted)?;
        observer.publish(machine.update());

        let tx = self.redeem_transaction(request, receipt, signer).await?;
        let tx_hash = self.target.send_transaction(tx).await?;
        tracing::Span::current().record("tx_hash", tracing::field::display(tx_hash));
        info!(tx_hash = %tx_hash, event = "redeem_transaction_sent");

        machine.apply(RedeemEvent::Signed { tx_hash })?;
        observer.publish(machine.update());

        confirmed_receipt(self.target.wait_for_receipt(tx_hash).await?)?;
        machine.apply(RedeemEvent::Confirmed)?;
        observer.publish(machine.update());
        observer.publish(FlowUpdate::Notice(Notice::success(
            "Redeem transaction confirmed",
        )));
        info!(tx_hash = %tx_hash, event = "redeem_confirmed");

        Ok(RedeemReceipt {
            tx_hash,
            status: ConfirmationStatus::Confirmed,
        })
    }

    async fn redeem_transaction(
        &self,
        request: &TransferRequest,
        receipt: &TransferReceipt,
        signer: Address,
    ) -> Result<TransactionRequest> {
        let (message, attestation) = message_and_attestation(receipt)?;

        let Some(vaa_bytes) = receipt.vaa.clone().filter(|_| request.relay) else {
            let transmitter =
                MessageTransmitterContract::new(request.target_chain.circle_emitter_address()?);
            return Ok(transmitter.receive_message_transaction(signer, message, attestation));
        };

        let vaa = Vaa::parse(&vaa_bytes)?;
        let payload = RelayTransferPayload::decode(&vaa.payload)?;
        let domain_chain = chain_for_domain(payload.target_domain)
            .ok_or(BridgeError::UnknownDomain(payload.target_domain))?;
        if domain_chain != request.target_chain {
            warn!(
                target_domain = payload.target_domain,
                target_chain = %request.target_chain,
                event = "relay_payload_domain_mismatch"
            );
        }
        let relayer = CircleRelayerContract::new(request.target_chain.usdc_relayer_address()?);

        let value = relayer
            .calculate_native_swap_amount(
                &self.target,
                payload.token_address(),
                payload.to_native_token_amount,
            )
            .await?;
        debug!(
            target_domain = payload.target_domain,
            sequence = vaa.sequence,
            value = %value,
            event = "relay_redeem_quoted"
        );

        Ok(relayer.redeem_tokens_transaction(signer, vaa_bytes, message, attestation, value))
    }

    /// Polls the target chain until the relayer has redeemed this transfer.
    ///
    /// Returns `Ok(true)` once the VAA digest is consumed, `Ok(false)` when
    /// cancelled or out of attempts. Query errors are logged and retried.
    pub async fn watch_relayer_redemption<O>(
        &self,
        request: &TransferRequest,
        receipt: &TransferReceipt,
        cancel: &CancellationFlag,
        observer: &O,
    ) -> Result<bool>
    where
        O: FlowObserver + ?Sized,
    {
        let vaa = receipt
            .vaa
            .as_ref()
            .ok_or_else(|| BridgeError::NotReady("no signed VAA to watch".to_string()))?;
        let digest: B256 = Vaa::parse(vaa)?.digest();
        let integration =
            CircleIntegrationContract::new(request.target_chain.circle_integration_address()?);
        let polling = self.config.redemption_watch;

        let span = spans::watch_relayer_redemption(&request.target_chain, &digest);
        async move {
            let mut attempt: u32 = 0;
            loop {
                if cancel.is_cancelled() {
                    debug!(attempt = attempt, event = "relayer_watch_cancelled");
                    return Ok(false);
                }
                attempt += 1;

                match integration.is_message_consumed(&self.target, digest).await {
                    Ok(true) => {
                        info!(attempt = attempt, event = "redeemed_by_relayer");
                        observer.publish(FlowUpdate::Redeem {
                            state: RedeemState::RedeemedByRelayer,
                            tx_hash: None,
                        });
                        return Ok(true);
                    }
                    Ok(false) => debug!(attempt = attempt, event = "relayer_redemption_pending"),
                    Err(e) => warn!(attempt = attempt, error = %e, event = "relayer_watch_query_failed"),
                }

                if polling.exhausted(attempt) {
                    return Ok(false);
                }

                self.clock.sleep(polling.poll_interval()).await;
            }
        }
        .instrument(span)
        .await
    }
}

fn message_and_attestation(receipt: &TransferReceipt) -> Result<(Bytes, Bytes)> {
    match (&receipt.message, &receipt.attestation) {
        (Some(message), Some(attestation)) => Ok((message.clone(), attestation.clone())),
        _ => Err(BridgeError::NotReady(
            "transfer has not been attested yet".to_string(),
        )),
    }
}
