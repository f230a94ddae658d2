// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_rpc_types::TransactionRequest;
use bon::Builder;
use tracing::{error, info, Instrument};

use super::attestation::{poll_attestation, poll_signed_vaa};
use super::logs::{find_circle_message_in_logs, parse_sequence_from_logs};
use super::receipt::TransferReceipt;
use super::request::{ApprovalAmount, TransferRequest};
use super::state::{
    AllowanceState, FlowObserver, FlowUpdate, Notice, TransferEvent, TransferMachine,
};
use super::FlowConfig;
use crate::chain::BridgeChain;
use crate::contracts::circle_relayer::CircleRelayerContract;
use crate::contracts::erc20::Erc20Contract;
use crate::contracts::token_messenger::TokenMessengerContract;
use crate::error::{BridgeError, Result};
use crate::protocol::{UsdcAmount, WormholeChain};
use crate::spans;
use crate::traits::{AttestationProvider, ChainClient, Clock, MinedReceipt, SignedVaaProvider};

/// Source-chain half of a transfer: approve, burn (directly or through the
/// relayer), wait for the Circle attestation and, when relaying, the VAA.
///
/// # Example
///
/// ```rust,ignore
/// use usdc_bridge::{TransferOrchestrator, TransferRequest, NoopObserver};
/// use usdc_bridge::providers::{IrisAttestationProvider, TokioClock, WormholeRpcProvider};
///
/// let orchestrator = TransferOrchestrator::builder()
///     .source(source_client)
///     .attestation_provider(IrisAttestationProvider::sandbox())
///     .vaa_provider(WormholeRpcProvider::testnet())
///     .clock(TokioClock::new())
///     .build();
///
/// let receipt = orchestrator.transfer(&request, &NoopObserver).await?;
/// ```
#[derive(Builder, Debug, Clone)]
pub struct TransferOrchestrator<S, A, V, C> {
    source: S,
    attestation_provider: A,
    vaa_provider: V,
    clock: C,
    #[builder(default)]
    config: FlowConfig,
}

/// Addresses and ids resolved from the registry before anything is sent.
#[derive(Debug, Clone, Copy)]
struct TransferPlan {
    signer: Address,
    usdc: Address,
    circle_bridge: Address,
    circle_emitter: Address,
    target_domain: u32,
    relay: Option<RelayPlan>,
}

#[derive(Debug, Clone, Copy)]
struct RelayPlan {
    relayer: Address,
    core_bridge: Address,
    source_chain: WormholeChain,
    target_chain: WormholeChain,
    emitter: B256,
}

impl<S, A, V, C> TransferOrchestrator<S, A, V, C>
where
    S: ChainClient,
    A: AttestationProvider,
    V: SignedVaaProvider,
    C: Clock,
{
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    fn signer(&self) -> Result<Address> {
        self.source
            .signer_address()
            .ok_or_else(|| BridgeError::NotReady("no wallet connected".to_string()))
    }

    fn plan(&self, request: &TransferRequest) -> Result<TransferPlan> {
        request.validate()?;
        let signer = self.signer()?;
        let source = request.source_chain;
        let target = request.target_chain;

        let relay = if request.relay {
            Some(RelayPlan {
                relayer: source.usdc_relayer_address()?,
                core_bridge: source.wormhole_core_address()?,
                source_chain: source.wormhole_chain()?,
                target_chain: target.wormhole_chain()?,
                emitter: source.wormhole_emitter_address()?,
            })
        } else {
            None
        };

        Ok(TransferPlan {
            signer,
            usdc: source.usdc_address()?,
            circle_bridge: source.circle_bridge_address()?,
            circle_emitter: source.circle_emitter_address()?,
            target_domain: target.circle_domain()?.as_u32(),
            relay,
        })
    }

    /// Runs the source-chain flow to a complete [`TransferReceipt`].
    ///
    /// Precondition failures (`NotReady`, `InvalidAmount`, unsupported chains)
    /// return before anything is published. Every later failure moves the
    /// flow to `Failed` and publishes an error notice.
    pub async fn transfer<O>(&self, request: &TransferRequest, observer: &O) -> Result<TransferReceipt>
    where
        O: FlowObserver + ?Sized,
    {
        let plan = self.plan(request)?;
        let span = spans::transfer(&request.source_chain, &request.target_chain, request.relay);

        async move {
            let mut machine = TransferMachine::new(request.relay);

            match self.run(request, &plan, &mut machine, observer).await {
                Ok(receipt) => Ok(receipt),
                Err(err) => {
                    let reason = err.user_message();
                    spans::record_error_with_context("TransferFailed", &reason, None);
                    error!(
                        state = machine.state().name(),
                        error = %err,
                        event = "transfer_failed"
                    );

                    if machine
                        .apply(TransferEvent::Failed {
                            reason: reason.clone(),
                        })
                        .is_ok()
                    {
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
        plan: &TransferPlan,
        machine: &mut TransferMachine,
        observer: &O,
    ) -> Result<TransferReceipt>
    where
        O: FlowObserver + ?Sized,
    {
        machine.apply(TransferEvent::Submitted)?;
        observer.publish(machine.update());

        let tx = self.burn_transaction(request, plan);
        let tx_hash = self.source.send_transaction(tx).await?;
        tracing::Span::current().record("tx_hash", tracing::field::display(tx_hash));
        info!(tx_hash = %tx_hash, event = "transfer_transaction_sent");

        machine.apply(TransferEvent::Signed { tx_hash })?;
        observer.publish(machine.update());

        let receipt = confirmed_receipt(self.source.wait_for_receipt(tx_hash).await?)?;
        observer.publish(FlowUpdate::Notice(Notice::success(
            "Transfer transaction confirmed",
        )));

        let message = find_circle_message_in_logs(&receipt.logs, plan.circle_emitter)?
            .ok_or(BridgeError::MessageNotFound { tx_hash })?;
        let sequence = match &plan.relay {
            Some(relay) => Some(
                parse_sequence_from_logs(&receipt.logs, relay.core_bridge)?
                    .ok_or(BridgeError::SequenceNotFound { tx_hash })?,
            ),
            None => None,
        };
        let message_hash = keccak256(&message);
        info!(
            tx_hash = %tx_hash,
            message_hash = %message_hash,
            sequence = ?sequence,
            event = "transfer_confirmed"
        );

        machine.apply(TransferEvent::Confirmed { message, sequence })?;
        observer.publish(machine.update());

        let attestation = poll_attestation(
            &self.attestation_provider,
            &self.clock,
            message_hash,
            &self.config.attestation,
        )
        .await?;
        machine.apply(TransferEvent::Attested { attestation })?;
        observer.publish(machine.update());
        observer.publish(FlowUpdate::Notice(Notice::success("Circle attestation found")));

        if let (Some(relay), Some(sequence)) = (&plan.relay, sequence) {
            let vaa = poll_signed_vaa(
                &self.vaa_provider,
                &self.clock,
                relay.source_chain,
                relay.emitter,
                sequence,
                &self.config.signed_vaa,
            )
            .await?;
            machine.apply(TransferEvent::VaaSigned { vaa })?;
            observer.publish(machine.update());
            observer.publish(FlowUpdate::Notice(Notice::success("Wormhole message found")));
        }

        let receipt = machine
            .completed_receipt()
            .cloned()
            .ok_or(BridgeError::InvalidTransition {
                state: machine.state().name(),
                event: "complete",
            })?;
        info!(tx_hash = %tx_hash, event = "transfer_complete");

        Ok(receipt)
    }

    fn burn_transaction(&self, request: &TransferRequest, plan: &TransferPlan) -> TransactionRequest {
        match &plan.relay {
            Some(relay) => CircleRelayerContract::new(relay.relayer)
                .transfer_tokens_with_relay_transaction(
                    plan.signer,
                    plan.usdc,
                    request.amount.base_units(),
                    request.to_native_token_amount.base_units(),
                    relay.target_chain.as_u16(),
                    plan.signer.into_word(),
                ),
            None => TokenMessengerContract::new(plan.circle_bridge).deposit_for_burn_transaction(
                plan.signer,
                plan.signer,
                plan.target_domain,
                plan.usdc,
                request.amount.base_units(),
            ),
        }
    }

    /// Checks whether the spender for this request may already pull the amount.
    pub async fn allowance_sufficient<O>(&self, request: &TransferRequest, observer: &O) -> Result<bool>
    where
        O: FlowObserver + ?Sized,
    {
        let signer = self.signer()?;
        let spender = request.spender()?;
        let usdc = Erc20Contract::new(request.source_chain.usdc_address()?);

        observer.publish(FlowUpdate::Allowance(AllowanceState::Fetching));
        let allowance = match usdc.allowance(&self.source, signer, spender).await {
            Ok(allowance) => allowance,
            Err(err) => {
                observer.publish(FlowUpdate::Allowance(AllowanceState::Checked {
                    sufficient: false,
                }));
                return Err(err);
            }
        };

        let sufficient = allowance >= request.amount.base_units();
        observer.publish(FlowUpdate::Allowance(AllowanceState::Checked { sufficient }));

        Ok(sufficient)
    }

    /// Reads the wallet's USDC balance on the source chain.
    pub async fn source_balance<O>(&self, request: &TransferRequest, observer: &O) -> Result<UsdcAmount>
    where
        O: FlowObserver + ?Sized,
    {
        let signer = self.signer()?;
        let usdc = Erc20Contract::new(request.source_chain.usdc_address()?);
        let amount = UsdcAmount::from_base_units(usdc.balance_of(&self.source, signer).await?);

        observer.publish(FlowUpdate::Balance {
            chain: request.source_chain,
            amount,
        });
        Ok(amount)
    }

    /// Approves the spender for this request and waits for the receipt.
    pub async fn approve<O>(
        &self,
        request: &TransferRequest,
        amount: ApprovalAmount,
        observer: &O,
    ) -> Result<()>
    where
        O: FlowObserver + ?Sized,
    {
        request.validate()?;
        let signer = self.signer()?;
        let spender = request.spender()?;
        let usdc = Erc20Contract::new(request.source_chain.usdc_address()?);
        let value: U256 = amount.base_units(request);

        let span = spans::approve(&request.source_chain, &spender, &value);
        async move {
            observer.publish(FlowUpdate::Allowance(AllowanceState::Approving));

            let result = async {
                let tx_hash = self
                    .source
                    .send_transaction(usdc.approve_transaction(signer, spender, value))
                    .await?;
                confirmed_receipt(self.source.wait_for_receipt(tx_hash).await?)
            }
            .await;

            match result {
                Ok(receipt) => {
                    info!(
                        tx_hash = %receipt.transaction_hash,
                        spender = %spender,
                        amount = %value,
                        event = "approval_confirmed"
                    );
                    observer.publish(FlowUpdate::Allowance(AllowanceState::Approved));
                    observer.publish(FlowUpdate::Notice(Notice::success(
                        "Approval transaction confirmed",
                    )));
                    Ok(())
                }
                Err(err) => {
                    spans::record_error_with_context(
                        "ApprovalFailed",
                        &err.user_message(),
                        None,
                    );
                    error!(error = %err, event = "approval_failed");
                    observer.publish(FlowUpdate::Allowance(AllowanceState::Failed));
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// A mined, successful receipt or the failure the user sees.
pub(crate) fn confirmed_receipt(receipt: Option<MinedReceipt>) -> Result<MinedReceipt> {
    let receipt = receipt.ok_or_else(|| BridgeError::TransactionFailed {
        reason: "Invalid receipt".to_string(),
    })?;
    if !receipt.success {
        return Err(BridgeError::TransactionFailed {
            reason: format!("Transaction {} reverted", receipt.transaction_hash),
        });
    }
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::state::{NoopObserver, TransferState};
    use crate::contracts::token_messenger::TokenMessenger::depositForBurnCall;
    use crate::protocol::{AttestationResponse, UsdcAmount};
    use crate::testing::{
        message_sent_log, FakeAttestationProvider, FakeChainClient, FakeClock, FakeVaaProvider,
    };
    use alloy_chains::NamedChain;
    use alloy_primitives::TxHash;
    use alloy_sol_types::SolCall;
    use tokio::sync::mpsc;

    type Orchestrator =
        TransferOrchestrator<FakeChainClient, FakeAttestationProvider, FakeVaaProvider, FakeClock>;

    fn orchestrator(source: FakeChainClient, attestations: FakeAttestationProvider) -> Orchestrator {
        TransferOrchestrator::builder()
            .source(source)
            .attestation_provider(attestations)
            .vaa_provider(FakeVaaProvider::new())
            .clock(FakeClock::new())
            .build()
    }

    fn request() -> TransferRequest {
        TransferRequest::builder()
            .source_chain(NamedChain::Goerli)
            .target_chain(NamedChain::AvalancheFuji)
            .amount(UsdcAmount::parse("100").unwrap())
            .build()
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<FlowUpdate>) -> Vec<FlowUpdate> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[tokio::test]
    async fn test_missing_signer_is_silent_no_op() {
        let source = FakeChainClient::new(None);
        let orchestrator = orchestrator(source.clone(), FakeAttestationProvider::new());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let err = orchestrator.transfer(&request(), &tx).await.unwrap_err();

        assert!(err.is_validation());
        assert!(drain(&mut rx).is_empty());
        assert!(source.sent_transactions().is_empty());
    }

    #[tokio::test]
    async fn test_direct_transfer_burns_and_waits_for_attestation() {
        let signer = Address::repeat_byte(0xaa);
        let source = FakeChainClient::new(Some(signer));
        let tx_hash = TxHash::repeat_byte(0x01);
        let emitter = NamedChain::Goerli.circle_emitter_address().unwrap();
        source.queue_transaction(
            tx_hash,
            Some(MinedReceipt {
                transaction_hash: tx_hash,
                success: true,
                logs: vec![message_sent_log(emitter, b"circle message")],
            }),
        );
        let attestations = FakeAttestationProvider::new();
        attestations.add_response_sequence(
            keccak256(b"circle message"),
            vec![
                Ok(AttestationResponse::pending()),
                Ok(AttestationResponse::complete(vec![0xee])),
            ],
        );
        let orchestrator = orchestrator(source.clone(), attestations);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let receipt = orchestrator.transfer(&request(), &tx).await.unwrap();

        assert_eq!(receipt.source_tx_hash, tx_hash);
        assert_eq!(receipt.message.as_ref().map(|m| m.to_vec()), Some(b"circle message".to_vec()));
        assert_eq!(receipt.attestation.as_ref().map(|a| a.to_vec()), Some(vec![0xee]));
        assert_eq!(receipt.vaa, None);

        let sent = source.sent_transactions();
        assert_eq!(sent.len(), 1);
        let call = depositForBurnCall::abi_decode(sent[0].input.input().unwrap()).unwrap();
        assert_eq!(call.amount, U256::from(100_000_000u64));
        assert_eq!(call.destinationDomain, 1);
        assert_eq!(call.mintRecipient, signer.into_word());

        let states: Vec<_> = drain(&mut rx)
            .into_iter()
            .filter_map(|update| match update {
                FlowUpdate::Transfer { state, .. } => Some(state),
                _ => None,
            })
            .collect();
        assert_eq!(
            states,
            vec![
                TransferState::AwaitingWalletApproval,
                TransferState::AwaitingConfirmation,
                TransferState::AwaitingAttestation,
                TransferState::Complete,
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_receipt_fails_with_invalid_receipt() {
        let source = FakeChainClient::new(Some(Address::repeat_byte(0xaa)));
        source.queue_transaction(TxHash::repeat_byte(0x02), None);
        let orchestrator = orchestrator(source, FakeAttestationProvider::new());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let err = orchestrator.transfer(&request(), &tx).await.unwrap_err();

        assert_eq!(err.user_message(), "Invalid receipt");
        let updates = drain(&mut rx);
        assert!(updates.contains(&FlowUpdate::Notice(Notice::error("Invalid receipt"))));
        assert!(updates.iter().any(|update| matches!(
            update,
            FlowUpdate::Transfer {
                state: TransferState::Failed { .. },
                ..
            }
        )));
    }

    #[tokio::test]
    async fn test_receipt_without_message_reports_tx_hash() {
        let source = FakeChainClient::new(Some(Address::repeat_byte(0xaa)));
        let tx_hash = TxHash::repeat_byte(0x03);
        source.queue_transaction(
            tx_hash,
            Some(MinedReceipt {
                transaction_hash: tx_hash,
                success: true,
                logs: vec![],
            }),
        );
        let orchestrator = orchestrator(source, FakeAttestationProvider::new());

        let err = orchestrator.transfer(&request(), &NoopObserver).await.unwrap_err();

        assert!(matches!(err, BridgeError::MessageNotFound { tx_hash: hash } if hash == tx_hash));
    }

    #[tokio::test]
    async fn test_allowance_and_approve() {
        let signer = Address::repeat_byte(0xaa);
        let source = FakeChainClient::new(Some(signer));
        source.set_call_response(
            crate::contracts::erc20::Erc20::allowanceCall::SELECTOR,
            U256::from(1u64),
        );
        let approve_hash = TxHash::repeat_byte(0x04);
        source.queue_transaction(
            approve_hash,
            Some(MinedReceipt {
                transaction_hash: approve_hash,
                success: true,
                logs: vec![],
            }),
        );
        let orchestrator = orchestrator(source.clone(), FakeAttestationProvider::new());
        let (tx, mut rx) = mpsc::unbounded_channel();

        assert!(!orchestrator.allowance_sufficient(&request(), &tx).await.unwrap());
        orchestrator
            .approve(&request(), ApprovalAmount::Unlimited, &tx)
            .await
            .unwrap();

        assert_eq!(
            drain(&mut rx),
            vec![
                FlowUpdate::Allowance(AllowanceState::Fetching),
                FlowUpdate::Allowance(AllowanceState::Checked { sufficient: false }),
                FlowUpdate::Allowance(AllowanceState::Approving),
                FlowUpdate::Allowance(AllowanceState::Approved),
                FlowUpdate::Notice(Notice::success("Approval transaction confirmed")),
            ]
        );
        let sent = source.sent_transactions();
        assert_eq!(
            sent[0].to,
            Some(NamedChain::Goerli.usdc_address().unwrap().into())
        );
    }

    #[tokio::test]
    async fn test_source_balance_reads_signer_usdc() {
        let signer = Address::repeat_byte(0xaa);
        let source = FakeChainClient::new(Some(signer));
        source.set_call_response(
            crate::contracts::erc20::Erc20::balanceOfCall::SELECTOR,
            U256::from(12_500_000u64),
        );
        let orchestrator = orchestrator(source.clone(), FakeAttestationProvider::new());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let balance = orchestrator.source_balance(&request(), &tx).await.unwrap();

        assert_eq!(balance.to_string(), "12.5");
        assert_eq!(
            drain(&mut rx),
            vec![FlowUpdate::Balance {
                chain: NamedChain::Goerli,
                amount: balance,
            }]
        );
        let call = source.calls();
        assert_eq!(call[0].to, Some(NamedChain::Goerli.usdc_address().unwrap().into()));
        let decoded =
            crate::contracts::erc20::Erc20::balanceOfCall::abi_decode(call[0].input.input().unwrap())
                .unwrap();
        assert_eq!(decoded.account, signer);
    }

    #[tokio::test]
    async fn test_rejected_approval_publishes_failure() {
        let source = FakeChainClient::new(Some(Address::repeat_byte(0xaa)));
        source.fail_next_send("user rejected transaction");
        let orchestrator = orchestrator(source, FakeAttestationProvider::new());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let result = orchestrator
            .approve(&request(), ApprovalAmount::Exact, &tx)
            .await;

        assert!(result.is_err());
        assert_eq!(
            drain(&mut rx),
            vec![
                FlowUpdate::Allowance(AllowanceState::Approving),
                FlowUpdate::Allowance(AllowanceState::Failed),
            ]
        );
    }
}
