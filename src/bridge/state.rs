// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Transfer and redeem state machines, and the updates they publish
//!
//! ```text
//! Idle → AwaitingWalletApproval → AwaitingConfirmation → AwaitingAttestation
//!      → AwaitingCrossChainMessage (relay only) → Complete
//! any in-flight state → Failed
//!
//! NotRedeeming → AwaitingWalletApproval → AwaitingConfirmation → Complete
//! failure → NotRedeeming, relayer redemption → RedeemedByRelayer
//! ```

use alloy_chains::NamedChain;
use alloy_primitives::{Bytes, TxHash};
use tokio::sync::mpsc::UnboundedSender;

use super::receipt::{ConfirmationStatus, TransferReceipt};
use crate::error::{BridgeError, Result};
use crate::protocol::UsdcAmount;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferState {
    Idle,
    AwaitingWalletApproval,
    AwaitingConfirmation,
    AwaitingAttestation,
    AwaitingCrossChainMessage,
    Complete,
    Failed { reason: String },
}

impl TransferState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingWalletApproval => "awaiting_wallet_approval",
            Self::AwaitingConfirmation => "awaiting_confirmation",
            Self::AwaitingAttestation => "awaiting_attestation",
            Self::AwaitingCrossChainMessage => "awaiting_cross_chain_message",
            Self::Complete => "complete",
            Self::Failed { .. } => "failed",
        }
    }

    /// True between submission and completion or failure.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::AwaitingWalletApproval
                | Self::AwaitingConfirmation
                | Self::AwaitingAttestation
                | Self::AwaitingCrossChainMessage
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferEvent {
    /// The transaction was handed to the wallet
    Submitted,
    /// The wallet signed and broadcast it
    Signed { tx_hash: TxHash },
    /// The receipt is in and the Circle message was found in its logs
    Confirmed {
        message: Bytes,
        sequence: Option<u64>,
    },
    Attested { attestation: Bytes },
    VaaSigned { vaa: Bytes },
    Failed { reason: String },
}

impl TransferEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Signed { .. } => "signed",
            Self::Confirmed { .. } => "confirmed",
            Self::Attested { .. } => "attested",
            Self::VaaSigned { .. } => "vaa_signed",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Drives one transfer and accumulates its [`TransferReceipt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferMachine {
    relay: bool,
    state: TransferState,
    receipt: Option<TransferReceipt>,
}

impl TransferMachine {
    pub fn new(relay: bool) -> Self {
        Self {
            relay,
            state: TransferState::Idle,
            receipt: None,
        }
    }

    pub fn state(&self) -> &TransferState {
        &self.state
    }

    pub fn receipt(&self) -> Option<&TransferReceipt> {
        self.receipt.as_ref()
    }

    /// Applies an event, rejecting transitions the flow cannot take.
    pub fn apply(&mut self, event: TransferEvent) -> Result<&TransferState> {
        let invalid = BridgeError::InvalidTransition {
            state: self.state.name(),
            event: event.name(),
        };

        let next = match (&self.state, event) {
            (TransferState::Idle, TransferEvent::Submitted) => TransferState::AwaitingWalletApproval,
            (TransferState::AwaitingWalletApproval, TransferEvent::Signed { tx_hash }) => {
                self.receipt = Some(TransferReceipt::pending(tx_hash));
                TransferState::AwaitingConfirmation
            }
            (TransferState::AwaitingConfirmation, TransferEvent::Confirmed { message, sequence }) => {
                if self.relay && sequence.is_none() {
                    return Err(invalid);
                }
                let receipt = self.receipt.as_mut().ok_or(invalid)?;
                receipt.status = ConfirmationStatus::Confirmed;
                receipt.message = Some(message);
                receipt.sequence = sequence;
                TransferState::AwaitingAttestation
            }
            (TransferState::AwaitingAttestation, TransferEvent::Attested { attestation }) => {
                let receipt = self.receipt.as_mut().ok_or(invalid)?;
                receipt.attestation = Some(attestation);
                if self.relay {
                    TransferState::AwaitingCrossChainMessage
                } else {
                    TransferState::Complete
                }
            }
            (TransferState::AwaitingCrossChainMessage, TransferEvent::VaaSigned { vaa }) => {
                let receipt = self.receipt.as_mut().ok_or(invalid)?;
                receipt.vaa = Some(vaa);
                TransferState::Complete
            }
            (state, TransferEvent::Failed { reason }) if state.is_in_flight() => {
                TransferState::Failed { reason }
            }
            _ => return Err(invalid),
        };

        self.state = next;
        Ok(&self.state)
    }

    /// The receipt, once the transfer is complete.
    pub fn completed_receipt(&self) -> Option<&TransferReceipt> {
        match self.state {
            TransferState::Complete => self.receipt.as_ref(),
            _ => None,
        }
    }

    /// Snapshot for observers.
    pub fn update(&self) -> FlowUpdate {
        FlowUpdate::Transfer {
            state: self.state.clone(),
            receipt: self.receipt.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemState {
    NotRedeeming,
    AwaitingWalletApproval,
    AwaitingConfirmation,
    Complete,
    /// The relayer redeemed on the user's behalf
    RedeemedByRelayer,
}

impl RedeemState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotRedeeming => "not_redeeming",
            Self::AwaitingWalletApproval => "awaiting_wallet_approval",
            Self::AwaitingConfirmation => "awaiting_confirmation",
            Self::Complete => "complete",
            Self::RedeemedByRelayer => "redeemed_by_relayer",
        }
    }

    pub fn is_redeeming(&self) -> bool {
        matches!(self, Self::AwaitingWalletApproval | Self::AwaitingConfirmation)
    }

    pub fn is_redeemed(&self) -> bool {
        matches!(self, Self::Complete | Self::RedeemedByRelayer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemEvent {
    Submitted,
    Signed { tx_hash: TxHash },
    Confirmed,
    Failed,
    RedeemedByRelayer,
}

impl RedeemEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Signed { .. } => "signed",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
            Self::RedeemedByRelayer => "redeemed_by_relayer",
        }
    }
}

/// Drives one redemption attempt. Failures return to `NotRedeeming` so the
/// user can retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedeemMachine {
    state: RedeemState,
    tx_hash: Option<TxHash>,
}

impl Default for RedeemMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl RedeemMachine {
    pub fn new() -> Self {
        Self {
            state: RedeemState::NotRedeeming,
            tx_hash: None,
        }
    }

    pub fn state(&self) -> RedeemState {
        self.state
    }

    pub fn tx_hash(&self) -> Option<TxHash> {
        self.tx_hash
    }

    pub fn apply(&mut self, event: RedeemEvent) -> Result<RedeemState> {
        let next = match (self.state, event) {
            (RedeemState::NotRedeeming, RedeemEvent::Submitted) => {
                self.tx_hash = None;
                RedeemState::AwaitingWalletApproval
            }
            (RedeemState::AwaitingWalletApproval, RedeemEvent::Signed { tx_hash }) => {
                self.tx_hash = Some(tx_hash);
                RedeemState::AwaitingConfirmation
            }
            (RedeemState::AwaitingConfirmation, RedeemEvent::Confirmed) => RedeemState::Complete,
            (state, RedeemEvent::Failed) if state.is_redeeming() => RedeemState::NotRedeeming,
            (state, RedeemEvent::RedeemedByRelayer) if !state.is_redeemed() => {
                RedeemState::RedeemedByRelayer
            }
            (state, event) => {
                return Err(BridgeError::InvalidTransition {
                    state: state.name(),
                    event: event.name(),
                })
            }
        };

        self.state = next;
        Ok(next)
    }

    pub fn update(&self) -> FlowUpdate {
        FlowUpdate::Redeem {
            state: self.state,
            tx_hash: self.tx_hash,
        }
    }
}

/// Progress of the ERC20 approval step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowanceState {
    Fetching,
    Checked { sufficient: bool },
    Approving,
    Approved,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Everything the orchestrators report to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowUpdate {
    Transfer {
        state: TransferState,
        receipt: Option<TransferReceipt>,
    },
    Redeem {
        state: RedeemState,
        tx_hash: Option<TxHash>,
    },
    Allowance(AllowanceState),
    /// USDC held by the connected wallet on `chain`
    Balance {
        chain: NamedChain,
        amount: UsdcAmount,
    },
    Notice(Notice),
}

/// Receives flow updates as they happen.
pub trait FlowObserver: Send + Sync {
    fn publish(&self, update: FlowUpdate);
}

/// Discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl FlowObserver for NoopObserver {
    fn publish(&self, _update: FlowUpdate) {}
}

impl FlowObserver for UnboundedSender<FlowUpdate> {
    fn publish(&self, update: FlowUpdate) {
        // A closed receiver means nobody renders the session anymore
        let _ = self.send(update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirmed(sequence: Option<u64>) -> TransferEvent {
        TransferEvent::Confirmed {
            message: Bytes::from_static(b"message"),
            sequence,
        }
    }

    #[test]
    fn test_direct_path_completes_after_attestation() {
        let mut machine = TransferMachine::new(false);
        machine.apply(TransferEvent::Submitted).unwrap();
        machine
            .apply(TransferEvent::Signed {
                tx_hash: TxHash::repeat_byte(1),
            })
            .unwrap();
        assert_eq!(
            machine.receipt().unwrap().status,
            ConfirmationStatus::Pending
        );
        machine.apply(confirmed(None)).unwrap();
        let state = machine
            .apply(TransferEvent::Attested {
                attestation: Bytes::from_static(b"sig"),
            })
            .unwrap();

        assert_eq!(state, &TransferState::Complete);
        let receipt = machine.completed_receipt().unwrap();
        assert!(receipt.is_complete(false));
        assert_eq!(receipt.vaa, None);
    }

    #[test]
    fn test_relay_path_waits_for_vaa() {
        let mut machine = TransferMachine::new(true);
        machine.apply(TransferEvent::Submitted).unwrap();
        machine
            .apply(TransferEvent::Signed {
                tx_hash: TxHash::repeat_byte(1),
            })
            .unwrap();
        machine.apply(confirmed(Some(5))).unwrap();
        machine
            .apply(TransferEvent::Attested {
                attestation: Bytes::from_static(b"sig"),
            })
            .unwrap();

        assert_eq!(machine.state(), &TransferState::AwaitingCrossChainMessage);
        assert!(machine.completed_receipt().is_none());

        machine
            .apply(TransferEvent::VaaSigned {
                vaa: Bytes::from_static(b"vaa"),
            })
            .unwrap();
        let receipt = machine.completed_receipt().unwrap();
        assert!(receipt.is_complete(true));
        assert_eq!(receipt.sequence, Some(5));
    }

    #[test]
    fn test_cannot_reach_attestation_without_confirmation() {
        let mut machine = TransferMachine::new(false);
        machine.apply(TransferEvent::Submitted).unwrap();

        let err = machine
            .apply(TransferEvent::Attested {
                attestation: Bytes::from_static(b"sig"),
            })
            .unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"Invalid transition: attested while awaiting_wallet_approval");

        let err = machine.apply(confirmed(None)).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidTransition { .. }));
        assert_eq!(machine.state(), &TransferState::AwaitingWalletApproval);
    }

    #[test]
    fn test_relay_confirmation_requires_sequence() {
        let mut machine = TransferMachine::new(true);
        machine.apply(TransferEvent::Submitted).unwrap();
        machine
            .apply(TransferEvent::Signed {
                tx_hash: TxHash::ZERO,
            })
            .unwrap();

        assert!(machine.apply(confirmed(None)).is_err());
        assert_eq!(machine.state(), &TransferState::AwaitingConfirmation);
    }

    #[test]
    fn test_failure_only_from_in_flight_states() {
        let mut machine = TransferMachine::new(false);
        assert!(machine
            .apply(TransferEvent::Failed {
                reason: "x".into()
            })
            .is_err());

        machine.apply(TransferEvent::Submitted).unwrap();
        let state = machine
            .apply(TransferEvent::Failed {
                reason: "user rejected".into(),
            })
            .unwrap();
        assert_eq!(
            state,
            &TransferState::Failed {
                reason: "user rejected".into()
            }
        );
        assert!(machine.apply(TransferEvent::Submitted).is_err());
    }

    #[test]
    fn test_redeem_failure_is_retryable() {
        let mut machine = RedeemMachine::new();
        machine.apply(RedeemEvent::Submitted).unwrap();
        machine
            .apply(RedeemEvent::Signed {
                tx_hash: TxHash::repeat_byte(2),
            })
            .unwrap();
        assert_eq!(machine.apply(RedeemEvent::Failed).unwrap(), RedeemState::NotRedeeming);

        machine.apply(RedeemEvent::Submitted).unwrap();
        assert_eq!(machine.tx_hash(), None);
        machine
            .apply(RedeemEvent::Signed {
                tx_hash: TxHash::repeat_byte(3),
            })
            .unwrap();
        assert_eq!(machine.apply(RedeemEvent::Confirmed).unwrap(), RedeemState::Complete);
        assert!(machine.apply(RedeemEvent::RedeemedByRelayer).is_err());
    }

    #[test]
    fn test_relayer_redemption_overrides_manual_attempt() {
        let mut machine = RedeemMachine::new();
        machine.apply(RedeemEvent::Submitted).unwrap();
        assert_eq!(
            machine.apply(RedeemEvent::RedeemedByRelayer).unwrap(),
            RedeemState::RedeemedByRelayer
        );
        assert!(machine.state().is_redeemed());
    }

    #[test]
    fn test_channel_observer_forwards_updates() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        tx.publish(FlowUpdate::Notice(Notice::success("Circle attestation found")));

        assert_eq!(
            rx.try_recv().unwrap(),
            FlowUpdate::Notice(Notice::success("Circle attestation found"))
        );

        drop(rx);
        tx.publish(FlowUpdate::Allowance(AllowanceState::Fetching));
    }
}
