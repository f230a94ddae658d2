// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! View state of one bridging session
//!
//! [`BridgeSession`] holds the form inputs and everything a front-end renders:
//! the stepper phase, the status line, which controls are enabled and the
//! pending notices. It only changes through its setters and through
//! [`BridgeSession::apply`], which folds in the [`FlowUpdate`]s published by
//! the orchestrators.
//!
//! ```rust
//! use usdc_bridge::testing::RecordingNavigationGuard;
//! use usdc_bridge::{BridgeSession, Step};
//!
//! let mut session = BridgeSession::new(RecordingNavigationGuard::default());
//! session.set_wallet_status(true, None);
//! session.set_amount("25").unwrap();
//!
//! assert_eq!(session.active_step(), Step::Approve);
//! assert_eq!(session.approve_label(), "Approve 25.0 Tokens");
//! ```

use alloy_chains::NamedChain;
use alloy_primitives::TxHash;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use crate::bridge::{
    AllowanceState, ApprovalAmount, ConfirmationStatus, FlowUpdate, Notice, RedeemState,
    TransferReceipt, TransferRequest, TransferState,
};
use crate::chain::{BridgeChain, SUPPORTED_CHAINS};
use crate::error::{BridgeError, Result};
use crate::protocol::{UsdcAmount, WormholeChain};
use crate::traits::NavigationGuard;

const AMOUNT_NOT_POSITIVE: &str = "Amount must be greater than zero";
const APPROVE_FAILED: &str = "Failed to approve the token transfer.";

/// Phase shown by the stepper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Approve = 0,
    Transfer = 1,
    Redeem = 2,
    Done = 3,
}

/// Form inputs and derived view state of the bridge page.
#[derive(Debug)]
pub struct BridgeSession<G> {
    source_chain: NamedChain,
    target_chain: NamedChain,
    amount: String,
    relay: bool,
    to_native_token_amount: UsdcAmount,
    approve_unlimited: bool,

    wallet_ready: bool,
    wallet_status: Option<String>,

    allowance_fetching: bool,
    allowance_processing: bool,
    allowance_sufficient: bool,
    allowance_error: Option<String>,

    source_balance: Option<(NamedChain, UsdcAmount)>,

    transfer_state: TransferState,
    transfer_receipt: Option<TransferReceipt>,
    redeem_state: RedeemState,
    redeem_tx_hash: Option<TxHash>,

    notices: Vec<Notice>,

    guard: G,
    guard_active: bool,
}

impl<G: NavigationGuard> BridgeSession<G> {
    /// A fresh Goerli → Fuji session.
    pub fn new(guard: G) -> Self {
        Self {
            source_chain: NamedChain::Goerli,
            target_chain: NamedChain::AvalancheFuji,
            amount: String::new(),
            relay: false,
            to_native_token_amount: UsdcAmount::DEFAULT_NATIVE_GAS,
            approve_unlimited: false,
            wallet_ready: false,
            wallet_status: None,
            allowance_fetching: false,
            allowance_processing: false,
            allowance_sufficient: false,
            allowance_error: None,
            source_balance: None,
            transfer_state: TransferState::Idle,
            transfer_receipt: None,
            redeem_state: RedeemState::NotRedeeming,
            redeem_tx_hash: None,
            notices: Vec::new(),
            guard,
            guard_active: false,
        }
    }

    pub fn source_chain(&self) -> NamedChain {
        self.source_chain
    }

    pub fn target_chain(&self) -> NamedChain {
        self.target_chain
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn relay(&self) -> bool {
        self.relay
    }

    pub fn to_native_token_amount(&self) -> UsdcAmount {
        self.to_native_token_amount
    }

    /// Last balance read for the current source chain.
    pub fn source_balance(&self) -> Option<UsdcAmount> {
        self.source_balance
            .filter(|(chain, _)| *chain == self.source_chain)
            .map(|(_, amount)| amount)
    }

    pub fn transfer_state(&self) -> &TransferState {
        &self.transfer_state
    }

    pub fn redeem_state(&self) -> RedeemState {
        self.redeem_state
    }

    pub fn redeem_tx_hash(&self) -> Option<TxHash> {
        self.redeem_tx_hash
    }

    pub fn source_tx_hash(&self) -> Option<TxHash> {
        self.transfer_receipt.as_ref().map(|r| r.source_tx_hash)
    }

    /// The complete receipt to redeem, once the transfer is done.
    pub fn transfer_receipt(&self) -> Option<&TransferReceipt> {
        self.transfer_receipt
            .as_ref()
            .filter(|_| self.is_send_complete())
    }

    pub fn guard(&self) -> &G {
        &self.guard
    }

    /// Ends the session, releasing the navigation guard if it is held.
    pub fn close(mut self) -> G {
        if self.guard_active {
            self.guard.unsubscribe();
        }
        self.guard
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.fields_locked() {
            return Err(BridgeError::NotReady(
                "fields are locked while a transfer is in progress".to_string(),
            ));
        }
        Ok(())
    }

    /// Applies chain choices from the page's query string.
    ///
    /// Equal choices are ignored. Picking the current target as source (or the
    /// current source as target) swaps the pair.
    pub fn select_chains(&mut self, source: Option<NamedChain>, target: Option<NamedChain>) {
        if source.is_some() && source == target {
            return;
        }
        if let Some(source) = source.filter(BridgeChain::is_supported) {
            if source == self.target_chain {
                self.target_chain = self.source_chain;
            }
            self.source_chain = source;
        }
        if let Some(target) = target.filter(BridgeChain::is_supported) {
            if target == self.source_chain {
                self.source_chain = self.target_chain;
            }
            self.target_chain = target;
        }
        debug!(
            source_chain = %self.source_chain,
            target_chain = %self.target_chain,
            event = "chains_selected"
        );
    }

    pub fn switch_chains(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        std::mem::swap(&mut self.source_chain, &mut self.target_chain);
        Ok(())
    }

    pub fn set_amount(&mut self, amount: &str) -> Result<()> {
        self.ensure_unlocked()?;
        self.amount = amount.to_string();
        Ok(())
    }

    pub fn toggle_relay(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        self.relay = !self.relay;
        Ok(())
    }

    /// Sets the destination gas, between 0 and 1 USDC. Only on the relay path.
    pub fn set_native_gas(&mut self, amount: UsdcAmount) -> Result<()> {
        self.ensure_unlocked()?;
        if !self.relay {
            return Err(BridgeError::NotReady(
                "destination gas only applies when relaying".to_string(),
            ));
        }
        if amount > UsdcAmount::ONE {
            return Err(BridgeError::InvalidAmount(
                "destination gas must be between 0 and 1 USDC".to_string(),
            ));
        }
        self.to_native_token_amount = amount;
        Ok(())
    }

    pub fn toggle_approve_unlimited(&mut self) {
        self.approve_unlimited = !self.approve_unlimited;
    }

    pub fn approval_amount(&self) -> ApprovalAmount {
        if self.approve_unlimited {
            ApprovalAmount::Unlimited
        } else {
            ApprovalAmount::Exact
        }
    }

    /// Reported by the wallet layer for [`BridgeSession::wallet_chain`].
    pub fn set_wallet_status(&mut self, ready: bool, status: Option<String>) {
        self.wallet_ready = ready;
        self.wallet_status = status;
    }

    /// The chain the wallet must be on: the target once the transfer is done.
    pub fn wallet_chain(&self) -> NamedChain {
        if self.is_send_complete() {
            self.target_chain
        } else {
            self.source_chain
        }
    }

    fn parsed_amount(&self) -> Option<UsdcAmount> {
        UsdcAmount::parse(&self.amount).ok()
    }

    /// Inline error for the amount field. Empty input is not an error.
    pub fn amount_error(&self) -> Option<&'static str> {
        if self.amount.trim().is_empty() {
            return None;
        }
        match UsdcAmount::parse(&self.amount) {
            Ok(amount) if amount.is_zero() => Some(AMOUNT_NOT_POSITIVE),
            Ok(_) => None,
            Err(_) if self.amount.trim_start().starts_with('-') => Some(AMOUNT_NOT_POSITIVE),
            Err(_) => Some("Invalid amount"),
        }
    }

    pub fn allowance_error(&self) -> Option<&str> {
        self.allowance_error.as_deref()
    }

    /// Builds the request for the current form.
    pub fn transfer_request(&self) -> Result<TransferRequest> {
        let amount = UsdcAmount::parse(&self.amount)?;
        let request = TransferRequest::builder()
            .source_chain(self.source_chain)
            .target_chain(self.target_chain)
            .amount(amount)
            .relay(self.relay)
            .to_native_token_amount(self.to_native_token_amount)
            .build();
        request.validate()?;
        Ok(request)
    }

    pub fn is_sending(&self) -> bool {
        self.transfer_state.is_in_flight()
    }

    pub fn is_send_complete(&self) -> bool {
        self.transfer_state == TransferState::Complete
    }

    pub fn is_redeeming(&self) -> bool {
        self.redeem_state.is_redeeming()
    }

    pub fn is_redeem_complete(&self) -> bool {
        self.redeem_state.is_redeemed()
    }

    /// Chain, amount and relay inputs are frozen once a transfer starts.
    pub fn fields_locked(&self) -> bool {
        self.is_sending() || self.is_send_complete() || self.is_redeeming() || self.is_redeem_complete()
    }

    pub fn prevents_navigation(&self) -> bool {
        (self.is_sending() || self.is_send_complete() || self.is_redeeming())
            && !self.is_redeem_complete()
    }

    pub fn approve_button_needed(&self) -> bool {
        !self.allowance_sufficient
    }

    pub fn active_step(&self) -> Step {
        if self.is_redeem_complete() {
            Step::Done
        } else if self.is_send_complete() {
            Step::Redeem
        } else if self.approve_button_needed() {
            Step::Approve
        } else {
            Step::Transfer
        }
    }

    /// Label of the approve button, e.g. "Approve 1.0 Token" or "Approve Unlimited Tokens".
    pub fn approve_label(&self) -> String {
        let parsed = self.parsed_amount();
        let amount = match (self.approve_unlimited, parsed) {
            (true, _) => "Unlimited".to_string(),
            (false, Some(amount)) => amount.to_string(),
            (false, None) => self.amount.clone(),
        };
        let plural = self.approve_unlimited || parsed != Some(UsdcAmount::ONE);
        format!("Approve {amount} Token{}", if plural { "s" } else { "" })
    }

    pub fn can_approve(&self) -> bool {
        self.wallet_ready
            && !self.amount.trim().is_empty()
            && self.amount_error().is_none()
            && !self.allowance_fetching
            && !self.allowance_processing
    }

    pub fn can_transfer(&self) -> bool {
        self.wallet_ready && !self.is_sending() && !self.is_send_complete()
    }

    pub fn can_redeem(&self) -> bool {
        self.wallet_ready
            && self.is_send_complete()
            && !self.is_redeeming()
            && !self.is_redeem_complete()
    }

    /// The relayer watch runs once a relayed transfer is complete and until it is redeemed.
    pub fn should_watch_relayer(&self) -> bool {
        self.relay && self.wallet_ready && self.is_send_complete() && !self.is_redeem_complete()
    }

    /// Error shown under the action button: wallet problems first, then
    /// approval, then the amount.
    pub fn error_message(&self) -> Option<&str> {
        self.wallet_status
            .as_deref()
            .or(self.allowance_error.as_deref())
            .or(self.amount_error())
    }

    /// Progress line under the action button.
    pub fn status_message(&self) -> Option<&'static str> {
        if self.wallet_status.is_some() || self.amount_error().is_some() {
            return None;
        }
        if self.allowance_processing {
            return Some("Waiting for wallet approval and confirmation...");
        }
        if self.is_sending() {
            let confirmed = self
                .transfer_receipt
                .as_ref()
                .is_some_and(|r| r.status == ConfirmationStatus::Confirmed);
            return Some(match (&self.transfer_state, confirmed) {
                (TransferState::AwaitingWalletApproval, _) => "Waiting for wallet approval...",
                (TransferState::AwaitingCrossChainMessage, _) => "Waiting for Wormhole message...",
                (_, false) => "Waiting for tx confirmation...",
                (_, true) => "Waiting for Circle attestation...",
            });
        }
        if self.is_redeeming() {
            return Some(match self.redeem_tx_hash {
                None => "Waiting for wallet approval...",
                Some(_) => "Waiting for tx confirmation...",
            });
        }
        None
    }

    /// Notices not yet shown, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Folds one orchestrator update into the session.
    pub fn apply(&mut self, update: FlowUpdate) {
        match update {
            FlowUpdate::Transfer { state, receipt } => {
                self.transfer_state = state;
                if receipt.is_some() {
                    self.transfer_receipt = receipt;
                }
            }
            FlowUpdate::Redeem { state, tx_hash } => {
                self.redeem_state = state;
                if tx_hash.is_some() || state == RedeemState::AwaitingWalletApproval {
                    self.redeem_tx_hash = tx_hash;
                }
            }
            FlowUpdate::Allowance(state) => self.apply_allowance(state),
            FlowUpdate::Balance { chain, amount } => self.source_balance = Some((chain, amount)),
            FlowUpdate::Notice(notice) => self.notices.push(notice),
        }
        self.sync_navigation_guard();
    }

    /// Applies every update queued so far.
    pub fn drain(&mut self, updates: &mut UnboundedReceiver<FlowUpdate>) -> usize {
        let mut applied = 0;
        while let Ok(update) = updates.try_recv() {
            self.apply(update);
            applied += 1;
        }
        applied
    }

    fn apply_allowance(&mut self, state: AllowanceState) {
        match state {
            AllowanceState::Fetching => self.allowance_fetching = true,
            AllowanceState::Checked { sufficient } => {
                self.allowance_fetching = false;
                self.allowance_sufficient = sufficient;
            }
            AllowanceState::Approving => {
                self.allowance_processing = true;
                self.allowance_error = None;
            }
            AllowanceState::Approved => {
                self.allowance_processing = false;
                self.allowance_sufficient = true;
                self.allowance_error = None;
            }
            AllowanceState::Failed => {
                self.allowance_processing = false;
                self.allowance_error = Some(APPROVE_FAILED.to_string());
            }
        }
    }

    fn sync_navigation_guard(&mut self) {
        let prevent = self.prevents_navigation();
        if prevent && !self.guard_active {
            self.guard.subscribe();
            self.guard_active = true;
            debug!(event = "navigation_guard_subscribed");
        } else if !prevent && self.guard_active {
            self.guard.unsubscribe();
            self.guard_active = false;
            debug!(event = "navigation_guard_unsubscribed");
        }
    }
}

/// Resolves a `sourceChain`/`targetChain` query parameter, a Wormhole chain id.
pub fn chain_from_path_param(param: &str) -> Option<NamedChain> {
    let wormhole = param.trim().parse::<u16>().ok().and_then(WormholeChain::from_u16)?;
    SUPPORTED_CHAINS
        .into_iter()
        .find(|chain| chain.wormhole_chain().ok() == Some(wormhole))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingNavigationGuard;
    use alloy_primitives::Bytes;
    use rstest::rstest;

    fn session() -> BridgeSession<RecordingNavigationGuard> {
        let mut session = BridgeSession::new(RecordingNavigationGuard::default());
        session.set_wallet_status(true, None);
        session
    }

    fn transfer(state: TransferState, receipt: Option<TransferReceipt>) -> FlowUpdate {
        FlowUpdate::Transfer { state, receipt }
    }

    fn complete_receipt() -> TransferReceipt {
        TransferReceipt {
            status: ConfirmationStatus::Confirmed,
            message: Some(Bytes::from_static(b"message")),
            attestation: Some(Bytes::from_static(b"attestation")),
            ..TransferReceipt::pending(TxHash::repeat_byte(1))
        }
    }

    #[rstest]
    #[case("1", false, "Approve 1.0 Token")]
    #[case("1", true, "Approve Unlimited Tokens")]
    #[case("2.5", false, "Approve 2.5 Tokens")]
    #[case("1.000000", false, "Approve 1.0 Token")]
    #[case("abc", false, "Approve abc Tokens")]
    fn test_approve_label(#[case] amount: &str, #[case] unlimited: bool, #[case] expected: &str) {
        let mut session = session();
        session.set_amount(amount).unwrap();
        if unlimited {
            session.toggle_approve_unlimited();
        }
        assert_eq!(session.approve_label(), expected);
    }

    #[rstest]
    #[case("", None)]
    #[case("10", None)]
    #[case("0", Some(AMOUNT_NOT_POSITIVE))]
    #[case("0.000", Some(AMOUNT_NOT_POSITIVE))]
    #[case("-3", Some(AMOUNT_NOT_POSITIVE))]
    #[case("abc", Some("Invalid amount"))]
    fn test_amount_error(#[case] amount: &str, #[case] expected: Option<&str>) {
        let mut session = session();
        session.set_amount(amount).unwrap();
        assert_eq!(session.amount_error(), expected);
    }

    #[test]
    fn test_active_step_follows_flow() {
        let mut session = session();
        assert_eq!(session.active_step(), Step::Approve);

        session.apply(FlowUpdate::Allowance(AllowanceState::Checked { sufficient: true }));
        assert_eq!(session.active_step(), Step::Transfer);

        session.apply(transfer(TransferState::Complete, Some(complete_receipt())));
        assert_eq!(session.active_step(), Step::Redeem);
        assert_eq!(session.wallet_chain(), NamedChain::AvalancheFuji);

        session.apply(FlowUpdate::Redeem {
            state: RedeemState::RedeemedByRelayer,
            tx_hash: None,
        });
        assert_eq!(session.active_step(), Step::Done);
    }

    #[test]
    fn test_status_message_tracks_transfer_progress() {
        let mut session = session();
        session.set_amount("5").unwrap();
        assert_eq!(session.status_message(), None);

        session.apply(transfer(TransferState::AwaitingWalletApproval, None));
        assert_eq!(session.status_message(), Some("Waiting for wallet approval..."));

        let mut receipt = TransferReceipt::pending(TxHash::repeat_byte(1));
        session.apply(transfer(TransferState::AwaitingConfirmation, Some(receipt.clone())));
        assert_eq!(session.status_message(), Some("Waiting for tx confirmation..."));

        receipt.status = ConfirmationStatus::Confirmed;
        session.apply(transfer(TransferState::AwaitingAttestation, Some(receipt.clone())));
        assert_eq!(session.status_message(), Some("Waiting for Circle attestation..."));

        session.apply(transfer(TransferState::AwaitingCrossChainMessage, Some(receipt)));
        assert_eq!(session.status_message(), Some("Waiting for Wormhole message..."));

        session.set_wallet_status(false, Some("Wallet is not connected".to_string()));
        assert_eq!(session.status_message(), None);
        assert_eq!(session.error_message(), Some("Wallet is not connected"));
    }

    #[test]
    fn test_redeem_status_and_retry() {
        let mut session = session();
        session.apply(transfer(TransferState::Complete, Some(complete_receipt())));
        assert!(session.can_redeem());

        session.apply(FlowUpdate::Redeem {
            state: RedeemState::AwaitingWalletApproval,
            tx_hash: None,
        });
        assert_eq!(session.status_message(), Some("Waiting for wallet approval..."));
        assert!(!session.can_redeem());

        session.apply(FlowUpdate::Redeem {
            state: RedeemState::AwaitingConfirmation,
            tx_hash: Some(TxHash::repeat_byte(2)),
        });
        assert_eq!(session.status_message(), Some("Waiting for tx confirmation..."));

        session.apply(FlowUpdate::Redeem {
            state: RedeemState::NotRedeeming,
            tx_hash: Some(TxHash::repeat_byte(2)),
        });
        assert!(session.can_redeem());
    }

    #[test]
    fn test_fields_lock_during_transfer() {
        let mut session = session();
        session.set_amount("5").unwrap();
        session.apply(transfer(TransferState::AwaitingWalletApproval, None));

        assert!(session.fields_locked());
        assert!(session.switch_chains().unwrap_err().is_validation());
        assert!(session.set_amount("6").is_err());
        assert!(session.toggle_relay().is_err());
        assert_eq!(session.amount(), "5");
    }

    #[test]
    fn test_navigation_guard_edges() {
        let mut session = session();

        session.apply(transfer(TransferState::AwaitingWalletApproval, None));
        session.apply(transfer(TransferState::AwaitingConfirmation, None));
        assert_eq!(session.guard().subscribes, 1);
        assert!(session.guard().subscribed);

        session.apply(transfer(TransferState::Complete, Some(complete_receipt())));
        assert!(session.prevents_navigation());
        assert_eq!(session.guard().subscribes, 1);

        session.apply(FlowUpdate::Redeem {
            state: RedeemState::AwaitingWalletApproval,
            tx_hash: None,
        });
        session.apply(FlowUpdate::Redeem {
            state: RedeemState::RedeemedByRelayer,
            tx_hash: None,
        });
        assert_eq!(session.guard().unsubscribes, 1);
        assert!(!session.guard().subscribed);
    }

    #[test]
    fn test_failed_transfer_releases_guard() {
        let mut session = session();
        session.apply(transfer(TransferState::AwaitingWalletApproval, None));
        session.apply(transfer(
            TransferState::Failed {
                reason: "user rejected".to_string(),
            },
            None,
        ));

        assert!(!session.fields_locked());
        assert_eq!(session.guard().unsubscribes, 1);

        let guard = session.close();
        assert_eq!(guard.unsubscribes, 1);
    }

    #[test]
    fn test_close_releases_held_guard() {
        let mut session = session();
        session.apply(transfer(TransferState::AwaitingWalletApproval, None));

        let guard = session.close();
        assert_eq!(guard.subscribes, 1);
        assert_eq!(guard.unsubscribes, 1);
    }

    #[test]
    fn test_approval_failure_sets_inline_error() {
        let mut session = session();
        session.set_amount("5").unwrap();
        assert!(session.can_approve());

        session.apply(FlowUpdate::Allowance(AllowanceState::Approving));
        assert!(!session.can_approve());
        assert_eq!(
            session.status_message(),
            Some("Waiting for wallet approval and confirmation...")
        );

        session.apply(FlowUpdate::Allowance(AllowanceState::Failed));
        assert_eq!(session.error_message(), Some(APPROVE_FAILED));
        assert!(session.approve_button_needed());
    }

    #[rstest]
    #[case(Some(NamedChain::AvalancheFuji), None, NamedChain::AvalancheFuji, NamedChain::Goerli)]
    #[case(None, Some(NamedChain::Goerli), NamedChain::AvalancheFuji, NamedChain::Goerli)]
    #[case(Some(NamedChain::Goerli), Some(NamedChain::Goerli), NamedChain::Goerli, NamedChain::AvalancheFuji)]
    #[case(Some(NamedChain::Mainnet), None, NamedChain::Goerli, NamedChain::AvalancheFuji)]
    fn test_select_chains(
        #[case] source: Option<NamedChain>,
        #[case] target: Option<NamedChain>,
        #[case] expected_source: NamedChain,
        #[case] expected_target: NamedChain,
    ) {
        let mut session = session();
        session.select_chains(source, target);
        assert_eq!(session.source_chain(), expected_source);
        assert_eq!(session.target_chain(), expected_target);
    }

    #[test]
    fn test_source_balance_follows_source_chain() {
        let mut session = session();
        let amount = UsdcAmount::parse("12.5").unwrap();
        session.apply(FlowUpdate::Balance {
            chain: NamedChain::Goerli,
            amount,
        });
        assert_eq!(session.source_balance(), Some(amount));

        session.switch_chains().unwrap();
        assert_eq!(session.source_balance(), None);

        session.switch_chains().unwrap();
        assert_eq!(session.source_balance(), Some(amount));
    }

    #[test]
    fn test_chain_from_path_param() {
        assert_eq!(chain_from_path_param("2"), Some(NamedChain::Goerli));
        assert_eq!(chain_from_path_param("6"), Some(NamedChain::AvalancheFuji));
        assert_eq!(chain_from_path_param("1"), None);
        assert_eq!(chain_from_path_param("eth"), None);
    }

    #[test]
    fn test_native_gas_bounds() {
        let mut session = session();
        assert!(session.set_native_gas(UsdcAmount::ONE).is_err());

        session.toggle_relay().unwrap();
        session.set_native_gas(UsdcAmount::ONE).unwrap();
        assert!(matches!(
            session.set_native_gas(UsdcAmount::parse("1.001").unwrap()),
            Err(BridgeError::InvalidAmount(_))
        ));
        assert_eq!(session.to_native_token_amount(), UsdcAmount::ONE);
    }

    #[test]
    fn test_transfer_request_from_form() {
        let mut session = session();
        session.set_amount("12.5").unwrap();
        session.toggle_relay().unwrap();

        let request = session.transfer_request().unwrap();
        assert_eq!(request.amount, UsdcAmount::parse("12.5").unwrap());
        assert!(request.relay);
        assert_eq!(request.to_native_token_amount, UsdcAmount::DEFAULT_NATIVE_GAS);

        session.set_amount("").unwrap();
        assert!(session.transfer_request().unwrap_err().is_validation());
    }
}
