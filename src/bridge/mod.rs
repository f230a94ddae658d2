// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! The bridge flow
//!
//! [`TransferOrchestrator`] runs the source-chain half (approve, burn, wait
//! for the Circle attestation and, on the relay path, the Wormhole VAA).
//! [`RedeemOrchestrator`] runs the destination-chain half. Both report
//! progress as [`FlowUpdate`]s through a [`FlowObserver`].

mod attestation;
mod config;
mod logs;
mod receipt;
mod redeem;
mod request;
mod state;
mod transfer;

pub use attestation::{poll_attestation, poll_signed_vaa};
pub use config::{
    EnvConfig, FlowConfig, PollingConfig, ATTESTATION_PATH, IRIS_API, IRIS_API_SANDBOX,
    SIGNED_VAA_PATH, WORMHOLE_TESTNET_RPC_HOSTS,
};
pub use logs::{find_circle_message_in_logs, parse_sequence_from_logs};
pub use receipt::{ConfirmationStatus, RedeemReceipt, TransferReceipt};
pub use redeem::{CancellationFlag, RedeemOrchestrator};
pub use request::{ApprovalAmount, TransferRequest};
pub use state::{
    AllowanceState, FlowObserver, FlowUpdate, NoopObserver, Notice, RedeemEvent, RedeemMachine,
    RedeemState, Severity, TransferEvent, TransferMachine, TransferState,
};
pub use transfer::TransferOrchestrator;
