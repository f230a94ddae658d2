// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Protocol types and definitions
//!
//! Wire-level types shared by the bridge flow: USDC amounts, Circle attestation
//! responses and domains, Wormhole chain ids, VAAs and the relay transfer payload.

mod amount;
mod attestation;
mod domain_id;
mod relay_payload;
mod vaa;
mod wormhole_chain;

pub use amount::{UsdcAmount, USDC_DECIMALS};
pub use attestation::{AttestationResponse, AttestationStatus};
pub use domain_id::{DomainId, InvalidDomainId};
pub use relay_payload::RelayTransferPayload;
pub use vaa::{GuardianSignature, Vaa};
pub use wormhole_chain::WormholeChain;
