// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Receipt log scanning
//!
//! Both scanners take the first log emitted by the given contract. A missing
//! log is `Ok(None)`; a log from the right contract that does not decode is an
//! ABI error.

use alloy_primitives::{Address, Bytes, Log};
use alloy_sol_types::SolEvent;
use tracing::debug;

use crate::contracts::message_transmitter::MessageTransmitter::MessageSent;
use crate::contracts::wormhole_core::WormholeCore::LogMessagePublished;
use crate::error::Result;

/// Finds the Circle message emitted by `circle_emitter` (`MessageSent(bytes)`).
pub fn find_circle_message_in_logs(logs: &[Log], circle_emitter: Address) -> Result<Option<Bytes>> {
    let Some(log) = logs.iter().find(|log| log.address == circle_emitter) else {
        debug!(
            circle_emitter = %circle_emitter,
            logs_count = logs.len(),
            event = "circle_message_not_in_logs"
        );
        return Ok(None);
    };

    let (message,) = MessageSent::abi_decode_data(&log.data.data)?;
    debug!(
        message_len = message.len(),
        event = "circle_message_found"
    );

    Ok(Some(message))
}

/// Finds the Wormhole sequence published by `core_bridge` (`LogMessagePublished`).
pub fn parse_sequence_from_logs(logs: &[Log], core_bridge: Address) -> Result<Option<u64>> {
    let Some(log) = logs.iter().find(|log| log.address == core_bridge) else {
        debug!(
            core_bridge = %core_bridge,
            logs_count = logs.len(),
            event = "wormhole_sequence_not_in_logs"
        );
        return Ok(None);
    };

    let (sequence, _nonce, _payload, _consistency_level) =
        LogMessagePublished::abi_decode_data(&log.data.data)?;
    debug!(sequence = sequence, event = "wormhole_sequence_found");

    Ok(Some(sequence))
}
