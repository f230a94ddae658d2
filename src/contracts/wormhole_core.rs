// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Wormhole core bridge event bindings

use alloy_sol_types::sol;

sol!(
    #[allow(missing_docs)]
    contract WormholeCore {
        event LogMessagePublished(
            address indexed sender,
            uint64 sequence,
            uint32 nonce,
            bytes payload,
            uint8 consistencyLevel
        );
    }
);
