// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Contract addresses for the bridge across all supported chains
//!
//! This module centralizes the USDC, Circle bridge, Wormhole core and Circle
//! relayer addresses for the Goerli and Fuji testnets.

use alloy_primitives::{address, Address};

// USDC

/// <https://goerli.etherscan.io/address/0x07865c6E87B9F70255377e024ace6630C1Eaa37F>
pub const GOERLI_USDC_ADDRESS: Address = address!("07865c6e87b9f70255377e024ace6630c1eaa37f");

/// <https://testnet.snowtrace.io/address/0x5425890298aed601595a70AB815c96711a31Bc65>
pub const FUJI_USDC_ADDRESS: Address = address!("5425890298aed601595a70ab815c96711a31bc65");

// Circle bridge (TokenMessenger)

/// <https://developers.circle.com/stablecoins/evm-smart-contracts>
pub const GOERLI_CIRCLE_BRIDGE_ADDRESS: Address =
    address!("dabec94b97f7b5fca28f050cc8eeac2dc9920476");

/// <https://developers.circle.com/stablecoins/evm-smart-contracts>
pub const FUJI_CIRCLE_BRIDGE_ADDRESS: Address =
    address!("0fc1103927af27af808d03135214718bcedbe9ad");

// Circle emitter (MessageTransmitter), also the receiveMessage entry point

/// <https://developers.circle.com/stablecoins/evm-smart-contracts>
pub const GOERLI_CIRCLE_EMITTER_ADDRESS: Address =
    address!("40a61d3d2afcf5a5d31fcdf269e575fb99dd87f7");

/// <https://developers.circle.com/stablecoins/evm-smart-contracts>
pub const FUJI_CIRCLE_EMITTER_ADDRESS: Address =
    address!("52fffb3ee8fa7838e9858a2d5e454007b9027c3c");

// Wormhole USDC relayer

pub const GOERLI_USDC_RELAYER_ADDRESS: Address =
    address!("2dacca34c172687efa15243a179ea9e170864a67");

pub const FUJI_USDC_RELAYER_ADDRESS: Address =
    address!("7b135d7959e59ba45c55ae08c14920b06f2658ec");

// Wormhole Circle integration (emits the relay VAAs)

pub const GOERLI_CIRCLE_INTEGRATION_ADDRESS: Address =
    address!("bdcc4ebe3157df347671e078a41ee5ce137cd306");

pub const FUJI_CIRCLE_INTEGRATION_ADDRESS: Address =
    address!("b200977d46aea35ce6368d181534f413570a0f54");

// Wormhole core bridge

/// <https://docs.wormhole.com/wormhole/reference/constants>
pub const GOERLI_WORMHOLE_CORE_ADDRESS: Address =
    address!("706abc4e45d419950511e474c7b9ed348a4a716c");

/// <https://docs.wormhole.com/wormhole/reference/constants>
pub const FUJI_WORMHOLE_CORE_ADDRESS: Address =
    address!("7bbce28e64b3f8b84d876ab298393c38ad7aac4c");
