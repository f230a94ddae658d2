// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
use alloy_chains::NamedChain;
use alloy_primitives::{Address, B256};

use super::addresses::{
    FUJI_CIRCLE_BRIDGE_ADDRESS, FUJI_CIRCLE_EMITTER_ADDRESS, FUJI_CIRCLE_INTEGRATION_ADDRESS,
    FUJI_USDC_ADDRESS, FUJI_USDC_RELAYER_ADDRESS, FUJI_WORMHOLE_CORE_ADDRESS,
    GOERLI_CIRCLE_BRIDGE_ADDRESS, GOERLI_CIRCLE_EMITTER_ADDRESS,
    GOERLI_CIRCLE_INTEGRATION_ADDRESS, GOERLI_USDC_ADDRESS, GOERLI_USDC_RELAYER_ADDRESS,
    GOERLI_WORMHOLE_CORE_ADDRESS,
};
use crate::error::{BridgeError, Result};
use crate::protocol::{DomainId, WormholeChain};

/// Chains the bridge can move USDC between.
pub const SUPPORTED_CHAINS: [NamedChain; 2] = [NamedChain::Goerli, NamedChain::AvalancheFuji];

/// Trait for chains that support the USDC bridge
///
/// Every accessor fails with [`BridgeError::ChainNotSupported`] for chains
/// without a deployment.
pub trait BridgeChain {
    /// Whether the chain has all bridge contracts deployed
    fn is_supported(&self) -> bool;
    /// The Circle domain ID of the chain
    fn circle_domain(&self) -> Result<DomainId>;
    /// The Wormhole chain ID of the chain
    fn wormhole_chain(&self) -> Result<WormholeChain>;
    /// The USDC token contract
    fn usdc_address(&self) -> Result<Address>;
    /// The Circle `TokenMessenger` contract that burns USDC
    fn circle_bridge_address(&self) -> Result<Address>;
    /// The Circle `MessageTransmitter`, which emits `MessageSent` and receives messages
    fn circle_emitter_address(&self) -> Result<Address>;
    /// The Wormhole USDC relayer contract
    fn usdc_relayer_address(&self) -> Result<Address>;
    /// The Wormhole Circle integration contract
    fn circle_integration_address(&self) -> Result<Address>;
    /// The Wormhole core bridge contract, which emits `LogMessagePublished`
    fn wormhole_core_address(&self) -> Result<Address>;

    /// The Circle integration contract as a 32-byte Wormhole emitter
    fn wormhole_emitter_address(&self) -> Result<B256> {
        Ok(self.circle_integration_address()?.into_word())
    }
}

fn unsupported(chain: &NamedChain) -> BridgeError {
    BridgeError::ChainNotSupported {
        chain: chain.to_string(),
    }
}

impl BridgeChain for NamedChain {
    fn is_supported(&self) -> bool {
        SUPPORTED_CHAINS.contains(self)
    }

    fn circle_domain(&self) -> Result<DomainId> {
        use NamedChain::*;

        match self {
            Goerli => Ok(DomainId::Ethereum),
            AvalancheFuji => Ok(DomainId::Avalanche),
            _ => Err(unsupported(self)),
        }
    }

    fn wormhole_chain(&self) -> Result<WormholeChain> {
        use NamedChain::*;

        match self {
            Goerli => Ok(WormholeChain::Ethereum),
            AvalancheFuji => Ok(WormholeChain::Avalanche),
            _ => Err(unsupported(self)),
        }
    }

    fn usdc_address(&self) -> Result<Address> {
        use NamedChain::*;

        match self {
            Goerli => Ok(GOERLI_USDC_ADDRESS),
            AvalancheFuji => Ok(FUJI_USDC_ADDRESS),
            _ => Err(unsupported(self)),
        }
    }

    fn circle_bridge_address(&self) -> Result<Address> {
        use NamedChain::*;

        match self {
            Goerli => Ok(GOERLI_CIRCLE_BRIDGE_ADDRESS),
            AvalancheFuji => Ok(FUJI_CIRCLE_BRIDGE_ADDRESS),
            _ => Err(unsupported(self)),
        }
    }

    fn circle_emitter_address(&self) -> Result<Address> {
        use NamedChain::*;

        match self {
            Goerli => Ok(GOERLI_CIRCLE_EMITTER_ADDRESS),
            AvalancheFuji => Ok(FUJI_CIRCLE_EMITTER_ADDRESS),
            _ => Err(unsupported(self)),
        }
    }

    fn usdc_relayer_address(&self) -> Result<Address> {
        use NamedChain::*;

        match self {
            Goerli => Ok(GOERLI_USDC_RELAYER_ADDRESS),
            AvalancheFuji => Ok(FUJI_USDC_RELAYER_ADDRESS),
            _ => Err(unsupported(self)),
        }
    }

    fn circle_integration_address(&self) -> Result<Address> {
        use NamedChain::*;

        match self {
            Goerli => Ok(GOERLI_CIRCLE_INTEGRATION_ADDRESS),
            AvalancheFuji => Ok(FUJI_CIRCLE_INTEGRATION_ADDRESS),
            _ => Err(unsupported(self)),
        }
    }

    fn wormhole_core_address(&self) -> Result<Address> {
        use NamedChain::*;

        match self {
            Goerli => Ok(GOERLI_WORMHOLE_CORE_ADDRESS),
            AvalancheFuji => Ok(FUJI_WORMHOLE_CORE_ADDRESS),
            _ => Err(unsupported(self)),
        }
    }
}

/// Maps a Circle domain back to the supported chain deployed on it.
pub fn chain_for_domain(domain: u32) -> Option<NamedChain> {
    SUPPORTED_CHAINS
        .into_iter()
        .find(|chain| chain.circle_domain().is_ok_and(|d| d.as_u32() == domain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NamedChain::Goerli, DomainId::Ethereum, WormholeChain::Ethereum)]
    #[case(NamedChain::AvalancheFuji, DomainId::Avalanche, WormholeChain::Avalanche)]
    fn test_supported_chain_registry(
        #[case] chain: NamedChain,
        #[case] domain: DomainId,
        #[case] wormhole: WormholeChain,
    ) {
        assert!(chain.is_supported());
        assert_eq!(chain.circle_domain().unwrap(), domain);
        assert_eq!(chain.wormhole_chain().unwrap(), wormhole);
        assert!(chain.usdc_address().is_ok());
        assert!(chain.circle_bridge_address().is_ok());
        assert!(chain.circle_emitter_address().is_ok());
        assert!(chain.usdc_relayer_address().is_ok());
        assert!(chain.wormhole_core_address().is_ok());
        assert_eq!(chain_for_domain(domain.as_u32()), Some(chain));
    }

    #[test]
    fn test_unsupported_chain_error() {
        let result = NamedChain::Mainnet.usdc_relayer_address();
        assert!(matches!(
            result,
            Err(BridgeError::ChainNotSupported { .. })
        ));
        assert!(!NamedChain::Mainnet.is_supported());
        assert_eq!(chain_for_domain(3), None);
    }

    #[test]
    fn test_wormhole_emitter_is_left_padded_integration_address() {
        let emitter = NamedChain::Goerli.wormhole_emitter_address().unwrap();
        insta::assert_snapshot!(
            emitter.to_string(),
            @"0x000000000000000000000000bdcc4ebe3157df347671e078a41ee5ce137cd306"
        );
    }
}
