// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Wallet adapter registries for the non-EVM chain families
//!
//! Each family gets one [`AdapterRegistry`] describing which wallets to offer,
//! where they connect and whether they reconnect on load. The host renders its
//! wallet pickers from a [`WalletContext`]; the protocols behind the adapters
//! stay in the host.

use std::collections::BTreeMap;

use serde::Serialize;

pub const SOLANA_DEVNET_HOST: &str = "https://api.devnet.solana.com";

const SOLANA_WALLETS: &[&str] = &[
    "Phantom", "Solflare", "Nightly", "Clover", "Coin98", "Solong", "Torus",
];

const SUI_DEFAULT_WALLETS: &[&str] = &[
    "Sui Wallet",
    "Suiet",
    "Ethos Wallet",
    "Surf Wallet",
    "Martian Sui Wallet",
    "OKX Wallet",
    "Bitget Wallet",
];

/// Name the Stashed wallet shows to the user.
const STASHED_APP_NAME: &str = "Nimbus";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    Solana,
    Sui,
    Terra,
    Xpla,
}

impl ChainFamily {
    pub const ALL: [ChainFamily; 4] = [Self::Solana, Self::Sui, Self::Terra, Self::Xpla];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletAdapter {
    pub name: String,
    #[serde(rename = "appName", skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
}

impl WalletAdapter {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            app_name: None,
        }
    }
}

/// A Cosmos-style network as wallet providers describe it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    pub name: String,
    #[serde(rename = "chainID")]
    pub chain_id: String,
    pub lcd: String,
    #[serde(rename = "walletconnectID")]
    pub walletconnect_id: u32,
}

impl NetworkInfo {
    fn testnet(chain_id: &str, lcd: &str) -> Self {
        Self {
            name: "testnet".to_string(),
            chain_id: chain_id.to_string(),
            lcd: lcd.to_string(),
            walletconnect_id: 0,
        }
    }
}

/// Where a family's wallets connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Endpoint {
    /// The wallet kit picks its own network
    Default,
    Rpc { url: String },
    Network {
        default_network: NetworkInfo,
        /// Networks by WalletConnect id
        walletconnect_chain_ids: BTreeMap<u32, NetworkInfo>,
    },
}

impl Endpoint {
    fn network(network: NetworkInfo) -> Self {
        let mut walletconnect_chain_ids = BTreeMap::new();
        walletconnect_chain_ids.insert(network.walletconnect_id, network.clone());
        Self::Network {
            default_network: network,
            walletconnect_chain_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterRegistry {
    pub family: ChainFamily,
    pub adapters: Vec<WalletAdapter>,
    pub endpoint: Endpoint,
    pub auto_connect: bool,
}

impl AdapterRegistry {
    pub fn for_family(family: ChainFamily) -> Self {
        match family {
            ChainFamily::Solana => Self {
                family,
                adapters: SOLANA_WALLETS.iter().map(|name| WalletAdapter::named(name)).collect(),
                endpoint: Endpoint::Rpc {
                    url: SOLANA_DEVNET_HOST.to_string(),
                },
                auto_connect: true,
            },
            ChainFamily::Sui => {
                let stashed = WalletAdapter {
                    name: "Stashed".to_string(),
                    app_name: Some(STASHED_APP_NAME.to_string()),
                };
                Self {
                    family,
                    adapters: std::iter::once(stashed)
                        .chain(SUI_DEFAULT_WALLETS.iter().map(|name| WalletAdapter::named(name)))
                        .collect(),
                    endpoint: Endpoint::Default,
                    auto_connect: false,
                }
            }
            ChainFamily::Terra => Self {
                family,
                adapters: vec![WalletAdapter::named("Terra Station")],
                endpoint: Endpoint::network(NetworkInfo::testnet(
                    "pisco-1",
                    "https://pisco-lcd.terra.dev",
                )),
                auto_connect: false,
            },
            ChainFamily::Xpla => Self {
                family,
                adapters: vec![WalletAdapter::named("XPLA Vault")],
                endpoint: Endpoint::network(NetworkInfo::testnet(
                    "cube_47-5",
                    "https://cube-lcd.xpla.dev",
                )),
                auto_connect: false,
            },
        }
    }

    pub fn adapter_names(&self) -> impl Iterator<Item = &str> {
        self.adapters.iter().map(|adapter| adapter.name.as_str())
    }
}

/// Every family's registry, for hosts that render all wallet pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletContext {
    registries: BTreeMap<ChainFamily, AdapterRegistry>,
}

impl Default for WalletContext {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletContext {
    pub fn new() -> Self {
        Self {
            registries: ChainFamily::ALL
                .into_iter()
                .map(|family| (family, AdapterRegistry::for_family(family)))
                .collect(),
        }
    }

    pub fn registry(&self, family: ChainFamily) -> Option<&AdapterRegistry> {
        self.registries.get(&family)
    }

    pub fn registries(&self) -> impl Iterator<Item = &AdapterRegistry> {
        self.registries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_solana_registry() {
        let registry = AdapterRegistry::for_family(ChainFamily::Solana);

        assert_eq!(
            registry.adapter_names().collect::<Vec<_>>(),
            ["Phantom", "Solflare", "Nightly", "Clover", "Coin98", "Solong", "Torus"]
        );
        assert!(registry.auto_connect);
        assert_eq!(
            registry.endpoint,
            Endpoint::Rpc {
                url: SOLANA_DEVNET_HOST.to_string()
            }
        );
    }

    #[test]
    fn test_sui_registry_puts_stashed_first() {
        let registry = AdapterRegistry::for_family(ChainFamily::Sui);

        assert_eq!(registry.adapters[0].name, "Stashed");
        assert_eq!(registry.adapters[0].app_name.as_deref(), Some("Nimbus"));
        assert_eq!(registry.adapters.len(), 1 + SUI_DEFAULT_WALLETS.len());
        assert!(!registry.auto_connect);
    }

    #[rstest]
    #[case(ChainFamily::Terra, "pisco-1", "https://pisco-lcd.terra.dev")]
    #[case(ChainFamily::Xpla, "cube_47-5", "https://cube-lcd.xpla.dev")]
    fn test_cosmos_registries(
        #[case] family: ChainFamily,
        #[case] chain_id: &str,
        #[case] lcd: &str,
    ) {
        let registry = AdapterRegistry::for_family(family);
        let Endpoint::Network {
            default_network,
            walletconnect_chain_ids,
        } = registry.endpoint
        else {
            panic!("expected a network endpoint");
        };

        assert_eq!(default_network.name, "testnet");
        assert_eq!(default_network.chain_id, chain_id);
        assert_eq!(default_network.lcd, lcd);
        assert_eq!(walletconnect_chain_ids.get(&0), Some(&default_network));
    }

    #[test]
    fn test_terra_network_serializes_like_wallet_provider() {
        let registry = AdapterRegistry::for_family(ChainFamily::Terra);
        let Endpoint::Network {
            default_network, ..
        } = &registry.endpoint
        else {
            panic!("expected a network endpoint");
        };

        insta::assert_snapshot!(
            serde_json::to_string(default_network).unwrap(),
            @r#"{"name":"testnet","chainID":"pisco-1","lcd":"https://pisco-lcd.terra.dev","walletconnectID":0}"#
        );
    }

    #[test]
    fn test_context_holds_every_family() {
        let context = WalletContext::new();

        assert_eq!(context.registries().count(), 4);
        for family in ChainFamily::ALL {
            assert_eq!(context.registry(family).map(|r| r.family), Some(family));
        }
    }
}
