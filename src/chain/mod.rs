//! Chain configuration and contract addresses
//!
//! This module contains chain-specific configuration including contract addresses,
//! Circle domains and Wormhole chain ids for every supported chain.

pub(crate) mod addresses;
mod config;

pub use config::{chain_for_domain, BridgeChain, SUPPORTED_CHAINS};
