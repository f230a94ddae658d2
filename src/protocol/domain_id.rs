// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Circle domain ID types for identifying blockchain networks
//!
//! Circle's attestation network assigns every chain a numeric domain. Only the
//! two domains this bridge moves USDC between are modelled.
//! Domains are unrelated to Wormhole chain ids; see [`WormholeChain`](super::WormholeChain)
//! for those.
//!
//! Reference: <https://developers.circle.com/stablecoins/evm-smart-contracts>

use std::fmt;

/// Circle domain identifier for blockchain networks
///
/// # Example
///
/// ```rust
/// use usdc_bridge::DomainId;
///
/// let avalanche: u32 = DomainId::Avalanche.into();
/// assert_eq!(avalanche, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DomainId {
    /// Ethereum mainnet and its testnets (Domain ID: 0)
    Ethereum = 0,
    /// Avalanche C-Chain and Fuji (Domain ID: 1)
    Avalanche = 1,
}

impl DomainId {
    /// Returns the numeric domain ID value
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Attempts to create a DomainId from a u32 value
    ///
    /// ```rust
    /// use usdc_bridge::DomainId;
    ///
    /// assert_eq!(DomainId::from_u32(0), Some(DomainId::Ethereum));
    /// assert_eq!(DomainId::from_u32(999), None);
    /// ```
    #[inline]
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Ethereum),
            1 => Some(Self::Avalanche),
            _ => None,
        }
    }

    /// Returns the chain name as a string
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ethereum => "Ethereum",
            Self::Avalanche => "Avalanche",
        }
    }
}

impl From<DomainId> for u32 {
    #[inline]
    fn from(domain: DomainId) -> Self {
        domain.as_u32()
    }
}

impl TryFrom<u32> for DomainId {
    type Error = InvalidDomainId;

    #[inline]
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_u32(value).ok_or(InvalidDomainId(value))
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u32())
    }
}

/// Error returned when attempting to convert an invalid u32 to a DomainId
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDomainId(pub u32);

impl fmt::Display for InvalidDomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid Circle domain ID: {}", self.0)
    }
}

impl std::error::Error for InvalidDomainId {}
