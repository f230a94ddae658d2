// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Wormhole chain identifiers
//!
//! Reference: <https://docs.wormhole.com/wormhole/reference/constants>

use std::fmt;

/// Wormhole's own chain identifier, carried as `uint16` in VAAs and relayer calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum WormholeChain {
    Ethereum = 2,
    Avalanche = 6,
}

impl WormholeChain {
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    #[inline]
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            2 => Some(Self::Ethereum),
            6 => Some(Self::Avalanche),
            _ => None,
        }
    }
}

impl From<WormholeChain> for u16 {
    fn from(chain: WormholeChain) -> Self {
        chain.as_u16()
    }
}

impl fmt::Display for WormholeChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2, Some(WormholeChain::Ethereum))]
    #[case(6, Some(WormholeChain::Avalanche))]
    #[case(1, None)]
    #[case(5, None)]
    fn test_from_u16(#[case] id: u16, #[case] expected: Option<WormholeChain>) {
        assert_eq!(WormholeChain::from_u16(id), expected);
        if let Some(chain) = expected {
            assert_eq!(u16::from(chain), id);
        }
    }
}
