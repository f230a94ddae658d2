// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Fixed-point USDC amounts

use std::fmt;
use std::str::FromStr;

use alloy_primitives::utils::{format_units, parse_units, ParseUnits};
use alloy_primitives::U256;

use crate::error::{BridgeError, Result};

/// Number of decimals of USDC on every supported chain.
pub const USDC_DECIMALS: u8 = 6;

/// An amount of USDC in base units (6 decimals).
///
/// ```rust
/// use usdc_bridge::UsdcAmount;
///
/// let amount: UsdcAmount = "100".parse().unwrap();
/// assert_eq!(amount.base_units(), alloy_primitives::U256::from(100_000_000u64));
/// assert_eq!(amount.to_string(), "100.0");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UsdcAmount(U256);

impl UsdcAmount {
    pub const ZERO: Self = Self(U256::ZERO);

    pub const ONE: Self = Self(U256::from_limbs([1_000_000, 0, 0, 0]));

    /// Destination gas requested by default on the relay path (0.001 USDC).
    pub const DEFAULT_NATIVE_GAS: Self = Self(U256::from_limbs([1_000, 0, 0, 0]));

    pub const fn from_base_units(units: U256) -> Self {
        Self(units)
    }

    /// Parses a human-readable decimal amount such as `"12.5"`.
    pub fn parse(amount: &str) -> Result<Self> {
        let trimmed = amount.trim();
        match parse_units(trimmed, USDC_DECIMALS)
            .map_err(|e| BridgeError::InvalidAmount(format!("{trimmed}: {e}")))?
        {
            ParseUnits::U256(units) => Ok(Self(units)),
            ParseUnits::I256(_) => Err(BridgeError::InvalidAmount(format!(
                "{trimmed}: amount must not be negative"
            ))),
        }
    }

    pub const fn base_units(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for UsdcAmount {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<U256> for UsdcAmount {
    fn from(units: U256) -> Self {
        Self(units)
    }
}

impl fmt::Display for UsdcAmount {
    /// Trailing fractional zeros are trimmed, keeping at least one digit ("100.0").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = format_units(self.0, USDC_DECIMALS).map_err(|_| fmt::Error)?;
        match formatted.split_once('.') {
            Some((whole, fraction)) => {
                let fraction = fraction.trim_end_matches('0');
                let fraction = if fraction.is_empty() { "0" } else { fraction };
                write!(f, "{whole}.{fraction}")
            }
            None => write!(f, "{formatted}.0"),
        }
    }
}
