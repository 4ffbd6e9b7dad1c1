//! Gas and fee economics.

use alloy_primitives::{aliases::U512, U256};

use crate::transaction::{Pricing, Transaction};

/// Base cost of any transaction.
pub const TX_GAS: u64 = 21_000;
/// Base cost of a contract-creation transaction.
pub const TX_GAS_CONTRACT_CREATION: u64 = 53_000;
/// Cost per zero byte of transaction data.
pub const TX_DATA_ZERO_GAS: u64 = 4;
/// Cost per non-zero byte of transaction data (EIP-2028).
pub const TX_DATA_NON_ZERO_GAS: u64 = 16;

/// Minimum gas a transaction must allot before any execution happens:
/// the family base cost plus two-tier per-byte pricing of the data.
pub fn intrinsic_gas(data: &[u8], is_contract_creation: bool) -> u64 {
    let base = if is_contract_creation {
        TX_GAS_CONTRACT_CREATION
    } else {
        TX_GAS
    };
    let non_zero = data.iter().filter(|byte| **byte != 0).count() as u64;
    let zero = data.len() as u64 - non_zero;
    base.saturating_add(non_zero.saturating_mul(TX_DATA_NON_ZERO_GAS))
        .saturating_add(zero.saturating_mul(TX_DATA_ZERO_GAS))
}

impl Transaction {
    /// Intrinsic gas for this transaction's data and creation flag.
    pub fn intrinsic_gas(&self) -> u64 {
        intrinsic_gas(self.data(), self.to().is_none())
    }

    /// Price per gas unit actually charged under `base_fee`: the base fee
    /// plus the tip, capped at the fee cap. Legacy transactions pay their
    /// fixed gas price regardless of the base fee.
    pub fn effective_gas_price(&self, base_fee: U256) -> U256 {
        match *self.pricing() {
            Pricing::Legacy { gas_price } => gas_price,
            Pricing::DynamicFee {
                max_priority_fee_per_gas,
                max_fee_per_gas,
            } => base_fee
                .saturating_add(max_priority_fee_per_gas)
                .min(max_fee_per_gas),
        }
    }

    /// Portion of the effective price paid above `base_fee` as an
    /// incentive. `None` when the transaction's price does not cover the
    /// base fee at all; callers decide how tolerant to be.
    pub fn priority_fee_per_gas(&self, base_fee: U256) -> Option<U256> {
        match *self.pricing() {
            Pricing::Legacy { gas_price } => gas_price.checked_sub(base_fee),
            Pricing::DynamicFee {
                max_priority_fee_per_gas,
                max_fee_per_gas,
            } => max_fee_per_gas
                .checked_sub(base_fee)
                .map(|headroom| headroom.min(max_priority_fee_per_gas)),
        }
    }

    /// The funds that must be provably available before admission:
    /// `value + gas_limit * fee cap`, independent of the eventual base
    /// fee. Computed at 512-bit width so it can never overflow.
    pub fn max_cost(&self) -> U512 {
        U512::from(self.value())
            + U512::from(self.gas_limit()) * U512::from(self.gas_fee_cap())
    }
}
