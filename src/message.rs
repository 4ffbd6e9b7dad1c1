//! Execution-message view of a transaction.
//!
//! The state-transition layer does not consume transactions directly; it
//! consumes a flattened [`Message`] with every fee field populated for
//! both families, built against a known base fee.

use alloy_primitives::{Address, Bytes, U256};

use crate::transaction::Transaction;

/// The flattened form a transaction takes when handed to execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    from: Option<Address>,
    to: Option<Address>,
    gas_price: U256,
    gas_fee_cap: U256,
    gas_tip_cap: U256,
    gas_limit: U256,
    value: U256,
    nonce: U256,
    data: Bytes,
    no_base_fee: bool,
}

impl Message {
    /// Sender of the message; `None` when it could not be recovered.
    pub fn from(&self) -> Option<Address> {
        self.from
    }

    /// Recipient; `None` marks a contract creation.
    pub fn to(&self) -> Option<Address> {
        self.to
    }

    /// Effective price per gas unit under the base fee this message was
    /// built against.
    pub fn gas_price(&self) -> U256 {
        self.gas_price
    }

    /// Fee cap carried over from the transaction.
    pub fn gas_fee_cap(&self) -> U256 {
        self.gas_fee_cap
    }

    /// Tip cap carried over from the transaction.
    pub fn gas_tip_cap(&self) -> U256 {
        self.gas_tip_cap
    }

    /// Gas limit carried over from the transaction.
    pub fn gas_limit(&self) -> U256 {
        self.gas_limit
    }

    /// Transferred value in wei.
    pub fn value(&self) -> U256 {
        self.value
    }

    /// Transaction nonce.
    pub fn nonce(&self) -> U256 {
        self.nonce
    }

    /// Calldata, or bytecode for a contract creation.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Whether fee charging is disabled for this message. Set for
    /// read-only call simulations so a zero-price call succeeds
    /// regardless of the current base fee.
    pub fn no_base_fee(&self) -> bool {
        self.no_base_fee
    }
}

impl Transaction {
    /// Builds the execution message for inclusion in a block, pricing
    /// the gas against `base_fee`.
    pub fn as_message(&self, base_fee: U256) -> Message {
        self.build_message(base_fee, false)
    }

    /// Builds an execution message for a read-only call simulation:
    /// identical to [`Transaction::as_message`] except fee charging is
    /// flagged off.
    pub fn as_call_message(&self, base_fee: U256) -> Message {
        self.build_message(base_fee, true)
    }

    fn build_message(&self, base_fee: U256, no_base_fee: bool) -> Message {
        Message {
            from: self.sender(),
            to: self.to(),
            gas_price: self.effective_gas_price(base_fee),
            gas_fee_cap: self.gas_fee_cap(),
            gas_tip_cap: self.gas_tip_cap(),
            gas_limit: self.gas_limit(),
            value: self.value(),
            nonce: self.nonce(),
            data: self.data().clone(),
            no_base_fee,
        }
    }
}
