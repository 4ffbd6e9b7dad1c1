//! JSON view of a transaction for external tooling.
//!
//! The property order is part of the external contract, so the
//! serializer is written by hand instead of derived. Family-specific
//! price fields are emitted as explicit nulls on the other family.

use alloy_primitives::U256;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::transaction::{Pricing, Transaction};

impl Serialize for Transaction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Transaction", 15)?;
        state.serialize_field("id", &self.id())?;
        state.serialize_field("from", &self.sender())?;
        state.serialize_field("to", &self.to())?;
        state.serialize_field("value", &self.value())?;
        state.serialize_field("nonce", &self.nonce())?;
        state.serialize_field("data", self.data())?;
        match *self.pricing() {
            Pricing::Legacy { gas_price } => {
                state.serialize_field("gasPrice", &Some(gas_price))?;
                state.serialize_field("gasLimit", &self.gas_limit())?;
                state.serialize_field("maxFeePerGas", &None::<U256>)?;
                state.serialize_field("maxPriorityFeePerGas", &None::<U256>)?;
            }
            Pricing::DynamicFee {
                max_priority_fee_per_gas,
                max_fee_per_gas,
            } => {
                state.serialize_field("gasPrice", &None::<U256>)?;
                state.serialize_field("gasLimit", &self.gas_limit())?;
                state.serialize_field("maxFeePerGas", &Some(max_fee_per_gas))?;
                state.serialize_field("maxPriorityFeePerGas", &Some(max_priority_fee_per_gas))?;
            }
        }
        state.serialize_field("eip1559", &self.is_dynamic_fee())?;
        state.serialize_field("version", &self.version())?;
        state.serialize_field("chainId", &self.chain_id())?;
        state.serialize_field("signed", &self.is_signed())?;
        state.serialize_field("signature", &self.signature())?;
        state.end()
    }
}
