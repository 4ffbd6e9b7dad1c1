//! The account-model transaction value type.

use std::fmt;
use std::sync::OnceLock;

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};

use crate::codec;
use crate::recovery;
use crate::signature::{RecoveryScheme, Signature};

/// Price fields; exactly one representation is populated per family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pricing {
    /// Fixed-price legacy transaction.
    Legacy {
        /// Price per gas unit, paid in full.
        gas_price: U256,
    },
    /// EIP-1559 fee-market transaction.
    DynamicFee {
        /// Tip cap: the maximum incentive paid above the base fee.
        max_priority_fee_per_gas: U256,
        /// Fee cap: the absolute maximum price per gas unit.
        max_fee_per_gas: U256,
    },
}

/// A signed or unsigned account-model transaction.
///
/// The value is immutable once constructed: attaching a signature with
/// [`Transaction::with_signature`] produces a new value sharing the
/// unsigned fields. The transaction id and the recovered sender are
/// derived lazily and memoized; a first access racing across threads
/// performs the computation once and every reader observes the same
/// result.
#[derive(Clone, Debug)]
pub struct Transaction {
    nonce: U256,
    gas_limit: U256,
    to: Option<Address>,
    value: U256,
    data: Bytes,
    chain_id: Option<u64>,
    pricing: Pricing,
    signature: Option<Signature>,
    id: OnceLock<B256>,
    sender: OnceLock<Option<Address>>,
}

impl Transaction {
    /// Creates an unsigned legacy transaction without replay protection.
    pub fn legacy(
        nonce: U256,
        gas_price: U256,
        gas_limit: U256,
        to: Option<Address>,
        value: U256,
        data: Bytes,
    ) -> Self {
        Self {
            nonce,
            gas_limit,
            to,
            value,
            data,
            chain_id: None,
            pricing: Pricing::Legacy { gas_price },
            signature: None,
            id: OnceLock::new(),
            sender: OnceLock::new(),
        }
    }

    /// Creates an unsigned legacy transaction with EIP-155 replay protection.
    pub fn legacy_eip155(
        chain_id: u64,
        nonce: U256,
        gas_price: U256,
        gas_limit: U256,
        to: Option<Address>,
        value: U256,
        data: Bytes,
    ) -> Self {
        Self {
            chain_id: Some(chain_id),
            ..Self::legacy(nonce, gas_price, gas_limit, to, value, data)
        }
    }

    /// Creates an unsigned fee-market (EIP-1559) transaction. The chain id
    /// is mandatory for this family.
    #[allow(clippy::too_many_arguments)]
    pub fn dynamic_fee(
        chain_id: u64,
        nonce: U256,
        max_priority_fee_per_gas: U256,
        max_fee_per_gas: U256,
        gas_limit: U256,
        to: Option<Address>,
        value: U256,
        data: Bytes,
    ) -> Self {
        Self {
            nonce,
            gas_limit,
            to,
            value,
            data,
            chain_id: Some(chain_id),
            pricing: Pricing::DynamicFee {
                max_priority_fee_per_gas,
                max_fee_per_gas,
            },
            signature: None,
            id: OnceLock::new(),
            sender: OnceLock::new(),
        }
    }

    /// Attaches (or replaces) a signature, producing a new transaction
    /// value sharing the unsigned fields. Memoized derived fields are
    /// reset: they depend on the signature.
    pub fn with_signature(&self, signature: Signature) -> Self {
        Self {
            nonce: self.nonce,
            gas_limit: self.gas_limit,
            to: self.to,
            value: self.value,
            data: self.data.clone(),
            chain_id: self.chain_id,
            pricing: self.pricing,
            signature: Some(signature),
            id: OnceLock::new(),
            sender: OnceLock::new(),
        }
    }

    /// Transaction nonce.
    pub fn nonce(&self) -> U256 {
        self.nonce
    }

    /// Declared gas limit. Bounded to 64 bits by semantic validity, not
    /// by construction.
    pub fn gas_limit(&self) -> U256 {
        self.gas_limit
    }

    /// Recipient address; `None` marks a contract creation.
    pub fn to(&self) -> Option<Address> {
        self.to
    }

    /// Transferred value in wei.
    pub fn value(&self) -> U256 {
        self.value
    }

    /// Input data (calldata, or bytecode for a contract creation).
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Declared chain id; `None` only for legacy transactions without
    /// EIP-155 replay protection.
    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// The family-specific price fields.
    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    /// The attached signature, if any.
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    /// Whether a signature is attached.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Whether this is a fee-market (EIP-1559) transaction.
    pub fn is_dynamic_fee(&self) -> bool {
        matches!(self.pricing, Pricing::DynamicFee { .. })
    }

    /// Whether this is a legacy transaction.
    pub fn is_legacy(&self) -> bool {
        matches!(self.pricing, Pricing::Legacy { .. })
    }

    /// Whether this is a legacy transaction carrying EIP-155 replay
    /// protection.
    pub fn is_eip155(&self) -> bool {
        self.is_legacy() && self.chain_id.is_some()
    }

    /// The EIP-2718 type byte: `0x00` legacy, `0x02` fee market.
    pub fn tx_type(&self) -> u8 {
        if self.is_dynamic_fee() {
            codec::DYNAMIC_FEE_TX_TYPE
        } else {
            codec::LEGACY_TX_TYPE
        }
    }

    /// Type ordinal exposed to external tooling; equals the type byte.
    pub fn version(&self) -> u8 {
        self.tx_type()
    }

    /// Fee cap: `maxFeePerGas` for the fee-market family, `gasPrice` for
    /// legacy (geth convention).
    pub fn gas_fee_cap(&self) -> U256 {
        match self.pricing {
            Pricing::Legacy { gas_price } => gas_price,
            Pricing::DynamicFee { max_fee_per_gas, .. } => max_fee_per_gas,
        }
    }

    /// Tip cap: `maxPriorityFeePerGas` for the fee-market family,
    /// `gasPrice` for legacy (geth convention).
    pub fn gas_tip_cap(&self) -> U256 {
        match self.pricing {
            Pricing::Legacy { gas_price } => gas_price,
            Pricing::DynamicFee {
                max_priority_fee_per_gas,
                ..
            } => max_priority_fee_per_gas,
        }
    }

    /// Generic gas price accessor: `gasPrice` for legacy, `maxFeePerGas`
    /// for the fee-market family (geth convention).
    pub fn gas_price(&self) -> U256 {
        self.gas_fee_cap()
    }

    /// How this transaction's `v` encodes the recovery id.
    pub fn recovery_scheme(&self) -> RecoveryScheme {
        if self.is_dynamic_fee() {
            RecoveryScheme::Parity
        } else if self.chain_id.is_some() {
            RecoveryScheme::Eip155
        } else {
            RecoveryScheme::Homestead
        }
    }

    /// Transaction identifier: keccak256 of the full envelope bytes.
    /// Computed once per instance, safe under concurrent first access.
    pub fn id(&self) -> B256 {
        *self
            .id
            .get_or_init(|| keccak256(codec::encode(self, true)))
    }

    /// Sender address recovered from the signature; `None` when the
    /// transaction is unsigned or the signature is not readable.
    /// Computed once per instance, safe under concurrent first access.
    /// Never fails: the rejection decision belongs to the validator.
    pub fn sender(&self) -> Option<Address> {
        *self.sender.get_or_init(|| {
            let signature = self.signature.as_ref()?;
            match recovery::recover_sender(self.signing_hash(), signature, self.recovery_scheme())
            {
                Ok(address) => Some(address),
                Err(err) => {
                    tracing::debug!(%err, "could not recover sender address");
                    None
                }
            }
        })
    }
}

// Equality is over the semantic fields only; the memoization cells are
// derived state.
impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.nonce == other.nonce
            && self.gas_limit == other.gas_limit
            && self.to == other.to
            && self.value == other.value
            && self.data == other.data
            && self.chain_id == other.chain_id
            && self.pricing == other.pricing
            && self.signature == other.signature
    }
}

impl Eq for Transaction {}

impl std::hash::Hash for Transaction {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.nonce.hash(state);
        self.gas_limit.hash(state);
        self.to.hash(state);
        self.value.hash(state);
        self.data.hash(state);
        self.chain_id.hash(state);
        self.pricing.hash(state);
        self.signature.hash(state);
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction{{id={}, type={:#04x}, from={}, to={}, nonce={}, gasLimit={}, value={}, ",
            self.id(),
            self.tx_type(),
            self.sender().map(|a| a.to_string()).unwrap_or_default(),
            self.to.map(|a| a.to_string()).unwrap_or_default(),
            self.nonce,
            self.gas_limit,
            self.value,
        )?;
        match &self.pricing {
            Pricing::Legacy { gas_price } => write!(f, "gasPrice={gas_price}, ")?,
            Pricing::DynamicFee {
                max_priority_fee_per_gas,
                max_fee_per_gas,
            } => write!(
                f,
                "maxFeePerGas={max_fee_per_gas}, maxPriorityFeePerGas={max_priority_fee_per_gas}, "
            )?,
        }
        write!(
            f,
            "chainId={}, signature={}}}",
            self.chain_id.map(|c| c.to_string()).unwrap_or_default(),
            self.signature
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_default(),
        )
    }
}
