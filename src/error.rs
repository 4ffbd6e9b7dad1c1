//! Transaction-specific error types.

use alloy_primitives::{B256, U256};
use thiserror::Error;

/// Result type for transaction operations.
pub type Result<T, E = TransactionError> = std::result::Result<T, E>;

/// Errors produced while decoding, constructing or validating a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// The wire bytes are not a well-formed transaction.
    #[error("failed to decode transaction: {0}")]
    Decode(#[from] alloy_rlp::Error),

    /// The leading type byte names a transaction family this core does not support.
    #[error("unsupported transaction type {0:#04x}")]
    UnsupportedType(u8),

    /// A signature component is missing, has the wrong shape or is out of curve range.
    #[error("invalid signature encoding: {0}")]
    SignatureFormat(&'static str),

    /// The gas limit does not fit the 64-bit gas accounting domain.
    #[error("transaction [{id}] gas limit exceeds the uint64 range")]
    GasUintOverflow {
        /// Identifier of the offending transaction.
        id: B256,
    },

    /// One of the ordered semantic-validity rules failed.
    #[error("transaction [{id}] is semantically invalid: {reason}")]
    Invalid {
        /// Identifier of the offending transaction.
        id: B256,
        /// The specific rule that was violated.
        reason: InvalidReason,
    },
}

/// The specific semantic-validity rule a transaction violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReason {
    /// Unsigned transactions are never block-eligible.
    #[error("transaction is not signed")]
    NotSigned,

    /// A declared chain id must be at least 1.
    #[error("invalid chainId set: {0}")]
    InvalidChainId(u64),

    /// EIP-155: the chain id recovered from `v` disagrees with the declared one.
    #[error("eip155 chainId {declared} does not match chainId encoded in signature ({encoded})")]
    ChainIdMismatch {
        /// Chain id the transaction declares.
        declared: u64,
        /// Chain id embedded in the signature's recovery value.
        encoded: U256,
    },

    /// Contract creation must carry the contract bytecode as data.
    #[error("smart contract declaration transaction without data")]
    CreationWithoutData,

    /// The gas limit must be strictly positive.
    #[error("non-positive gas limit")]
    NonPositiveGasLimit,

    /// Fee-market ordering: the tip cap can never exceed the fee cap.
    #[error("maxPriorityFeePerGas {tip_cap} is higher than maxFeePerGas {fee_cap}")]
    TipAboveFeeCap {
        /// Declared `maxFeePerGas`.
        fee_cap: U256,
        /// Declared `maxPriorityFeePerGas`.
        tip_cap: U256,
    },

    /// The gas limit does not even cover the intrinsic cost of the payload.
    #[error("gas limit {gas_limit} is below intrinsic gas {intrinsic}")]
    BelowIntrinsicGas {
        /// Declared gas limit.
        gas_limit: u64,
        /// Intrinsic gas of the transaction.
        intrinsic: u64,
    },

    /// The signature recovered to an address other than the claimed sender.
    #[error("signature does not match the sender address")]
    SignatureMismatch,

    /// Recovery math could not produce a sender from the signature.
    #[error("signature not readable")]
    SignatureNotReadable,
}
