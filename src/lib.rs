//! Account-model transaction core for an EVM-compatible sidechain.
//!
//! This crate provides the transaction value type, its canonical wire
//! codec, ECDSA sender recovery, gas and fee economics, the semantic
//! validity rules applied before block inclusion, and the flattened
//! message handed to execution.
//!
//! # Transaction Families
//!
//! - **Legacy (0x00)**: Pre-EIP-2718 transactions, optionally with EIP-155 replay protection
//! - **EIP-1559 (0x02)**: Fee market transactions with a fee cap and a priority fee cap
//!
//! # Usage
//!
//! ```text
//! use sidechain_tx_eth::{codec, Transaction};
//!
//! // Decode a raw transaction envelope
//! let tx = codec::decode(raw_bytes)?;
//!
//! // Recover the sender and check the ordered validity rules
//! let from = tx.sender();
//! tx.semantic_validity()?;
//!
//! // Flatten for execution against the block's base fee
//! let msg = tx.as_message(base_fee);
//! ```
//!
//! # Architecture
//!
//! 1. [`Transaction`] - Immutable value with memoized id and sender
//! 2. [`codec`] - Canonical RLP envelope encoding and decoding
//! 3. [`recovery`] - secp256k1 public-key recovery and address derivation
//! 4. [`gas`] - Intrinsic gas and fee-market price computations
//! 5. [`Message`] - Flattened execution view built against a base fee

pub mod address;
pub mod codec;
pub mod error;
pub mod gas;
pub mod message;
pub mod recovery;
pub mod signature;
pub mod signer;
pub mod transaction;

mod json;
mod validation;

// Re-export main types
pub use address::{address_from_public_key, address_from_verifying_key};
pub use error::{InvalidReason, Result, TransactionError};
pub use message::Message;
pub use signature::{RecoveryScheme, Signature};
pub use transaction::{Pricing, Transaction};
