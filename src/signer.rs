//! ECDSA signing over a transaction's signing hash.

use alloy_primitives::{B256, U256};
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::SigningKey;

use crate::error::{Result, TransactionError};
use crate::signature::Signature;
use crate::transaction::Transaction;

/// Signs a 32-byte digest, returning the `(r, s, parity)` triple.
///
/// The parity is the canonical `{0, 1}` recovery id; the caller maps it
/// into the family-specific `v` encoding.
pub fn sign_digest(key: &SigningKey, digest: B256) -> Result<(U256, U256, u8)> {
    let (sig, recovery_id): (k256::ecdsa::Signature, k256::ecdsa::RecoveryId) = key
        .sign_prehash(digest.as_ref())
        .map_err(|_| TransactionError::SignatureFormat("signing failed"))?;

    let r = U256::from_be_slice(&sig.r().to_bytes());
    let s = U256::from_be_slice(&sig.s().to_bytes());
    Ok((r, s, u8::from(recovery_id.is_y_odd())))
}

impl Transaction {
    /// Signs the transaction's signing hash with `key` and attaches the
    /// resulting signature, producing a new transaction value.
    ///
    /// The recovery id is encoded into `v` according to the family:
    /// `27/28` for plain legacy, `chain_id * 2 + 35/36` for EIP-155 legacy
    /// and `0/1` for the fee-market family.
    pub fn sign(&self, key: &SigningKey) -> Result<Transaction> {
        let (r, s, parity) = sign_digest(key, self.signing_hash())?;

        let v = if self.is_dynamic_fee() {
            U256::from(parity)
        } else if let Some(chain_id) = self.chain_id() {
            U256::from(chain_id) * U256::from(2u8) + U256::from(35 + u64::from(parity))
        } else {
            U256::from(27 + u64::from(parity))
        };

        let signature = Signature::new(v, r, s)?;
        Ok(self.with_signature(signature))
    }
}
