//! secp256k1 sender recovery.

use std::sync::OnceLock;

use alloy_primitives::{Address, B256};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, Secp256k1};

use crate::address::address_from_public_key;
use crate::error::{Result, TransactionError};
use crate::signature::{RecoveryScheme, Signature};

/// Recovers the sender address from a signature over `message_hash`.
///
/// The recovery indicator is normalized according to `scheme` before the
/// elliptic-curve recovery runs. Malformed or out-of-range components fail
/// with a signature-format error, never with a panic.
pub fn recover_sender(
    message_hash: B256,
    signature: &Signature,
    scheme: RecoveryScheme,
) -> Result<Address> {
    let parity = signature.recovery_parity(scheme)?;

    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&signature.r().to_be_bytes::<32>());
    compact[32..].copy_from_slice(&signature.s().to_be_bytes::<32>());

    let recid = RecoveryId::from_i32(i32::from(parity))
        .map_err(|_| TransactionError::SignatureFormat("invalid recovery id"))?;
    let recoverable = RecoverableSignature::from_compact(&compact, recid)
        .map_err(|_| TransactionError::SignatureFormat("malformed signature scalars"))?;
    let msg = Message::from_digest_slice(message_hash.as_slice())
        .map_err(|_| TransactionError::SignatureFormat("invalid message digest"))?;

    let pubkey = secp()
        .recover_ecdsa(&msg, &recoverable)
        .map_err(|_| TransactionError::SignatureFormat("public key recovery failed"))?;

    let uncompressed = pubkey.serialize_uncompressed();
    let mut raw = [0u8; 64];
    raw.copy_from_slice(&uncompressed[1..]);
    Ok(address_from_public_key(&raw))
}

/// True iff recovery under `scheme` succeeds and yields `claimed`.
///
/// Recovery failures are absorbed: an unreadable signature is simply not
/// valid for any address.
pub fn is_valid(
    claimed: Address,
    message_hash: B256,
    signature: &Signature,
    scheme: RecoveryScheme,
) -> bool {
    recover_sender(message_hash, signature, scheme)
        .map(|recovered| recovered == claimed)
        .unwrap_or(false)
}

fn secp() -> &'static Secp256k1<All> {
    static SECP: OnceLock<Secp256k1<All>> = OnceLock::new();
    SECP.get_or_init(Secp256k1::new)
}
