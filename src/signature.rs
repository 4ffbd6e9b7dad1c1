//! ECDSA signature value type and recovery-id normalization.

use std::fmt;

use alloy_primitives::U256;
use serde::Serialize;

use crate::error::{Result, TransactionError};

/// secp256k1 curve order N.
const CURVE_ORDER: U256 = U256::from_limbs([
    0xbfd2_5e8c_d036_4141,
    0xbaae_dce6_af48_a03b,
    0xffff_ffff_ffff_fffe,
    0xffff_ffff_ffff_ffff,
]);

/// How the recovery indicator `v` encodes the canonical `{0, 1}` recovery id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryScheme {
    /// Legacy pre-EIP-155 transactions: `v ∈ {27, 28}`.
    Homestead,
    /// Legacy EIP-155 transactions: `v = chain_id * 2 + 35 + parity`.
    Eip155,
    /// Typed (fee-market) transactions: `v ∈ {0, 1}`.
    Parity,
}

/// An ECDSA signature over a transaction's signing hash.
///
/// `v` is kept at full width so EIP-155 values, which embed a chain id,
/// round-trip byte-exactly through the codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Signature {
    v: U256,
    r: U256,
    s: U256,
}

impl Signature {
    /// Creates a signature, rejecting scalars outside the curve range.
    ///
    /// `v` is not constrained here: its valid range depends on the
    /// transaction family and is enforced during recovery.
    pub fn new(v: U256, r: U256, s: U256) -> Result<Self> {
        if r.is_zero() || r >= CURVE_ORDER {
            return Err(TransactionError::SignatureFormat("r is out of curve range"));
        }
        if s.is_zero() || s >= CURVE_ORDER {
            return Err(TransactionError::SignatureFormat("s is out of curve range"));
        }
        Ok(Self { v, r, s })
    }

    /// The recovery indicator as carried on the wire.
    pub fn v(&self) -> U256 {
        self.v
    }

    /// The `r` scalar.
    pub fn r(&self) -> U256 {
        self.r
    }

    /// The `s` scalar.
    pub fn s(&self) -> U256 {
        self.s
    }

    /// Normalizes `v` to the canonical `{0, 1}` recovery id under the
    /// given scheme.
    pub fn recovery_parity(&self, scheme: RecoveryScheme) -> Result<u8> {
        let v = self.v;
        match scheme {
            RecoveryScheme::Parity => {
                if v <= U256::from(1u8) {
                    Ok(v.to::<u8>())
                } else {
                    Err(TransactionError::SignatureFormat(
                        "recovery value of a typed transaction must be 0 or 1",
                    ))
                }
            }
            RecoveryScheme::Homestead => {
                if v == U256::from(27u8) || v == U256::from(28u8) {
                    Ok((v - U256::from(27u8)).to::<u8>())
                } else {
                    Err(TransactionError::SignatureFormat(
                        "recovery value of a legacy transaction must be 27 or 28",
                    ))
                }
            }
            RecoveryScheme::Eip155 => {
                if v >= U256::from(35u8) {
                    Ok(((v - U256::from(35u8)) % U256::from(2u8)).to::<u8>())
                } else {
                    Err(TransactionError::SignatureFormat(
                        "recovery value of an eip155 transaction must carry a chain id",
                    ))
                }
            }
        }
    }

    /// The chain id embedded in an EIP-155 `v`, if `v` has that shape.
    pub fn embedded_chain_id(&self) -> Option<U256> {
        if self.v >= U256::from(35u8) {
            Some((self.v - U256::from(35u8)) / U256::from(2u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Signature{{v={:#x}, r={:#x}, s={:#x}}}",
            self.v, self.r, self.s
        )
    }
}
