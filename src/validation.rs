//! Ordered semantic-validity checks.
//!
//! One pass of short-circuiting rules; the first failure wins and carries
//! the transaction id plus the specific rule violated. Validation is a
//! pure function of the transaction's bytes: re-validating the same bytes
//! always yields the same verdict.

use alloy_primitives::U256;

use crate::error::{InvalidReason, Result, TransactionError};
use crate::recovery;
use crate::transaction::{Pricing, Transaction};

impl Transaction {
    /// Runs the ordered semantic-validity checks required before a
    /// transaction may enter a block.
    ///
    /// The order is fixed: signedness, chain id, EIP-155 consistency,
    /// recipient/creation shape, numeric bounds, family fee rules,
    /// intrinsic gas, and finally signature validity.
    pub fn semantic_validity(&self) -> Result<()> {
        let id = self.id();
        let invalid = |reason: InvalidReason| TransactionError::Invalid { id, reason };

        let Some(signature) = self.signature() else {
            return Err(invalid(InvalidReason::NotSigned));
        };

        if let Some(chain_id) = self.chain_id() {
            if chain_id < 1 {
                return Err(invalid(InvalidReason::InvalidChainId(chain_id)));
            }
        }

        if self.is_eip155() {
            let declared = self.chain_id().unwrap_or_default();
            let encoded = signature.embedded_chain_id().unwrap_or_default();
            if encoded != U256::from(declared) {
                return Err(invalid(InvalidReason::ChainIdMismatch { declared, encoded }));
            }
        }

        // The recipient's length is enforced by the address type at
        // construction; what remains is the creation shape: deploying a
        // contract without bytecode is meaningless.
        if self.to().is_none() && self.data().is_empty() {
            return Err(invalid(InvalidReason::CreationWithoutData));
        }

        // value and nonce are unsigned by type.
        if self.gas_limit().is_zero() {
            return Err(invalid(InvalidReason::NonPositiveGasLimit));
        }
        let Ok(gas_limit) = u64::try_from(self.gas_limit()) else {
            return Err(TransactionError::GasUintOverflow { id });
        };

        // Fee fields are bounded to 256 bits by type; ordering is the
        // remaining fee-market constraint.
        if let Pricing::DynamicFee {
            max_priority_fee_per_gas,
            max_fee_per_gas,
        } = *self.pricing()
        {
            if max_fee_per_gas < max_priority_fee_per_gas {
                return Err(invalid(InvalidReason::TipAboveFeeCap {
                    fee_cap: max_fee_per_gas,
                    tip_cap: max_priority_fee_per_gas,
                }));
            }
        }

        let intrinsic = self.intrinsic_gas();
        if gas_limit < intrinsic {
            return Err(invalid(InvalidReason::BelowIntrinsicGas {
                gas_limit,
                intrinsic,
            }));
        }

        // The sender IS the recovered address, so a readable signature is
        // always valid for it; a signature grafted from another payload
        // recovers a different sender rather than failing here. The
        // mismatch arm is a self-consistency guard on the memoized
        // sender, not an authorization check.
        match self.sender() {
            None => Err(invalid(InvalidReason::SignatureNotReadable)),
            Some(from) => {
                if recovery::is_valid(from, self.signing_hash(), signature, self.recovery_scheme())
                {
                    Ok(())
                } else {
                    Err(invalid(InvalidReason::SignatureMismatch))
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes};
    use k256::ecdsa::SigningKey;
    use rand::rngs::OsRng;

    use crate::signature::Signature;

    const GWEI: u64 = 1_000_000_000;

    fn unsigned_legacy() -> Transaction {
        Transaction::legacy_eip155(
            1,
            U256::ZERO,
            U256::from(20 * GWEI),
            U256::from(21_000u64),
            Some(Address::repeat_byte(0x35)),
            U256::from(1_000_000_000_000_000_000u64),
            Bytes::new(),
        )
    }

    fn signed_legacy() -> Transaction {
        unsigned_legacy()
            .sign(&SigningKey::random(&mut OsRng))
            .unwrap()
    }

    fn reason(result: Result<()>) -> InvalidReason {
        match result {
            Err(TransactionError::Invalid { reason, .. }) => reason,
            other => panic!("expected a semantic-validity failure, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_legacy_transaction_passes() {
        signed_legacy().semantic_validity().unwrap();
    }

    #[test]
    fn test_valid_dynamic_fee_transaction_passes() {
        let tx = Transaction::dynamic_fee(
            1,
            U256::ZERO,
            U256::from(2 * GWEI),
            U256::from(30 * GWEI),
            U256::from(21_000u64),
            Some(Address::repeat_byte(0xab)),
            U256::from(500u64),
            Bytes::new(),
        )
        .sign(&SigningKey::random(&mut OsRng))
        .unwrap();
        tx.semantic_validity().unwrap();
    }

    #[test]
    fn test_unsigned_transaction_is_rejected_first() {
        assert_eq!(
            reason(unsigned_legacy().semantic_validity()),
            InvalidReason::NotSigned
        );
    }

    #[test]
    fn test_zero_chain_id_is_rejected() {
        let tx = Transaction::legacy_eip155(
            0,
            U256::ZERO,
            U256::from(20 * GWEI),
            U256::from(21_000u64),
            Some(Address::ZERO),
            U256::ZERO,
            Bytes::new(),
        )
        .sign(&SigningKey::random(&mut OsRng))
        .unwrap();
        assert_eq!(
            reason(tx.semantic_validity()),
            InvalidReason::InvalidChainId(0)
        );
    }

    #[test]
    fn test_eip155_chain_id_mismatch_is_rejected() {
        // Sign for chain 1, then graft the signature onto a chain-5 twin.
        let signed = signed_legacy();
        let grafted = Transaction::legacy_eip155(
            5,
            signed.nonce(),
            U256::from(20 * GWEI),
            signed.gas_limit(),
            signed.to(),
            signed.value(),
            signed.data().clone(),
        )
        .with_signature(*signed.signature().unwrap());

        assert_eq!(
            reason(grafted.semantic_validity()),
            InvalidReason::ChainIdMismatch {
                declared: 5,
                encoded: U256::from(1u8),
            }
        );
    }

    #[test]
    fn test_contract_creation_without_data_is_rejected() {
        let tx = Transaction::legacy_eip155(
            1,
            U256::ZERO,
            U256::from(20 * GWEI),
            U256::from(60_000u64),
            None,
            U256::ZERO,
            Bytes::new(),
        )
        .sign(&SigningKey::random(&mut OsRng))
        .unwrap();
        assert_eq!(
            reason(tx.semantic_validity()),
            InvalidReason::CreationWithoutData
        );
    }

    #[test]
    fn test_contract_creation_with_bytecode_passes_the_recipient_check() {
        let tx = Transaction::legacy_eip155(
            1,
            U256::ZERO,
            U256::from(20 * GWEI),
            U256::from(60_000u64),
            None,
            U256::ZERO,
            Bytes::from(vec![0x60, 0x80, 0x60, 0x40]),
        )
        .sign(&SigningKey::random(&mut OsRng))
        .unwrap();
        tx.semantic_validity().unwrap();
    }

    #[test]
    fn test_zero_gas_limit_is_rejected() {
        let tx = Transaction::legacy_eip155(
            1,
            U256::ZERO,
            U256::from(20 * GWEI),
            U256::ZERO,
            Some(Address::ZERO),
            U256::ZERO,
            Bytes::new(),
        )
        .sign(&SigningKey::random(&mut OsRng))
        .unwrap();
        assert_eq!(
            reason(tx.semantic_validity()),
            InvalidReason::NonPositiveGasLimit
        );
    }

    #[test]
    fn test_gas_limit_beyond_u64_is_a_dedicated_overflow() {
        let tx = Transaction::legacy_eip155(
            1,
            U256::ZERO,
            U256::from(20 * GWEI),
            U256::from(u64::MAX) + U256::from(1u8),
            Some(Address::ZERO),
            U256::ZERO,
            Bytes::new(),
        )
        .sign(&SigningKey::random(&mut OsRng))
        .unwrap();
        assert!(matches!(
            tx.semantic_validity(),
            Err(TransactionError::GasUintOverflow { .. })
        ));
    }

    #[test]
    fn test_tip_above_fee_cap_is_rejected_and_equality_passes() {
        let build = |tip: u64, cap: u64| {
            Transaction::dynamic_fee(
                1,
                U256::ZERO,
                U256::from(tip),
                U256::from(cap),
                U256::from(21_000u64),
                Some(Address::ZERO),
                U256::ZERO,
                Bytes::new(),
            )
            .sign(&SigningKey::random(&mut OsRng))
            .unwrap()
        };

        assert_eq!(
            reason(build(3 * GWEI, 2 * GWEI).semantic_validity()),
            InvalidReason::TipAboveFeeCap {
                fee_cap: U256::from(2 * GWEI),
                tip_cap: U256::from(3 * GWEI),
            }
        );

        build(2 * GWEI, 2 * GWEI).semantic_validity().unwrap();
    }

    #[test]
    fn test_intrinsic_gas_boundary() {
        let data = Bytes::from(vec![0xff, 0x00, 0x01]);
        let intrinsic = crate::gas::intrinsic_gas(&data, false);
        let build = |gas_limit: u64| {
            Transaction::legacy_eip155(
                1,
                U256::ZERO,
                U256::from(20 * GWEI),
                U256::from(gas_limit),
                Some(Address::ZERO),
                U256::ZERO,
                data.clone(),
            )
            .sign(&SigningKey::random(&mut OsRng))
            .unwrap()
        };

        // Exactly intrinsic passes; one below fails with the specific reason.
        build(intrinsic).semantic_validity().unwrap();
        assert_eq!(
            reason(build(intrinsic - 1).semantic_validity()),
            InvalidReason::BelowIntrinsicGas {
                gas_limit: intrinsic - 1,
                intrinsic,
            }
        );
    }

    #[test]
    fn test_unreadable_signature_is_reported_not_propagated() {
        // v = 29 is outside every legacy recovery encoding.
        let tx = Transaction::legacy(
            U256::ZERO,
            U256::from(20 * GWEI),
            U256::from(21_000u64),
            Some(Address::ZERO),
            U256::ZERO,
            Bytes::new(),
        )
        .with_signature(
            Signature::new(U256::from(29u8), U256::from(7u8), U256::from(9u8)).unwrap(),
        );
        assert_eq!(
            reason(tx.semantic_validity()),
            InvalidReason::SignatureNotReadable
        );
    }

    #[test]
    fn test_grafted_signature_shifts_the_sender_instead_of_failing() {
        // A signature lifted from a different payload still recovers an
        // address; the transaction stays semantically valid, attributed
        // to that other sender. Authorization is the ledger's concern.
        let signed = signed_legacy();
        let tampered = Transaction::legacy_eip155(
            1,
            signed.nonce(),
            U256::from(20 * GWEI),
            signed.gas_limit(),
            signed.to(),
            U256::from(7u8),
            signed.data().clone(),
        )
        .with_signature(*signed.signature().unwrap());

        tampered.semantic_validity().unwrap();
        assert_ne!(tampered.sender(), None);
        assert_ne!(tampered.sender(), signed.sender());
    }

    #[test]
    fn test_revalidation_is_deterministic() {
        let tx = signed_legacy();
        let first = tx.semantic_validity();
        let second = tx.semantic_validity();
        assert_eq!(first, second);
    }
}
