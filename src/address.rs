//! Account address derivation from secp256k1 public keys.

use alloy_primitives::{keccak256, Address};
use k256::ecdsa::VerifyingKey;

/// Derives the 20-byte account address from a 64-byte uncompressed public
/// key (X || Y coordinates, without the SEC1 0x04 prefix byte).
///
/// The address is the last 20 bytes of the keccak256 hash of the key.
pub fn address_from_public_key(public_key: &[u8; 64]) -> Address {
    let hash = keccak256(public_key);
    Address::from_slice(&hash[12..])
}

/// Derives the account address controlled by a verifying key.
pub fn address_from_verifying_key(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    // Uncompressed SEC1 encoding is always 65 bytes: 0x04 || X || Y.
    let mut raw = [0u8; 64];
    raw.copy_from_slice(&point.as_bytes()[1..]);
    address_from_public_key(&raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use k256::ecdsa::SigningKey;

    #[test]
    fn test_known_key_derives_known_address() {
        // The address controlled by private key 0x...01 is a fixed point
        // of Ethereum-style derivation.
        let mut key_bytes = [0u8; 32];
        key_bytes[31] = 1;
        let key = SigningKey::from_slice(&key_bytes).unwrap();

        let address = address_from_verifying_key(key.verifying_key());
        let expected: Address = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
            .parse()
            .unwrap();
        assert_eq!(address, expected);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let key = SigningKey::from_slice(&[0x42; 32]).unwrap();
        let a = address_from_verifying_key(key.verifying_key());
        let b = address_from_verifying_key(key.verifying_key());
        assert_eq!(a, b);
    }
}
