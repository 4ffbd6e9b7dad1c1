//! Canonical RLP codec for the two transaction families.
//!
//! The same encoder produces both byte sequences a transaction is hashed
//! over: the full envelope (transaction id, wire transmission) and the
//! signing payload (signature digest), which for EIP-155 legacy
//! transactions substitutes `[chain_id, 0, 0]` for the signature fields.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_rlp::{Decodable, Encodable, Header, EMPTY_LIST_CODE, EMPTY_STRING_CODE};

use crate::error::{Result, TransactionError};
use crate::signature::Signature;
use crate::transaction::{Pricing, Transaction};

/// Type byte of the legacy family (untyped on the wire).
pub const LEGACY_TX_TYPE: u8 = 0x00;
/// EIP-2718 type marker prefixing fee-market envelopes.
pub const DYNAMIC_FEE_TX_TYPE: u8 = 0x02;

impl Transaction {
    /// The exact byte sequence whose keccak256 the signature commits to.
    pub fn signing_payload(&self) -> Vec<u8> {
        encode(self, false)
    }

    /// The digest signed by the sender.
    pub fn signing_hash(&self) -> B256 {
        keccak256(self.signing_payload())
    }

    /// The wire envelope, including the signature when one is attached.
    pub fn encoded(&self) -> Vec<u8> {
        encode(self, true)
    }
}

/// Encodes a transaction.
///
/// With `with_signature` the attached signature fields are appended (a
/// still-unsigned transaction encodes without them). Without it, the
/// signing-payload shape is produced instead: EIP-155 legacy transactions
/// append `[chain_id, 0, 0]` in place of the signature fields.
pub fn encode(tx: &Transaction, with_signature: bool) -> Vec<u8> {
    let signature = if with_signature { tx.signature() } else { None };
    let mut out = Vec::new();
    match *tx.pricing() {
        Pricing::Legacy { gas_price } => {
            let eip155_extension = if with_signature { None } else { tx.chain_id() };
            encode_legacy(tx, gas_price, signature, eip155_extension, &mut out);
        }
        Pricing::DynamicFee {
            max_priority_fee_per_gas,
            max_fee_per_gas,
        } => {
            encode_dynamic_fee(
                tx,
                max_priority_fee_per_gas,
                max_fee_per_gas,
                signature,
                &mut out,
            );
        }
    }
    out
}

/// Decodes a transaction from its wire bytes, rejecting trailing input.
pub fn decode(bytes: &[u8]) -> Result<Transaction> {
    let mut buf = bytes;
    let tx = decode_from(&mut buf)?;
    if !buf.is_empty() {
        return Err(alloy_rlp::Error::UnexpectedLength.into());
    }
    Ok(tx)
}

/// Decodes a transaction from the front of a byte slice, advancing it.
pub fn decode_from(buf: &mut &[u8]) -> Result<Transaction> {
    let first = *buf
        .first()
        .ok_or(TransactionError::Decode(alloy_rlp::Error::InputTooShort))?;

    // Legacy envelopes are bare RLP lists; anything below the list range
    // is an EIP-2718 type marker.
    if first >= EMPTY_LIST_CODE {
        decode_legacy(buf)
    } else if first == DYNAMIC_FEE_TX_TYPE {
        *buf = &buf[1..];
        decode_dynamic_fee(buf)
    } else {
        Err(TransactionError::UnsupportedType(first))
    }
}

fn encode_to_field(to: Option<Address>, out: &mut Vec<u8>) {
    match to {
        Some(address) => address.encode(out),
        // Contract creation: the empty string.
        None => out.push(EMPTY_STRING_CODE),
    }
}

fn to_field_length(to: Option<Address>) -> usize {
    match to {
        Some(address) => address.length(),
        None => 1,
    }
}

fn signature_fields_length(signature: &Signature) -> usize {
    signature.v().length() + signature.r().length() + signature.s().length()
}

fn encode_signature_fields(signature: &Signature, out: &mut Vec<u8>) {
    signature.v().encode(out);
    signature.r().encode(out);
    signature.s().encode(out);
}

fn encode_legacy(
    tx: &Transaction,
    gas_price: U256,
    signature: Option<&Signature>,
    eip155_extension: Option<u64>,
    out: &mut Vec<u8>,
) {
    let mut payload_length = tx.nonce().length()
        + gas_price.length()
        + tx.gas_limit().length()
        + to_field_length(tx.to())
        + tx.value().length()
        + tx.data().length();
    if let Some(signature) = signature {
        payload_length += signature_fields_length(signature);
    } else if let Some(chain_id) = eip155_extension {
        // chain id followed by two zero integers, one byte each.
        payload_length += chain_id.length() + 2;
    }

    Header {
        list: true,
        payload_length,
    }
    .encode(out);
    tx.nonce().encode(out);
    gas_price.encode(out);
    tx.gas_limit().encode(out);
    encode_to_field(tx.to(), out);
    tx.value().encode(out);
    tx.data().encode(out);
    if let Some(signature) = signature {
        encode_signature_fields(signature, out);
    } else if let Some(chain_id) = eip155_extension {
        chain_id.encode(out);
        0u8.encode(out);
        0u8.encode(out);
    }
}

fn encode_dynamic_fee(
    tx: &Transaction,
    max_priority_fee_per_gas: U256,
    max_fee_per_gas: U256,
    signature: Option<&Signature>,
    out: &mut Vec<u8>,
) {
    // The chain id is mandatory for this family by construction.
    let chain_id = tx.chain_id().unwrap_or_default();

    let mut payload_length = chain_id.length()
        + tx.nonce().length()
        + max_priority_fee_per_gas.length()
        + max_fee_per_gas.length()
        + tx.gas_limit().length()
        + to_field_length(tx.to())
        + tx.value().length()
        + tx.data().length()
        + 1; // the always-empty access list
    if let Some(signature) = signature {
        payload_length += signature_fields_length(signature);
    }

    out.push(DYNAMIC_FEE_TX_TYPE);
    Header {
        list: true,
        payload_length,
    }
    .encode(out);
    chain_id.encode(out);
    tx.nonce().encode(out);
    max_priority_fee_per_gas.encode(out);
    max_fee_per_gas.encode(out);
    tx.gas_limit().encode(out);
    encode_to_field(tx.to(), out);
    tx.value().encode(out);
    tx.data().encode(out);
    out.push(EMPTY_LIST_CODE);
    if let Some(signature) = signature {
        encode_signature_fields(signature, out);
    }
}

fn decode_to_field(buf: &mut &[u8]) -> Result<Option<Address>> {
    let raw = Bytes::decode(buf)?;
    if raw.is_empty() {
        Ok(None)
    } else if raw.len() == Address::len_bytes() {
        Ok(Some(Address::from_slice(&raw)))
    } else {
        Err(alloy_rlp::Error::Custom("invalid to address length").into())
    }
}

/// Splits off the payload of a list header, so field decoding cannot read
/// past the end of the transaction's own list.
fn decode_list_payload<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8]> {
    let header = Header::decode(buf)?;
    if !header.list {
        return Err(alloy_rlp::Error::UnexpectedString.into());
    }
    let payload = &buf[..header.payload_length];
    *buf = &buf[header.payload_length..];
    Ok(payload)
}

fn decode_legacy(buf: &mut &[u8]) -> Result<Transaction> {
    let mut fields = decode_list_payload(buf)?;

    let nonce = U256::decode(&mut fields)?;
    let gas_price = U256::decode(&mut fields)?;
    let gas_limit = U256::decode(&mut fields)?;
    let to = decode_to_field(&mut fields)?;
    let value = U256::decode(&mut fields)?;
    let data = Bytes::decode(&mut fields)?;

    // Six fields: an unsigned transaction without replay protection.
    if fields.is_empty() {
        return Ok(Transaction::legacy(nonce, gas_price, gas_limit, to, value, data));
    }

    let v = U256::decode(&mut fields)?;
    let r = U256::decode(&mut fields)?;
    let s = U256::decode(&mut fields)?;
    if !fields.is_empty() {
        return Err(alloy_rlp::Error::UnexpectedLength.into());
    }

    // The EIP-155 signing shape ends in [chain_id, 0, 0]: the chain id
    // sits in the v slot and there is no signature yet.
    if r.is_zero() && s.is_zero() {
        let chain_id = u64::try_from(v).map_err(|_| alloy_rlp::Error::Overflow)?;
        return Ok(Transaction::legacy_eip155(
            chain_id, nonce, gas_price, gas_limit, to, value, data,
        ));
    }

    let signature = Signature::new(v, r, s)?;
    let chain_id = signature
        .embedded_chain_id()
        .map(u64::try_from)
        .transpose()
        .map_err(|_| alloy_rlp::Error::Overflow)?;

    let unsigned = match chain_id {
        Some(chain_id) => {
            Transaction::legacy_eip155(chain_id, nonce, gas_price, gas_limit, to, value, data)
        }
        None => Transaction::legacy(nonce, gas_price, gas_limit, to, value, data),
    };
    Ok(unsigned.with_signature(signature))
}

fn decode_dynamic_fee(buf: &mut &[u8]) -> Result<Transaction> {
    let mut fields = decode_list_payload(buf)?;

    let chain_id = u64::decode(&mut fields)?;
    let nonce = U256::decode(&mut fields)?;
    let max_priority_fee_per_gas = U256::decode(&mut fields)?;
    let max_fee_per_gas = U256::decode(&mut fields)?;
    let gas_limit = U256::decode(&mut fields)?;
    let to = decode_to_field(&mut fields)?;
    let value = U256::decode(&mut fields)?;
    let data = Bytes::decode(&mut fields)?;

    let access_list = Header::decode(&mut fields)?;
    if !access_list.list {
        return Err(alloy_rlp::Error::UnexpectedString.into());
    }
    if access_list.payload_length != 0 {
        return Err(alloy_rlp::Error::Custom("access lists are not supported").into());
    }

    let unsigned = Transaction::dynamic_fee(
        chain_id,
        nonce,
        max_priority_fee_per_gas,
        max_fee_per_gas,
        gas_limit,
        to,
        value,
        data,
    );

    if fields.is_empty() {
        return Ok(unsigned);
    }

    let v = U256::decode(&mut fields)?;
    if v > U256::from(1u8) {
        return Err(alloy_rlp::Error::Custom("invalid y parity").into());
    }
    let r = U256::decode(&mut fields)?;
    let s = U256::decode(&mut fields)?;
    if !fields.is_empty() {
        return Err(alloy_rlp::Error::UnexpectedLength.into());
    }

    Ok(unsigned.with_signature(Signature::new(v, r, s)?))
}
