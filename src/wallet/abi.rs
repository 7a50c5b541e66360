// src/wallet/abi.rs

//! Minimal ABI helpers for selector-based `eth_call` interactions.

use std::str::FromStr;

use anyhow::{anyhow, Result};
use ethers_core::abi::{decode, encode, ParamType, Token};
use ethers_core::types::{Address, Bytes, U256};
use ethers_core::utils::keccak256;

/// First four bytes of the keccak hash of a function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let mut sel = [0u8; 4];
    sel.copy_from_slice(&keccak256(signature.as_bytes())[0..4]);
    sel
}

/// Encodes a function call: selector followed by ABI-encoded arguments.
pub fn encode_call(signature: &str, tokens: &[Token]) -> Bytes {
    let mut out = selector(signature).to_vec();
    out.extend(encode(tokens));
    Bytes::from(out)
}

/// Decodes a single uint256 return value.
pub fn decode_u256(data: &Bytes) -> Result<U256> {
    let tokens = decode(&[ParamType::Uint(256)], data)?;
    match tokens.first() {
        Some(Token::Uint(value)) => Ok(*value),
        _ => Err(anyhow!("return data is not a uint256")),
    }
}

/// Decodes a single string return value, falling back to the bytes32
/// encoding some older token contracts use for `name`/`symbol`.
pub fn decode_string(data: &Bytes) -> Result<String> {
    if let Ok(tokens) = decode(&[ParamType::String], data) {
        if let Some(Token::String(value)) = tokens.first() {
            return Ok(value.clone());
        }
    }
    if let Ok(tokens) = decode(&[ParamType::FixedBytes(32)], data) {
        if let Some(Token::FixedBytes(bytes)) = tokens.first() {
            let trimmed: Vec<u8> = bytes.iter().copied().take_while(|b| *b != 0).collect();
            if let Ok(value) = String::from_utf8(trimmed) {
                return Ok(value);
            }
        }
    }
    Err(anyhow!("return data is not a string"))
}

pub fn parse_address(address: &str) -> Result<Address> {
    Address::from_str(address).map_err(|_| anyhow!("invalid address '{address}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_selector_matches_known_value() {
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn encode_call_prefixes_selector() {
        let to = Address::zero();
        let data = encode_call(
            "transfer(address,uint256)",
            &[Token::Address(to), Token::Uint(U256::from(1u64))],
        );
        assert_eq!(&data[0..4], &[0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(data.len(), 4 + 64);
    }

    #[test]
    fn u256_roundtrip() {
        let encoded = Bytes::from(encode(&[Token::Uint(U256::from(42u64))]));
        assert_eq!(decode_u256(&encoded).unwrap(), U256::from(42u64));
    }

    #[test]
    fn string_roundtrip() {
        let encoded = Bytes::from(encode(&[Token::String("USDC".to_string())]));
        assert_eq!(decode_string(&encoded).unwrap(), "USDC");
    }
}
