//! Identifier encoding shared by generated DTO examples and TypeScript types.

use thiserror::Error;

/// Size of a Solidity `bytes32` word.
pub const BYTES32_LEN: usize = 32;

/// Failure to encode an identifier into a `bytes32` word
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// The UTF-8 encoding of the name does not fit into 32 bytes
    #[error("name '{name}' is {len} bytes long, at most {BYTES32_LEN} bytes fit into bytes32")]
    TooLong { name: String, len: usize },
}

/// Encode an attestation type or source name as a `0x`-prefixed `bytes32` hex string.
///
/// The UTF-8 bytes of `name` are hex encoded and right-padded with zeros, which is
/// what `bytes32("Payment")` yields on chain.
///
/// ```
/// use attestation_gen::encoding::encode_attestation_name;
///
/// let encoded = encode_attestation_name("BTC").unwrap();
/// assert!(encoded.starts_with("0x425443"));
/// assert_eq!(encoded.len(), 66);
/// ```
pub fn encode_attestation_name(name: &str) -> Result<String, EncodingError> {
    let bytes = name.as_bytes();
    if bytes.len() > BYTES32_LEN {
        return Err(EncodingError::TooLong {
            name: name.to_string(),
            len: bytes.len(),
        });
    }
    let mut word = [0u8; BYTES32_LEN];
    word[..bytes.len()].copy_from_slice(bytes);
    Ok(format!("0x{}", hex::encode(word)))
}
