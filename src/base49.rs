//! Radix-49 text encoding and bit-string packing
//!
//! Every wire format in this crate (private keys, public keys, signatures,
//! encrypted wallet payloads) carries big integers as base-49 text. The
//! digit alphabet is fixed and ordered by value: `0`–`9` for 0..=9,
//! `a`–`z` for 10..=35 and `A`–`M` for 36..=48. Decoding is
//! case-sensitive. No big-integer crate in the ecosystem offers radix 49
//! directly (num-bigint stops at 36), so the conversion lives here.
//!
//! The module also holds the MSB-first bit-string helpers shared by key
//! derivation, Schnorr hashing and the wallet cipher.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;

use crate::{DalosError, DalosResult};

/// The 49 digits, ordered by value.
pub const ALPHABET: &[u8; 49] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLM";

const RADIX: u32 = 49;

/// Value of a single base-49 digit, or `None` for a foreign character.
pub fn digit_value(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'a'..='z' => Some(c as u8 - b'a' + 10),
        'A'..='M' => Some(c as u8 - b'A' + 36),
        _ => None,
    }
}

/// Base-49 digits of `n`, most significant first. Zero yields `[0]`.
pub fn digits_of(n: &BigUint) -> Vec<u8> {
    if n.is_zero() {
        return vec![0];
    }
    let radix = BigUint::from(RADIX);
    let mut digits = Vec::new();
    let mut rest = n.clone();
    while !rest.is_zero() {
        let (quotient, remainder) = rest.div_rem(&radix);
        let low: Vec<u32> = remainder.to_u32_digits();
        digits.push(low.first().copied().unwrap_or(0) as u8);
        rest = quotient;
    }
    digits.reverse();
    digits
}

/// Render `n` in base-49 text.
pub fn encode(n: &BigUint) -> String {
    digits_of(n)
        .into_iter()
        .map(|d| ALPHABET[d as usize] as char)
        .collect()
}

/// Parse base-49 text back into an integer.
///
/// Returns `None` for the empty string or any character outside the
/// alphabet; leading zeros are tolerated, matching the encoder's input
/// domain.
pub fn decode(s: &str) -> Option<BigUint> {
    if s.is_empty() {
        return None;
    }
    let radix = BigUint::from(RADIX);
    let mut value = BigUint::zero();
    for c in s.chars() {
        let d = digit_value(c)?;
        value = value * &radix + BigUint::from(d);
    }
    Some(value)
}

/// Pack a bit string into bytes, MSB-first within each byte.
///
/// The string is left-padded with zeros to a multiple of 8 bits before
/// grouping, so `"1"` packs to `[0x01]`.
pub fn bits_to_bytes(bits: &str) -> DalosResult<Vec<u8>> {
    if bits.bytes().any(|b| b != b'0' && b != b'1') {
        return Err(DalosError::InvalidBitString);
    }
    let padding = (8 - bits.len() % 8) % 8;
    let padded = format!("{}{}", "0".repeat(padding), bits);
    let bytes = padded
        .as_bytes()
        .chunks(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | (b - b'0')))
        .collect();
    Ok(bytes)
}

/// Expand bytes into a bit string, 8 characters per byte.
pub fn bytes_to_bits(bytes: &[u8]) -> String {
    let mut bits = String::with_capacity(bytes.len() * 8);
    for byte in bytes {
        bits.push_str(&format!("{byte:08b}"));
    }
    bits
}

/// Left-pad `bits` with zeros up to `width` characters.
///
/// Strings already at or beyond `width` are returned unchanged; the
/// minimal big-integer binary form drops leading zeros, and this restores
/// them.
pub fn pad_bits(bits: &str, width: usize) -> String {
    if bits.len() >= width {
        return bits.to_string();
    }
    format!("{}{}", "0".repeat(width - bits.len()), bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_digits() {
        assert_eq!(encode(&BigUint::from(0u32)), "0");
        assert_eq!(encode(&BigUint::from(9u32)), "9");
        assert_eq!(encode(&BigUint::from(10u32)), "a");
        assert_eq!(encode(&BigUint::from(35u32)), "z");
        assert_eq!(encode(&BigUint::from(36u32)), "A");
        assert_eq!(encode(&BigUint::from(48u32)), "M");
        assert_eq!(encode(&BigUint::from(49u32)), "10");
    }

    #[test]
    fn test_decode_matches_encode() {
        let n = BigUint::parse_bytes(b"123456789012345678901234567890", 10).unwrap();
        assert_eq!(decode(&encode(&n)).unwrap(), n);
    }

    #[test]
    fn test_decode_rejects_foreign_characters() {
        assert!(decode("N").is_none()); // past the 49-digit alphabet
        assert!(decode("1.0").is_none());
        assert!(decode("").is_none());
    }

    #[test]
    fn test_digits_of() {
        assert_eq!(digits_of(&BigUint::from(0u32)), vec![0]);
        assert_eq!(digits_of(&BigUint::from(50u32)), vec![1, 1]);
        assert_eq!(digits_of(&BigUint::from(48u32 + 49 * 49)), vec![1, 0, 48]);
    }

    #[test]
    fn test_bits_to_bytes_pads_on_the_left() {
        assert_eq!(bits_to_bytes("1").unwrap(), vec![0x01]);
        assert_eq!(bits_to_bytes("100000001").unwrap(), vec![0x01, 0x01]);
        assert_eq!(bits_to_bytes("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_bits_to_bytes_rejects_non_binary() {
        assert!(matches!(
            bits_to_bytes("0102"),
            Err(DalosError::InvalidBitString)
        ));
    }

    #[test]
    fn test_bits_to_bytes_matches_hex_vector() {
        let bits = "0101010110101010";
        assert_eq!(bits_to_bytes(bits).unwrap(), hex::decode("55aa").unwrap());
    }

    #[test]
    fn test_bytes_to_bits_roundtrip() {
        let bytes = [0x00, 0xff, 0x5a];
        assert_eq!(bits_to_bytes(&bytes_to_bits(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_pad_bits() {
        assert_eq!(pad_bits("101", 8), "00000101");
        assert_eq!(pad_bits("10101010", 8), "10101010");
    }
}
