//! Private-key derivation, clamping and public-key encoding
//!
//! A private key is logically one scalar with three equivalent textual
//! forms: the unclamped S-bit string, and the clamped scalar in base 10
//! and base 49. Clamping prepends a `1` bit and appends the cofactor's
//! binary tail (`00` for DALOS), which pins the scalar's bit length and
//! makes it divisible by the cofactor, so the derived point always lands
//! in the prime-order subgroup.
//!
//! Public keys are length-prefixed base-49 strings: the decimal digits of
//! the affine X and Y are concatenated, the result parsed as one integer
//! and rendered in base 49, and the decimal length of X (itself in base
//! 49) is prefixed so the concatenation can be split again on decode.

use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::base49;
use crate::curve::Curve;
use crate::point::AffinePoint;
use crate::{DalosError, DalosResult};

/// A key pair in wire form: the clamped private scalar in base 49 and
/// the length-prefixed public key string.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyPair {
    /// Private scalar, base-49 text (the `Int49` form).
    pub secret: String,
    /// Length-prefixed public key string.
    pub public: String,
}

/// The three equivalent textual forms of one private key.
///
/// All forms are wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    /// Unclamped S-bit binary string.
    pub bit_string: String,
    /// Clamped scalar in decimal.
    pub int10: String,
    /// Clamped scalar in base 49.
    pub int49: String,
}

/// Hash `input` through seven chained Blake3 invocations, each producing
/// `output_len` bytes.
pub(crate) fn seven_fold_blake3(input: &[u8], output_len: usize) -> Vec<u8> {
    let mut buf = input.to_vec();
    for _ in 0..7 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&buf);
        let mut out = vec![0u8; output_len];
        hasher.finalize_xof().fill(&mut out);
        buf = out;
    }
    buf
}

impl Curve {
    /// Draw S uniformly random bits from the operating system.
    ///
    /// Entropy failure aborts the process; there is no retry.
    pub fn random_bitstring(&self) -> String {
        debug_assert!(self.s % 8 == 0);
        let mut buf = vec![0u8; (self.s / 8) as usize];
        OsRng.fill_bytes(&mut buf);
        base49::bytes_to_bits(&buf)
    }

    /// Derive an S-bit string from seed words.
    ///
    /// The words are joined with single spaces and pushed through the
    /// seven-fold Blake3 chain at S/8 bytes per round; the final digest
    /// becomes the bit string. Deterministic: the same words always
    /// yield the same bits.
    pub fn seed_words_to_bitstring(&self, words: &[&str]) -> String {
        let joined = words.join(" ");
        let digest = seven_fold_blake3(joined.as_bytes(), (self.s / 8) as usize);
        self.hash_to_bitstring(&digest)
    }

    /// Interpret hash bytes as a big-endian integer and render it as an
    /// S-bit binary string, left-padded with zeros.
    pub fn hash_to_bitstring(&self, hash: &[u8]) -> String {
        let bits = BigUint::from_bytes_be(hash).to_str_radix(2);
        base49::pad_bits(&bits, self.s as usize)
    }

    /// Check a candidate bit string.
    ///
    /// Returns `(total, length_ok, charset_ok)`: the length must be
    /// exactly S and every character `'0'` or `'1'`.
    pub fn validate_bitstring(&self, bits: &str) -> (bool, bool, bool) {
        let length_ok = bits.len() == self.s as usize;
        let charset_ok = bits.bytes().all(|b| b == b'0' || b == b'1');
        (length_ok && charset_ok, length_ok, charset_ok)
    }

    /// Validate a clamped private key given in base 10 or base 49 and
    /// recover its S-bit middle region.
    ///
    /// The binary form must start with `1`, end with the cofactor's
    /// binary tail and enclose exactly S bits between the two.
    pub fn validate_private_key(&self, key: &str, base10: bool) -> DalosResult<String> {
        let scalar = if base10 {
            BigUint::parse_bytes(key.as_bytes(), 10)
        } else {
            base49::decode(key)
        }
        .ok_or(DalosError::InvalidPrivateKey)?;

        let binary = scalar.to_str_radix(2);
        let cofactor_binary = self.r.magnitude().to_str_radix(2);
        let tail_len = cofactor_binary.len() - 1;

        if !binary.starts_with('1') {
            return Err(DalosError::InvalidPrivateKey);
        }
        if binary.len() != self.s as usize + cofactor_binary.len() {
            return Err(DalosError::InvalidPrivateKey);
        }
        if binary[binary.len() - tail_len..] != cofactor_binary[1..] {
            return Err(DalosError::InvalidPrivateKey);
        }

        Ok(binary[1..binary.len() - tail_len].to_string())
    }

    /// Clamp an S-bit string into a scalar.
    ///
    /// The scalar is the binary value `1 ‖ bits ‖ cofactor-tail`, where
    /// the tail is the cofactor's binary form without its leading `1`.
    /// By construction the result is divisible by the cofactor and has a
    /// fixed bit length, so clamping never fails on a valid bit string.
    pub fn generate_scalar(&self, bits: &str) -> DalosResult<BigUint> {
        let (ok, _, _) = self.validate_bitstring(bits);
        if !ok {
            return Err(DalosError::InvalidBitString);
        }
        let cofactor_binary = self.r.magnitude().to_str_radix(2);
        let clamped = format!("1{}{}", bits, &cofactor_binary[1..]);
        BigUint::parse_bytes(clamped.as_bytes(), 2).ok_or(DalosError::InvalidBitString)
    }

    /// Expose a scalar in its three equivalent private-key forms.
    ///
    /// The scalar is validated through the same clamping-structure check
    /// used on import, which guards against hand-built scalars outside
    /// the clamped domain.
    pub fn scalar_to_private_key(&self, scalar: &BigUint) -> DalosResult<PrivateKey> {
        let int10 = scalar.to_str_radix(10);
        let bit_string = self.validate_private_key(&int10, true)?;
        Ok(PrivateKey {
            bit_string,
            int10,
            int49: base49::encode(scalar),
        })
    }

    /// Compute the public key string for a clamped scalar.
    pub fn scalar_to_public_key(&self, scalar: &BigUint) -> DalosResult<String> {
        let point = self.scalar_mul_base(scalar)?;
        let affine = self.extended_to_affine(&point)?;
        Ok(affine_to_public_key(&affine))
    }

    /// Derive the full key pair for a clamped scalar.
    pub fn scalar_to_keys(&self, scalar: &BigUint) -> DalosResult<KeyPair> {
        let private = self.scalar_to_private_key(scalar)?;
        Ok(KeyPair {
            secret: private.int49.clone(),
            public: self.scalar_to_public_key(scalar)?,
        })
    }
}

/// Encode an affine point as a length-prefixed public key string.
pub fn affine_to_public_key(point: &AffinePoint) -> String {
    let x_decimal = point.x.to_string();
    let prefix = base49::encode(&BigUint::from(x_decimal.len()));
    let concatenated = format!("{}{}", x_decimal, point.y);
    let body = BigUint::parse_bytes(concatenated.as_bytes(), 10)
        .expect("decimal concatenation of field elements is numeric");
    format!("{}.{}", prefix, base49::encode(&body))
}

/// Decode a public key string back to affine coordinates.
///
/// Splits at the first `.`, decodes both halves from base 49, then splits
/// the decimal body at the prefixed X-length.
pub fn public_key_to_affine(key: &str) -> DalosResult<AffinePoint> {
    let (prefix, body) = key.split_once('.').ok_or(DalosError::InvalidPublicKey)?;

    let x_len = base49::decode(prefix)
        .and_then(|l| l.to_usize())
        .ok_or(DalosError::InvalidPublicKey)?;
    let decimal = base49::decode(body)
        .ok_or(DalosError::InvalidPublicKey)?
        .to_str_radix(10);

    if x_len == 0 || x_len >= decimal.len() {
        return Err(DalosError::InvalidPublicKey);
    }

    let x = BigUint::parse_bytes(decimal[..x_len].as_bytes(), 10)
        .ok_or(DalosError::InvalidPublicKey)?;
    let y = BigUint::parse_bytes(decimal[x_len..].as_bytes(), 10)
        .ok_or(DalosError::InvalidPublicKey)?;

    Ok(AffinePoint {
        x: BigInt::from(x),
        y: BigInt::from(y),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::DALOS;

    #[test]
    fn test_validate_bitstring_flags() {
        let good = "0".repeat(1600);
        assert_eq!(DALOS.validate_bitstring(&good), (true, true, true));

        let short = "0".repeat(1599);
        assert_eq!(DALOS.validate_bitstring(&short), (false, false, true));

        let bad = format!("{}2", "0".repeat(1599));
        assert_eq!(DALOS.validate_bitstring(&bad), (false, true, false));
    }

    #[test]
    fn test_clamping_structure_of_zero_bitstring() {
        let bits = "0".repeat(1600);
        let scalar = DALOS.generate_scalar(&bits).unwrap();
        let binary = scalar.to_str_radix(2);

        assert_eq!(binary.len(), 1603);
        assert!(binary.starts_with('1'));
        assert!(binary.ends_with("00"));
        assert_eq!(&binary[1..1601], bits.as_str());
    }

    #[test]
    fn test_clamping_is_deterministic() {
        let bits = "10".repeat(800);
        let first = DALOS.generate_scalar(&bits).unwrap();
        let second = DALOS.generate_scalar(&bits).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_scalar_rejects_invalid_bits() {
        assert!(matches!(
            DALOS.generate_scalar("0101"),
            Err(DalosError::InvalidBitString)
        ));
        let with_letter = format!("{}x", "0".repeat(1599));
        assert!(DALOS.generate_scalar(&with_letter).is_err());
    }

    #[test]
    fn test_private_key_roundtrip_in_both_bases() {
        let bits = "01".repeat(800);
        let scalar = DALOS.generate_scalar(&bits).unwrap();

        let from_base10 = DALOS
            .validate_private_key(&scalar.to_str_radix(10), true)
            .unwrap();
        assert_eq!(from_base10, bits);

        let from_base49 = DALOS
            .validate_private_key(&base49::encode(&scalar), false)
            .unwrap();
        assert_eq!(from_base49, bits);
    }

    #[test]
    fn test_validate_private_key_rejects_unclamped_scalar() {
        // 6 = 0b110 ends in the cofactor tail's complement.
        assert!(DALOS.validate_private_key("6", true).is_err());
        assert!(DALOS.validate_private_key("not a number", true).is_err());
    }

    #[test]
    fn test_random_bitstring_shape() {
        let bits = DALOS.random_bitstring();
        assert_eq!(DALOS.validate_bitstring(&bits), (true, true, true));
        assert_ne!(bits, DALOS.random_bitstring());
    }

    #[test]
    fn test_seed_words_are_deterministic() {
        let words = ["one", "two", "three", "four", "five"];
        let first = DALOS.seed_words_to_bitstring(&words);
        let second = DALOS.seed_words_to_bitstring(&words);
        assert_eq!(first, second);
        assert_eq!(DALOS.validate_bitstring(&first), (true, true, true));

        // Word boundaries matter: the join is a single space.
        let shifted = DALOS.seed_words_to_bitstring(&["one two", "three", "four", "five"]);
        assert_eq!(shifted, first);
        let different = DALOS.seed_words_to_bitstring(&["one", "two", "three", "four", "six"]);
        assert_ne!(different, first);
    }

    #[test]
    fn test_public_key_roundtrip() {
        let scalar = DALOS.generate_scalar(&"01".repeat(800)).unwrap();
        let point = DALOS.scalar_mul_base(&scalar).unwrap();
        let affine = DALOS.extended_to_affine(&point).unwrap();

        let encoded = affine_to_public_key(&affine);
        let decoded = public_key_to_affine(&encoded).unwrap();
        assert_eq!(decoded, affine);
        assert_eq!(affine_to_public_key(&decoded), encoded);
    }

    #[test]
    fn test_public_key_decode_rejects_malformed_input() {
        assert!(matches!(
            public_key_to_affine("no separator"),
            Err(DalosError::InvalidPublicKey)
        ));
        // Length prefix points past the end of the body.
        assert!(public_key_to_affine("z.12").is_err());
        assert!(public_key_to_affine(".12").is_err());
        assert!(public_key_to_affine("2.").is_err());
    }

    #[test]
    fn test_keypair_forms_are_consistent() {
        let scalar = DALOS.generate_scalar(&"0".repeat(1600)).unwrap();
        let private = DALOS.scalar_to_private_key(&scalar).unwrap();
        let keypair = DALOS.scalar_to_keys(&scalar).unwrap();

        assert_eq!(private.int49, keypair.secret);
        assert_eq!(base49::decode(&private.int49).unwrap(), scalar);
        assert_eq!(private.int10, scalar.to_str_radix(10));
        assert_eq!(private.bit_string, "0".repeat(1600));
        assert_eq!(keypair.public, DALOS.scalar_to_public_key(&scalar).unwrap());
    }
}
