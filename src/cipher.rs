//! Passphrase-keyed bit-string encryption for wallet persistence
//!
//! The wallet stores the private key's bit string symmetrically
//! encrypted. The cipher contract is deliberately narrow: bit string in,
//! bit string out, over a fixed payload width, keyed only by a
//! passphrase. The default implementation runs AES-256 in CTR mode with
//! key and nonce derived from the passphrase via Blake3, so encryption
//! is deterministic and self-inverse over the wallet's payloads.
//!
//! Ciphertext travels through a base-49 integer on disk, which drops any
//! leading zero bits on the way back out. A CTR keystream XOR is
//! position-sensitive, so `decrypt_bits` accepts input at or below the
//! payload width and right-aligns it against the keystream before
//! applying it; the dropped zeros land back in their original positions.
//!
//! A stream construction cannot detect a wrong passphrase by itself;
//! decryption with a bad key yields well-formed garbage bits, and the
//! wallet layer catches that through its public-key comparison. A cipher
//! implementation that authenticates internally should report
//! [`DalosError::DecryptionFailure`] instead.

use aes::cipher::{KeyIvInit, StreamCipher};

use crate::base49;
use crate::{DalosError, DalosResult};

type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;

const KEY_CONTEXT: &str = "dalos-crypto 2024-06-01 wallet cipher key";
const IV_CONTEXT: &str = "dalos-crypto 2024-06-01 wallet cipher iv";

/// Symmetric encryption over bit strings, keyed by a passphrase.
///
/// Implementations must satisfy
/// `decrypt_bits(encrypt_bits(b, p), p) == b` for every payload-width bit
/// string `b`, and `decrypt_bits` must tolerate ciphertext whose leading
/// zero bits were stripped by an integer round trip.
pub trait BitStringCipher {
    /// Encrypt a payload-width bit string under a passphrase.
    fn encrypt_bits(&self, bits: &str, passphrase: &str) -> DalosResult<String>;

    /// Decrypt a bit string under a passphrase.
    fn decrypt_bits(&self, bits: &str, passphrase: &str) -> DalosResult<String>;
}

/// The default AES-256-CTR bit-string cipher over a fixed payload width.
#[derive(Clone, Copy, Debug)]
pub struct Aes256BitCipher {
    payload_bits: usize,
}

impl Aes256BitCipher {
    /// A cipher for payloads of `payload_bits` bits.
    ///
    /// The width must be a multiple of 8; operations on a ragged width
    /// fail with [`DalosError::InvalidBitString`].
    pub fn new(payload_bits: usize) -> Self {
        Self { payload_bits }
    }

    fn apply_keystream(&self, bits: &str, passphrase: &str) -> DalosResult<String> {
        if self.payload_bits % 8 != 0 || bits.len() != self.payload_bits {
            return Err(DalosError::InvalidBitString);
        }
        let mut bytes = base49::bits_to_bytes(bits)?;

        let key = blake3::derive_key(KEY_CONTEXT, passphrase.as_bytes());
        let iv_material = blake3::derive_key(IV_CONTEXT, passphrase.as_bytes());
        let mut iv = [0u8; 16];
        iv.copy_from_slice(&iv_material[..16]);

        let mut cipher = Aes256Ctr::new(&key.into(), &iv.into());
        cipher.apply_keystream(&mut bytes);
        Ok(base49::bytes_to_bits(&bytes))
    }
}

impl BitStringCipher for Aes256BitCipher {
    fn encrypt_bits(&self, bits: &str, passphrase: &str) -> DalosResult<String> {
        self.apply_keystream(bits, passphrase)
    }

    fn decrypt_bits(&self, bits: &str, passphrase: &str) -> DalosResult<String> {
        if bits.len() > self.payload_bits {
            return Err(DalosError::InvalidBitString);
        }
        // Realign ciphertext that lost leading zero bits; CTR mode is an
        // involution under the same keystream.
        let aligned = base49::pad_bits(bits, self.payload_bits);
        self.apply_keystream(&aligned, passphrase)
    }
}
