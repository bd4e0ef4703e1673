//! Pure Rust implementation of the DALOS twisted Edwards curve core
//!
//! This crate provides the cryptographic heart of the DALOS keypair and
//! signing tool: arithmetic over the 1605-bit prime field, the complete
//! Hisil–Wong–Carter–Dawson group law in extended coordinates, base-49
//! windowed scalar multiplication, deterministic private-key clamping,
//! public-key and address encoding, Schnorr signatures, and the encrypted
//! wallet file format.
//!
//! The curve is fixed: `A·x² + y² = 1 + D·x²·y²` over `P = 2^1605 + 2315`
//! with `A = 1` and `D = −26`, cofactor 4, and a 1600-bit safe-scalar
//! width. There is no curve agility.
//!
//! # Examples
//!
//! ```rust
//! use dalos_crypto::curve::DALOS;
//! use dalos_crypto::DalosResult;
//!
//! # fn main() -> DalosResult<()> {
//! let bits = "01".repeat(800); // a 1600-bit private key seed
//! let scalar = DALOS.generate_scalar(&bits)?;
//! let keypair = DALOS.scalar_to_keys(&scalar)?;
//!
//! let signature = DALOS.schnorr_sign(&keypair, "hello")?;
//! assert!(DALOS.schnorr_verify(&signature, "hello", &keypair.public)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! The scalar-multiplication ladder indexes its precompute table by the
//! base-49 digits of the scalar and is therefore **not constant-time**.
//! Do not use this crate where a local attacker can observe timing or
//! cache behavior; see the module documentation of [`ops`] for details.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod address;
pub mod base49;
pub mod cipher;
pub mod curve;
pub mod field;
pub mod keys;
pub mod logging;
pub mod ops;
pub mod point;
pub mod schnorr;
pub mod wallet;

pub use address::AddressKind;
pub use curve::{Curve, DALOS};
pub use keys::{KeyPair, PrivateKey};
pub use point::{AffinePoint, ExtendedPoint};
pub use schnorr::Signature;

/// Error types returned by DALOS curve operations
///
/// Every fallible primitive reports one of these kinds to its caller;
/// there is no silent fallback anywhere in the crate.
#[derive(Debug, thiserror::Error)]
pub enum DalosError {
    /// A bit string has the wrong length or contains a character other
    /// than `'0'` or `'1'`.
    #[error("invalid bit string")]
    InvalidBitString,

    /// A private key's binary representation violates the clamping
    /// structure (leading `1`, S-bit middle, cofactor tail).
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// A public key string is missing its `.` separator, carries a
    /// length prefix out of range, or has an unparsable half.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// A signature string is missing its `|` separator or either half
    /// is malformed.
    #[error("invalid signature")]
    InvalidSignature,

    /// A modular inverse of zero (or of a non-invertible residue) was
    /// requested. Group-law callers uphold the `Z ≠ 0` invariant, so
    /// this surfaces only on hand-built degenerate points.
    #[error("division by zero in the prime field")]
    DivisionByZero,

    /// The symmetric cipher rejected the supplied passphrase.
    ///
    /// The default CTR cipher never rejects; a wrong passphrase is
    /// instead caught by the wallet's public-key comparison.
    #[error("decryption failed")]
    DecryptionFailure,

    /// A wallet file is structurally broken, or the public key recomputed
    /// from the decrypted private key does not match the stored one.
    #[error("wallet format error: {0}")]
    WalletFormat(String),

    /// An underlying file operation failed.
    #[error("i/o failure")]
    Io(#[from] std::io::Error),

    /// An internal precondition was violated, such as calling a group-law
    /// formula variant outside its Z-normalization contract.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias used throughout the crate.
pub type DalosResult<T> = Result<T, DalosError>;
