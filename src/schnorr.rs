//! Schnorr signatures over the DALOS curve
//!
//! The classic scheme on the clamped-scalar key material:
//!
//! ```text
//! sign:    z fresh random clamped scalar, R = z·G
//!          c = H(R.x ‖ P.x ‖ P.y ‖ m)
//!          s = z + c·k  (mod Q)
//! verify:  s·G = R + c·P
//! ```
//!
//! The challenge hash concatenates the binary text of `R.x`, the public
//! key's affine coordinates and the message integer, packs the bits
//! MSB-first into bytes and runs Blake3 at S/8 bytes of output.
//!
//! Verification additionally rejects `s ≥ Q`, off-curve `R`, and `R`
//! outside the prime-order subgroup, closing the malleability window a
//! bare equation check would leave open.
//!
//! Wire form: `<R as public key string>|<s in base 49>`.

use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::base49;
use crate::curve::Curve;
use crate::keys::{affine_to_public_key, public_key_to_affine, KeyPair};
use crate::point::AffinePoint;
use crate::{DalosError, DalosResult};

/// A Schnorr signature: the commitment point and the response scalar.
#[derive(Clone, Debug)]
pub struct Signature {
    /// Commitment `R = z·G` in affine form.
    pub r: AffinePoint,
    /// Response scalar `s = z + c·k mod Q`.
    pub s: BigUint,
}

impl Signature {
    /// Serialize as `<R as public key string>|<s in base 49>`.
    pub fn to_wire(&self) -> String {
        format!("{}|{}", affine_to_public_key(&self.r), base49::encode(&self.s))
    }

    /// Parse the wire form back into its components.
    pub fn from_wire(wire: &str) -> DalosResult<Self> {
        let (r_part, s_part) = wire.split_once('|').ok_or(DalosError::InvalidSignature)?;
        let r = public_key_to_affine(r_part).map_err(|_| DalosError::InvalidSignature)?;
        let s = base49::decode(s_part).ok_or(DalosError::InvalidSignature)?;
        Ok(Signature { r, s })
    }
}

impl Curve {
    /// The challenge hash `H(r ‖ P.x ‖ P.y ‖ m)`.
    ///
    /// All four inputs are concatenated as binary text, left-padded to a
    /// byte boundary, packed MSB-first and hashed with Blake3 at S/8
    /// bytes; the digest is read as a big-endian integer.
    pub fn schnorr_hash(
        &self,
        r: &BigUint,
        public_key: &str,
        message: &str,
    ) -> DalosResult<BigUint> {
        let affine = public_key_to_affine(public_key)?;

        let mut concatenated = r.to_str_radix(2);
        concatenated.push_str(&affine.x.magnitude().to_str_radix(2));
        concatenated.push_str(&affine.y.magnitude().to_str_radix(2));
        concatenated.push_str(&BigUint::from_bytes_be(message.as_bytes()).to_str_radix(2));

        let packed = base49::bits_to_bytes(&concatenated)?;
        let mut hasher = blake3::Hasher::new();
        hasher.update(&packed);
        let mut digest = vec![0u8; (self.s / 8) as usize];
        hasher.finalize_xof().fill(&mut digest);
        Ok(BigUint::from_bytes_be(&digest))
    }

    /// Sign a message with a fresh random nonce.
    pub fn schnorr_sign(&self, keypair: &KeyPair, message: &str) -> DalosResult<String> {
        let nonce = Zeroizing::new(self.random_bitstring());
        self.schnorr_sign_with_nonce(keypair, message, &nonce)
    }

    /// Sign a message with a caller-supplied S-bit nonce.
    ///
    /// Exposed for deterministic testing; a repeated or biased nonce
    /// leaks the private key, so production callers should prefer
    /// [`Curve::schnorr_sign`].
    pub fn schnorr_sign_with_nonce(
        &self,
        keypair: &KeyPair,
        message: &str,
        nonce_bits: &str,
    ) -> DalosResult<String> {
        let z = self.generate_scalar(nonce_bits)?;
        let commitment = self.scalar_mul_base(&z)?;
        let r_affine = self.extended_to_affine(&commitment)?;

        let challenge = self.schnorr_hash(r_affine.x.magnitude(), &keypair.public, message)?;
        let k = base49::decode(&keypair.secret).ok_or(DalosError::InvalidPrivateKey)?;
        let s = (z + challenge * k) % self.q.magnitude();

        Ok(Signature { r: r_affine, s }.to_wire())
    }

    /// Verify a signature against a message and public key.
    ///
    /// Malformed inputs fail with a typed error; a well-formed but wrong
    /// signature yields `Ok(false)`.
    pub fn schnorr_verify(
        &self,
        signature: &str,
        message: &str,
        public_key: &str,
    ) -> DalosResult<bool> {
        let sig = Signature::from_wire(signature)?;
        if &sig.s >= self.q.magnitude() {
            return Ok(false);
        }

        let r_ext = self.affine_to_extended(&sig.r);
        let (on_curve, _) = self.is_on_curve(&r_ext);
        if !on_curve {
            return Ok(false);
        }
        // R must sit in the prime-order subgroup: Q·R = identity.
        if !self.scalar_mul(self.q.magnitude(), &r_ext)?.is_infinity() {
            return Ok(false);
        }

        let p_ext = self.affine_to_extended(&public_key_to_affine(public_key)?);
        let challenge = self.schnorr_hash(sig.r.x.magnitude(), public_key, message)?;

        let left = self.scalar_mul_base(&sig.s)?;
        let right = self.add(&r_ext, &self.scalar_mul(&challenge, &p_ext)?)?;
        Ok(self.are_points_equal(&left, &right))
    }
}
