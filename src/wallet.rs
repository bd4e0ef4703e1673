//! Encrypted wallet files
//!
//! A wallet is a twelve-line UTF-8 text file: the encrypted private key,
//! the public key and both account addresses, fenced by divider lines.
//! The first eleven lines are LF-terminated; the twelfth is the trailing
//! divider with no newline after it.
//!
//! The private key travels as
//! `bit string → cipher → bit string → base-2 integer → base-49 text`,
//! and import inverts the pipeline: the stored integer's binary text is
//! decrypted as-is, and the decrypted bit string is left-padded back to
//! S bits if it comes back short. Import is only considered successful
//! when the public key recomputed from the decrypted key matches the
//! stored one; a mismatch aborts the open, which is also how a wrong
//! passphrase surfaces with the default stream cipher.

use std::fs;
use std::path::{Path, PathBuf};

use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::address::{derive_address, AddressKind};
use crate::base49;
use crate::cipher::BitStringCipher;
use crate::curve::Curve;
use crate::keys::KeyPair;
use crate::{DalosError, DalosResult};

/// Divider line fencing the wallet sections.
pub const DIVIDER: &str = "=====================ѺurѺ₿ѺrѺΣ=====================";

const LINE_COUNT: usize = 12;

/// Derive the wallet filename from a public key.
///
/// `<prefix>.<first 7 chars after the dot>...<last 7 chars>.txt`, with
/// defensive truncation when the key is shorter than either window.
pub fn filename_from_public_key(public_key: &str) -> String {
    let Some((prefix, after_dot)) = public_key.split_once('.') else {
        return "InvalidPublicKey.txt".to_string();
    };

    let head: &str = if after_dot.len() > 7 {
        &after_dot[..7]
    } else {
        after_dot
    };
    let tail: &str = if public_key.len() > 7 {
        &public_key[public_key.len() - 7..]
    } else {
        public_key
    };

    format!("{prefix}.{head}...{tail}.txt")
}

/// Encrypt a private-key bit string and write the wallet file into
/// `directory`, returning the path written.
pub fn export<C: BitStringCipher>(
    curve: &Curve,
    bits: &str,
    passphrase: &str,
    cipher: &C,
    directory: &Path,
) -> DalosResult<PathBuf> {
    let encrypted_bits = Zeroizing::new(cipher.encrypt_bits(bits, passphrase)?);
    let encrypted = base49::encode(
        &BigUint::parse_bytes(encrypted_bits.as_bytes(), 2).ok_or(DalosError::InvalidBitString)?,
    );

    let scalar = curve.generate_scalar(bits)?;
    let keypair = curve.scalar_to_keys(&scalar)?;
    let smart = derive_address(&keypair.public, AddressKind::Smart)?;
    let standard = derive_address(&keypair.public, AddressKind::Standard)?;

    let contents = format!(
        "{DIVIDER}\n\
         Your DALOS Account PrivateKey in encrypted form is:\n\
         {encrypted}\n\
         {DIVIDER}\n\
         Your DALOS Account PublicKey:\n\
         {publ}\n\
         {DIVIDER}\n\
         Your Smart DALOS Account Address is:\n\
         {smart}\n\
         Your Standard DALOS Account Address is:\n\
         {standard}\n\
         {DIVIDER}",
        publ = keypair.public,
    );

    let path = directory.join(filename_from_public_key(&keypair.public));
    fs::write(&path, contents)?;
    Ok(path)
}

/// Open a wallet file: decrypt the private key, rebuild the key pair and
/// verify it against the stored public key.
pub fn import<C: BitStringCipher>(
    curve: &Curve,
    path: &Path,
    passphrase: &str,
    cipher: &C,
) -> DalosResult<KeyPair> {
    let contents = fs::read_to_string(path)?;
    let lines: Vec<&str> = contents.split('\n').collect();
    if lines.len() != LINE_COUNT {
        return Err(DalosError::WalletFormat(format!(
            "expected {LINE_COUNT} lines, found {}",
            lines.len()
        )));
    }

    let encrypted = lines[2].trim();
    let stored_public = lines[5].trim();

    let encrypted_int = base49::decode(encrypted).ok_or_else(|| {
        DalosError::WalletFormat("encrypted private key is not base-49 text".to_string())
    })?;
    let decrypted = Zeroizing::new(cipher.decrypt_bits(&encrypted_int.to_str_radix(2), passphrase)?);
    let bits = Zeroizing::new(base49::pad_bits(&decrypted, curve.s as usize));

    let scalar = curve.generate_scalar(&bits)?;
    let keypair = curve.scalar_to_keys(&scalar)?;
    if keypair.public != stored_public {
        return Err(DalosError::WalletFormat(
            "recomputed public key does not match the stored one".to_string(),
        ));
    }
    Ok(keypair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::Aes256BitCipher;
    use crate::curve::DALOS;

    fn cipher() -> Aes256BitCipher {
        Aes256BitCipher::new(DALOS.s as usize)
    }

    #[test]
    fn test_filename_derivation() {
        assert_eq!(
            filename_from_public_key("ab.0123456789xyz"),
            "ab.0123456...6789xyz.txt"
        );
        assert_eq!(filename_from_public_key("a.bc"), "a.bc...a.bc.txt");
        assert_eq!(filename_from_public_key("nodot"), "InvalidPublicKey.txt");
    }

    #[test]
    fn test_export_layout() {
        let dir = tempfile::tempdir().unwrap();
        let bits = "01".repeat(800);
        let path = export(&DALOS, &bits, "passphrase", &cipher(), dir.path()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.split('\n').collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], DIVIDER);
        assert_eq!(lines[3], DIVIDER);
        assert_eq!(lines[6], DIVIDER);
        assert_eq!(lines[11], DIVIDER);
        assert!(!contents.ends_with('\n'));
        assert!(lines[8].starts_with("₳."));
        assert!(lines[10].starts_with("Ѻ."));
    }

    #[test]
    fn test_export_import_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let bits = "10".repeat(800);
        let path = export(&DALOS, &bits, "open sesame", &cipher(), dir.path()).unwrap();

        let scalar = DALOS.generate_scalar(&bits).unwrap();
        let expected = DALOS.scalar_to_keys(&scalar).unwrap();
        let imported = import(&DALOS, &path, "open sesame", &cipher()).unwrap();
        assert_eq!(imported, expected);
    }

    #[test]
    fn test_import_rejects_wrong_passphrase() {
        let dir = tempfile::tempdir().unwrap();
        let bits = "10".repeat(800);
        let path = export(&DALOS, &bits, "right", &cipher(), dir.path()).unwrap();

        let err = import(&DALOS, &path, "wrong", &cipher());
        assert!(matches!(err, Err(DalosError::WalletFormat(_))));
    }

    #[test]
    fn test_import_rejects_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.txt");
        fs::write(&path, "just one line").unwrap();

        let err = import(&DALOS, &path, "pw", &cipher());
        assert!(matches!(err, Err(DalosError::WalletFormat(_))));
    }

    #[test]
    fn test_import_rejects_tampered_public_key() {
        let dir = tempfile::tempdir().unwrap();
        let bits = "01".repeat(800);
        let path = export(&DALOS, &bits, "pw", &cipher(), dir.path()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines: Vec<String> = contents.split('\n').map(str::to_string).collect();
        lines[5] = format!("1{}", lines[5]);
        fs::write(&path, lines.join("\n")).unwrap();

        let err = import(&DALOS, &path, "pw", &cipher());
        assert!(matches!(err, Err(DalosError::WalletFormat(_))));
    }
}
