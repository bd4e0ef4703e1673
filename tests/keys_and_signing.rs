//! End-to-end key, address, wallet and signature scenarios
//!
//! Acceptance scenarios on the real DALOS curve: clamping structure,
//! deterministic seed derivation, public-key round trips, address
//! prefixes, and the full generate → export → import → sign → verify
//! pipeline.

use dalos_crypto::address::{derive_address, matrix_contains, AddressKind};
use dalos_crypto::cipher::Aes256BitCipher;
use dalos_crypto::curve::DALOS;
use dalos_crypto::keys::{affine_to_public_key, public_key_to_affine};
use dalos_crypto::wallet;

#[test]
fn test_keypair_from_all_zero_bitstring() {
    let bits = "0".repeat(1600);
    let scalar = DALOS.generate_scalar(&bits).expect("valid bit string");

    // Clamped form: leading 1, the 1600-bit middle, the cofactor tail.
    let binary = scalar.to_str_radix(2);
    assert!(binary.starts_with('1'));
    assert!(binary.ends_with("00"));
    assert_eq!(&binary[1..1601], bits.as_str());

    let keypair = DALOS.scalar_to_keys(&scalar).expect("keypair");
    let recovered = DALOS
        .validate_private_key(&keypair.secret, false)
        .expect("clamped key must validate");
    assert_eq!(recovered, bits);
}

#[test]
fn test_sign_hello_and_reject_hellp() {
    let scalar = DALOS.generate_scalar(&"0011".repeat(400)).unwrap();
    let keypair = DALOS.scalar_to_keys(&scalar).unwrap();

    let signature = DALOS.schnorr_sign(&keypair, "hello").unwrap();
    assert!(DALOS
        .schnorr_verify(&signature, "hello", &keypair.public)
        .unwrap());
    assert!(!DALOS
        .schnorr_verify(&signature, "hellp", &keypair.public)
        .unwrap());
}

#[test]
fn test_seed_word_derivation_is_reproducible() {
    let words = ["one", "two", "three", "four", "five"];
    let first = DALOS.seed_words_to_bitstring(&words);
    let second = DALOS.seed_words_to_bitstring(&words);

    assert_eq!(first, second);
    assert_eq!(first.len(), 1600);
    assert!(first.bytes().all(|b| b == b'0' || b == b'1'));
}

#[test]
fn test_address_prefixes() {
    let scalar = DALOS.generate_scalar(&"01".repeat(800)).unwrap();
    let public = DALOS.scalar_to_public_key(&scalar).unwrap();

    let standard = derive_address(&public, AddressKind::Standard).unwrap();
    let smart = derive_address(&public, AddressKind::Smart).unwrap();

    assert!(standard.starts_with("Ѻ."));
    assert!(smart.starts_with("₳."));
    assert_eq!(standard.chars().count(), 162);
    assert!(standard.chars().skip(2).all(matrix_contains));
}

#[test]
fn test_public_key_roundtrip() {
    let scalar = DALOS.generate_scalar(&"1100".repeat(400)).unwrap();
    let point = DALOS.scalar_mul_base(&scalar).unwrap();
    let affine = DALOS.extended_to_affine(&point).unwrap();

    let encoded = affine_to_public_key(&affine);
    let decoded = public_key_to_affine(&encoded).unwrap();
    assert_eq!(decoded, affine);
}

#[test]
fn test_full_wallet_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let bits = DALOS.random_bitstring();
    let cipher = Aes256BitCipher::new(DALOS.s as usize);

    let path = wallet::export(&DALOS, &bits, "correct horse", &cipher, dir.path()).unwrap();
    let keypair = wallet::import(&DALOS, &path, "correct horse", &cipher).unwrap();

    // The imported pair must be usable for signing straight away.
    let signature = DALOS.schnorr_sign(&keypair, "imported and signing").unwrap();
    assert!(DALOS
        .schnorr_verify(&signature, "imported and signing", &keypair.public)
        .unwrap());

    // And the recovered bit string must be the one we started from.
    let recovered = DALOS.validate_private_key(&keypair.secret, false).unwrap();
    assert_eq!(recovered, bits);
}
