//! Account addresses and the 16×16 character matrix
//!
//! A DALOS address is 160 runes drawn from a fixed 256-character matrix,
//! derived from the public key through a seven-fold Blake3 chain at 160
//! bytes per round; each digest byte `b` selects the matrix cell
//! `(b / 16, b % 16)`. A one-rune prefix and a dot distinguish standard
//! accounts (`Ѻ.`) from smart accounts (`₳.`).

use crate::base49;
use crate::keys::seven_fold_blake3;
use crate::{DalosError, DalosResult};

/// The address alphabet: digits, currency signs, Latin, Latin-extended,
/// Greek and Cyrillic letters, 256 runes in a fixed 16×16 grid.
pub const CHARACTER_MATRIX: [[char; 16]; 16] = [
    // Digits and currency signs
    ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'Ѻ', '₿', '$', '¢', '€', '£'],
    ['¥', '₱', '₳', '∇', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L'],
    // Basic Latin
    ['M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b'],
    ['c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r'],
    // Latin extended, capitals
    ['s', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'Æ', 'Œ', 'Á', 'Ă', 'Â', 'Ä', 'À', 'Ą'],
    ['Å', 'Ã', 'Ć', 'Č', 'Ç', 'Ď', 'Đ', 'É', 'Ě', 'Ê', 'Ë', 'È', 'Ę', 'Ğ', 'Í', 'Î'],
    ['Ï', 'Ì', 'Ł', 'Ń', 'Ñ', 'Ó', 'Ô', 'Ö', 'Ò', 'Ø', 'Õ', 'Ř', 'Ś', 'Š', 'Ş', 'Ș'],
    ['Þ', 'Ť', 'Ț', 'Ú', 'Û', 'Ü', 'Ù', 'Ů', 'Ý', 'Ÿ', 'Ź', 'Ž', 'Ż', 'æ', 'œ', 'á'],
    // Latin extended, small
    ['ă', 'â', 'ä', 'à', 'ą', 'å', 'ã', 'ć', 'č', 'ç', 'ď', 'đ', 'é', 'ě', 'ê', 'ë'],
    ['è', 'ę', 'ğ', 'í', 'î', 'ï', 'ì', 'ł', 'ń', 'ñ', 'ó', 'ô', 'ö', 'ò', 'ø', 'õ'],
    ['ř', 'ś', 'š', 'ş', 'ș', 'þ', 'ť', 'ț', 'ú', 'û', 'ü', 'ù', 'ů', 'ý', 'ÿ', 'ź'],
    // Greek
    ['ž', 'ż', 'ß', 'Γ', 'Δ', 'Θ', 'Λ', 'Ξ', 'Π', 'Σ', 'Φ', 'Ψ', 'Ω', 'α', 'β', 'γ'],
    ['δ', 'ε', 'ζ', 'η', 'θ', 'ι', 'κ', 'λ', 'μ', 'ν', 'ξ', 'π', 'ρ', 'σ', 'ς', 'τ'],
    // Cyrillic
    ['φ', 'χ', 'ψ', 'ω', 'Б', 'Д', 'Ж', 'З', 'И', 'Й', 'Л', 'П', 'У', 'Ц', 'Ч', 'Ш'],
    ['Щ', 'Ъ', 'Ы', 'Ь', 'Э', 'Ю', 'Я', 'б', 'в', 'д', 'ж', 'з', 'и', 'й', 'к', 'л'],
    ['м', 'н', 'п', 'т', 'у', 'ф', 'ц', 'ч', 'ш', 'щ', 'ъ', 'ы', 'ь', 'э', 'ю', 'я'],
];

/// Rune prefixing standard account addresses (the round-omega currency
/// sign, matrix cell `[0][10]`).
pub const STANDARD_PREFIX: char = CHARACTER_MATRIX[0][10];

/// Rune prefixing smart account addresses (the austral currency sign,
/// matrix cell `[1][2]`).
pub const SMART_PREFIX: char = CHARACTER_MATRIX[1][2];

/// Number of runes in an address body, one per digest byte.
pub const ADDRESS_BODY_RUNES: usize = 160;

/// The two account flavors an address can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressKind {
    /// A standard account, prefixed `Ѻ.`.
    Standard,
    /// A smart account, prefixed `₳.`.
    Smart,
}

impl AddressKind {
    fn prefix(self) -> char {
        match self {
            AddressKind::Standard => STANDARD_PREFIX,
            AddressKind::Smart => SMART_PREFIX,
        }
    }
}

/// Derive an account address from a public key string.
///
/// The public key's base-49 body is decoded, its decimal digits are fed
/// through the seven-fold Blake3 chain at 160 bytes per round, and every
/// digest byte is mapped through [`CHARACTER_MATRIX`]. Deterministic:
/// one public key, one address per kind.
pub fn derive_address(public_key: &str, kind: AddressKind) -> DalosResult<String> {
    let (_, body) = public_key
        .split_once('.')
        .ok_or(DalosError::InvalidPublicKey)?;
    let n = base49::decode(body).ok_or(DalosError::InvalidPublicKey)?;

    let digest = seven_fold_blake3(n.to_str_radix(10).as_bytes(), ADDRESS_BODY_RUNES);
    let mut address = String::with_capacity(ADDRESS_BODY_RUNES + 2);
    address.push(kind.prefix());
    address.push('.');
    for &byte in &digest {
        address.push(CHARACTER_MATRIX[(byte / 16) as usize][(byte % 16) as usize]);
    }
    Ok(address)
}

/// Whether a rune belongs to the address alphabet.
pub fn matrix_contains(c: char) -> bool {
    CHARACTER_MATRIX.iter().any(|row| row.contains(&c))
}
