//! Credential and fingerprint primitives.
//!
//! Passwords and recovery paraphrases are Argon2id-hashed into PHC strings;
//! the encoded form carries its own salt. Device fingerprints are SHA-256
//! digests over the client-reported user agent and screen descriptor plus a
//! per-binding random salt.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use base64::Engine;
use ed25519_dalek::SigningKey;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

pub const PARAPHRASE_LEN: usize = 5;
pub const PARAPHRASE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

const SALT_BYTES: usize = 16;

/// A freshly generated asymmetric keypair.
///
/// Callers retain only the public half; the private half is never persisted.
#[derive(Debug)]
pub struct GeneratedKeypair {
    pub public_key: String,
    pub private_key: String,
}

/// Hash a password into an Argon2id PHC string with a fresh salt.
///
/// # Errors
/// Returns an error if the hash cannot be computed.
pub fn hash_password(password: &str) -> Result<String> {
    hash_secret(password)
}

/// Verify a password against a stored PHC string.
///
/// An undecodable stored hash verifies as `false`.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    verify_secret(password, stored_hash)
}

/// Draw a recovery paraphrase: [`PARAPHRASE_LEN`] characters from the
/// alphanumeric alphabet, independently per call.
///
/// Not guaranteed unique across accounts. Deliberately short for usability;
/// it only ever gates device binding, never a session.
#[must_use]
pub fn generate_paraphrase() -> String {
    let mut raw = [0u8; PARAPHRASE_LEN];
    OsRng.fill_bytes(&mut raw);
    raw.iter()
        .map(|byte| {
            let idx = usize::from(*byte) % PARAPHRASE_ALPHABET.len();
            char::from(PARAPHRASE_ALPHABET[idx])
        })
        .collect()
}

/// Hash a recovery paraphrase for storage.
///
/// # Errors
/// Returns an error if the hash cannot be computed.
pub fn hash_paraphrase(paraphrase: &str) -> Result<String> {
    hash_secret(paraphrase)
}

/// Verify a paraphrase against a stored PHC string.
#[must_use]
pub fn verify_paraphrase(paraphrase: &str, stored_hash: &str) -> bool {
    verify_secret(paraphrase, stored_hash)
}

/// Random per-binding salt, hex-encoded for storage.
#[must_use]
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex_encode(&bytes)
}

/// One-way device fingerprint over `(userAgent, screen, salt)`.
///
/// The same user agent and screen produce a different fingerprint on every
/// binding because a fresh salt is drawn each time.
#[must_use]
pub fn device_fingerprint(user_agent: &str, screen: &str, salt: &str) -> String {
    let raw = format!("{user_agent}|{screen}|{salt}");
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    hex_encode(&hasher.finalize())
}

/// Generate an Ed25519 keypair, both halves base64-encoded.
#[must_use]
pub fn generate_keypair() -> GeneratedKeypair {
    let signing_key = SigningKey::generate(&mut OsRng);
    let verifying_key = signing_key.verifying_key();
    GeneratedKeypair {
        public_key: base64::engine::general_purpose::STANDARD.encode(verifying_key.to_bytes()),
        private_key: base64::engine::general_purpose::STANDARD.encode(signing_key.to_bytes()),
    }
}

fn hash_secret(value: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(value.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("failed to hash secret: {e}"))
}

fn verify_secret(value: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(value.as_bytes(), &parsed)
            .is_ok()
    })
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_and_verify_round_trip() {
        let hash = hash_password("Secret123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Secret123", &hash));
        assert!(!verify_password("secret123", &hash));
    }

    #[test]
    fn verify_rejects_undecodable_hash() {
        assert!(!verify_password("Secret123", "not-a-phc-string"));
    }

    #[test]
    fn password_hashes_are_salted() {
        let first = hash_password("Secret123").unwrap();
        let second = hash_password("Secret123").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("Secret123", &first));
        assert!(verify_password("Secret123", &second));
    }

    #[test]
    fn paraphrase_uses_defined_alphabet() {
        let paraphrase = generate_paraphrase();
        assert_eq!(paraphrase.len(), PARAPHRASE_LEN);
        assert!(paraphrase
            .bytes()
            .all(|byte| PARAPHRASE_ALPHABET.contains(&byte)));
    }

    #[test]
    fn paraphrase_hash_and_verify_round_trip() {
        let paraphrase = generate_paraphrase();
        let hash = hash_paraphrase(&paraphrase).unwrap();
        assert!(verify_paraphrase(&paraphrase, &hash));
        assert!(!verify_paraphrase("aB7zK", &hash) || paraphrase == "aB7zK");
    }

    #[test]
    fn salt_is_hex_and_unique() {
        let first = generate_salt();
        let second = generate_salt();
        assert_eq!(first.len(), SALT_BYTES * 2);
        assert!(first.bytes().all(|byte| byte.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }

    #[test]
    fn fingerprint_is_deterministic_per_salt() {
        let first = device_fingerprint("UA-X", "1920x1080", "00ff");
        let second = device_fingerprint("UA-X", "1920x1080", "00ff");
        let other_salt = device_fingerprint("UA-X", "1920x1080", "00fe");
        assert_eq!(first, second);
        assert_ne!(first, other_salt);
        // SHA-256 hex digest.
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn fingerprint_separates_fields() {
        // The delimiter keeps (ab, c) and (a, bc) apart.
        let joined_left = device_fingerprint("ab", "c", "s");
        let joined_right = device_fingerprint("a", "bc", "s");
        assert_ne!(joined_left, joined_right);
    }

    #[test]
    fn keypair_halves_decode_to_32_bytes() {
        let keypair = generate_keypair();
        let decode = |value: &str| {
            base64::engine::general_purpose::STANDARD
                .decode(value)
                .unwrap()
        };
        assert_eq!(decode(&keypair.public_key).len(), 32);
        assert_eq!(decode(&keypair.private_key).len(), 32);
    }
}
