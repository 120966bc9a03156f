//! Base64 key material as handed out by key providers.
//!
//! Signing keys use the 64 byte `seed || public key` layout; a bare 32 byte
//! seed is accepted as well. Verifying keys are the raw 32 byte public key.

use base64::{engine::general_purpose::STANDARD, Engine};
use ed25519_dalek::{
    SigningKey, VerifyingKey, KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH,
};
use rand_core::CryptoRngCore;

use crate::sealed::{CryptoError, Result};

pub fn signing_key_from_base64(encoded: &str) -> Result<SigningKey> {
    let bytes = STANDARD.decode(encoded.trim())?;
    match bytes.len() {
        KEYPAIR_LENGTH => {
            let mut keypair = [0u8; KEYPAIR_LENGTH];
            keypair.copy_from_slice(&bytes);
            SigningKey::from_keypair_bytes(&keypair).map_err(CryptoError::InvalidKey)
        }
        SECRET_KEY_LENGTH => {
            let mut seed = [0u8; SECRET_KEY_LENGTH];
            seed.copy_from_slice(&bytes);
            Ok(SigningKey::from_bytes(&seed))
        }
        found_len => Err(CryptoError::InvalidKeyLength {
            expected: "32 or 64",
            found_len,
        }),
    }
}

pub fn verifying_key_from_base64(encoded: &str) -> Result<VerifyingKey> {
    let bytes = STANDARD.decode(encoded.trim())?;
    let key: &[u8; PUBLIC_KEY_LENGTH] =
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: "32",
                found_len: bytes.len(),
            })?;
    VerifyingKey::from_bytes(key).map_err(CryptoError::InvalidKey)
}

/// Encode a signing key in the 64 byte keypair layout.
pub fn encode_signing_key(key: &SigningKey) -> String {
    STANDARD.encode(key.to_keypair_bytes())
}

pub fn encode_verifying_key(key: &VerifyingKey) -> String {
    STANDARD.encode(key.to_bytes())
}

/// Generate a fresh keypair and return it as `(private, public)` base64,
/// ready to hand to a key provider.
pub fn generate_encoded_keypair<R: CryptoRngCore + ?Sized>(rng: &mut R) -> (String, String) {
    let key = SigningKey::generate(rng);
    (encode_signing_key(&key), encode_verifying_key(&key.verifying_key()))
}
