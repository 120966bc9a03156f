use base64::{engine::general_purpose::STANDARD, Engine};
use ed25519_dalek::{
    Signature, SignatureError as Ed25519SignatureError, Signer, SigningKey, VerifyingKey,
    SIGNATURE_LENGTH,
};
use signature::Verifier;
use thiserror::Error;

/// Error types for signed token operations
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Base64 encoding/decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid key length: expected {expected}, found {found_len} bytes")]
    InvalidKeyLength { expected: &'static str, found_len: usize },

    #[error("Invalid key material: {0}")]
    InvalidKey(Ed25519SignatureError),

    #[error("Signed token too short: {found_len} bytes, signature alone is 64")]
    TokenTooShort { found_len: usize },

    #[error("Cryptographic signature verification failed: {0}")]
    CryptoVerification(#[from] Ed25519SignatureError),

    #[error("Signed message is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Encoded token did not end in base64 padding after {attempts} attempts")]
    PaddingExhausted { attempts: u32 },
}

/// Result type for signed token operations
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Sign `plaintext` and return `base64(signature || plaintext)`.
///
/// Encodings that do not end in `=` are rejected: one space is appended to
/// the plaintext and it is signed again, at most `max_attempts` times.
/// Readers trim the recovered plaintext, so the trailing spaces are inert.
pub fn sign_padded(plaintext: &str, key: &SigningKey, max_attempts: u32) -> Result<String> {
    let mut message = plaintext.to_owned();
    for attempt in 1..=max_attempts {
        let signature = key.sign(message.as_bytes());

        let mut combined = Vec::with_capacity(SIGNATURE_LENGTH + message.len());
        combined.extend_from_slice(&signature.to_bytes());
        combined.extend_from_slice(message.as_bytes());

        let encoded = STANDARD.encode(&combined);
        if encoded.ends_with('=') {
            tracing::trace!(attempt, "signed token aligned to base64 padding");
            return Ok(encoded);
        }
        message.push(' ');
    }
    Err(CryptoError::PaddingExhausted {
        attempts: max_attempts,
    })
}

/// Verify a token produced by [`sign_padded`] and return the signed message.
///
/// The message is returned exactly as signed, padding spaces included.
pub fn open(token: &str, key: &VerifyingKey) -> Result<String> {
    let combined = STANDARD.decode(token.trim())?;
    if combined.len() < SIGNATURE_LENGTH {
        return Err(CryptoError::TokenTooShort {
            found_len: combined.len(),
        });
    }
    let (signature_bytes, message) = combined.split_at(SIGNATURE_LENGTH);
    let signature_array: &[u8; SIGNATURE_LENGTH] = signature_bytes
        .try_into()
        .map_err(|_| CryptoError::TokenTooShort {
            found_len: combined.len(),
        })?;
    let signature = Signature::from_bytes(signature_array);

    key.verify(message, &signature)?;
    Ok(String::from_utf8(message.to_vec())?)
}
