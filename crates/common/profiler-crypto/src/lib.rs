pub mod keys;
pub mod sealed;

pub use ed25519_dalek::{Signature, SigningKey, VerifyingKey};
pub use keys::{
    encode_signing_key, encode_verifying_key, generate_encoded_keypair, signing_key_from_base64,
    verifying_key_from_base64,
};
pub use sealed::{open, sign_padded, CryptoError, Result};
