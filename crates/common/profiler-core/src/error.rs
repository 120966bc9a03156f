use profiler_crypto::CryptoError;
use profiler_identity::{CodeFormatError, IdentityError};
use thiserror::Error;

use crate::grammar::TokenKind;

/// Errors reported by a [`crate::ProfileStore`] or [`crate::KeyProvider`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ProfilerError {
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("unknown profile: profile has no id")]
    UnknownProfile,

    #[error("permission denied")]
    PermissionDenied,

    #[error("invalid activation: {0}")]
    InvalidActivation(#[source] CryptoError),

    #[error("invalid supervisor: {0}")]
    InvalidSupervisor(String),

    #[error("invalid executive: {0}")]
    InvalidExecutive(String),

    #[error("no activation public key configured")]
    NoActivationKey,

    #[error("no signing keys configured")]
    NoKeys,

    #[error("cannot activate across organizations: {org} is not part of {ancestor}")]
    CrossOrganization { org: String, ancestor: String },

    #[error(transparent)]
    CodeFormat(#[from] CodeFormatError),

    #[error("invalid identity: {0}")]
    Identity(#[from] IdentityError),

    #[error("plaintext does not match the {kind} grammar")]
    TokenFormat { kind: TokenKind },

    #[error("signature never aligned to base64 padding after {attempts} attempts")]
    TokenPadding { attempts: u32 },

    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(#[source] CryptoError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ProfilerError {
    /// Short machine-readable tag.
    pub fn tag(&self) -> &'static str {
        match self {
            ProfilerError::InvalidProfile(_) => "invalid-profile",
            ProfilerError::UnknownProfile => "unknown-profile",
            ProfilerError::PermissionDenied => "permission-denied",
            ProfilerError::InvalidActivation(_) => "invalid-activation",
            ProfilerError::InvalidSupervisor(_) => "invalid-supervisor",
            ProfilerError::InvalidExecutive(_) => "invalid-executive",
            ProfilerError::NoActivationKey => "no-activation-key",
            ProfilerError::NoKeys => "no-keys",
            ProfilerError::CrossOrganization { .. } => "cross-organization",
            ProfilerError::CodeFormat(_) => "code-format",
            ProfilerError::Identity(_) => "invalid-identity",
            ProfilerError::TokenFormat { .. } => "token-format",
            ProfilerError::TokenPadding { .. } => "token-padding",
            ProfilerError::InvalidKeyMaterial(_) => "invalid-key-material",
            ProfilerError::Store(StoreError::NotFound(_)) => "not-found",
            ProfilerError::Store(StoreError::Backend(_)) => "store-error",
        }
    }

    /// Numeric status for callers that surface errors over a transport.
    /// `None` marks local precondition failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProfilerError::InvalidProfile(_) | ProfilerError::CrossOrganization { .. } => Some(400),
            ProfilerError::PermissionDenied
            | ProfilerError::InvalidActivation(_)
            | ProfilerError::InvalidSupervisor(_)
            | ProfilerError::InvalidExecutive(_)
            | ProfilerError::CodeFormat(_) => Some(403),
            ProfilerError::Store(StoreError::NotFound(_)) => Some(404),
            ProfilerError::UnknownProfile | ProfilerError::NoActivationKey => Some(417),
            ProfilerError::NoKeys => Some(424),
            ProfilerError::Identity(_)
            | ProfilerError::TokenFormat { .. }
            | ProfilerError::TokenPadding { .. }
            | ProfilerError::InvalidKeyMaterial(_)
            | ProfilerError::Store(StoreError::Backend(_)) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProfilerError>;
