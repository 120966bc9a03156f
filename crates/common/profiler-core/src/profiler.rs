use ed25519_dalek::{SigningKey, VerifyingKey};
use profiler_crypto::{
    open, sign_padded, signing_key_from_base64, verifying_key_from_base64, CryptoError,
};
use profiler_identity::OrgCode;
use tracing::debug;

use crate::config::ProfilerConfig;
use crate::error::{ProfilerError, Result, StoreError};
use crate::model::{Profile, ProfileRef};
use crate::store::{KeyKind, KeyProvider, ProfileStore};

/// Issues and validates activation and profiling tokens.
///
/// Holds no mutable state of its own; every call goes through the injected
/// store and key provider, so a `Profiler` can be shared freely behind an
/// `Arc`.
#[derive(Debug, Clone)]
pub struct Profiler<S, K> {
    pub(crate) store: S,
    pub(crate) keys: K,
    pub(crate) config: ProfilerConfig,
}

impl<S, K> Profiler<S, K>
where
    S: ProfileStore,
    K: KeyProvider,
{
    pub fn new(store: S, keys: K) -> Self {
        Self {
            store,
            keys,
            config: ProfilerConfig::default(),
        }
    }

    /// Build a profiler with an explicit configuration, rejecting invalid
    /// bounds up front.
    pub fn with_config(store: S, keys: K, config: ProfilerConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            keys,
            config,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Resolve a reference, fetching it from the store when only a code is
    /// known. A resolved reference is returned as-is.
    pub(crate) async fn resolve(&self, reference: &ProfileRef) -> Result<Profile> {
        match reference {
            ProfileRef::Resolved(profile) => Ok(profile.as_ref().clone()),
            ProfileRef::Code(code) => {
                debug!(%code, "resolving profile reference");
                Ok(self.store.find_one_by_code(code).await?)
            }
        }
    }

    /// Resolve a supervisor reference and require it to be a chief executive.
    pub(crate) async fn resolve_chief(&self, supervisor: Option<&ProfileRef>) -> Result<Profile> {
        let reference = supervisor
            .ok_or_else(|| ProfilerError::InvalidSupervisor("no supervisor".to_string()))?;
        let chief = match self.resolve(reference).await {
            Err(ProfilerError::Store(StoreError::NotFound(what))) => {
                return Err(ProfilerError::InvalidSupervisor(format!("{what} not found")))
            }
            other => other?,
        };
        if !chief.is_chief() {
            return Err(ProfilerError::InvalidSupervisor(format!(
                "supervisor is {} {}",
                chief.kind(),
                chief.role().map(|r| r.as_str()).unwrap_or("without role")
            )));
        }
        Ok(chief)
    }

    /// Resolve an executive reference and require it to be an executive.
    pub(crate) async fn resolve_executive(&self, executive: Option<&ProfileRef>) -> Result<Profile> {
        let reference = executive
            .ok_or_else(|| ProfilerError::InvalidExecutive("no executive".to_string()))?;
        let profile = match self.resolve(reference).await {
            Err(ProfilerError::Store(StoreError::NotFound(what))) => {
                return Err(ProfilerError::InvalidExecutive(format!("{what} not found")))
            }
            other => other?,
        };
        if profile.role().is_none() {
            return Err(ProfilerError::InvalidExecutive(format!(
                "referenced profile is {}",
                profile.kind()
            )));
        }
        Ok(profile)
    }

    /// Organization code of `profile`, which must be organization scoped.
    pub(crate) fn org_of<'p>(&self, profile: &'p Profile) -> Result<&'p OrgCode> {
        profile.org_code().ok_or_else(|| {
            ProfilerError::InvalidProfile(format!("{} profile has no organization", profile.kind()))
        })
    }

    /// Fail with `CrossOrganization` unless `org` sits under `ancestor`.
    pub(crate) async fn require_within(&self, org: &OrgCode, ancestor: &OrgCode) -> Result<()> {
        if self.store.is_org_part_of_org(org, ancestor).await? {
            Ok(())
        } else {
            Err(ProfilerError::CrossOrganization {
                org: org.to_string(),
                ancestor: ancestor.to_string(),
            })
        }
    }

    /// Public key for verifying a token; absent keys are `NoActivationKey`.
    pub(crate) async fn public_key(
        &self,
        kind: KeyKind,
        org: Option<&OrgCode>,
    ) -> Result<VerifyingKey> {
        let encoded = self
            .keys
            .get_pub_key(kind, org)
            .await?
            .filter(|k| !k.trim().is_empty())
            .ok_or(ProfilerError::NoActivationKey)?;
        verifying_key_from_base64(&encoded).map_err(ProfilerError::InvalidActivation)
    }

    /// Private key for issuing a token; absent keys are `NoKeys`.
    pub(crate) async fn private_key(
        &self,
        kind: KeyKind,
        org: Option<&OrgCode>,
    ) -> Result<SigningKey> {
        let encoded = self
            .keys
            .get_priv_key(kind, org)
            .await?
            .filter(|k| !k.trim().is_empty())
            .ok_or(ProfilerError::NoKeys)?;
        signing_key_from_base64(&encoded).map_err(ProfilerError::InvalidKeyMaterial)
    }

    pub(crate) fn seal(&self, plaintext: &str, key: &SigningKey) -> Result<String> {
        seal(plaintext, key, self.config.max_padding_attempts)
    }
}

/// Sign with padding alignment and map failures into the profiler taxonomy.
pub(crate) fn seal(plaintext: &str, key: &SigningKey, max_attempts: u32) -> Result<String> {
    sign_padded(plaintext, key, max_attempts).map_err(|e| match e {
        CryptoError::PaddingExhausted { attempts } => ProfilerError::TokenPadding { attempts },
        other => ProfilerError::InvalidKeyMaterial(other),
    })
}

/// Verify a token and return its plaintext with padding spaces trimmed.
pub(crate) fn unseal(token: &str, key: &VerifyingKey) -> Result<String> {
    open(token, key)
        .map(|plaintext| plaintext.trim().to_string())
        .map_err(ProfilerError::InvalidActivation)
}

/// Decode a base64 signing key handed in directly by a caller.
pub(crate) fn caller_signing_key(encoded: &str) -> Result<SigningKey> {
    if encoded.trim().is_empty() {
        return Err(ProfilerError::NoKeys);
    }
    signing_key_from_base64(encoded).map_err(ProfilerError::InvalidKeyMaterial)
}

/// Decode a base64 public key handed in directly by a caller.
pub(crate) fn caller_verifying_key(encoded: &str) -> Result<VerifyingKey> {
    if encoded.trim().is_empty() {
        return Err(ProfilerError::NoActivationKey);
    }
    verifying_key_from_base64(encoded).map_err(ProfilerError::InvalidActivation)
}
