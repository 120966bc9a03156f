use profiler_identity::{OrgCode, ProfileCode};
use std::fmt::Display;
use tracing::{debug, info};

use crate::error::{ProfilerError, Result};
use crate::grammar::{ProfilingRecord, TokenGrammar};
use crate::model::{ProfileDetails, ProfileRef};
use crate::profiler::{caller_verifying_key, unseal, Profiler};
use crate::store::{KeyKind, KeyProvider, ProfileStore};

/// Verify a profiling endorsement with `public_key` and decode its
/// provenance chain. Nothing is cross-checked against a store.
pub fn validate_profile(token: &str, public_key: &str) -> Result<ProfilingRecord> {
    let key = caller_verifying_key(public_key)?;
    decode_record(&unseal(token, &key)?)
}

fn decode_record(plaintext: &str) -> Result<ProfilingRecord> {
    ProfilingRecord::parse(plaintext).map_err(|_| {
        ProfilerError::InvalidProfile("plaintext is not a profiling endorsement".to_string())
    })
}

impl<S, K> Profiler<S, K>
where
    S: ProfileStore,
    K: KeyProvider,
{
    /// Endorse content produced by `encoder_code` for `subject_code`.
    ///
    /// The token records the encoder's organization and the full chain
    /// subject → encoder → executive → chief, and is signed with the encoder
    /// key of the chief's organization.
    pub async fn generate_profile(
        &self,
        subject_code: &ProfileCode,
        encoder_code: &ProfileCode,
        extra: impl Display,
    ) -> Result<String> {
        let extra = extra.to_string();
        let subject = self.store.find_one_by_code(subject_code).await?;
        let encoder = self.store.find_one_by_code(encoder_code).await?;

        let executive = match &encoder.details {
            ProfileDetails::Encoder {
                executive: Some(ProfileRef::Resolved(executive)),
                ..
            } => executive.as_ref(),
            _ => {
                return Err(ProfilerError::InvalidProfile(format!(
                    "{encoder_code} is not an encoder with a resolved executive"
                )))
            }
        };
        let organization = self.org_of(&encoder)?.clone();

        let chief = self.resolve_chief(executive.supervisor()).await?;
        let chief_org = self.org_of(&chief)?;
        let key = self.private_key(KeyKind::Encoder, Some(chief_org)).await?;
        debug!(%subject_code, %encoder_code, %chief_org, "signing profiling endorsement");

        let record = ProfilingRecord {
            organization,
            code: subject.fresh_code()?,
            encoder: encoder.fresh_code()?,
            executive: executive.fresh_code()?,
            chief: chief.fresh_code()?,
            role: subject.kind().as_str().to_string(),
            extra,
        };
        let token = self.seal(&record.format(), &key)?;
        info!(%subject_code, %encoder_code, "issued profiling endorsement");
        Ok(token)
    }

    pub fn validate_profile(&self, token: &str, public_key: &str) -> Result<ProfilingRecord> {
        validate_profile(token, public_key)
    }

    /// Validate an endorsement against the encoder key of `org`.
    pub async fn validate_profile_for_org(
        &self,
        token: &str,
        org: &OrgCode,
    ) -> Result<ProfilingRecord> {
        let key = self.public_key(KeyKind::Encoder, Some(org)).await?;
        decode_record(&unseal(token, &key)?)
    }

    /// Sign free-form `info` with the encoder key of `chief_org`.
    pub async fn encode_info(&self, info: &str, chief_org: &OrgCode) -> Result<String> {
        let key = self.private_key(KeyKind::Encoder, Some(chief_org)).await?;
        self.seal(info, &key)
    }

    /// Verify a token produced by [`Self::encode_info`].
    ///
    /// Without an explicit `public_key` the encoder key of `org` is used.
    /// The plaintext is returned untrimmed, padding spaces included.
    pub async fn decode_info(
        &self,
        token: &str,
        public_key: Option<&str>,
        org: Option<&OrgCode>,
    ) -> Result<String> {
        let key = match public_key.filter(|k| !k.trim().is_empty()) {
            Some(encoded) => caller_verifying_key(encoded)?,
            None => self.public_key(KeyKind::Encoder, org).await?,
        };
        profiler_crypto::open(token, &key).map_err(ProfilerError::InvalidActivation)
    }
}
