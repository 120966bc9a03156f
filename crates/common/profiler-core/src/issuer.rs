use profiler_identity::OrgCode;
use tracing::{debug, info};

use crate::error::{ProfilerError, Result};
use crate::grammar::{
    AdminActivation, ChiefActivation, EncoderActivation, ExecutiveActivation, TokenGrammar,
};
use crate::model::{ProfileDetails, Role};
use crate::profiler::{caller_signing_key, Profiler};
use crate::store::{KeyKind, KeyProvider, ProfileStore};

impl<S, K> Profiler<S, K>
where
    S: ProfileStore,
    K: KeyProvider,
{
    /// Issue an admin activation, signed with the admin's own key.
    pub async fn get_admin_activation(&self, profile_id: &str, admin_key: &str) -> Result<String> {
        let profile = self.store.find_one(None, profile_id).await?;
        if !matches!(profile.details, ProfileDetails::Admin) {
            return Err(ProfilerError::InvalidProfile(format!(
                "{profile_id} is {}, expected admin",
                profile.kind()
            )));
        }
        let key = caller_signing_key(admin_key)?;

        let claims = AdminActivation {
            code: profile.fresh_code()?,
        };
        let token = self.seal(&claims.format(), &key)?;
        info!(%profile_id, "issued admin activation");
        Ok(token)
    }

    /// Issue a chief activation for `org`, signed with the admin key.
    pub async fn get_chief_activation(
        &self,
        org: &OrgCode,
        profile_id: &str,
        admin_key: &str,
    ) -> Result<String> {
        let profile = self.store.find_one(Some(org), profile_id).await?;
        match &profile.details {
            ProfileDetails::Executive {
                role: Role::Chief,
                supervisor: None,
                ..
            } => {}
            _ => {
                return Err(ProfilerError::InvalidProfile(format!(
                    "{profile_id} is not a chief executive without supervisor"
                )))
            }
        }
        let profile_org = self.org_of(&profile)?;
        if profile_org != org {
            return Err(ProfilerError::CrossOrganization {
                org: profile_org.to_string(),
                ancestor: org.to_string(),
            });
        }
        let key = caller_signing_key(admin_key)?;

        let claims = ChiefActivation {
            org: org.clone(),
            code: profile.fresh_code()?,
            role: Role::Chief.as_str().to_string(),
        };
        let token = self.seal(&claims.format(), &key)?;
        info!(%org, %profile_id, "issued chief activation");
        Ok(token)
    }

    /// Issue a subordinate executive activation signed with the chief key
    /// of `chief_org`.
    pub async fn get_executive_activation(
        &self,
        org: &OrgCode,
        profile_id: &str,
        chief_org: &OrgCode,
    ) -> Result<String> {
        let profile = self.store.find_one(Some(org), profile_id).await?;
        let (role, supervisor) = match &profile.details {
            ProfileDetails::Executive {
                role,
                supervisor: Some(supervisor),
                ..
            } if *role != Role::Chief => (*role, supervisor),
            _ => {
                return Err(ProfilerError::InvalidProfile(format!(
                    "{profile_id} is not a subordinate executive with a supervisor"
                )))
            }
        };
        let chief = self.resolve_chief(Some(supervisor)).await?;

        let profile_org = self.org_of(&profile)?;
        let supervisor_org = self.org_of(&chief)?;
        if profile_org != org || supervisor_org != chief_org {
            return Err(ProfilerError::CrossOrganization {
                org: profile_org.to_string(),
                ancestor: chief_org.to_string(),
            });
        }
        self.require_within(org, chief_org).await?;

        let key = self.private_key(KeyKind::Chief, Some(chief_org)).await?;
        debug!(%org, %profile_id, %chief_org, "signing executive activation");

        let claims = ExecutiveActivation {
            org: org.clone(),
            code: profile.fresh_code()?,
            chief: supervisor.code()?,
            role: role.as_str().to_string(),
        };
        let token = self.seal(&claims.format(), &key)?;
        info!(%org, %profile_id, %role, "issued executive activation");
        Ok(token)
    }

    /// Issue an encoder activation signed with the encoder key of the chief
    /// that supervises the encoder's executive.
    ///
    /// Applies the same organization checks as encoder validation.
    pub async fn get_encoder_activation(
        &self,
        org: &OrgCode,
        profile_id: &str,
        executive_org: &OrgCode,
    ) -> Result<String> {
        let profile = self.store.find_one(Some(org), profile_id).await?;
        let executive = match &profile.details {
            ProfileDetails::Encoder { executive, .. } => executive.as_ref(),
            _ => {
                return Err(ProfilerError::InvalidProfile(format!(
                    "{profile_id} is {}, expected encoder",
                    profile.kind()
                )))
            }
        };
        let head = self.resolve_executive(executive).await?;

        let profile_org = self.org_of(&profile)?;
        if profile_org != org {
            return Err(ProfilerError::CrossOrganization {
                org: profile_org.to_string(),
                ancestor: org.to_string(),
            });
        }
        let head_org = self.org_of(&head)?;
        if head_org != profile_org {
            return Err(ProfilerError::InvalidExecutive(format!(
                "executive belongs to {head_org}, encoder to {profile_org}"
            )));
        }
        self.require_within(profile_org, executive_org).await?;

        let chief = self.resolve_chief(head.supervisor()).await?;
        let chief_org = self.org_of(&chief)?;
        self.require_within(profile_org, chief_org).await?;
        let key = self.private_key(KeyKind::Encoder, Some(chief_org)).await?;
        debug!(%org, %profile_id, %chief_org, "signing encoder activation");

        let executive_code = match executive {
            Some(reference) => reference.code()?,
            None => head.fresh_code()?,
        };
        let claims = EncoderActivation {
            org: org.clone(),
            code: profile.fresh_code()?,
            executive: executive_code,
        };
        let token = self.seal(&claims.format(), &key)?;
        info!(%org, %profile_id, "issued encoder activation");
        Ok(token)
    }
}
