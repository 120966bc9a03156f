//! Acceptance of activation tokens along the trust chain.
//!
//! Which key verifies a token depends on the profile:
//!
//! | profile              | verifying key                      |
//! |----------------------|------------------------------------|
//! | admin                | admin (global)                     |
//! | chief executive      | admin (global)                     |
//! | subordinate executive| chief key of the chief's org       |
//! | encoder              | encoder key of the chief's org     |

use profiler_identity::ProfileCode;
use tracing::{debug, info, warn};

use crate::error::{ProfilerError, Result};
use crate::grammar::{
    AdminActivation, ChiefActivation, EncoderActivation, ExecutiveActivation, TokenGrammar,
};
use crate::model::{Profile, ProfileDetails, ProfileRef, Role};
use crate::profiler::{unseal, Profiler};
use crate::store::{KeyKind, KeyProvider, ProfileStore};

/// What an accepted activation grants beyond the activation itself.
struct Granted {
    code: ProfileCode,
    role: Option<Role>,
}

fn denied_unless(matches: bool) -> Result<()> {
    if matches {
        Ok(())
    } else {
        Err(ProfilerError::PermissionDenied)
    }
}

impl<S, K> Profiler<S, K>
where
    S: ProfileStore,
    K: KeyProvider,
{
    /// Validate `activation` for `profile` and persist the activated profile.
    ///
    /// On success the profile code is refreshed from the identity, the token
    /// is stored as the profile's activation and, for subordinate executives,
    /// the role is taken from the token.
    pub async fn validate_profile_activation(
        &self,
        activation: &str,
        mut profile: Profile,
    ) -> Result<Profile> {
        let kind = profile.kind();
        debug!(%kind, id = ?profile.id, "validating activation");

        let granted = match self.check_activation(activation, &profile).await {
            Ok(granted) => granted,
            Err(err) => {
                warn!(%kind, id = ?profile.id, tag = err.tag(), "activation rejected");
                return Err(err);
            }
        };

        if let (Some(new_role), ProfileDetails::Executive { role, .. }) =
            (granted.role, &mut profile.details)
        {
            *role = new_role;
        }
        profile.code = Some(granted.code);
        profile.activation = Some(activation.to_string());

        let id = profile.id.clone().ok_or(ProfilerError::UnknownProfile)?;
        let stored = self.store.update(&id, profile).await?;
        info!(%kind, %id, role = ?stored.role(), "activation accepted");
        Ok(stored)
    }

    async fn check_activation(&self, activation: &str, profile: &Profile) -> Result<Granted> {
        match &profile.details {
            ProfileDetails::Admin => self.validate_admin_activation(activation, profile).await,
            ProfileDetails::Executive {
                role: Role::Chief,
                supervisor: None,
                ..
            } => self.validate_chief_activation(activation, profile).await,
            ProfileDetails::Executive {
                role, supervisor, ..
            } if *role != Role::Chief => {
                self.validate_executive_activation(activation, profile, supervisor.as_ref())
                    .await
            }
            ProfileDetails::Encoder { executive, .. } => {
                self.validate_encoder_activation(activation, profile, executive.as_ref())
                    .await
            }
            ProfileDetails::Executive { .. } => Err(ProfilerError::InvalidProfile(
                "chief executive cannot have a supervisor".to_string(),
            )),
        }
    }

    async fn validate_admin_activation(&self, activation: &str, profile: &Profile) -> Result<Granted> {
        let key = self.public_key(KeyKind::Admin, None).await?;
        let plaintext = unseal(activation, &key).map_err(|_| ProfilerError::PermissionDenied)?;
        let code = profile.fresh_code()?;

        let claims =
            AdminActivation::parse(&plaintext).map_err(|_| ProfilerError::PermissionDenied)?;
        denied_unless(claims.code == code)?;
        Ok(Granted { code, role: None })
    }

    async fn validate_chief_activation(&self, activation: &str, profile: &Profile) -> Result<Granted> {
        let org = self.org_of(profile)?;
        let key = self.public_key(KeyKind::Admin, None).await?;
        let plaintext = unseal(activation, &key)?;
        let code = profile.fresh_code()?;

        let claims =
            ChiefActivation::parse(&plaintext).map_err(|_| ProfilerError::PermissionDenied)?;
        denied_unless(
            &claims.org == org && claims.code == code && claims.role == Role::Chief.as_str(),
        )?;
        Ok(Granted { code, role: None })
    }

    async fn validate_executive_activation(
        &self,
        activation: &str,
        profile: &Profile,
        supervisor: Option<&ProfileRef>,
    ) -> Result<Granted> {
        let org = self.org_of(profile)?;
        let chief = self.resolve_chief(supervisor).await?;
        let chief_org = self.org_of(&chief)?;
        self.require_within(org, chief_org).await?;

        let key = self.public_key(KeyKind::Chief, Some(chief_org)).await?;
        let plaintext = unseal(activation, &key)?;
        let code = profile.fresh_code()?;
        let supervisor_code = match supervisor {
            Some(reference) => reference.code()?,
            None => chief.fresh_code()?,
        };

        let claims =
            ExecutiveActivation::parse(&plaintext).map_err(|_| ProfilerError::PermissionDenied)?;
        denied_unless(&claims.org == org && claims.code == code && claims.chief == supervisor_code)?;

        let role = Role::from_delegated(&claims.role);
        debug!(decoded = %claims.role, granted = %role, "normalized delegated role");
        Ok(Granted {
            code,
            role: Some(role),
        })
    }

    async fn validate_encoder_activation(
        &self,
        activation: &str,
        profile: &Profile,
        executive: Option<&ProfileRef>,
    ) -> Result<Granted> {
        let org = self.org_of(profile)?;
        let head = self.resolve_executive(executive).await?;
        let head_org = self.org_of(&head)?;
        if head_org != org {
            return Err(ProfilerError::InvalidExecutive(format!(
                "executive belongs to {head_org}, encoder to {org}"
            )));
        }

        let chief = self.resolve_chief(head.supervisor()).await?;
        let chief_org = self.org_of(&chief)?;
        self.require_within(org, chief_org).await?;

        let key = self.public_key(KeyKind::Encoder, Some(chief_org)).await?;
        let plaintext = unseal(activation, &key)?;
        let code = profile.fresh_code()?;
        let executive_code = match executive {
            Some(reference) => reference.code()?,
            None => head.fresh_code()?,
        };

        let claims =
            EncoderActivation::parse(&plaintext).map_err(|_| ProfilerError::PermissionDenied)?;
        denied_unless(&claims.org == org && claims.code == code && claims.executive == executive_code)?;
        Ok(Granted { code, role: None })
    }
}
