//! Profiles, organizations and the references between them.
//!
//! `supervisor`, `executive` and `organization` may arrive either as a code
//! or as an already resolved object. Both shapes are kept as explicit
//! variants; resolution happens on demand through a [`crate::ProfileStore`].
//! A resolved object is a snapshot and never owns the referenced record.

use profiler_identity::{encode, Identity, IdentityError, OrgCode, ProfileCode, ProfileKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Executive role.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Chief,
    HeadEncoder,
    Manager,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Chief => "chief",
            Role::HeadEncoder => "head-encoder",
            Role::Manager => "manager",
        }
    }

    /// Role granted to a subordinate executive from the role field of its
    /// activation. Chief can only be granted by the admin key, so any
    /// spelling of `chief` here maps to `Manager`.
    pub fn from_delegated(decoded: &str) -> Role {
        if decoded.eq_ignore_ascii_case(Role::HeadEncoder.as_str()) {
            Role::HeadEncoder
        } else {
            Role::Manager
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    pub code: OrgCode,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_org_code: Option<OrgCode>,
}

impl Organization {
    pub fn new(name: impl Into<String>, code: OrgCode, parent_org_code: Option<OrgCode>) -> Self {
        Self {
            name: name.into(),
            code,
            description: String::new(),
            parent_org_code,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrgRef {
    Code(OrgCode),
    Resolved(Organization),
}

impl OrgRef {
    pub fn code(&self) -> &OrgCode {
        match self {
            OrgRef::Code(code) => code,
            OrgRef::Resolved(org) => &org.code,
        }
    }
}

impl From<OrgCode> for OrgRef {
    fn from(code: OrgCode) -> Self {
        OrgRef::Code(code)
    }
}

impl From<Organization> for OrgRef {
    fn from(org: Organization) -> Self {
        OrgRef::Resolved(org)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileRef {
    Code(ProfileCode),
    Resolved(Box<Profile>),
}

impl ProfileRef {
    /// Code of the referenced profile. Resolved snapshots are re-encoded from
    /// their identity.
    pub fn code(&self) -> Result<ProfileCode, IdentityError> {
        match self {
            ProfileRef::Code(code) => Ok(code.clone()),
            ProfileRef::Resolved(profile) => profile.fresh_code(),
        }
    }
}

impl From<ProfileCode> for ProfileRef {
    fn from(code: ProfileCode) -> Self {
        ProfileRef::Code(code)
    }
}

impl From<Profile> for ProfileRef {
    fn from(profile: Profile) -> Self {
        ProfileRef::Resolved(Box::new(profile))
    }
}

/// Kind specific profile fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProfileDetails {
    Admin,
    Executive {
        role: Role,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        supervisor: Option<ProfileRef>,
        organization: OrgRef,
    },
    Encoder {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        executive: Option<ProfileRef>,
        organization: OrgRef,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ProfileCode>,
    #[serde(flatten)]
    pub identity: Identity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation: Option<String>,
    #[serde(flatten)]
    pub details: ProfileDetails,
}

impl Profile {
    fn with_details(identity: Identity, details: ProfileDetails) -> Self {
        Self {
            id: None,
            key: None,
            code: None,
            identity,
            activation: None,
            details,
        }
    }

    pub fn admin(identity: Identity) -> Self {
        Self::with_details(identity, ProfileDetails::Admin)
    }

    pub fn executive(
        identity: Identity,
        role: Role,
        organization: impl Into<OrgRef>,
        supervisor: Option<ProfileRef>,
    ) -> Self {
        Self::with_details(
            identity,
            ProfileDetails::Executive {
                role,
                supervisor,
                organization: organization.into(),
            },
        )
    }

    pub fn encoder(
        identity: Identity,
        organization: impl Into<OrgRef>,
        executive: Option<ProfileRef>,
    ) -> Self {
        Self::with_details(
            identity,
            ProfileDetails::Encoder {
                executive,
                organization: organization.into(),
            },
        )
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn kind(&self) -> ProfileKind {
        match self.details {
            ProfileDetails::Admin => ProfileKind::Admin,
            ProfileDetails::Executive { .. } => ProfileKind::Executive,
            ProfileDetails::Encoder { .. } => ProfileKind::Encoder,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self.details {
            ProfileDetails::Executive { role, .. } => Some(role),
            _ => None,
        }
    }

    /// Organization reference; admins are not scoped to an organization.
    pub fn organization(&self) -> Option<&OrgRef> {
        match &self.details {
            ProfileDetails::Admin => None,
            ProfileDetails::Executive { organization, .. }
            | ProfileDetails::Encoder { organization, .. } => Some(organization),
        }
    }

    pub fn org_code(&self) -> Option<&OrgCode> {
        self.organization().map(OrgRef::code)
    }

    pub fn supervisor(&self) -> Option<&ProfileRef> {
        match &self.details {
            ProfileDetails::Executive { supervisor, .. } => supervisor.as_ref(),
            _ => None,
        }
    }

    pub fn is_chief(&self) -> bool {
        self.role() == Some(Role::Chief)
    }

    /// Recompute the profile code from the identity fields.
    pub fn fresh_code(&self) -> Result<ProfileCode, IdentityError> {
        encode(&self.identity, self.kind())
    }
}
