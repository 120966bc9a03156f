use async_trait::async_trait;
use profiler_identity::{OrgCode, ProfileCode};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StoreError;
use crate::model::Profile;

/// Which key of the trust chain is requested.
///
/// Admin keys are global. Chief and encoder keys are always scoped to the
/// organization code of the chief that anchors the chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    Admin,
    Chief,
    Encoder,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyKind::Admin => "admin",
            KeyKind::Chief => "chief",
            KeyKind::Encoder => "encoder",
        };
        f.write_str(name)
    }
}

/// Persistent storage of profiles and the organization tree.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Look a profile up by id, optionally within an organization.
    async fn find_one(&self, org: Option<&OrgCode>, id: &str) -> Result<Profile, StoreError>;

    /// Look a profile up by its profile code.
    async fn find_one_by_code(&self, code: &ProfileCode) -> Result<Profile, StoreError>;

    /// Persist `profile` under `id` and return the stored record.
    async fn update(&self, id: &str, profile: Profile) -> Result<Profile, StoreError>;

    /// Whether `org` is `ancestor` or one of its descendants.
    async fn is_org_part_of_org(&self, org: &OrgCode, ancestor: &OrgCode)
        -> Result<bool, StoreError>;
}

/// Source of base64 encoded key material.
#[async_trait]
pub trait KeyProvider: Send + Sync {
    /// 32 byte Ed25519 public key.
    async fn get_pub_key(
        &self,
        kind: KeyKind,
        org: Option<&OrgCode>,
    ) -> Result<Option<String>, StoreError>;

    /// 64 byte `seed || public key` signing key. Only chief and encoder
    /// private keys are ever requested.
    async fn get_priv_key(
        &self,
        kind: KeyKind,
        org: Option<&OrgCode>,
    ) -> Result<Option<String>, StoreError>;
}
