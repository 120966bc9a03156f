use async_trait::async_trait;
use ed25519_dalek::SigningKey;
use profiler_crypto::{encode_signing_key, encode_verifying_key};
use profiler_identity::{OrgCode, ProfileCode};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::model::{Organization, Profile};
use crate::store::{KeyKind, KeyProvider, ProfileStore};

/// An in-memory profile store for testing and development.
#[derive(Default, Debug, Clone)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<String, Profile>>>,
    organizations: Arc<RwLock<HashMap<OrgCode, Organization>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile. The profile must carry an id.
    pub async fn insert_profile(&self, profile: Profile) -> Result<Profile, StoreError> {
        let id = profile
            .id
            .clone()
            .ok_or_else(|| StoreError::Backend("profile without id".to_string()))?;
        self.profiles.write().await.insert(id, profile.clone());
        Ok(profile)
    }

    /// Register an organization. Its parent, if any, must already exist.
    pub async fn insert_organization(&self, org: Organization) -> Result<(), StoreError> {
        let mut orgs = self.organizations.write().await;
        if let Some(parent) = &org.parent_org_code {
            if !orgs.contains_key(parent) {
                return Err(StoreError::NotFound(format!("parent organization {parent}")));
            }
        }
        orgs.insert(org.code.clone(), org);
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Option<Profile> {
        self.profiles.read().await.get(id).cloned()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find_one(&self, org: Option<&OrgCode>, id: &str) -> Result<Profile, StoreError> {
        let profiles = self.profiles.read().await;
        let profile = profiles
            .get(id)
            .ok_or_else(|| StoreError::NotFound(format!("profile {id}")))?;
        match (org, profile.org_code()) {
            (Some(wanted), Some(actual)) if wanted != actual => {
                Err(StoreError::NotFound(format!("profile {id} in {wanted}")))
            }
            _ => Ok(profile.clone()),
        }
    }

    async fn find_one_by_code(&self, code: &ProfileCode) -> Result<Profile, StoreError> {
        let profiles = self.profiles.read().await;
        profiles
            .values()
            .find(|p| p.fresh_code().map(|c| &c == code).unwrap_or(false))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("profile code {code}")))
    }

    async fn update(&self, id: &str, profile: Profile) -> Result<Profile, StoreError> {
        let mut profiles = self.profiles.write().await;
        let slot = profiles
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("profile {id}")))?;
        *slot = profile.clone();
        Ok(profile)
    }

    async fn is_org_part_of_org(
        &self,
        org: &OrgCode,
        ancestor: &OrgCode,
    ) -> Result<bool, StoreError> {
        let orgs = self.organizations.read().await;
        let mut current = Some(org.clone());
        // bounded walk, a malformed tree must not loop forever
        for _ in 0..=orgs.len() {
            let Some(code) = current else {
                return Ok(false);
            };
            if &code == ancestor {
                return Ok(true);
            }
            current = orgs.get(&code).and_then(|o| o.parent_org_code.clone());
        }
        Ok(false)
    }
}

type KeySlot = (KeyKind, Option<OrgCode>);

/// An in-memory key provider for testing and development.
#[derive(Default, Debug, Clone)]
pub struct InMemoryKeyProvider {
    public: Arc<RwLock<HashMap<KeySlot, String>>>,
    private: Arc<RwLock<HashMap<KeySlot, String>>>,
}

impl InMemoryKeyProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_pub_key(&self, kind: KeyKind, org: Option<OrgCode>, key: impl Into<String>) {
        self.public.write().await.insert((kind, org), key.into());
    }

    pub async fn insert_priv_key(&self, kind: KeyKind, org: Option<OrgCode>, key: impl Into<String>) {
        self.private.write().await.insert((kind, org), key.into());
    }

    /// Register both halves of `key` for the given slot.
    pub async fn insert_keypair(&self, kind: KeyKind, org: Option<OrgCode>, key: &SigningKey) {
        self.insert_pub_key(kind, org.clone(), encode_verifying_key(&key.verifying_key()))
            .await;
        self.insert_priv_key(kind, org, encode_signing_key(key)).await;
    }

    pub async fn remove(&self, kind: KeyKind, org: Option<OrgCode>) {
        let slot = (kind, org);
        self.public.write().await.remove(&slot);
        self.private.write().await.remove(&slot);
    }
}

#[async_trait]
impl KeyProvider for InMemoryKeyProvider {
    async fn get_pub_key(
        &self,
        kind: KeyKind,
        org: Option<&OrgCode>,
    ) -> Result<Option<String>, StoreError> {
        Ok(self.public.read().await.get(&(kind, org.cloned())).cloned())
    }

    async fn get_priv_key(
        &self,
        kind: KeyKind,
        org: Option<&OrgCode>,
    ) -> Result<Option<String>, StoreError> {
        Ok(self.private.read().await.get(&(kind, org.cloned())).cloned())
    }
}
