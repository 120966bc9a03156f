#![allow(dead_code)]

use ed25519_dalek::SigningKey;
use profiler_core::{
    Gender, Identity, InMemoryKeyProvider, InMemoryProfileStore, KeyKind, OrgCode, Organization,
    Profile, ProfileCode, ProfileRef, Profiler, Role,
};
use profiler_crypto::{encode_signing_key, encode_verifying_key, sign_padded};
use rand::rngs::OsRng;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn org(code: &str) -> OrgCode {
    code.parse().expect("9 character org code")
}

pub fn code_of(profile: &Profile) -> ProfileCode {
    profile.fresh_code().expect("valid identity")
}

/// Sign an arbitrary plaintext the way issuance does.
pub fn sign(plaintext: &str, key: &SigningKey) -> String {
    sign_padded(plaintext, key, 4).expect("padding aligned")
}

pub fn private_b64(key: &SigningKey) -> String {
    encode_signing_key(key)
}

pub fn public_b64(key: &SigningKey) -> String {
    encode_verifying_key(&key.verifying_key())
}

/// A complete trust chain:
///
/// ```text
/// ORG000001 (root)            chief  Carlos Reyes
/// └── ORG000002 (child)       executive Elena Diaz (manager) ─ encoder Marco Santos
/// ORG000009 (unrelated)       executive Nina Lopez, supervised by the root chief
/// ```
pub struct Chain {
    pub profiler: Profiler<InMemoryProfileStore, InMemoryKeyProvider>,
    pub store: InMemoryProfileStore,
    pub keys: InMemoryKeyProvider,
    pub admin_key: SigningKey,
    pub chief_key: SigningKey,
    pub encoder_key: SigningKey,
    pub root: OrgCode,
    pub child: OrgCode,
    pub other: OrgCode,
    pub admin: Profile,
    pub chief: Profile,
    pub executive: Profile,
    pub encoder: Profile,
    pub stray_executive: Profile,
}

pub async fn chain() -> Chain {
    init_tracing();

    let store = InMemoryProfileStore::new();
    let keys = InMemoryKeyProvider::new();
    let root = org("ORG000001");
    let child = org("ORG000002");
    let other = org("ORG000009");

    store
        .insert_organization(Organization::new("Root", root.clone(), None))
        .await
        .unwrap();
    store
        .insert_organization(Organization::new("Child", child.clone(), Some(root.clone())))
        .await
        .unwrap();
    store
        .insert_organization(Organization::new("Other", other.clone(), None))
        .await
        .unwrap();

    let admin = Profile::admin(Identity::new(
        "Ana",
        "Maria",
        "Cruz",
        "04-15-1990",
        Gender::Female,
    ))
    .with_id("admin-1");

    let chief = Profile::executive(
        Identity::new("Carlos", "Jose", "Reyes", "11/02/1970", Gender::Male),
        Role::Chief,
        root.clone(),
        None,
    )
    .with_id("chief-1");

    let executive = Profile::executive(
        Identity::new("Elena", "Rosa", "Diaz", "07-21-1985", Gender::Female),
        Role::Manager,
        child.clone(),
        Some(ProfileRef::Code(code_of(&chief))),
    )
    .with_id("exec-1");

    let encoder = Profile::encoder(
        Identity::new("Marco", "Luis", "Santos", "02-28-1995", Gender::Male),
        child.clone(),
        Some(ProfileRef::from(executive.clone())),
    )
    .with_id("enc-1");

    let stray_executive = Profile::executive(
        Identity::new("Nina", "Paz", "Lopez", "09-09-1988", Gender::Female),
        Role::Manager,
        other.clone(),
        Some(ProfileRef::Code(code_of(&chief))),
    )
    .with_id("exec-x");

    for profile in [&admin, &chief, &executive, &encoder, &stray_executive] {
        store.insert_profile(profile.clone()).await.unwrap();
    }

    let admin_key = SigningKey::generate(&mut OsRng);
    let chief_key = SigningKey::generate(&mut OsRng);
    let encoder_key = SigningKey::generate(&mut OsRng);
    keys.insert_keypair(KeyKind::Admin, None, &admin_key).await;
    keys.insert_keypair(KeyKind::Chief, Some(root.clone()), &chief_key)
        .await;
    keys.insert_keypair(KeyKind::Encoder, Some(root.clone()), &encoder_key)
        .await;

    Chain {
        profiler: Profiler::new(store.clone(), keys.clone()),
        store,
        keys,
        admin_key,
        chief_key,
        encoder_key,
        root,
        child,
        other,
        admin,
        chief,
        executive,
        encoder,
        stray_executive,
    }
}
