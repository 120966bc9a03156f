//! Profiler Core – activation trust chain and profiling endorsements.
//!
//! - Validates activation tokens along Admin → Chief → Executive → Encoder.
//! - Issues activation tokens with the key that anchors each level.
//! - Issues and decodes profiling endorsements recording content provenance.
//! - Storage and key material are injected through [`ProfileStore`] and
//!   [`KeyProvider`]; in-memory versions live in [`memory`].

#![forbid(unsafe_code)]

pub mod config;
pub mod endorsement;
pub mod error;
pub mod grammar;
mod issuer;
pub mod memory;
pub mod model;
mod profiler;
pub mod store;
mod validator;

pub use config::ProfilerConfig;
pub use endorsement::validate_profile;
pub use error::{ProfilerError, Result, StoreError};
pub use grammar::{ProfilingRecord, TokenGrammar, TokenKind};
pub use memory::{InMemoryKeyProvider, InMemoryProfileStore};
pub use model::{OrgRef, Organization, Profile, ProfileDetails, ProfileRef, Role};
pub use profiler::Profiler;
pub use store::{KeyKind, KeyProvider, ProfileStore};

pub use profiler_identity::{
    decode, encode, Gender, Identity, IdentityError, OrgCode, ProfileCode, ProfileKind,
};
