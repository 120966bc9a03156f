//! Profiler Identity – identity fields and code tooling for activation tokens.
//!
//! - `Identity` carries the human fields a profile code is derived from.
//! - `encode` produces the fixed-width 22 character `ProfileCode`.
//! - `decode` recovers initials, gender and birth date from a code.
//! - `OrgCode` is the fixed-width 9 character organization identifier.
//! - Zero `unsafe`; `#![forbid(unsafe_code)]`.

#![forbid(unsafe_code)]

mod code;
mod codec;
mod identity;
#[cfg(test)]
mod tests;

pub use code::{CodeFormatError, OrgCode, ProfileCode, ORG_CODE_LEN, PROFILE_CODE_LEN};
pub use codec::{decode, encode, DecodedCode};
pub use identity::{Gender, Identity, IdentityError, NameField, ProfileKind};
