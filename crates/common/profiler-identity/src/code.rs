use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Width of every profile code. Baked into all token grammars.
pub const PROFILE_CODE_LEN: usize = 22;
/// Width of every organization code. Baked into all token grammars.
pub const ORG_CODE_LEN: usize = 9;

/// Error returned when a string is not a well-formed code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed {kind} code: {value:?}")]
pub struct CodeFormatError {
    pub kind: &'static str,
    pub value: String,
}

impl CodeFormatError {
    pub(crate) fn profile(value: &str) -> Self {
        Self {
            kind: "profile",
            value: value.to_string(),
        }
    }

    pub(crate) fn organization(value: &str) -> Self {
        Self {
            kind: "organization",
            value: value.to_string(),
        }
    }
}

/// A 22 character profile fingerprint.
///
/// Built by [`crate::encode`] or parsed from an existing code. Parsing only
/// checks the width; use [`crate::decode`] for the full grammar.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileCode(String);

impl ProfileCode {
    pub(crate) fn from_encoded(code: String) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProfileCode {
    type Err = CodeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().count() != PROFILE_CODE_LEN {
            return Err(CodeFormatError::profile(s));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ProfileCode {
    type Error = CodeFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProfileCode> for String {
    fn from(code: ProfileCode) -> Self {
        code.0
    }
}

impl fmt::Display for ProfileCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ProfileCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// A 9 character organization identifier.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrgCode(String);

impl OrgCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OrgCode {
    type Err = CodeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().count() != ORG_CODE_LEN {
            return Err(CodeFormatError::organization(s));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for OrgCode {
    type Error = CodeFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OrgCode> for String {
    fn from(code: OrgCode) -> Self {
        code.0
    }
}

impl fmt::Display for OrgCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for OrgCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
