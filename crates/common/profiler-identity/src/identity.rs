use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name field that failed validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameField {
    First,
    Middle,
    Last,
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NameField::First => "first name",
            NameField::Middle => "middle name",
            NameField::Last => "last name",
        };
        f.write_str(name)
    }
}

/// Error type for identity field validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("{0} is required")]
    MissingName(NameField),
    #[error("invalid birth date {0:?}: expected MM-DD-YYYY or MM/DD/YYYY")]
    InvalidBirthDate(String),
    #[error("unknown profile kind {0:?}")]
    UnknownKind(String),
    #[error("derived profile code has width {0}, expected 22")]
    CodeWidth(usize),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Single digit used inside a profile code.
    pub fn digit(self) -> char {
        match self {
            Gender::Male => '1',
            Gender::Female => '0',
        }
    }
}

/// Top-level profile kind. The lowercase wire form takes part in code
/// derivation and token grammars, so it must never change.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Admin,
    Executive,
    Encoder,
}

impl ProfileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileKind::Admin => "admin",
            ProfileKind::Executive => "executive",
            ProfileKind::Encoder => "encoder",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileKind {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(ProfileKind::Admin),
            "executive" => Ok(ProfileKind::Executive),
            "encoder" => Ok(ProfileKind::Encoder),
            other => Err(IdentityError::UnknownKind(other.to_string())),
        }
    }
}

/// Human identity fields a profile code is derived from.
///
/// Codes are recomputed from these fields whenever a token is validated, so
/// they must not change between issuing and validating a token.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    /// `MM-DD-YYYY` or `MM/DD/YYYY`.
    pub birth_date: String,
    pub gender: Gender,
}

impl Identity {
    pub fn new(
        first_name: impl Into<String>,
        middle_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            middle_name: middle_name.into(),
            last_name: last_name.into(),
            birth_date: birth_date.into(),
            gender,
        }
    }
}
