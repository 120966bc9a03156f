//! Fixed-width plaintext layouts signed into activation and profiling tokens.
//!
//! Every layout starts with fixed-width codes (9 character organization,
//! 22 character profiles) followed by a literal marker. These widths are part
//! of the wire format: tokens issued earlier only parse if they never change.
//!
//! ```text
//! admin      [code:22]ACTIVATE:administrator
//! chief      [org:9][code:22]ACTIVATE:[role]
//! executive  [org:9][code:22][chief:22]ACTIVATE:[role]
//! encoder    [org:9][code:22][executive:22]ACTIVATE:encoder
//! profiling  [org:9][code:22][encoder:22][executive:22][chief:22]PROFILED:[role]:[extra]
//! ```

use once_cell::sync::Lazy;
use profiler_identity::{OrgCode, ProfileCode};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ProfilerError, Result};

pub const ACTIVATE: &str = "ACTIVATE:";
pub const ADMINISTRATOR: &str = "administrator";
pub const ENCODER: &str = "encoder";
pub const PROFILED: &str = "PROFILED:";

static ADMIN_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<code>.{22})ACTIVATE:administrator$").expect("invalid admin grammar")
});

static CHIEF_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<org>.{9})(?P<code>.{22})ACTIVATE:(?P<role>.*)$")
        .expect("invalid chief grammar")
});

static EXECUTIVE_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<org>.{9})(?P<code>.{22})(?P<chief>.{22})ACTIVATE:(?P<role>.*)$")
        .expect("invalid executive grammar")
});

static ENCODER_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<org>.{9})(?P<code>.{22})(?P<executive>.{22})ACTIVATE:encoder$")
        .expect("invalid encoder grammar")
});

static PROFILING_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<org>.{9})(?P<code>.{22})(?P<encoder>.{22})(?P<executive>.{22})(?P<chief>.{22})PROFILED:(?P<role>[^:]+):(?P<extra>(?s:.*))$",
    )
    .expect("invalid profiling grammar")
});

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    AdminActivation,
    ChiefActivation,
    ExecutiveActivation,
    EncoderActivation,
    ProfilingEndorsement,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::AdminActivation => "admin activation",
            TokenKind::ChiefActivation => "chief activation",
            TokenKind::ExecutiveActivation => "executive activation",
            TokenKind::EncoderActivation => "encoder activation",
            TokenKind::ProfilingEndorsement => "profiling endorsement",
        };
        f.write_str(name)
    }
}

/// A plaintext layout that can be formatted for signing and parsed back
/// after verification.
pub trait TokenGrammar: Sized {
    const KIND: TokenKind;

    fn format(&self) -> String;

    /// Parse an already verified and trimmed plaintext.
    fn parse(plaintext: &str) -> Result<Self>;
}

fn captures<'p, G: TokenGrammar>(grammar: &Regex, plaintext: &'p str) -> Result<Captures<'p>> {
    grammar
        .captures(plaintext)
        .ok_or(ProfilerError::TokenFormat { kind: G::KIND })
}

fn field<G: TokenGrammar, T: std::str::FromStr>(caps: &Captures<'_>, name: &str) -> Result<T> {
    caps.name(name)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or(ProfilerError::TokenFormat { kind: G::KIND })
}

fn text(caps: &Captures<'_>, name: &str) -> String {
    caps.name(name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminActivation {
    pub code: ProfileCode,
}

impl TokenGrammar for AdminActivation {
    const KIND: TokenKind = TokenKind::AdminActivation;

    fn format(&self) -> String {
        format!("{}{}{}", self.code, ACTIVATE, ADMINISTRATOR)
    }

    fn parse(plaintext: &str) -> Result<Self> {
        let caps = captures::<Self>(&ADMIN_GRAMMAR, plaintext)?;
        Ok(Self {
            code: field::<Self, _>(&caps, "code")?,
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChiefActivation {
    pub org: OrgCode,
    pub code: ProfileCode,
    pub role: String,
}

impl TokenGrammar for ChiefActivation {
    const KIND: TokenKind = TokenKind::ChiefActivation;

    fn format(&self) -> String {
        format!("{}{}{}{}", self.org, self.code, ACTIVATE, self.role)
    }

    fn parse(plaintext: &str) -> Result<Self> {
        let caps = captures::<Self>(&CHIEF_GRAMMAR, plaintext)?;
        Ok(Self {
            org: field::<Self, _>(&caps, "org")?,
            code: field::<Self, _>(&caps, "code")?,
            role: text(&caps, "role"),
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutiveActivation {
    pub org: OrgCode,
    pub code: ProfileCode,
    pub chief: ProfileCode,
    pub role: String,
}

impl TokenGrammar for ExecutiveActivation {
    const KIND: TokenKind = TokenKind::ExecutiveActivation;

    fn format(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.org, self.code, self.chief, ACTIVATE, self.role
        )
    }

    fn parse(plaintext: &str) -> Result<Self> {
        let caps = captures::<Self>(&EXECUTIVE_GRAMMAR, plaintext)?;
        Ok(Self {
            org: field::<Self, _>(&caps, "org")?,
            code: field::<Self, _>(&caps, "code")?,
            chief: field::<Self, _>(&caps, "chief")?,
            role: text(&caps, "role"),
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncoderActivation {
    pub org: OrgCode,
    pub code: ProfileCode,
    pub executive: ProfileCode,
}

impl TokenGrammar for EncoderActivation {
    const KIND: TokenKind = TokenKind::EncoderActivation;

    fn format(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.org, self.code, self.executive, ACTIVATE, ENCODER
        )
    }

    fn parse(plaintext: &str) -> Result<Self> {
        let caps = captures::<Self>(&ENCODER_GRAMMAR, plaintext)?;
        Ok(Self {
            org: field::<Self, _>(&caps, "org")?,
            code: field::<Self, _>(&caps, "code")?,
            executive: field::<Self, _>(&caps, "executive")?,
        })
    }
}

/// Provenance chain recorded by a profiling endorsement.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProfilingRecord {
    pub organization: OrgCode,
    /// Profile the content was produced for.
    pub code: ProfileCode,
    pub encoder: ProfileCode,
    pub executive: ProfileCode,
    pub chief: ProfileCode,
    /// Kind of the subject profile.
    pub role: String,
    pub extra: String,
}

impl TokenGrammar for ProfilingRecord {
    const KIND: TokenKind = TokenKind::ProfilingEndorsement;

    fn format(&self) -> String {
        format!(
            "{}{}{}{}{}{}{}:{}",
            self.organization,
            self.code,
            self.encoder,
            self.executive,
            self.chief,
            PROFILED,
            self.role,
            self.extra
        )
    }

    fn parse(plaintext: &str) -> Result<Self> {
        let caps = captures::<Self>(&PROFILING_GRAMMAR, plaintext)?;
        Ok(Self {
            organization: field::<Self, _>(&caps, "org")?,
            code: field::<Self, _>(&caps, "code")?,
            encoder: field::<Self, _>(&caps, "encoder")?,
            executive: field::<Self, _>(&caps, "executive")?,
            chief: field::<Self, _>(&caps, "chief")?,
            role: text(&caps, "role"),
            extra: text(&caps, "extra"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn org() -> OrgCode {
        "ORG000001".parse().unwrap()
    }

    fn code(c: char) -> ProfileCode {
        format!("{}{}", "ABC", c.to_string().repeat(19)).parse().unwrap()
    }

    #[test]
    fn chief_layout_is_fixed_width() {
        let claims = ChiefActivation {
            org: org(),
            code: code('1'),
            role: "chief".into(),
        };
        let plaintext = claims.format();
        assert_eq!(plaintext.len(), 9 + 22 + ACTIVATE.len() + 5);
        assert_eq!(&plaintext[31..40], ACTIVATE);
        assert_eq!(ChiefActivation::parse(&plaintext).unwrap(), claims);
    }

    #[test]
    fn admin_layout_requires_literal_suffix() {
        let claims = AdminActivation { code: code('2') };
        assert_eq!(
            claims.format(),
            format!("{}ACTIVATE:administrator", code('2'))
        );
        assert_matches!(
            AdminActivation::parse(&format!("{}ACTIVATE:admin", code('2'))),
            Err(ProfilerError::TokenFormat {
                kind: TokenKind::AdminActivation
            })
        );
    }

    #[test]
    fn shifted_fields_do_not_parse() {
        let claims = ExecutiveActivation {
            org: org(),
            code: code('1'),
            chief: code('2'),
            role: "manager".into(),
        };
        let plaintext = claims.format();
        // drop one character from the organization field
        assert!(ExecutiveActivation::parse(&plaintext[1..]).is_err());
        assert_eq!(ExecutiveActivation::parse(&plaintext).unwrap(), claims);
    }

    #[test]
    fn encoder_layout_fixes_the_role() {
        let claims = EncoderActivation {
            org: org(),
            code: code('1'),
            executive: code('3'),
        };
        let plaintext = claims.format();
        assert!(plaintext.ends_with("ACTIVATE:encoder"));
        assert_eq!(EncoderActivation::parse(&plaintext).unwrap(), claims);
        let wrong_role = plaintext.replace("ACTIVATE:encoder", "ACTIVATE:executive");
        assert!(EncoderActivation::parse(&wrong_role).is_err());
    }

    #[test]
    fn profiling_extra_keeps_colons() {
        let record = ProfilingRecord {
            organization: org(),
            code: code('1'),
            encoder: code('2'),
            executive: code('3'),
            chief: code('4'),
            role: "encoder".into(),
            extra: "scan:42:front".into(),
        };
        let parsed = ProfilingRecord::parse(&record.format()).unwrap();
        assert_eq!(parsed.role, "encoder");
        assert_eq!(parsed.extra, "scan:42:front");
        assert_eq!(parsed, record);
    }
}
