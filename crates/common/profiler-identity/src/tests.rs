use crate::{decode, encode, Gender, Identity, IdentityError, NameField, OrgCode, ProfileCode, ProfileKind};
use assert_matches::assert_matches;

fn ana() -> Identity {
    Identity::new("Ana", "Maria", "Cruz", "04-15-1990", Gender::Female)
}

#[test]
fn encodes_reference_identity() {
    let code = encode(&ana(), ProfileKind::Admin).unwrap();
    assert_eq!(code.as_str(), "AMC3903940190000041590");
    assert!(code.as_str().starts_with("AMC"));
    assert!(code.as_str().ends_with("0041590"));
}

#[test]
fn code_depends_on_kind() {
    let admin = encode(&ana(), ProfileKind::Admin).unwrap();
    let executive = encode(&ana(), ProfileKind::Executive).unwrap();
    let encoder = encode(&ana(), ProfileKind::Encoder).unwrap();

    // negative hashes keep the sign inside the hash segment
    assert_eq!(executive.as_str(), "AMC-770101444000041590");
    assert_eq!(encoder.as_str(), "AMC1038773616000041590");
    assert_ne!(admin, executive);
}

#[test]
fn encode_is_deterministic_and_fixed_width() {
    let ids = [
        ana(),
        Identity::new("bob", "lee", "o'neil", "12/31/1975", Gender::Male),
        Identity::new("  Zed ", " X", "Young  ", "01-01-2001", Gender::Male),
    ];
    for id in &ids {
        for kind in [ProfileKind::Admin, ProfileKind::Executive, ProfileKind::Encoder] {
            let a = encode(id, kind).unwrap();
            let b = encode(id, kind).unwrap();
            assert_eq!(a, b);
            assert_eq!(a.as_str().len(), 22);
        }
    }
}

#[test]
fn names_are_trimmed_before_initials() {
    let id = Identity::new("  zed", " x", "young ", "01-01-2001", Gender::Male);
    let code = encode(&id, ProfileKind::Encoder).unwrap();
    assert!(code.as_str().starts_with("ZXY"));
    assert!(code.as_str().ends_with("1010101"));
}

#[test]
fn decode_recovers_gender_and_birth_date() {
    let code = encode(&ana(), ProfileKind::Encoder).unwrap();
    let decoded = decode(code.as_str()).unwrap();
    assert_eq!(decoded.initials, "AMC");
    assert_eq!(decoded.gender, Gender::Female);
    assert_eq!(decoded.birth_date, "04-15-90");

    let male = Identity::new("Bob", "Lee", "Stone", "12/31/1975", Gender::Male);
    let decoded = decode(encode(&male, ProfileKind::Executive).unwrap().as_str()).unwrap();
    assert_eq!(decoded.gender, Gender::Male);
    assert_eq!(decoded.birth_date, "12-31-75");
}

#[test]
fn empty_names_are_rejected() {
    let mut id = ana();
    id.middle_name = "   ".into();
    assert_matches!(
        encode(&id, ProfileKind::Admin),
        Err(IdentityError::MissingName(NameField::Middle))
    );

    let mut id = ana();
    id.first_name.clear();
    assert_matches!(
        encode(&id, ProfileKind::Admin),
        Err(IdentityError::MissingName(NameField::First))
    );
}

#[test]
fn bad_birth_dates_are_rejected() {
    for bad in ["1990-04-15", "4-15-1990", "04-15/1990", "04.15.1990", "04-15-90", ""] {
        let mut id = ana();
        id.birth_date = bad.into();
        assert_matches!(
            encode(&id, ProfileKind::Admin),
            Err(IdentityError::InvalidBirthDate(_)),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn decode_rejects_malformed_codes() {
    assert!(decode("amc3903940190000041590").is_err());
    assert!(decode("AMC39039401900000415").is_err());
    assert!(decode("AMC3903940190002041590").is_err());
}

#[test]
fn code_widths_are_enforced() {
    assert!("ORG000001".parse::<OrgCode>().is_ok());
    assert!("ORG00001".parse::<OrgCode>().is_err());
    assert!("AMC3903940190000041590".parse::<ProfileCode>().is_ok());
    assert!("AMC390394019".parse::<ProfileCode>().is_err());
}

#[test]
fn codes_serialize_as_plain_strings() {
    let org: OrgCode = "ORG000001".parse().unwrap();
    assert_eq!(serde_json::to_string(&org).unwrap(), "\"ORG000001\"");
    assert!(serde_json::from_str::<OrgCode>("\"short\"").is_err());

    let kind: ProfileKind = serde_json::from_str("\"executive\"").unwrap();
    assert_eq!(kind, ProfileKind::Executive);
}
