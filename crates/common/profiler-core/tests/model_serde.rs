use profiler_core::{Gender, Identity, OrgCode, Profile, ProfileDetails, ProfileRef, Role};
use serde_json::json;

fn org() -> OrgCode {
    "ORG000002".parse().unwrap()
}

fn executive() -> Profile {
    Profile::executive(
        Identity::new("Elena", "Rosa", "Diaz", "07-21-1985", Gender::Female),
        Role::HeadEncoder,
        org(),
        None,
    )
    .with_id("exec-1")
}

#[test]
fn profile_json_is_flat_and_tagged() {
    let value = serde_json::to_value(executive()).unwrap();
    assert_eq!(value["id"], json!("exec-1"));
    assert_eq!(value["kind"], json!("executive"));
    assert_eq!(value["role"], json!("head-encoder"));
    assert_eq!(value["firstName"], json!("Elena"));
    assert_eq!(value["organization"], json!("ORG000002"));
    assert!(value.get("supervisor").is_none());
    assert!(value.get("activation").is_none());
}

#[test]
fn nested_references_round_trip() {
    let head = executive();
    let encoder = Profile::encoder(
        Identity::new("Marco", "Luis", "Santos", "02-28-1995", Gender::Male),
        org(),
        Some(ProfileRef::from(head.clone())),
    );

    let text = serde_json::to_string(&encoder).unwrap();
    let back: Profile = serde_json::from_str(&text).unwrap();
    assert_eq!(back, encoder);

    let by_code = Profile::encoder(
        encoder.identity.clone(),
        org(),
        Some(ProfileRef::Code(head.fresh_code().unwrap())),
    );
    let back: Profile = serde_json::from_value(serde_json::to_value(&by_code).unwrap()).unwrap();
    match back.details {
        ProfileDetails::Encoder {
            executive: Some(ProfileRef::Code(code)),
            ..
        } => assert_eq!(code, head.fresh_code().unwrap()),
        other => panic!("unexpected details {other:?}"),
    }
}
