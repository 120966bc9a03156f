use crate::code::{CodeFormatError, ProfileCode, PROFILE_CODE_LEN};
use crate::identity::{Gender, Identity, IdentityError, NameField, ProfileKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Width of the padded hash segment.
const HASH_SEGMENT_LEN: usize = 12;

static BIRTH_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2})([-/])([0-9]{2})([-/])([0-9]{4})$").expect("invalid birth date pattern")
});

static CODE_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<initials>[A-Z]{3})(?P<hash>[-0-9]{12})(?P<gender>[01])(?P<month>[0-9]{2})(?P<day>[0-9]{2})(?P<year>[0-9]{2})$")
        .expect("invalid profile code pattern")
});

/// Fields recoverable from a profile code. Names are not recoverable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodedCode {
    pub initials: String,
    pub hash: String,
    pub gender: Gender,
    /// `MM-DD-YY`
    pub birth_date: String,
}

struct BirthDate<'a> {
    month: &'a str,
    day: &'a str,
    year: &'a str,
}

fn parse_birth_date(raw: &str) -> Result<BirthDate<'_>, IdentityError> {
    let caps = BIRTH_DATE
        .captures(raw)
        .ok_or_else(|| IdentityError::InvalidBirthDate(raw.to_string()))?;
    let (first_sep, second_sep) = (&caps[2], &caps[4]);
    if first_sep != second_sep {
        return Err(IdentityError::InvalidBirthDate(raw.to_string()));
    }
    let field = |i| caps.get(i).map(|m| m.as_str()).unwrap_or_default();
    Ok(BirthDate {
        month: field(1),
        day: field(3),
        year: field(5),
    })
}

fn required(value: &str, field: NameField) -> Result<&str, IdentityError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IdentityError::MissingName(field));
    }
    Ok(trimmed)
}

fn first_upper(value: &str) -> String {
    value
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// 32-bit rolling string hash over UTF-16 code units, `h = h * 31 + unit`.
fn hash_name(name: &str) -> i32 {
    name.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Derive the 22 character profile code for `identity` as a `kind` profile.
///
/// Layout: three initials, the hash padded to 12 characters with
/// `"0000" + MM + DD + YYYY`, the gender digit, then `MMDDYY`.
pub fn encode(identity: &Identity, kind: ProfileKind) -> Result<ProfileCode, IdentityError> {
    let first = required(&identity.first_name, NameField::First)?;
    let middle = required(&identity.middle_name, NameField::Middle)?;
    let last = required(&identity.last_name, NameField::Last)?;
    let birth = parse_birth_date(&identity.birth_date)?;

    let hash_input = format!(
        "{}{}{}{}{}",
        first.to_uppercase(),
        first_upper(middle),
        last.to_uppercase(),
        identity.birth_date,
        kind.as_str()
    );
    let filler = format!("0000{}{}{}", birth.month, birth.day, birth.year);
    let mut hash = hash_name(&hash_input).to_string();
    let missing = HASH_SEGMENT_LEN.saturating_sub(hash.chars().count());
    hash.extend(filler.chars().take(missing));

    let code = format!(
        "{}{}{}{}{}{}{}{}",
        first_upper(first),
        first_upper(middle),
        first_upper(last),
        hash,
        identity.gender.digit(),
        birth.month,
        birth.day,
        &birth.year[2..]
    );
    let width = code.chars().count();
    if width != PROFILE_CODE_LEN {
        return Err(IdentityError::CodeWidth(width));
    }
    Ok(ProfileCode::from_encoded(code))
}

/// Recover initials, hash, gender and birth date from a profile code.
pub fn decode(code: &str) -> Result<DecodedCode, CodeFormatError> {
    let caps = CODE_GRAMMAR
        .captures(code)
        .ok_or_else(|| CodeFormatError::profile(code))?;
    let gender = if &caps["gender"] == "1" {
        Gender::Male
    } else {
        Gender::Female
    };
    Ok(DecodedCode {
        initials: caps["initials"].to_string(),
        hash: caps["hash"].to_string(),
        gender,
        birth_date: format!("{}-{}-{}", &caps["month"], &caps["day"], &caps["year"]),
    })
}

#[cfg(test)]
mod hash_tests {
    use super::hash_name;

    #[test]
    fn empty_string_hashes_to_zero() {
        assert_eq!(hash_name(""), 0);
    }

    #[test]
    fn matches_java_style_string_hash() {
        // "abc": ((97 * 31) + 98) * 31 + 99
        assert_eq!(hash_name("abc"), 96354);
    }

    #[test]
    fn wraps_to_32_bits() {
        let long = "Z".repeat(64);
        let expected = long
            .bytes()
            .fold(0i64, |h, b| (h * 31 + i64::from(b)) & 0xffff_ffff);
        assert_eq!(hash_name(&long), expected as u32 as i32);
    }
}
