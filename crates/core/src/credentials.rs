//! Shared-secret and HTTP Basic credential checks.
//!
//! Secrets are compared through HMAC-SHA256 tags so the comparison time does
//! not depend on where the inputs first differ, nor on their lengths.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Fixed key for comparison tags. Not a secret; it only normalizes lengths.
const COMPARE_KEY: &[u8] = b"ingest-credential-compare";

fn tag(input: &[u8]) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(COMPARE_KEY).expect("HMAC accepts any key length");
    mac.update(input);
    mac
}

/// Constant-time equality of two secrets.
pub fn secrets_match(provided: &str, expected: &str) -> bool {
    let expected_tag = tag(expected.as_bytes()).finalize().into_bytes();
    tag(provided.as_bytes()).verify_slice(&expected_tag).is_ok()
}

/// Check a presented API key against the configured one.
///
/// An empty configured key disables the endpoint: nothing matches it.
pub fn api_key_matches(provided: Option<&str>, configured: &str) -> bool {
    if configured.is_empty() {
        return false;
    }
    secrets_match(provided.unwrap_or_default(), configured)
}

/// Credentials decoded from an `Authorization: Basic ...` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Decode an `Authorization` header value of the `Basic` scheme.
///
/// Returns `None` for any other scheme or a malformed payload.
pub fn parse_basic_auth(header: &str) -> Option<BasicCredentials> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(BasicCredentials {
        username: username.to_owned(),
        password: password.to_owned(),
    })
}

impl BasicCredentials {
    /// Both parts must match; an empty configured password matches nothing.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        if password.is_empty() {
            return false;
        }
        // Evaluate both so timing does not reveal which part failed.
        let user_ok = secrets_match(&self.username, username);
        let pass_ok = secrets_match(&self.password, password);
        user_ok & pass_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_secrets_match() {
        assert!(secrets_match("s3cret", "s3cret"));
    }

    #[test]
    fn different_secrets_do_not_match() {
        assert!(!secrets_match("s3cret", "s3cres"));
        assert!(!secrets_match("s3cre", "s3cret"));
        assert!(!secrets_match("", "s3cret"));
    }

    #[test]
    fn empty_configured_key_rejects_everything() {
        assert!(!api_key_matches(Some(""), ""));
        assert!(!api_key_matches(None, ""));
        assert!(!api_key_matches(Some("anything"), ""));
    }

    #[test]
    fn api_key_must_be_present_and_equal() {
        assert!(api_key_matches(Some("k"), "k"));
        assert!(!api_key_matches(None, "k"));
        assert!(!api_key_matches(Some("K"), "k"));
    }

    #[test]
    fn basic_header_is_decoded() {
        // "admin:pa:ss" -- the password may contain colons.
        let header = format!("Basic {}", STANDARD.encode("admin:pa:ss"));
        let creds = parse_basic_auth(&header).unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "pa:ss");
        assert!(creds.matches("admin", "pa:ss"));
        assert!(!creds.matches("admin", "pass"));
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let header = format!("basic {}", STANDARD.encode("u:p"));
        assert!(parse_basic_auth(&header).is_some());
    }

    #[test]
    fn other_schemes_and_garbage_are_rejected() {
        assert!(parse_basic_auth("Bearer abc").is_none());
        assert!(parse_basic_auth("Basic !!!").is_none());
        assert!(parse_basic_auth(&format!("Basic {}", STANDARD.encode("nocolon"))).is_none());
        assert!(parse_basic_auth("Basic").is_none());
    }

    #[test]
    fn empty_configured_password_never_matches() {
        let creds = BasicCredentials {
            username: "admin".into(),
            password: String::new(),
        };
        assert!(!creds.matches("admin", ""));
    }
}
