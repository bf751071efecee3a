//! Advisory identity decoding from the access token payload.
//!
//! The access token is a three-segment base64url credential issued by the
//! collaborator. The middle segment is a JSON object carrying `user_id` and
//! usually `email`/`username`. Decoding happens entirely client-side with no
//! signature verification: the result is for display purposes only and must
//! never be treated as a trust boundary or authorization check, hence the
//! `DisplayIdentity` name.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

/// Locally decoded, advisory view of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayIdentity {
    /// `user_id` claim from the token payload.
    pub id: u64,
    /// Email, substituted from the username when the claim is absent.
    pub email: String,
    /// Username, substituted from the email when the claim is absent.
    pub username: String,
}

#[derive(Deserialize)]
struct TokenClaims {
    user_id: u64,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

/// Decode the payload segment of an access token into a [`DisplayIdentity`].
///
/// Returns `None` on any structural failure: wrong segment count, invalid
/// base64url, non-UTF-8 bytes, malformed JSON, or missing critical claims.
/// A `None` here means "no session", never a panic.
pub fn decode_display_identity(access_token: &str) -> Option<DisplayIdentity> {
    // The payload is always the second segment; trailing segments beyond the
    // signature are ignored, but fewer than three is not a credential.
    let segments: Vec<&str> = access_token.split('.').collect();
    if segments.len() < 3 {
        return None;
    }

    // Tokens in the wild are sometimes padded; the URL-safe alphabet here
    // ignores padding, so strip it before decoding.
    let raw = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .ok()?;
    let json = String::from_utf8(raw).ok()?;
    let claims: TokenClaims = serde_json::from_str(&json).ok()?;

    let TokenClaims {
        user_id,
        email,
        username,
    } = claims;

    // Email and username are mutually substitutable; both absent means the
    // payload is not a usable identity.
    let resolved_email = email.clone().or_else(|| username.clone())?;
    let resolved_username = username.or(email)?;

    Some(DisplayIdentity {
        id: user_id,
        email: resolved_email,
        username: resolved_username,
    })
}
