// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// JOSE header fields used by this profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JwtHeader {
    /// Signing algorithm name as presented, unvalidated.
    pub alg: String,
    #[serde(default)]
    pub typ: Option<String>,
    /// Certificate chain: base64-encoded DER certificates, leaf first.
    #[serde(default)]
    pub x5c: Option<Vec<String>>,
}

/// Registered claims plus pass-through custom claims.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// `aud` may be a single string or an array of strings (RFC 7519 §4.1.3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Custom claims, carried through unexamined.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A decoded, unverified JWT.
///
/// Header and claims are read-only views of what the presenter sent; nothing
/// here has been checked against a signature yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedJwt {
    pub header: JwtHeader,
    pub claims: JwtClaims,
    /// Raw signature bytes (third segment, base64url-decoded).
    pub signature: Vec<u8>,
}

/// Parses a compact-serialization JWT into header, claims, and signature.
///
/// Accepts exactly three dot-separated base64url segments whose first two
/// decode to JSON objects. Does not verify the signature.
pub fn parse_jwt(token: &str) -> Result<ParsedJwt, String> {
    if token.is_empty() {
        return Err("empty token".to_string());
    }

    let mut segments = token.split('.');
    let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err("token is not three dot-separated segments".to_string());
    };

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header_b64)
        .map_err(|e| format!("failed to decode header segment: {e}"))?;
    let claims_bytes = URL_SAFE_NO_PAD
        .decode(claims_b64)
        .map_err(|e| format!("failed to decode claims segment: {e}"))?;
    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|e| format!("failed to decode signature segment: {e}"))?;

    let header: JwtHeader = serde_json::from_slice(&header_bytes)
        .map_err(|e| format!("header is not a valid JSON object: {e}"))?;
    let claims: JwtClaims = serde_json::from_slice(&claims_bytes)
        .map_err(|e| format!("claims are not a valid JSON object: {e}"))?;

    Ok(ParsedJwt {
        header,
        claims,
        signature,
    })
}
