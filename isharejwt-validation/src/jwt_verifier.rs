// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Algorithm guard and RS256 signature verification.

use isharejwt_common::JwtHeader;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::RejectionReason;

/// The only signing algorithm accepted by this profile.
pub const EXPECTED_ALG: &str = "RS256";

/// Requires the header `alg` to equal RS256, case-insensitively.
///
/// Anything else is rejected before certificate material is touched, closing
/// off `none`/HMAC algorithm-confusion inputs.
pub fn require_rs256(header: &JwtHeader) -> Result<(), RejectionReason> {
    if header.alg.eq_ignore_ascii_case(EXPECTED_ALG) {
        Ok(())
    } else {
        Err(RejectionReason::UnsupportedAlgorithm(header.alg.clone()))
    }
}

/// Verifies the token's RS256 signature with the signer's public key and
/// checks the audience claim in the same call.
///
/// `public_key_der` is the PKCS#1 `RSAPublicKey` DER taken from the leaf
/// certificate's SubjectPublicKeyInfo. This is the only place the
/// cryptographic signature is checked; every earlier stage operates on
/// unverified claims and must never be treated as authoritative on its own.
///
/// Temporal claims are deliberately not re-validated here: they were already
/// checked against the injectable clock.
pub fn verify_rs256_signature(
    token: &str,
    public_key_der: &[u8],
    audience: &str,
) -> Result<(), RejectionReason> {
    let key = DecodingKey::from_rsa_der(public_key_der);

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[audience]);
    validation.set_required_spec_claims(&["aud"]);
    validation.validate_exp = false;
    validation.validate_nbf = false;

    match jsonwebtoken::decode::<serde_json::Value>(token, &key, &validation) {
        Ok(_) => Ok(()),
        Err(e) => match e.kind() {
            ErrorKind::InvalidAudience | ErrorKind::MissingRequiredClaim(_) => {
                Err(RejectionReason::AudienceMismatch)
            }
            _ => Err(RejectionReason::SignatureInvalid),
        },
    }
}
