// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The JWT trust-chain validation pipeline.
//!
//! Nine steps in a fixed order with no backtracking; the first failure is
//! terminal. Everything before the final step operates on unverified claims:
//! the signature is only checked once the signer's certificate chain has been
//! validated down to a configured trusted root.

use isharejwt_common::{parse_jwt, JwtClaims, JwtHeader};
use isharejwt_validation::{
    require_rs256, validate_temporal_claims, verify_rs256_signature, RejectionReason,
};
use isharejwt_x509::{sha256_fingerprint, verify_chain_of_trust, CertificateChain};
use tracing::debug;

use crate::TrustConfig;

/// A token that passed every validation stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedToken {
    pub header: JwtHeader,
    pub claims: JwtClaims,
}

/// Validates a client-presented JWT under the trust-framework profile.
///
/// The token must be an RS256 JWT whose `x5c` header carries the signer's
/// certificate chain, leaf first, terminating at a root whose fingerprint is
/// in `config`'s trusted list. `required_issuer`, when given, must equal the
/// `iss` claim verbatim (in addition to the `iss`/`serialNumber` binding).
/// `now` (unix seconds) defaults to the wall clock and exists so callers and
/// tests can pin the evaluation instant.
///
/// Never panics on adversarial input: every failure mode is normalized into
/// a [`RejectionReason`]. Callers should collapse all reasons into one
/// uniform protocol-level failure; the taxonomy is for logs only.
pub fn validate(
    token: &str,
    config: &TrustConfig,
    required_issuer: Option<&str>,
    now: Option<i64>,
) -> Result<ValidatedToken, RejectionReason> {
    let now = now.unwrap_or_else(|| chrono::Utc::now().timestamp());

    match run_pipeline(token, config, required_issuer, now) {
        Ok(validated) => Ok(validated),
        Err(reason) => {
            debug!(code = reason.code(), %reason, "token rejected");
            Err(reason)
        }
    }
}

fn run_pipeline(
    token: &str,
    config: &TrustConfig,
    required_issuer: Option<&str>,
    now: i64,
) -> Result<ValidatedToken, RejectionReason> {
    // Decode header and claims without verifying the signature.
    let parsed = parse_jwt(token).map_err(|_| RejectionReason::MalformedToken)?;

    validate_temporal_claims(&parsed.claims, now)?;

    require_rs256(&parsed.header)?;

    // Caller-required issuer, before any chain processing.
    if let Some(required) = required_issuer {
        if parsed.claims.iss.as_deref() != Some(required) {
            return Err(RejectionReason::RequiredIssuerMismatch);
        }
    }

    let x5c = parsed
        .header
        .x5c
        .as_deref()
        .ok_or(RejectionReason::MissingCertificateChain)?;
    let chain = CertificateChain::from_x5c(x5c)?;

    // Bind the claimed issuer identity to the certificate that will verify
    // the signature.
    let serial_number = chain
        .leaf()
        .serial_number()
        .ok_or(RejectionReason::MissingSerialNumber)?;
    if parsed.claims.iss.as_deref() != Some(serial_number) {
        return Err(RejectionReason::IssuerMismatch);
    }

    // The presented root must be one of the configured trust anchors.
    let root_fingerprint = sha256_fingerprint(&chain.root().der);
    if !config.trusts_root(&root_fingerprint) {
        return Err(RejectionReason::UntrustedRoot);
    }

    verify_chain_of_trust(&chain, now)?;

    // Signature against the leaf public key, audience in the same call.
    verify_rs256_signature(token, &chain.leaf().public_key_der, &config.audience_id)?;

    Ok(ValidatedToken {
        header: parsed.header,
        claims: parsed.claims,
    })
}
