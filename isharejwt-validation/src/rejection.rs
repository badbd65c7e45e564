// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The rejection taxonomy.
//!
//! Every failure mode of the validation pipeline maps to exactly one variant.
//! The taxonomy exists for logging and diagnostics: callers are expected to
//! collapse all variants into one uniform protocol-level failure, so the
//! specific reason is never disclosed to the presenting client.

use thiserror::Error;

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectionReason {
    /// Not a three-segment JWT, or the segments do not decode to JSON.
    #[error("token is not a well-formed JWT")]
    MalformedToken,

    /// `exp` lies in the past.
    #[error("token has expired")]
    Expired,

    /// `nbf` (or `iat`, when `nbf` is absent) lies in the future.
    #[error("token is not valid yet")]
    NotYetValid,

    /// The token carries neither `nbf` nor `iat`, or no `exp` at all.
    #[error("token carries no usable temporal claim")]
    MissingTemporalClaim,

    /// Header `alg` is anything other than RS256.
    #[error("unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// `iss` does not equal the issuer the caller required.
    #[error("iss does not match the required issuer")]
    RequiredIssuerMismatch,

    /// The header has no `x5c` certificate chain.
    #[error("x5c certificate chain is missing")]
    MissingCertificateChain,

    /// `x5c` holds fewer than two certificates; a lone leaf cannot
    /// establish trust.
    #[error("x5c chain requires at least two certificates")]
    ChainTooShort,

    /// An `x5c` entry is not base64, or not a DER certificate.
    #[error("x5c entry {0} is not a valid DER certificate")]
    InvalidCertificateEncoding(usize),

    /// The leaf certificate subject has no `serialNumber` attribute.
    #[error("leaf certificate subject carries no serialNumber")]
    MissingSerialNumber,

    /// `iss` does not equal the leaf certificate's subject `serialNumber`.
    #[error("iss does not match the leaf certificate serialNumber")]
    IssuerMismatch,

    /// The chain's root fingerprint is not in the trusted list.
    #[error("chain root is not in the trusted list")]
    UntrustedRoot,

    /// An intermediate failed path validation against the trust store.
    #[error("intermediate certificate failed path validation: {subject}")]
    BrokenIntermediateChain { subject: String },

    /// The leaf failed path validation against the fully-populated store.
    #[error("leaf certificate failed path validation")]
    UntrustedLeaf,

    /// The RS256 signature does not verify against the leaf public key.
    #[error("signature verification failed")]
    SignatureInvalid,

    /// `aud` is absent or does not equal the configured audience.
    #[error("aud does not match the expected audience")]
    AudienceMismatch,
}

impl RejectionReason {
    /// Stable machine-readable code for logs and metrics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::Expired => "EXPIRED",
            Self::NotYetValid => "NOT_YET_VALID",
            Self::MissingTemporalClaim => "MISSING_TEMPORAL_CLAIM",
            Self::UnsupportedAlgorithm(_) => "UNSUPPORTED_ALGORITHM",
            Self::RequiredIssuerMismatch => "REQUIRED_ISSUER_MISMATCH",
            Self::MissingCertificateChain => "MISSING_CERTIFICATE_CHAIN",
            Self::ChainTooShort => "CHAIN_TOO_SHORT",
            Self::InvalidCertificateEncoding(_) => "INVALID_CERTIFICATE_ENCODING",
            Self::MissingSerialNumber => "MISSING_SERIAL_NUMBER",
            Self::IssuerMismatch => "ISSUER_MISMATCH",
            Self::UntrustedRoot => "UNTRUSTED_ROOT",
            Self::BrokenIntermediateChain { .. } => "BROKEN_INTERMEDIATE_CHAIN",
            Self::UntrustedLeaf => "UNTRUSTED_LEAF",
            Self::SignatureInvalid => "SIGNATURE_INVALID",
            Self::AudienceMismatch => "AUDIENCE_MISMATCH",
        }
    }
}
