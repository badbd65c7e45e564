// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Trust-framework JWT validation.
//!
//! Validates client-presented RS256 JWTs that carry their signer's X.509
//! certificate chain in the `x5c` header: temporal claims, algorithm,
//! issuer-to-certificate binding, root-of-trust fingerprint matching,
//! incremental chain-of-trust verification from root to leaf, and finally
//! the token signature against the leaf certificate's public key.
//!
//! Validation is a pure, synchronous computation: no I/O, no shared mutable
//! state. A [`TrustConfig`] may be shared read-only across concurrent calls;
//! everything else is allocated per call.
//!
//! ```no_run
//! use isharejwt::{validate, TrustConfig};
//!
//! let config = TrustConfig::new(
//!     "EU.EORI.NLSATELLITE",
//!     ["5C4C2A7E83D4A9BBE22D6F81C31A5C4C2A7E83D4A9BBE22D6F81C31A5C4C2A7E"],
//! );
//!
//! let verdict = validate("<compact JWT>", &config, None, None);
//! assert!(verdict.is_err());
//! ```

mod config;
mod validator;

pub use config::{is_active_party, ConfigError, Party, TrustConfig, PARTY_STATUS_ACTIVE};
pub use validator::{validate, ValidatedToken};

pub use isharejwt_common::{parse_jwt, JwtClaims, JwtHeader, ParsedJwt};
pub use isharejwt_validation::RejectionReason;
pub use isharejwt_x509::{
    normalize_fingerprint, sha256_fingerprint, verify_chain_of_trust, CertificateChain,
    ChainCertificate, Subject, TrustStore,
};
