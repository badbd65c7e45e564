// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Token-level validation checks and the rejection taxonomy.
//!
//! The checks here operate on an already-parsed token: temporal claims
//! against an injectable clock, the algorithm guard, and the final RS256
//! signature + audience verification. Certificate chain handling lives in
//! `isharejwt-x509`; the pipeline wiring lives in the `isharejwt` facade.

mod jwt_verifier;
mod rejection;
mod temporal;

pub use jwt_verifier::{require_rs256, verify_rs256_signature, EXPECTED_ALG};
pub use rejection::RejectionReason;
pub use temporal::validate_temporal_claims;
