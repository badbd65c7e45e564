// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeSet;

use isharejwt_x509::{normalize_fingerprint, sha256_fingerprint};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors building a [`TrustConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("trusted root entry {index} is not a valid PEM certificate: {reason}")]
    InvalidTrustedRoot { index: usize, reason: String },
}

/// Immutable trust parameters for one validation context.
///
/// Loaded once and shared read-only across concurrent validations.
/// Reconfiguration must swap the whole value atomically; in-flight
/// validations keep reading the config they started with.
#[derive(Debug, Clone)]
pub struct TrustConfig {
    /// Expected `aud` claim: this party's own identifier.
    pub audience_id: String,
    /// Canonicalized SHA-256 fingerprints of the trusted root certificates.
    trusted_roots: BTreeSet<String>,
}

impl TrustConfig {
    /// Builds a config from pre-computed root fingerprints.
    ///
    /// Values are canonicalized (uppercased, `:` separators stripped) before
    /// storage, so later comparison is exact-match over canonical digests.
    pub fn new<I, S>(audience_id: impl Into<String>, trusted_roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            audience_id: audience_id.into(),
            trusted_roots: trusted_roots
                .into_iter()
                .map(|f| normalize_fingerprint(f.as_ref()))
                .collect(),
        }
    }

    /// Builds a config by fingerprinting PEM-encoded trusted root
    /// certificates, the format trust lists are distributed in.
    pub fn from_trusted_root_pems<S: AsRef<str>>(
        audience_id: impl Into<String>,
        pems: &[S],
    ) -> Result<Self, ConfigError> {
        let mut trusted_roots = BTreeSet::new();
        for (index, entry) in pems.iter().enumerate() {
            let (_, pem) = x509_parser::pem::parse_x509_pem(entry.as_ref().as_bytes()).map_err(
                |e| ConfigError::InvalidTrustedRoot {
                    index,
                    reason: e.to_string(),
                },
            )?;
            pem.parse_x509()
                .map_err(|e| ConfigError::InvalidTrustedRoot {
                    index,
                    reason: e.to_string(),
                })?;
            trusted_roots.insert(sha256_fingerprint(&pem.contents));
        }
        Ok(Self {
            audience_id: audience_id.into(),
            trusted_roots,
        })
    }

    /// True when `fingerprint` exactly matches one of the trusted roots
    /// after canonicalization.
    pub fn trusts_root(&self, fingerprint: &str) -> bool {
        self.trusted_roots
            .contains(&normalize_fingerprint(fingerprint))
    }
}

/// One participant record in the party registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Party identifier (EORI).
    pub id: String,
    /// Registry status; only [`PARTY_STATUS_ACTIVE`] authorizes the party.
    pub status: String,
}

/// Registry status value marking a usable entry.
pub const PARTY_STATUS_ACTIVE: &str = "Active";

/// Flat roster lookup: the client is authorized when a record with its id
/// exists and is active.
///
/// This runs alongside [`crate::validate`], never inside it: chain trust and
/// roster membership are independent decisions.
pub fn is_active_party(client_id: &str, parties: &[Party]) -> bool {
    parties
        .iter()
        .any(|p| p.id == client_id && p.status == PARTY_STATUS_ACTIVE)
}
