// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Incremental chain-of-trust validation.
//!
//! The chain is walked from the root end toward the leaf: an intermediate is
//! admitted into the trust store only after an already-admitted certificate
//! verifies its signature. The order is load-bearing: a certificate must be
//! vouched for by a trusted authority before it can vouch for anything
//! itself, never the reverse.

use isharejwt_validation::RejectionReason;
use p256::elliptic_curve::sec1::ToEncodedPoint as _;
use rsa::pkcs1v15;
use rsa::pkcs8::DecodePublicKey as _;
use rsa::RsaPublicKey;
use sha2::{Sha256, Sha384, Sha512};
use signature::Verifier as _;
use tracing::debug;

use crate::chain::{CertificateChain, ChainCertificate};

/// The set of certificates accepted as authoritative during one chain
/// validation.
///
/// A store is created fresh for every validation call, seeded with the
/// already-trusted root, and grows monotonically toward the leaf. It is
/// never persisted or shared: trust state must not leak between unrelated
/// tokens.
#[derive(Debug)]
pub struct TrustStore {
    certs: Vec<ChainCertificate>,
}

impl TrustStore {
    /// A store containing only the trusted root.
    pub fn with_root(root: ChainCertificate) -> Self {
        Self { certs: vec![root] }
    }

    /// Verifies `cert` against the current store contents: it must be inside
    /// its validity window at `now`, and an already-admitted certificate
    /// must have issued it.
    pub fn verify(&self, cert: &ChainCertificate, now: i64) -> Result<(), String> {
        if !cert.is_valid_at(now) {
            return Err(format!(
                "certificate is outside its validity window: {}",
                cert.subject_dn
            ));
        }

        for issuer in &self.certs {
            if issuer.subject_dn != cert.issuer_dn {
                continue;
            }
            if verify_cert_signature(
                &issuer.spki_der,
                &cert.tbs_der,
                &cert.signature_oid,
                &cert.signature,
            )
            .is_ok()
            {
                return Ok(());
            }
        }

        Err(format!(
            "no admitted certificate issued {}",
            cert.subject_dn
        ))
    }

    /// Admits a certificate that passed [`TrustStore::verify`].
    pub fn admit(&mut self, cert: ChainCertificate) {
        self.certs.push(cert);
    }
}

/// Validates the chain of trust from the (already fingerprint-matched) root
/// up to the leaf.
///
/// Intermediates are processed in reverse chain order, root-adjacent first,
/// each verified against the accumulating store and admitted only on
/// success; the first failure is terminal. The leaf is then verified against
/// the fully-populated store. A two-entry chain has no intermediates, so its
/// leaf is verified directly against the root-only store.
pub fn verify_chain_of_trust(chain: &CertificateChain, now: i64) -> Result<(), RejectionReason> {
    let mut store = TrustStore::with_root(chain.root().clone());

    for cert in chain.intermediates().iter().rev() {
        if let Err(e) = store.verify(cert, now) {
            debug!(subject = %cert.subject_dn, error = %e, "intermediate failed path validation");
            return Err(RejectionReason::BrokenIntermediateChain {
                subject: cert.subject_dn.clone(),
            });
        }
        store.admit(cert.clone());
    }

    let leaf = chain.leaf();
    if let Err(e) = store.verify(leaf, now) {
        debug!(subject = %leaf.subject_dn, error = %e, "leaf failed path validation");
        return Err(RejectionReason::UntrustedLeaf);
    }

    Ok(())
}

/// Verifies one certificate's signature with its issuer's public key,
/// dispatching on the certificate signature algorithm OID.
fn verify_cert_signature(
    issuer_spki_der: &[u8],
    tbs_der: &[u8],
    signature_oid: &str,
    signature: &[u8],
) -> Result<(), String> {
    match signature_oid {
        // sha256WithRSAEncryption / sha384WithRSAEncryption / sha512WithRSAEncryption
        "1.2.840.113549.1.1.11" => {
            let key = rsa_public_key_from_spki(issuer_spki_der)?;
            let vk = pkcs1v15::VerifyingKey::<Sha256>::new(key);
            let sig = pkcs1v15::Signature::try_from(signature)
                .map_err(|e| format!("bad RSA signature bytes: {e}"))?;
            vk.verify(tbs_der, &sig)
                .map_err(|_| "certificate signature verification failed".to_string())
        }
        "1.2.840.113549.1.1.12" => {
            let key = rsa_public_key_from_spki(issuer_spki_der)?;
            let vk = pkcs1v15::VerifyingKey::<Sha384>::new(key);
            let sig = pkcs1v15::Signature::try_from(signature)
                .map_err(|e| format!("bad RSA signature bytes: {e}"))?;
            vk.verify(tbs_der, &sig)
                .map_err(|_| "certificate signature verification failed".to_string())
        }
        "1.2.840.113549.1.1.13" => {
            let key = rsa_public_key_from_spki(issuer_spki_der)?;
            let vk = pkcs1v15::VerifyingKey::<Sha512>::new(key);
            let sig = pkcs1v15::Signature::try_from(signature)
                .map_err(|e| format!("bad RSA signature bytes: {e}"))?;
            vk.verify(tbs_der, &sig)
                .map_err(|_| "certificate signature verification failed".to_string())
        }

        // ecdsa-with-SHA256
        "1.2.840.10045.4.3.2" => {
            let pk = p256::PublicKey::from_public_key_der(issuer_spki_der)
                .map_err(|e| format!("bad P-256 issuer public key: {e}"))?;
            let ep = pk.to_encoded_point(false);
            let vk = p256::ecdsa::VerifyingKey::from_sec1_bytes(ep.as_bytes())
                .map_err(|e| format!("bad P-256 issuer public key: {e}"))?;
            let sig = p256::ecdsa::Signature::from_der(signature)
                .map_err(|e| format!("bad ECDSA signature bytes: {e}"))?;
            vk.verify(tbs_der, &sig)
                .map_err(|_| "certificate signature verification failed".to_string())
        }

        _ => Err(format!(
            "unsupported certificate signature algorithm OID: {signature_oid}"
        )),
    }
}

fn rsa_public_key_from_spki(spki_der: &[u8]) -> Result<RsaPublicKey, String> {
    RsaPublicKey::from_public_key_der(spki_der).map_err(|e| format!("bad RSA public key: {e}"))
}
