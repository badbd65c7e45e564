// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use isharejwt_common::JwtClaims;

use crate::RejectionReason;

/// Validates the token's temporal claims against `now` (unix seconds).
///
/// `exp` is required and must not lie in the past. A not-before instant is
/// taken from `nbf`, falling back to `iat`; a token carrying neither is
/// invalid. Boundary instants (`exp == now`, `nbf == now`) are accepted.
pub fn validate_temporal_claims(claims: &JwtClaims, now: i64) -> Result<(), RejectionReason> {
    let exp = claims.exp.ok_or(RejectionReason::MissingTemporalClaim)?;
    if exp < now {
        return Err(RejectionReason::Expired);
    }

    let not_before = claims
        .nbf
        .or(claims.iat)
        .ok_or(RejectionReason::MissingTemporalClaim)?;
    if not_before > now {
        return Err(RejectionReason::NotYetValid);
    }

    Ok(())
}
