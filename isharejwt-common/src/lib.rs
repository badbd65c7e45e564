// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Compact-serialization JWT parsing.
//!
//! This crate decodes a JWT into its header, claims, and signature bytes
//! WITHOUT verifying anything. Signature verification only makes sense once
//! the signer's certificate chain has been validated, which happens in the
//! higher-level crates.

mod jwt;

pub use jwt::{parse_jwt, JwtClaims, JwtHeader, ParsedJwt};
