// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! ECDSA algorithm family (ES256, ES384, ES512).
//!
//! COSE carries ECDSA signatures as the raw `r || s` concatenation, each
//! half left-padded to the curve's field size (RFC 8152 section 8.1).

pub mod implementation;
pub mod key;
pub mod signer;
pub mod verifier;

pub use implementation::{EcdsaImplementation, ECDSA, ECDSA_IMPLEMENTATION_ID, ECDSA_IMPLEMENTATION_NAME};
pub use key::EcdsaPrivateKey;
pub use signer::EcdsaSigner;
pub use verifier::EcdsaVerifier;

use cosesign_common::{Algorithm, CoseError, EllipticCurve, Result};

pub const SUPPORTED_ALGORITHMS: [&str; 3] = ["ES256", "ES384", "ES512"];

/// Resolve an ECDSA algorithm name to its registry entry and curve.
pub(crate) fn resolve(alg_name: &str) -> Result<(&'static Algorithm, EllipticCurve)> {
    if !SUPPORTED_ALGORITHMS.contains(&alg_name) {
        return Err(CoseError::UnsupportedAlgorithm(alg_name.to_string()));
    }
    let alg = Algorithm::by_name(alg_name)?;
    let curve = alg
        .curve()
        .ok_or_else(|| CoseError::UnsupportedAlgorithm(alg_name.to_string()))?;
    Ok((alg, curve))
}
