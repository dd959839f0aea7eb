// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Create signers and verifiers by algorithm name through whichever
//! registered family supports it.

use cosesign_abstractions::{find_implementation, AlgorithmImplementation, MessageSigner, MessageVerifier};
use cosesign_common::{CoseError, Result};
use rand_core::CryptoRngCore;

// Keep the built-in ECDSA family linked so its registration is visible.
use cosesign_ecdsa as _;

fn implementation_for(alg_name: &str) -> Result<&'static dyn AlgorithmImplementation> {
    find_implementation(alg_name).ok_or_else(|| CoseError::NoImplementation(alg_name.to_string()))
}

/// Generate a signer with a fresh key for `alg_name`.
pub fn new_signer(alg_name: &str, rng: &mut dyn CryptoRngCore) -> Result<Box<dyn MessageSigner>> {
    let family = implementation_for(alg_name)?;
    tracing::debug!(alg = alg_name, family = family.name(), "creating signer");
    family.new_signer(alg_name, rng)
}

pub fn new_signer_from_pkcs8(alg_name: &str, der: &[u8]) -> Result<Box<dyn MessageSigner>> {
    implementation_for(alg_name)?.new_signer_from_pkcs8(alg_name, der)
}

pub fn new_verifier_from_public_key_der(alg_name: &str, der: &[u8]) -> Result<Box<dyn MessageVerifier>> {
    implementation_for(alg_name)?.new_verifier_from_public_key_der(alg_name, der)
}
