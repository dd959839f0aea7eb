// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosesign_abstractions::{
    AlgorithmImplementation, AlgorithmImplementationId, AlgorithmImplementationRegistration, CryptoRngCore,
    MessageSigner, MessageVerifier,
};
use cosesign_common::Result;

use crate::signer::EcdsaSigner;
use crate::verifier::EcdsaVerifier;
use crate::SUPPORTED_ALGORITHMS;

pub const ECDSA_IMPLEMENTATION_ID: AlgorithmImplementationId =
    AlgorithmImplementationId(uuid::uuid!("0d5f4a43-7f0b-4c2e-9a55-2f1f6f0b8e21"));
pub const ECDSA_IMPLEMENTATION_NAME: &str = "ecdsa";

#[derive(Debug, Default)]
pub struct EcdsaImplementation;

pub static ECDSA: EcdsaImplementation = EcdsaImplementation;

impl AlgorithmImplementation for EcdsaImplementation {
    fn name(&self) -> &'static str {
        ECDSA_IMPLEMENTATION_NAME
    }

    fn supports_algorithm(&self, alg_name: &str) -> bool {
        SUPPORTED_ALGORITHMS.contains(&alg_name)
    }

    fn new_signer(&self, alg_name: &str, rng: &mut dyn CryptoRngCore) -> Result<Box<dyn MessageSigner>> {
        Ok(Box::new(EcdsaSigner::generate(alg_name, rng)?))
    }

    fn new_signer_from_pkcs8(&self, alg_name: &str, der: &[u8]) -> Result<Box<dyn MessageSigner>> {
        Ok(Box::new(EcdsaSigner::from_pkcs8_der(alg_name, der)?))
    }

    fn new_verifier_from_public_key_der(&self, alg_name: &str, der: &[u8]) -> Result<Box<dyn MessageVerifier>> {
        Ok(Box::new(EcdsaVerifier::from_public_key_der(alg_name, der)?))
    }
}

inventory::submit! {
    AlgorithmImplementationRegistration {
        id: ECDSA_IMPLEMENTATION_ID,
        name: ECDSA_IMPLEMENTATION_NAME,
        priority: 100,
        implementation: &ECDSA,
    }
}
