// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Extensible algorithm family registry.
//!
//! Families are registered using `inventory::submit!`.
//! The `cosesign` facade uses this registry to create signers and verifiers
//! by algorithm name without hard-coding any particular family.

use cosesign_common::Result;
use rand_core::CryptoRngCore;

use crate::signer::{MessageSigner, MessageVerifier};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AlgorithmImplementationId(pub uuid::Uuid);

/// One family of signature algorithms (for example ECDSA).
///
/// Contract:
/// - `supports_algorithm` is true exactly for the names the constructors accept.
/// - Constructors fail with `UnsupportedAlgorithm` for any other name.
pub trait AlgorithmImplementation: Sync {
    fn name(&self) -> &'static str;

    fn supports_algorithm(&self, alg_name: &str) -> bool;

    /// Generate a fresh key for `alg_name`.
    fn new_signer(&self, alg_name: &str, rng: &mut dyn CryptoRngCore) -> Result<Box<dyn MessageSigner>>;

    /// Load a PKCS#8 DER private key for `alg_name`.
    fn new_signer_from_pkcs8(&self, alg_name: &str, der: &[u8]) -> Result<Box<dyn MessageSigner>>;

    /// Load a SubjectPublicKeyInfo DER public key for `alg_name`.
    fn new_verifier_from_public_key_der(&self, alg_name: &str, der: &[u8]) -> Result<Box<dyn MessageVerifier>>;
}

pub struct AlgorithmImplementationRegistration {
    pub id: AlgorithmImplementationId,
    pub name: &'static str,
    pub priority: i32,
    pub implementation: &'static dyn AlgorithmImplementation,
}

inventory::collect!(AlgorithmImplementationRegistration);

/// Iterate all registered families ordered by descending priority.
pub fn implementations_ordered() -> Vec<&'static AlgorithmImplementationRegistration> {
    let mut regs: Vec<_> = inventory::iter::<AlgorithmImplementationRegistration>.into_iter().collect();
    regs.sort_by(|a, b| b.priority.cmp(&a.priority));
    regs
}

/// The highest-priority family that supports `alg_name`.
pub fn find_implementation(alg_name: &str) -> Option<&'static dyn AlgorithmImplementation> {
    implementations_ordered()
        .into_iter()
        .map(|r| r.implementation)
        .find(|i| i.supports_algorithm(alg_name))
}

pub fn implementation_name(id: AlgorithmImplementationId) -> Option<&'static str> {
    inventory::iter::<AlgorithmImplementationRegistration>
        .into_iter()
        .find(|r| r.id == id)
        .map(|r| r.name)
}
