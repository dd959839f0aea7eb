// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared interfaces for the COSE_Sign Rust crates.
//!
//! This crate exists to prevent circular dependencies between the facade
//! (`cosesign`) and the algorithm families (`cosesign-ecdsa` and future
//! ones). It holds the signer/verifier traits the Sign/Verify protocol is
//! written against and the link-time registry of algorithm families.

pub mod algorithm_implementation;
pub mod signer;

pub use algorithm_implementation::{
    find_implementation, implementation_name, implementations_ordered, AlgorithmImplementation,
    AlgorithmImplementationId, AlgorithmImplementationRegistration,
};
pub use signer::{sign_digest, verify_digest, AlgorithmMethod, ByteSigner, ByteVerifier, MessageSigner, MessageVerifier};

pub use rand_core::CryptoRngCore;
