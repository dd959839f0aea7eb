// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! High-level COSE_Sign (RFC 8152 section 4.1) facade.
//!
//! Build a [`SignMessage`], attach one [`Signature`] per signer, then call
//! [`SignMessage::sign`] and [`SignMessage::verify`]. Algorithm families are
//! found through the `cosesign-abstractions` registry; ECDSA (ES256, ES384,
//! ES512) is linked in by this crate.

mod cose_sign;
mod options;
mod registry;
mod sign_message;
mod signature;

pub use cose_sign::{encode_cose_sign, parse_cose_sign, parse_cose_sign_from_reader, parse_cose_sign_from_reader_with_max_len, COSE_SIGN_TAG};
pub use options::{DecodeOptions, EncodeOptions};
pub use registry::{new_signer, new_signer_from_pkcs8, new_verifier_from_public_key_der};
pub use sign_message::SignMessage;
pub use signature::Signature;

pub use cosesign_abstractions::{
    find_implementation, AlgorithmImplementation, AlgorithmMethod, ByteSigner, ByteVerifier, CryptoRngCore,
    MessageSigner, MessageVerifier,
};
pub use cosesign_common::{
    compress_headers, decompress_headers, Algorithm, CommonHeader, CoseError, HeaderKey, HeaderMap, HeaderValue,
    Headers, Result, SigContext,
};
pub use cosesign_ecdsa::{EcdsaPrivateKey, EcdsaSigner, EcdsaVerifier};
