// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared building blocks for COSE_Sign messages.
//!
//! This crate owns everything that is independent of a particular signature
//! algorithm family:
//! - the header value model and its CBOR representation
//! - the common header and IANA algorithm registries
//! - header compression (labels/names <-> integer tags/ids)
//! - the protected/unprotected `Headers` pair
//! - the `Sig_structure` builder and digest helper

pub mod algorithms;
pub mod cbor;
pub mod common_headers;
pub mod compression;
pub mod error;
pub mod header_map;
pub mod headers;
pub mod sig_structure;

pub use algorithms::{AlgId, Algorithm, EllipticCurve, HashAlgorithm, KeyParams};
pub use common_headers::CommonHeader;
pub use compression::{compress_headers, decompress_headers, try_compress_headers, try_decompress_headers};
pub use error::{CoseError, Result};
pub use header_map::{HeaderKey, HeaderMap, HeaderValue};
pub use headers::Headers;
pub use sig_structure::{build_sig_structure, hash_sig_structure, SigContext, SigStructure};
