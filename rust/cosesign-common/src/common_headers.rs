// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The common COSE header parameters (RFC 8152 section 3.1).

use crate::error::{CoseError, Result};
use crate::header_map::HeaderKey;

/// One of the seven common header parameters. Names match exactly
/// (case-sensitive).
#[repr(i64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommonHeader {
    Alg = 1,
    Crit = 2,
    ContentType = 3,
    KeyId = 4,
    Iv = 5,
    PartialIv = 6,
    CounterSignature = 7,
}

impl CommonHeader {
    pub const ALL: [CommonHeader; 7] = [
        CommonHeader::Alg,
        CommonHeader::Crit,
        CommonHeader::ContentType,
        CommonHeader::KeyId,
        CommonHeader::Iv,
        CommonHeader::PartialIv,
        CommonHeader::CounterSignature,
    ];

    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        match self {
            CommonHeader::Alg => "alg",
            CommonHeader::Crit => "crit",
            CommonHeader::ContentType => "content type",
            CommonHeader::KeyId => "kid",
            CommonHeader::Iv => "IV",
            CommonHeader::PartialIv => "Partial IV",
            CommonHeader::CounterSignature => "counter signature",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|h| h.name() == name)
            .ok_or_else(|| CoseError::UnknownHeaderLabel(name.to_string()))
    }

    pub fn from_id(id: i64) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|h| h.id() == id)
            .ok_or(CoseError::UnknownHeaderTag(id))
    }

    /// Compressed map key.
    pub fn key(self) -> HeaderKey {
        HeaderKey::Int(self.id())
    }

    /// Uncompressed map key.
    pub fn label(self) -> HeaderKey {
        HeaderKey::Text(self.name().to_string())
    }
}
