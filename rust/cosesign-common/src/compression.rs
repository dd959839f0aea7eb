// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Header compression.
//!
//! Compression replaces common header labels with their integer tags and an
//! `alg` algorithm name with its IANA id. Decompression is the inverse.
//! Entries that are not recognized pass through untouched, so for any map
//! built only from known labels and names the two are exact inverses.

use crate::algorithms::Algorithm;
use crate::common_headers::CommonHeader;
use crate::error::{CoseError, Result};
use crate::header_map::{HeaderKey, HeaderMap, HeaderValue};

fn compress_entry(key: &HeaderKey, value: &HeaderValue) -> (HeaderKey, HeaderValue) {
    let HeaderKey::Text(label) = key else {
        return (key.clone(), value.clone());
    };
    let Ok(header) = CommonHeader::from_name(label) else {
        return (key.clone(), value.clone());
    };

    let value = match (header, value) {
        (CommonHeader::Alg, HeaderValue::Text(name)) => match Algorithm::by_name(name) {
            Ok(alg) => HeaderValue::Int(alg.id),
            Err(_) => value.clone(),
        },
        _ => value.clone(),
    };
    (header.key(), value)
}

fn decompress_entry(key: &HeaderKey, value: &HeaderValue) -> (HeaderKey, HeaderValue) {
    let HeaderKey::Int(tag) = key else {
        return (key.clone(), value.clone());
    };
    let Ok(header) = CommonHeader::from_id(*tag) else {
        return (key.clone(), value.clone());
    };

    let value = match (header, value) {
        (CommonHeader::Alg, HeaderValue::Int(id)) => match Algorithm::by_id(*id) {
            Ok(alg) => HeaderValue::Text(alg.name.to_string()),
            Err(_) => value.clone(),
        },
        _ => value.clone(),
    };
    (header.label(), value)
}

fn rewrite(
    headers: &HeaderMap,
    entry: fn(&HeaderKey, &HeaderValue) -> (HeaderKey, HeaderValue),
) -> Result<HeaderMap> {
    let mut out = HeaderMap::new();
    for (k, v) in headers {
        let (k, v) = entry(k, v);
        if out.contains_key(&k) {
            return Err(CoseError::DuplicateHeaderLabel(k));
        }
        out.insert(k, v);
    }
    Ok(out)
}

/// Compress a header map.
///
/// If a label and its tag are both present (for example `"alg"` and `1`),
/// the entry produced from the text label wins. Use
/// [`try_compress_headers`] to reject such maps instead.
pub fn compress_headers(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .map(|(k, v)| compress_entry(k, v))
        .collect()
}

/// Decompress a header map. Collisions resolve like [`compress_headers`],
/// with the integer-tagged entry winning.
pub fn decompress_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    // Text keys sort after integer keys; visit them first so the converted
    // integer entries overwrite them.
    for (k, v) in headers.iter().rev() {
        let (k, v) = decompress_entry(k, v);
        out.insert(k, v);
    }
    out
}

/// Like [`compress_headers`], but fails with `DuplicateHeaderLabel` when two
/// entries compress to the same key.
pub fn try_compress_headers(headers: &HeaderMap) -> Result<HeaderMap> {
    rewrite(headers, compress_entry)
}

/// Like [`decompress_headers`], but fails with `DuplicateHeaderLabel` when
/// two entries decompress to the same key.
pub fn try_decompress_headers(headers: &HeaderMap) -> Result<HeaderMap> {
    rewrite(headers, decompress_entry)
}
