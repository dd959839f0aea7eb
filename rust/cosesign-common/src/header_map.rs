// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

/// A header label.
///
/// Integer keys are kept in one canonical width; whatever width the wire
/// carried is normalized to `i64` when decoding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeaderKey {
    Int(i64),
    Text(String),
}

/// A header value.
///
/// `UInt` only holds integers above `i64::MAX`; every integer that fits in
/// an `i64` is represented as `Int`.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Int(i64),
    UInt(u64),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<HeaderValue>),
    Map(HeaderMap),
    Bool(bool),
    Null,
}

pub type HeaderMap = BTreeMap<HeaderKey, HeaderValue>;

impl HeaderValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HeaderValue::Int(i) => Some(*i),
            HeaderValue::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            HeaderValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            HeaderValue::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<i64> for HeaderKey {
    fn from(i: i64) -> Self {
        HeaderKey::Int(i)
    }
}

impl From<i32> for HeaderKey {
    fn from(i: i32) -> Self {
        HeaderKey::Int(i64::from(i))
    }
}

impl From<&str> for HeaderKey {
    fn from(s: &str) -> Self {
        HeaderKey::Text(s.to_string())
    }
}

impl From<String> for HeaderKey {
    fn from(s: String) -> Self {
        HeaderKey::Text(s)
    }
}

impl From<i64> for HeaderValue {
    fn from(i: i64) -> Self {
        HeaderValue::Int(i)
    }
}

impl From<i32> for HeaderValue {
    fn from(i: i32) -> Self {
        HeaderValue::Int(i64::from(i))
    }
}

impl From<u64> for HeaderValue {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => HeaderValue::Int(i),
            Err(_) => HeaderValue::UInt(u),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(s: &str) -> Self {
        HeaderValue::Text(s.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(s: String) -> Self {
        HeaderValue::Text(s)
    }
}

impl From<Vec<u8>> for HeaderValue {
    fn from(b: Vec<u8>) -> Self {
        HeaderValue::Bytes(b)
    }
}

impl From<&[u8]> for HeaderValue {
    fn from(b: &[u8]) -> Self {
        HeaderValue::Bytes(b.to_vec())
    }
}

impl From<bool> for HeaderValue {
    fn from(b: bool) -> Self {
        HeaderValue::Bool(b)
    }
}

impl From<Vec<HeaderValue>> for HeaderValue {
    fn from(items: Vec<HeaderValue>) -> Self {
        HeaderValue::Array(items)
    }
}

impl From<HeaderMap> for HeaderValue {
    fn from(map: HeaderMap) -> Self {
        HeaderValue::Map(map)
    }
}
