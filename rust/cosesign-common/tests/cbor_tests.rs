// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Strictness of the header codec.

use cosesign_common::cbor::{decode, decode_header_map, encode, encode_header_map};
use cosesign_common::{CoseError, HeaderKey, HeaderMap, HeaderValue};

#[test]
fn nested_values_survive_encoding() {
    let mut inner = HeaderMap::new();
    inner.insert(HeaderKey::Text("x".to_string()), HeaderValue::Null);
    let value = HeaderValue::Array(vec![
        HeaderValue::Int(-7),
        HeaderValue::UInt(u64::MAX),
        HeaderValue::Bytes(vec![1, 2, 3]),
        HeaderValue::Bool(false),
        HeaderValue::Map(inner),
    ]);

    assert_eq!(decode(&encode(&value).unwrap()).unwrap(), value);
}

#[test]
fn integers_encode_minimally() {
    assert_eq!(encode(&HeaderValue::Int(-7)).unwrap(), vec![0x26]);
    assert_eq!(encode(&HeaderValue::Int(-37)).unwrap(), vec![0x38, 0x24]);
    assert_eq!(encode(&HeaderValue::Int(777)).unwrap(), vec![0x19, 0x03, 0x09]);
}

#[test]
fn unsigned_keys_are_normalized() {
    // {uint64(1): -7}
    let bytes = [0xa1, 0x1b, 0, 0, 0, 0, 0, 0, 0, 1, 0x26];
    let map = decode_header_map(&bytes).unwrap();
    assert_eq!(map.get(&HeaderKey::Int(1)), Some(&HeaderValue::Int(-7)));
}

#[test]
fn map_encoding_is_deterministic() {
    let mut map = HeaderMap::new();
    map.insert(HeaderKey::Text("b".to_string()), HeaderValue::Int(2));
    map.insert(HeaderKey::Int(4), HeaderValue::Bytes(vec![]));
    map.insert(HeaderKey::Int(1), HeaderValue::Int(-7));

    assert_eq!(
        encode_header_map(&map).unwrap(),
        vec![0xa3, 0x01, 0x26, 0x04, 0x40, 0x61, b'b', 0x02]
    );
}

#[test]
fn empty_bytes_decode_to_empty_map() {
    assert!(decode_header_map(&[]).unwrap().is_empty());
}

#[test]
fn trailing_bytes_are_rejected() {
    assert!(matches!(decode(&[0x01, 0x02]), Err(CoseError::Cbor(_))));
    assert!(matches!(decode_header_map(&[0xa0, 0xa0]), Err(CoseError::Cbor(_))));
}

#[test]
fn indefinite_lengths_are_rejected() {
    assert!(decode(&[0x9f, 0x01, 0xff]).is_err());
    assert!(decode_header_map(&[0xbf, 0x01, 0x26, 0xff]).is_err());
}

#[test]
fn duplicate_map_keys_are_rejected() {
    let err = decode_header_map(&[0xa2, 0x01, 0x26, 0x01, 0x26]).unwrap_err();
    assert!(matches!(err, CoseError::DuplicateHeaderLabel(HeaderKey::Int(1))));
}

#[test]
fn unsupported_types_are_rejected() {
    // Tagged value and a float.
    assert!(decode(&[0xc1, 0x01]).is_err());
    assert!(decode(&[0xf9, 0x3c, 0x00]).is_err());
    // Byte-string map key.
    assert!(decode_header_map(&[0xa1, 0x40, 0x01]).is_err());
}
