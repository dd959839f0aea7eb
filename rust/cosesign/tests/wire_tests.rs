// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Sign encoding and strict parsing.

mod common;

use common::*;
use cosesign::{
    encode_cose_sign, parse_cose_sign, parse_cose_sign_from_reader, parse_cose_sign_from_reader_with_max_len,
    CoseError, DecodeOptions, EcdsaSigner, EncodeOptions, HeaderKey, HeaderValue, Headers, SignMessage,
};
use p256::elliptic_curve::rand_core::OsRng;

fn signed_hello() -> (SignMessage, EcdsaSigner) {
    let signer = EcdsaSigner::generate("ES256", &mut OsRng).unwrap();
    let mut msg = hello_message(&["ES256"]);
    msg.headers = Headers::new()
        .with_protected("content type", "text/plain")
        .with_unprotected("kid", b"sender".as_slice());
    msg.sign(&mut OsRng, &[], &[&signer]).unwrap();
    (msg, signer)
}

/// A decoded message carries the same headers and still verifies.
#[test]
fn encoded_message_parses_back_and_verifies() {
    let (msg, signer) = signed_hello();
    let bytes = encode_cose_sign(&msg, &EncodeOptions::default()).unwrap();
    assert_eq!(bytes[0], 0x84);

    let parsed = parse_cose_sign(&bytes).unwrap();
    assert_eq!(parsed, msg);
    parsed.verify(&[], &[&signer.public_verifier()]).unwrap();

    // Re-encoding is byte-identical.
    assert_eq!(parsed.to_cbor(&EncodeOptions::default()).unwrap(), bytes);
}

#[test]
fn headers_travel_compressed() {
    let (msg, _) = signed_hello();
    let bytes = msg.to_cbor(&EncodeOptions::default()).unwrap();

    let mut dec = minicbor::Decoder::new(&bytes);
    assert_eq!(dec.array().unwrap(), Some(4));
    // {3: "text/plain"}
    let protected = dec.bytes().unwrap();
    assert_eq!(&protected[..2], &[0xa1, 0x03]);
    // {4: h'73656e646572'}
    assert_eq!(dec.map().unwrap(), Some(1));
    assert_eq!(dec.i64().unwrap(), 4);
    assert_eq!(dec.bytes().unwrap(), b"sender");
}

#[test]
fn tagged_encoding_is_accepted() {
    let (msg, signer) = signed_hello();
    let bytes = encode_cose_sign(&msg, &EncodeOptions { tagged: true }).unwrap();
    assert_eq!(&bytes[..3], &[0xd8, 0x62, 0x84]);

    let parsed = SignMessage::from_cbor(&bytes).unwrap();
    parsed.verify(&[], &[&signer.public_verifier()]).unwrap();
}

#[test]
fn other_tags_are_rejected() {
    let (msg, _) = signed_hello();
    let mut bytes = vec![0xd2];
    bytes.extend(encode_cose_sign(&msg, &EncodeOptions::default()).unwrap());
    assert!(matches!(parse_cose_sign(&bytes), Err(CoseError::Cbor(_))));
}

#[test]
fn structural_errors_are_rejected() {
    let (msg, _) = signed_hello();
    let bytes = encode_cose_sign(&msg, &EncodeOptions::default()).unwrap();

    let mut trailing = bytes.clone();
    trailing.push(0x00);
    assert!(parse_cose_sign(&trailing).is_err());

    assert!(parse_cose_sign(&bytes[..bytes.len() - 1]).is_err());

    // Three-element top-level array.
    assert!(parse_cose_sign(&[0x83, 0x40, 0xa0, 0xf6]).is_err());
    // Text payload.
    assert!(parse_cose_sign(&[0x84, 0x40, 0xa0, 0x61, b'x', 0x80]).is_err());
    // Indefinite signatures array.
    assert!(parse_cose_sign(&[0x84, 0x40, 0xa0, 0xf6, 0x9f, 0xff]).is_err());
    // COSE_Signature with two elements.
    assert!(parse_cose_sign(&[0x84, 0x40, 0xa0, 0xf6, 0x81, 0x82, 0x40, 0xa0]).is_err());
}

#[test]
fn null_payload_and_unsigned_signatures_decode() {
    let msg = parse_cose_sign(&[0x84, 0x40, 0xa0, 0xf6, 0x81, 0x83, 0x43, 0xa1, 0x01, 0x26, 0xa0, 0x40]).unwrap();
    assert!(msg.payload.is_none());

    let sig = &msg.signatures.as_ref().unwrap()[0];
    assert!(sig.signature_bytes.is_none());
    assert_eq!(sig.algorithm().unwrap(), -7);
    assert_eq!(
        sig.headers.as_ref().unwrap().protected.get(&HeaderKey::Text("alg".to_string())),
        Some(&HeaderValue::Text("ES256".to_string()))
    );
}

/// Protected bytes are signed as received, even when not canonically encoded.
#[test]
fn received_protected_bytes_are_what_gets_verified() {
    let signer = EcdsaSigner::generate("ES256", &mut OsRng).unwrap();

    // COSE_Signature protected header {1: -7} with -7 spelled in two bytes.
    let template = [0x84, 0x40, 0xa0, 0x45, b'h', b'e', b'l', b'l', b'o', 0x81, 0x83, 0x44, 0xa1, 0x01, 0x38, 0x06, 0xa0, 0x40];
    let mut msg = parse_cose_sign(&template).unwrap();
    msg.sign(&mut OsRng, &[], &[&signer]).unwrap();

    let bytes = encode_cose_sign(&msg, &EncodeOptions::default()).unwrap();
    assert!(bytes.windows(4).any(|w| w == [0xa1, 0x01, 0x38, 0x06]));

    parse_cose_sign(&bytes)
        .unwrap()
        .verify(&[], &[&signer.public_verifier()])
        .unwrap();
}

#[test]
fn reader_input_is_bounded() {
    let (msg, signer) = signed_hello();
    let bytes = encode_cose_sign(&msg, &EncodeOptions::default()).unwrap();

    let parsed = parse_cose_sign_from_reader(bytes.as_slice(), &DecodeOptions::default()).unwrap();
    parsed.verify(&[], &[&signer.public_verifier()]).unwrap();

    assert!(parse_cose_sign_from_reader_with_max_len(bytes.as_slice(), bytes.len()).is_ok());

    let err = parse_cose_sign_from_reader(
        bytes.as_slice(),
        &DecodeOptions {
            max_len: Some(bytes.len() - 1),
        },
    )
    .unwrap_err();
    assert!(matches!(err, CoseError::InputTooLarge(n) if n == bytes.len() - 1));

    // The largest possible limit means no limit.
    let unbounded = DecodeOptions {
        max_len: Some(usize::MAX),
    };
    parse_cose_sign_from_reader(bytes.as_slice(), &unbounded)
        .unwrap()
        .verify(&[], &[&signer.public_verifier()])
        .unwrap();
    assert!(parse_cose_sign_from_reader_with_max_len(bytes.as_slice(), usize::MAX).is_ok());
}

/// Empty signature bytes are an unsigned slot, in memory and on the wire.
#[test]
fn empty_signature_bytes_are_unsigned() {
    let signer = EcdsaSigner::generate("ES256", &mut OsRng).unwrap();
    let mut msg = hello_message(&["ES256"]);
    msg.signatures.as_mut().unwrap()[0].signature_bytes = Some(Vec::new());
    assert!(!msg.signatures.as_ref().unwrap()[0].is_signed());

    let parsed = parse_cose_sign(&encode_cose_sign(&msg, &EncodeOptions::default()).unwrap()).unwrap();
    assert!(parsed.signatures.as_ref().unwrap()[0].signature_bytes.is_none());

    msg.sign(&mut OsRng, &[], &[&signer]).unwrap();
    msg.verify(&[], &[&signer.public_verifier()]).unwrap();
}
