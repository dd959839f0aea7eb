// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use cosesign::{
    AlgorithmMethod, ByteSigner, ByteVerifier, CoseError, CryptoRngCore, MessageSigner, MessageVerifier, Result,
    SignMessage, Signature,
};
use rand_core::{CryptoRng, RngCore};

/// Deterministic byte stream for reproducible tests.
pub struct CountingRng(pub u8);

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        let mut b = [0u8; 4];
        self.fill_bytes(&mut b);
        u32::from_le_bytes(b)
    }

    fn next_u64(&mut self) -> u64 {
        let mut b = [0u8; 8];
        self.fill_bytes(&mut b);
        u64::from_le_bytes(b)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for b in dest {
            self.0 = self.0.wrapping_add(1);
            *b = self.0;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for CountingRng {}

/// Signs by echoing the digest and counts every crypto call.
pub struct RecordingKey {
    pub alg: i64,
    pub calls: AtomicUsize,
}

impl RecordingKey {
    pub fn new(alg: i64) -> Self {
        Self {
            alg,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AlgorithmMethod for RecordingKey {
    fn algorithm(&self) -> i64 {
        self.alg
    }
}

impl ByteSigner for RecordingKey {
    fn sign(&self, _rng: &mut dyn CryptoRngCore, digest: &[u8]) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(digest.to_vec())
    }
}

impl ByteVerifier for RecordingKey {
    fn verify(&self, digest: &[u8], signature: &[u8]) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if digest == signature {
            Ok(())
        } else {
            Err(CoseError::VerificationFailed)
        }
    }
}

impl MessageSigner for RecordingKey {
    fn verifier(&self) -> Result<Box<dyn MessageVerifier>> {
        Ok(Box::new(RecordingKey::new(self.alg)))
    }
}

/// A "hello" message with one unsigned signature per algorithm name.
pub fn hello_message(algs: &[&str]) -> SignMessage {
    let mut msg = SignMessage::with_payload(b"hello".to_vec());
    for alg in algs {
        msg.add_signature(Signature::with_algorithm(alg));
    }
    msg
}
