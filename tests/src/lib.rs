/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports, unused)]

use nanorand::{Rng, WyRand};
use xxhash_rust::xxh3::xxh3_128;

mod c_source;
mod determinism;
mod round_trip;
mod scenarios;

pub fn hash(contents: &[u8]) -> u128 {
    xxh3_128(contents)
}

/// Deterministic pseudo-random RGBA buffer with opaque alpha.
pub fn random_opaque_rgba(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = WyRand::new_seed(seed);
    let mut out = Vec::with_capacity(width * height * 4);

    for _ in 0..width * height {
        out.push(rng.generate::<u8>());
        out.push(rng.generate::<u8>());
        out.push(rng.generate::<u8>());
        out.push(255);
    }
    out
}

/// A parsed v9 binary artifact.
pub struct BinArtifact {
    pub format_id: u8,
    pub flags:     u16,
    pub width:     usize,
    pub height:    usize,
    pub stride:    usize,
    pub body:      Vec<u8>
}

/// Split a v9 binary artifact back into its header fields and body
/// using nothing but the bytes themselves.
pub fn parse_v9_bin(bytes: &[u8]) -> BinArtifact {
    assert!(bytes.len() >= 12, "artifact shorter than a v9 header");
    assert_eq!(bytes[0], 0x19, "bad v9 magic");

    let word = |at: usize| u16::from_le_bytes(bytes[at..at + 2].try_into().unwrap());

    assert_eq!(word(10), 0, "reserved header word must be zero");

    BinArtifact {
        format_id: bytes[1],
        flags:     word(2),
        width:     usize::from(word(4)),
        height:    usize::from(word(6)),
        stride:    usize::from(word(8)),
        body:      bytes[12..].to_vec()
    }
}
