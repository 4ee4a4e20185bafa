/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Run-length compression of encoded streams.
//!
//! The scheme matches the firmware-side decoder: data is processed in
//! pixel-sized blocks, each chunk starts with one control byte. A
//! control byte with the high bit clear is a repeat count followed by
//! a single block, with the high bit set the low 7 bits count literal
//! blocks that follow verbatim. Runs shorter than
//! [`RLE_RUN_THRESHOLD`] blocks are folded into literal chunks since a
//! repeat chunk only pays off past that length.
//!
//! Compressed bodies carry a 12-byte preamble of little-endian words:
//! method id, compressed length, decompressed length.

use lvimg_core::options::CompressMethod;

/// Minimum run length worth emitting as a repeat chunk.
pub const RLE_RUN_THRESHOLD: usize = 16;
/// Largest block count one control byte can carry.
pub const RLE_MAX_COUNT: usize = 127;
/// Byte length of the compressed stream preamble.
pub const COMPRESS_PREAMBLE_SIZE: usize = 12;

/// Output of the compressor.
///
/// `method` records what the stream actually contains, which may be
/// [`CompressMethod::None`] even when compression was requested:
/// a result that would not shrink the stream is discarded.
pub struct CompressionResult {
    /// The method the body is stored with
    pub method:       CompressMethod,
    /// The serialized body, preamble included when compressed
    pub data:         Vec<u8>,
    /// Length of the uncompressed input
    pub original_len: usize
}

/// Compress `data`, falling back to a plain copy when compression
/// does not pay.
///
/// # Arguments
/// - `data`: The stride-padded stream, palette included
/// - `method`: The requested compression
/// - `blk_size`: Bytes per pixel block, 1 for sub-byte formats
///
/// The fall back is never an error, the caller learns about it from
/// the result's `method` field.
pub fn compress(data: &[u8], method: CompressMethod, blk_size: usize) -> CompressionResult {
    let original_len = data.len();

    match method {
        CompressMethod::None => CompressionResult {
            method,
            data: data.to_vec(),
            original_len
        },
        CompressMethod::Rle => {
            let compressed = rle_compress(data, blk_size);
            let total = compressed.len() + COMPRESS_PREAMBLE_SIZE;

            if total >= original_len {
                log::trace!(
                    "RLE body of {total} bytes does not beat {original_len} plain bytes, storing uncompressed"
                );
                return CompressionResult {
                    method: CompressMethod::None,
                    data: data.to_vec(),
                    original_len
                };
            }

            let mut body = Vec::with_capacity(total);
            body.extend_from_slice(&method.method_id().to_le_bytes());
            body.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
            body.extend_from_slice(&(original_len as u32).to_le_bytes());
            body.extend_from_slice(&compressed);

            CompressionResult {
                method,
                data: body,
                original_len
            }
        }
    }
}

/// Run-length encode `data` on `blk_size` byte units.
///
/// Input whose length is not a multiple of the block size is
/// zero-padded to the next block boundary first, the decompressed
/// length in the preamble keeps the original byte count.
pub(crate) fn rle_compress(data: &[u8], blk_size: usize) -> Vec<u8> {
    debug_assert!(blk_size > 0);

    let mut padded;
    let data = if data.len() % blk_size != 0 {
        padded = data.to_vec();
        let rounded = (data.len() / blk_size + 1) * blk_size;
        padded.resize(rounded, 0);
        padded.as_slice()
    } else {
        data
    };

    let nblocks = data.len() / blk_size;
    let block = |i: usize| &data[i * blk_size..(i + 1) * blk_size];

    let mut out = Vec::with_capacity(data.len() / 2 + 16);
    let mut i = 0;

    while i < nblocks {
        let mut run = 1;
        while i + run < nblocks && run < RLE_MAX_COUNT && block(i + run) == block(i) {
            run += 1;
        }

        if run >= RLE_RUN_THRESHOLD {
            out.push(run as u8);
            out.extend_from_slice(block(i));
            i += run;
            continue;
        }

        // literal chunk: advance until a run worth a repeat chunk begins
        let mut literal = 0;
        while i + literal < nblocks && literal < RLE_MAX_COUNT {
            let at = i + literal;
            let mut ahead = 1;
            while at + ahead < nblocks
                && ahead < RLE_RUN_THRESHOLD
                && block(at + ahead) == block(at)
            {
                ahead += 1;
            }
            if ahead >= RLE_RUN_THRESHOLD {
                break;
            }
            literal += 1;
        }

        out.push(0x80 | literal as u8);
        out.extend_from_slice(&data[i * blk_size..(i + literal) * blk_size]);
        i += literal;
    }

    out
}
