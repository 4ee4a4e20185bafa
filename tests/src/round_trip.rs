/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Reading a binary artifact back with nothing but its own header
//! must reproduce the converter's quantized pixel values.

use lvimg_core::color_format::ColorFormat;
use lvimg_core::options::{CompressMethod, EncoderOptions};
use lvimg_encode::LvglEncoder;

use crate::{parse_v9_bin, random_opaque_rgba};

/// Channel quantization by rounding, the reference the converter must
/// agree with.
fn quantize(value: u8, bits: u32) -> u16 {
    let max = (1_u16 << bits) - 1;
    (u16::from(value) * max + 127) / 255
}

#[test]
fn rgb565_words_survive_the_header_described_walk() {
    const W: usize = 23;
    const H: usize = 11;

    let rgba = random_opaque_rgba(W, H, 0xF00D);
    let options = EncoderOptions::new(W, H, ColorFormat::RGB565).set_stride_align(8);

    let mut sink = vec![];
    LvglEncoder::new(&rgba, options).encode_bin(&mut sink).unwrap();

    let artifact = parse_v9_bin(&sink);
    assert_eq!(artifact.width, W);
    assert_eq!(artifact.height, H);
    assert_eq!(artifact.body.len(), artifact.stride * H);

    for y in 0..H {
        // walk by stride, the padding bytes are skipped entirely
        let row = &artifact.body[y * artifact.stride..];
        for x in 0..W {
            let word = u16::from_le_bytes([row[x * 2], row[x * 2 + 1]]);

            let pixel = &rgba[(y * W + x) * 4..];
            let expected =
                (quantize(pixel[0], 5) << 11) | (quantize(pixel[1], 6) << 5) | quantize(pixel[2], 5);

            assert_eq!(word, expected, "pixel ({x},{y}) mismatch");
        }
    }
}

#[test]
fn indexed_artifact_resolves_back_to_source_colors() {
    const W: usize = 16;
    const H: usize = 4;

    // 16 unique colors tiled over every row
    let palette_colors: Vec<[u8; 4]> =
        (0..16_u8).map(|i| [i * 13, 255 - i * 9, i * 5, 255]).collect();
    let mut rgba = vec![];
    for _ in 0..H {
        for color in &palette_colors {
            rgba.extend_from_slice(color);
        }
    }

    let options = EncoderOptions::new(W, H, ColorFormat::I4);
    let mut sink = vec![];
    LvglEncoder::new(&rgba, options).encode_bin(&mut sink).unwrap();

    let artifact = parse_v9_bin(&sink);
    let (palette, payload) = artifact.body.split_at(16 * 4);

    for y in 0..H {
        let row = &payload[y * artifact.stride..];
        for x in 0..W {
            let packed = row[x / 2];
            let index = usize::from(if x % 2 == 0 { packed >> 4 } else { packed & 0x0F });

            let entry = &palette[index * 4..index * 4 + 4];
            let source = &rgba[(y * W + x) * 4..(y * W + x) * 4 + 4];

            // palette entries are B,G,R,A
            let expected = [source[2], source[1], source[0], source[3]];
            assert_eq!(entry, &expected[..]);
        }
    }
}

#[test]
fn compressed_artifact_decodes_to_the_plain_body() {
    const W: usize = 32;
    const H: usize = 8;

    // flat image so RLE actually engages
    let rgba = vec![0x40_u8; W * H * 4];

    let plain_options = EncoderOptions::new(W, H, ColorFormat::RGB565);
    let rle_options = plain_options.set_compress(CompressMethod::Rle);

    let mut plain = vec![];
    LvglEncoder::new(&rgba, plain_options).encode_bin(&mut plain).unwrap();
    let mut compressed = vec![];
    LvglEncoder::new(&rgba, rle_options).encode_bin(&mut compressed).unwrap();

    let plain_artifact = parse_v9_bin(&plain);
    let artifact = parse_v9_bin(&compressed);
    assert_ne!(artifact.flags & 0x08, 0, "compressed flag must be set");

    // preamble: method, compressed size, decompressed size
    let body = &artifact.body;
    assert_eq!(&body[0..4], &1_u32.to_le_bytes());
    let compressed_len = u32::from_le_bytes(body[4..8].try_into().unwrap()) as usize;
    let decompressed_len = u32::from_le_bytes(body[8..12].try_into().unwrap()) as usize;
    assert_eq!(body.len(), 12 + compressed_len);
    assert_eq!(decompressed_len, plain_artifact.body.len());

    // firmware-style decode loop over 2-byte blocks
    let mut decoded = vec![];
    let mut pos = 12;
    while pos < body.len() {
        let ctrl = body[pos];
        pos += 1;
        if ctrl & 0x80 != 0 {
            let count = usize::from(ctrl & 0x7F) * 2;
            decoded.extend_from_slice(&body[pos..pos + count]);
            pos += count;
        } else {
            for _ in 0..ctrl {
                decoded.extend_from_slice(&body[pos..pos + 2]);
            }
            pos += 2;
        }
    }

    assert_eq!(decoded, plain_artifact.body);
}
