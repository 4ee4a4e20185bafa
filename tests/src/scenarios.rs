/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! End-to-end conversions checked against hand-computed bytes.

use lvimg_core::color_format::ColorFormat;
use lvimg_core::options::EncoderOptions;
use lvimg_encode::LvglEncoder;

use crate::parse_v9_bin;

#[test]
fn primaries_to_rgb565_words() {
    let rgba = [
        255, 0, 0, 255, //
        0, 255, 0, 255, //
        0, 0, 255, 255, //
        255, 255, 255, 255,
    ];
    let options = EncoderOptions::new(2, 2, ColorFormat::RGB565);

    let mut sink = vec![];
    LvglEncoder::new(&rgba, options).encode_bin(&mut sink).unwrap();

    let artifact = parse_v9_bin(&sink);
    assert_eq!(artifact.format_id, 0x12);
    assert_eq!(artifact.stride, 4);

    let words: Vec<u16> = artifact
        .body
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes(pair.try_into().unwrap()))
        .collect();
    assert_eq!(words, vec![0xF800, 0x07E0, 0x001F, 0xFFFF]);
}

#[test]
fn half_alpha_over_black_halves_brightness() {
    let rgba = [200, 100, 50, 128];
    let options = EncoderOptions::new(1, 1, ColorFormat::RGB888).set_premultiply(true);

    let mut sink = vec![];
    LvglEncoder::new(&rgba, options).encode_bin(&mut sink).unwrap();

    let artifact = parse_v9_bin(&sink);
    // B,G,R order, each within one rounding step of half brightness
    let &[b, g, r] = artifact.body.as_slice() else {
        panic!("expected exactly three payload bytes")
    };
    assert!((i16::from(r) - 100).abs() <= 1);
    assert!((i16::from(g) - 50).abs() <= 1);
    assert!((i16::from(b) - 25).abs() <= 1);
}

#[test]
fn sixteen_color_image_to_i4() {
    let mut rgba = vec![];
    for i in 0..8_u8 {
        // 8 unique colors, well under the 16 entry capacity
        rgba.extend_from_slice(&[i * 16, 255 - i, i, 255]);
    }
    let options = EncoderOptions::new(8, 1, ColorFormat::I4);

    let mut sink = vec![];
    LvglEncoder::new(&rgba, options).encode_bin(&mut sink).unwrap();

    let artifact = parse_v9_bin(&sink);
    assert_eq!(artifact.format_id, 0x09);

    // 16 palette entries of 4 bytes, then 4 bytes of packed indices
    assert_eq!(artifact.body.len(), 16 * 4 + 4);
    assert_eq!(&artifact.body[64..], &[0x01, 0x23, 0x45, 0x67]);

    // first palette entry is the first seen color, as B,G,R,A
    assert_eq!(&artifact.body[..4], &[0, 255, 0, 255]);
}

#[test]
fn alignment_pads_rows_with_zeros() {
    // 7 pixels of A8 pack to 7 bytes, align 4 stretches rows to 8
    let mut rgba = vec![];
    for _ in 0..7 {
        rgba.extend_from_slice(&[0, 0, 0, 0xEE]);
    }
    let options = EncoderOptions::new(7, 1, ColorFormat::A8).set_stride_align(4);

    let mut sink = vec![];
    LvglEncoder::new(&rgba, options).encode_bin(&mut sink).unwrap();

    let artifact = parse_v9_bin(&sink);
    assert_eq!(artifact.stride, 8);
    assert_eq!(artifact.body.len(), 8);
    assert_eq!(&artifact.body[..7], &[0xEE; 7]);
    assert_eq!(artifact.body[7], 0, "pad byte must be zero");
}

#[test]
fn palette_overflow_is_strict() {
    let mut rgba = vec![];
    for i in 0..17_u8 {
        rgba.extend_from_slice(&[i, i, i, 255]);
    }
    let options = EncoderOptions::new(17, 1, ColorFormat::I4);

    let mut sink = vec![];
    let result = LvglEncoder::new(&rgba, options).encode_bin(&mut sink);

    assert!(result.is_err());
    assert!(sink.is_empty(), "no partial artifact on error");
}
