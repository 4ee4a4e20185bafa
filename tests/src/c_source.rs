/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Shape of the emitted C source for both descriptor layouts.

use lvimg_core::color_format::ColorFormat;
use lvimg_core::options::{AbiVersion, EncoderOptions};
use lvimg_encode::LvglEncoder;

fn encode_c(options: EncoderOptions, name: &str) -> String {
    let rgba = vec![0x7F_u8; options.width() * options.height() * 4];
    let mut sink = vec![];
    LvglEncoder::new(&rgba, options)
        .encode_c_array(name, &mut sink)
        .unwrap();
    String::from_utf8(sink).expect("C output must be UTF-8")
}

#[test]
fn v9_descriptor_uses_current_names() {
    let options = EncoderOptions::new(2, 2, ColorFormat::RGB565);
    let source = encode_c(options, "logo");

    assert!(source.contains("#include \"lvgl/lvgl.h\""));
    assert!(source.contains("uint8_t logo_map[] = {"));
    assert!(source.contains("const lv_image_dsc_t logo = {"));
    assert!(source.contains(".header.magic = LV_IMAGE_HEADER_MAGIC,"));
    assert!(source.contains(".header.cf = LV_COLOR_FORMAT_RGB565,"));
    assert!(source.contains(".header.w = 2,"));
    assert!(source.contains(".header.stride = 4,"));
    assert!(source.contains(".data_size = sizeof(logo_map),"));

    // nothing of the legacy layout may leak in
    assert!(!source.contains("lv_img_dsc_t"));
    assert!(!source.contains("LV_IMG_CF_"));
}

#[test]
fn v8_descriptor_uses_legacy_names() {
    let options =
        EncoderOptions::new(2, 2, ColorFormat::RGB565).set_abi_version(AbiVersion::V8);
    let source = encode_c(options, "logo");

    assert!(source.contains("const lv_img_dsc_t logo = {"));
    assert!(source.contains(".header.cf = LV_IMG_CF_TRUE_COLOR,"));
    assert!(source.contains(".header.always_zero = 0,"));
    assert!(source.contains(".header.w = 2,"));
    assert!(source.contains(".data_size = sizeof(logo_map),"));

    // and nothing of the current layout
    assert!(!source.contains("lv_image_dsc_t"));
    assert!(!source.contains("LV_COLOR_FORMAT_"));
    assert!(!source.contains(".header.magic"));
    assert!(!source.contains(".header.stride"));
}

#[test]
fn awkward_names_are_sanitized_consistently() {
    let options = EncoderOptions::new(1, 1, ColorFormat::ARGB8888);
    let source = encode_c(options, "8-ball icon");

    assert!(source.contains("uint8_t _8_ball_icon_map[] = {"));
    assert!(source.contains("const lv_image_dsc_t _8_ball_icon = {"));
    assert!(source.contains("#define LV_ATTRIBUTE_IMG__8_BALL_ICON"));
}

#[test]
fn byte_lines_hold_sixteen_values() {
    let options = EncoderOptions::new(4, 4, ColorFormat::ARGB8888);
    let source = encode_c(options, "grid");

    let array_lines: Vec<&str> = source
        .lines()
        .filter(|line| line.trim_start().starts_with("0x"))
        .collect();

    // 64 payload bytes, 16 per line
    assert_eq!(array_lines.len(), 4);
    for line in array_lines {
        assert_eq!(line.matches("0x").count(), 16);
    }
}
