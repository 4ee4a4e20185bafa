/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The C-array serializer.
//!
//! Emits UTF-8 C source holding the encoded bytes plus a descriptor
//! initializer in the field names and types of the selected ABI. The
//! v8 and v9 descriptors are written by separate functions over the
//! same computed header, there is no text substitution between them.

use lvimg_core::bytestream::{ByteWriter, ByteWriterTrait};
use lvimg_core::options::AbiVersion;

use crate::encoder::EncodedImage;
use crate::errors::EncodeErrors;
use crate::header::{v8_c_name, v9_c_name, FLAG_COMPRESSED, FLAG_PREMULTIPLIED, ImageHeader};

/// Bytes emitted per line of the array literal.
const BYTES_PER_LINE: usize = 16;

/// Turn an arbitrary name into a valid C identifier.
///
/// Invalid characters become underscores and a leading digit gets an
/// underscore prefix. An empty input collapses to a single
/// underscore so the emitted source always compiles.
pub fn sanitize_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);

    for (position, ch) in name.chars().enumerate() {
        if position == 0 && ch.is_ascii_digit() {
            out.push('_');
        }
        if ch == '_' || ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}

/// Serialize `image` as C source text into `sink`.
///
/// Returns the number of bytes written.
pub(crate) fn write_c_array<T: ByteWriterTrait>(
    image: &EncodedImage, name: &str, sink: T
) -> Result<usize, EncodeErrors> {
    let identifier = sanitize_identifier(name);
    let attribute = format!("LV_ATTRIBUTE_IMG_{}", identifier.to_ascii_uppercase());

    let mut stream = ByteWriter::new(sink);

    stream.write_all(
        b"#if defined(LV_LVGL_H_INCLUDE_SIMPLE)\n\
          #include \"lvgl.h\"\n\
          #else\n\
          #include \"lvgl/lvgl.h\"\n\
          #endif\n\n"
    )?;

    stream.write_all(
        b"#ifndef LV_ATTRIBUTE_MEM_ALIGN\n\
          #define LV_ATTRIBUTE_MEM_ALIGN\n\
          #endif\n\n"
    )?;

    stream.write_all(format!("#ifndef {attribute}\n#define {attribute}\n#endif\n\n").as_bytes())?;

    stream.write_all(
        format!(
            "static const\nLV_ATTRIBUTE_MEM_ALIGN {attribute}\nuint8_t {identifier}_map[] = {{\n"
        )
        .as_bytes()
    )?;
    write_byte_lines(&mut stream, &image.body)?;
    stream.write_all(b"};\n\n")?;

    match image.header.abi_version {
        AbiVersion::V8 => write_v8_descriptor(&mut stream, &image.header, &identifier)?,
        AbiVersion::V9 => write_v9_descriptor(&mut stream, &image.header, &identifier)?
    }

    stream.flush()?;

    Ok(stream.bytes_written())
}

fn write_byte_lines<T: ByteWriterTrait>(
    stream: &mut ByteWriter<T>, bytes: &[u8]
) -> Result<(), EncodeErrors> {
    let mut line = String::with_capacity(BYTES_PER_LINE * 6 + 8);

    for chunk in bytes.chunks(BYTES_PER_LINE) {
        line.clear();
        line.push_str("   ");
        for byte in chunk {
            line.push_str(&format!(" 0x{byte:02x},"));
        }
        line.push('\n');
        stream.write_all(line.as_bytes())?;
    }
    Ok(())
}

fn write_v9_descriptor<T: ByteWriterTrait>(
    stream: &mut ByteWriter<T>, header: &ImageHeader, identifier: &str
) -> Result<(), EncodeErrors> {
    let mut flag_names = vec![];
    if header.flags & FLAG_PREMULTIPLIED != 0 {
        flag_names.push("LV_IMAGE_FLAGS_PREMULTIPLIED");
    }
    if header.flags & FLAG_COMPRESSED != 0 {
        flag_names.push("LV_IMAGE_FLAGS_COMPRESSED");
    }
    let flags = if flag_names.is_empty() {
        String::from("0")
    } else {
        flag_names.join(" | ")
    };

    stream.write_all(
        format!(
            "const lv_image_dsc_t {identifier} = {{\n\
            \x20   .header.magic = LV_IMAGE_HEADER_MAGIC,\n\
            \x20   .header.cf = {cf},\n\
            \x20   .header.flags = {flags},\n\
            \x20   .header.w = {w},\n\
            \x20   .header.h = {h},\n\
            \x20   .header.stride = {stride},\n\
            \x20   .data_size = sizeof({identifier}_map),\n\
            \x20   .data = {identifier}_map,\n\
            }};\n",
            cf = v9_c_name(header.color_format),
            w = header.width,
            h = header.height,
            stride = header.stride
        )
        .as_bytes()
    )?;

    Ok(())
}

fn write_v8_descriptor<T: ByteWriterTrait>(
    stream: &mut ByteWriter<T>, header: &ImageHeader, identifier: &str
) -> Result<(), EncodeErrors> {
    stream.write_all(
        format!(
            "const lv_img_dsc_t {identifier} = {{\n\
            \x20   .header.cf = {cf},\n\
            \x20   .header.always_zero = 0,\n\
            \x20   .header.reserved = 0,\n\
            \x20   .header.w = {w},\n\
            \x20   .header.h = {h},\n\
            \x20   .data_size = sizeof({identifier}_map),\n\
            \x20   .data = {identifier}_map,\n\
            }};\n",
            cf = v8_c_name(header.color_format)?,
            w = header.width,
            h = header.height
        )
        .as_bytes()
    )?;

    Ok(())
}
