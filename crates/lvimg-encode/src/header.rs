/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Firmware descriptor headers.
//!
//! One [`ImageHeader`] value carries the computed fields, the two ABI
//! layouts are separate emission paths over it:
//!
//! - v9 writes the 12-byte `lv_image_header_t`: magic, format id,
//!   flags, width, height, stride and a reserved word, all little
//!   endian.
//! - v8 packs `lv_img_header_t` into one little-endian `u32` of
//!   bitfields: cf:5, always_zero:3, reserved:2, w:11, h:11.
//!
//! Neither path is derived from the other's output.

use lvimg_core::bytestream::{ByteWriter, ByteWriterTrait};
use lvimg_core::color_format::ColorFormat;
use lvimg_core::options::AbiVersion;

use crate::errors::EncodeErrors;

/// Image was premultiplied before quantization.
pub const FLAG_PREMULTIPLIED: u16 = 1 << 0;
/// Payload is a compressed stream with a preamble.
pub const FLAG_COMPRESSED: u16 = 1 << 3;

/// First byte of every v9 header.
pub const V9_MAGIC: u8 = 0x19;
/// Byte length of the v9 header.
pub const V9_HEADER_SIZE: usize = 12;
/// Byte length of the v8 header.
pub const V8_HEADER_SIZE: usize = 4;

/// Widest dimension a v9 header field can hold.
pub const V9_MAX_DIM: usize = u16::MAX as usize;
/// Widest dimension an 11-bit v8 header field can hold.
pub const V8_MAX_DIM: usize = (1 << 11) - 1;

/// Computed descriptor fields shared by both emission paths.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ImageHeader {
    pub color_format: ColorFormat,
    pub flags:        u16,
    pub width:        usize,
    pub height:       usize,
    pub stride:       usize,
    pub abi_version:  AbiVersion
}

impl ImageHeader {
    /// Byte length this header occupies in a binary artifact.
    pub const fn size(&self) -> usize {
        match self.abi_version {
            AbiVersion::V8 => V8_HEADER_SIZE,
            AbiVersion::V9 => V9_HEADER_SIZE
        }
    }

    /// Write the header in the layout selected by the ABI version.
    pub fn write<T: ByteWriterTrait>(
        &self, stream: &mut ByteWriter<T>
    ) -> Result<(), EncodeErrors> {
        match self.abi_version {
            AbiVersion::V8 => self.write_v8(stream),
            AbiVersion::V9 => self.write_v9(stream)
        }
    }

    fn write_v9<T: ByteWriterTrait>(
        &self, stream: &mut ByteWriter<T>
    ) -> Result<(), EncodeErrors> {
        stream.write_u8(V9_MAGIC)?;
        stream.write_u8(self.color_format.format_id())?;
        stream.write_u16_le(self.flags)?;
        stream.write_u16_le(self.width as u16)?;
        stream.write_u16_le(self.height as u16)?;
        stream.write_u16_le(self.stride as u16)?;
        // reserved
        stream.write_u16_le(0)?;

        Ok(())
    }

    fn write_v8<T: ByteWriterTrait>(
        &self, stream: &mut ByteWriter<T>
    ) -> Result<(), EncodeErrors> {
        let cf = u32::from(v8_format_id(self.color_format)?);
        let word = cf | ((self.width as u32) << 10) | ((self.height as u32) << 21);

        stream.write_u32_le(word)?;

        Ok(())
    }
}

/// Map a color format onto the legacy `lv_img_cf_t` identifier.
///
/// Formats the legacy layout cannot describe are rejected.
pub fn v8_format_id(format: ColorFormat) -> Result<u8, EncodeErrors> {
    let id = match format {
        ColorFormat::Raw => 1,
        ColorFormat::RawAlpha => 2,
        ColorFormat::RGB565 | ColorFormat::RGB888 | ColorFormat::XRGB8888 => 4,
        ColorFormat::ARGB8888 | ColorFormat::RGB565A8 => 5,
        ColorFormat::I1 => 7,
        ColorFormat::I2 => 8,
        ColorFormat::I4 => 9,
        ColorFormat::I8 => 10,
        ColorFormat::A1 => 11,
        ColorFormat::A2 => 12,
        ColorFormat::A4 => 13,
        ColorFormat::A8 => 14,
        ColorFormat::L8 => {
            return Err(EncodeErrors::UnsupportedFormat(format, AbiVersion::V8))
        }
    };
    Ok(id)
}

/// The constant name of the format in v9 firmware headers.
pub fn v9_c_name(format: ColorFormat) -> &'static str {
    match format {
        ColorFormat::L8 => "LV_COLOR_FORMAT_L8",
        ColorFormat::I1 => "LV_COLOR_FORMAT_I1",
        ColorFormat::I2 => "LV_COLOR_FORMAT_I2",
        ColorFormat::I4 => "LV_COLOR_FORMAT_I4",
        ColorFormat::I8 => "LV_COLOR_FORMAT_I8",
        ColorFormat::A1 => "LV_COLOR_FORMAT_A1",
        ColorFormat::A2 => "LV_COLOR_FORMAT_A2",
        ColorFormat::A4 => "LV_COLOR_FORMAT_A4",
        ColorFormat::A8 => "LV_COLOR_FORMAT_A8",
        ColorFormat::RGB565 => "LV_COLOR_FORMAT_RGB565",
        ColorFormat::RGB565A8 => "LV_COLOR_FORMAT_RGB565A8",
        ColorFormat::RGB888 => "LV_COLOR_FORMAT_RGB888",
        ColorFormat::ARGB8888 => "LV_COLOR_FORMAT_ARGB8888",
        ColorFormat::XRGB8888 => "LV_COLOR_FORMAT_XRGB8888",
        ColorFormat::Raw => "LV_COLOR_FORMAT_RAW",
        ColorFormat::RawAlpha => "LV_COLOR_FORMAT_RAW_ALPHA"
    }
}

/// The constant name of the format in v8 firmware headers.
pub fn v8_c_name(format: ColorFormat) -> Result<&'static str, EncodeErrors> {
    let name = match v8_format_id(format)? {
        1 => "LV_IMG_CF_RAW",
        2 => "LV_IMG_CF_RAW_ALPHA",
        4 => "LV_IMG_CF_TRUE_COLOR",
        5 => "LV_IMG_CF_TRUE_COLOR_ALPHA",
        7 => "LV_IMG_CF_INDEXED_1BIT",
        8 => "LV_IMG_CF_INDEXED_2BIT",
        9 => "LV_IMG_CF_INDEXED_4BIT",
        10 => "LV_IMG_CF_INDEXED_8BIT",
        11 => "LV_IMG_CF_ALPHA_1BIT",
        12 => "LV_IMG_CF_ALPHA_2BIT",
        13 => "LV_IMG_CF_ALPHA_4BIT",
        _ => "LV_IMG_CF_ALPHA_8BIT"
    };
    Ok(name)
}
