/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The color format registry.
//!
//! Every pixel encoding the engine can target is a variant of
//! [`ColorFormat`], a closed enum whose capability accessors are all
//! `const` functions over a fixed classification table. The table is
//! read-only data, there is no way to register formats at runtime.

/// All pixel encodings understood by the encoder.
///
/// The numeric identifiers emitted into headers follow the firmware's
/// `lv_color_format_t` values, see [`format_id`](Self::format_id).
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ColorFormat {
    /// 8-bit grayscale, one luma byte per pixel
    L8,
    /// 1-bit indexed, palette of 2 colors
    I1,
    /// 2-bit indexed, palette of 4 colors
    I2,
    /// 4-bit indexed, palette of 16 colors
    I4,
    /// 8-bit indexed, palette of 256 colors
    I8,
    /// 1-bit alpha only
    A1,
    /// 2-bit alpha only
    A2,
    /// 4-bit alpha only
    A4,
    /// 8-bit alpha only
    A8,
    /// 16-bit truecolor, `r5 g6 b5` packed into a little-endian word
    RGB565,
    /// RGB565 plane followed by a separate 8-bit alpha plane
    RGB565A8,
    /// 24-bit truecolor stored as B,G,R bytes
    RGB888,
    /// 32-bit truecolor with alpha, stored as B,G,R,A bytes
    ARGB8888,
    /// 32-bit truecolor, alpha byte forced to 0xFF
    XRGB8888,
    /// Pre-encoded opaque payload, passed through unconverted
    Raw,
    /// Pre-encoded opaque payload that carries alpha information
    RawAlpha
}

impl ColorFormat {
    /// Bits used to store one pixel of this format.
    ///
    /// RAW formats return 0 since their payload layout is opaque to the
    /// engine. `RGB565A8` returns 16, its alpha plane is accounted for
    /// separately.
    pub const fn bpp(self) -> usize {
        match self {
            Self::I1 | Self::A1 => 1,
            Self::I2 | Self::A2 => 2,
            Self::I4 | Self::A4 => 4,
            Self::L8 | Self::I8 | Self::A8 => 8,
            Self::RGB565 | Self::RGB565A8 => 16,
            Self::RGB888 => 24,
            Self::ARGB8888 | Self::XRGB8888 => 32,
            Self::Raw | Self::RawAlpha => 0
        }
    }

    /// Whether pixels of this format carry alpha information.
    ///
    /// Indexed formats return true because their palette entries store
    /// alpha.
    pub const fn has_alpha(self) -> bool {
        matches!(
            self,
            Self::I1
                | Self::I2
                | Self::I4
                | Self::I8
                | Self::A1
                | Self::A2
                | Self::A4
                | Self::A8
                | Self::RGB565A8
                | Self::ARGB8888
                | Self::RawAlpha
        )
    }

    /// Whether pixels are stored as palette indices.
    pub const fn is_indexed(self) -> bool {
        matches!(self, Self::I1 | Self::I2 | Self::I4 | Self::I8)
    }

    /// Whether the format stores only an alpha channel.
    pub const fn is_alpha_only(self) -> bool {
        matches!(self, Self::A1 | Self::A2 | Self::A4 | Self::A8)
    }

    /// Whether the payload is treated as already encoded and passed
    /// through without conversion.
    pub const fn is_raw(self) -> bool {
        matches!(self, Self::Raw | Self::RawAlpha)
    }

    /// Number of palette entries an indexed format stores.
    ///
    /// Non indexed formats return 0.
    pub const fn palette_entries(self) -> usize {
        match self {
            Self::I1 => 2,
            Self::I2 => 4,
            Self::I4 => 16,
            Self::I8 => 256,
            _ => 0
        }
    }

    /// The `lv_color_format_t` identifier stored in current (v9)
    /// headers.
    pub const fn format_id(self) -> u8 {
        match self {
            Self::Raw => 0x01,
            Self::RawAlpha => 0x02,
            Self::L8 => 0x06,
            Self::I1 => 0x07,
            Self::I2 => 0x08,
            Self::I4 => 0x09,
            Self::I8 => 0x0A,
            Self::A1 => 0x0B,
            Self::A2 => 0x0C,
            Self::A4 => 0x0D,
            Self::A8 => 0x0E,
            Self::RGB888 => 0x0F,
            Self::ARGB8888 => 0x10,
            Self::XRGB8888 => 0x11,
            Self::RGB565 => 0x12,
            Self::RGB565A8 => 0x14
        }
    }

    /// Bytes covered by one pixel, rounded up.
    ///
    /// This is the block unit the run-length compressor works on.
    /// Sub-byte and RAW formats compress on single bytes.
    pub const fn byte_block(self) -> usize {
        let bytes = self.bpp() / 8;
        if bytes == 0 {
            1
        } else {
            bytes
        }
    }

    /// Canonical name of the format, matches the suffix of the
    /// firmware's enum constant.
    pub const fn name(self) -> &'static str {
        match self {
            Self::L8 => "L8",
            Self::I1 => "I1",
            Self::I2 => "I2",
            Self::I4 => "I4",
            Self::I8 => "I8",
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::A4 => "A4",
            Self::A8 => "A8",
            Self::RGB565 => "RGB565",
            Self::RGB565A8 => "RGB565A8",
            Self::RGB888 => "RGB888",
            Self::ARGB8888 => "ARGB8888",
            Self::XRGB8888 => "XRGB8888",
            Self::Raw => "RAW",
            Self::RawAlpha => "RAW_ALPHA"
        }
    }

    /// Look a format up by its canonical name, case-insensitively.
    ///
    /// Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<ColorFormat> {
        ALL_FORMATS
            .iter()
            .find(|format| format.name().eq_ignore_ascii_case(name))
            .copied()
    }
}

/// Encapsulates every color format supported by the library.
pub static ALL_FORMATS: [ColorFormat; 16] = [
    ColorFormat::L8,
    ColorFormat::I1,
    ColorFormat::I2,
    ColorFormat::I4,
    ColorFormat::I8,
    ColorFormat::A1,
    ColorFormat::A2,
    ColorFormat::A4,
    ColorFormat::A8,
    ColorFormat::RGB565,
    ColorFormat::RGB565A8,
    ColorFormat::RGB888,
    ColorFormat::ARGB8888,
    ColorFormat::XRGB8888,
    ColorFormat::Raw,
    ColorFormat::RawAlpha
];
