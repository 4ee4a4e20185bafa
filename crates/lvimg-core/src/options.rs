/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Encoder options
//!
//! This module exposes one options struct shared by the whole
//! conversion pipeline, so a single [`EncoderOptions`] value carries
//! everything the converter, compressor and serializers need to know.
//!
//! To remove the annoyance of half-configured values, fields are
//! private and set through chainable `set_*` builders.

use crate::color_format::ColorFormat;

/// Compression applied to the encoded byte stream.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CompressMethod {
    /// Store the stream as-is
    None,
    /// Run-length encoding over pixel-sized blocks
    Rle
}

impl CompressMethod {
    /// Identifier stored in the compressed stream preamble, matches
    /// the firmware decoder's method values.
    pub const fn method_id(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Rle => 1
        }
    }

    /// Look a method up by its CLI name.
    pub fn from_name(name: &str) -> Option<CompressMethod> {
        if name.eq_ignore_ascii_case("none") {
            Some(Self::None)
        } else if name.eq_ignore_ascii_case("rle") {
            Some(Self::Rle)
        } else {
            None
        }
    }
}

/// The firmware descriptor layout the serializers emit.
///
/// The two layouts are separate emission paths sharing field
/// computation, never text edits of one another.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AbiVersion {
    /// Legacy `lv_img_dsc_t` layout with the packed 32-bit header
    V8,
    /// Current `lv_image_dsc_t` layout with the 12-byte header
    V9
}

impl AbiVersion {
    pub fn from_name(name: &str) -> Option<AbiVersion> {
        if name.eq_ignore_ascii_case("v8") {
            Some(Self::V8)
        } else if name.eq_ignore_ascii_case("v9") {
            Some(Self::V9)
        } else {
            None
        }
    }
}

/// The serialization carrier for an encoded image.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    /// Loadable binary blob
    Bin,
    /// Compilable C source text
    CArray
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<OutputFormat> {
        if name.eq_ignore_ascii_case("bin") {
            Some(Self::Bin)
        } else if name.eq_ignore_ascii_case("c") || name.eq_ignore_ascii_case("c_array") {
            Some(Self::CArray)
        } else {
            None
        }
    }
}

/// Row-byte alignments the stride calculator accepts.
pub static VALID_STRIDE_ALIGNMENTS: [usize; 5] = [1, 2, 4, 8, 16];

/// Encoder options
///
/// Carries the source dimensions plus every knob of the conversion
/// pipeline. The same value can be reused for any number of
/// conversions, the engine never mutates it.
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions {
    width:        usize,
    height:       usize,
    color_format: ColorFormat,
    compress:     CompressMethod,
    stride_align: usize,
    background:   u32,
    dither:       bool,
    premultiply:  bool,
    abi_version:  AbiVersion
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            width:        0,
            height:       0,
            color_format: ColorFormat::RGB565,
            compress:     CompressMethod::None,
            stride_align: 1,
            background:   0x00_00_00,
            dither:       false,
            premultiply:  false,
            abi_version:  AbiVersion::V9
        }
    }
}

impl EncoderOptions {
    /// Create new options with mandatory fields set.
    ///
    /// # Arguments
    /// - `width`: Source image width in pixels
    /// - `height`: Source image height in pixels
    /// - `color_format`: Target pixel encoding
    pub fn new(width: usize, height: usize, color_format: ColorFormat) -> EncoderOptions {
        EncoderOptions {
            width,
            height,
            color_format,
            ..Self::default()
        }
    }

    /// Source image width in pixels.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Source image height in pixels.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// The target pixel encoding.
    pub const fn color_format(&self) -> ColorFormat {
        self.color_format
    }

    /// Compression requested for the encoded stream.
    pub const fn compress(&self) -> CompressMethod {
        self.compress
    }

    /// Row byte alignment, one of 1, 2, 4, 8 or 16.
    pub const fn stride_align(&self) -> usize {
        self.stride_align
    }

    /// `0xRRGGBB` color composited under the image when the target
    /// format has no alpha channel.
    pub const fn background(&self) -> u32 {
        self.background
    }

    /// Whether error-diffusion dithering is applied to channels
    /// quantized below 8 bits.
    pub const fn dither(&self) -> bool {
        self.dither
    }

    /// Whether color channels are premultiplied by alpha before
    /// quantization.
    pub const fn premultiply(&self) -> bool {
        self.premultiply
    }

    /// The descriptor layout emitted by the serializers.
    pub const fn abi_version(&self) -> AbiVersion {
        self.abi_version
    }

    pub fn set_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn set_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    pub fn set_color_format(mut self, color_format: ColorFormat) -> Self {
        self.color_format = color_format;
        self
    }

    pub fn set_compress(mut self, compress: CompressMethod) -> Self {
        self.compress = compress;
        self
    }

    pub fn set_stride_align(mut self, stride_align: usize) -> Self {
        self.stride_align = stride_align;
        self
    }

    pub fn set_background(mut self, background: u32) -> Self {
        self.background = background;
        self
    }

    pub fn set_dither(mut self, dither: bool) -> Self {
        self.dither = dither;
        self
    }

    pub fn set_premultiply(mut self, premultiply: bool) -> Self {
        self.premultiply = premultiply;
        self
    }

    pub fn set_abi_version(mut self, abi_version: AbiVersion) -> Self {
        self.abi_version = abi_version;
        self
    }
}
