/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The encoder tying the pipeline together.
//!
//! A [`LvglEncoder`] borrows the source pixels, runs
//! conversion, palette construction, compression and header
//! computation once, and serializes the result either as a loadable
//! binary blob or as C source text. The encoder holds no state across
//! invocations, encoding the same input twice gives identical bytes.

use log::trace;
use lvimg_core::bytestream::{ByteWriter, ByteWriterTrait};
use lvimg_core::options::{AbiVersion, CompressMethod, EncoderOptions};

use crate::c_array::write_c_array;
use crate::compress::compress;
use crate::convert::convert_rgba;
use crate::errors::EncodeErrors;
use crate::header::{
    v8_format_id, ImageHeader, FLAG_COMPRESSED, FLAG_PREMULTIPLIED, V8_MAX_DIM, V9_MAX_DIM
};
use crate::stride::is_valid_align;

/// An image after conversion, ready for serialization.
///
/// `body` is what follows the header in a binary artifact: palette
/// plus payload, or the compressed stream covering both.
pub struct EncodedImage {
    pub header: ImageHeader,
    pub body:   Vec<u8>
}

impl EncodedImage {
    /// Total byte length of the binary artifact.
    pub fn bin_size(&self) -> usize {
        self.header.size() + self.body.len()
    }
}

/// LVGL image encoder
///
/// # Example
/// - Encode a 2 by 2 RGBA image to an RGB565 binary blob
///
/// ```
/// use lvimg_core::color_format::ColorFormat;
/// use lvimg_core::options::EncoderOptions;
/// use lvimg_encode::LvglEncoder;
/// use lvimg_encode::errors::EncodeErrors;
///
/// fn main() -> Result<(), EncodeErrors> {
///     let pixels = [255_u8; 2 * 2 * 4];
///     let options = EncoderOptions::new(2, 2, ColorFormat::RGB565);
///     let encoder = LvglEncoder::new(&pixels, options);
///
///     let mut sink = vec![];
///     let written = encoder.encode_bin(&mut sink)?;
///     assert_eq!(written, sink.len());
///     Ok(())
/// }
/// ```
pub struct LvglEncoder<'a> {
    // source pixels, RGBA8888 unless the target format is RAW
    data:    &'a [u8],
    options: EncoderOptions
}

impl<'a> LvglEncoder<'a> {
    /// Create a new encoder for the given pixels.
    ///
    /// # Arguments
    /// - `data`: RGBA8888 pixels of length `width * height * 4`, or
    ///   the opaque payload for RAW targets
    /// - `options`: Conversion options including the dimensions
    pub const fn new(data: &'a [u8], options: EncoderOptions) -> LvglEncoder<'a> {
        LvglEncoder { data, options }
    }

    /// Run the pipeline and return the encoded image without
    /// serializing it.
    pub fn build(&self) -> Result<EncodedImage, EncodeErrors> {
        let options = &self.options;
        let width = options.width();
        let height = options.height();
        let format = options.color_format();
        let abi = options.abi_version();

        if width == 0 || height == 0 {
            return Err(EncodeErrors::ZeroDimensions(width, height));
        }
        if !is_valid_align(options.stride_align()) {
            return Err(EncodeErrors::InvalidStrideAlign(options.stride_align()));
        }

        let max_dim = match abi {
            AbiVersion::V8 => V8_MAX_DIM,
            AbiVersion::V9 => V9_MAX_DIM
        };
        if width > max_dim {
            return Err(EncodeErrors::TooLargeDimensions(width, max_dim));
        }
        if height > max_dim {
            return Err(EncodeErrors::TooLargeDimensions(height, max_dim));
        }

        if abi == AbiVersion::V8 {
            // fail before conversion, the legacy layout cannot name
            // every format or carry a compressed flag
            v8_format_id(format)?;
            if options.compress() != CompressMethod::None {
                return Err(EncodeErrors::UnsupportedCompression(options.compress(), abi));
            }
        }

        let (stride, plain, premultiplied) = if format.is_raw() {
            (0, self.data.to_vec(), false)
        } else {
            let expected = width * height * 4;
            if self.data.len() != expected {
                return Err(EncodeErrors::WrongInputSize(expected, self.data.len()));
            }

            let converted = convert_rgba(self.data, options)?;
            let mut body = match converted.palette {
                Some(palette) => palette.to_bytes(),
                None => vec![]
            };
            body.extend_from_slice(&converted.payload);

            let premultiplied =
                options.premultiply() && format.has_alpha() && !format.is_alpha_only();
            (converted.stride, body, premultiplied)
        };

        if stride > V9_MAX_DIM {
            return Err(EncodeErrors::TooLargeDimensions(stride, V9_MAX_DIM));
        }

        let compressed = compress(&plain, options.compress(), format.byte_block());
        trace!(
            "encoded {}x{} {:?} image, {} plain bytes, stored as {:?}",
            width,
            height,
            format,
            compressed.original_len,
            compressed.method
        );

        let mut flags = 0;
        if premultiplied {
            flags |= FLAG_PREMULTIPLIED;
        }
        if compressed.method == CompressMethod::Rle {
            flags |= FLAG_COMPRESSED;
        }
        // the legacy header has no flag bits
        if abi == AbiVersion::V8 {
            flags = 0;
        }

        Ok(EncodedImage {
            header: ImageHeader {
                color_format: format,
                flags,
                width,
                height,
                stride,
                abi_version: abi
            },
            body: compressed.data
        })
    }

    /// Encode into a loadable binary blob.
    ///
    /// # Returns
    /// - `Ok(size)`: Actual bytes written to the sink
    /// - `Err`: The error encountered, nothing was flushed to the sink
    pub fn encode_bin<T: ByteWriterTrait>(&self, sink: T) -> Result<usize, EncodeErrors> {
        let encoded = self.build()?;

        let mut stream = ByteWriter::new(sink);
        stream.reserve(encoded.bin_size())?;

        encoded.header.write(&mut stream)?;
        stream.write_all(&encoded.body)?;
        stream.flush()?;

        Ok(stream.bytes_written())
    }

    /// Encode into compilable C source text.
    ///
    /// # Arguments
    /// - `name`: Identifier for the array and descriptor, sanitized
    ///   with [`crate::sanitize_identifier`]
    pub fn encode_c_array<T: ByteWriterTrait>(
        &self, name: &str, sink: T
    ) -> Result<usize, EncodeErrors> {
        let encoded = self.build()?;

        write_c_array(&encoded, name, sink)
    }
}
