/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use lvimg_core::bytestream::ByteIoError;
use lvimg_core::color_format::ColorFormat;
use lvimg_core::options::{AbiVersion, CompressMethod};

/// Errors encountered during encoding
pub enum EncodeErrors {
    /// Width or height is zero
    ///
    /// # Arguments
    /// - 1st argument is the width given
    /// - 2nd argument is the height given
    ZeroDimensions(usize, usize),
    /// A dimension cannot be represented in the target header layout
    ///
    /// # Arguments
    /// - 1st argument is the offending dimension
    /// - 2nd argument is the layout's limit
    TooLargeDimensions(usize, usize),
    /// The pixel buffer does not match `width * height * 4`
    ///
    /// # Arguments
    /// - 1st argument is the expected length
    /// - 2nd argument is the length found
    WrongInputSize(usize, usize),
    /// The stride alignment is not one of 1, 2, 4, 8 or 16
    InvalidStrideAlign(usize),
    /// An indexed target cannot represent the number of unique colors
    ///
    /// # Arguments
    /// - 1st argument is the number of unique colors found
    /// - 2nd argument is the palette capacity
    PaletteOverflow(usize, usize),
    /// The color format has no representation under the requested
    /// descriptor layout
    UnsupportedFormat(ColorFormat, AbiVersion),
    /// The compression method has no representation under the
    /// requested descriptor layout
    UnsupportedCompression(CompressMethod, AbiVersion),
    /// Writing to the output sink failed
    IoErrors(ByteIoError)
}

impl Debug for EncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            EncodeErrors::ZeroDimensions(width, height) => {
                writeln!(f, "Image dimensions {width}x{height} contain a zero dimension")
            }
            EncodeErrors::TooLargeDimensions(found, limit) => {
                writeln!(
                    f,
                    "Dimension {found} cannot be stored in the target header, limit is {limit}"
                )
            }
            EncodeErrors::WrongInputSize(expected, found) => {
                writeln!(
                    f,
                    "Wrong input length, expected {expected} RGBA bytes but found {found}"
                )
            }
            EncodeErrors::InvalidStrideAlign(align) => {
                writeln!(
                    f,
                    "Invalid stride alignment {align}, accepted values are 1, 2, 4, 8 and 16"
                )
            }
            EncodeErrors::PaletteOverflow(found, capacity) => {
                writeln!(
                    f,
                    "Image has {found} unique colors but the palette can hold {capacity}"
                )
            }
            EncodeErrors::UnsupportedFormat(format, abi) => {
                writeln!(
                    f,
                    "Color format {format:?} cannot be represented in a {abi:?} descriptor"
                )
            }
            EncodeErrors::UnsupportedCompression(method, abi) => {
                writeln!(
                    f,
                    "Compression {method:?} cannot be represented in a {abi:?} descriptor"
                )
            }
            EncodeErrors::IoErrors(err) => {
                writeln!(f, "I/O error {err:?}")
            }
        }
    }
}

impl Display for EncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl std::error::Error for EncodeErrors {}

impl From<ByteIoError> for EncodeErrors {
    fn from(value: ByteIoError) -> Self {
        EncodeErrors::IoErrors(value)
    }
}
