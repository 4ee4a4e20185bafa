/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! An encoder turning decoded rasters into LVGL image form.
//!
//! The input is a canonical RGBA8888 buffer, the output is either a
//! loadable `.bin` blob or compilable C source text, in the
//! descriptor layout of the v8 or v9 firmware ABI.
//!
//! The pipeline is pure and synchronous: color conversion and
//! quantization, palette construction for indexed targets, stride
//! padding, optional run-length compression and header emission.
//! Nothing is cached between invocations, so separate conversions can
//! run on separate threads without coordination.
//!
//! # Example
//! - Convert an RGBA image to an RGB565 C array
//! ```
//! use lvimg_core::color_format::ColorFormat;
//! use lvimg_core::options::EncoderOptions;
//! use lvimg_encode::LvglEncoder;
//!
//! let pixels = [0_u8; 4 * 4 * 4];
//! let options = EncoderOptions::new(4, 4, ColorFormat::RGB565);
//!
//! let mut sink = vec![];
//! LvglEncoder::new(&pixels, options)
//!     .encode_c_array("my_icon", &mut sink)
//!     .unwrap();
//! let source = String::from_utf8(sink).unwrap();
//! assert!(source.contains("const lv_image_dsc_t my_icon"));
//! ```
pub mod compress;
pub mod errors;
pub mod header;
pub mod stride;

mod c_array;
mod convert;
mod encoder;
mod palette;

pub use c_array::sanitize_identifier;
pub use convert::auto_color_format;
pub use encoder::{EncodedImage, LvglEncoder};
pub use palette::Palette;
