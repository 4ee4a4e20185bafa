/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Command line front-end for the lvimg encoder.
//!
//! Decoding the source is delegated to the zune decoders, the engine
//! only ever sees a canonical RGBA8888 buffer plus options. One
//! invocation produces exactly one artifact, or no file at all when
//! anything fails.

use std::fmt::{Debug, Formatter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::process::exit;

use clap::ArgMatches;
use log::{error, info};
use lvimg_core::color_format::ColorFormat;
use lvimg_core::options::{AbiVersion, CompressMethod, EncoderOptions, OutputFormat};
use lvimg_encode::errors::EncodeErrors;
use lvimg_encode::{auto_color_format, sanitize_identifier, LvglEncoder};
use zune_image::errors::ImageErrors;

mod cmd_args;
mod file_io;

/// Errors the command line front-end can report.
pub enum BinErrors {
    /// An option value did not parse or is missing
    ParameterError(String),
    /// The source image could not be decoded
    DecodeErrors(ImageErrors),
    /// The conversion pipeline failed
    EncodeErrors(EncodeErrors),
    /// Reading the source or writing the artifact failed
    IoErrors(std::io::Error)
}

impl Debug for BinErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BinErrors::ParameterError(message) => {
                writeln!(f, "{message}")
            }
            BinErrors::DecodeErrors(err) => {
                writeln!(f, "Decoding failed: {err:?}")
            }
            BinErrors::EncodeErrors(err) => {
                writeln!(f, "Encoding failed: {err:?}")
            }
            BinErrors::IoErrors(err) => {
                writeln!(f, "I/O error: {err}")
            }
        }
    }
}

impl From<ImageErrors> for BinErrors {
    fn from(value: ImageErrors) -> Self {
        BinErrors::DecodeErrors(value)
    }
}

impl From<EncodeErrors> for BinErrors {
    fn from(value: EncodeErrors) -> Self {
        BinErrors::EncodeErrors(value)
    }
}

impl From<std::io::Error> for BinErrors {
    fn from(value: std::io::Error) -> Self {
        BinErrors::IoErrors(value)
    }
}

pub fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    cmd_args::setup_logger(&options);

    if let Err(reason) = run(&options) {
        println!();
        error!(" Could not complete conversion, reason {:?}", reason);
        println!();
        exit(-1);
    }
}

fn run(options: &ArgMatches) -> Result<(), BinErrors> {
    let input = options.get_one::<String>("in").unwrap();
    let output = options.get_one::<String>("out").unwrap();

    let format_name = options.get_one::<String>("format").unwrap();
    let requested_format = if format_name.eq_ignore_ascii_case("auto") {
        None
    } else {
        Some(ColorFormat::from_name(format_name).ok_or_else(|| {
            BinErrors::ParameterError(format!("unknown color format `{format_name}`"))
        })?)
    };

    let output_format =
        OutputFormat::from_name(options.get_one::<String>("output-format").unwrap()).unwrap();
    let compress =
        CompressMethod::from_name(options.get_one::<String>("compress").unwrap()).unwrap();
    let abi_version =
        AbiVersion::from_name(options.get_one::<String>("lv-version").unwrap()).unwrap();
    let align = *options.get_one::<usize>("align").unwrap();
    let background = file_io::parse_background(options.get_one::<String>("background").unwrap())?;

    let (pixels, width, height, color_format) = match requested_format {
        Some(format) if format.is_raw() => {
            // raw bytes carry no dimensions, the caller must supply them
            let width = required_dimension(options, "width")?;
            let height = required_dimension(options, "height")?;
            let payload = std::fs::read(input)?;
            info!("read {} raw payload bytes", payload.len());

            (payload, width, height, format)
        }
        _ => {
            let (pixels, width, height) = file_io::read_rgba(input)?;
            let format = match requested_format {
                Some(format) => format,
                None => {
                    let format = auto_color_format(&pixels);
                    info!("auto-selected color format {:?}", format);
                    format
                }
            };
            (pixels, width, height, format)
        }
    };

    let encoder_options = EncoderOptions::new(width, height, color_format)
        .set_compress(compress)
        .set_stride_align(align)
        .set_background(background)
        .set_dither(*options.get_one::<bool>("dither").unwrap())
        .set_premultiply(*options.get_one::<bool>("premultiply").unwrap())
        .set_abi_version(abi_version);

    let encoder = LvglEncoder::new(&pixels, encoder_options);

    let out_path = Path::new(output);
    let name = match options.get_one::<String>("name") {
        Some(name) => name.clone(),
        None => out_path
            .file_stem()
            .map(|stem| sanitize_identifier(&stem.to_string_lossy()))
            .unwrap_or_else(|| String::from("img"))
    };

    let fd = File::create(out_path)?;
    let mut sink = BufWriter::new(fd);

    let result = match output_format {
        OutputFormat::Bin => encoder.encode_bin(&mut sink),
        OutputFormat::CArray => encoder.encode_c_array(&name, &mut sink)
    };

    match result {
        Ok(size) => {
            info!("wrote {} bytes to {}", size, output);
            Ok(())
        }
        Err(err) => {
            // never leave a partial artifact behind
            drop(sink);
            let _ = std::fs::remove_file(out_path);
            Err(BinErrors::from(err))
        }
    }
}

fn required_dimension(options: &ArgMatches, name: &str) -> Result<usize, BinErrors> {
    options.get_one::<usize>(name).copied().ok_or_else(|| {
        BinErrors::ParameterError(format!("--{name} is required for raw payloads"))
    })
}
