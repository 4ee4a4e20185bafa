/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::Path;

use log::info;
use zune_core::colorspace::ColorSpace;
use zune_image::image::Image;

use crate::BinErrors;

/// Decode a source image and normalize it to RGBA8888.
///
/// Any format the decoding collaborator understands is accepted, the
/// engine itself only ever sees the canonical buffer. Animated
/// sources contribute their first frame.
pub fn read_rgba<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize), BinErrors> {
    let mut image = Image::open(path.as_ref())?;
    image.convert_color(ColorSpace::RGBA)?;

    let (width, height) = image.dimensions();
    info!("decoded {}x{} source image", width, height);

    let mut frames = image.flatten_to_u8();
    if frames.is_empty() {
        return Err(BinErrors::ParameterError(format!(
            "{:?} decoded to no frames",
            path.as_ref()
        )));
    }

    Ok((frames.swap_remove(0), width, height))
}

/// Parse an `RRGGBB` hex background color.
pub fn parse_background(value: &str) -> Result<u32, BinErrors> {
    let trimmed = value.trim_start_matches('#');

    if trimmed.len() != 6 {
        return Err(BinErrors::ParameterError(format!(
            "background `{value}` is not an RRGGBB hex color"
        )));
    }
    u32::from_str_radix(trimmed, 16).map_err(|_| {
        BinErrors::ParameterError(format!("background `{value}` is not an RRGGBB hex color"))
    })
}
