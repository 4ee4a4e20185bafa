/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Color conversion and quantization.
//!
//! The converter maps canonical RGBA8888 pixels to the target format
//! in three steps: pixel preparation (alpha premultiplication or
//! background compositing), channel quantization (plain rounding or
//! error diffusion) and row packing to the stride computed by
//! [`crate::stride`].
//!
//! Everything here is integer arithmetic, the same input and options
//! always produce the same bytes.

use lvimg_core::color_format::ColorFormat;
use lvimg_core::options::EncoderOptions;

use crate::errors::EncodeErrors;
use crate::palette::{build_palette, Palette};
use crate::stride::stride_bytes;

/// Result of converting one image.
pub(crate) struct ConvertedImage {
    /// Color table, present for indexed targets only
    pub palette: Option<Palette>,
    /// Stride-padded rows, the RGB565A8 alpha plane appended last
    pub payload: Vec<u8>,
    /// Byte length of one padded row
    pub stride:  usize
}

/// Pick a target format for callers that did not request one.
///
/// Images using translucency keep their alpha channel, fully opaque
/// images go to the cheapest truecolor target.
pub fn auto_color_format(rgba: &[u8]) -> ColorFormat {
    let translucent = rgba.chunks_exact(4).any(|pixel| pixel[3] != 255);

    if translucent {
        ColorFormat::ARGB8888
    } else {
        ColorFormat::RGB565
    }
}

/// Convert RGBA8888 pixels to the target format described by
/// `options`.
///
/// The caller has validated dimensions, buffer length and alignment.
/// RAW formats never reach this function, they bypass conversion
/// entirely.
pub(crate) fn convert_rgba(
    rgba: &[u8], options: &EncoderOptions
) -> Result<ConvertedImage, EncodeErrors> {
    let width = options.width();
    let height = options.height();
    let format = options.color_format();
    let dither = options.dither();

    debug_assert!(!format.is_raw());

    let stride = stride_bytes(width, format.bpp(), options.stride_align());

    let pixels: &[[u8; 4]] = bytemuck::cast_slice(rgba);
    let prepared = prepare_pixels(pixels, options);

    let (palette, payload) = match format {
        ColorFormat::L8 => {
            let plane = luma_plane(&prepared);
            (None, pack_rows_u8(&plane, width, stride))
        }
        ColorFormat::A8 => {
            let plane = alpha_plane(&prepared);
            (None, pack_rows_u8(&plane, width, stride))
        }
        ColorFormat::A1 | ColorFormat::A2 | ColorFormat::A4 => {
            let bits = format.bpp();
            let levels = quantize_levels(&alpha_plane(&prepared), width, height, bits, dither);
            (None, pack_rows_bits(&levels, width, bits, stride))
        }
        ColorFormat::I1 | ColorFormat::I2 | ColorFormat::I4 | ColorFormat::I8 => {
            let (palette, indices) = build_palette(&prepared, format)?;
            let packed = pack_rows_bits(&indices, width, format.bpp(), stride);
            (Some(palette), packed)
        }
        ColorFormat::RGB565 | ColorFormat::RGB565A8 => {
            let (r, g, b) = rgb_planes(&prepared);
            let r5 = quantize_levels(&r, width, height, 5, dither);
            let g6 = quantize_levels(&g, width, height, 6, dither);
            let b5 = quantize_levels(&b, width, height, 5, dither);

            let mut payload = pack_rows_rgb565(&r5, &g6, &b5, width, stride);
            if format == ColorFormat::RGB565A8 {
                // separate alpha plane, consumers derive its row
                // length as stride / 2
                let plane = alpha_plane(&prepared);
                payload.extend_from_slice(&pack_rows_u8(&plane, width, stride / 2));
            }
            (None, payload)
        }
        ColorFormat::RGB888 => (None, pack_rows_bgr(&prepared, width, stride)),
        ColorFormat::ARGB8888 => (None, pack_rows_bgra(&prepared, width, stride, false)),
        ColorFormat::XRGB8888 => (None, pack_rows_bgra(&prepared, width, stride, true)),
        ColorFormat::Raw | ColorFormat::RawAlpha => {
            return Err(EncodeErrors::UnsupportedFormat(
                format,
                options.abi_version()
            ))
        }
    };

    Ok(ConvertedImage {
        palette,
        payload,
        stride
    })
}

/// Apply premultiplication or background compositing up front so the
/// per-format packers see final channel values.
fn prepare_pixels(pixels: &[[u8; 4]], options: &EncoderOptions) -> Vec<[u8; 4]> {
    let format = options.color_format();

    if format.has_alpha() {
        if options.premultiply() && !format.is_alpha_only() {
            return pixels
                .iter()
                .map(|pixel| {
                    let [r, g, b, a] = *pixel;
                    [premultiply(r, a), premultiply(g, a), premultiply(b, a), a]
                })
                .collect();
        }
        return pixels.to_vec();
    }

    let background = options.background();
    let bg_r = (background >> 16) as u8;
    let bg_g = (background >> 8) as u8;
    let bg_b = background as u8;

    pixels
        .iter()
        .map(|pixel| {
            let [r, g, b, a] = *pixel;
            [
                composite_over(r, a, bg_r),
                composite_over(g, a, bg_g),
                composite_over(b, a, bg_b),
                255
            ]
        })
        .collect()
}

/// Premultiply one channel by alpha with correct rounding.
#[inline]
fn premultiply(color: u8, alpha: u8) -> u8 {
    let temp = u16::from(alpha) * u16::from(color) + 0x80;

    ((temp + (temp >> 8)) >> 8) as u8
}

/// Standard src-over compositing of one channel onto the background.
#[inline]
fn composite_over(src: u8, alpha: u8, background: u8) -> u8 {
    let a = u16::from(alpha);
    let blended = u16::from(src) * a + u16::from(background) * (255 - a) + 127;

    (blended / 255) as u8
}

/// BT.601 integer luma.
#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * u32::from(r) + 151 * u32::from(g) + 28 * u32::from(b) + 128) >> 8) as u8
}

/// Quantize an 8-bit value to `bits` by rounding, returning the level.
#[inline]
fn quantize(value: u8, bits: usize) -> u8 {
    let max = (1_u16 << bits) - 1;

    ((u16::from(value) * max + 127) / 255) as u8
}

/// Map a quantized level back to 8 bits, used for error terms.
#[inline]
fn expand(level: u8, bits: usize) -> u8 {
    let max = (1_u32 << bits) - 1;

    ((u32::from(level) * 255 + max / 2) / max) as u8
}

fn alpha_plane(pixels: &[[u8; 4]]) -> Vec<u8> {
    pixels.iter().map(|pixel| pixel[3]).collect()
}

fn luma_plane(pixels: &[[u8; 4]]) -> Vec<u8> {
    pixels
        .iter()
        .map(|pixel| luma(pixel[0], pixel[1], pixel[2]))
        .collect()
}

fn rgb_planes(pixels: &[[u8; 4]]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut r = Vec::with_capacity(pixels.len());
    let mut g = Vec::with_capacity(pixels.len());
    let mut b = Vec::with_capacity(pixels.len());

    for pixel in pixels {
        r.push(pixel[0]);
        g.push(pixel[1]);
        b.push(pixel[2]);
    }
    (r, g, b)
}

/// Quantize one channel plane to `bits` wide levels.
fn quantize_levels(plane: &[u8], width: usize, height: usize, bits: usize, dither: bool) -> Vec<u8> {
    if bits >= 8 {
        return plane.to_vec();
    }
    if dither {
        return diffuse_plane(plane, width, height, bits);
    }
    plane.iter().map(|value| quantize(*value, bits)).collect()
}

/// Floyd-Steinberg error diffusion over one channel plane.
///
/// Errors are carried as 1/16 fixed point: 7/16 to the right
/// neighbor, 3/16, 5/16 and 1/16 into the next row. Integer state
/// only, so the diffusion is deterministic for a given plane.
fn diffuse_plane(plane: &[u8], width: usize, height: usize, bits: usize) -> Vec<u8> {
    let mut levels = vec![0_u8; plane.len()];
    // one slack slot on each side avoids bounds juggling at row edges
    let mut current = vec![0_i32; width + 2];
    let mut next = vec![0_i32; width + 2];

    for y in 0..height {
        for x in 0..width {
            let position = y * width + x;
            let adjusted = (i32::from(plane[position]) + current[x + 1] / 16).clamp(0, 255) as u8;

            let level = quantize(adjusted, bits);
            let error = i32::from(adjusted) - i32::from(expand(level, bits));

            levels[position] = level;

            current[x + 2] += error * 7;
            next[x] += error * 3;
            next[x + 1] += error * 5;
            next[x + 2] += error;
        }
        std::mem::swap(&mut current, &mut next);
        next.fill(0);
    }

    levels
}

fn pack_rows_u8(plane: &[u8], width: usize, stride: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(stride * (plane.len() / width));

    for row in plane.chunks_exact(width) {
        let row_start = out.len();
        out.extend_from_slice(row);
        out.resize(row_start + stride, 0);
    }
    out
}

/// Pack sub-byte levels MSB-first, zero-padding each row to stride.
fn pack_rows_bits(levels: &[u8], width: usize, bits: usize, stride: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(stride * (levels.len() / width));

    for row in levels.chunks_exact(width) {
        let row_start = out.len();
        let mut accumulator: u16 = 0;
        let mut filled = 0;

        for &level in row {
            accumulator = (accumulator << bits) | u16::from(level);
            filled += bits;
            if filled == 8 {
                out.push(accumulator as u8);
                accumulator = 0;
                filled = 0;
            }
        }
        if filled > 0 {
            out.push((accumulator << (8 - filled)) as u8);
        }
        out.resize(row_start + stride, 0);
    }
    out
}

fn pack_rows_rgb565(r5: &[u8], g6: &[u8], b5: &[u8], width: usize, stride: usize) -> Vec<u8> {
    let height = r5.len() / width;
    let mut out = Vec::with_capacity(stride * height);

    for y in 0..height {
        let row_start = out.len();
        for x in 0..width {
            let position = y * width + x;
            let word = (u16::from(r5[position]) << 11)
                | (u16::from(g6[position]) << 5)
                | u16::from(b5[position]);
            out.extend_from_slice(&word.to_le_bytes());
        }
        out.resize(row_start + stride, 0);
    }
    out
}

fn pack_rows_bgr(pixels: &[[u8; 4]], width: usize, stride: usize) -> Vec<u8> {
    let height = pixels.len() / width;
    let mut out = Vec::with_capacity(stride * height);

    for row in pixels.chunks_exact(width) {
        let row_start = out.len();
        for [r, g, b, _] in row {
            out.extend_from_slice(&[*b, *g, *r]);
        }
        out.resize(row_start + stride, 0);
    }
    out
}

fn pack_rows_bgra(pixels: &[[u8; 4]], width: usize, stride: usize, force_opaque: bool) -> Vec<u8> {
    let height = pixels.len() / width;
    let mut out = Vec::with_capacity(stride * height);

    for row in pixels.chunks_exact(width) {
        let row_start = out.len();
        for [r, g, b, a] in row {
            let alpha = if force_opaque { 255 } else { *a };
            out.extend_from_slice(&[*b, *g, *r, alpha]);
        }
        out.resize(row_start + stride, 0);
    }
    out
}
