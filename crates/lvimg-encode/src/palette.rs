/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Palette construction for the indexed formats.
//!
//! Unique colors are collected in first-seen order so the same input
//! always produces the same table. An image with more unique colors
//! than the target can index fails with
//! [`PaletteOverflow`](crate::errors::EncodeErrors::PaletteOverflow),
//! the builder never requantizes behind the caller's back.

use std::collections::HashMap;

use lvimg_core::color_format::ColorFormat;

use crate::errors::EncodeErrors;

/// Color table of an indexed image.
///
/// Entries are RGBA in first-seen order. The serialized form pads the
/// table with zero entries to the full capacity of the index width, so
/// consumers can locate pixel data at a fixed offset.
pub struct Palette {
    entries:  Vec<[u8; 4]>,
    capacity: usize
}

impl Palette {
    /// Number of colors actually present.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of colors the index width can address.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The RGBA entries in index order.
    pub fn entries(&self) -> &[[u8; 4]] {
        &self.entries
    }

    /// Serialize the table as firmware color entries.
    ///
    /// Each entry is stored as B,G,R,A and the table is padded with
    /// zeros to `capacity` entries.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.capacity * 4);

        for [r, g, b, a] in &self.entries {
            out.extend_from_slice(&[*b, *g, *r, *a]);
        }
        out.resize(self.capacity * 4, 0);

        out
    }
}

/// Build the palette and per-pixel index list for an indexed format.
///
/// # Arguments
/// - `pixels`: Post-conversion RGBA pixels
/// - `format`: The indexed target, decides the palette capacity
///
/// # Returns
/// - `Ok((palette, indices))`: The color table plus one index per pixel
/// - `Err(PaletteOverflow)`: More unique colors than the index width
///   can address
pub(crate) fn build_palette(
    pixels: &[[u8; 4]], format: ColorFormat
) -> Result<(Palette, Vec<u8>), EncodeErrors> {
    let capacity = format.palette_entries();

    let mut entries: Vec<[u8; 4]> = Vec::with_capacity(capacity);
    let mut lookup: HashMap<[u8; 4], u8> = HashMap::with_capacity(capacity);
    let mut indices = Vec::with_capacity(pixels.len());

    for pixel in pixels {
        let index = match lookup.get(pixel) {
            Some(index) => *index,
            None => {
                if entries.len() == capacity {
                    // one past capacity is enough to report, counting the
                    // rest would only change the error message
                    return Err(EncodeErrors::PaletteOverflow(entries.len() + 1, capacity));
                }
                let index = entries.len() as u8;
                entries.push(*pixel);
                lookup.insert(*pixel, index);
                index
            }
        };
        indices.push(index);
    }

    Ok((Palette { entries, capacity }, indices))
}
