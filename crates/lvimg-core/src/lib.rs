/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core primitives shared by the `lvimg` family of crates
//!
//! This crate provides the pieces every other member of the family
//! builds on
//!
//! - The color format registry describing every pixel encoding the
//!   encoder can target
//! - Encoder options shared by the conversion pipeline and the
//!   serializers
//! - A byte sink writer with little-endian aware writes used by the
//!   binary and C-array serializers
//!
//! # Features
//! - `serde`: Enables serializing of some of the data structures
//!   present in the crate

pub mod bytestream;
pub mod color_format;
pub mod options;
pub mod serde;
