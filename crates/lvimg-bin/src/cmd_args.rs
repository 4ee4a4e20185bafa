/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{info, Level};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("lvimg")
        .about("Convert raster images into LVGL binary or C-array form")
        .arg(Arg::new("in")
            .short('i')
            .help("Input file to read data from")
            .long("input")
            .required(true))
        .arg(Arg::new("out")
            .short('o')
            .help("Output file to write the artifact to")
            .long("output")
            .required(true))
        .arg(Arg::new("format")
            .short('f')
            .long("format")
            .help_heading("CONVERSION")
            .help("Target color format, e.g. rgb565, i4, a8, argb8888, raw, or auto")
            .default_value("auto"))
        .arg(Arg::new("output-format")
            .long("output-format")
            .help_heading("CONVERSION")
            .help("Artifact kind to emit")
            .value_parser(["bin", "c"])
            .default_value("bin"))
        .arg(Arg::new("compress")
            .long("compress")
            .help_heading("CONVERSION")
            .help("Compression applied to the encoded stream")
            .value_parser(["none", "rle"])
            .default_value("none"))
        .arg(Arg::new("align")
            .long("align")
            .help_heading("CONVERSION")
            .help("Row byte alignment, one of 1, 2, 4, 8, 16")
            .value_parser(value_parser!(usize))
            .default_value("1"))
        .arg(Arg::new("background")
            .long("background")
            .help_heading("CONVERSION")
            .help("RRGGBB hex composited under the image when the target has no alpha")
            .default_value("000000"))
        .arg(Arg::new("dither")
            .long("dither")
            .help_heading("CONVERSION")
            .action(ArgAction::SetTrue)
            .help("Apply error-diffusion dithering to low bit-depth channels"))
        .arg(Arg::new("premultiply")
            .long("premultiply")
            .help_heading("CONVERSION")
            .action(ArgAction::SetTrue)
            .help("Premultiply color channels by alpha before quantization"))
        .arg(Arg::new("lv-version")
            .long("lv-version")
            .help_heading("CONVERSION")
            .help("Firmware descriptor layout to emit")
            .value_parser(["v8", "v9"])
            .default_value("v9"))
        .arg(Arg::new("name")
            .long("name")
            .help_heading("CONVERSION")
            .help("Identifier used in C output, defaults to the output file stem"))
        .arg(Arg::new("width")
            .long("width")
            .help_heading("RAW")
            .help("Pixel width of a raw payload, raw bytes carry no dimensions")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("height")
            .long("height")
            .help_heading("RAW")
            .help("Pixel height of a raw payload")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the conversion"))
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if *options.get_one::<bool>("debug").unwrap() {
        log_level = Level::Debug;
    } else if *options.get_one::<bool>("trace").unwrap() {
        log_level = Level::Trace;
    } else if *options.get_one::<bool>("warn").unwrap() {
        log_level = Level::Warn
    } else if *options.get_one::<bool>("info").unwrap() {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    simple_logger::init_with_level(log_level).unwrap();

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
