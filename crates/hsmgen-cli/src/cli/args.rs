//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` composed into commands by `build_cli`.

use std::path::PathBuf;

use clap::{Arg, value_parser};

/// Input chart (-i/--input).
pub fn input_arg() -> Arg {
    Arg::new("input")
        .short('i')
        .long("input")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("PlantUML state chart to compile")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Write the generated machine to FILE")
}

/// Machine class name (-n/--name).
pub fn name_arg() -> Arg {
    Arg::new("name")
        .short('n')
        .long("name")
        .value_name("NAME")
        .help("Machine class name (default: PascalCase file stem plus 'Machine')")
}

/// Target language (-l/--lang).
pub fn lang_arg() -> Arg {
    Arg::new("lang")
        .short('l')
        .long("lang")
        .value_name("LANG")
        .default_value("cpp")
        .help("Target language (cpp, python, rust)")
}

/// Simulator asset directory (--sim-dir).
pub fn sim_dir_arg() -> Arg {
    Arg::new("sim_dir")
        .long("sim-dir")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Directory to write simulator assets into")
}
