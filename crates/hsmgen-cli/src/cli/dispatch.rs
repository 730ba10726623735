//! Typed parameter extraction from clap matches.

use std::path::PathBuf;

use clap::ArgMatches;

pub struct GenerateParams {
    pub input: PathBuf,
    pub output: PathBuf,
    pub name: Option<String>,
    pub lang: String,
}

impl GenerateParams {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            input: matches.get_one::<PathBuf>("input").expect("required").clone(),
            output: matches
                .get_one::<PathBuf>("output")
                .expect("required")
                .clone(),
            name: matches.get_one::<String>("name").cloned(),
            lang: matches.get_one::<String>("lang").expect("defaulted").clone(),
        }
    }
}

pub struct ValidateParams {
    pub input: PathBuf,
}

impl ValidateParams {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            input: matches.get_one::<PathBuf>("input").expect("required").clone(),
        }
    }
}

pub struct SimulateParams {
    pub input: PathBuf,
    pub sim_dir: PathBuf,
    pub name: Option<String>,
}

impl SimulateParams {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            input: matches.get_one::<PathBuf>("input").expect("required").clone(),
            sim_dir: matches
                .get_one::<PathBuf>("sim_dir")
                .expect("required")
                .clone(),
            name: matches.get_one::<String>("name").cloned(),
        }
    }
}

pub struct DumpParams {
    pub input: PathBuf,
}

impl DumpParams {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            input: matches.get_one::<PathBuf>("input").expect("required").clone(),
        }
    }
}
