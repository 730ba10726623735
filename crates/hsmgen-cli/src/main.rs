mod cli;
mod commands;

use cli::{DumpParams, GenerateParams, SimulateParams, ValidateParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("generate", m)) => {
            commands::generate::run(GenerateParams::from_matches(m));
        }
        Some(("validate", m)) => {
            commands::validate::run(ValidateParams::from_matches(m));
        }
        Some(("simulate", m)) => {
            commands::simulate::run(SimulateParams::from_matches(m));
        }
        Some(("dump", m)) => {
            commands::dump::run(DumpParams::from_matches(m));
        }
        _ => unreachable!("clap should have caught this"),
    }
}
