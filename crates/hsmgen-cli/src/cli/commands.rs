//! Command tree for the hsmgen binary.

use clap::Command;

use super::args::{input_arg, lang_arg, name_arg, output_arg, sim_dir_arg};

pub fn build_cli() -> Command {
    Command::new("hsmgen")
        .about("PlantUML hierarchical state machine compiler")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("generate")
                .about("Generate a state machine source file")
                .arg(input_arg())
                .arg(output_arg())
                .arg(name_arg())
                .arg(lang_arg()),
        )
        .subcommand(
            Command::new("validate")
                .about("Parse a chart and report syntax errors")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("simulate")
                .about("Generate interactive simulator assets")
                .arg(input_arg())
                .arg(sim_dir_arg())
                .arg(name_arg()),
        )
        .subcommand(
            Command::new("dump")
                .about("Dump the resolved model as JSON")
                .arg(input_arg()),
        )
}
