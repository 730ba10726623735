use std::fs;

use hsmgen_compiler::{Target, compile, diagnostics};

use crate::cli::GenerateParams;

use super::{read_chart, resolve_machine_name};

pub fn run(params: GenerateParams) {
    if let Err(message) = execute(&params) {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

pub(crate) fn execute(params: &GenerateParams) -> Result<(), String> {
    let target = Target::from_name(&params.lang).map_err(|e| format!("error: {e}"))?;
    let source = read_chart(&params.input)?;
    let machine_name = resolve_machine_name(params.name.as_deref(), &params.input);

    let code = compile(&source, &machine_name, target)
        .map_err(|e| diagnostics::render_error(&e, &source, params.input.to_str(), false))?;

    fs::write(&params.output, code)
        .map_err(|e| format!("error: cannot write {}: {e}", params.output.display()))
}
