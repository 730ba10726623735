use hsmgen_compiler::{Resolved, diagnostics, parse};

use crate::cli::ValidateParams;

use super::read_chart;

pub fn run(params: ValidateParams) {
    match execute(&params) {
        Ok(warnings) => {
            for warning in warnings {
                eprintln!("warning: {warning}");
            }
            println!("OK");
        }
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    }
}

pub(crate) fn execute(params: &ValidateParams) -> Result<Vec<String>, String> {
    let source = read_chart(&params.input)?;
    let model = parse(&source)
        .map_err(|e| diagnostics::render_error(&e, &source, params.input.to_str(), false))?;
    Ok(Resolved::resolve(model).warnings)
}
