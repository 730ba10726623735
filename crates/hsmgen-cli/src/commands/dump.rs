use serde::Serialize;

use hsmgen_compiler::{Resolved, diagnostics, parse};
use hsmgen_core::{Catalogs, Model};

use crate::cli::DumpParams;

use super::read_chart;

#[derive(Serialize)]
struct DumpView<'a> {
    model: &'a Model,
    catalogs: &'a Catalogs,
}

pub fn run(params: DumpParams) {
    match execute(&params) {
        Ok(json) => println!("{json}"),
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    }
}

pub(crate) fn execute(params: &DumpParams) -> Result<String, String> {
    let source = read_chart(&params.input)?;
    let model = parse(&source)
        .map_err(|e| diagnostics::render_error(&e, &source, params.input.to_str(), false))?;
    let resolved = Resolved::resolve(model);
    let view = DumpView {
        model: &resolved.model,
        catalogs: &resolved.catalogs,
    };
    serde_json::to_string_pretty(&view).map_err(|e| format!("error: {e}"))
}
