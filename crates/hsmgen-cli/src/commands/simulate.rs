use std::fs;
use std::path::Path;

use hsmgen_compiler::emit::{render_simulator, type_prefix};
use hsmgen_compiler::{Target, compile, diagnostics};

use crate::cli::SimulateParams;

use super::{read_chart, resolve_machine_name};

pub fn run(params: SimulateParams) {
    let machine_name = resolve_machine_name(params.name.as_deref(), &params.input);
    if let Err(message) = write_assets(&params.input, &params.sim_dir, &machine_name) {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

/// Writes the simulator bundle: the Python machine, the NiceGUI driver, and
/// a verbatim copy of the chart.
pub(crate) fn write_assets(input: &Path, sim_dir: &Path, machine_name: &str) -> Result<(), String> {
    let source = read_chart(input)?;
    let machine = compile(&source, machine_name, Target::Python)
        .map_err(|e| diagnostics::render_error(&e, &source, input.to_str(), false))?;

    fs::create_dir_all(sim_dir)
        .map_err(|e| format!("error: cannot create {}: {e}", sim_dir.display()))?;
    write(sim_dir, "machine.py", &machine)?;

    let simulator = render_simulator(type_prefix(machine_name), machine_name);
    write(sim_dir, "simulator.py", &simulator)?;

    let chart_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chart.puml".to_owned());
    write(sim_dir, &chart_name, &source)
}

fn write(dir: &Path, name: &str, content: &str) -> Result<(), String> {
    let path = dir.join(name);
    fs::write(&path, content).map_err(|e| format!("error: cannot write {}: {e}", path.display()))
}
