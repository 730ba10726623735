pub mod dump;
pub mod generate;
pub mod simulate;
pub mod validate;


use std::path::Path;

use hsmgen_core::utils::to_pascal_case;

/// Default machine name: PascalCase of the input file stem plus `Machine`.
pub fn default_machine_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("State");
    format!("{}Machine", to_pascal_case(stem))
}

pub(crate) fn resolve_machine_name(name: Option<&str>, input: &Path) -> String {
    name.map(str::to_owned)
        .unwrap_or_else(|| default_machine_name(input))
}

pub(crate) fn read_chart(input: &Path) -> Result<String, String> {
    std::fs::read_to_string(input)
        .map_err(|e| format!("error: cannot read {}: {e}", input.display()))
}
