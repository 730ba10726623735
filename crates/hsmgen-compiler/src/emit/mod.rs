//! Emitter: render-context construction and per-target renderers.
//!
//! `build_context` flattens planner output into the fixed context schema;
//! `cpp`, `rust`, and `python` each assemble a complete artifact from that
//! context by plain textual substitution. The same plans feed every target.

mod context;
mod cpp;
mod python;
mod rust;
mod simulator;
mod target;

#[cfg(test)]
mod emit_tests;

pub use context::{EventCase, RenderContext, StateCase, build_context, type_prefix};
pub use simulator::render_simulator;
pub use target::Target;

use crate::plan::{plan_dispatch, plan_start};
use crate::resolve::Resolved;

/// Render the machine artifact for `target`.
pub fn emit(resolved: &Resolved, machine_name: &str, target: Target) -> String {
    let start = plan_start(resolved);
    let dispatch = plan_dispatch(resolved);
    let context = build_context(resolved, &start, &dispatch, machine_name, target);
    render(&context, target)
}

/// Render a pre-built context. Exposed for context-level tooling and tests.
pub fn render(context: &RenderContext, target: Target) -> String {
    match target {
        Target::Cpp => cpp::render(context),
        Target::Rust => rust::render(context),
        Target::Python => python::render(context),
    }
}
