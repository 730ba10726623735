//! Rust renderer: a standalone module meant for `include!` or direct use.
//!
//! Chart identifiers are kept verbatim as enum members, so the enums carry
//! `#[allow(non_camel_case_types)]`.

use super::context::RenderContext;

pub fn render(ctx: &RenderContext) -> String {
    let mut out = String::new();
    let p = &ctx.type_prefix;

    out.push_str("// Generated by hsmgen from a PlantUML state chart. Do not edit.\n\n");

    let mut state_members = vec![ctx.pseudo_initial.to_string()];
    state_members.extend(ctx.states.iter().cloned());
    state_members.push(ctx.pseudo_final.to_string());

    out.push_str("/// Chart states, including both pseudo-states.\n");
    emit_enum(&mut out, &format!("{p}State"), &state_members);
    emit_enum(&mut out, &format!("{p}Event"), &ctx.events);
    emit_enum(&mut out, &format!("{p}GuardId"), &ctx.guard_ids);
    emit_enum(&mut out, &format!("{p}ActionId"), &ctx.action_ids);

    out.push_str("/// Semantic callbacks supplied by the application.\n");
    out.push_str(&format!("pub trait {p}Callbacks {{\n"));
    out.push_str(&format!("    fn on_entry(&mut self, state: {p}State);\n"));
    out.push_str(&format!("    fn on_exit(&mut self, state: {p}State);\n"));
    out.push_str(&format!(
        "    fn guard(&mut self, state: {p}State, event: {p}Event, guard: {p}GuardId) -> bool;\n"
    ));
    out.push_str(&format!(
        "    fn action(&mut self, state: {p}State, event: {p}Event, action: {p}ActionId);\n"
    ));
    out.push_str("}\n\n");

    out.push_str("/// Run-to-completion dispatcher over a fixed chart. Callbacks invoked\n");
    out.push_str("/// during `dispatch` must not call `dispatch` on the same instance.\n");
    out.push_str(&format!(
        "pub struct {}<'a, C: {p}Callbacks> {{\n",
        ctx.machine_name
    ));
    out.push_str("    callbacks: &'a mut C,\n");
    out.push_str(&format!("    state: {p}State,\n"));
    out.push_str("    started: bool,\n");
    out.push_str("    terminated: bool,\n");
    out.push_str("}\n\n");

    out.push_str(&format!(
        "impl<'a, C: {p}Callbacks> {}<'a, C> {{\n",
        ctx.machine_name
    ));
    out.push_str("    pub fn new(callbacks: &'a mut C) -> Self {\n");
    out.push_str("        Self {\n");
    out.push_str("            callbacks,\n");
    out.push_str(&format!(
        "            state: {p}State::{},\n",
        ctx.pseudo_initial
    ));
    out.push_str("            started: false,\n");
    out.push_str("            terminated: false,\n");
    out.push_str("        }\n");
    out.push_str("    }\n\n");

    out.push_str("    pub fn start(&mut self) {\n");
    out.push_str("        if self.started {\n            return;\n        }\n");
    out.push_str("        self.started = true;\n");
    for line in &ctx.start_lines {
        out.push_str(&format!("        {line}\n"));
    }
    out.push_str("    }\n\n");

    out.push_str("    #[allow(unused_variables, unreachable_patterns)]\n");
    out.push_str(&format!("    pub fn dispatch(&mut self, event: {p}Event) {{\n"));
    out.push_str("        if !self.started || self.terminated {\n            return;\n        }\n");
    out.push_str("        match self.state {\n");
    for case in &ctx.state_cases {
        if case.events.is_empty() {
            out.push_str(&format!(
                "            {p}State::{} => {{}}\n",
                case.enum_name
            ));
            continue;
        }
        out.push_str(&format!(
            "            {p}State::{} => match event {{\n",
            case.enum_name
        ));
        for event in &case.events {
            out.push_str(&format!(
                "                {p}Event::{} => {{\n",
                event.enum_name
            ));
            for line in &event.lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push_str("                }\n");
        }
        out.push_str("                _ => {}\n");
        out.push_str("            },\n");
    }
    out.push_str("            _ => {}\n");
    out.push_str("        }\n");
    out.push_str("    }\n\n");

    out.push_str(&format!("    pub fn state(&self) -> {p}State {{\n"));
    out.push_str("        self.state\n");
    out.push_str("    }\n\n");
    out.push_str("    pub fn terminated(&self) -> bool {\n");
    out.push_str("        self.terminated\n");
    out.push_str("    }\n\n");

    out.push_str("    pub fn reset(&mut self) {\n");
    for line in &ctx.reset_lines {
        out.push_str(&format!("        {line}\n"));
    }
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}

fn emit_enum(out: &mut String, name: &str, members: &[String]) {
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq)]\n");
    out.push_str("#[allow(non_camel_case_types)]\n");
    out.push_str(&format!("pub enum {name} {{\n"));
    for member in members {
        out.push_str(&format!("    {member},\n"));
    }
    out.push_str("}\n\n");
}
