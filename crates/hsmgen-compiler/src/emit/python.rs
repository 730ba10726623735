//! Python renderer: the dynamically-typed reference artifact.
//!
//! Mirrors the C++ and Rust machines with `Enum` catalogs, a `Hooks` base
//! class, and an if/elif dispatcher.

use super::context::RenderContext;

pub fn render(ctx: &RenderContext) -> String {
    let mut out = String::new();
    let p = &ctx.type_prefix;

    out.push_str("# Generated by hsmgen from a PlantUML state chart. Do not edit.\n\n");
    out.push_str("from enum import Enum, auto\n\n\n");

    let mut state_members = vec![ctx.pseudo_initial.to_string()];
    state_members.extend(ctx.states.iter().cloned());
    state_members.push(ctx.pseudo_final.to_string());

    emit_enum(&mut out, &format!("{p}State"), &state_members);
    emit_enum(&mut out, &format!("{p}Event"), &ctx.events);
    emit_enum(&mut out, &format!("{p}GuardId"), &ctx.guard_ids);
    emit_enum(&mut out, &format!("{p}ActionId"), &ctx.action_ids);

    out.push_str(&format!("class {p}Hooks:\n"));
    out.push_str("    \"\"\"Semantic callbacks supplied by the application.\"\"\"\n\n");
    out.push_str("    def on_entry(self, state):\n        pass\n\n");
    out.push_str("    def on_exit(self, state):\n        pass\n\n");
    out.push_str("    def guard(self, state, event, guard):\n        return False\n\n");
    out.push_str("    def action(self, state, event, action):\n        pass\n\n\n");

    out.push_str(&format!("class {}:\n", ctx.machine_name));
    out.push_str("    \"\"\"Run-to-completion dispatcher over a fixed chart.\n\n");
    out.push_str("    Hooks invoked during dispatch() must not call dispatch() on the\n");
    out.push_str("    same instance.\n");
    out.push_str("    \"\"\"\n\n");

    out.push_str("    def __init__(self, hooks):\n");
    out.push_str("        self._hooks = hooks\n");
    out.push_str(&format!(
        "        self._state = {p}State.{}\n",
        ctx.pseudo_initial
    ));
    out.push_str("        self._started = False\n");
    out.push_str("        self._terminated = False\n\n");

    out.push_str("    def state(self):\n        return self._state\n\n");
    out.push_str("    def terminated(self):\n        return self._terminated\n\n");

    out.push_str("    def reset(self):\n");
    for line in &ctx.reset_lines {
        out.push_str(&format!("        {line}\n"));
    }
    out.push('\n');

    out.push_str("    def start(self):\n");
    out.push_str("        if self._started:\n            return\n");
    out.push_str("        self._started = True\n");
    for line in &ctx.start_lines {
        out.push_str(&format!("        {line}\n"));
    }
    out.push('\n');

    out.push_str("    def dispatch(self, e):\n");
    out.push_str("        if not self._started or self._terminated:\n            return\n");
    for case in &ctx.state_cases {
        out.push_str(&format!(
            "        if self._state == {p}State.{}:\n",
            case.enum_name
        ));
        for event in &case.events {
            out.push_str(&format!(
                "            if e == {p}Event.{}:\n",
                event.enum_name
            ));
            for line in &event.lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str("            return\n");
    }
    out
}

fn emit_enum(out: &mut String, name: &str, members: &[String]) {
    out.push_str(&format!("class {name}(Enum):\n"));
    for member in members {
        out.push_str(&format!("    {member} = auto()\n"));
    }
    out.push_str("\n\n");
}
