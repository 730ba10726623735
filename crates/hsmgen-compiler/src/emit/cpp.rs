//! C++ renderer: a single self-contained header.

use super::context::RenderContext;

pub fn render(ctx: &RenderContext) -> String {
    let mut out = String::new();
    let p = &ctx.type_prefix;

    out.push_str("// Generated by hsmgen from a PlantUML state chart. Do not edit.\n");
    out.push_str("#pragma once\n\n#include <cstdint>\n\n");
    out.push_str(&format!("namespace {} {{\n\n", ctx.namespace_base));

    let mut state_members = vec![ctx.pseudo_initial.to_string()];
    state_members.extend(ctx.states.iter().cloned());
    state_members.push(ctx.pseudo_final.to_string());

    emit_enum(&mut out, &format!("{p}State"), &state_members);
    emit_enum(&mut out, &format!("{p}Event"), &ctx.events);
    emit_enum(&mut out, &format!("{p}GuardId"), &ctx.guard_ids);
    emit_enum(&mut out, &format!("{p}ActionId"), &ctx.action_ids);

    out.push_str("// Semantic callbacks supplied by the application.\n");
    out.push_str(&format!("class {p}Callbacks {{\n"));
    out.push_str(" public:\n");
    out.push_str(&format!("  virtual ~{p}Callbacks() = default;\n"));
    out.push_str(&format!("  virtual void on_entry({p}State state) = 0;\n"));
    out.push_str(&format!("  virtual void on_exit({p}State state) = 0;\n"));
    out.push_str(&format!(
        "  virtual bool guard({p}State state, {p}Event event, {p}GuardId guard) = 0;\n"
    ));
    out.push_str(&format!(
        "  virtual void action({p}State state, {p}Event event, {p}ActionId action) = 0;\n"
    ));
    out.push_str("};\n\n");

    out.push_str("// Run-to-completion dispatcher over a fixed chart. Callbacks invoked\n");
    out.push_str("// during dispatch() must not call dispatch() on the same instance.\n");
    out.push_str(&format!("class {} {{\n", ctx.machine_name));
    out.push_str(" public:\n");
    out.push_str(&format!(
        "  explicit {}({p}Callbacks& callbacks) : impl_(callbacks) {{}}\n\n",
        ctx.machine_name
    ));

    out.push_str("  void start() {\n");
    out.push_str("    if (started_) {\n      return;\n    }\n");
    out.push_str("    started_ = true;\n");
    for line in &ctx.start_lines {
        out.push_str(&format!("    {line}\n"));
    }
    out.push_str("  }\n\n");

    out.push_str(&format!("  void dispatch({p}Event e) {{\n"));
    out.push_str("    if (!started_ || terminated_) {\n      return;\n    }\n");
    out.push_str("    switch (s_) {\n");
    for case in &ctx.state_cases {
        out.push_str(&format!("      case {p}State::{}:\n", case.enum_name));
        if case.events.is_empty() {
            out.push_str("        break;\n");
            continue;
        }
        out.push_str("        switch (e) {\n");
        for event in &case.events {
            out.push_str(&format!("          case {p}Event::{}:\n", event.enum_name));
            for line in &event.lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str("          default:\n            break;\n");
        out.push_str("        }\n");
        out.push_str("        break;\n");
    }
    out.push_str("      default:\n        break;\n");
    out.push_str("    }\n");
    out.push_str("  }\n\n");

    out.push_str(&format!("  {p}State state() const {{ return s_; }}\n\n"));
    out.push_str("  bool terminated() const { return terminated_; }\n\n");

    out.push_str("  void reset() {\n");
    for line in &ctx.reset_lines {
        out.push_str(&format!("    {line}\n"));
    }
    out.push_str("  }\n\n");

    out.push_str(" private:\n");
    out.push_str(&format!("  {p}Callbacks& impl_;\n"));
    out.push_str(&format!(
        "  {p}State s_ = {p}State::{};\n",
        ctx.pseudo_initial
    ));
    out.push_str("  bool started_ = false;\n");
    out.push_str("  bool terminated_ = false;\n");
    out.push_str("};\n\n");

    out.push_str(&format!("}}  // namespace {}\n", ctx.namespace_base));
    out
}

fn emit_enum(out: &mut String, name: &str, members: &[String]) {
    out.push_str(&format!("enum class {name} : std::uint8_t {{\n"));
    for member in members {
        out.push_str(&format!("  {member},\n"));
    }
    out.push_str("};\n\n");
}
