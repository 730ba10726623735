use crate::emit::{Target, build_context, emit, render_simulator};
use crate::plan::{plan_dispatch, plan_start};
use crate::test_utils::{SAMEK, resolved};
use crate::{Error, compile};

/// Asserts that `needles` occur as (trimmed) lines of `output`, in order.
fn assert_line_sequence(output: &str, needles: &[&str]) {
    let lines: Vec<&str> = output.lines().map(str::trim).collect();
    let mut pos = 0;
    for needle in needles {
        match lines[pos..].iter().position(|l| l == needle) {
            Some(idx) => pos += idx + 1,
            None => panic!("missing line '{needle}' after line {pos} in:\n{output}"),
        }
    }
}

fn context(machine_name: &str, target: Target) -> crate::emit::RenderContext {
    let r = resolved(SAMEK);
    let start = plan_start(&r);
    let dispatch = plan_dispatch(&r);
    build_context(&r, &start, &dispatch, machine_name, target)
}

#[test]
fn output_is_byte_identical_across_runs() {
    for target in Target::ALL {
        let first = compile(SAMEK, "HsmMachine", target).unwrap();
        let second = compile(SAMEK, "HsmMachine", target).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn context_carries_the_full_schema() {
    let ctx = context("HsmMachine", Target::Cpp);

    assert_eq!(ctx.machine_name, "HsmMachine");
    assert_eq!(ctx.type_prefix, "Hsm");
    assert_eq!(ctx.namespace_base, "hsm");
    assert_eq!(ctx.states, vec!["s", "s1", "s11", "s2", "s21", "s211"]);
    assert_eq!(
        ctx.events,
        vec!["A", "B", "C", "D", "E", "F", "G", "H", "I", "TERMINATE"]
    );
    assert_eq!(ctx.guard_ids, vec!["isFooTrue", "isFooFalse"]);
    assert_eq!(ctx.action_ids, vec!["setFooFalse", "setFooTrue"]);
    assert_eq!(ctx.pseudo_initial, "InitialPseudoState");
    assert_eq!(ctx.pseudo_final, "FinalPseudoState");
    assert_eq!(ctx.state_cases.len(), 6);
    assert!(!ctx.reset_lines.is_empty());
    assert!(!ctx.start_lines.is_empty());
}

#[test]
fn context_serializes_to_json() {
    let ctx = context("HsmMachine", Target::Python);
    let value = serde_json::to_value(&ctx).unwrap();
    assert!(value.get("state_cases").is_some());
    assert!(value.get("start_lines").is_some());
}

#[test]
fn machine_name_without_suffix_is_its_own_prefix() {
    let ctx = context("Controller", Target::Cpp);
    assert_eq!(ctx.type_prefix, "Controller");
    assert_eq!(ctx.namespace_base, "controller");
}

#[test]
fn empty_catalogs_render_a_placeholder_member() {
    let source = "state lonely\n";
    let cpp = compile(source, "LonelyMachine", Target::Cpp).unwrap();
    assert!(cpp.contains("enum class LonelyEvent : std::uint8_t {\n  __None,\n};"));

    let python = compile(source, "LonelyMachine", Target::Python).unwrap();
    assert!(python.contains("class LonelyEvent(Enum):\n    None_ = auto()"));
}

#[test]
fn cpp_artifact_shape() {
    let out = compile(SAMEK, "HsmMachine", Target::Cpp).unwrap();

    assert_line_sequence(&out, &[
        "#pragma once",
        "namespace hsm {",
        "enum class HsmState : std::uint8_t {",
        "InitialPseudoState,",
        "s,",
        "FinalPseudoState,",
        "};",
        "class HsmCallbacks {",
        "virtual bool guard(HsmState state, HsmEvent event, HsmGuardId guard) = 0;",
        "class HsmMachine {",
        "}  // namespace hsm",
    ]);
}

#[test]
fn cpp_start_runs_the_initial_descent() {
    let out = compile(SAMEK, "HsmMachine", Target::Cpp).unwrap();

    assert_line_sequence(&out, &[
        "void start() {",
        "started_ = true;",
        "impl_.action(HsmState::s, HsmEvent{}, HsmActionId::setFooFalse);",
        "impl_.on_entry(HsmState::s);",
        "impl_.on_entry(HsmState::s2);",
        "impl_.on_entry(HsmState::s21);",
        "impl_.on_entry(HsmState::s211);",
        "s_ = HsmState::s211;",
    ]);
}

#[test]
fn cpp_dispatch_block_for_a_cross_subtree_transition() {
    let out = compile(SAMEK, "HsmMachine", Target::Cpp).unwrap();

    assert_line_sequence(&out, &[
        "case HsmState::s211:",
        "case HsmEvent::G:",
        "impl_.on_exit(HsmState::s211);",
        "impl_.on_exit(HsmState::s21);",
        "impl_.on_exit(HsmState::s2);",
        "impl_.on_entry(HsmState::s1);",
        "impl_.on_entry(HsmState::s11);",
        "s_ = HsmState::s11;",
        "return;",
    ]);
}

#[test]
fn cpp_guarded_rules_short_circuit_in_order() {
    let out = compile(SAMEK, "HsmMachine", Target::Cpp).unwrap();

    assert_line_sequence(&out, &[
        "case HsmState::s11:",
        "case HsmEvent::D:",
        "if (impl_.guard(s_, e, HsmGuardId::isFooTrue)) {",
        "impl_.on_exit(HsmState::s11);",
        "impl_.action(s_, e, HsmActionId::setFooFalse);",
        "impl_.on_entry(HsmState::s11);",
        "s_ = HsmState::s11;",
        "return;",
        "}",
        "if (impl_.guard(s_, e, HsmGuardId::isFooFalse)) {",
        "impl_.on_exit(HsmState::s11);",
        "impl_.on_exit(HsmState::s1);",
        "impl_.action(s_, e, HsmActionId::setFooTrue);",
        "impl_.on_entry(HsmState::s1);",
        "impl_.on_entry(HsmState::s11);",
        "s_ = HsmState::s11;",
        "return;",
        "}",
        "return;",
    ]);
}

#[test]
fn cpp_final_transition_terminates() {
    let out = compile(SAMEK, "HsmMachine", Target::Cpp).unwrap();

    assert_line_sequence(&out, &[
        "case HsmState::s211:",
        "case HsmEvent::TERMINATE:",
        "impl_.on_exit(HsmState::s211);",
        "impl_.on_exit(HsmState::s21);",
        "impl_.on_exit(HsmState::s2);",
        "impl_.on_exit(HsmState::s);",
        "impl_.on_entry(HsmState::FinalPseudoState);",
        "s_ = HsmState::FinalPseudoState;",
        "terminated_ = true;",
        "return;",
    ]);
}

#[test]
fn rust_artifact_shape() {
    let out = compile(SAMEK, "HsmMachine", Target::Rust).unwrap();

    assert_line_sequence(&out, &[
        "#[allow(non_camel_case_types)]",
        "pub enum HsmState {",
        "InitialPseudoState,",
        "s211,",
        "FinalPseudoState,",
        "}",
        "pub trait HsmCallbacks {",
        "fn guard(&mut self, state: HsmState, event: HsmEvent, guard: HsmGuardId) -> bool;",
        "pub struct HsmMachine<'a, C: HsmCallbacks> {",
        "pub fn dispatch(&mut self, event: HsmEvent) {",
        "HsmState::s211 => match event {",
        "HsmEvent::G => {",
        "self.callbacks.on_exit(HsmState::s211);",
        "self.callbacks.on_exit(HsmState::s21);",
        "self.callbacks.on_exit(HsmState::s2);",
        "self.callbacks.on_entry(HsmState::s1);",
        "self.callbacks.on_entry(HsmState::s11);",
        "self.state = HsmState::s11;",
        "return;",
    ]);
}

#[test]
fn rust_guard_condition_spelling() {
    let out = compile(SAMEK, "HsmMachine", Target::Rust).unwrap();
    assert!(out.contains("if self.callbacks.guard(self.state, event, HsmGuardId::isFooTrue) {"));
    // No event is in flight during start; the first member stands in.
    assert!(out.contains("self.callbacks.action(HsmState::s, HsmEvent::A, HsmActionId::setFooFalse);"));
}

#[test]
fn python_artifact_shape() {
    let out = compile(SAMEK, "HsmMachine", Target::Python).unwrap();

    assert_line_sequence(&out, &[
        "from enum import Enum, auto",
        "class HsmState(Enum):",
        "InitialPseudoState = auto()",
        "s211 = auto()",
        "FinalPseudoState = auto()",
        "class HsmHooks:",
        "def guard(self, state, event, guard):",
        "class HsmMachine:",
        "def dispatch(self, e):",
        "if self._state == HsmState.s211:",
        "if e == HsmEvent.G:",
        "self._hooks.on_exit(HsmState.s211)",
        "self._hooks.on_entry(HsmState.s11)",
        "self._state = HsmState.s11",
        "return",
    ]);
}

#[test]
fn python_guard_condition_spelling() {
    let out = compile(SAMEK, "HsmMachine", Target::Python).unwrap();
    assert!(out.contains("if self._hooks.guard(self._state, e, HsmGuardId.isFooTrue):"));
    assert!(out.contains("self._hooks.action(HsmState.s, HsmEvent.A, HsmActionId.setFooFalse)"));
}

#[test]
fn reset_restores_the_initial_pseudo_state() {
    let cpp = compile(SAMEK, "HsmMachine", Target::Cpp).unwrap();
    assert_line_sequence(&cpp, &[
        "void reset() {",
        "started_ = false;",
        "terminated_ = false;",
        "s_ = HsmState::InitialPseudoState;",
    ]);

    let python = compile(SAMEK, "HsmMachine", Target::Python).unwrap();
    assert_line_sequence(&python, &[
        "def reset(self):",
        "self._started = False",
        "self._terminated = False",
        "self._state = HsmState.InitialPseudoState",
    ]);
}

#[test]
fn unknown_language_lists_available_targets() {
    let err = Target::from_name("cobol").unwrap_err();
    assert_eq!(
        err,
        Error::UnsupportedLanguage {
            requested: "cobol".to_owned(),
            available: "cpp, python, rust".to_owned(),
        }
    );
}

#[test]
fn target_name_aliases() {
    assert_eq!(Target::from_name("c++").unwrap(), Target::Cpp);
    assert_eq!(Target::from_name("py").unwrap(), Target::Python);
    assert_eq!(Target::from_name("rs").unwrap(), Target::Rust);
    assert_eq!(Target::Cpp.file_extension(), "hpp");
}

#[test]
fn simulator_drives_the_generated_python_machine() {
    let out = render_simulator("Hsm", "HsmMachine");
    assert!(out.contains("from nicegui import ui"));
    assert!(out.contains("class TraceHooks(HsmHooks):"));
    assert!(out.contains("machine = HsmMachine(hooks)"));
    assert!(out.contains("for event in HsmEvent:"));
}

#[test]
fn every_target_renders_the_same_plans() {
    let r = resolved(SAMEK);
    let start = plan_start(&r);
    let dispatch = plan_dispatch(&r);
    for target in Target::ALL {
        let ctx = build_context(&r, &start, &dispatch, "HsmMachine", target);
        assert_eq!(ctx.state_cases.len(), 6);
        let s211 = &ctx.state_cases[5];
        assert_eq!(s211.enum_name, "s211");
        let events: Vec<&str> = s211.events.iter().map(|e| e.enum_name.as_str()).collect();
        assert_eq!(events, vec!["D", "H", "B", "G", "C", "F", "I", "E", "TERMINATE"]);
        let _ = emit(&r, "HsmMachine", target);
    }
}
