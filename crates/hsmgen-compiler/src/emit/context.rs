//! Render context construction.
//!
//! Turns planner output into the language-neutral context schema consumed by
//! the renderers: catalogs as enum member lists, reset/start sequences as
//! statement lines, and per-state dispatch blocks as pre-indented rule
//! bodies. All spelling goes through the target's capability table, so every
//! renderer sees the same shape.

use serde::Serialize;

use hsmgen_core::catalog::sanitize_id;
use hsmgen_core::{NodeId, PSEUDO_FINAL, PSEUDO_INITIAL};

use crate::plan::{EventPlan, Rule, StatePlan, Step};
use crate::resolve::Resolved;

use super::Target;

/// Everything a renderer needs to produce one artifact.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub machine_name: String,
    pub namespace_base: String,
    pub type_prefix: String,
    /// Declared state members, pre-order; pseudo-states are not included.
    pub states: Vec<String>,
    pub events: Vec<String>,
    pub guard_ids: Vec<String>,
    pub action_ids: Vec<String>,
    /// Unindented statements forming the body of `reset`.
    pub reset_lines: Vec<String>,
    /// Unindented statements forming the body of `start`.
    pub start_lines: Vec<String>,
    pub state_cases: Vec<StateCase>,
    pub pseudo_initial: &'static str,
    pub pseudo_final: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateCase {
    pub enum_name: String,
    pub events: Vec<EventCase>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventCase {
    pub enum_name: String,
    /// Rule bodies, pre-indented to their resting place in the dispatcher.
    pub lines: Vec<String>,
}

/// Per-target spelling helper over the frozen catalogs.
struct Spelling<'a> {
    target: Target,
    prefix: &'a str,
    resolved: &'a Resolved,
}

impl Spelling<'_> {
    fn state_lit(&self, state: NodeId) -> String {
        let member = self.resolved.catalogs.state_name(&self.resolved.model, state);
        self.typed_member("State", &member)
    }

    fn typed_member(&self, enum_base: &str, member: &str) -> String {
        let type_name = format!("{}{}", self.prefix, enum_base);
        self.target.member(&type_name, member)
    }

    fn guard_lit(&self, id: hsmgen_core::GuardId) -> String {
        self.typed_member("GuardId", self.resolved.catalogs.guard_name(id))
    }

    fn action_lit(&self, id: hsmgen_core::ActionId) -> String {
        self.typed_member("ActionId", self.resolved.catalogs.action_name(id))
    }

    /// Event expression used inside `start`, where no event is in flight.
    fn start_event_expr(&self) -> String {
        match self.target {
            Target::Cpp => format!("{}Event{{}}", self.prefix),
            Target::Rust | Target::Python => {
                let first = self
                    .resolved
                    .catalogs
                    .events
                    .first()
                    .map(|e| sanitize_id(e))
                    .unwrap_or_else(|| self.target.placeholder_member().to_owned());
                self.typed_member("Event", &first)
            }
        }
    }

    /// One step as statement lines, with `event_expr` standing in for the
    /// dispatched event.
    fn step_lines(&self, step: &Step, event_expr: &str) -> Vec<String> {
        let t = self.target;
        match step {
            Step::ExitAction { state, action } => vec![t.call(
                "action",
                &[&self.state_lit(*state), event_expr, &self.action_lit(*action)],
            )],
            Step::Exit { state } => vec![t.call("on_exit", &[&self.state_lit(*state)])],
            Step::TransitionAction { action } => vec![t.call(
                "action",
                &[t.state_var(), event_expr, &self.action_lit(*action)],
            )],
            Step::InitialAction { state, action } => vec![t.call(
                "action",
                &[&self.state_lit(*state), event_expr, &self.action_lit(*action)],
            )],
            Step::Enter { state } => vec![t.call("on_entry", &[&self.state_lit(*state)])],
            Step::EnterAction { state, action } => vec![t.call(
                "action",
                &[&self.state_lit(*state), event_expr, &self.action_lit(*action)],
            )],
            Step::EnterFinal => vec![t.call(
                "on_entry",
                &[&self.typed_member("State", PSEUDO_FINAL)],
            )],
            Step::SetState { state } => vec![t.assign(t.state_var(), &self.state_lit(*state))],
            Step::SetFinal => vec![
                t.assign(t.state_var(), &self.typed_member("State", PSEUDO_FINAL)),
                self.terminated_assign(true),
            ],
        }
    }

    fn terminated_assign(&self, value: bool) -> String {
        let lhs = match self.target {
            Target::Cpp => "terminated_",
            Target::Rust => "self.terminated",
            Target::Python => "self._terminated",
        };
        self.target.assign(lhs, self.target.bool_lit(value))
    }

    fn started_assign(&self, value: bool) -> String {
        let lhs = match self.target {
            Target::Cpp => "started_",
            Target::Rust => "self.started",
            Target::Python => "self._started",
        };
        self.target.assign(lhs, self.target.bool_lit(value))
    }

    fn guard_condition(&self, id: hsmgen_core::GuardId) -> String {
        format!(
            "{}.guard({}, {}, {})",
            self.target.callbacks_recv(),
            self.target.state_var(),
            self.target.event_var(),
            self.guard_lit(id)
        )
    }

    fn indent(&self, depth: usize, text: &str) -> String {
        format!("{}{}", self.target.indent_unit().repeat(depth), text)
    }
}

/// Prefix shared by the generated type names: the machine name with a
/// trailing `Machine` stripped.
pub fn type_prefix(machine_name: &str) -> &str {
    machine_name
        .strip_suffix("Machine")
        .filter(|p| !p.is_empty())
        .unwrap_or(machine_name)
}

/// Build the render context for one target.
pub fn build_context(
    resolved: &Resolved,
    start: &[Step],
    dispatch: &[StatePlan],
    machine_name: &str,
    target: Target,
) -> RenderContext {
    let type_prefix = type_prefix(machine_name).to_owned();
    let namespace_base = hsmgen_core::utils::to_snake_case(&type_prefix);

    let sp = Spelling {
        target,
        prefix: &type_prefix,
        resolved,
    };

    let catalogs = &resolved.catalogs;
    let model = &resolved.model;

    let states: Vec<String> = catalogs
        .states
        .iter()
        .map(|&id| catalogs.state_name(model, id))
        .collect();
    let events = members_or_placeholder(
        catalogs.events.iter().map(|e| sanitize_id(e)).collect(),
        target,
    );
    let guard_ids = members_or_placeholder(catalogs.guard_ids.clone(), target);
    let action_ids = members_or_placeholder(catalogs.action_ids.clone(), target);

    let initial_lit = sp.typed_member("State", PSEUDO_INITIAL);
    let reset_lines = vec![
        sp.started_assign(false),
        sp.terminated_assign(false),
        target.assign(target.state_var(), &initial_lit),
    ];

    let start_event = sp.start_event_expr();
    let start_lines: Vec<String> = start
        .iter()
        .flat_map(|step| sp.step_lines(step, &start_event))
        .collect();

    let state_cases = dispatch
        .iter()
        .map(|plan| StateCase {
            enum_name: catalogs.state_name(model, plan.state),
            events: plan
                .events
                .iter()
                .map(|event_plan| event_case(&sp, event_plan))
                .collect(),
        })
        .collect();

    RenderContext {
        machine_name: machine_name.to_owned(),
        namespace_base,
        type_prefix,
        states,
        events,
        guard_ids,
        action_ids,
        reset_lines,
        start_lines,
        state_cases,
        pseudo_initial: PSEUDO_INITIAL,
        pseudo_final: PSEUDO_FINAL,
    }
}

fn members_or_placeholder(members: Vec<String>, target: Target) -> Vec<String> {
    if members.is_empty() {
        vec![target.placeholder_member().to_owned()]
    } else {
        members
    }
}

fn event_case(sp: &Spelling<'_>, plan: &EventPlan) -> EventCase {
    let target = sp.target;
    let base = target.rule_depth();
    let event_expr = target.event_var();
    let mut lines = Vec::new();

    for rule in &plan.rules {
        rule_lines(sp, rule, base, event_expr, &mut lines);
    }

    // When every rule is guarded (or there are none), control can fall
    // through; the dispatcher returns without effect.
    let all_guarded = plan.rules.iter().all(|r| r.guard.is_some());
    if all_guarded {
        lines.push(sp.indent(base, target.return_stmt()));
    }

    EventCase {
        enum_name: sanitize_id(&plan.event),
        lines,
    }
}

fn rule_lines(sp: &Spelling<'_>, rule: &Rule, base: usize, event_expr: &str, out: &mut Vec<String>) {
    let target = sp.target;
    match rule.guard {
        Some(guard) => {
            out.push(sp.indent(base, &target.guard_open(&sp.guard_condition(guard))));
            for step in &rule.steps {
                for line in sp.step_lines(step, event_expr) {
                    out.push(sp.indent(base + 1, &line));
                }
            }
            out.push(sp.indent(base + 1, target.return_stmt()));
            if let Some(close) = target.block_close() {
                out.push(sp.indent(base, close));
            }
        }
        None => match target.unguarded_open() {
            Some(open) => {
                out.push(sp.indent(base, open));
                for step in &rule.steps {
                    for line in sp.step_lines(step, event_expr) {
                        out.push(sp.indent(base + 1, &line));
                    }
                }
                out.push(sp.indent(base + 1, target.return_stmt()));
                if let Some(close) = target.block_close() {
                    out.push(sp.indent(base, close));
                }
            }
            None => {
                for step in &rule.steps {
                    for line in sp.step_lines(step, event_expr) {
                        out.push(sp.indent(base, &line));
                    }
                }
                out.push(sp.indent(base, target.return_stmt()));
            }
        },
    }
}
