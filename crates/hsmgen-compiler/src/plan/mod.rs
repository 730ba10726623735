//! Transition planning: from inherited transition tables to ordered
//! callback sequences.
//!
//! For each (state, event) pair the planner produces a list of rules. At run
//! time the dispatcher tries rules in order; the first whose guard is absent
//! or true fires and the rest are never consulted. An unguarded rule
//! therefore ends the search, and any rules behind it are not planned at all.
//!
//! A fired rule is a straight-line sequence of steps: the exit chain
//! (innermost first, each state's exit actions before its on-exit callback),
//! the transition action, the entry chain (outermost first, on-entry before
//! the state's entry actions), and the final state assignment.
//!
//! Chain boundaries, with T the declared source, D the declared destination
//! and L the resolved destination leaf:
//! - T = D: external self-transition, full exit of T and full re-entry.
//! - D strictly inside T: exit up to (not including) T, enter down from T.
//! - D a proper ancestor of T: exit everything strictly below D, then run
//!   D's initial descent; D itself is neither exited nor re-entered.
//! - otherwise: chains meet at LCA(T, L).
//!
//! Inside the initial-descent region of an entry chain (everything strictly
//! below D), a composite's initial action fires before its descent child's
//! on-entry callback.

#[cfg(test)]
mod plan_tests;

use hsmgen_core::{ActionId, Catalogs, GuardId, Model, NodeId, ROOT, Transition, TransitionId};

use crate::resolve::Resolved;

/// One step of a fired rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// An exit action declared on `state`.
    ExitAction { state: NodeId, action: ActionId },
    /// The generic on-exit callback.
    Exit { state: NodeId },
    /// The transition's own action; observes the pre-transition state.
    TransitionAction { action: ActionId },
    /// A composite's initial action, firing while descending into its
    /// subtree. `state` is the literal passed to the callback.
    InitialAction { state: NodeId, action: ActionId },
    /// The generic on-entry callback.
    Enter { state: NodeId },
    /// An entry action declared on `state`.
    EnterAction { state: NodeId, action: ActionId },
    /// on-entry of the final pseudo-state.
    EnterFinal,
    /// Assign the machine state to a declared leaf.
    SetState { state: NodeId },
    /// Assign the final pseudo-state and mark the machine terminated.
    SetFinal,
}

/// A guarded candidate for one (state, event) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub guard: Option<GuardId>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPlan {
    pub event: String,
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePlan {
    pub state: NodeId,
    pub events: Vec<EventPlan>,
}

/// Dispatch plans for every state, in catalog (pre-order) order.
pub fn plan_dispatch(resolved: &Resolved) -> Vec<StatePlan> {
    resolved
        .catalogs
        .states
        .iter()
        .map(|&state| StatePlan {
            state,
            events: resolved
                .event_table(state)
                .iter()
                .map(|(event, tids)| EventPlan {
                    event: event.clone(),
                    rules: plan_rules(resolved, state, tids),
                })
                .collect(),
        })
        .collect()
}

fn plan_rules(resolved: &Resolved, state: NodeId, tids: &[TransitionId]) -> Vec<Rule> {
    let mut rules = Vec::new();
    for &tid in tids {
        let transition = resolved.model.transition(tid);
        let guard = transition
            .guard
            .as_deref()
            .map(|g| resolved.catalogs.guard_id(g));
        rules.push(Rule {
            guard,
            steps: plan_transition(resolved, state, transition),
        });
        if guard.is_none() {
            break; // unconditional rule; anything behind it is unreachable
        }
    }
    rules
}

/// Steps for one fired transition with the machine currently in `state`.
pub fn plan_transition(resolved: &Resolved, state: NodeId, transition: &Transition) -> Vec<Step> {
    let model = &resolved.model;
    let catalogs = &resolved.catalogs;
    let action = transition
        .action
        .as_deref()
        .map(|a| catalogs.action_id(a));

    if transition.internal {
        return action
            .map(|action| vec![Step::TransitionAction { action }])
            .unwrap_or_default();
    }

    let Some(dst) = transition.dst else {
        // Final: full exit, then enter the final pseudo-state and terminate.
        let mut steps = exit_chain(model, catalogs, state, ROOT);
        if let Some(action) = action {
            steps.push(Step::TransitionAction { action });
        }
        steps.push(Step::EnterFinal);
        steps.push(Step::SetFinal);
        return steps;
    };

    let src = transition.src;
    let leaf = if model.is_composite(dst) {
        model.initial_leaf(dst)
    } else {
        dst
    };

    // Both chains meet at one anchor; see the case analysis in the module docs.
    let anchor = if src == dst {
        model.node(src).parent.unwrap_or(ROOT)
    } else if model.is_strict_ancestor(src, dst) {
        src
    } else if model.is_strict_ancestor(dst, src) {
        dst
    } else {
        model.lca(src, leaf).unwrap_or(ROOT)
    };

    let mut steps = exit_chain(model, catalogs, state, anchor);
    if let Some(action) = action {
        steps.push(Step::TransitionAction { action });
    }
    steps.extend(entry_chain(model, catalogs, anchor, leaf, dst));
    steps.push(Step::SetState { state: leaf });
    steps
}

/// Start sequence: the synthetic transition from the initial pseudo-state to
/// the root's initial leaf. The whole path is an initial descent; the root's
/// own initial action is passed the entered child as state literal, since the
/// root has no literal of its own.
pub fn plan_start(resolved: &Resolved) -> Vec<Step> {
    let model = &resolved.model;
    let catalogs = &resolved.catalogs;

    let first = model.node(ROOT).initial_target.or_else(|| {
        catalogs.states.first().copied()
    });
    let Some(first) = first else {
        return Vec::new(); // chart with no states: start is a no-op
    };

    let leaf = model.initial_leaf(first);
    let mut steps = Vec::new();
    for node in model.path_below(ROOT, leaf) {
        let parent = model.node(node).parent.unwrap_or(ROOT);
        if let Some(action) = &model.node(parent).initial_action {
            let literal = if parent == ROOT { node } else { parent };
            steps.push(Step::InitialAction {
                state: literal,
                action: catalogs.action_id(action),
            });
        }
        steps.push(Step::Enter { state: node });
        for action in &model.node(node).entry_actions {
            steps.push(Step::EnterAction {
                state: node,
                action: catalogs.action_id(action),
            });
        }
    }
    steps.push(Step::SetState { state: leaf });
    steps
}

/// Exit from `from` upward until `stop` (exclusive). `stop = ROOT` exits the
/// whole active configuration.
fn exit_chain(model: &Model, catalogs: &Catalogs, from: NodeId, stop: NodeId) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut current = from;
    while current != stop && current != ROOT {
        for action in &model.node(current).exit_actions {
            steps.push(Step::ExitAction {
                state: current,
                action: catalogs.action_id(action),
            });
        }
        steps.push(Step::Exit { state: current });
        current = model.node(current).parent.unwrap_or(ROOT);
    }
    steps
}

/// Enter from just below `anchor` down to `leaf`. Nodes strictly below
/// `descent_root` are part of the initial descent and fire their parent's
/// initial action first.
fn entry_chain(
    model: &Model,
    catalogs: &Catalogs,
    anchor: NodeId,
    leaf: NodeId,
    descent_root: NodeId,
) -> Vec<Step> {
    let mut steps = Vec::new();
    for node in model.path_below(anchor, leaf) {
        if model.is_strict_ancestor(descent_root, node) {
            let parent = model.node(node).parent.unwrap_or(ROOT);
            if parent != ROOT {
                if let Some(action) = &model.node(parent).initial_action {
                    steps.push(Step::InitialAction {
                        state: parent,
                        action: catalogs.action_id(action),
                    });
                }
            }
        }
        steps.push(Step::Enter { state: node });
        for action in &model.node(node).entry_actions {
            steps.push(Step::EnterAction {
                state: node,
                action: catalogs.action_id(action),
            });
        }
    }
    steps
}
