use std::collections::HashSet;

use indoc::indoc;

use hsmgen_core::NodeId;

use crate::plan::{Rule, StatePlan, Step, plan_dispatch, plan_start};
use crate::resolve::Resolved;
use crate::test_utils::{SAMEK, node, resolved};

fn name(r: &Resolved, id: NodeId) -> String {
    r.model.node(id).name.clone()
}

fn exits(r: &Resolved, steps: &[Step]) -> Vec<String> {
    steps
        .iter()
        .filter_map(|s| match s {
            Step::Exit { state } => Some(name(r, *state)),
            _ => None,
        })
        .collect()
}

fn entries(r: &Resolved, steps: &[Step]) -> Vec<String> {
    steps
        .iter()
        .filter_map(|s| match s {
            Step::Enter { state } => Some(name(r, *state)),
            _ => None,
        })
        .collect()
}

fn actions(r: &Resolved, steps: &[Step]) -> Vec<String> {
    steps
        .iter()
        .filter_map(|s| match s {
            Step::ExitAction { action, .. }
            | Step::TransitionAction { action }
            | Step::InitialAction { action, .. }
            | Step::EnterAction { action, .. } => {
                Some(r.catalogs.action_name(*action).to_owned())
            }
            _ => None,
        })
        .collect()
}

fn guards(r: &Resolved, rules: &[Rule]) -> Vec<Option<String>> {
    rules
        .iter()
        .map(|rule| rule.guard.map(|g| r.catalogs.guard_name(g).to_owned()))
        .collect()
}

fn rules_for(r: &Resolved, plans: &[StatePlan], state: &str, event: &str) -> Vec<Rule> {
    let id = node(r, state);
    plans
        .iter()
        .find(|p| p.state == id)
        .expect("state has a plan")
        .events
        .iter()
        .find(|e| e.event == event)
        .expect("event has a plan")
        .rules
        .clone()
}

#[test]
fn start_descends_to_the_initial_leaf() {
    let r = resolved(SAMEK);
    let steps = plan_start(&r);

    assert_eq!(entries(&r, &steps), vec!["s", "s2", "s21", "s211"]);
    assert_eq!(exits(&r, &steps), Vec::<String>::new());
    assert_eq!(actions(&r, &steps), vec!["setFooFalse"]);
    assert_eq!(
        steps.last(),
        Some(&Step::SetState {
            state: node(&r, "s211")
        })
    );

    // The root's initial action fires before the first on-entry and is
    // attributed to the entered top-level state.
    assert_eq!(
        steps[0],
        Step::InitialAction {
            state: node(&r, "s"),
            action: r.catalogs.action_id("setFooFalse"),
        }
    );
    assert_eq!(
        steps[1],
        Step::Enter {
            state: node(&r, "s")
        }
    );
}

#[test]
fn transition_across_subtrees_meets_at_lca() {
    // Scenario: G in s211 fires s21 -> s1.
    let r = resolved(SAMEK);
    let plans = plan_dispatch(&r);
    let rules = rules_for(&r, &plans, "s211", "G");

    assert_eq!(rules.len(), 1);
    assert_eq!(exits(&r, &rules[0].steps), vec!["s211", "s21", "s2"]);
    assert_eq!(entries(&r, &rules[0].steps), vec!["s1", "s11"]);
    assert_eq!(
        rules[0].steps.last(),
        Some(&Step::SetState {
            state: node(&r, "s11")
        })
    );
}

#[test]
fn internal_transition_is_neutral() {
    // Scenario: I in s11 fires s1's unguarded internal rule.
    let r = resolved(SAMEK);
    let plans = plan_dispatch(&r);
    let rules = rules_for(&r, &plans, "s11", "I");

    // s1's unconditional rule shadows the guarded rule inherited from s.
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].guard, None);
    assert_eq!(rules[0].steps, Vec::<Step>::new());
}

#[test]
fn internal_transition_keeps_its_action() {
    let r = resolved(SAMEK);
    let plans = plan_dispatch(&r);
    let rules = rules_for(&r, &plans, "s211", "I");

    assert_eq!(guards(&r, &rules), vec![
        Some("isFooFalse".to_owned()),
        Some("isFooTrue".to_owned()),
    ]);
    assert_eq!(rules[0].steps, vec![Step::TransitionAction {
        action: r.catalogs.action_id("setFooTrue"),
    }]);
    assert_eq!(rules[1].steps, vec![Step::TransitionAction {
        action: r.catalogs.action_id("setFooFalse"),
    }]);
}

#[test]
fn self_transition_on_composite_exits_and_reenters() {
    // Scenario: A in s11 fires s1 -> s1.
    let r = resolved(SAMEK);
    let plans = plan_dispatch(&r);
    let rules = rules_for(&r, &plans, "s11", "A");

    assert_eq!(rules.len(), 1);
    assert_eq!(exits(&r, &rules[0].steps), vec!["s11", "s1"]);
    assert_eq!(entries(&r, &rules[0].steps), vec!["s1", "s11"]);
}

#[test]
fn self_transition_on_leaf_is_external() {
    let r = resolved(indoc! {"
        state x
        x --> x : E
    "});
    let plans = plan_dispatch(&r);
    let rules = rules_for(&r, &plans, "x", "E");

    assert_eq!(exits(&r, &rules[0].steps), vec!["x"]);
    assert_eq!(entries(&r, &rules[0].steps), vec!["x"]);
}

#[test]
fn guarded_rules_probe_deeper_sources_first() {
    // Scenario: D in s11. The deeper rule (s11, isFooTrue) is listed first;
    // when its guard fails the dispatcher falls through to (s1, isFooFalse).
    let r = resolved(SAMEK);
    let plans = plan_dispatch(&r);
    let rules = rules_for(&r, &plans, "s11", "D");

    assert_eq!(guards(&r, &rules), vec![
        Some("isFooTrue".to_owned()),
        Some("isFooFalse".to_owned()),
    ]);

    // Deeper rule: s11 -> s1, an upward-crossing one level up.
    assert_eq!(exits(&r, &rules[0].steps), vec!["s11"]);
    assert_eq!(entries(&r, &rules[0].steps), vec!["s11"]);
    assert_eq!(actions(&r, &rules[0].steps), vec!["setFooFalse"]);

    // Shallower rule: s1 -> s; s is neither exited nor re-entered, and its
    // initial descent runs back down to s11.
    assert_eq!(exits(&r, &rules[1].steps), vec!["s11", "s1"]);
    assert_eq!(entries(&r, &rules[1].steps), vec!["s1", "s11"]);
    assert_eq!(actions(&r, &rules[1].steps), vec!["setFooTrue"]);
}

#[test]
fn transition_to_composite_descends_its_initials() {
    // Scenario: C in s11 fires s1 -> s2 and descends to s211.
    let r = resolved(SAMEK);
    let plans = plan_dispatch(&r);
    let rules = rules_for(&r, &plans, "s11", "C");

    assert_eq!(exits(&r, &rules[0].steps), vec!["s11", "s1"]);
    assert_eq!(entries(&r, &rules[0].steps), vec!["s2", "s21", "s211"]);
    assert_eq!(
        rules[0].steps.last(),
        Some(&Step::SetState {
            state: node(&r, "s211")
        })
    );
}

#[test]
fn downward_transition_from_an_ancestor() {
    // Scenario: E in s211 fires s -> s11; s itself stays active.
    let r = resolved(SAMEK);
    let plans = plan_dispatch(&r);
    let rules = rules_for(&r, &plans, "s211", "E");

    assert_eq!(exits(&r, &rules[0].steps), vec!["s211", "s21", "s2"]);
    assert_eq!(entries(&r, &rules[0].steps), vec!["s1", "s11"]);
}

#[test]
fn upward_crossing_spares_the_destination_ancestor() {
    // H in s211 fires s211 -> s: everything strictly below s is exited, s is
    // not re-entered, and s's initial designation leads back to s11.
    let r = resolved(SAMEK);
    let plans = plan_dispatch(&r);
    let rules = rules_for(&r, &plans, "s211", "H");

    assert_eq!(exits(&r, &rules[0].steps), vec!["s211", "s21", "s2"]);
    assert_eq!(entries(&r, &rules[0].steps), vec!["s1", "s11"]);
    assert_eq!(
        rules[0].steps.last(),
        Some(&Step::SetState {
            state: node(&r, "s11")
        })
    );
}

#[test]
fn final_transition_exits_everything_and_terminates() {
    // Scenario: TERMINATE in s211.
    let r = resolved(SAMEK);
    let plans = plan_dispatch(&r);
    let rules = rules_for(&r, &plans, "s211", "TERMINATE");

    assert_eq!(rules.len(), 1);
    assert_eq!(exits(&r, &rules[0].steps), vec!["s211", "s21", "s2", "s"]);
    assert_eq!(entries(&r, &rules[0].steps), Vec::<String>::new());
    let tail: Vec<&Step> = rules[0].steps.iter().rev().take(2).collect();
    assert_eq!(tail, vec![&Step::SetFinal, &Step::EnterFinal]);
}

#[test]
fn exit_actions_precede_on_exit_and_entry_actions_follow_on_entry() {
    let r = resolved(indoc! {"
        state a
        a : exit /aExitFirst
        a : exit /aExitSecond
        state b
        b : entry /bEnter
        a --> b : GO /go
    "});
    let plans = plan_dispatch(&r);
    let rules = rules_for(&r, &plans, "a", "GO");

    let a = node(&r, "a");
    let b = node(&r, "b");
    let act = |raw: &str| r.catalogs.action_id(raw);
    assert_eq!(rules[0].steps, vec![
        Step::ExitAction { state: a, action: act("aExitFirst") },
        Step::ExitAction { state: a, action: act("aExitSecond") },
        Step::Exit { state: a },
        Step::TransitionAction { action: act("go") },
        Step::Enter { state: b },
        Step::EnterAction { state: b, action: act("bEnter") },
        Step::SetState { state: b },
    ]);
}

#[test]
fn initial_actions_fire_inside_the_descent_region_only() {
    let r = resolved(indoc! {"
        state a
        state outer {
          [*] --> mid : /midInit
          state mid {
            [*] --> leaf
            state leaf
          }
        }
        a --> outer : GO
    "});
    let plans = plan_dispatch(&r);
    let rules = rules_for(&r, &plans, "a", "GO");

    let act = r.catalogs.action_id("midInit");
    assert_eq!(rules[0].steps, vec![
        Step::Exit { state: node(&r, "a") },
        Step::Enter { state: node(&r, "outer") },
        Step::InitialAction { state: node(&r, "outer"), action: act },
        Step::Enter { state: node(&r, "mid") },
        Step::Enter { state: node(&r, "leaf") },
        Step::SetState { state: node(&r, "leaf") },
    ]);
}

#[test]
fn explicit_path_through_an_initial_target_fires_no_initial_action() {
    // C in s11 enters s2, which is also s's initial target; the explicit
    // transition must not replay s's initial action.
    let r = resolved(SAMEK);
    let plans = plan_dispatch(&r);
    let rules = rules_for(&r, &plans, "s11", "C");

    assert_eq!(actions(&r, &rules[0].steps), Vec::<String>::new());
}

#[test]
fn unguarded_rule_truncates_shallower_candidates() {
    let r = resolved(indoc! {"
        state outer {
          state inner
        }
        inner --> inner : GO
        outer --> outer : GO [never]
    "});
    let plans = plan_dispatch(&r);
    let rules = rules_for(&r, &plans, "inner", "GO");

    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].guard, None);
}

#[test]
fn exit_entry_symmetry_across_all_samek_plans() {
    // Property: from any leaf, firing any external rule leaves exactly the
    // destination leaf's ancestor chain active.
    let r = resolved(SAMEK);
    let plans = plan_dispatch(&r);

    for plan in &plans {
        if r.model.is_composite(plan.state) {
            continue; // composites are never the current state
        }
        let active: HashSet<NodeId> = r.model.ancestors(plan.state).into_iter().collect();
        for event_plan in &plan.events {
            for rule in &event_plan.rules {
                let target = rule.steps.iter().find_map(|s| match s {
                    Step::SetState { state } => Some(*state),
                    _ => None,
                });
                let Some(target) = target else {
                    continue; // internal or final rule
                };

                let mut after = active.clone();
                for step in &rule.steps {
                    match step {
                        Step::Exit { state } => {
                            assert!(after.remove(state), "exited an inactive state");
                        }
                        Step::Enter { state } => {
                            assert!(after.insert(*state), "entered an active state");
                        }
                        _ => {}
                    }
                }
                let expected: HashSet<NodeId> = r.model.ancestors(target).into_iter().collect();
                assert_eq!(after, expected, "asymmetric chains for {}", event_plan.event);
            }
        }
    }
}

#[test]
fn empty_chart_plans_nothing() {
    let r = resolved("@startuml\n@enduml\n");
    assert!(plan_start(&r).is_empty());
    assert!(plan_dispatch(&r).is_empty());
}
