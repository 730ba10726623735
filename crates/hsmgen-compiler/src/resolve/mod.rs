//! Semantic resolution: closes a parsed model for planning.
//!
//! Builds the identifier catalogs and, for every state, the inherited
//! transition table: the state's own outgoing transitions plus those of all
//! its ancestors, grouped by event. Within one event group, rules are ordered
//! by source depth descending (deeper sources shadow shallower ones), then by
//! declaration order. Event groups keep the order events are first seen
//! walking from the state upward.
//!
//! Resolution is total on any model the parser accepts: states that were
//! referenced but never declared are kept as leaves under the scope of their
//! first mention, and reported as warnings only.


use indexmap::IndexMap;

use hsmgen_core::{Catalogs, Model, NodeId, TransitionId};

/// A frozen model with catalogs and per-state dispatch tables.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub model: Model,
    pub catalogs: Catalogs,
    /// state -> event -> ordered rule candidates.
    dispatch: IndexMap<NodeId, IndexMap<String, Vec<TransitionId>>>,
    /// Auto-vivified state names, for optional reporting.
    pub warnings: Vec<String>,
}

impl Resolved {
    pub fn resolve(model: Model) -> Self {
        let catalogs = Catalogs::build(&model);

        let mut by_src: IndexMap<NodeId, Vec<TransitionId>> = IndexMap::new();
        for (idx, transition) in model.transitions().iter().enumerate() {
            by_src
                .entry(transition.src)
                .or_default()
                .push(TransitionId::new(idx));
        }

        let mut dispatch = IndexMap::new();
        for &state in &catalogs.states {
            let mut candidates: Vec<TransitionId> = Vec::new();
            for ancestor in model.ancestors(state) {
                if let Some(own) = by_src.get(&ancestor) {
                    candidates.extend(own);
                }
            }

            let mut by_event: IndexMap<String, Vec<TransitionId>> = IndexMap::new();
            for tid in candidates {
                let Some(event) = model.transition(tid).event.clone() else {
                    continue; // eventless transitions are inert
                };
                by_event.entry(event).or_default().push(tid);
            }
            for rules in by_event.values_mut() {
                rules.sort_by_key(|&tid| std::cmp::Reverse(model.depth(model.transition(tid).src)));
            }
            dispatch.insert(state, by_event);
        }

        let warnings = model
            .undeclared()
            .iter()
            .map(|&id| {
                format!(
                    "state '{}' is referenced but never declared; treating it as a leaf",
                    model.node(id).name
                )
            })
            .collect();

        Self {
            model,
            catalogs,
            dispatch,
            warnings,
        }
    }

    /// Event table for one state: event name -> ordered rule candidates.
    pub fn event_table(&self, state: NodeId) -> &IndexMap<String, Vec<TransitionId>> {
        &self.dispatch[&state]
    }
}
