//! Deterministic identifier catalogs.
//!
//! Computed once from a frozen model. Ordering rules:
//! - states: tree pre-order
//! - events: ASCII lexical order
//! - guard and action IDs: first registration order, where registration walks
//!   transitions in declaration order, then per-node entry/exit actions in
//!   node first-mention order, then initial actions in pre-order (root first)
//!
//! Guard and action names are sanitized into target-language identifiers;
//! distinct raw names that sanitize identically share one catalog entry.

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{Model, NodeId, ROOT};

/// Index into [`Catalogs::guard_ids`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct GuardId(u32);

impl GuardId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into [`Catalogs::action_ids`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct ActionId(u32);

impl ActionId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Replaces every character outside `[A-Za-z0-9_]` with an underscore.
pub fn sanitize_id(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// [`sanitize_id`] plus the rules for opaque guard/action expressions:
/// an empty result becomes `_`, a leading digit gets an underscore prefix.
pub fn normalized_id(raw: &str) -> String {
    let mut id = sanitize_id(raw);
    if id.is_empty() {
        id.push('_');
    }
    if id.as_bytes()[0].is_ascii_digit() {
        id.insert(0, '_');
    }
    id
}

/// Frozen enumerations feeding the planner and the emitter.
#[derive(Debug, Clone, Serialize)]
pub struct Catalogs {
    /// All states in pre-order.
    pub states: Vec<NodeId>,
    /// Event names, ASCII-sorted.
    pub events: Vec<String>,
    /// Sanitized guard identifiers, first-use order.
    pub guard_ids: Vec<String>,
    /// Sanitized action identifiers, first-use order.
    pub action_ids: Vec<String>,
    /// Raw guard expression -> catalog entry.
    guard_lookup: IndexMap<String, GuardId>,
    /// Raw action name -> catalog entry.
    action_lookup: IndexMap<String, ActionId>,
}

impl Catalogs {
    pub fn build(model: &Model) -> Self {
        let states = model.pre_order();

        let mut events: Vec<String> = model.events.iter().cloned().collect();
        events.sort();

        let mut catalogs = Self {
            states,
            events,
            guard_ids: Vec::new(),
            action_ids: Vec::new(),
            guard_lookup: IndexMap::new(),
            action_lookup: IndexMap::new(),
        };

        for transition in model.transitions() {
            if let Some(guard) = &transition.guard {
                catalogs.register_guard(guard);
            }
            if let Some(action) = &transition.action {
                catalogs.register_action(action);
            }
        }

        for id in model.node_ids() {
            let node = model.node(id);
            for action in node.entry_actions.iter().chain(&node.exit_actions) {
                catalogs.register_action(action);
            }
        }

        for id in std::iter::once(ROOT).chain(catalogs.states.clone()) {
            if let Some(action) = &model.node(id).initial_action {
                catalogs.register_action(action);
            }
        }

        catalogs
    }

    fn register_guard(&mut self, raw: &str) -> GuardId {
        if let Some(&id) = self.guard_lookup.get(raw) {
            return id;
        }
        let sanitized = normalized_id(raw);
        let id = match self.guard_ids.iter().position(|g| *g == sanitized) {
            Some(pos) => GuardId(pos as u32),
            None => {
                self.guard_ids.push(sanitized);
                GuardId(self.guard_ids.len() as u32 - 1)
            }
        };
        self.guard_lookup.insert(raw.to_owned(), id);
        id
    }

    fn register_action(&mut self, raw: &str) -> ActionId {
        if let Some(&id) = self.action_lookup.get(raw) {
            return id;
        }
        let sanitized = normalized_id(raw);
        let id = match self.action_ids.iter().position(|a| *a == sanitized) {
            Some(pos) => ActionId(pos as u32),
            None => {
                self.action_ids.push(sanitized);
                ActionId(self.action_ids.len() as u32 - 1)
            }
        };
        self.action_lookup.insert(raw.to_owned(), id);
        id
    }

    /// Catalog entry for a raw guard expression seen during parsing.
    pub fn guard_id(&self, raw: &str) -> GuardId {
        self.guard_lookup[raw]
    }

    /// Catalog entry for a raw action name seen during parsing.
    pub fn action_id(&self, raw: &str) -> ActionId {
        self.action_lookup[raw]
    }

    pub fn guard_name(&self, id: GuardId) -> &str {
        &self.guard_ids[id.index()]
    }

    pub fn action_name(&self, id: ActionId) -> &str {
        &self.action_ids[id.index()]
    }

    /// Enum member name for a state.
    pub fn state_name(&self, model: &Model, id: NodeId) -> String {
        sanitize_id(&model.node(id).name)
    }
}
