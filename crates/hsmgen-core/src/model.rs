//! The hierarchical in-memory state chart.
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to each other by `NodeId`,
//! so the tree carries no back-reference cycles. A name index maps each state
//! name to its node in first-mention order. The implicit root is `NodeId(0)`;
//! it is never listed in catalogs and never observable from generated code.
//!
//! States may be referenced before they are declared. The first mention
//! creates an undeclared stub under the current scope; a later declaration
//! reparents the stub under the declaring scope. A state that is never
//! declared stays where it was first mentioned, as a leaf.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// Handle to a node in the model arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a transition, in declaration order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct TransitionId(u32);

impl TransitionId {
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The implicit root sentinel. Every declared state is a descendant.
pub const ROOT: NodeId = NodeId(0);

const ROOT_NAME: &str = "__root__";

/// A single state. Composite when it has children, leaf otherwise.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub name: String,
    /// `None` only for the root sentinel.
    pub parent: Option<NodeId>,
    /// Children in declaration order.
    pub children: IndexMap<String, NodeId>,
    /// Whether a `state NAME` declaration was seen (as opposed to a stub).
    pub declared: bool,
    /// Target of this composite's `[*] --> TGT` line.
    pub initial_target: Option<NodeId>,
    /// Action attached to this composite's initial transition.
    pub initial_action: Option<String>,
    pub entry_actions: Vec<String>,
    pub exit_actions: Vec<String>,
}

impl Node {
    fn new(name: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_owned(),
            parent,
            children: IndexMap::new(),
            declared: false,
            initial_target: None,
            initial_action: None,
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
        }
    }

    pub fn is_composite(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A declared transition. `dst = None` is the final pseudo-state target.
#[derive(Debug, Clone, Serialize)]
pub struct Transition {
    pub src: NodeId,
    pub dst: Option<NodeId>,
    pub event: Option<String>,
    pub guard: Option<String>,
    pub action: Option<String>,
    pub internal: bool,
}

/// A conflicting re-declaration: the state already has a declared parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclConflict {
    pub name: String,
    pub existing_parent: String,
}

/// The mutable chart model built by the parser and frozen before planning.
#[derive(Debug, Clone, Serialize)]
pub struct Model {
    nodes: Vec<Node>,
    /// Name -> node, in first-mention order.
    index: IndexMap<String, NodeId>,
    transitions: Vec<Transition>,
    /// Event names in first-mention order (catalogs sort them later).
    pub events: IndexSet<String>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        let mut root = Node::new(ROOT_NAME, None);
        root.declared = true;
        let mut index = IndexMap::new();
        index.insert(ROOT_NAME.to_owned(), ROOT);
        Self {
            nodes: vec![root],
            index,
            transitions: Vec::new(),
            events: IndexSet::new(),
        }
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// All nodes except the root, in first-mention order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.values().copied().filter(|&id| id != ROOT)
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn transition(&self, id: TransitionId) -> &Transition {
        &self.transitions[id.index()]
    }

    pub fn push_transition(&mut self, transition: Transition) -> TransitionId {
        if let Some(event) = &transition.event {
            self.events.insert(event.clone());
        }
        let id = TransitionId(self.transitions.len() as u32);
        self.transitions.push(transition);
        id
    }

    /// Looks up `name`, creating an undeclared stub under `scope` when absent.
    pub fn ensure_ref(&mut self, name: &str, scope: NodeId) -> NodeId {
        if let Some(id) = self.lookup(name) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(name, Some(scope)));
        self.index.insert(name.to_owned(), id);
        self.node_mut(scope).children.insert(name.to_owned(), id);
        id
    }

    /// Declares `name` under `scope`.
    ///
    /// A pre-existing stub is reparented under `scope` and marked declared.
    /// Re-opening an already-declared state under the same parent is allowed;
    /// declaring it under a different parent is a conflict.
    pub fn declare(&mut self, name: &str, scope: NodeId) -> Result<NodeId, DeclConflict> {
        let Some(id) = self.lookup(name) else {
            let id = self.ensure_ref(name, scope);
            self.node_mut(id).declared = true;
            return Ok(id);
        };
        let node = self.node(id);
        if node.parent == Some(scope) {
            self.node_mut(id).declared = true;
            return Ok(id);
        }
        if node.declared {
            let existing_parent = node
                .parent
                .map(|p| self.node(p).name.clone())
                .unwrap_or_else(|| ROOT_NAME.to_owned());
            return Err(DeclConflict {
                name: name.to_owned(),
                existing_parent,
            });
        }
        self.reparent(id, scope);
        self.node_mut(id).declared = true;
        Ok(id)
    }

    fn reparent(&mut self, id: NodeId, new_parent: NodeId) {
        let name = self.node(id).name.clone();
        if let Some(old_parent) = self.node(id).parent {
            self.node_mut(old_parent).children.shift_remove(&name);
        }
        self.node_mut(new_parent).children.insert(name, id);
        self.node_mut(id).parent = Some(new_parent);
    }

    /// Ancestor chain from `id` upward, excluding the root. `id` is included.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(n) = current {
            if n == ROOT {
                break;
            }
            chain.push(n);
            current = self.node(n).parent;
        }
        chain
    }

    /// Nesting depth: 0 for a child of the root.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).len().saturating_sub(1)
    }

    /// Whether `anc` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, anc: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(n) = current {
            if n == anc {
                return true;
            }
            if n == ROOT {
                return false;
            }
            current = self.node(n).parent;
        }
        false
    }

    /// Whether `anc` is a proper ancestor of `id`.
    pub fn is_strict_ancestor(&self, anc: NodeId, id: NodeId) -> bool {
        anc != id && self.is_ancestor_or_self(anc, id)
    }

    /// Least common ancestor of `a` and `b`; `None` when only the root is common.
    pub fn lca(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let chain = self.ancestors(a);
        self.ancestors(b).into_iter().find(|n| chain.contains(n))
    }

    pub fn is_composite(&self, id: NodeId) -> bool {
        self.node(id).is_composite()
    }

    /// Default leaf reached by descending a composite's initial designations.
    ///
    /// Follows `initial_target` when it is a strict descendant of the current
    /// node (PlantUML permits `[*] --> grandchild`); otherwise falls back to
    /// the first child by declaration order. Monotonic depth progress, so this
    /// terminates on any tree.
    pub fn initial_leaf(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while self.is_composite(current) {
            let node = self.node(current);
            current = match node.initial_target {
                Some(target) if self.is_strict_ancestor(current, target) => target,
                _ => *node.children.first().expect("composite has children").1,
            };
        }
        current
    }

    /// Path from the node strictly below `anchor` down to `leaf`, outermost
    /// first. With `anchor = ROOT` this is the full chain from a top-level
    /// state down to `leaf`.
    pub fn path_below(&self, anchor: NodeId, leaf: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(leaf);
        while let Some(n) = current {
            if n == anchor || n == ROOT {
                break;
            }
            path.push(n);
            current = self.node(n).parent;
        }
        path.reverse();
        path
    }

    /// All states in pre-order (parents before children, declaration order
    /// among siblings), excluding the root.
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        self.walk(ROOT, &mut order);
        order
    }

    fn walk(&self, id: NodeId, order: &mut Vec<NodeId>) {
        for &child in self.node(id).children.values() {
            order.push(child);
            self.walk(child, order);
        }
    }

    /// States referenced but never declared (auto-vivified leaves).
    pub fn undeclared(&self) -> Vec<NodeId> {
        self.node_ids()
            .filter(|&id| !self.node(id).declared)
            .collect()
    }
}
