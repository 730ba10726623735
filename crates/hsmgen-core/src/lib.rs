//! Core data structures for the hsmgen state-machine compiler.
//!
//! Two layers:
//! - `model` - the hierarchical state chart: node arena, transition list, tree queries
//! - `catalog` - deterministic identifier catalogs derived from a frozen model
//!
//! Plus `utils` for identifier case conversion. This crate performs no I/O.

pub mod catalog;
pub mod model;
pub mod utils;


pub use catalog::{ActionId, Catalogs, GuardId};
pub use model::{DeclConflict, Model, Node, NodeId, ROOT, Transition, TransitionId};

/// Name of the state a machine occupies before `start`.
pub const PSEUDO_INITIAL: &str = "InitialPseudoState";

/// Name of the state a machine occupies after a final transition.
pub const PSEUDO_FINAL: &str = "FinalPseudoState";
