//! Line-oriented parser for the PlantUML state-diagram subset.
//!
//! Recognized shapes (whitespace elastic):
//!
//! ```text
//! state NAME {              open a composite scope
//! state NAME                declare a state
//! }                         close the current scope
//! [*] --> TGT [: ... /ACT]  initial designation of the current scope
//! NAME : entry /ACT         append an entry action
//! NAME : exit /ACT          append an exit action
//! SRC --> DST : EV [G] /ACT external transition; DST = [*] is final
//! NAME : EV [G] /ACT        internal self-transition
//! ```
//!
//! Blank lines, `'` comments, and `@` directives are skipped. Everything else
//! must match a shape; parsing is fail-fast with 1-based line numbers.
//!
//! The reserved event names `entry` and `exit` never form internal
//! transitions: a malformed entry/exit line that still fits the internal
//! shape is dropped, matching the lenient handling of labels on `[*]` lines.

pub mod lexer;


use hsmgen_core::{Model, NodeId, ROOT, Transition};

use crate::{Error, Result};
use lexer::{Tok, guard_text, lex_line};

/// The optional `EVENT [GUARD] /ACTION` tail of a transition line.
#[derive(Debug, Default, Clone, Copy)]
struct Label<'a> {
    event: Option<&'a str>,
    guard: Option<&'a str>,
    action: Option<&'a str>,
}

/// Parse chart text into a model.
pub fn parse(source: &str) -> Result<Model> {
    let mut model = Model::new();
    let mut scopes: Vec<NodeId> = vec![ROOT];
    let mut last_line = 0;

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('\'') || line.starts_with('@') {
            continue;
        }
        let tokens = lex_line(line).ok_or_else(|| unrecognized(line_no, line))?;
        parse_line(&mut model, &mut scopes, line_no, line, &tokens)?;
    }

    if scopes.len() > 1 {
        return Err(Error::UnclosedScope {
            depth: scopes.len() - 1,
            line: last_line,
        });
    }
    Ok(model)
}

fn unrecognized(line: usize, text: &str) -> Error {
    Error::UnrecognizedLine {
        line,
        text: text.to_owned(),
    }
}

fn parse_line(
    model: &mut Model,
    scopes: &mut Vec<NodeId>,
    line_no: usize,
    line: &str,
    tokens: &[(Tok, &str)],
) -> Result<()> {
    let scope = *scopes.last().expect("scope stack never empty");

    match tokens {
        [(Tok::Ident, "state"), (Tok::Ident, name)] => {
            declare(model, name, scope, line_no)?;
        }

        [(Tok::Ident, "state"), (Tok::Ident, name), (Tok::BraceOpen, _)] => {
            let id = declare(model, name, scope, line_no)?;
            scopes.push(id);
        }

        [(Tok::BraceClose, _)] => {
            if scopes.len() == 1 {
                return Err(Error::UnbalancedClose { line: line_no });
            }
            scopes.pop();
        }

        // `[*] --> TGT` optionally followed by `: EVENT [GUARD] /ACTION`.
        // Event and guard are tolerated on initial lines but carry no meaning.
        [(Tok::Star, _), (Tok::Arrow, _), (Tok::Ident, target), rest @ ..] => {
            let label = match rest {
                [] => Label::default(),
                [(Tok::Colon, _), tail @ ..] => {
                    parse_label(tail).ok_or_else(|| unrecognized(line_no, line))?
                }
                _ => return Err(unrecognized(line_no, line)),
            };
            let target = model.ensure_ref(target, scope);
            let scope_node = model.node_mut(scope);
            scope_node.initial_target = Some(target);
            if let Some(action) = label.action {
                scope_node.initial_action = Some(action.to_owned());
            }
        }

        // External transition to a state or to the final pseudo-state.
        [(Tok::Ident, src), (Tok::Arrow, _), (Tok::Ident, dst), (Tok::Colon, _), tail @ ..] => {
            let label = parse_label(tail).ok_or_else(|| unrecognized(line_no, line))?;
            let src = model.ensure_ref(src, scope);
            let dst = model.ensure_ref(dst, scope);
            push_transition(model, src, Some(dst), label, false);
        }

        [(Tok::Ident, src), (Tok::Arrow, _), (Tok::Star, _), (Tok::Colon, _), tail @ ..] => {
            let label = parse_label(tail).ok_or_else(|| unrecognized(line_no, line))?;
            let src = model.ensure_ref(src, scope);
            push_transition(model, src, None, label, false);
        }

        // Entry/exit action declaration, or an internal self-transition.
        [(Tok::Ident, name), (Tok::Colon, _), tail @ ..] => {
            match tail {
                [(Tok::Ident, "entry" | "exit")] => {
                    // Declared without an action; nothing to record.
                    model.ensure_ref(name, scope);
                }
                [(Tok::Ident, kind @ ("entry" | "exit")), (Tok::Slash, _), (Tok::Ident, action)] => {
                    let id = model.ensure_ref(name, scope);
                    let node = model.node_mut(id);
                    if *kind == "entry" {
                        node.entry_actions.push((*action).to_owned());
                    } else {
                        node.exit_actions.push((*action).to_owned());
                    }
                }
                _ => {
                    let label = parse_label(tail).ok_or_else(|| unrecognized(line_no, line))?;
                    if matches!(label.event, Some("entry" | "exit")) {
                        return Ok(());
                    }
                    let id = model.ensure_ref(name, scope);
                    push_transition(model, id, Some(id), label, true);
                }
            }
        }

        _ => return Err(unrecognized(line_no, line)),
    }

    Ok(())
}

fn declare(model: &mut Model, name: &str, scope: NodeId, line_no: usize) -> Result<NodeId> {
    model
        .declare(name, scope)
        .map_err(|conflict| Error::ConflictingDeclaration {
            line: line_no,
            name: conflict.name,
            parent: conflict.existing_parent,
        })
}

fn push_transition(model: &mut Model, src: NodeId, dst: Option<NodeId>, label: Label, internal: bool) {
    model.push_transition(Transition {
        src,
        dst,
        event: label.event.map(str::to_owned),
        guard: label.guard.map(str::to_owned),
        action: label.action.map(str::to_owned),
        internal,
    });
}

/// Matches `EVENT? [GUARD]? (/ ACTION?)?` and nothing else.
fn parse_label<'a>(tokens: &[(Tok, &'a str)]) -> Option<Label<'a>> {
    let mut label = Label::default();
    let mut rest = tokens;

    if let [(Tok::Ident, event), tail @ ..] = rest {
        label.event = Some(*event);
        rest = tail;
    }
    if let [(Tok::Guard, slice), tail @ ..] = rest {
        label.guard = Some(guard_text(slice));
        rest = tail;
    }
    if let [(Tok::Slash, _), tail @ ..] = rest {
        rest = tail;
        if let [(Tok::Ident, action), tail @ ..] = rest {
            label.action = Some(*action);
            rest = tail;
        }
    }

    rest.is_empty().then_some(label)
}
