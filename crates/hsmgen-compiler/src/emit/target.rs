//! Target languages and their spelling rules.
//!
//! `Target` doubles as the per-language spelling table: a small capability
//! set of string-building operations (literals, callback invocations, guard
//! conditions, state assignment, block shape) that the context builder
//! pattern-matches once per target. Renderers own the file skeleton;
//! everything inside a dispatch block goes through these methods.

use crate::Error;

/// A language the emitter can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Cpp,
    Rust,
    Python,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Cpp, Target::Python, Target::Rust];

    pub fn name(self) -> &'static str {
        match self {
            Target::Cpp => "cpp",
            Target::Rust => "rust",
            Target::Python => "python",
        }
    }

    pub fn from_name(name: &str) -> Result<Target, Error> {
        match name {
            "cpp" | "c++" => Ok(Target::Cpp),
            "rust" | "rs" => Ok(Target::Rust),
            "python" | "py" => Ok(Target::Python),
            _ => Err(Error::UnsupportedLanguage {
                requested: name.to_owned(),
                available: Target::ALL
                    .iter()
                    .map(|t| t.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            Target::Cpp => "hpp",
            Target::Rust => "rs",
            Target::Python => "py",
        }
    }

    /// Member name emitted into an otherwise empty enumeration.
    pub(crate) fn placeholder_member(self) -> &'static str {
        match self {
            // Python mangles leading-double-underscore class attributes.
            Target::Python => "None_",
            Target::Cpp | Target::Rust => "__None",
        }
    }

    pub(crate) fn indent_unit(self) -> &'static str {
        match self {
            Target::Cpp => "  ",
            Target::Rust | Target::Python => "    ",
        }
    }

    /// Indentation depth of a rule opener inside its dispatch block.
    pub(crate) fn rule_depth(self) -> usize {
        match self {
            Target::Cpp => 6,
            Target::Rust => 5,
            Target::Python => 4,
        }
    }

    /// `Type::member` or `Type.member`.
    pub(crate) fn member(self, type_name: &str, member: &str) -> String {
        match self {
            Target::Cpp | Target::Rust => format!("{type_name}::{member}"),
            Target::Python => format!("{type_name}.{member}"),
        }
    }

    /// Receiver expression for the callbacks object.
    pub(crate) fn callbacks_recv(self) -> &'static str {
        match self {
            Target::Cpp => "impl_",
            Target::Rust => "self.callbacks",
            Target::Python => "self._hooks",
        }
    }

    /// Expression holding the current state.
    pub(crate) fn state_var(self) -> &'static str {
        match self {
            Target::Cpp => "s_",
            Target::Rust => "self.state",
            Target::Python => "self._state",
        }
    }

    /// Name of the event parameter inside `dispatch`.
    pub(crate) fn event_var(self) -> &'static str {
        match self {
            Target::Cpp | Target::Python => "e",
            Target::Rust => "event",
        }
    }

    /// Callback invocation as a statement.
    pub(crate) fn call(self, method: &str, args: &[&str]) -> String {
        let expr = format!("{}.{}({})", self.callbacks_recv(), method, args.join(", "));
        self.stmt(&expr)
    }

    pub(crate) fn stmt(self, expr: &str) -> String {
        match self {
            Target::Cpp | Target::Rust => format!("{expr};"),
            Target::Python => expr.to_owned(),
        }
    }

    pub(crate) fn assign(self, lhs: &str, rhs: &str) -> String {
        self.stmt(&format!("{lhs} = {rhs}"))
    }

    pub(crate) fn bool_lit(self, value: bool) -> &'static str {
        match (self, value) {
            (Target::Python, true) => "True",
            (Target::Python, false) => "False",
            (_, true) => "true",
            (_, false) => "false",
        }
    }

    pub(crate) fn return_stmt(self) -> &'static str {
        match self {
            Target::Cpp | Target::Rust => "return;",
            Target::Python => "return",
        }
    }

    /// Opening line of a guarded rule block.
    pub(crate) fn guard_open(self, condition: &str) -> String {
        match self {
            Target::Cpp => format!("if ({condition}) {{"),
            Target::Rust => format!("if {condition} {{"),
            Target::Python => format!("if {condition}:"),
        }
    }

    /// Opening line of an unguarded rule block, when the target needs one.
    pub(crate) fn unguarded_open(self) -> Option<&'static str> {
        match self {
            Target::Cpp => Some("{"),
            Target::Rust | Target::Python => None,
        }
    }

    pub(crate) fn block_close(self) -> Option<&'static str> {
        match self {
            Target::Cpp | Target::Rust => Some("}"),
            Target::Python => None,
        }
    }
}
