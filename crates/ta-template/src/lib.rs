//! # ta-template
//!
//! Policy-guarded template formatting for Trusted Autonomy notifications.
//!
//! Notification sinks (Discord, Slack, email) let operators configure message
//! templates such as `"Goal {goal.title} finished ({goal.agent.name})"`.
//! Templates are operator-controlled text referencing rich, deeply-linked
//! domain objects, so interpolation must not become a disclosure channel for
//! tokens, credentials, or unrelated subsystems reachable through object
//! references. The [`TemplateFormatter`] renders templates while the
//! [`PathValidator`] gates every dotted attribute path against a
//! [`WhitelistMapping`] before a single attribute is read.
//!
//! ## Key invariants
//!
//! - **Whitelist gated**: dotted paths are validated hop by hop; the first
//!   mapping entry whose kind the object satisfies decides, in mapping order.
//! - **Safe by default**: with no mapping configured, a conservative
//!   heuristic blocks private attributes and rich-value disclosure while not
//!   gating values that already left the trusted object model.
//! - **No partial leaks**: a blocked field fails (or, with suppression on,
//!   stays as literal `{...}` text) before any of its output is written.
//! - **Named bindings only**: positional arguments and non-string conversions
//!   are always fatal.

pub mod error;
pub mod formatter;
pub mod kind;
pub mod validator;
pub mod whitelist;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::TemplateError;
pub use formatter::{Bindings, TemplateFormatter};
pub use kind::{FieldValue, KindTag, TemplateObject};
pub use validator::PathValidator;
pub use whitelist::{default_mapping, WhitelistEntry, WhitelistMapping};
