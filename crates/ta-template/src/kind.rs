// kind.rs — Kind tags and the reflection surface for template objects.
//
// The formatter never performs language-level reflection. Each domain object
// that can be bound into a template implements TemplateObject, which names
// the object's kind and exposes its template-visible attributes through an
// explicit accessor table. Unknown attribute names are a uniform "not found"
// lookup result, never a reflection error.
//
// Internality is an explicit property of the kind registration, not something
// inferred from where a type happens to be defined: the whitelist heuristic
// treats the seven TA model kinds as the trusted subsystem and everything
// tagged Foreign as already outside the boundary.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Identifies the kind of a domain object bound into a template.
///
/// This is a closed capability tag: the whitelist matches on it instead of
/// runtime type introspection. The seven named variants are the trusted TA
/// object model; [`KindTag::Foreign`] covers values from anywhere else, with
/// a short label used only in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KindTag {
    GoalRun,
    Agent,
    Changeset,
    Session,
    Channel,
    Message,
    User,
    /// A value from outside the TA object model.
    Foreign(&'static str),
}

impl KindTag {
    /// Whether this kind belongs to the trusted TA object model.
    ///
    /// Set once at kind registration; the heuristic validator stops gating a
    /// path as soon as it crosses onto a non-internal value.
    pub fn is_internal(self) -> bool {
        !matches!(self, KindTag::Foreign(_))
    }

    /// Short name used in diagnostics and error messages.
    pub fn name(self) -> &'static str {
        match self {
            KindTag::GoalRun => "goal_run",
            KindTag::Agent => "agent",
            KindTag::Changeset => "changeset",
            KindTag::Session => "session",
            KindTag::Channel => "channel",
            KindTag::Message => "message",
            KindTag::User => "user",
            KindTag::Foreign(label) => label,
        }
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The result of fetching one attribute from a template object.
///
/// Scalar variants are terminal values; `Object` continues the dotted chain.
/// The heuristic validator treats Int/Float/Bool/Text/Set/Id as intrinsically
/// safe scalars. Timestamps are deliberately not on that list: with no
/// whitelist configured they only render when a mapping entry (such as the
/// built-in default) explicitly allows the attribute.
pub enum FieldValue<'a> {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Set(BTreeSet<String>),
    Id(Uuid),
    Timestamp(DateTime<Utc>),
    Object(&'a dyn TemplateObject),
}

impl FieldValue<'_> {
    /// Whether this value is one of the intrinsically safe scalar kinds.
    pub fn is_safe_scalar(&self) -> bool {
        matches!(
            self,
            FieldValue::Int(_)
                | FieldValue::Float(_)
                | FieldValue::Bool(_)
                | FieldValue::Text(_)
                | FieldValue::Set(_)
                | FieldValue::Id(_)
        )
    }

    /// Short kind name used in diagnostics and error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Bool(_) => "bool",
            FieldValue::Text(_) => "text",
            FieldValue::Set(_) => "set",
            FieldValue::Id(_) => "id",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Object(obj) => obj.kind().name(),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Set(v) => {
                let joined: Vec<&str> = v.iter().map(String::as_str).collect();
                write!(f, "{{{}}}", joined.join(", "))
            }
            FieldValue::Id(v) => write!(f, "{}", v),
            FieldValue::Timestamp(v) => f.write_str(&v.to_rfc3339()),
            FieldValue::Object(obj) => f.write_str(&obj.display()),
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldValue::{}({})", self.kind_name(), self)
    }
}

/// A domain object that can be interpolated into a notification template.
///
/// Implementations are thin views over domain types (goal runs, agents,
/// channel messages, ...). The accessor table in [`TemplateObject::attr`] is
/// the complete set of template-visible attributes; anything it does not name
/// simply does not exist as far as templates are concerned.
pub trait TemplateObject {
    /// The primary kind of this object.
    fn kind(&self) -> KindTag;

    /// Whether this object qualifies as the given kind.
    ///
    /// Defaults to tag equality. Wrapper objects that present more than one
    /// kind (a member that is also a user, say) override this; the whitelist
    /// still consults entries strictly in mapping order.
    fn satisfies(&self, tag: KindTag) -> bool {
        tag == self.kind()
    }

    /// Look up a template-visible attribute by name.
    fn attr(&self, name: &str) -> Option<FieldValue<'_>>;

    /// How this object renders when interpolated directly.
    fn display(&self) -> String;
}
