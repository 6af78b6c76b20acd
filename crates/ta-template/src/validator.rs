// validator.rs — The attribute-path validator.
//
// Every template field with a dotted tail passes through here before a single
// attribute is read. Two policies:
//
// 1. Declarative-mapping mode (a non-empty WhitelistMapping is configured):
//    each hop must be allowed by the first mapping entry whose kind the
//    current object satisfies. Recursive, one segment per call.
// 2. Heuristic mode (no mapping, or an explicitly empty one): conservative
//    default that blocks private attributes and blocks materializing rich
//    values from the trusted model, while leaving values that already crossed
//    the model boundary alone. Iterative, left to right.
//
// The validator holds no mutable state; construct a new one to change policy.

use crate::error::TemplateError;
use crate::kind::{FieldValue, TemplateObject};
use crate::whitelist::{default_mapping, WhitelistMapping};

/// Validates dotted attribute paths against a whitelist policy.
#[derive(Debug, Clone)]
pub struct PathValidator {
    mapping: WhitelistMapping,
}

impl PathValidator {
    /// Create a validator using the built-in default mapping.
    pub fn new() -> Self {
        Self {
            mapping: default_mapping().clone(),
        }
    }

    /// Create a validator with an explicit mapping.
    ///
    /// An empty mapping falls through to heuristic mode — it does NOT mean
    /// "deny every dotted path". See DESIGN.md for the policy record.
    pub fn with_mapping(mapping: WhitelistMapping) -> Self {
        Self { mapping }
    }

    /// Decide whether the dotted path `qualname` may be read on `obj`.
    ///
    /// `qualname` is the full field path including the root name; `parent` is
    /// the root binding name, used only in diagnostics. A path without a dot
    /// is trivially allowed.
    pub fn validate(
        &self,
        qualname: &str,
        obj: &dyn TemplateObject,
        parent: &str,
    ) -> Result<(), TemplateError> {
        let result = if self.mapping.is_empty() {
            self.validate_heuristic(qualname, obj, parent)
        } else {
            self.validate_with_mapping(qualname, obj, parent)
        };
        if let Err(err) = &result {
            tracing::debug!("template path '{}' rejected: {}", qualname, err);
        }
        result
    }

    /// Declarative-mapping mode, one segment per call.
    fn validate_with_mapping(
        &self,
        qualname: &str,
        obj: &dyn TemplateObject,
        parent: &str,
    ) -> Result<(), TemplateError> {
        let rest = match qualname.split_once('.') {
            Some((_, rest)) if !rest.is_empty() => rest,
            _ => return Ok(()),
        };
        let next_segment = rest.split_once('.').map_or(rest, |(head, _)| head);

        for entry in self.mapping.entries() {
            if !obj.satisfies(entry.kind) {
                continue;
            }
            // The first entry whose kind the object satisfies decides this
            // hop. A later entry for the same object is never consulted,
            // even when more permissive.
            if !entry.allowed.contains(next_segment) {
                break;
            }
            if rest.contains('.') {
                let child = obj.attr(next_segment).ok_or_else(|| {
                    TemplateError::MissingAttribute {
                        kind: obj.kind().name().to_string(),
                        attribute: next_segment.to_string(),
                    }
                })?;
                return match child {
                    FieldValue::Object(child_obj) => {
                        self.validate_with_mapping(rest, child_obj, parent)
                    }
                    // Scalars satisfy no whitelist kind; the chain cannot
                    // continue through them.
                    _ => Err(TemplateError::BlockedAttribute {
                        path: rest.to_string(),
                        parent: parent.to_string(),
                    }),
                };
            }
            return Ok(());
        }

        Err(TemplateError::BlockedAttribute {
            path: qualname.to_string(),
            parent: parent.to_string(),
        })
    }

    /// Heuristic mode: private names are off limits inside the trusted model,
    /// and a hop may not materialize a rich value from it. Once the path
    /// reaches a foreign object or a scalar, the boundary is crossed and the
    /// remainder is allowed silently.
    fn validate_heuristic(
        &self,
        qualname: &str,
        obj: &dyn TemplateObject,
        parent: &str,
    ) -> Result<(), TemplateError> {
        let tail = match qualname.split_once('.') {
            Some((_, tail)) if !tail.is_empty() => tail,
            _ => return Ok(()),
        };

        let mut current = FieldValue::Object(obj);
        for segment in tail.split('.') {
            let cur_obj = match current {
                FieldValue::Object(o) if o.kind().is_internal() => o,
                // Foreign object or scalar: boundary already crossed.
                _ => return Ok(()),
            };
            if segment.starts_with('_') {
                return Err(TemplateError::PrivateAttribute {
                    path: qualname.to_string(),
                    parent: parent.to_string(),
                });
            }
            let value =
                cur_obj
                    .attr(segment)
                    .ok_or_else(|| TemplateError::MissingAttribute {
                        kind: cur_obj.kind().name().to_string(),
                        attribute: segment.to_string(),
                    })?;
            let leaves_model = match &value {
                FieldValue::Object(o) => !o.kind().is_internal(),
                scalar => !scalar.is_safe_scalar(),
            };
            if leaves_model {
                return Err(TemplateError::BlockedAttribute {
                    path: qualname.to_string(),
                    parent: parent.to_string(),
                });
            }
            current = value;
        }
        Ok(())
    }
}

impl Default for PathValidator {
    fn default() -> Self {
        Self::new()
    }
}
