// formatter.rs — Template tokenizing, field resolution, and rendering.
//
// The formatter is a thin constraint wrapper around standard replacement-field
// mechanics: it scans `{name.attr!conversion:spec}` fields, rejects positional
// arguments and non-string conversions, and hands every dotted path to the
// PathValidator BEFORE any attribute is read. Only after approval does it
// perform the real attribute chase and stringify the result.
//
// A blocked field never leaks partial output: errors surface before the field
// writes anything, and the output string is only returned on full success.

use std::collections::HashMap;

use crate::error::TemplateError;
use crate::kind::{FieldValue, TemplateObject};
use crate::validator::PathValidator;
use crate::whitelist::WhitelistMapping;

/// Named objects available to a template.
///
/// The positional list exists only to be rejected: this formatter supports
/// named bindings exclusively, and any positional argument fails the whole
/// render before the template is even scanned.
#[derive(Default)]
pub struct Bindings<'a> {
    named: HashMap<String, &'a dyn TemplateObject>,
    positional: Vec<&'a dyn TemplateObject>,
}

impl<'a> Bindings<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an object under a top-level name. Builder-style.
    pub fn bind(mut self, name: &str, obj: &'a dyn TemplateObject) -> Self {
        self.named.insert(name.to_string(), obj);
        self
    }

    /// Append a positional argument (always rejected by `render`).
    pub fn bind_positional(mut self, obj: &'a dyn TemplateObject) -> Self {
        self.positional.push(obj);
        self
    }

    fn get(&self, name: &str) -> Option<&'a dyn TemplateObject> {
        self.named.get(name).copied()
    }

    fn has_positional(&self) -> bool {
        !self.positional.is_empty()
    }
}

/// Renders templates against named domain objects under a whitelist policy.
///
/// Immutable after construction; a different policy means a new formatter.
/// Rendering takes `&self` and keeps no state between calls.
pub struct TemplateFormatter {
    validator: PathValidator,
    suppress_blocked: bool,
}

impl TemplateFormatter {
    /// Create a formatter using the built-in default mapping, strict mode.
    pub fn new() -> Self {
        Self {
            validator: PathValidator::new(),
            suppress_blocked: false,
        }
    }

    /// Create a formatter with an explicit whitelist mapping.
    pub fn with_mapping(mapping: WhitelistMapping) -> Self {
        Self {
            validator: PathValidator::with_mapping(mapping),
            suppress_blocked: false,
        }
    }

    /// Toggle suppression: blocked fields degrade to their literal `{...}`
    /// text instead of failing the render. Off by default.
    pub fn suppress_blocked(mut self, suppress: bool) -> Self {
        self.suppress_blocked = suppress;
        self
    }

    /// Render `template` against the given bindings.
    pub fn render(
        &self,
        template: &str,
        bindings: &Bindings<'_>,
    ) -> Result<String, TemplateError> {
        if bindings.has_positional() {
            return Err(TemplateError::PositionalArgs);
        }

        let mut out = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    if chars.peek() == Some(&'{') {
                        chars.next();
                        out.push('{');
                        continue;
                    }
                    let mut field = String::new();
                    let mut closed = false;
                    for fc in chars.by_ref() {
                        match fc {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(TemplateError::Syntax {
                                    message: "nested '{' in replacement field".to_string(),
                                })
                            }
                            _ => field.push(fc),
                        }
                    }
                    if !closed {
                        return Err(TemplateError::Syntax {
                            message: "unterminated replacement field".to_string(),
                        });
                    }
                    out.push_str(&self.resolve_field(&field, bindings)?);
                }
                '}' => {
                    if chars.peek() == Some(&'}') {
                        chars.next();
                        out.push('}');
                    } else {
                        return Err(TemplateError::Syntax {
                            message: "single '}' encountered in template".to_string(),
                        });
                    }
                }
                _ => out.push(c),
            }
        }
        Ok(out)
    }

    /// Resolve one replacement field to its rendered text.
    fn resolve_field(
        &self,
        field: &str,
        bindings: &Bindings<'_>,
    ) -> Result<String, TemplateError> {
        // Format spec first, then conversion, mirroring `{name!conv:spec}`.
        let (name_conv, spec) = match field.split_once(':') {
            Some((head, spec)) => (head, spec),
            None => (field, ""),
        };
        let (name, conversion) = match name_conv.split_once('!') {
            Some((head, conv)) => (head, Some(conv)),
            None => (name_conv, None),
        };
        if let Some(conv) = conversion {
            // Everything is coerced to text; only the string conversion exists.
            if conv != "s" {
                return Err(TemplateError::UnsupportedConversion {
                    conversion: conv.to_string(),
                });
            }
        }

        let (root, tail) = match name.split_once('.') {
            Some((root, tail)) => (root, tail),
            None => (name, ""),
        };
        if root.is_empty() || root.chars().all(|c| c.is_ascii_digit()) {
            // `{}` or `{0}`: a positional field.
            return Err(TemplateError::PositionalArgs);
        }
        let obj = bindings
            .get(root)
            .ok_or_else(|| TemplateError::MissingBinding {
                name: root.to_string(),
            })?;

        if !tail.trim().is_empty() {
            if let Err(err) = self.validator.validate(name, obj, root) {
                if self.suppress_blocked && err.is_blocked() {
                    // Degrade to the literal unresolved field text; the field
                    // is inert, so no conversion or spec applies.
                    tracing::warn!("suppressed blocked template field '{}': {}", name, err);
                    return Ok(format!("{{{}}}", name));
                }
                return Err(err);
            }
        }

        let text = resolve_path(obj, tail)?;
        apply_format_spec(&text, spec)
    }
}

impl Default for TemplateFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Perform the real attribute chase after validation approved the path.
fn resolve_path(obj: &dyn TemplateObject, tail: &str) -> Result<String, TemplateError> {
    if tail.trim().is_empty() {
        return Ok(obj.display());
    }
    let mut current = FieldValue::Object(obj);
    for segment in tail.split('.') {
        let cur_obj = match current {
            FieldValue::Object(o) => o,
            scalar => {
                return Err(TemplateError::MissingAttribute {
                    kind: scalar.kind_name().to_string(),
                    attribute: segment.to_string(),
                })
            }
        };
        current = cur_obj
            .attr(segment)
            .ok_or_else(|| TemplateError::MissingAttribute {
                kind: cur_obj.kind().name().to_string(),
                attribute: segment.to_string(),
            })?;
    }
    Ok(current.to_string())
}

/// Upper bound on width and precision in a format spec. Template text is
/// author-controlled, so an unbounded width would let a template request an
/// arbitrarily large pad allocation.
const MAX_SPEC_SIZE: usize = 4096;

/// Apply a `[[fill]align][width][.precision]` spec to already-stringified
/// text. The mini-language itself is not otherwise validated; anything beyond
/// this subset is a syntax error.
fn apply_format_spec(text: &str, spec: &str) -> Result<String, TemplateError> {
    if spec.is_empty() {
        return Ok(text.to_string());
    }

    let chars: Vec<char> = spec.chars().collect();
    let mut fill = ' ';
    let mut align = '<';
    let mut i = 0;
    if chars.len() >= 2 && matches!(chars[1], '<' | '>' | '^') {
        fill = chars[0];
        align = chars[1];
        i = 2;
    } else if matches!(chars[0], '<' | '>' | '^') {
        align = chars[0];
        i = 1;
    }

    let mut width = 0usize;
    while let Some(d) = chars.get(i).and_then(|c| c.to_digit(10)) {
        width = width
            .checked_mul(10)
            .and_then(|w| w.checked_add(d as usize))
            .filter(|w| *w <= MAX_SPEC_SIZE)
            .ok_or_else(|| TemplateError::Syntax {
                message: format!("width in format spec '{}' is too large", spec),
            })?;
        i += 1;
    }

    let mut precision = None;
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        let mut digits = 0usize;
        let mut seen = false;
        while let Some(d) = chars.get(i).and_then(|c| c.to_digit(10)) {
            digits = digits
                .checked_mul(10)
                .and_then(|p| p.checked_add(d as usize))
                .filter(|p| *p <= MAX_SPEC_SIZE)
                .ok_or_else(|| TemplateError::Syntax {
                    message: format!("precision in format spec '{}' is too large", spec),
                })?;
            i += 1;
            seen = true;
        }
        if !seen {
            return Err(TemplateError::Syntax {
                message: format!("format spec '{}' is missing precision digits", spec),
            });
        }
        precision = Some(digits);
    }

    if i != chars.len() {
        return Err(TemplateError::Syntax {
            message: format!("unsupported format spec '{}'", spec),
        });
    }

    let mut result: String = match precision {
        Some(p) => text.chars().take(p).collect(),
        None => text.to_string(),
    };
    let len = result.chars().count();
    if len < width {
        let pad = width - len;
        let fill_str = fill.to_string();
        match align {
            '<' => result.push_str(&fill_str.repeat(pad)),
            '>' => result = format!("{}{}", fill_str.repeat(pad), result),
            _ => {
                let left = pad / 2;
                result = format!(
                    "{}{}{}",
                    fill_str.repeat(left),
                    result,
                    fill_str.repeat(pad - left)
                );
            }
        }
    }
    Ok(result)
}
