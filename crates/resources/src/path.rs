//! Resource path templates.
//!
//! A template is a path with `{{value.<key>}}` and `{{args.<key>}}`
//! placeholders. `value` reads from the parent record, `args` from the field
//! arguments; dotted keys walk nested objects. Rendering fails softly: if any
//! placeholder is missing, null, empty or a dot segment (`.`, `..`) the
//! template yields no path and the caller resolves the field to null instead
//! of issuing a request that would address a different resource.

use std::fmt;

use {serde_json::Value, spindle_schema::ResolveContext};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Value,
    Args,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder { source: Source, keys: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    template: String,
    segments: Vec<Segment>,
}

impl ResourcePath {
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or_else(|| Error::template(template, "unclosed placeholder"))?;
            segments.push(parse_placeholder(template, after[..end].trim())?);
            rest = &after[end + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    /// Substitute placeholders from the resolver context. Values are
    /// percent-encoded; only strings, numbers and booleans can be substituted,
    /// and never as an empty or dot segment.
    #[must_use]
    pub fn render(&self, ctx: ResolveContext<'_>) -> Option<String> {
        let mut out = String::with_capacity(self.template.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { source, keys } => {
                    let value = match source {
                        Source::Value => lookup(ctx.parent, keys)?,
                        Source::Args => {
                            let (first, tail) = keys.split_first()?;
                            lookup(ctx.args.get(first)?, tail)?
                        },
                    };
                    let text = scalar_text(value)?;
                    if matches!(text.as_str(), "" | "." | "..") {
                        return None;
                    }
                    out.push_str(&urlencoding::encode(&text));
                },
            }
        }
        Some(out)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

fn parse_placeholder(template: &str, expr: &str) -> Result<Segment> {
    let mut parts = expr.split('.');
    let source = match parts.next() {
        Some("value") => Source::Value,
        Some("args") => Source::Args,
        _ => {
            return Err(Error::template(
                template,
                format!("placeholder `{expr}` must start with `value.` or `args.`"),
            ));
        },
    };
    let keys: Vec<String> = parts.map(str::to_string).collect();
    if keys.is_empty() || keys.iter().any(String::is_empty) {
        return Err(Error::template(
            template,
            format!("placeholder `{expr}` names no key"),
        ));
    }
    Ok(Segment::Placeholder { source, keys })
}

fn lookup<'a>(mut value: &'a Value, keys: &[String]) -> Option<&'a Value> {
    for key in keys {
        value = value.get(key)?;
    }
    Some(value)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
