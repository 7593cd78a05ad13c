//! Path template compilation.
//!
//! A template such as `/{locale}/example4?name={name}` compiles to
//! `[Placeholder("locale"), Literal("example4")]`. The query part is informational
//! only; query binding is driven by the route's declared parameters.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

/// One compiled position of a path template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Must equal the URL segment exactly.
    Literal(String),
    /// Binds the URL segment to the named parameter.
    Placeholder(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Literal(value) => write!(f, "{}", value),
            PathSegment::Placeholder(name) => write!(f, "{{{}}}", name),
        }
    }
}

/// Template errors, raised when the route table is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// `{}` has no name to bind to.
    #[error("empty placeholder name in template {template:?}")]
    EmptyPlaceholder { template: String },

    /// The same placeholder name appears twice in one template.
    #[error("placeholder {{{name}}} appears more than once in template {template:?}")]
    DuplicatePlaceholder { template: String, name: String },
}

/// Compile a path template into its ordered segments.
pub fn compile(template: &str) -> Result<Vec<PathSegment>, TemplateError> {
    let mut seen = HashSet::new();
    let mut segments = Vec::new();

    for segment in path_part(template).split('/').filter(|s| !s.is_empty()) {
        let compiled = match placeholder_name(segment) {
            Some("") => {
                return Err(TemplateError::EmptyPlaceholder {
                    template: template.to_owned(),
                })
            }
            Some(name) => {
                if !seen.insert(name) {
                    return Err(TemplateError::DuplicatePlaceholder {
                        template: template.to_owned(),
                        name: name.to_owned(),
                    });
                }
                PathSegment::Placeholder(name.to_owned())
            }
            None => PathSegment::Literal(segment.to_owned()),
        };
        segments.push(compiled);
    }

    Ok(segments)
}

/// Keys named in the template's query part, e.g. `["name", "surname"]` for
/// `/x?name={name}&surname=`.
pub fn query_keys(template: &str) -> Vec<&str> {
    template
        .split_once('?')
        .map(|(_, query)| {
            query
                .split('&')
                .filter_map(|pair| {
                    let key = pair.split('=').next().unwrap_or_default();
                    (!key.is_empty()).then_some(key)
                })
                .collect()
        })
        .unwrap_or_default()
}

fn path_part(template: &str) -> &str {
    template.split_once('?').map_or(template, |(path, _)| path)
}

fn placeholder_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}
