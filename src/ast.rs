/// Abstract syntax tree for parsed templates
use crate::span::Spanned;
use crate::value::Value;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub nodes: Vec<Spanned<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, emitted verbatim
    Text(String),
    /// `{path}` - a scope lookup interpolated into the output
    Interpolation(VariablePath),
    /// `<r:name ...>...</r:name>` - a helper invocation
    Helper(HelperNode),
}

/// A dotted lookup path: `zebra`, `user.name`, `rows.0`
#[derive(Debug, Clone, PartialEq)]
pub struct VariablePath {
    pub segments: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct HelperNode {
    pub name: String,
    /// Process-unique identity of this invocation site; the render pass
    /// keys per-node helper instances on it
    pub id: usize,
    /// Written attributes in source order
    pub arguments: Vec<(String, Spanned<ArgumentValue>)>,
    pub children: Vec<Spanned<Node>>,
}

/// An attribute value as written in the tag
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    /// A literal: plain text, or a braced map/sequence/scalar literal
    Literal(Value),
    /// `{path}` - resolved against the scope at invocation time
    Reference(VariablePath),
}

static NEXT_HELPER_ID: AtomicUsize = AtomicUsize::new(0);

impl Template {
    pub fn new(nodes: Vec<Spanned<Node>>) -> Self {
        Template { nodes }
    }
}

impl VariablePath {
    pub fn new(segments: Vec<String>) -> Self {
        VariablePath { segments }
    }
}

impl fmt::Display for VariablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl HelperNode {
    pub fn new(
        name: String,
        arguments: Vec<(String, Spanned<ArgumentValue>)>,
        children: Vec<Spanned<Node>>,
    ) -> Self {
        HelperNode {
            name,
            id: NEXT_HELPER_ID.fetch_add(1, Ordering::Relaxed),
            arguments,
            children,
        }
    }
}

// Structural equality; the instance id is an identity, not content.
impl PartialEq for HelperNode {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.arguments == other.arguments
            && self.children == other.children
    }
}
