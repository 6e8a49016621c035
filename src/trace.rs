/// Trace functionality for debugging and visualizing a render pass
use crate::span::Span;
use serde::{Deserialize, Serialize};

/// A single step in the render trace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraceNode {
    /// Human-readable description of what was rendered
    pub operation: String,

    /// The output produced by this operation
    pub result: String,

    /// Position in the template source (if available)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,

    /// Nested operations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TraceNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<OperationType>,

    /// For cycle selections: the rendered form of every sequence element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_items: Option<Vec<String>>,

    /// For cycle selections: the cursor position that was emitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_index: Option<usize>,
}

/// Types of operations that can be traced
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// One render call on the pass
    Root,

    /// Variable interpolation: {path}
    Interpolation,

    /// Helper invocation: <r:name ...>
    Helper,
}

impl TraceNode {
    pub fn new(operation: String, result: String) -> Self {
        TraceNode {
            operation,
            result,
            span: None,
            children: Vec::new(),
            operation_type: None,
            available_items: None,
            selected_index: None,
        }
    }

    pub fn with_type(mut self, op_type: OperationType) -> Self {
        self.operation_type = Some(op_type);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn add_child(&mut self, child: TraceNode) {
        self.children.push(child);
    }

    pub fn with_available_items(mut self, items: Vec<String>) -> Self {
        self.available_items = Some(items);
        self
    }

    pub fn with_selected_index(mut self, index: usize) -> Self {
        self.selected_index = Some(index);
        self
    }
}
