use crate::span::Span;
use crate::trace::{OperationType, TraceNode};

use super::RenderPass;

impl<'r> RenderPass<'r> {
    /// Get the trace of the most recently completed render call
    pub fn take_trace(&mut self) -> Option<TraceNode> {
        if !self.trace_enabled {
            return None;
        }
        self.trace_roots.pop()
    }

    /// Start a new trace operation
    pub(super) fn trace_start(
        &mut self,
        operation: String,
        op_type: OperationType,
        span: Option<Span>,
    ) {
        if !self.trace_enabled {
            return;
        }
        let mut node = TraceNode::new(operation, String::new()).with_type(op_type);
        if let Some(s) = span {
            node = node.with_span(s);
        }
        self.trace_stack.push(node);
    }

    /// Complete the current trace operation with its output
    pub(super) fn trace_end(&mut self, result: String) {
        if !self.trace_enabled {
            return;
        }
        if let Some(mut node) = self.trace_stack.pop() {
            node.result = result;
            match self.trace_stack.last_mut() {
                Some(parent) => parent.add_child(node),
                None => self.trace_roots.push(node),
            }
        }
    }

    /// Discard the current trace operation after a failure
    pub(super) fn trace_abort(&mut self) {
        if !self.trace_enabled {
            return;
        }
        self.trace_stack.pop();
    }

    /// Record which sequence element the current operation selected
    pub(crate) fn trace_selection(&mut self, items: Vec<String>, index: usize) {
        if !self.trace_enabled {
            return;
        }
        if let Some(node) = self.trace_stack.last_mut() {
            node.available_items = Some(items);
            node.selected_index = Some(index);
        }
    }
}
