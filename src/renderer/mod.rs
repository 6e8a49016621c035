/// Renderer module - walks parsed templates and produces output text
// Sub-modules
mod error;
mod scope;

// Implementation modules
mod node_impl;
mod trace_impl;

// Public exports
pub use error::RenderError;
pub use scope::{Scope, ScopeBinding};

use crate::ast::Template;
use crate::helpers::{Helper, HelperRegistry};
use crate::trace::TraceNode;
use std::collections::HashMap;

/// One render pass over a template tree
///
/// The pass owns the shared variable scope and the per-invocation-site
/// helper instances. Calling [`RenderPass::render`] repeatedly on the
/// same pass is how a host drives iteration: cycle cursors and cached
/// sequences persist across those calls and die with the pass.
pub struct RenderPass<'r> {
    pub(super) registry: &'r HelperRegistry,
    pub(super) scope: Scope,
    pub(super) instances: HashMap<usize, Box<dyn Helper>>,
    pub(super) trace_enabled: bool,
    pub(super) trace_stack: Vec<TraceNode>,
    pub(super) trace_roots: Vec<TraceNode>,
}

impl<'r> RenderPass<'r> {
    /// Create a new pass with an empty scope
    pub fn new(registry: &'r HelperRegistry) -> Self {
        RenderPass {
            registry,
            scope: Scope::new(),
            instances: HashMap::new(),
            trace_enabled: false,
            trace_stack: Vec::new(),
            trace_roots: Vec::new(),
        }
    }

    /// Start the pass with pre-populated variables
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Enable trace collection for this pass
    pub fn with_tracing(mut self) -> Self {
        self.trace_enabled = true;
        self
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }

    pub(crate) fn tracing_enabled(&self) -> bool {
        self.trace_enabled
    }

    /// Render a template within this pass
    pub async fn render(&mut self, template: &Template) -> Result<String, RenderError> {
        self.trace_start(
            "Render template".to_string(),
            crate::trace::OperationType::Root,
            None,
        );
        let result = self.render_nodes(&template.nodes).await;
        match &result {
            Ok(output) => self.trace_end(output.clone()),
            Err(_) => self.trace_abort(),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[tokio::test]
    async fn test_text_passthrough() {
        let template = parse("plain text").unwrap();
        let registry = HelperRegistry::standard();
        let mut pass = RenderPass::new(&registry);
        let result = pass.render(&template).await;
        assert_eq!(result.unwrap(), "plain text");
    }

    #[tokio::test]
    async fn test_interpolation_from_scope() {
        let template = parse("hello {name}!").unwrap();
        let registry = HelperRegistry::standard();
        let mut scope = Scope::new();
        scope.add("name", crate::value::Value::Str("world".to_string()));
        let mut pass = RenderPass::new(&registry).with_scope(scope);
        let result = pass.render(&template).await;
        assert_eq!(result.unwrap(), "hello world!");
    }

    #[tokio::test]
    async fn test_undefined_variable_errors() {
        let template = parse("{missing}").unwrap();
        let registry = HelperRegistry::standard();
        let mut pass = RenderPass::new(&registry);
        let result = pass.render(&template).await;
        assert!(matches!(
            result,
            Err(RenderError::UndefinedVariable { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_helper_errors() {
        let template = parse("<r:bogus/>").unwrap();
        let registry = HelperRegistry::standard();
        let mut pass = RenderPass::new(&registry);
        let result = pass.render(&template).await;
        assert!(matches!(result, Err(RenderError::UnknownHelper { .. })));
    }
}
