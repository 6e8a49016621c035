/// Helper components - the invocation framework and the built-in helpers
///
/// A helper is instantiated once per invocation site in a render pass
/// and re-invoked every time that site renders, which is what lets a
/// helper keep per-site state (the cycle helper's cached sequence).
// Built-in helpers
mod alias;
mod cycle;

pub use alias::AliasHelper;
pub use cycle::CycleHelper;

use crate::ast::Node;
use crate::renderer::{RenderError, RenderPass, Scope};
use crate::span::{Span, Spanned};
use crate::value::Value;
use async_trait::async_trait;
use std::collections::HashMap;

/// One declared argument of a helper
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

impl ArgumentSpec {
    pub fn required(name: &'static str, description: &'static str) -> Self {
        ArgumentSpec {
            name,
            required: true,
            description,
        }
    }

    pub fn optional(name: &'static str, description: &'static str) -> Self {
        ArgumentSpec {
            name,
            required: false,
            description,
        }
    }
}

/// A helper's name and declared arguments
#[derive(Debug, Clone)]
pub struct HelperSignature {
    pub name: &'static str,
    pub arguments: Vec<ArgumentSpec>,
}

impl HelperSignature {
    pub fn new(name: &'static str) -> Self {
        HelperSignature {
            name,
            arguments: Vec::new(),
        }
    }

    pub fn argument(mut self, spec: ArgumentSpec) -> Self {
        self.arguments.push(spec);
        self
    }

    pub fn accepts(&self, name: &str) -> bool {
        self.arguments.iter().any(|spec| spec.name == name)
    }
}

/// Arguments resolved for one invocation, in written order
#[derive(Debug, Clone)]
pub struct Arguments {
    values: Vec<(String, Value)>,
}

impl Arguments {
    pub(crate) fn new(values: Vec<(String, Value)>) -> Self {
        Arguments { values }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(written, _)| written == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Everything a helper sees while rendering one invocation
pub struct Invocation<'a, 'r> {
    pub(crate) pass: &'a mut RenderPass<'r>,
    pub(crate) children: &'a [Spanned<Node>],
    pub(crate) arguments: Arguments,
    pub(crate) span: Span,
}

impl<'a, 'r> Invocation<'a, 'r> {
    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn scope(&self) -> &Scope {
        self.pass.scope()
    }

    pub fn scope_mut(&mut self) -> &mut Scope {
        self.pass.scope_mut()
    }

    /// Render the helper's child content and return its output
    pub async fn render_children(&mut self) -> Result<String, RenderError> {
        self.pass.render_nodes(self.children).await
    }

    pub fn tracing_enabled(&self) -> bool {
        self.pass.tracing_enabled()
    }

    /// Annotate the current trace node with a selection
    pub fn trace_selection(&mut self, items: Vec<String>, index: usize) {
        self.pass.trace_selection(items, index);
    }
}

/// A helper component
///
/// `render` takes `&mut self` so an instance can carry state across the
/// repeated renders of its invocation site within one pass.
#[async_trait]
pub trait Helper: Send {
    fn signature(&self) -> HelperSignature;

    async fn render(&mut self, inv: &mut Invocation<'_, '_>) -> Result<String, RenderError>;
}

pub type HelperFactory = fn() -> Box<dyn Helper>;

/// Registry mapping helper names to instance factories
pub struct HelperRegistry {
    factories: HashMap<String, HelperFactory>,
}

impl HelperRegistry {
    pub fn new() -> Self {
        HelperRegistry {
            factories: HashMap::new(),
        }
    }

    /// Registry with the built-in helpers
    pub fn standard() -> Self {
        let mut registry = HelperRegistry::new();
        registry.register("cycle", || Box::new(CycleHelper::new()));
        registry.register("alias", || Box::new(AliasHelper::new()));
        registry
    }

    pub fn register(&mut self, name: &str, factory: HelperFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    /// Create a fresh instance of the named helper
    pub fn instantiate(&self, name: &str) -> Option<Box<dyn Helper>> {
        self.factories.get(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for HelperRegistry {
    fn default() -> Self {
        HelperRegistry::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_contents() {
        let registry = HelperRegistry::standard();
        assert!(registry.contains("cycle"));
        assert!(registry.contains("alias"));
        assert!(!registry.contains("for"));
    }

    #[test]
    fn test_signature_accepts() {
        let signature = HelperSignature::new("cycle")
            .argument(ArgumentSpec::optional("values", "the values"))
            .argument(ArgumentSpec::required("as", "the binding name"));
        assert!(signature.accepts("values"));
        assert!(signature.accepts("as"));
        assert!(!signature.accepts("each"));
    }

    #[test]
    fn test_arguments_lookup() {
        let arguments = Arguments::new(vec![
            ("as".to_string(), Value::Str("x".to_string())),
            ("values".to_string(), Value::Null),
        ]);
        assert_eq!(arguments.get("as"), Some(&Value::Str("x".to_string())));
        assert!(arguments.contains("values"));
        assert!(arguments.get("map").is_none());
    }
}
