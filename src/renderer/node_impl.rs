//! Node-walking implementation for the render pass

use crate::ast::{ArgumentValue, HelperNode, Node, VariablePath};
use crate::helpers::{Arguments, HelperSignature, Invocation};
use crate::span::{Span, Spanned};
use crate::trace::OperationType;
use crate::value::Value;

use super::{RenderError, RenderPass};

impl<'r> RenderPass<'r> {
    /// Render a run of sibling nodes into one output string
    pub(crate) async fn render_nodes(
        &mut self,
        nodes: &[Spanned<Node>],
    ) -> Result<String, RenderError> {
        let mut output = String::new();
        for node_spanned in nodes {
            match &node_spanned.value {
                Node::Text(text) => output.push_str(text),
                Node::Interpolation(path) => {
                    self.trace_start(
                        format!("{{{}}}", path),
                        OperationType::Interpolation,
                        Some(node_spanned.span),
                    );
                    let value = match self.lookup_path(path, node_spanned.span) {
                        Ok(value) => value,
                        Err(e) => {
                            self.trace_abort();
                            return Err(e);
                        }
                    };
                    let rendered = value.render();
                    self.trace_end(rendered.clone());
                    output.push_str(&rendered);
                }
                Node::Helper(helper_node) => {
                    let rendered = self.invoke_helper(helper_node, node_spanned.span).await?;
                    output.push_str(&rendered);
                }
            }
        }
        Ok(output)
    }

    /// Dispatch one helper invocation
    ///
    /// The helper instance for this invocation site is created on first
    /// use and kept for the lifetime of the pass; it is taken out of the
    /// instance table while it renders so it can borrow the pass.
    async fn invoke_helper(
        &mut self,
        node: &HelperNode,
        span: Span,
    ) -> Result<String, RenderError> {
        let mut helper = match self.instances.remove(&node.id) {
            Some(instance) => instance,
            None => match self.registry.instantiate(&node.name) {
                Some(instance) => instance,
                None => {
                    return Err(RenderError::UnknownHelper {
                        name: node.name.clone(),
                        span,
                    });
                }
            },
        };

        // Argument validation happens before the helper runs, so no
        // side effect can precede an argument error
        let arguments = match self.resolve_arguments(&helper.signature(), node, span) {
            Ok(arguments) => arguments,
            Err(e) => {
                self.instances.insert(node.id, helper);
                return Err(e);
            }
        };

        self.trace_start(
            format!("<r:{}>", node.name),
            OperationType::Helper,
            Some(span),
        );
        let mut invocation = Invocation {
            pass: self,
            children: &node.children,
            arguments,
            span,
        };
        let result = helper.render(&mut invocation).await;
        self.instances.insert(node.id, helper);
        match result {
            Ok(output) => {
                self.trace_end(output.clone());
                Ok(output)
            }
            Err(e) => {
                self.trace_abort();
                Err(e)
            }
        }
    }

    /// Check written arguments against the helper's signature and
    /// resolve them to values
    fn resolve_arguments(
        &self,
        signature: &HelperSignature,
        node: &HelperNode,
        span: Span,
    ) -> Result<Arguments, RenderError> {
        for (name, value_spanned) in &node.arguments {
            if !signature.accepts(name) {
                return Err(RenderError::UnknownArgument {
                    helper: signature.name.to_string(),
                    name: name.clone(),
                    span: value_spanned.span,
                });
            }
        }
        for spec in &signature.arguments {
            if spec.required && !node.arguments.iter().any(|(name, _)| name == spec.name) {
                return Err(RenderError::MissingArgument {
                    helper: signature.name.to_string(),
                    name: spec.name.to_string(),
                    span,
                });
            }
        }

        let mut resolved = Vec::with_capacity(node.arguments.len());
        for (name, value_spanned) in &node.arguments {
            let value = match &value_spanned.value {
                ArgumentValue::Literal(value) => value.clone(),
                ArgumentValue::Reference(path) => self.resolve_reference(path),
            };
            resolved.push((name.clone(), value));
        }
        Ok(Arguments::new(resolved))
    }

    /// Resolve a variable reference in argument position
    ///
    /// Unlike interpolation, a missing variable or field here is Null,
    /// not an error; helpers decide what an absent argument means.
    fn resolve_reference(&self, path: &VariablePath) -> Value {
        let first = match path.segments.first() {
            Some(segment) => segment,
            None => return Value::Null,
        };
        let mut current = match self.scope.get(first) {
            Some(value) => value,
            None => return Value::Null,
        };
        for segment in &path.segments[1..] {
            current = match field_of(current, segment) {
                Some(value) => value,
                None => return Value::Null,
            };
        }
        current.clone()
    }

    /// Strict path lookup for interpolation
    pub(crate) fn lookup_path(
        &self,
        path: &VariablePath,
        span: Span,
    ) -> Result<Value, RenderError> {
        let first = match path.segments.first() {
            Some(segment) => segment,
            None => {
                return Err(RenderError::UndefinedVariable {
                    name: String::new(),
                    span,
                });
            }
        };
        let mut current = match self.scope.get(first) {
            Some(value) => value,
            None => {
                return Err(RenderError::UndefinedVariable {
                    name: first.clone(),
                    span,
                });
            }
        };
        for segment in &path.segments[1..] {
            current = match field_of(current, segment) {
                Some(value) => value,
                None => {
                    return Err(RenderError::UndefinedField {
                        path: path.to_string(),
                        field: segment.clone(),
                        span,
                    });
                }
            };
        }
        Ok(current.clone())
    }
}

/// Look one path segment into a structured value: map entries by key,
/// sequence elements by numeric segment
fn field_of<'v>(value: &'v Value, segment: &str) -> Option<&'v Value> {
    match value {
        Value::Map(entries) => entries
            .iter()
            .find(|(key, _)| key == segment)
            .map(|(_, value)| value),
        Value::Seq(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::HelperRegistry;
    use crate::parser::parse;
    use crate::renderer::Scope;

    #[tokio::test]
    async fn test_dotted_lookup_into_map_and_seq() {
        let template = parse("{user.name} / {rows.1}").unwrap();
        let registry = HelperRegistry::standard();
        let mut scope = Scope::new();
        scope.add(
            "user",
            Value::Map(vec![("name".to_string(), Value::Str("ada".to_string()))]),
        );
        scope.add(
            "rows",
            Value::Seq(vec![Value::Int(10), Value::Int(20)]),
        );
        let mut pass = RenderPass::new(&registry).with_scope(scope);
        assert_eq!(pass.render(&template).await.unwrap(), "ada / 20");
    }

    #[tokio::test]
    async fn test_missing_field_errors() {
        let template = parse("{user.age}").unwrap();
        let registry = HelperRegistry::standard();
        let mut scope = Scope::new();
        scope.add(
            "user",
            Value::Map(vec![("name".to_string(), Value::Str("ada".to_string()))]),
        );
        let mut pass = RenderPass::new(&registry).with_scope(scope);
        let result = pass.render(&template).await;
        assert!(matches!(result, Err(RenderError::UndefinedField { .. })));
    }

    #[tokio::test]
    async fn test_unknown_argument_rejected() {
        let template = parse(r#"<r:cycle values="{'a'}" as="x" bogus="1">y</r:cycle>"#).unwrap();
        let registry = HelperRegistry::standard();
        let mut pass = RenderPass::new(&registry);
        let result = pass.render(&template).await;
        assert!(matches!(result, Err(RenderError::UnknownArgument { .. })));
    }

    #[tokio::test]
    async fn test_missing_required_argument_rejected() {
        let template = parse(r#"<r:cycle values="{'a'}">y</r:cycle>"#).unwrap();
        let registry = HelperRegistry::standard();
        let mut pass = RenderPass::new(&registry);
        let result = pass.render(&template).await;
        assert!(matches!(result, Err(RenderError::MissingArgument { .. })));
    }
}
