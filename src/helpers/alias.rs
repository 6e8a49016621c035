//! The alias helper
//!
//! Declares shorthand names for values while its children render:
//! `<r:alias map="{total: {cart.sum}}">{total}</r:alias>`. Every entry
//! is bound through the scope's shadow-and-restore mechanism and
//! released in reverse order once the children are done, error or not.

use crate::renderer::RenderError;
use crate::value::Value;
use async_trait::async_trait;

use super::{ArgumentSpec, Helper, HelperSignature, Invocation};

pub struct AliasHelper;

impl AliasHelper {
    pub fn new() -> Self {
        AliasHelper
    }
}

impl Default for AliasHelper {
    fn default() -> Self {
        AliasHelper::new()
    }
}

#[async_trait]
impl Helper for AliasHelper {
    fn signature(&self) -> HelperSignature {
        HelperSignature::new("alias").argument(ArgumentSpec::required(
            "map",
            "map of alias names to the values they stand for",
        ))
    }

    async fn render(&mut self, inv: &mut Invocation<'_, '_>) -> Result<String, RenderError> {
        let span = inv.span();
        let entries = match inv.arguments().get("map") {
            Some(Value::Map(entries)) => entries.clone(),
            Some(other) => {
                return Err(RenderError::UnsupportedInputKind {
                    helper: "alias".to_string(),
                    argument: "map".to_string(),
                    expected: "a map".to_string(),
                    got: other.kind().to_string(),
                    span,
                });
            }
            None => {
                return Err(RenderError::MissingArgument {
                    helper: "alias".to_string(),
                    name: "map".to_string(),
                    span,
                });
            }
        };

        if entries.is_empty() {
            return inv.render_children().await;
        }

        let mut bindings = Vec::with_capacity(entries.len());
        for (name, value) in entries {
            bindings.push(inv.scope_mut().bind(&name, value));
        }
        let rendered = inv.render_children().await;
        for binding in bindings.into_iter().rev() {
            inv.scope_mut().unbind(binding);
        }
        rendered
    }
}
