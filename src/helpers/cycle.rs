//! The cycle helper
//!
//! Each time its invocation site renders, the helper emits the next
//! value from a fixed sequence and exposes it to its children under a
//! caller-chosen name. The position survives between renders in the
//! pass's shared scope, keyed by a content-derived identity, so two
//! sites writing the same (name, sequence) pair deliberately advance
//! one shared cursor.

use crate::renderer::{RenderError, Scope};
use crate::span::Span;
use crate::value::Value;
use async_trait::async_trait;

use super::{ArgumentSpec, Helper, HelperSignature, Invocation};

pub struct CycleHelper {
    /// Normalized lookup table, built on the first render of this
    /// invocation site and reused for every later render of it
    values: Option<Vec<Value>>,
}

impl CycleHelper {
    pub fn new() -> Self {
        CycleHelper { values: None }
    }
}

impl Default for CycleHelper {
    fn default() -> Self {
        CycleHelper::new()
    }
}

#[async_trait]
impl Helper for CycleHelper {
    fn signature(&self) -> HelperSignature {
        HelperSignature::new("cycle")
            .argument(ArgumentSpec::optional(
                "values",
                "ordered map or sequence of values to cycle through",
            ))
            .argument(ArgumentSpec::required(
                "as",
                "name under which the current value is visible to children",
            ))
    }

    async fn render(&mut self, inv: &mut Invocation<'_, '_>) -> Result<String, RenderError> {
        let span = inv.span();

        // Validated before anything touches the scope or the store
        let binding_name = match inv.arguments().get("as") {
            Some(value) => value.render(),
            None => String::new(),
        };
        if binding_name.is_empty() {
            return Err(RenderError::MissingBindingName {
                helper: "cycle".to_string(),
                span,
            });
        }

        // No values: the helper is a plain frame around its children
        let values_arg = match inv.arguments().get("values") {
            None | Some(Value::Null) => return inv.render_children().await,
            Some(value) => value.clone(),
        };

        let sequence = match self.values.take() {
            Some(sequence) => sequence,
            None => normalize_values(&values_arg, span)?,
        };

        let identity = cycle_identity(&binding_name, &sequence);
        let cursor = {
            let store = CursorStore::new(inv.scope_mut());
            let stored = if store.exists(&identity) {
                store.read(&identity)
            } else {
                None
            };
            // Absent, negative, stale, or foreign values all restart the
            // cycle instead of erroring
            match stored {
                Some(index) if index >= 0 && (index as usize) < sequence.len() => index as usize,
                _ => 0,
            }
        };
        let selected = sequence.get(cursor).cloned().unwrap_or(Value::Null);

        if inv.tracing_enabled() {
            let items = sequence.iter().map(Value::render).collect();
            inv.trace_selection(items, cursor);
        }
        self.values = Some(sequence);

        let binding = inv.scope_mut().bind(&binding_name, selected);
        let rendered = inv.render_children().await;
        inv.scope_mut().unbind(binding);
        let output = rendered?;

        // Advance only after the children rendered; a failed iteration
        // does not consume a value
        let mut store = CursorStore::new(inv.scope_mut());
        store.write(&identity, cursor as i64 + 1);

        Ok(output)
    }
}

/// Reduce the `values` argument to one ordered sequence
///
/// Maps contribute their values in written order (keys are discarded);
/// sequences are taken as-is. Anything else is not cycleable.
fn normalize_values(value: &Value, span: Span) -> Result<Vec<Value>, RenderError> {
    match value {
        Value::Seq(items) => Ok(items.clone()),
        Value::Map(entries) => Ok(entries.iter().map(|(_, value)| value.clone()).collect()),
        other => Err(RenderError::UnsupportedInputKind {
            helper: "cycle".to_string(),
            argument: "values".to_string(),
            expected: "an ordered map or a sequence".to_string(),
            got: other.kind().to_string(),
            span,
        }),
    }
}

/// Content-derived identity of one logical cycle
///
/// Depends only on the binding name and the sequence contents, so
/// structurally identical cycles share a cursor and everything else
/// gets its own. Eight hex characters of a blake3 hash; a collision
/// would share a cursor, nothing worse.
pub(crate) fn cycle_identity(name: &str, values: &[Value]) -> String {
    let mut buf = Vec::new();
    buf.extend_from_slice(&(name.len() as u64).to_le_bytes());
    buf.extend_from_slice(name.as_bytes());
    buf.extend_from_slice(&(values.len() as u64).to_le_bytes());
    for value in values {
        write_canonical(value, &mut buf);
    }
    let hash = blake3::hash(&buf);
    hash.to_hex()[..8].to_string()
}

/// Type-tagged, length-delimited encoding so that values of different
/// kinds (or different groupings) can never serialize identically
fn write_canonical(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Null => out.push(b'n'),
        Value::Bool(b) => {
            out.push(b'b');
            out.push(u8::from(*b));
        }
        Value::Int(i) => {
            out.push(b'i');
            out.extend_from_slice(&i.to_le_bytes());
        }
        Value::Float(f) => {
            out.push(b'f');
            out.extend_from_slice(&f.to_bits().to_le_bytes());
        }
        Value::Str(s) => {
            out.push(b's');
            out.extend_from_slice(&(s.len() as u64).to_le_bytes());
            out.extend_from_slice(s.as_bytes());
        }
        Value::Seq(items) => {
            out.push(b'q');
            out.extend_from_slice(&(items.len() as u64).to_le_bytes());
            for item in items {
                write_canonical(item, out);
            }
        }
        Value::Map(entries) => {
            out.push(b'm');
            out.extend_from_slice(&(entries.len() as u64).to_le_bytes());
            for (key, value) in entries {
                out.extend_from_slice(&(key.len() as u64).to_le_bytes());
                out.extend_from_slice(key.as_bytes());
                write_canonical(value, out);
            }
        }
    }
}

/// Thin view of the shared scope as an integer cursor store
struct CursorStore<'a> {
    scope: &'a mut Scope,
}

impl<'a> CursorStore<'a> {
    fn new(scope: &'a mut Scope) -> Self {
        CursorStore { scope }
    }

    fn exists(&self, key: &str) -> bool {
        self.scope.exists(key)
    }

    fn read(&self, key: &str) -> Option<i64> {
        match self.scope.get(key) {
            Some(Value::Int(index)) => Some(*index),
            _ => None,
        }
    }

    fn write(&mut self, key: &str, cursor: i64) {
        self.scope.add(key, Value::Int(cursor));
    }
}
