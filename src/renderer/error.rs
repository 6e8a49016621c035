use crate::span::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    UnknownHelper {
        name: String,
        span: Span,
    },
    UnknownArgument {
        helper: String,
        name: String,
        span: Span,
    },
    MissingArgument {
        helper: String,
        name: String,
        span: Span,
    },
    /// The `as` binding name is absent, empty, or renders empty
    MissingBindingName {
        helper: String,
        span: Span,
    },
    /// An argument value has a kind the helper cannot work with
    UnsupportedInputKind {
        helper: String,
        argument: String,
        expected: String,
        got: String,
        span: Span,
    },
    UndefinedVariable {
        name: String,
        span: Span,
    },
    UndefinedField {
        path: String,
        field: String,
        span: Span,
    },
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::UnknownHelper { name, span } => {
                write!(f, "Unknown helper: r:{} at position {}", name, span.start)
            }
            RenderError::UnknownArgument { helper, name, span } => {
                write!(
                    f,
                    "Helper r:{} does not accept an argument named '{}' at position {}",
                    helper, name, span.start
                )
            }
            RenderError::MissingArgument { helper, name, span } => {
                write!(
                    f,
                    "Helper r:{} requires the '{}' argument at position {}",
                    helper, name, span.start
                )
            }
            RenderError::MissingBindingName { helper, span } => {
                write!(
                    f,
                    "Helper r:{} needs a non-empty binding name at position {}",
                    helper, span.start
                )
            }
            RenderError::UnsupportedInputKind {
                helper,
                argument,
                expected,
                got,
                span,
            } => {
                write!(
                    f,
                    "Helper r:{} expected {} for '{}', got {} at position {}",
                    helper, expected, argument, got, span.start
                )
            }
            RenderError::UndefinedVariable { name, span } => {
                write!(f, "Undefined variable: {} at position {}", name, span.start)
            }
            RenderError::UndefinedField { path, field, span } => {
                write!(
                    f,
                    "Undefined field '{}' in '{}' at position {}",
                    field, path, span.start
                )
            }
        }
    }
}

impl std::error::Error for RenderError {}

impl RenderError {
    /// Get the span associated with this error
    pub fn span(&self) -> Span {
        match self {
            RenderError::UnknownHelper { span, .. } => *span,
            RenderError::UnknownArgument { span, .. } => *span,
            RenderError::MissingArgument { span, .. } => *span,
            RenderError::MissingBindingName { span, .. } => *span,
            RenderError::UnsupportedInputKind { span, .. } => *span,
            RenderError::UndefinedVariable { span, .. } => *span,
            RenderError::UndefinedField { span, .. } => *span,
        }
    }
}
