/// Diagnostic reporting using ariadne for beautiful error messages
use crate::parser::ParseError;
use crate::renderer::RenderError;
use crate::span::Span;
use ariadne::{Color, Label, Report, ReportKind, Source};
use std::ops::Range;

/// Convert a span to a range for ariadne
fn span_to_range(span: Span) -> Range<usize> {
    span.range()
}

/// Report a parse error with beautiful formatting
pub fn report_parse_error(source_name: &str, source: &str, error: &ParseError) -> String {
    let mut output = Vec::new();

    let report = match error {
        ParseError::UnexpectedEof { span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message("Unexpected end of input")
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message("the template ended here while something was still open")
                        .with_color(Color::Red),
                )
                .with_note("Helper tags must be closed with </r:name> or written as <r:name ... />")
                .finish()
        }
        ParseError::InvalidSyntax { message, span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message(format!("Syntax error: {}", message))
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message(message)
                        .with_color(Color::Red),
                )
                .finish()
        }
        ParseError::EmptyHelperName { span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message("Empty helper name")
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message("'<r:' must be followed by a helper name")
                        .with_color(Color::Red),
                )
                .finish()
        }
        ParseError::UnterminatedTag { span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message("Unterminated helper tag")
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message("this tag is missing its '>'")
                        .with_color(Color::Red),
                )
                .with_help("Close the tag with '>' or '/>'")
                .finish()
        }
        ParseError::MismatchedClosingTag {
            expected,
            found,
            span,
        } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message(format!(
                    "Mismatched closing tag: expected </r:{}>, found </r:{}>",
                    expected, found
                ))
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message(format!("this should close r:{}", expected))
                        .with_color(Color::Red),
                )
                .finish()
        }
        ParseError::UnexpectedClosingTag { name, span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message(format!("Closing tag </r:{}> has no matching opening tag", name))
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message("nothing is open here")
                        .with_color(Color::Red),
                )
                .finish()
        }
        ParseError::UnterminatedInterpolation { span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message("Unterminated interpolation")
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message("this interpolation is missing a closing '}'")
                        .with_color(Color::Red),
                )
                .with_help("Add a closing '}' to complete the interpolation")
                .finish()
        }
        ParseError::UnterminatedString { span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message("Unterminated string")
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message("this string is missing its closing quote")
                        .with_color(Color::Red),
                )
                .finish()
        }
        ParseError::InvalidEscape { ch, span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message(format!("Invalid escape sequence: \\{}", ch))
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message(format!("'\\{}' is not a valid escape sequence", ch))
                        .with_color(Color::Red),
                )
                .with_note("Valid escape sequences: \\{, \\<, \\\\")
                .finish()
        }
        ParseError::InvalidArgumentExpression { message, span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message(format!("Invalid argument expression: {}", message))
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message(message)
                        .with_color(Color::Red),
                )
                .with_help(
                    "Argument expressions are maps like {0: 'odd', 1: 'even'}, sequences like \
                     {'a', 'b'}, scalars, or a variable reference like {items}",
                )
                .finish()
        }
        ParseError::DuplicateArgument { name, span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message(format!("Duplicate argument: '{}'", name))
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message(format!("'{}' is already written on this tag", name))
                        .with_color(Color::Red),
                )
                .finish()
        }
    };

    report
        .write((source_name, Source::from(source)), &mut output)
        .expect("Failed to write diagnostic");

    String::from_utf8(output).expect("Invalid UTF-8 in diagnostic output")
}

/// Report a render error with beautiful formatting
pub fn report_render_error(source_name: &str, source: &str, error: &RenderError) -> String {
    let mut output = Vec::new();

    let report = match error {
        RenderError::UnknownHelper { name, span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message(format!("Unknown helper: 'r:{}'", name))
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message(format!("no helper named '{}' is registered", name))
                        .with_color(Color::Red),
                )
                .with_help("Register the helper on the registry before rendering")
                .finish()
        }
        RenderError::UnknownArgument { helper, name, span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message(format!("Unknown argument '{}' on r:{}", name, helper))
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message(format!("r:{} does not declare '{}'", helper, name))
                        .with_color(Color::Red),
                )
                .finish()
        }
        RenderError::MissingArgument { helper, name, span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message(format!("Missing argument '{}' on r:{}", name, helper))
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message(format!("r:{} requires '{}'", helper, name))
                        .with_color(Color::Red),
                )
                .finish()
        }
        RenderError::MissingBindingName { helper, span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message(format!("r:{} needs a non-empty binding name", helper))
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message("the 'as' argument is empty")
                        .with_color(Color::Red),
                )
                .with_help("Give 'as' the name the children should see the value under")
                .finish()
        }
        RenderError::UnsupportedInputKind {
            helper,
            argument,
            expected,
            got,
            span,
        } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message(format!(
                    "r:{} cannot work with this '{}' value",
                    helper, argument
                ))
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message(format!("expected {}, got {}", expected, got))
                        .with_color(Color::Red),
                )
                .finish()
        }
        RenderError::UndefinedVariable { name, span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message(format!("Undefined variable: '{}'", name))
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message(format!("variable '{}' is not in scope", name))
                        .with_color(Color::Red),
                )
                .with_help(format!("Add '{}' to the scope before rendering, or check for typos", name))
                .finish()
        }
        RenderError::UndefinedField { path, field, span } => {
            Report::build(ReportKind::Error, source_name, span.start)
                .with_message(format!("Undefined field: '{}'", path))
                .with_label(
                    Label::new((source_name, span_to_range(*span)))
                        .with_message(format!("'{}' has no field '{}'", path, field))
                        .with_color(Color::Red),
                )
                .finish()
        }
    };

    report
        .write((source_name, Source::from(source)), &mut output)
        .expect("Failed to write diagnostic");

    String::from_utf8(output).expect("Invalid UTF-8 in diagnostic output")
}

/// Combined error reporting for any rill error
pub fn report_error(source_name: &str, source: &str, error: &crate::Error) -> String {
    match error {
        crate::Error::Parse(e) => report_parse_error(source_name, source, e),
        crate::Error::Render(e) => report_render_error(source_name, source, e),
    }
}
