/// rill - a helper-component template rendering engine
///
/// Templates are plain text with `{path}` interpolations and
/// `<r:helper ...>` invocation tags. Helpers are small stateful
/// components instantiated per invocation site; the built-in `cycle`
/// helper emits the next value of a fixed sequence on every render of
/// its site, which is how zebra-striping and other round-robin effects
/// are written without the template knowing any iteration number.
///
/// # Example
///
/// ```
/// # tokio_test::block_on(async {
/// use rill::{parse, HelperRegistry, RenderPass};
///
/// let template = parse(
///     "<r:cycle values=\"{0: 'odd', 1: 'even'}\" as=\"zebra\"><li class=\"{zebra}\"></li></r:cycle>",
/// )
/// .unwrap();
/// let registry = HelperRegistry::standard();
/// let mut pass = RenderPass::new(&registry);
/// let mut rows = String::new();
/// for _ in 0..3 {
///     rows.push_str(&pass.render(&template).await.unwrap());
/// }
/// assert_eq!(
///     rows,
///     "<li class=\"odd\"></li><li class=\"even\"></li><li class=\"odd\"></li>"
/// );
/// # });
/// ```
pub mod ast;
pub mod diagnostic;
pub mod helpers;
pub mod parser;
pub mod renderer;
pub mod span;
pub mod trace;
pub mod value;

/// Re-export main types for convenience
pub use ast::Template;
pub use helpers::{ArgumentSpec, Arguments, Helper, HelperRegistry, HelperSignature, Invocation};
pub use parser::ParseError;
pub use renderer::{RenderError, RenderPass, Scope, ScopeBinding};
pub use trace::TraceNode;
pub use value::Value;

/// Combined error type for parsing and rendering
#[derive(Debug)]
pub enum Error {
    Parse(ParseError),
    Render(RenderError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "Parse error: {}", e),
            Error::Render(e) => write!(f, "Render error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<RenderError> for Error {
    fn from(e: RenderError) -> Self {
        Error::Render(e)
    }
}

/// Parse a template into its AST
///
/// # Example
/// ```
/// use rill::parse;
///
/// let template = parse("<li>{name}</li>").unwrap();
/// ```
pub fn parse(input: &str) -> Result<Template, ParseError> {
    parser::parse(input)
}

/// Parse and render a template in a one-shot pass with the standard
/// helpers
///
/// Each call is its own render pass: cycle cursors start fresh. Hold a
/// [`RenderPass`] yourself to drive repeated renders that share state.
///
/// # Example
/// ```
/// # tokio_test::block_on(async {
/// use rill::{render, Scope, Value};
///
/// let mut scope = Scope::new();
/// scope.add("name", Value::Str("world".to_string()));
/// let output = render("hello {name}!", scope).await.unwrap();
/// assert_eq!(output, "hello world!");
/// # });
/// ```
pub async fn render(source: &str, scope: Scope) -> Result<String, Error> {
    let template = parse(source)?;
    let registry = HelperRegistry::standard();
    let mut pass = RenderPass::new(&registry).with_scope(scope);
    let output = pass.render(&template).await?;
    Ok(output)
}
