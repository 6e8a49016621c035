/// End-to-end rendering scenarios combining the engine surface
use rill::{parse, render, HelperRegistry, RenderPass, Scope, Value};

#[tokio::test]
async fn test_zebra_striped_table() {
    // The host owns the loop; the template only knows "next class"
    let row = parse(concat!(
        r#"<r:cycle values="{0: 'odd', 1: 'even'}" as="zebra">"#,
        r#"<tr class="{zebra}"><td>{item}</td></tr>"#,
        r#"</r:cycle>"#,
    ))
    .unwrap();
    let registry = HelperRegistry::standard();
    let mut pass = RenderPass::new(&registry);

    let mut table = String::from("<table>");
    for item in ["one", "two", "three", "four"] {
        pass.scope_mut().add("item", Value::Str(item.to_string()));
        table.push_str(&pass.render(&row).await.unwrap());
    }
    table.push_str("</table>");

    assert_eq!(
        table,
        concat!(
            "<table>",
            "<tr class=\"odd\"><td>one</td></tr>",
            "<tr class=\"even\"><td>two</td></tr>",
            "<tr class=\"odd\"><td>three</td></tr>",
            "<tr class=\"even\"><td>four</td></tr>",
            "</table>",
        )
    );
}

#[tokio::test]
async fn test_alias_wrapping_a_cycle() {
    let template = parse(concat!(
        r#"<r:alias map="{label: 'row'}">"#,
        r#"<r:cycle values="{'a', 'b'}" as="x">{label}-{x}</r:cycle>"#,
        r#"</r:alias>"#,
    ))
    .unwrap();
    let registry = HelperRegistry::standard();
    let mut pass = RenderPass::new(&registry);
    assert_eq!(pass.render(&template).await.unwrap(), "row-a");
    assert_eq!(pass.render(&template).await.unwrap(), "row-b");
    assert!(!pass.scope().exists("label"));
}

#[tokio::test]
async fn test_mixed_text_helpers_and_interpolation() {
    let template = parse(concat!(
        "Hello {user}, ",
        r#"<r:cycle values="{'first', 'second'}" as="visit">your {visit} visit</r:cycle>"#,
        ".",
    ))
    .unwrap();
    let registry = HelperRegistry::standard();
    let mut scope = Scope::new();
    scope.add("user", Value::Str("ada".to_string()));
    let mut pass = RenderPass::new(&registry).with_scope(scope);
    assert_eq!(
        pass.render(&template).await.unwrap(),
        "Hello ada, your first visit."
    );
    assert_eq!(
        pass.render(&template).await.unwrap(),
        "Hello ada, your second visit."
    );
}

#[tokio::test]
async fn test_output_is_not_escaped() {
    let mut scope = Scope::new();
    scope.add("markup", Value::Str("<b>&amp;</b>".to_string()));
    let output = render("{markup}", scope).await.unwrap();
    assert_eq!(output, "<b>&amp;</b>");
}

#[tokio::test]
async fn test_literal_braces_survive() {
    let output = render("body { color: red } and \\{escaped}", Scope::new())
        .await
        .unwrap();
    assert_eq!(output, "body { color: red } and {escaped}");
}

#[tokio::test]
async fn test_unicode_text_and_values() {
    let row = parse(r#"<r:cycle values="{'křivka', 'čára'}" as="tvar">{tvar}</r:cycle>"#).unwrap();
    let registry = HelperRegistry::standard();
    let mut pass = RenderPass::new(&registry);
    assert_eq!(pass.render(&row).await.unwrap(), "křivka");
    assert_eq!(pass.render(&row).await.unwrap(), "čára");
}

#[tokio::test]
async fn test_parse_error_surfaces() {
    let result = render(r#"<r:cycle values="{'a'}" as="x">no close"#, Scope::new()).await;
    assert!(matches!(result, Err(rill::Error::Parse(_))));
}

#[tokio::test]
async fn test_render_error_surfaces() {
    let result = render("{missing}", Scope::new()).await;
    assert!(matches!(result, Err(rill::Error::Render(_))));
}
