//! Binding hygiene: nothing a helper exposes to its children may stay
//! visible after the helper returns, on success or on failure.

use rill::{parse, HelperRegistry, RenderPass, Scope, Value};

#[tokio::test]
async fn test_binding_absent_after_render() {
    let template = parse(r#"<r:cycle values="{'a', 'b'}" as="x">{x}</r:cycle>"#).unwrap();
    let registry = HelperRegistry::standard();
    let mut pass = RenderPass::new(&registry);
    pass.render(&template).await.unwrap();
    assert!(!pass.scope().exists("x"));
}

#[tokio::test]
async fn test_preexisting_binding_is_shadowed_and_restored() {
    let template = parse(r#"<r:cycle values="{'a', 'b'}" as="x">{x}</r:cycle>"#).unwrap();
    let registry = HelperRegistry::standard();
    let mut scope = Scope::new();
    scope.add("x", Value::Str("original".to_string()));
    let mut pass = RenderPass::new(&registry).with_scope(scope);
    // The child sees the cycle value, not the outer variable
    assert_eq!(pass.render(&template).await.unwrap(), "a");
    // And the outer variable survives the helper
    assert_eq!(
        pass.scope().get("x"),
        Some(&Value::Str("original".to_string()))
    );
}

#[tokio::test]
async fn test_binding_released_when_child_fails() {
    let template = parse(r#"<r:cycle values="{'a', 'b'}" as="x">{x}{missing}</r:cycle>"#).unwrap();
    let registry = HelperRegistry::standard();
    let mut pass = RenderPass::new(&registry);
    let result = pass.render(&template).await;
    assert!(matches!(
        result,
        Err(rill::RenderError::UndefinedVariable { .. })
    ));
    assert!(!pass.scope().exists("x"));
}

#[tokio::test]
async fn test_shadowed_binding_restored_when_child_fails() {
    let template = parse(r#"<r:cycle values="{'a', 'b'}" as="x">{missing}</r:cycle>"#).unwrap();
    let registry = HelperRegistry::standard();
    let mut scope = Scope::new();
    scope.add("x", Value::Int(7));
    let mut pass = RenderPass::new(&registry).with_scope(scope);
    assert!(pass.render(&template).await.is_err());
    assert_eq!(pass.scope().get("x"), Some(&Value::Int(7)));
}

#[tokio::test]
async fn test_failed_iteration_does_not_advance_cursor() {
    let registry = HelperRegistry::standard();
    let mut pass = RenderPass::new(&registry);

    let failing =
        parse(r#"<r:cycle values="{'a', 'b', 'c'}" as="x">{x}{missing}</r:cycle>"#).unwrap();
    assert!(pass.render(&failing).await.is_err());

    // Same logical cycle, healthy children: the failed render above must
    // not have consumed 'a'
    let healthy = parse(r#"<r:cycle values="{'a', 'b', 'c'}" as="x">{x}</r:cycle>"#).unwrap();
    assert_eq!(pass.render(&healthy).await.unwrap(), "a");
}

#[tokio::test]
async fn test_passthrough_leaves_scope_untouched() {
    let template = parse(r#"<r:cycle as="x">child</r:cycle>"#).unwrap();
    let registry = HelperRegistry::standard();
    let mut scope = Scope::new();
    scope.add("existing", Value::Int(1));
    let mut pass = RenderPass::new(&registry).with_scope(scope);
    let before: Vec<String> = {
        let mut names: Vec<String> = pass.scope().names().map(str::to_string).collect();
        names.sort();
        names
    };
    pass.render(&template).await.unwrap();
    let after: Vec<String> = {
        let mut names: Vec<String> = pass.scope().names().map(str::to_string).collect();
        names.sort();
        names
    };
    assert_eq!(before, after);
}
