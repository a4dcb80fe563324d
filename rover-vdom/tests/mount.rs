mod common;

use common::setup;
use rover_vdom::{FunctionComponent, HostTree, NodeRef, Props, VNode};

fn card(title: &str, body: &str) -> VNode {
    VNode::element("div")
        .prop("className", "card")
        .style("color", "red")
        .children([
            VNode::element("h1").child(VNode::text(title)),
            VNode::fragment([VNode::text(body), VNode::element("br")]),
        ])
}

#[test]
fn test_mount_produces_matching_host_tree() {
    let (engine, container) = setup();

    engine.render(&card("Title", "Body"), container).unwrap();

    assert_eq!(
        engine.host().inner_markup(container),
        "<div className=\"card\" style=\"color:red\"><h1>Title</h1>Body<br></br></div>"
    );
}

#[test]
fn test_mounting_twice_yields_identical_trees() {
    let (engine, first) = setup();
    let second = engine.host_mut().create_element("root");

    engine.render(&card("Title", "Body"), first).unwrap();
    engine.render(&card("Title", "Body"), second).unwrap();

    let host = engine.host();
    assert_eq!(host.inner_markup(first), host.inner_markup(second));
    assert_ne!(host.children(first).unwrap(), host.children(second).unwrap());
}

#[test]
fn test_rerender_identical_tree_is_idempotent() {
    let (engine, container) = setup();
    let first = card("Title", "Body");
    let div = engine.render(&first, container).unwrap().unwrap();
    let markup = engine.host().inner_markup(container);
    engine.host_mut().clear_ops();

    let second = card("Title", "Body");
    engine
        .compare_two_vnodes(container, Some(&first), Some(&second), None)
        .unwrap();

    assert_eq!(engine.host().inner_markup(container), markup);
    assert_eq!(engine.locate(Some(&second)), Some(div));
    assert!(engine.host().ops().iter().all(|op| !op.is_structural()));
    assert!(engine.take_patches().is_empty());
}

#[test]
fn test_text_update_keeps_host_node() {
    let (engine, container) = setup();
    let old = VNode::element("p").child(VNode::text("before"));
    let p = engine.render(&old, container).unwrap().unwrap();
    let text = engine.host().children(p).unwrap()[0];

    let new = VNode::element("p").child(VNode::text("after"));
    engine
        .compare_two_vnodes(container, Some(&old), Some(&new), None)
        .unwrap();

    assert_eq!(engine.host().children(p).unwrap(), vec![text]);
    assert_eq!(engine.host().text(text), Some("after"));
}

#[test]
fn test_function_component_resolves_to_output() {
    let (engine, container) = setup();
    let greeting = FunctionComponent::new("Greeting", |props: &Props| {
        let name = props.get_str("name")?.to_string();
        Some(VNode::element("span").child(VNode::text(format!("hello {}", name))))
    });
    let old = VNode::function(&greeting, Props::new().with("name", "ada"));
    let span = engine.render(&old, container).unwrap().unwrap();

    let new = VNode::function(&greeting, Props::new().with("name", "grace"));
    engine
        .compare_two_vnodes(container, Some(&old), Some(&new), None)
        .unwrap();

    assert_eq!(engine.locate(Some(&new)), Some(span));
    assert_eq!(engine.host().inner_markup(container), "<span>hello grace</span>");
}

#[test]
fn test_type_change_replaces_host_node() {
    let (engine, container) = setup();
    let node_ref = NodeRef::new();
    let old = VNode::element("div").with_ref(&node_ref);
    let div = engine.render(&old, container).unwrap().unwrap();

    let new = VNode::element("section").with_ref(&node_ref);
    engine
        .compare_two_vnodes(container, Some(&old), Some(&new), None)
        .unwrap();

    let section = engine.locate(Some(&new)).unwrap();
    assert_ne!(section, div);
    assert!(!engine.host().is_live(div));
    assert_eq!(node_ref.host(), Some(section));
    assert_eq!(engine.host().inner_markup(container), "<section></section>");
}

#[test]
fn test_replacement_keeps_position_among_siblings() {
    let (engine, container) = setup();
    let old = VNode::element("div").children([
        VNode::text("a"),
        VNode::element("b"),
        VNode::text("c"),
    ]);
    engine.render(&old, container).unwrap();

    let new = VNode::element("div").children([
        VNode::text("a"),
        VNode::element("i"),
        VNode::text("c"),
    ]);
    engine
        .compare_two_vnodes(container, Some(&old), Some(&new), None)
        .unwrap();

    assert_eq!(engine.host().inner_markup(container), "<div>a<i></i>c</div>");
}

#[test]
fn test_props_are_never_removed() {
    let (engine, container) = setup();
    let old = VNode::element("input").prop("disabled", true).prop("value", "x");
    let input = engine.render(&old, container).unwrap().unwrap();

    let new = VNode::element("input").prop("value", "y");
    engine
        .compare_two_vnodes(container, Some(&old), Some(&new), None)
        .unwrap();

    let host = engine.host();
    assert_eq!(host.property(input, "value").and_then(|v| v.as_str()), Some("y"));
    assert_eq!(host.property(input, "disabled").and_then(|v| v.as_bool()), Some(true));
}
