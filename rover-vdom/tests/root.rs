mod common;

use common::setup;
use rover_vdom::{FunctionComponent, HostTree, Props, ReconcilerConfig, VNode};

fn view(items: &[&str]) -> VNode {
    VNode::element("ul").children(
        items
            .iter()
            .map(|item| VNode::element("li").with_key(*item).child(VNode::text(*item))),
    )
}

#[test]
fn test_root_mounts_then_diffs() {
    let (engine, container) = setup();
    let root = engine.create_root(container);

    root.render(view(&["a", "b"])).unwrap();
    let ul = engine.host().children(container).unwrap()[0];
    root.render(view(&["b", "a", "c"])).unwrap();

    assert_eq!(engine.host().children(container).unwrap(), vec![ul]);
    assert_eq!(
        engine.host().inner_markup(container),
        "<ul><li>b</li><li>a</li><li>c</li></ul>"
    );
    assert_eq!(root.current().map(|v| v.props().children().len()), Some(3));
}

#[test]
fn test_root_swaps_component_output() {
    let (engine, container) = setup();
    let toggle = FunctionComponent::new("Toggle", |props: &Props| {
        if props.get_str("on") == Some("yes") {
            Some(VNode::element("strong").child(VNode::text("on")))
        } else {
            Some(VNode::text("off"))
        }
    });
    let root = engine.create_root(container);

    root.render(VNode::function(&toggle, Props::new().with("on", "no")))
        .unwrap();
    assert_eq!(engine.host().inner_markup(container), "off");

    root.render(VNode::function(&toggle, Props::new().with("on", "yes")))
        .unwrap();
    assert_eq!(engine.host().inner_markup(container), "<strong>on</strong>");
}

#[test]
fn test_root_unmount_clears_container() {
    let (engine, container) = setup();
    let root = engine.create_root(container);
    root.render(view(&["a"])).unwrap();

    root.unmount().unwrap();

    assert_eq!(engine.host().inner_markup(container), "");
    assert_eq!(engine.mounted_count(), 0);
    assert_eq!(engine.host().live_count(), 1);
    assert!(root.current().is_none());
}

#[test]
fn test_config_from_json() {
    let config = ReconcilerConfig::from_json(r#"{ "record_patches": true }"#).unwrap();
    assert!(config.record_patches);
    assert!(config.warn_on_duplicate_keys);
    assert!(ReconcilerConfig::from_json(r#"{ "unknown": 1 }"#).is_err());
}
