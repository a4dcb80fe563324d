use super::Reconciler;
use crate::error::Result;
use crate::host::HostTree;
use crate::vnode::VNode;
use tracing::trace;

impl<H: HostTree + 'static> Reconciler<H> {
    /// Tear down `vnode` and everything beneath it.
    ///
    /// Teardown hooks run and refs are cleared before any host node is
    /// detached, and children go before their parent. Nodes that were never
    /// mounted are skipped.
    pub fn unmount(&self, vnode: &VNode) -> Result<()> {
        let anchor = self.locate(Some(vnode));
        let Some(record) = self.records.borrow_mut().remove(vnode.id()) else {
            trace!(vnode = ?vnode.id(), "not mounted, nothing to unmount");
            return Ok(());
        };

        if let Some(instance) = &record.instance {
            instance.component().component_will_unmount();
        }
        if let Some(node_ref) = vnode.node_ref() {
            node_ref.clear();
        }

        for child in vnode.props().children().as_slice() {
            self.unmount(child)?;
        }
        let rendered = match &record.instance {
            Some(instance) => instance.take_rendered(),
            None => record.rendered,
        };
        if let Some(rendered) = rendered {
            self.unmount(&rendered)?;
        }

        if let (Some(_), Some(anchor)) = (record.host, anchor) {
            self.events.borrow_mut().unbind_node(anchor);
            self.host.borrow_mut().release(anchor)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::component::{Component, ComponentClass, FunctionComponent};
    use crate::host::{HostTree, MemoryHost};
    use crate::reconciler::Reconciler;
    use crate::vnode::{NodeRef, Props, VNode};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Probe {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Component for Probe {
        fn render(&self, props: &Props) -> Option<VNode> {
            Some(VNode::text(props.get_str("label").unwrap_or_default().to_string()))
        }

        fn component_will_unmount(&self) {
            self.log.borrow_mut().push("will_unmount".into());
        }
    }

    #[test]
    fn test_unmount_releases_host_nodes() {
        let engine = Reconciler::new(MemoryHost::new());
        let container = engine.host_mut().create_element("root");
        let tree = VNode::element("div").children([VNode::text("a"), VNode::text("b")]);
        let div = engine.render(&tree, container).unwrap().unwrap();

        engine.unmount(&tree).unwrap();

        assert!(!engine.host().is_live(div));
        assert_eq!(engine.host().live_count(), 1);
        assert_eq!(engine.mounted_count(), 0);
        assert!(engine.host().children(container).unwrap().is_empty());
    }

    #[test]
    fn test_unmount_runs_hook_and_clears_ref() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let probe_log = log.clone();
        let class = ComponentClass::new("Probe", move |_, _| Probe {
            log: probe_log.clone(),
        });
        let node_ref = NodeRef::new();
        let engine = Reconciler::new(MemoryHost::new());
        let container = engine.host_mut().create_element("root");
        let tree = VNode::class(&class, Props::new().with("label", "hi")).with_ref(&node_ref);
        engine.render(&tree, container).unwrap();
        assert!(node_ref.instance().is_some());

        engine.unmount(&tree).unwrap();

        assert_eq!(*log.borrow(), vec!["will_unmount".to_string()]);
        assert!(!node_ref.is_set());
        assert_eq!(engine.host().inner_markup(container), "");
    }

    #[test]
    fn test_unmount_function_component_output() {
        let label = FunctionComponent::new("Label", |props| {
            Some(VNode::element("span").child(VNode::text(props.get_str("text")?.to_string())))
        });
        let engine = Reconciler::new(MemoryHost::new());
        let container = engine.host_mut().create_element("root");
        let tree = VNode::function(&label, Props::new().with("text", "x"));
        engine.render(&tree, container).unwrap();
        assert_eq!(engine.host().inner_markup(container), "<span>x</span>");

        engine.unmount(&tree).unwrap();

        assert_eq!(engine.host().inner_markup(container), "");
        assert_eq!(engine.mounted_count(), 0);
    }

    #[test]
    fn test_unmount_unbinds_handlers() {
        let engine = Reconciler::new(MemoryHost::new());
        let container = engine.host_mut().create_element("root");
        let tree = VNode::element("button").on("onClick", |_| {});
        engine.render(&tree, container).unwrap();
        assert_eq!(engine.handler_count(), 1);

        engine.unmount(&tree).unwrap();

        assert_eq!(engine.handler_count(), 0);
    }

    #[test]
    fn test_unmount_twice_is_a_no_op() {
        let engine = Reconciler::new(MemoryHost::new());
        let container = engine.host_mut().create_element("root");
        let tree = VNode::element("div");
        engine.render(&tree, container).unwrap();

        engine.unmount(&tree).unwrap();
        engine.unmount(&tree).unwrap();

        assert_eq!(engine.host().live_count(), 1);
    }
}
