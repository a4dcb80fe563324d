use super::Reconciler;
use crate::component::{ComponentClass, ComponentInstance};
use crate::error::Result;
use crate::host::{HostId, HostTree};
use crate::vnode::{Children, RefTarget, VNode, VNodeKind};
use tracing::trace;

impl<H: HostTree + 'static> Reconciler<H> {
    /// Materialize `vnode` into a detached host node.
    ///
    /// Components resolve to the host node of their rendered output; a
    /// component that renders nothing mounts nothing and yields `None`.
    pub fn mount(&self, vnode: &VNode) -> Result<Option<HostId>> {
        match vnode.kind() {
            VNodeKind::Text(content) => {
                let host = self.host.borrow_mut().create_text(content);
                Ok(Some(self.finish_host_mount(vnode, host)))
            }
            VNodeKind::Fragment => {
                let host = self.host.borrow_mut().create_fragment();
                self.mount_contents(host, vnode)?;
                Ok(Some(self.finish_host_mount(vnode, host)))
            }
            VNodeKind::Element(tag) => {
                let host = self.host.borrow_mut().create_element(tag);
                self.mount_contents(host, vnode)?;
                Ok(Some(self.finish_host_mount(vnode, host)))
            }
            VNodeKind::Function(component) => {
                trace!(component = component.name(), "mounting function component");
                let rendered = component.call(vnode.props());
                self.mount_rendered(vnode, rendered)
            }
            VNodeKind::ForwardRef(component) => {
                trace!(component = component.name(), "mounting forward-ref component");
                let rendered = component.call(vnode.props(), vnode.node_ref());
                self.mount_rendered(vnode, rendered)
            }
            VNodeKind::Class(class) => self.mount_class(vnode, class),
        }
    }

    fn mount_contents(&self, host: HostId, vnode: &VNode) -> Result<()> {
        self.apply_props(host, None, vnode.props())?;
        self.mount_children(host, vnode.props().children())
    }

    fn mount_children(&self, parent: HostId, children: &Children) -> Result<()> {
        for (index, child) in children.as_slice().iter().enumerate() {
            self.set_mount_index(child.id(), index);
            if let Some(child_host) = self.mount(child)? {
                self.host.borrow_mut().append_child(parent, child_host)?;
            }
        }
        Ok(())
    }

    fn finish_host_mount(&self, vnode: &VNode, host: HostId) -> HostId {
        self.records.borrow_mut().entry(vnode.id()).host = Some(host);
        if let Some(node_ref) = vnode.node_ref() {
            node_ref.set(RefTarget::Host(host));
        }
        host
    }

    fn mount_rendered(&self, vnode: &VNode, rendered: Option<VNode>) -> Result<Option<HostId>> {
        let host = match &rendered {
            Some(output) => self.mount(output)?,
            None => None,
        };
        self.records.borrow_mut().entry(vnode.id()).rendered = rendered;
        Ok(host)
    }

    fn mount_class(&self, vnode: &VNode, class: &ComponentClass) -> Result<Option<HostId>> {
        trace!(component = class.name(), "mounting class component");
        let instance = ComponentInstance::instantiate(class, vnode.props_rc(), self.update_sink());
        self.records.borrow_mut().entry(vnode.id()).instance = Some(instance.clone());
        if let Some(node_ref) = vnode.node_ref() {
            node_ref.set(RefTarget::Instance(instance.clone()));
        }

        instance.component().component_will_mount(&instance.props());
        let rendered = instance.render();
        instance.set_rendered(rendered.as_ref().map(VNode::share));
        let host = match &rendered {
            Some(output) => self.mount(output)?,
            None => None,
        };
        instance.component().component_did_mount();
        Ok(host)
    }
}

#[cfg(test)]
mod tests {
    use crate::component::FunctionComponent;
    use crate::host::{HostTree, MemoryHost};
    use crate::reconciler::Reconciler;
    use crate::vnode::{NodeRef, Props, VNode};

    #[test]
    fn test_mount_element_tree() {
        let engine = Reconciler::new(MemoryHost::new());
        let tree = VNode::element("ul")
            .prop("className", "list")
            .children([
                VNode::element("li").child(VNode::text("one")),
                VNode::element("li").child(VNode::text("two")),
            ]);

        let host = engine.mount(&tree).unwrap().unwrap();

        assert_eq!(
            engine.host().to_markup(host),
            "<ul className=\"list\"><li>one</li><li>two</li></ul>"
        );
        assert_eq!(engine.host().parent(host), None);
    }

    #[test]
    fn test_mount_records_positions() {
        let engine = Reconciler::new(MemoryHost::new());
        let tree = VNode::element("p").children([VNode::text("a"), VNode::text("b")]);

        engine.mount(&tree).unwrap();

        let children = tree.props().children().as_slice();
        assert_eq!(engine.mount_index(children[0].id()), Some(0));
        assert_eq!(engine.mount_index(children[1].id()), Some(1));
    }

    #[test]
    fn test_function_component_rendering_nothing() {
        let engine = Reconciler::new(MemoryHost::new());
        let empty = FunctionComponent::new("Empty", |_| None);
        let node = VNode::function(&empty, Props::new());

        assert_eq!(engine.mount(&node).unwrap(), None);
        assert!(engine.is_mounted(&node));
        assert_eq!(engine.host().live_count(), 0);
    }

    #[test]
    fn test_ref_receives_host_node() {
        let engine = Reconciler::new(MemoryHost::new());
        let node_ref = NodeRef::new();
        let tree = VNode::element("input").with_ref(&node_ref);

        let host = engine.mount(&tree).unwrap();

        assert_eq!(node_ref.host(), host);
    }
}
