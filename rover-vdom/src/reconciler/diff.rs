use super::Reconciler;
use crate::component::InstanceHandle;
use crate::error::Result;
use crate::host::{HostId, HostTree};
use crate::vnode::{Props, RefTarget, VNode, VNodeKind};
use std::rc::Rc;
use tracing::debug;

impl<H: HostTree + 'static> Reconciler<H> {
    /// Bring the host subtree under `parent` from `old` to `new`.
    ///
    /// Nodes of the same type are updated in place; otherwise `old` is
    /// unmounted and `new` mounted in its position. New nodes go before
    /// `next_sibling` when given, else before the old anchor's next sibling,
    /// else at the end of `parent`.
    pub fn compare_two_vnodes(
        &self,
        parent: HostId,
        old: Option<&VNode>,
        new: Option<&VNode>,
        next_sibling: Option<HostId>,
    ) -> Result<()> {
        match (old, new) {
            (None, None) => Ok(()),
            (Some(old), None) => self.unmount(old),
            (None, Some(new)) => self.mount_into(parent, new, next_sibling),
            (Some(old), Some(new)) if !old.same_type(new) => {
                debug!(old = ?old.kind(), new = ?new.kind(), "type changed, replacing node");
                let next_sibling = next_sibling.or_else(|| self.sibling_after(old, parent));
                self.unmount(old)?;
                self.mount_into(parent, new, next_sibling)
            }
            (Some(old), Some(new)) => self.update_element(old, new),
        }
    }

    fn mount_into(&self, parent: HostId, vnode: &VNode, next_sibling: Option<HostId>) -> Result<()> {
        if let Some(host) = self.mount(vnode)? {
            self.insert_host(parent, host, next_sibling)?;
        }
        Ok(())
    }

    /// Next sibling of the old anchor, if it still sits under `parent`
    fn sibling_after(&self, old: &VNode, parent: HostId) -> Option<HostId> {
        let anchor = self.locate(Some(old))?;
        let host = self.host.borrow();
        if host.parent(anchor) != Some(parent) {
            return None;
        }
        host.next_sibling(anchor)
    }

    /// Update `old` into `new` in place. Both must be of the same type.
    pub(crate) fn update_element(&self, old: &VNode, new: &VNode) -> Result<()> {
        match new.kind() {
            VNodeKind::Fragment => {
                let Some(host) = self.transfer_host(old, new) else {
                    return Ok(());
                };
                self.update_children(host, old.props().children(), new.props().children())
            }
            VNodeKind::Text(content) => {
                let Some(host) = self.transfer_host(old, new) else {
                    return Ok(());
                };
                if old.text_content() != Some(content.as_str()) {
                    self.host.borrow_mut().set_text(host, content)?;
                }
                Ok(())
            }
            VNodeKind::Element(_) => {
                let Some(host) = self.transfer_host(old, new) else {
                    return Ok(());
                };
                self.apply_props(host, Some(old.props()), new.props())?;
                self.update_children(host, old.props().children(), new.props().children())
            }
            VNodeKind::Class(_) => self.update_class_component(old, new),
            VNodeKind::Function(component) => {
                self.update_function_component(old, new, |props| component.call(props))
            }
            VNodeKind::ForwardRef(component) => {
                self.update_function_component(old, new, |props| component.call(props, new.node_ref()))
            }
        }
    }

    /// Move the old node's record onto the new node and return its host node
    fn transfer_host(&self, old: &VNode, new: &VNode) -> Option<HostId> {
        let host = self
            .records
            .borrow_mut()
            .transfer(old.id(), new.id())
            .and_then(|record| record.host);
        match host {
            Some(host) => {
                self.rebind_ref(old, new, RefTarget::Host(host));
                Some(host)
            }
            None => {
                debug!(vnode = ?new.id(), "no host node to update in place");
                None
            }
        }
    }

    fn update_class_component(&self, old: &VNode, new: &VNode) -> Result<()> {
        let instance = self
            .records
            .borrow_mut()
            .transfer(old.id(), new.id())
            .and_then(|record| record.instance.clone());
        let Some(instance) = instance else {
            debug!(vnode = ?new.id(), "class node without an instance, nothing to update");
            return Ok(());
        };
        self.rebind_ref(old, new, RefTarget::Instance(instance.clone()));
        instance.component().component_will_receive_props(new.props());
        self.rerender_instance(&instance, Some(new.props_rc()))
    }

    /// Re-render a class instance and reconcile its previous output against
    /// the new one. Reached through the instance's [`Updater`](crate::Updater).
    pub(crate) fn rerender_instance(
        &self,
        instance: &InstanceHandle,
        next_props: Option<Rc<Props>>,
    ) -> Result<()> {
        if let Some(props) = next_props {
            instance.set_props(props);
        }
        let previous = instance.rendered();
        let Some(anchor) = self.locate(previous.as_ref()) else {
            debug!(component = instance.name(), "instance has no host anchor, update skipped");
            return Ok(());
        };
        let next = instance.render();
        if self.reconcile_rendered(anchor, previous.as_ref(), next.as_ref())? {
            instance.set_rendered(next);
            instance.component().component_did_update();
        }
        Ok(())
    }

    fn update_function_component<F>(&self, old: &VNode, new: &VNode, render: F) -> Result<()>
    where
        F: FnOnce(&Props) -> Option<VNode>,
    {
        let previous = self
            .records
            .borrow_mut()
            .transfer(old.id(), new.id())
            .and_then(|record| record.rendered.take());
        let Some(anchor) = self.locate(previous.as_ref()) else {
            debug!(vnode = ?new.id(), "component has no host anchor, update skipped");
            self.records.borrow_mut().entry(new.id()).rendered = previous;
            return Ok(());
        };
        let next = render(new.props());
        let applied = self.reconcile_rendered(anchor, previous.as_ref(), next.as_ref())?;
        self.records.borrow_mut().entry(new.id()).rendered = if applied { next } else { previous };
        Ok(())
    }

    /// Diff a component's previous output against its fresh output under the
    /// parent of `anchor`. Returns false when nothing could be applied.
    fn reconcile_rendered(
        &self,
        anchor: HostId,
        previous: Option<&VNode>,
        next: Option<&VNode>,
    ) -> Result<bool> {
        let (parent, next_sibling) = {
            let host = self.host.borrow();
            (host.parent(anchor), host.next_sibling(anchor))
        };
        match (parent, previous, next) {
            (Some(parent), _, _) => {
                self.compare_two_vnodes(parent, previous, next, next_sibling)?;
                Ok(true)
            }
            (None, Some(previous), Some(next)) if previous.same_type(next) => {
                self.update_element(previous, next)?;
                Ok(true)
            }
            _ => {
                debug!(?anchor, "anchor is detached, replacement skipped");
                Ok(false)
            }
        }
    }
}
