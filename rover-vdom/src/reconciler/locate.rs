use super::Reconciler;
use crate::host::{HostId, HostTree};
use crate::vnode::VNode;

impl<H: HostTree + 'static> Reconciler<H> {
    /// Nearest host node representing `vnode`.
    ///
    /// Component nodes own no host node; they resolve through their rendered
    /// output (or their instance's) until a host-owning node is reached.
    /// Unmounted nodes and components that rendered nothing yield `None`.
    pub fn locate(&self, vnode: Option<&VNode>) -> Option<HostId> {
        let records = self.records.borrow();
        let mut current = vnode?.id();
        loop {
            let record = records.get(current)?;
            if let Some(host) = record.host {
                return Some(host);
            }
            current = record.rendered_id()?;
        }
    }
}
