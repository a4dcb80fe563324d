use crate::error::Result;
use crate::host::{HostId, HostTree};
use crate::reconciler::Reconciler;
use crate::vnode::VNode;
use std::cell::RefCell;
use std::rc::Rc;

/// Top-level render target bound to one host container.
///
/// The first [`render`](Root::render) mounts; later calls diff against the
/// tree rendered last.
pub struct Root<H: HostTree + 'static> {
    reconciler: Rc<Reconciler<H>>,
    container: HostId,
    current: RefCell<Option<VNode>>,
}

impl<H: HostTree + 'static> Root<H> {
    pub fn new(reconciler: Rc<Reconciler<H>>, container: HostId) -> Self {
        Self {
            reconciler,
            container,
            current: RefCell::new(None),
        }
    }

    pub fn container(&self) -> HostId {
        self.container
    }

    pub fn reconciler(&self) -> &Rc<Reconciler<H>> {
        &self.reconciler
    }

    /// Independent copy of the tree rendered last
    pub fn current(&self) -> Option<VNode> {
        self.current.borrow().clone()
    }

    pub fn render(&self, next: VNode) -> Result<()> {
        let previous = self.current.borrow_mut().take();
        let outcome = match &previous {
            None => self.reconciler.render(&next, self.container).map(|_| ()),
            Some(previous) => {
                self.reconciler
                    .compare_two_vnodes(self.container, Some(previous), Some(&next), None)
            }
        };
        *self.current.borrow_mut() = if outcome.is_ok() { Some(next) } else { previous };
        outcome
    }

    /// Tear down whatever is currently rendered
    pub fn unmount(&self) -> Result<()> {
        match self.current.borrow_mut().take() {
            Some(current) => self.reconciler.unmount(&current),
            None => Ok(()),
        }
    }
}
