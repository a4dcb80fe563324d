//! Mount, diff and unmount of virtual trees against a [`HostTree`].
//!
//! The reconciler is shared behind an `Rc` and works through `&self`: every
//! piece of state sits in its own `RefCell` and borrows never outlive a single
//! host or record operation. Component render functions, lifecycle hooks and
//! event handlers can therefore re-enter the reconciler (an instance calling
//! its [`Updater`](crate::Updater) from a hook, say) without conflicting
//! borrows.

mod children;
mod diff;
mod locate;
mod mount;
mod patch;
mod props;
mod records;
mod unmount;

pub use patch::Patch;

use crate::component::{InstanceHandle, UpdateSink};
use crate::config::ReconcilerConfig;
use crate::error::Result;
use crate::events::{EventRegistry, HostEvent};
use crate::host::{HostId, HostTree};
use crate::root::Root;
use crate::vnode::{Props, RefTarget, VNode, VNodeId};
use records::MountRecords;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};
use tracing::trace;

pub struct Reconciler<H: HostTree> {
    host: RefCell<H>,
    records: RefCell<MountRecords>,
    events: RefCell<EventRegistry>,
    patches: RefCell<Vec<Patch>>,
    config: ReconcilerConfig,
    this: Weak<Self>,
}

impl<H: HostTree + 'static> Reconciler<H> {
    pub fn new(host: H) -> Rc<Self> {
        Self::with_config(host, ReconcilerConfig::default())
    }

    pub fn with_config(host: H, config: ReconcilerConfig) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            host: RefCell::new(host),
            records: RefCell::new(MountRecords::new()),
            events: RefCell::new(EventRegistry::new()),
            patches: RefCell::new(Vec::new()),
            config,
            this: this.clone(),
        })
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    pub fn host(&self) -> Ref<'_, H> {
        self.host.borrow()
    }

    /// Mutable access to the host tree. Do not hold across reconciler calls.
    pub fn host_mut(&self) -> RefMut<'_, H> {
        self.host.borrow_mut()
    }

    /// Mount `vnode` and append the result to `container`
    pub fn render(&self, vnode: &VNode, container: HostId) -> Result<Option<HostId>> {
        let host = self.mount(vnode)?;
        if let Some(host) = host {
            self.host.borrow_mut().append_child(container, host)?;
        }
        Ok(host)
    }

    /// Root bound to `container` that diffs each render against the previous one
    pub fn create_root(self: &Rc<Self>, container: HostId) -> Root<H> {
        Root::new(self.clone(), container)
    }

    /// Invoke the handler registered for `event` on `target`.
    /// Returns false when no handler is bound.
    pub fn dispatch(&self, target: HostId, event: &str) -> bool {
        let name = event.to_lowercase();
        let handler = self.events.borrow().handler(target, &name);
        match handler {
            Some(handler) => {
                trace!(?target, event = %name, "dispatching event");
                handler(&HostEvent {
                    target,
                    name: name.into(),
                });
                true
            }
            None => false,
        }
    }

    /// Drain the patch journal. Empty unless `record_patches` is set.
    pub fn take_patches(&self) -> Vec<Patch> {
        std::mem::take(&mut *self.patches.borrow_mut())
    }

    pub fn is_mounted(&self, vnode: &VNode) -> bool {
        self.records.borrow().contains(vnode.id())
    }

    /// Number of virtual nodes currently holding a mount record
    pub fn mounted_count(&self) -> usize {
        self.records.borrow().len()
    }

    /// Number of event handlers currently bound
    pub fn handler_count(&self) -> usize {
        self.events.borrow().len()
    }

    fn record_patch(&self, patch: Patch) {
        trace!(?patch, "keyed patch");
        if self.config.record_patches {
            self.patches.borrow_mut().push(patch);
        }
    }

    fn set_mount_index(&self, id: VNodeId, index: usize) {
        self.records.borrow_mut().entry(id).mount_index = index;
    }

    fn mount_index(&self, id: VNodeId) -> Option<usize> {
        self.records.borrow().mount_index(id)
    }

    fn update_sink(&self) -> Weak<dyn UpdateSink> {
        self.this.clone()
    }

    /// Insert before `next_sibling` when given, else append
    fn insert_host(&self, parent: HostId, child: HostId, next_sibling: Option<HostId>) -> Result<()> {
        let mut host = self.host.borrow_mut();
        match next_sibling {
            Some(reference) => host.insert_before(parent, child, reference),
            None => host.append_child(parent, child),
        }
    }

    /// Insert before whatever currently sits at `index`, else append
    fn insert_at(&self, parent: HostId, child: HostId, index: usize) -> Result<()> {
        let mut host = self.host.borrow_mut();
        match host.child_at(parent, index)? {
            Some(reference) => host.insert_before(parent, child, reference),
            None => host.append_child(parent, child),
        }
    }

    /// Point the new node's ref at `target`, releasing the old node's ref
    /// when it is a different cell.
    fn rebind_ref(&self, old: &VNode, new: &VNode, target: RefTarget) {
        let unchanged = match (old.node_ref(), new.node_ref()) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            _ => false,
        };
        if unchanged {
            return;
        }
        if let Some(old_ref) = old.node_ref() {
            old_ref.clear();
        }
        if let Some(new_ref) = new.node_ref() {
            new_ref.set(target);
        }
    }
}

impl<H: HostTree + 'static> UpdateSink for Reconciler<H> {
    fn update_instance(
        &self,
        instance: &InstanceHandle,
        next_props: Option<Rc<Props>>,
    ) -> Result<()> {
        self.rerender_instance(instance, next_props)
    }
}
