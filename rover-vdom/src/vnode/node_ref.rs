use crate::component::InstanceHandle;
use crate::host::HostId;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// What a ref cell points at once its node is mounted
#[derive(Clone)]
pub enum RefTarget {
    Host(HostId),
    Instance(InstanceHandle),
}

impl fmt::Debug for RefTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefTarget::Host(id) => f.debug_tuple("Host").field(id).finish(),
            RefTarget::Instance(instance) => f.debug_tuple("Instance").field(&instance.name()).finish(),
        }
    }
}

#[derive(Default)]
struct RefSlot {
    current: RefCell<Option<RefTarget>>,
    version: Cell<u64>,
}

/// Caller-owned mutable cell written by the reconciler on mount,
/// update-in-place and unmount.
#[derive(Clone, Default)]
pub struct NodeRef(Rc<RefSlot>);

impl NodeRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, target: RefTarget) {
        *self.0.current.borrow_mut() = Some(target);
        self.bump();
    }

    pub fn clear(&self) {
        *self.0.current.borrow_mut() = None;
        self.bump();
    }

    pub fn get(&self) -> Option<RefTarget> {
        self.0.current.borrow().clone()
    }

    pub fn host(&self) -> Option<HostId> {
        match &*self.0.current.borrow() {
            Some(RefTarget::Host(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn instance(&self) -> Option<InstanceHandle> {
        match &*self.0.current.borrow() {
            Some(RefTarget::Instance(instance)) => Some(instance.clone()),
            _ => None,
        }
    }

    pub fn is_set(&self) -> bool {
        self.0.current.borrow().is_some()
    }

    /// Number of writes (sets and clears) so far
    pub fn version(&self) -> u64 {
        self.0.version.get()
    }

    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn bump(&self) {
        self.0.version.set(self.0.version.get().wrapping_add(1));
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("current", &*self.0.current.borrow())
            .field("version", &self.0.version.get())
            .finish()
    }
}
