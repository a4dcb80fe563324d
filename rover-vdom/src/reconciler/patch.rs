use crate::host::HostId;
use crate::vnode::{VNode, VNodeId};

/// Keyed-list operation applied under `parent`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// A freshly mounted child inserted at `index`
    Placement {
        parent: HostId,
        index: usize,
        vnode: VNodeId,
    },
    /// A reused child detached and reinserted at `to`
    Move {
        parent: HostId,
        from: usize,
        to: usize,
        vnode: VNodeId,
    },
    /// An old child with no counterpart, unmounted
    Delete {
        parent: HostId,
        index: usize,
        vnode: VNodeId,
    },
}

impl Patch {
    pub fn vnode(&self) -> VNodeId {
        match self {
            Patch::Placement { vnode, .. } | Patch::Move { vnode, .. } | Patch::Delete { vnode, .. } => {
                *vnode
            }
        }
    }

    pub fn is_placement(&self) -> bool {
        matches!(self, Patch::Placement { .. })
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Patch::Move { .. })
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Patch::Delete { .. })
    }
}

/// Placement or move waiting for the detach phase to finish
pub(super) enum PendingOp<'a> {
    Place { index: usize, vnode: &'a VNode },
    Move { from: usize, to: usize, vnode: &'a VNode },
}
