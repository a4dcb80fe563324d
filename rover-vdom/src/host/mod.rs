mod memory;

pub use memory::{HostNode, HostNodeKind, HostOp, MemoryHost};

use crate::error::Result;
use crate::vnode::PropValue;

/// Handle to a node of the live host tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostId(pub(crate) u32);

impl HostId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Tree primitives provided by the hosting environment.
///
/// The reconciler only calls these; it never inspects host nodes directly.
pub trait HostTree {
    fn create_text(&mut self, content: &str) -> HostId;

    fn create_element(&mut self, tag: &str) -> HostId;

    /// Grouping container with no visual identity of its own
    fn create_fragment(&mut self) -> HostId;

    fn set_text(&mut self, node: HostId, content: &str) -> Result<()>;

    fn set_property(&mut self, node: HostId, name: &str, value: &PropValue) -> Result<()>;

    fn set_style(&mut self, node: HostId, name: &str, value: &str) -> Result<()>;

    /// Insert `child` right before `reference`, detaching it from any previous parent
    fn insert_before(&mut self, parent: HostId, child: HostId, reference: HostId) -> Result<()>;

    /// Append `child` as the last child of `parent`, detaching it first
    fn append_child(&mut self, parent: HostId, child: HostId) -> Result<()>;

    /// Detach `node` from its parent. Already detached nodes are left alone.
    fn remove(&mut self, node: HostId) -> Result<()>;

    /// Detach `node` and free it together with whatever is still beneath it
    fn release(&mut self, node: HostId) -> Result<()>;

    fn parent(&self, node: HostId) -> Option<HostId>;

    /// Current children of `node`, in order
    fn children(&self, node: HostId) -> Result<Vec<HostId>>;

    fn child_at(&self, parent: HostId, index: usize) -> Result<Option<HostId>> {
        Ok(self.children(parent)?.get(index).copied())
    }

    fn next_sibling(&self, node: HostId) -> Option<HostId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent).ok()?;
        let position = siblings.iter().position(|&id| id == node)?;
        siblings.get(position + 1).copied()
    }
}
