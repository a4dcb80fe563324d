use crate::component::InstanceHandle;
use crate::host::HostId;
use crate::vnode::{VNode, VNodeId};
use std::collections::HashMap;

/// Run-time state the reconciler attaches to a mounted virtual node
#[derive(Debug, Default)]
pub struct MountRecord {
    /// Materialized host node, for text, fragment and element nodes only
    pub host: Option<HostId>,
    /// Last output of a function or forward-ref component
    pub rendered: Option<VNode>,
    /// Live class-component instance
    pub instance: Option<InstanceHandle>,
    /// Position within the sibling list at last mount or update
    pub mount_index: usize,
}

impl MountRecord {
    /// Node to follow when this record owns no host node
    pub fn rendered_id(&self) -> Option<VNodeId> {
        match &self.instance {
            Some(instance) => instance.rendered_id(),
            None => self.rendered.as_ref().map(VNode::id),
        }
    }
}

/// Side map from virtual node identity to its mount record
pub struct MountRecords {
    records: HashMap<VNodeId, MountRecord>,
}

impl MountRecords {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    pub fn get(&self, id: VNodeId) -> Option<&MountRecord> {
        self.records.get(&id)
    }

    /// Record for `id`, created empty on first access
    pub fn entry(&mut self, id: VNodeId) -> &mut MountRecord {
        self.records.entry(id).or_default()
    }

    pub fn remove(&mut self, id: VNodeId) -> Option<MountRecord> {
        self.records.remove(&id)
    }

    /// Move the record of `from` over to `to`, replacing whatever `to` had
    pub fn transfer(&mut self, from: VNodeId, to: VNodeId) -> Option<&mut MountRecord> {
        let record = self.records.remove(&from)?;
        self.records.insert(to, record);
        self.records.get_mut(&to)
    }

    pub fn mount_index(&self, id: VNodeId) -> Option<usize> {
        self.get(id).map(|r| r.mount_index)
    }

    pub fn contains(&self, id: VNodeId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

impl Default for MountRecords {
    fn default() -> Self {
        Self::new()
    }
}
