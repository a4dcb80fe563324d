use super::EventHandler;
use crate::host::HostId;
use smartstring::{LazyCompact, SmartString};
use std::collections::HashMap;

/// Handlers bound to host nodes, keyed by lower-cased event name
pub struct EventRegistry {
    handlers: HashMap<(HostId, SmartString<LazyCompact>), EventHandler>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Bind `handler` to `node`, replacing any handler already bound to the same event
    pub fn register_handler(&mut self, node: HostId, event: &str, handler: EventHandler) {
        self.handlers.insert((node, event.into()), handler);
    }

    pub fn handler(&self, node: HostId, event: &str) -> Option<EventHandler> {
        self.handlers.get(&(node, SmartString::<LazyCompact>::from(event))).cloned()
    }

    pub fn unbind_node(&mut self, node: HostId) {
        self.handlers.retain(|(n, _), _| *n != node);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}
