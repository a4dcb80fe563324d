mod registry;

pub use registry::EventRegistry;

use crate::host::HostId;
use smartstring::{LazyCompact, SmartString};
use std::rc::Rc;

/// Event delivered to a handler registered on a host node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEvent {
    pub target: HostId,
    pub name: SmartString<LazyCompact>,
}

pub type EventHandler = Rc<dyn Fn(&HostEvent)>;

/// Whether a prop name follows the `on` + capitalized event name pattern
pub fn is_event_prop(name: &str) -> bool {
    name.strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}
