use super::Reconciler;
use crate::error::Result;
use crate::events::is_event_prop;
use crate::host::{HostId, HostTree};
use crate::vnode::{CHILDREN_PROP, PropValue, Props, STYLE_PROP};
use tracing::warn;

impl<H: HostTree + 'static> Reconciler<H> {
    /// Write `new` onto `host`.
    ///
    /// Props present in `_old` but absent from `new` stay on the host node,
    /// and style entries missing from a new style bag are not reset.
    pub(crate) fn apply_props(&self, host: HostId, _old: Option<&Props>, new: &Props) -> Result<()> {
        for (name, value) in new.iter() {
            if name == CHILDREN_PROP {
                continue;
            }
            match value {
                PropValue::Style(style) if name == STYLE_PROP => {
                    let mut tree = self.host.borrow_mut();
                    for (property, value) in style {
                        tree.set_style(host, property, value)?;
                    }
                }
                PropValue::Handler(handler) if is_event_prop(name) => {
                    self.events
                        .borrow_mut()
                        .register_handler(host, &name.to_lowercase(), handler.clone());
                }
                _ if is_event_prop(name) => {
                    warn!(prop = name, ?host, "event prop without a handler ignored");
                }
                _ => self.host.borrow_mut().set_property(host, name, value)?,
            }
        }
        Ok(())
    }
}
