use super::instance::Updater;
use crate::vnode::{Props, VNode};
use smartstring::{LazyCompact, SmartString};
use std::fmt;
use std::rc::Rc;

/// Stateful component with lifecycle hooks.
///
/// Hooks take `&self`: an instance may ask its [`Updater`] for a synchronous
/// re-render from inside a hook or an event handler, so state lives in cells.
pub trait Component: 'static {
    fn render(&self, props: &Props) -> Option<VNode>;

    fn component_will_mount(&self, _props: &Props) {}

    fn component_did_mount(&self) {}

    fn component_will_receive_props(&self, _next_props: &Props) {}

    fn component_did_update(&self) {}

    fn component_will_unmount(&self) {}
}

type Constructor = dyn Fn(&Props, Updater) -> Box<dyn Component>;

/// Definition of a class component: a named constructor
#[derive(Clone)]
pub struct ComponentClass {
    name: SmartString<LazyCompact>,
    construct: Rc<Constructor>,
}

impl ComponentClass {
    pub fn new<F, C>(name: &str, construct: F) -> Self
    where
        F: Fn(&Props, Updater) -> C + 'static,
        C: Component,
    {
        Self {
            name: name.into(),
            construct: Rc::new(move |props, updater| -> Box<dyn Component> {
                Box::new(construct(props, updater))
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn construct(&self, props: &Props, updater: Updater) -> Box<dyn Component> {
        (self.construct)(props, updater)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.construct, &other.construct)
    }
}

impl fmt::Debug for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentClass({})", self.name)
    }
}
