use super::class::{Component, ComponentClass};
use crate::error::Result;
use crate::vnode::{Props, VNode, VNodeId};
use smartstring::{LazyCompact, SmartString};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::trace;

pub type InstanceHandle = Rc<ComponentInstance>;

/// Engine side of an [`Updater`]
pub(crate) trait UpdateSink {
    fn update_instance(&self, instance: &InstanceHandle, next_props: Option<Rc<Props>>)
    -> Result<()>;
}

/// Live class-component instance, owned by the mount record of its node
pub struct ComponentInstance {
    name: SmartString<LazyCompact>,
    component: Box<dyn Component>,
    props: RefCell<Rc<Props>>,
    rendered: RefCell<Option<VNode>>,
    updater: Updater,
}

impl ComponentInstance {
    pub(crate) fn instantiate(
        class: &ComponentClass,
        props: Rc<Props>,
        sink: Weak<dyn UpdateSink>,
    ) -> InstanceHandle {
        Rc::new_cyclic(|this| {
            let updater = Updater {
                sink,
                instance: this.clone(),
            };
            let component = class.construct(&props, updater.clone());
            Self {
                name: class.name().into(),
                component,
                props: RefCell::new(props),
                rendered: RefCell::new(None),
                updater,
            }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn props(&self) -> Rc<Props> {
        self.props.borrow().clone()
    }

    pub fn updater(&self) -> &Updater {
        &self.updater
    }

    /// Output of the last render, as a handle to the mounted node
    pub(crate) fn rendered(&self) -> Option<VNode> {
        self.rendered.borrow().as_ref().map(VNode::share)
    }

    pub(crate) fn component(&self) -> &dyn Component {
        self.component.as_ref()
    }

    pub(crate) fn rendered_id(&self) -> Option<VNodeId> {
        self.rendered.borrow().as_ref().map(VNode::id)
    }

    pub(crate) fn set_props(&self, props: Rc<Props>) {
        *self.props.borrow_mut() = props;
    }

    pub(crate) fn set_rendered(&self, rendered: Option<VNode>) {
        *self.rendered.borrow_mut() = rendered;
    }

    pub(crate) fn take_rendered(&self) -> Option<VNode> {
        self.rendered.borrow_mut().take()
    }

    pub(crate) fn render(&self) -> Option<VNode> {
        let props = self.props();
        self.component.render(&props)
    }
}

impl fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("name", &self.name)
            .field("rendered", &self.rendered_id())
            .finish()
    }
}

/// Handle given to each instance at construction to request a synchronous
/// re-render of itself. Holds no strong references.
#[derive(Clone)]
pub struct Updater {
    sink: Weak<dyn UpdateSink>,
    instance: Weak<ComponentInstance>,
}

impl Updater {
    /// Re-render the instance, optionally with new props, and reconcile its
    /// previous output against the new one before returning.
    pub fn emit_update(&self, next_props: Option<Props>) -> Result<()> {
        let (Some(sink), Some(instance)) = (self.sink.upgrade(), self.instance.upgrade()) else {
            trace!("update requested for a dropped instance or reconciler");
            return Ok(());
        };
        sink.update_instance(&instance, next_props.map(Rc::new))
    }

    /// Re-render with the current props
    pub fn force_update(&self) -> Result<()> {
        self.emit_update(None)
    }
}

impl fmt::Debug for Updater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Updater")
            .field("attached", &(self.sink.strong_count() > 0))
            .finish()
    }
}
