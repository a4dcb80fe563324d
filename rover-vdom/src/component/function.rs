use crate::vnode::{NodeRef, Props, VNode};
use smartstring::{LazyCompact, SmartString};
use std::fmt;
use std::rc::Rc;

type RenderFn = dyn Fn(&Props) -> Option<VNode>;
type ForwardRenderFn = dyn Fn(&Props, Option<&NodeRef>) -> Option<VNode>;

/// Pure render function from props to a virtual tree.
///
/// Two function nodes share a type only when they were built from clones
/// of the same `FunctionComponent`.
#[derive(Clone)]
pub struct FunctionComponent {
    name: SmartString<LazyCompact>,
    render: Rc<RenderFn>,
}

impl FunctionComponent {
    pub fn new<F>(name: &str, render: F) -> Self
    where
        F: Fn(&Props) -> Option<VNode> + 'static,
    {
        Self {
            name: name.into(),
            render: Rc::new(render),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, props: &Props) -> Option<VNode> {
        (self.render)(props)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.render, &other.render)
    }
}

impl fmt::Debug for FunctionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionComponent({})", self.name)
    }
}

/// Render function that also receives the ref of the node that uses it
#[derive(Clone)]
pub struct ForwardRef {
    name: SmartString<LazyCompact>,
    render: Rc<ForwardRenderFn>,
}

impl ForwardRef {
    pub fn new<F>(name: &str, render: F) -> Self
    where
        F: Fn(&Props, Option<&NodeRef>) -> Option<VNode> + 'static,
    {
        Self {
            name: name.into(),
            render: Rc::new(render),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, props: &Props, node_ref: Option<&NodeRef>) -> Option<VNode> {
        (self.render)(props, node_ref)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.render, &other.render)
    }
}

impl fmt::Debug for ForwardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ForwardRef({})", self.name)
    }
}
