use super::node_ref::NodeRef;
use super::props::{PropValue, Props};
use crate::component::{ComponentClass, ForwardRef, FunctionComponent};
use crate::events::HostEvent;
use smartstring::{LazyCompact, SmartString};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_VNODE_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a virtual node. Clones get their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VNodeId(u64);

impl VNodeId {
    fn next() -> Self {
        Self(NEXT_VNODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Identity hint for a child within one sibling list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Named(SmartString<LazyCompact>),
    Number(i64),
    /// Positional fallback for children without an explicit key
    Index(usize),
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Named(value.into())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Named(value.into())
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Number(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Number(value as i64)
    }
}

#[derive(Debug, Clone)]
pub enum VNodeKind {
    Text(String),
    Fragment,
    Element(SmartString<LazyCompact>),
    Function(FunctionComponent),
    Class(ComponentClass),
    ForwardRef(ForwardRef),
}

/// Declarative description of one node of the desired tree.
///
/// Run-time state (host node, rendered output, class instance) is never
/// stored here; the reconciler keeps it in mount records keyed by [`VNodeId`].
#[derive(Debug)]
pub struct VNode {
    id: VNodeId,
    kind: VNodeKind,
    props: Rc<Props>,
    key: Option<Key>,
    node_ref: Option<NodeRef>,
}

/// A clone is an independent description: it and every node beneath it get
/// fresh ids, so the same subtree can be mounted at several places at once.
impl Clone for VNode {
    fn clone(&self) -> Self {
        Self {
            id: VNodeId::next(),
            kind: self.kind.clone(),
            props: Rc::new(Props::clone(&self.props)),
            key: self.key.clone(),
            node_ref: self.node_ref.clone(),
        }
    }
}

impl VNode {
    fn new(kind: VNodeKind, props: Props) -> Self {
        Self {
            id: VNodeId::next(),
            kind,
            props: Rc::new(props),
            key: None,
            node_ref: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(VNodeKind::Text(content.into()), Props::new())
    }

    pub fn element(tag: &str) -> Self {
        Self::new(VNodeKind::Element(tag.into()), Props::new())
    }

    pub fn fragment(children: impl IntoIterator<Item = VNode>) -> Self {
        let props = Props::new().with_children(children.into_iter().collect::<Vec<_>>());
        Self::new(VNodeKind::Fragment, props)
    }

    pub fn function(component: &FunctionComponent, props: Props) -> Self {
        Self::new(VNodeKind::Function(component.clone()), props)
    }

    pub fn class(class: &ComponentClass, props: Props) -> Self {
        Self::new(VNodeKind::Class(class.clone()), props)
    }

    pub fn forward_ref(component: &ForwardRef, props: Props) -> Self {
        Self::new(VNodeKind::ForwardRef(component.clone()), props)
    }

    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_ref(mut self, node_ref: &NodeRef) -> Self {
        self.node_ref = Some(node_ref.clone());
        self
    }

    pub fn prop(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        Rc::make_mut(&mut self.props).set(name, value);
        self
    }

    pub fn style(mut self, name: &str, value: impl Into<String>) -> Self {
        Rc::make_mut(&mut self.props).set_style(name, value);
        self
    }

    /// Attach an event handler under an `on*` prop name such as `onClick`
    pub fn on<F>(self, name: &str, handler: F) -> Self
    where
        F: Fn(&HostEvent) + 'static,
    {
        self.prop(name, PropValue::handler(handler))
    }

    pub fn child(mut self, child: VNode) -> Self {
        Rc::make_mut(&mut self.props).children_mut().push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = VNode>) -> Self {
        Rc::make_mut(&mut self.props).set_children(children.into_iter().collect::<Vec<_>>());
        self
    }

    pub fn id(&self) -> VNodeId {
        self.id
    }

    pub fn kind(&self) -> &VNodeKind {
        &self.kind
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Second handle to this very node, keeping its id and props
    pub(crate) fn share(&self) -> VNode {
        Self {
            id: self.id,
            kind: self.kind.clone(),
            props: self.props.clone(),
            key: self.key.clone(),
            node_ref: self.node_ref.clone(),
        }
    }

    pub(crate) fn props_rc(&self) -> Rc<Props> {
        self.props.clone()
    }

    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    pub fn node_ref(&self) -> Option<&NodeRef> {
        self.node_ref.as_ref()
    }

    /// Literal content of a text node
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            VNodeKind::Text(content) => Some(content),
            _ => None,
        }
    }

    /// Whether `other` can update this node in place
    pub fn same_type(&self, other: &VNode) -> bool {
        match (&self.kind, &other.kind) {
            (VNodeKind::Text(_), VNodeKind::Text(_)) => true,
            (VNodeKind::Fragment, VNodeKind::Fragment) => true,
            (VNodeKind::Element(a), VNodeKind::Element(b)) => a == b,
            (VNodeKind::Function(a), VNodeKind::Function(b)) => a.ptr_eq(b),
            (VNodeKind::Class(a), VNodeKind::Class(b)) => a.ptr_eq(b),
            (VNodeKind::ForwardRef(a), VNodeKind::ForwardRef(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}
