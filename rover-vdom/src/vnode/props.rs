use super::types::VNode;
use crate::events::{EventHandler, HostEvent};
use smartstring::{LazyCompact, SmartString};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

pub type PropName = SmartString<LazyCompact>;

/// Nested style bag, applied one property at a time
pub type Style = BTreeMap<PropName, String>;

/// Prop holding the nested style bag
pub const STYLE_PROP: &str = "style";

/// Reserved prop name; children are carried by [`Props::children`]
pub const CHILDREN_PROP: &str = "children";

/// A single prop value
#[derive(Clone)]
pub enum PropValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(SmartString<LazyCompact>),
    Style(Style),
    Handler(EventHandler),
}

impl PropValue {
    pub fn handler<F>(f: F) -> Self
    where
        F: Fn(&HostEvent) + 'static,
    {
        PropValue::Handler(Rc::new(f))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropValue::Null, PropValue::Null) => true,
            (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
            (PropValue::Int(a), PropValue::Int(b)) => a == b,
            (PropValue::Float(a), PropValue::Float(b)) => a == b,
            (PropValue::Str(a), PropValue::Str(b)) => a == b,
            (PropValue::Style(a), PropValue::Style(b)) => a == b,
            (PropValue::Handler(a), PropValue::Handler(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => write!(f, "Null"),
            PropValue::Bool(b) => write!(f, "Bool({b})"),
            PropValue::Int(i) => write!(f, "Int({i})"),
            PropValue::Float(x) => write!(f, "Float({x})"),
            PropValue::Str(s) => write!(f, "Str({s:?})"),
            PropValue::Style(style) => f.debug_tuple("Style").field(style).finish(),
            PropValue::Handler(_) => write!(f, "Handler(..)"),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.into())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value.into())
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Int(value as i64)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<Style> for PropValue {
    fn from(value: Style) -> Self {
        PropValue::Style(value)
    }
}

/// Child slot of a prop bag
#[derive(Debug, Clone, Default)]
pub enum Children {
    #[default]
    Empty,
    Single(Box<VNode>),
    List(Vec<VNode>),
}

impl Children {
    /// View the children as a sequence; a single child becomes a one-element slice
    pub fn as_slice(&self) -> &[VNode] {
        match self {
            Children::Empty => &[],
            Children::Single(child) => std::slice::from_ref(&**child),
            Children::List(children) => children,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn push(&mut self, child: VNode) {
        *self = match std::mem::take(self) {
            Children::Empty => Children::Single(Box::new(child)),
            Children::Single(first) => Children::List(vec![*first, child]),
            Children::List(mut list) => {
                list.push(child);
                Children::List(list)
            }
        };
    }
}

impl From<VNode> for Children {
    fn from(child: VNode) -> Self {
        Children::Single(Box::new(child))
    }
}

impl From<Vec<VNode>> for Children {
    fn from(children: Vec<VNode>) -> Self {
        Children::List(children)
    }
}

/// Prop bag of a virtual node
#[derive(Debug, Clone, Default)]
pub struct Props {
    values: BTreeMap<PropName, PropValue>,
    children: Children,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Props::set`]
    pub fn with(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn with_children(mut self, children: impl Into<Children>) -> Self {
        self.children = children.into();
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<PropValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropValue::as_str)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(PropValue::as_int)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn set_children(&mut self, children: impl Into<Children>) {
        self.children = children.into();
    }

    pub(crate) fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    /// Set one entry of the style bag, creating the bag on first use
    pub fn set_style(&mut self, name: &str, value: impl Into<String>) {
        let mut style = match self.values.get(STYLE_PROP) {
            Some(PropValue::Style(style)) => style.clone(),
            _ => Style::new(),
        };
        style.insert(name.into(), value.into());
        self.values.insert(STYLE_PROP.into(), PropValue::Style(style));
    }

    /// Number of props, not counting children
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
