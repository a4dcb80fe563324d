use super::{HostId, HostTree};
use crate::error::{ReconcileError, Result};
use crate::vnode::{PropName, PropValue, Style};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum HostNodeKind {
    Text(String),
    Element(PropName),
    Fragment,
}

#[derive(Debug)]
pub struct HostNode {
    pub kind: HostNodeKind,
    pub parent: Option<HostId>,
    pub children: Vec<HostId>,
    pub properties: BTreeMap<PropName, PropValue>,
    pub style: Style,
}

impl HostNode {
    fn new(kind: HostNodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            properties: BTreeMap::new(),
            style: Style::new(),
        }
    }
}

/// Mutation applied to a [`MemoryHost`]
#[derive(Debug, Clone, PartialEq)]
pub enum HostOp {
    CreateText { node: HostId },
    CreateElement { node: HostId, tag: PropName },
    CreateFragment { node: HostId },
    SetText { node: HostId, content: String },
    SetProperty { node: HostId, name: PropName },
    SetStyle { node: HostId, name: PropName },
    Insert { parent: HostId, child: HostId, before: Option<HostId> },
    Remove { parent: HostId, child: HostId },
    Release { node: HostId },
}

impl HostOp {
    /// Whether the op changes the shape of the tree
    pub fn is_structural(&self) -> bool {
        matches!(self, HostOp::Insert { .. } | HostOp::Remove { .. })
    }
}

/// Host tree kept entirely in memory.
///
/// Every mutation is journaled as a [`HostOp`] and optionally mirrored as a
/// text line into a shared log buffer. Freed slots are not reused, so a
/// [`HostId`] never names two different nodes.
pub struct MemoryHost {
    nodes: Vec<Option<HostNode>>,
    ops: Vec<HostOp>,
    log_buffer: Option<Rc<RefCell<Vec<String>>>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            ops: Vec::new(),
            log_buffer: None,
        }
    }

    /// Create a MemoryHost that also writes each mutation to `buffer`
    pub fn with_buffer(buffer: Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            log_buffer: Some(buffer),
            ..Self::new()
        }
    }

    pub fn node(&self, id: HostId) -> Option<&HostNode> {
        self.nodes.get(id.0 as usize).and_then(|n| n.as_ref())
    }

    pub fn is_live(&self, id: HostId) -> bool {
        self.node(id).is_some()
    }

    /// Number of nodes that have not been released
    pub fn live_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn text(&self, id: HostId) -> Option<&str> {
        match &self.node(id)?.kind {
            HostNodeKind::Text(content) => Some(content),
            _ => None,
        }
    }

    pub fn tag(&self, id: HostId) -> Option<&str> {
        match &self.node(id)?.kind {
            HostNodeKind::Element(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn property(&self, id: HostId, name: &str) -> Option<&PropValue> {
        self.node(id)?.properties.get(name)
    }

    pub fn style(&self, id: HostId, name: &str) -> Option<&str> {
        self.node(id)?.style.get(name).map(String::as_str)
    }

    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<HostOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Serialize the subtree under `id` as markup; fragments contribute
    /// only their children and handler props are omitted.
    pub fn to_markup(&self, id: HostId) -> String {
        let mut out = String::new();
        self.write_markup(id, &mut out);
        out
    }

    /// Markup of the children of `id`, without `id` itself
    pub fn inner_markup(&self, id: HostId) -> String {
        let mut out = String::new();
        if let Some(node) = self.node(id) {
            for &child in &node.children {
                self.write_markup(child, &mut out);
            }
        }
        out
    }

    fn write_markup(&self, id: HostId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.kind {
            HostNodeKind::Text(content) => out.push_str(content),
            HostNodeKind::Fragment => {
                for &child in &node.children {
                    self.write_markup(child, out);
                }
            }
            HostNodeKind::Element(tag) => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in &node.properties {
                    let rendered = match value {
                        PropValue::Handler(_) | PropValue::Style(_) | PropValue::Null => continue,
                        PropValue::Bool(b) => b.to_string(),
                        PropValue::Int(i) => i.to_string(),
                        PropValue::Float(x) => x.to_string(),
                        PropValue::Str(s) => s.to_string(),
                    };
                    let _ = write!(out, " {}=\"{}\"", name, rendered);
                }
                if !node.style.is_empty() {
                    let style: Vec<String> = node
                        .style
                        .iter()
                        .map(|(name, value)| format!("{}:{}", name, value))
                        .collect();
                    let _ = write!(out, " style=\"{}\"", style.join(";"));
                }
                out.push('>');
                for &child in &node.children {
                    self.write_markup(child, out);
                }
                let _ = write!(out, "</{}>", tag);
            }
        }
    }

    fn alloc(&mut self, kind: HostNodeKind) -> HostId {
        let id = HostId(self.nodes.len() as u32);
        self.nodes.push(Some(HostNode::new(kind)));
        id
    }

    fn node_mut(&mut self, id: HostId) -> Result<&mut HostNode> {
        self.nodes
            .get_mut(id.0 as usize)
            .and_then(|n| n.as_mut())
            .ok_or(ReconcileError::UnknownHostNode(id))
    }

    fn require(&self, id: HostId) -> Result<&HostNode> {
        self.node(id).ok_or(ReconcileError::UnknownHostNode(id))
    }

    fn require_container(&self, id: HostId) -> Result<()> {
        match self.require(id)?.kind {
            HostNodeKind::Text(_) => Err(ReconcileError::NotAContainer(id)),
            _ => Ok(()),
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    fn is_ancestor(&self, ancestor: HostId, node: HostId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    fn check_insert(&self, parent: HostId, child: HostId) -> Result<()> {
        self.require_container(parent)?;
        self.require(child)?;
        if self.is_ancestor(child, parent) {
            return Err(ReconcileError::HierarchyCycle { parent, child });
        }
        Ok(())
    }

    fn detach(&mut self, child: HostId) -> Result<Option<HostId>> {
        let Some(parent) = self.node_mut(child)?.parent.take() else {
            return Ok(None);
        };
        self.node_mut(parent)?.children.retain(|&id| id != child);
        Ok(Some(parent))
    }

    fn record(&mut self, op: HostOp) {
        if let Some(buffer) = &self.log_buffer {
            buffer.borrow_mut().push(format!("host: {:?}", op));
        }
        self.ops.push(op);
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostTree for MemoryHost {
    fn create_text(&mut self, content: &str) -> HostId {
        let node = self.alloc(HostNodeKind::Text(content.to_string()));
        self.record(HostOp::CreateText { node });
        node
    }

    fn create_element(&mut self, tag: &str) -> HostId {
        let node = self.alloc(HostNodeKind::Element(tag.into()));
        self.record(HostOp::CreateElement {
            node,
            tag: tag.into(),
        });
        node
    }

    fn create_fragment(&mut self) -> HostId {
        let node = self.alloc(HostNodeKind::Fragment);
        self.record(HostOp::CreateFragment { node });
        node
    }

    fn set_text(&mut self, node: HostId, content: &str) -> Result<()> {
        match &mut self.node_mut(node)?.kind {
            HostNodeKind::Text(current) => {
                *current = content.to_string();
            }
            _ => return Err(ReconcileError::NotAContainer(node)),
        }
        self.record(HostOp::SetText {
            node,
            content: content.to_string(),
        });
        Ok(())
    }

    fn set_property(&mut self, node: HostId, name: &str, value: &PropValue) -> Result<()> {
        self.node_mut(node)?
            .properties
            .insert(name.into(), value.clone());
        self.record(HostOp::SetProperty {
            node,
            name: name.into(),
        });
        Ok(())
    }

    fn set_style(&mut self, node: HostId, name: &str, value: &str) -> Result<()> {
        self.node_mut(node)?
            .style
            .insert(name.into(), value.to_string());
        self.record(HostOp::SetStyle {
            node,
            name: name.into(),
        });
        Ok(())
    }

    fn insert_before(&mut self, parent: HostId, child: HostId, reference: HostId) -> Result<()> {
        self.check_insert(parent, child)?;
        if self.require(reference)?.parent != Some(parent) {
            return Err(ReconcileError::NotAChild {
                parent,
                child: reference,
            });
        }
        if child == reference {
            return Ok(());
        }
        self.detach(child)?;
        let siblings = &mut self.node_mut(parent)?.children;
        let position = siblings
            .iter()
            .position(|&id| id == reference)
            .unwrap_or(siblings.len());
        siblings.insert(position, child);
        self.node_mut(child)?.parent = Some(parent);
        self.record(HostOp::Insert {
            parent,
            child,
            before: Some(reference),
        });
        Ok(())
    }

    fn append_child(&mut self, parent: HostId, child: HostId) -> Result<()> {
        self.check_insert(parent, child)?;
        self.detach(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        self.record(HostOp::Insert {
            parent,
            child,
            before: None,
        });
        Ok(())
    }

    fn remove(&mut self, node: HostId) -> Result<()> {
        if let Some(parent) = self.detach(node)? {
            self.record(HostOp::Remove {
                parent,
                child: node,
            });
        }
        Ok(())
    }

    fn release(&mut self, node: HostId) -> Result<()> {
        self.remove(node)?;
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(freed) = self.nodes.get_mut(id.0 as usize).and_then(Option::take) {
                stack.extend(freed.children);
            }
        }
        self.record(HostOp::Release { node });
        Ok(())
    }

    fn parent(&self, node: HostId) -> Option<HostId> {
        self.node(node)?.parent
    }

    fn children(&self, node: HostId) -> Result<Vec<HostId>> {
        Ok(self.require(node)?.children.clone())
    }

    fn child_at(&self, parent: HostId, index: usize) -> Result<Option<HostId>> {
        Ok(self.require(parent)?.children.get(index).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_markup() {
        let mut host = MemoryHost::new();
        let div = host.create_element("div");
        let text = host.create_text("Hello");
        host.set_property(div, "id", &PropValue::from("greeting")).unwrap();
        host.set_style(div, "color", "red").unwrap();
        host.append_child(div, text).unwrap();

        assert_eq!(
            host.to_markup(div),
            "<div id=\"greeting\" style=\"color:red\">Hello</div>"
        );
        assert_eq!(host.parent(text), Some(div));
    }

    #[test]
    fn test_insert_before_moves_existing_child() {
        let mut host = MemoryHost::new();
        let list = host.create_element("ul");
        let a = host.create_text("a");
        let b = host.create_text("b");
        let c = host.create_text("c");
        for id in [a, b, c] {
            host.append_child(list, id).unwrap();
        }

        host.insert_before(list, c, a).unwrap();

        assert_eq!(host.children(list).unwrap(), vec![c, a, b]);
        assert_eq!(host.inner_markup(list), "cab");
    }

    #[test]
    fn test_insert_before_requires_reference_child() {
        let mut host = MemoryHost::new();
        let list = host.create_element("ul");
        let stray = host.create_text("stray");
        let child = host.create_text("child");

        let err = host.insert_before(list, child, stray).unwrap_err();
        assert!(matches!(err, ReconcileError::NotAChild { .. }));
    }

    #[test]
    fn test_text_nodes_cannot_hold_children() {
        let mut host = MemoryHost::new();
        let text = host.create_text("leaf");
        let other = host.create_text("other");

        let err = host.append_child(text, other).unwrap_err();
        assert!(matches!(err, ReconcileError::NotAContainer(_)));
    }

    #[test]
    fn test_cycle_is_rejected() {
        let mut host = MemoryHost::new();
        let outer = host.create_element("div");
        let inner = host.create_element("div");
        host.append_child(outer, inner).unwrap();

        let err = host.append_child(inner, outer).unwrap_err();
        assert!(matches!(err, ReconcileError::HierarchyCycle { .. }));
    }

    #[test]
    fn test_remove_detached_node_is_a_no_op() {
        let mut host = MemoryHost::new();
        let text = host.create_text("loose");
        host.clear_ops();

        host.remove(text).unwrap();
        assert!(host.ops().is_empty());
    }

    #[test]
    fn test_release_frees_subtree_without_reusing_ids() {
        let mut host = MemoryHost::new();
        let root = host.create_element("div");
        let branch = host.create_element("p");
        let leaf = host.create_text("leaf");
        host.append_child(root, branch).unwrap();
        host.append_child(branch, leaf).unwrap();

        host.release(branch).unwrap();

        assert!(!host.is_live(branch));
        assert!(!host.is_live(leaf));
        assert!(host.children(root).unwrap().is_empty());

        let fresh = host.create_text("fresh");
        assert_ne!(fresh, branch);
        assert_ne!(fresh, leaf);
        assert_eq!(host.live_count(), 2);
    }

    #[test]
    fn test_fragment_markup_is_transparent() {
        let mut host = MemoryHost::new();
        let div = host.create_element("div");
        let fragment = host.create_fragment();
        let a = host.create_text("a");
        let b = host.create_text("b");
        host.append_child(fragment, a).unwrap();
        host.append_child(fragment, b).unwrap();
        host.append_child(div, fragment).unwrap();

        assert_eq!(host.to_markup(div), "<div>ab</div>");
    }

    #[test]
    fn test_log_buffer_mirrors_ops() {
        let buffer = Rc::new(RefCell::new(Vec::new()));
        let mut host = MemoryHost::with_buffer(buffer.clone());
        let div = host.create_element("div");
        let text = host.create_text("x");
        host.append_child(div, text).unwrap();

        let log = buffer.borrow();
        assert_eq!(log.len(), 3);
        assert!(log[2].contains("Insert"));
    }

    #[test]
    fn test_next_sibling() {
        let mut host = MemoryHost::new();
        let div = host.create_element("div");
        let a = host.create_text("a");
        let b = host.create_text("b");
        host.append_child(div, a).unwrap();
        host.append_child(div, b).unwrap();

        assert_eq!(host.next_sibling(a), Some(b));
        assert_eq!(host.next_sibling(b), None);
        assert_eq!(host.next_sibling(div), None);
    }
}
