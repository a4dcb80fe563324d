mod node_ref;
mod props;
mod types;

pub use node_ref::{NodeRef, RefTarget};
pub use props::{Children, PropName, PropValue, Props, Style, CHILDREN_PROP, STYLE_PROP};
pub use types::{Key, VNode, VNodeId, VNodeKind};
