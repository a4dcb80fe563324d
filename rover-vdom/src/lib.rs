pub mod component;
pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod reconciler;
pub mod root;
pub mod vnode;

// Re-export key types
pub use component::{
    Component, ComponentClass, ComponentInstance, ForwardRef, FunctionComponent, InstanceHandle,
    Updater,
};
pub use config::ReconcilerConfig;
pub use error::{ReconcileError, Result};
pub use events::{EventHandler, HostEvent};
pub use host::{HostId, HostTree, MemoryHost};
pub use reconciler::{Patch, Reconciler};
pub use root::Root;
pub use vnode::{Children, Key, NodeRef, PropValue, Props, RefTarget, VNode, VNodeKind};
