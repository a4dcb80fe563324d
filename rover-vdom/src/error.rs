use crate::host::HostId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("host node {0:?} does not exist")]
    UnknownHostNode(HostId),

    #[error("host node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: HostId, child: HostId },

    #[error("host node {0:?} cannot hold children")]
    NotAContainer(HostId),

    #[error("inserting {child:?} under {parent:?} would create a cycle")]
    HierarchyCycle { parent: HostId, child: HostId },

    #[error("invalid reconciler config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
