mod class;
mod function;
mod instance;

pub use class::{Component, ComponentClass};
pub use function::{ForwardRef, FunctionComponent};
pub use instance::{ComponentInstance, InstanceHandle, Updater};

pub(crate) use instance::UpdateSink;
