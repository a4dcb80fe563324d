#![allow(dead_code)]

use rover_vdom::{HostId, HostTree, MemoryHost, Reconciler, ReconcilerConfig};
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

/// Route reconciler logs to the test output. `RUST_LOG` overrides the filter.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

/// Reconciler with patch journaling on a fresh memory host, plus a container
pub fn setup() -> (Rc<Reconciler<MemoryHost>>, HostId) {
    setup_with_host(MemoryHost::new())
}

pub fn setup_with_host(host: MemoryHost) -> (Rc<Reconciler<MemoryHost>>, HostId) {
    init_tracing();
    let config = ReconcilerConfig::default().with_patch_journal();
    let engine = Reconciler::with_config(host, config);
    let container = engine.host_mut().create_element("root");
    (engine, container)
}

/// Memory host mirroring its ops into a shared log
pub fn logged_setup() -> (Rc<Reconciler<MemoryHost>>, HostId, Rc<RefCell<Vec<String>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let (engine, container) = setup_with_host(MemoryHost::with_buffer(log.clone()));
    (engine, container, log)
}
