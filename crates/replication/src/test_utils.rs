use std::net::IpAddr;
use std::sync::Arc;

use corelib::Host;

pub(crate) fn setup_tracing() {
    let _ = tracing_subscriber::fmt::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(tracing_subscriber::fmt::TestWriter::new())
        .try_init();
}

/// Host `10.0.0.<last>` without placement labels.
pub(crate) fn host(last: u8) -> Arc<Host> {
    Arc::new(Host::new(IpAddr::from([10, 0, 0, last])))
}
