pub mod builders;
pub mod process;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Install a per-test log subscriber for library-level tests.
///
/// Output goes through the test writer, so it only shows up for failing
/// tests. The filter follows the binary's default of `warn`; raise it with
/// `RUST_LOG=mexec=debug` to see spawn and channel events.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}
