pub mod builders;
pub mod logs;
pub mod recording;

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Install a process-wide subscriber for tests, once.
///
/// Output goes through the test writer, so it only shows for failing tests
/// or with `--nocapture`. `DEVRELOAD_LOG` selects the filter, default `warn`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("DEVRELOAD_LOG")
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init();
    });
}
