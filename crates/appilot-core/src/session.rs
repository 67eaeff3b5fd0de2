//! Session lifecycle: one driver session per test.
//!
//! [`start_session`] builds capabilities from the configuration, opens a
//! session on the configured server, and applies the implicit wait. Failures
//! here are fatal and propagate to the caller: a dead server means the run
//! should abort, not limp along.
//!
//! [`end_session`] is the mirror image and deliberately infallible: close
//! errors are logged and swallowed so that teardown can never mask the
//! test's actual outcome.
//!
//! Sessions are scoped to a single test and never reused; mobile UI
//! scenarios need a fresh app process between tests.

use tracing::{error, info, warn};

use crate::capabilities;
use crate::config::Config;
use crate::driver::{DriverError, MobileDriver};
use crate::remote::RemoteDriver;

/// Open a session for the configured platform and server.
pub async fn start_session(config: &Config) -> Result<RemoteDriver, DriverError> {
    info!(
        platform = %config.platform,
        provider = %config.cloud_provider,
        server = %config.server_url(),
        "creating driver session"
    );

    let caps = capabilities::for_platform(config);
    let driver = RemoteDriver::open(config.server_url(), &caps, config.command_timeout)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to create driver session");
            e
        })?;

    driver.set_implicit_wait(config.implicit_wait).await?;
    info!(session_id = %driver.session_id(), "driver session created");
    Ok(driver)
}

/// Close a session, best-effort.
pub async fn end_session(driver: RemoteDriver) {
    let session_id = driver.session_id().to_string();
    info!(session_id = %session_id, "closing driver session");
    match driver.quit().await {
        Ok(()) => info!(session_id = %session_id, "driver session closed"),
        Err(e) => warn!(session_id = %session_id, error = %e, "error while closing session"),
    }
}
