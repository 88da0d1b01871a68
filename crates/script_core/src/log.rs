//! Script logging.

use crate::host::LogHost;

/// Write `message` to the host's log at info level.
pub fn info(host: &(impl LogHost + ?Sized), message: &str) {
    host.log_info(message);
}
