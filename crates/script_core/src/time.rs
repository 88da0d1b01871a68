//! Frame timing.

use crate::host::TimeHost;

/// Seconds elapsed during the last frame.
pub fn delta_time(host: &(impl TimeHost + ?Sized)) -> f32 {
    host.delta_time()
}

/// Seconds since the script runtime started.
pub fn time_since_start(host: &(impl TimeHost + ?Sized)) -> f32 {
    host.time_since_start()
}
