//! Wall-clock time sources

use crate::sim::{TimeSource, Timestamp};

/// Realtime clock backed by `SystemTime`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

#[cfg(not(target_arch = "wasm32"))]
impl TimeSource for SystemTimeSource {
    fn now(&mut self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};

        // A clock set before 1970 reads as the epoch; deltas saturate anyway
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp::new(since_epoch.as_secs(), since_epoch.subsec_nanos())
    }
}

/// Browser clock (`Date.now()`, millisecond resolution)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DateNowSource;

#[cfg(target_arch = "wasm32")]
impl TimeSource for DateNowSource {
    fn now(&mut self) -> Timestamp {
        Timestamp::from_millis_f64(js_sys::Date::now())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformTimeSource = SystemTimeSource;

#[cfg(target_arch = "wasm32")]
pub type PlatformTimeSource = DateNowSource;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_system_time_is_after_epoch() {
        let mut source = SystemTimeSource;
        let a = source.now();
        let b = source.now();
        assert!(a.secs() > 0);
        assert!(b.elapsed_since(a).secs() < 60);
    }
}
