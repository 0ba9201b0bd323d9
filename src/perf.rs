//! Lightweight performance instrumentation.
//!
//! Scopes are free when disabled. When enabled with `--perf`, each scope
//! reports its elapsed time on drop through `tracing`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Scope {
    /// Milliseconds since the scope was opened.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        tracing::debug!(target: "piecemeal::perf", scope = self.name, elapsed_ms = self.elapsed_ms(), "perf");
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_enabled_toggles_runtime_flag() {
        set_enabled(true);
        assert!(is_enabled());

        set_enabled(false);
        assert!(!is_enabled());
    }

    #[test]
    fn test_scope_measures_elapsed_time() {
        let scope = scope("test.scope");
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(scope.elapsed_ms() >= 1.0);
    }
}
