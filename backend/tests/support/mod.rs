//! Helpers shared by integration tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV: Mutex<()> = Mutex::new(());

/// Environment overrides for one test, undone on drop.
///
/// The guard holds a process-wide lock, so tests that touch the environment
/// run one at a time. Previous values come back even if the test panics.
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    /// `Some(value)` sets a variable, `None` removes it.
    pub fn set(vars: &[(&'static str, Option<&str>)]) -> Self {
        let lock = ENV.lock().unwrap_or_else(PoisonError::into_inner);

        let mut saved: Vec<(&'static str, Option<String>)> = Vec::with_capacity(vars.len());
        for &(key, value) in vars {
            if !saved.iter().any(|(seen, _)| *seen == key) {
                saved.push((key, std::env::var(key).ok()));
            }
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }

        Self { saved, _lock: lock }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}
