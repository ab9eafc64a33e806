//! Environment helpers for tests. Callers must run under `#[serial]`.

pub(crate) fn set_env(key: &str, value: &str) {
    // SAFETY: tests touching the environment run under #[serial]
    unsafe { std::env::set_var(key, value); }
}

pub(crate) fn remove_env(key: &str) {
    // SAFETY: tests touching the environment run under #[serial]
    unsafe { std::env::remove_var(key); }
}
