pub mod handler;
pub mod registry;
pub mod service;

/// the page served when none was requested, or when the requested one doesn't exist
pub static DEFAULT_PAGE: &str = "dashboard";

/// root directory holding one folder per admin page
#[cfg(not(test))]
pub fn pages_root() -> String {
    crate::config::DRIVE_SERVER_CONFIG.pages.root.clone()
}

/// test pages live in a directory unique to the current test thread,
/// same trick as the per-thread test databases
#[cfg(test)]
pub fn pages_root() -> String {
    format!("{}_pages", crate::test::current_thread_name())
}
