use std::time::Duration;

use dinesearch_core::AppConfig;

const DEFAULT_AUDIT_WINDOW: Duration = Duration::from_millis(1000);

/// Tuning for a [`crate::Coordinator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Quiet period after the last keystroke before a suggestion lookup fires.
    pub audit_window: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            audit_window: DEFAULT_AUDIT_WINDOW,
        }
    }
}

impl CoordinatorConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            audit_window: config.audit_window(),
        }
    }
}
