use crate::outcome::{Notice, Severity};
use tracing::{error, info, warn};

/// Receives a notice for every operation outcome. Rendering is up to the
/// implementation.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + 'static {
    fn notify(&self, notice: &Notice);
}

/// Writes notices to the log at the level matching their severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        let Notice {
            id, title, message, ..
        } = notice;
        match notice.severity {
            Severity::Success => info!(%id, %title, %message, "Notice"),
            Severity::Warning => warn!(%id, %title, %message, "Notice"),
            Severity::Error => error!(%id, %title, %message, "Notice"),
        }
    }
}
