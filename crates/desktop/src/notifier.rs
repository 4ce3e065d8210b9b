//! Delivery of user-visible notices.

use crate::types::Notice;

/// Shows a blocking notice to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Notifier for headless runs: notices only reach the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        tracing::warn!(title = %notice.title, message = %notice.message, "user notice");
    }
}
