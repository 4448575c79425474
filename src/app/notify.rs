/// Messages shown to the user synchronously
pub const EMPTY_LIKES_MESSAGE: &str = "Please like at least one book first";
pub const RECOMMENDATIONS_FAILED_MESSAGE: &str = "Failed to get recommendations. Please try again.";

/// One-shot user-facing notification (an alert box in a browser)
pub trait UserNotifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Notifier that only writes to the log, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl UserNotifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(message = %message, "User notification");
    }
}
