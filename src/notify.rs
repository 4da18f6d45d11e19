//! Outbound replies and alerts. Delivery is best effort.

use crate::errors::AppResult;
use crate::models::breach::Breach;

/// Reply channel into a workspace.
pub trait Notifier: Send + Sync {
    fn deliver(&self, chat_id: i64, text: &str) -> AppResult<()>;
}

/// Prints each message to stdout, tagged with its workspace.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn deliver(&self, chat_id: i64, text: &str) -> AppResult<()> {
        println!("[chat {chat_id}] {text}");
        Ok(())
    }
}

/// One message per breach. A failed delivery is logged and skipped so the
/// rest of the batch still goes out. Returns how many were delivered.
pub fn dispatch_breaches(notifier: &dyn Notifier, breaches: &[Breach]) -> usize {
    let mut delivered = 0;
    for b in breaches {
        match notifier.deliver(b.chat_id, &b.message()) {
            Ok(()) => delivered += 1,
            Err(e) => {
                tracing::warn!(chat = b.chat_id, user = b.user_id, error = %e, "overtime alert not delivered");
            }
        }
    }
    delivered
}
