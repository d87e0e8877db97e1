//! Outbound mail collaborator for password-reset codes.

use async_trait::async_trait;

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers `code` to `to`. Returns `false` when nothing was sent.
    async fn send_reset_code(&self, to: &str, code: &str) -> bool;
}

/// Used when no mail transport is configured; never delivers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send_reset_code(&self, to: &str, _code: &str) -> bool {
        tracing::warn!(to, "mail transport not configured; reset code not delivered");
        false
    }
}
