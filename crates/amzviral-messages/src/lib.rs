//! Promotional message rendering for WhatsApp and Telegram.
//!
//! Output is deterministic apart from the hook and closing phrases, which
//! are drawn from the caller's random source.

pub mod format;
pub mod phrases;
pub mod render;

pub use format::{affiliate_url, format_indian_number, format_inr};
pub use render::{render_messages, render_telegram, render_whatsapp, RenderedMessages};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    #[error("affiliate tag must not be empty")]
    EmptyAffiliateTag,
}
