use async_trait::async_trait;

use crate::{
    messaging::types::{ChatId, MessageRef},
    Result,
};

/// Cross-messenger port.
///
/// Telegram is the only implementation today; the shape leaves room for other
/// transports behind the same interface.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef>;

    /// Send `html` as a reply to an existing message.
    async fn reply_html(&self, to: MessageRef, html: &str) -> Result<MessageRef>;

    /// Forward an existing message into another chat.
    async fn forward(&self, msg: MessageRef, to: ChatId) -> Result<MessageRef>;
}
