use std::sync::Arc;

use regex::Regex;
use teloxide::prelude::*;

use egb_core::messaging::types::{ChatId, MessageId, MessageRef};

use crate::router::AppState;

/// Exclamation marks the group uses to tag lecturer announcements.
const ANNOUNCEMENT_MARKS: [char; 2] = ['❗', '‼'];

fn is_announcement(body: &str) -> bool {
    body.chars().any(|c| ANNOUNCEMENT_MARKS.contains(&c))
}

fn extract_link(body: &str) -> Option<&str> {
    let re = Regex::new(r"https?://\S+").expect("valid regex");
    re.find(body).map(|m| m.as_str())
}

/// Forward announcements and links from other chats into the group chat,
/// skipping anything already seen.
pub async fn handle_text(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(target) = state.cfg.forward_chat_id else {
        return Ok(());
    };
    let Some(body) = msg.text() else {
        return Ok(());
    };

    // Content from the group itself never bounces back.
    if msg.chat.id.0 == target {
        return Ok(());
    }

    let mref = MessageRef {
        chat_id: ChatId(msg.chat.id.0),
        message_id: MessageId(msg.id.0),
    };

    if is_announcement(body) {
        match state.store.record_announcement(body).await {
            Ok(true) => forward_to_group(&state, mref, target).await,
            Ok(false) => tracing::debug!("repeated announcement, not forwarding"),
            Err(e) => tracing::warn!("announcement log failed: {e}"),
        }
        return Ok(());
    }

    if body.to_lowercase().contains("https") {
        let Some(link) = extract_link(body) else {
            return Ok(());
        };
        match state.store.record_link(link).await {
            Ok(true) => forward_to_group(&state, mref, target).await,
            Ok(false) => tracing::debug!("repeated link, not forwarding"),
            Err(e) => tracing::warn!("link log failed: {e}"),
        }
    }

    Ok(())
}

async fn forward_to_group(state: &AppState, mref: MessageRef, target: i64) {
    if let Err(e) = state.messenger.forward(mref, ChatId(target)).await {
        tracing::warn!("forward failed: {e}");
    }
}
