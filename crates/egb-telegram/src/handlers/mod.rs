//! Telegram update handlers.
//!
//! Dispatch splits commands from plain text: `/`-prefixed messages go to the
//! command handlers, everything else runs through the forwarding path. The
//! mute gate lives in the command handler so forwarding keeps working while
//! the bot is quiet.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use crate::router::AppState;

mod commands;
mod text;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(body) = msg.text() else {
        return Ok(());
    };

    if body.starts_with('/') {
        return commands::handle_command(msg, state).await;
    }

    text::handle_text(msg, state).await
}
