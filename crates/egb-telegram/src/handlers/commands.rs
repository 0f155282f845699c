use std::sync::Arc;

use chrono::Local;
use teloxide::prelude::*;

use egb_core::{
    formatting::escape_html,
    messaging::types::{ChatId, MessageId, MessageRef, UserId},
    replies::{MUTE_REPLIES, PING_REPLIES, UNMUTE_REPLIES},
    schedule::{render_today_now, render_week},
    store::Elective,
    utils::format_duration,
};

use crate::router::AppState;

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

async fn reply(state: &AppState, to: MessageRef, html: &str) {
    if let Err(e) = state.messenger.reply_html(to, html).await {
        tracing::warn!("reply failed: {e}");
    }
}

const NOT_THE_BOSS: &str = "Only the boss can use this, so you don't abuse it 🐦";

fn help_text(bot_name: &str) -> String {
    format!(
        "Hello there, I'm <b>{}</b> 🐦\n\n\
I'm a bot created for <b>EPiC Devs 🏅🎓</b>\n\n\
Here are a few commands you can fiddle with:\n\n\
/ping - check if I'm available 🙋🏽‍♂️\n\
/classes - classes for the week\n\
/class - today's classes\n\
/uptime - how long I've been up\n\
/subscribe &lt;elective&gt; - class reminders for your elective\n\
/unsubscribe &lt;elective&gt; - stop those reminders\n\
/notifs on|off - toggle reminders for everyone (boss)\n\
/mute, /unmute - quiet mode (boss)",
        escape_html(bot_name)
    )
}

pub async fn handle_command(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(body) = msg.text() else {
        return Ok(());
    };

    let user_id = UserId(user.id.0 as i64);
    let mref = MessageRef {
        chat_id: ChatId(msg.chat.id.0),
        message_id: MessageId(msg.id.0),
    };
    let (cmd, arg) = parse_command(body);

    // While muted, the bot only listens for the unmute command.
    let muted = state.store.is_muted().await;
    if muted && !matches!(cmd.as_str(), "unmute" | "speak") {
        return Ok(());
    }

    match cmd.as_str() {
        "ping" => {
            reply(&state, mref, PING_REPLIES.pick()).await;
        }

        "start" | "help" => {
            reply(&state, mref, &help_text(&state.cfg.bot_name)).await;
        }

        "classes" => {
            reply(&state, mref, &render_week(&state.schedule)).await;
        }

        "class" => {
            reply(&state, mref, &render_today_now(&state.schedule)).await;
        }

        "mute" | "silence" => {
            if !state.store.is_admin(user_id).await {
                reply(&state, mref, NOT_THE_BOSS).await;
                return Ok(());
            }
            reply(&state, mref, MUTE_REPLIES.pick()).await;
            if let Err(e) = state.store.set_muted(true).await {
                tracing::warn!("mute persist failed: {e}");
            }
        }

        "unmute" | "speak" => {
            if !muted {
                reply(&state, mref, "Haven't been muted 🐦").await;
                return Ok(());
            }
            if !state.store.is_admin(user_id).await {
                return Ok(());
            }
            if let Err(e) = state.store.set_muted(false).await {
                tracing::warn!("unmute persist failed: {e}");
            }
            reply(&state, mref, UNMUTE_REPLIES.pick()).await;
        }

        "uptime" => {
            let secs = (Local::now() - state.started_at).num_seconds();
            let text = format!("🟢 <b>Uptime:</b> {}", format_duration(secs));
            reply(&state, mref, &text).await;
        }

        "notifs" => {
            if !state.store.is_admin(user_id).await {
                reply(&state, mref, NOT_THE_BOSS).await;
                return Ok(());
            }
            match arg.trim().to_lowercase().as_str() {
                "on" => {
                    if let Err(e) = state.store.set_notifs_on(true).await {
                        tracing::warn!("notifs persist failed: {e}");
                    }
                    reply(&state, mref, "🔔 Class reminders are ON").await;
                }
                "off" => {
                    if let Err(e) = state.store.set_notifs_on(false).await {
                        tracing::warn!("notifs persist failed: {e}");
                    }
                    reply(&state, mref, "🔕 Class reminders are OFF").await;
                }
                _ => {
                    let on = state.store.is_notifs_on().await;
                    let text = format!(
                        "Class reminders are {}. Use /notifs on|off to change.",
                        if on { "ON 🔔" } else { "OFF 🔕" }
                    );
                    reply(&state, mref, &text).await;
                }
            }
        }

        "subscribe" => {
            let Some(elective) = Elective::parse(&arg) else {
                reply(&state, mref, &elective_usage("subscribe")).await;
                return Ok(());
            };
            let text = match state.store.subscribe(elective, user_id).await {
                Ok(true) => format!("Subscribed to {} reminders ✅", elective.label()),
                Ok(false) => format!("You already subscribe to {} 🙂", elective.label()),
                Err(e) => {
                    tracing::warn!("subscribe persist failed: {e}");
                    "Couldn't save that, try again later 😬".to_string()
                }
            };
            reply(&state, mref, &text).await;
        }

        "unsubscribe" => {
            let Some(elective) = Elective::parse(&arg) else {
                reply(&state, mref, &elective_usage("unsubscribe")).await;
                return Ok(());
            };
            let text = match state.store.unsubscribe(elective, user_id).await {
                Ok(true) => format!("Unsubscribed from {} reminders 👋🏽", elective.label()),
                Ok(false) => format!("You weren't subscribed to {} 🤔", elective.label()),
                Err(e) => {
                    tracing::warn!("unsubscribe persist failed: {e}");
                    "Couldn't save that, try again later 😬".to_string()
                }
            };
            reply(&state, mref, &text).await;
        }

        "subscribers" => {
            if !state.store.is_admin(user_id).await {
                reply(&state, mref, NOT_THE_BOSS).await;
                return Ok(());
            }
            let mut lines = vec!["📋 <b>Reminder subscribers</b>".to_string()];
            for elective in Elective::ALL {
                let subs = state.store.subscribers(elective).await;
                lines.push(format!("   {}: {}", elective.label(), subs.len()));
            }
            reply(&state, mref, &lines.join("\n")).await;
        }

        "promote" | "demote" => {
            if !state.store.is_admin(user_id).await {
                reply(&state, mref, NOT_THE_BOSS).await;
                return Ok(());
            }
            let Ok(target) = arg.trim().parse::<i64>() else {
                reply(&state, mref, &format!("Usage: /{cmd} &lt;user id&gt;")).await;
                return Ok(());
            };
            let result = if cmd == "promote" {
                state.store.promote(UserId(target)).await
            } else {
                state.store.demote(UserId(target)).await
            };
            let text = match result {
                Err(e) => {
                    tracing::warn!("admin list persist failed: {e}");
                    "Couldn't save that, try again later 😬".to_string()
                }
                Ok(changed) => match (cmd.as_str(), changed) {
                    ("promote", true) => format!("{target} is now a boss 🎓"),
                    ("promote", false) => format!("{target} is already a boss 🙂"),
                    (_, true) => format!("{target} is no longer a boss 👋🏽"),
                    (_, false) => format!("{target} wasn't a boss 🤔"),
                },
            };
            reply(&state, mref, &text).await;
        }

        _ => {
            let text = format!("Unknown command: /{} 😗 Try /help", escape_html(&cmd));
            reply(&state, mref, &text).await;
        }
    }

    Ok(())
}

fn elective_usage(verb: &str) -> String {
    format!(
        "Usage: /{verb} &lt;elective&gt;\n\nElectives: data-mining, networking, soft-modelling"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_slash_and_bot_mention() {
        assert_eq!(
            parse_command("/class@ethereal_bot"),
            ("class".to_string(), String::new())
        );
        assert_eq!(
            parse_command("/subscribe networking"),
            ("subscribe".to_string(), "networking".to_string())
        );
    }

    #[test]
    fn command_is_lowercased_and_args_keep_case() {
        assert_eq!(
            parse_command("/Promote 42"),
            ("promote".to_string(), "42".to_string())
        );
    }

    #[test]
    fn help_text_escapes_angle_brackets() {
        let text = help_text("Ethereal");
        assert!(text.contains("&lt;elective&gt;"));
        assert!(!text.contains("<elective>"));
    }
}
