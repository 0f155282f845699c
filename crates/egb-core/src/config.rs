use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{errors::Error, Result};

/// Typed configuration for the bot.
///
/// Everything comes from the environment (with an optional `.env` file), the
/// same way the bot has always been deployed.
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub super_admin: i64,
    /// Chat that announcements/links from other chats get forwarded into.
    pub forward_chat_id: Option<i64>,
    pub bot_name: String,
    pub store_file: PathBuf,

    // Class reminders
    pub reminder_enabled: bool,
    pub reminder_lead_minutes: u32,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let super_admin = env_i64("SUPER_ADMIN").ok_or_else(|| {
            Error::Config(
                "SUPER_ADMIN environment variable is required (numeric user id)".to_string(),
            )
        })?;

        let forward_chat_id = env_i64("FORWARD_CHAT_ID");

        let bot_name = env_str("BOT_NAME")
            .and_then(non_empty)
            .unwrap_or_else(|| "Ethereal".to_string());

        let store_file =
            PathBuf::from(env_str("STORE_FILE").unwrap_or("/tmp/egb-store.json".to_string()));

        let reminder_enabled = env_bool("REMINDER_ENABLED").unwrap_or(true);
        let reminder_lead_minutes = env_u32("REMINDER_LEAD_MINUTES")
            .unwrap_or(30)
            .clamp(1, 12 * 60);

        Ok(Self {
            bot_token,
            super_admin,
            forward_chat_id,
            bot_name,
            store_file,
            reminder_enabled,
            reminder_lead_minutes,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    env_str(key).map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_i64(key: &str) -> Option<i64> {
    env_str(key).and_then(|s| s.trim().parse::<i64>().ok())
}

fn env_u32(key: &str) -> Option<u32> {
    env_str(key).and_then(|s| s.trim().parse::<u32>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
