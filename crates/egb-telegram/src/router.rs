use std::sync::Arc;

use chrono::{DateTime, Local};
use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use egb_core::{
    config::Config, messaging::port::MessagingPort, notify::ClassReminder,
    schedule::WeeklySchedule, store::BotStore,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub store: Arc<BotStore>,
    pub schedule: Arc<WeeklySchedule>,
    pub messenger: Arc<dyn MessagingPort>,
    pub started_at: DateTime<Local>,
}

pub async fn run_polling(cfg: Arc<Config>, store: Arc<BotStore>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        tracing::info!("{} is ready: @{}", cfg.bot_name, me.username());
    }
    match cfg.forward_chat_id {
        Some(id) => tracing::info!("forwarding announcements/links to chat {id}"),
        None => tracing::info!("FORWARD_CHAT_ID not set, forwarding disabled"),
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let schedule = Arc::new(WeeklySchedule::default_timetable());

    let reminder = ClassReminder::new(
        cfg.clone(),
        store.clone(),
        schedule.clone(),
        messenger.clone(),
    );
    reminder.start().await;

    let state = Arc::new(AppState {
        cfg,
        store,
        schedule,
        messenger,
        started_at: Local::now(),
    });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    reminder.stop().await;
    Ok(())
}
