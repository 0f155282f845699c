use std::sync::Arc;

use egb_core::{config::Config, messaging::types::UserId, store::BotStore};

#[tokio::main]
async fn main() -> Result<(), egb_core::Error> {
    egb_core::logging::init("egb")?;

    let cfg = Arc::new(Config::load()?);
    let store = Arc::new(BotStore::open(cfg.store_file.clone(), UserId(cfg.super_admin)).await?);

    egb_telegram::router::run_polling(cfg, store)
        .await
        .map_err(|e| egb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
