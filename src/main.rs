use std::path::PathBuf;

use config::store::LocalMindConfig;
use utils::log::Logger;

mod bot;
mod chat;
mod config;
mod utils;

#[tokio::main]
async fn main() {
    Logger::init(None);

    let config = LocalMindConfig::read(PathBuf::from("config.toml")).unwrap();

    if config.discord.token.is_empty() {
        log::error!("discord token is not set, fill in config.toml and restart");
        return;
    }

    let bot = bot::ChatBot::new(config).await.unwrap();
    bot.run().await;
}
