use anyhow::Result;
use handler::Handler;
use serenity::{Client, all::GatewayIntents};

use crate::config::store::LocalMindConfig;

mod handler;

pub struct ChatBot {
    client: Client,
}

impl ChatBot {
    pub async fn new(config: LocalMindConfig) -> Result<Self> {
        let token = config.discord.token.clone();

        let (framework, data) = handler::framework::framework(config);
        let handler = Handler::new(data);

        let client = Client::builder(&token, GatewayIntents::all())
            .event_handler(handler)
            .framework(framework)
            .await?;

        Ok(Self { client })
    }

    pub async fn run(mut self) {
        if let Err(why) = self.client.start().await {
            log::error!("client error: {why:?}");
        }
    }
}
