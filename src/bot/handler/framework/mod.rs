use std::sync::Arc;

use serenity::all::Framework;

use crate::{
    chat::{client::CompletionClient, engine::ChatEngine, store::ContextStore},
    config::store::LocalMindConfig,
};

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

mod clear;
mod help;
mod start;

pub struct InnerData {
    pub config: LocalMindConfig,
    pub store: Arc<ContextStore>,
    pub engine: ChatEngine,
}
pub type Data = Arc<InnerData>;

pub fn framework(config: LocalMindConfig) -> (impl Framework + 'static, Data) {
    let store = Arc::new(ContextStore::new(
        config.context.system_prompt.clone(),
        config.context.max_messages,
    ));
    let client = Arc::new(CompletionClient::new(&config.llm));
    let engine = ChatEngine::new(store.clone(), client);

    let data = Arc::new(InnerData {
        config,
        store,
        engine,
    });

    (
        poise::Framework::builder()
            .options(poise::FrameworkOptions {
                commands: vec![start::start(), help::help(), clear::clear()],
                ..Default::default()
            })
            .setup({
                let data = data.clone();
                move |ctx, _ready, framework| {
                    Box::pin({
                        async move {
                            poise::builtins::register_globally(ctx, &framework.options().commands)
                                .await?;
                            Ok(data)
                        }
                    })
                }
            })
            .build(),
        data,
    )
}
