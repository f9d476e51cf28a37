use poise::CreateReply;

use super::{Context, Error};

/// Starts (or restarts) the conversation with a fresh context
#[poise::command(slash_command)]
pub(super) async fn start(ctx: Context<'_>) -> Result<(), Error> {
    let author = ctx.author();
    ctx.data().store.reset(author.id).await;

    log::info!("user {} ({}) started the bot", author.id, author.name);

    let greeting = format!(
        "hey, {}!\n\n\
         i'm a chat assistant running on a local language model.\n\
         i remember our conversation, so follow-up questions just work.\n\n\
         commands:\n\
         `/help` shows usage\n\
         `/clear` wipes the conversation history",
        author.name
    );

    ctx.send(CreateReply::default().content(greeting)).await?;

    Ok(())
}
