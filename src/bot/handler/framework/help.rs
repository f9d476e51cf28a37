use poise::CreateReply;

use super::{Context, Error};

/// Shows what the bot does and which commands exist
#[poise::command(slash_command)]
pub(super) async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let model = ctx.data().config.llm.model.clone();

    let help_text = format!(
        "i relay your messages to a local language model (`{model}`) and keep \
         the recent history of our conversation, so related questions can build \
         on each other.\n\n\
         **commands**\n\
         `/start` begins (or restarts) the conversation\n\
         `/help` shows this text\n\
         `/clear` wipes the conversation history\n\n\
         **using the context**\n\
         ask a few related questions in a row, for example about a programming \
         language and then \"what are its advantages?\", and the follow-ups are \
         understood in context. use `/clear` to switch to a fresh topic."
    );

    ctx.send(CreateReply::default().content(help_text).ephemeral(true))
        .await?;

    Ok(())
}
