use poise::CreateReply;

use super::{Context, Error};

/// Clears the conversation history, keeping only the system directive
#[poise::command(slash_command)]
pub(super) async fn clear(ctx: Context<'_>) -> Result<(), Error> {
    let author = ctx.author();
    let removed = ctx.data().store.reset(author.id).await;

    log::info!("user {} cleared context ({removed} messages removed)", author.id);

    ctx.send(
        CreateReply::default()
            .content(format!(
                "cleared the conversation history, {removed} messages removed. \
                 i've forgotten everything we talked about, let's start fresh!"
            ))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
