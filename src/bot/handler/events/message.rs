use serenity::all::{Context, Message};

use super::super::Handler;

const DISCORD_MESSAGE_LIMIT: usize = 2000;

impl Handler {
    pub async fn on_message(&self, ctx: Context, msg: Message) {
        if msg.author.bot || msg.content.trim().is_empty() {
            return;
        }

        let preview: String = msg.content.chars().take(50).collect();
        log::info!(
            "user {} sent message: {preview} (history: {} messages)",
            msg.author.id,
            self.data.store.size(msg.author.id).await
        );

        let typing = ctx.http.start_typing(msg.channel_id);
        let result = self
            .data
            .engine
            .handle(msg.author.id, msg.content.clone())
            .await;
        typing.stop();

        let reply = match result {
            Ok(reply) => reply,
            Err(why) => {
                log::error!("turn failed for user {}: {why}", msg.author.id);
                why.user_message()
            }
        };

        for chunk in chunk_message(&reply) {
            if let Err(why) = msg.channel_id.say(&ctx.http, chunk).await {
                log::error!("error sending reply: {why:?}");
                return;
            }
        }
    }
}

// split on char boundaries, preferring line breaks, to fit the platform limit
fn chunk_message(content: &str) -> Vec<String> {
    if content.len() <= DISCORD_MESSAGE_LIMIT {
        return vec![content.to_string()];
    }

    let mut chunks = Vec::new();
    let mut rest = content;

    while rest.len() > DISCORD_MESSAGE_LIMIT {
        let mut end = DISCORD_MESSAGE_LIMIT;
        while !rest.is_char_boundary(end) {
            end -= 1;
        }

        let split = match rest[..end].rfind('\n') {
            Some(pos) if pos > 0 => pos + 1,
            _ => end,
        };

        chunks.push(rest[..split].to_string());
        rest = &rest[split..];
    }

    if !rest.is_empty() {
        chunks.push(rest.to_string());
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_messages_pass_through_whole() {
        assert_eq!(chunk_message("hi there"), vec!["hi there"]);
    }

    #[test]
    fn long_messages_split_below_the_limit() {
        let long = "word ".repeat(1000);
        let chunks = chunk_message(&long);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.len() <= DISCORD_MESSAGE_LIMIT));
        assert_eq!(chunks.concat(), long);
    }

    #[test]
    fn splits_prefer_line_breaks() {
        let long = format!("{}\n{}", "a".repeat(1500), "b".repeat(1500));
        let chunks = chunk_message(&long);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].ends_with('\n'));
        assert!(chunks[1].starts_with('b'));
    }

    #[test]
    fn never_splits_inside_a_character() {
        let long = "ё".repeat(1500);
        let chunks = chunk_message(&long);
        assert!(chunks.iter().all(|c| c.len() <= DISCORD_MESSAGE_LIMIT));
        assert_eq!(chunks.concat(), long);
    }
}
