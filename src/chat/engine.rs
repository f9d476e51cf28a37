use std::sync::Arc;

use serenity::all::UserId;
use thiserror::Error;

use super::client::{CompletionBackend, CompletionError};
use super::context::ChatMessage;
use super::store::ContextStore;

// longest cause summary we are willing to show a user
const ERROR_SUMMARY_MAX: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnErrorKind {
    BackendUnreachable,
    BackendError,
    Timeout,
}

#[derive(Debug, Error)]
#[error("{summary}")]
pub struct TurnError {
    kind: TurnErrorKind,
    summary: String,
}

impl TurnError {
    fn from_completion(error: CompletionError) -> Self {
        let kind = match &error {
            CompletionError::Unreachable(_) => TurnErrorKind::BackendUnreachable,
            CompletionError::Timeout => TurnErrorKind::Timeout,
            CompletionError::Api { .. } | CompletionError::Malformed(_) => {
                TurnErrorKind::BackendError
            }
        };

        Self {
            kind,
            summary: truncate(error.to_string()),
        }
    }

    pub fn kind(&self) -> TurnErrorKind {
        self.kind
    }

    pub fn user_message(&self) -> String {
        let hint = match self.kind {
            TurnErrorKind::BackendUnreachable => {
                "i couldn't reach the language model backend. make sure the server is running and reachable, then try again."
            }
            TurnErrorKind::Timeout => {
                "the language model took too long to answer. try again in a moment."
            }
            TurnErrorKind::BackendError => {
                "the language model backend answered with something i couldn't use. try again in a moment."
            }
        };

        format!(
            "{hint}\n\nyour message is kept, so just retrying works.\ndetails: {}",
            self.summary
        )
    }
}

fn truncate(mut summary: String) -> String {
    if summary.len() > ERROR_SUMMARY_MAX {
        let mut end = ERROR_SUMMARY_MAX;
        while !summary.is_char_boundary(end) {
            end -= 1;
        }
        summary.truncate(end);
        summary.push_str("...");
    }
    summary
}

/// Runs one user-message-in, assistant-reply-out cycle against the store
/// and the completion backend.
pub struct ChatEngine {
    store: Arc<ContextStore>,
    client: Arc<dyn CompletionBackend>,
}

impl ChatEngine {
    pub fn new(store: Arc<ContextStore>, client: Arc<dyn CompletionBackend>) -> Self {
        Self { store, client }
    }

    /// The entry mutex is held for the whole turn, so a second concurrent
    /// turn for the same user waits instead of interleaving its appends
    /// around ours. Different users run freely in parallel.
    pub async fn handle(&self, user: UserId, text: impl Into<String>) -> Result<String, TurnError> {
        let entry = self.store.get_or_create(user).await;
        let mut context = entry.lock().await;

        context.push(ChatMessage::user(text));

        let reply = match self.client.complete(context.messages()).await {
            Ok(reply) => reply,
            Err(why) => {
                // no assistant message is recorded; the user's message stays
                log::error!("completion failed for user {user}: {why}");
                return Err(TurnError::from_completion(why));
            }
        };

        context.push(ChatMessage::assistant(reply.clone()));
        log::info!("user {user} turn finished (context length: {})", context.len());

        Ok(reply)
    }
}
