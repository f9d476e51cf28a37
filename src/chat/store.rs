use std::{collections::HashMap, sync::Arc};

use serenity::all::UserId;
use tokio::sync::{Mutex, RwLock};

use super::context::ConversationContext;

/// Owns every user's conversation window. Each entry sits behind its own
/// async mutex; whoever holds it has exclusive use of that user's context,
/// including across the completion call (see `ChatEngine::handle`). Entries
/// are created lazily and live for the whole process.
pub struct ContextStore {
    contexts: RwLock<HashMap<UserId, Arc<Mutex<ConversationContext>>>>,
    system_prompt: String,
    max_len: usize,
}

impl ContextStore {
    pub fn new(system_prompt: impl Into<String>, max_len: usize) -> Self {
        Self {
            contexts: RwLock::new(HashMap::new()),
            system_prompt: system_prompt.into(),
            max_len,
        }
    }

    fn fresh(&self) -> ConversationContext {
        ConversationContext::new(self.system_prompt.clone(), self.max_len)
    }

    pub async fn get_or_create(&self, user: UserId) -> Arc<Mutex<ConversationContext>> {
        {
            let contexts = self.contexts.read().await;
            if let Some(context) = contexts.get(&user) {
                return context.clone();
            }
        }

        let mut contexts = self.contexts.write().await;
        contexts
            .entry(user)
            .or_insert_with(|| {
                log::info!("created new context for user {user}");
                Arc::new(Mutex::new(self.fresh()))
            })
            .clone()
    }

    /// Resets the user's context to the system directive alone and returns
    /// how many non-system messages were removed. Idempotent.
    pub async fn reset(&self, user: UserId) -> usize {
        let entry = self.get_or_create(user).await;
        let mut context = entry.lock().await;
        let removed = context.history_len();
        *context = self.fresh();
        removed
    }

    /// Non-system message count, 0 if the user has no context yet.
    pub async fn size(&self, user: UserId) -> usize {
        let contexts = self.contexts.read().await;
        match contexts.get(&user) {
            Some(context) => context.lock().await.history_len(),
            None => 0,
        }
    }
}
