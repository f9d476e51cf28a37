use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// One user's conversation window. The system directive always sits at
/// index 0 and survives every trim; everything after it is append-only
/// history, evicted oldest-first once the window is full.
#[derive(Debug)]
pub struct ConversationContext {
    messages: Vec<ChatMessage>,
    max_len: usize,
}

impl ConversationContext {
    pub fn new(system_prompt: impl Into<String>, max_len: usize) -> Self {
        Self {
            messages: vec![ChatMessage::system(system_prompt)],
            max_len,
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.trim();
    }

    // keep element 0 plus the most recent max_len - 1 messages
    fn trim(&mut self) {
        if self.messages.len() > self.max_len {
            let excess = self.messages.len() - self.max_len;
            self.messages.drain(1..1 + excess);
            log::debug!("context full, dropped {excess} oldest messages");
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Message count excluding the system directive.
    pub fn history_len(&self) -> usize {
        self.messages.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(max_len: usize) -> ConversationContext {
        ConversationContext::new("directive", max_len)
    }

    #[test]
    fn starts_with_only_the_system_directive() {
        let ctx = context(20);
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.history_len(), 0);
        assert_eq!(ctx.messages()[0].role, MessageRole::System);
        assert_eq!(ctx.messages()[0].content, "directive");
    }

    #[test]
    fn length_never_exceeds_the_bound() {
        let mut ctx = context(20);
        for i in 0..50 {
            ctx.push(ChatMessage::user(format!("message {i}")));
            assert!(ctx.len() <= 20);
            assert_eq!(ctx.messages()[0].role, MessageRole::System);
        }
    }

    #[test]
    fn eviction_is_fifo_over_non_system_messages() {
        let mut ctx = context(20);
        for i in 0..25 {
            let message = if i % 2 == 0 {
                ChatMessage::user(format!("turn {i}"))
            } else {
                ChatMessage::assistant(format!("turn {i}"))
            };
            ctx.push(message);
        }

        // system + the most recent 19, original relative order
        assert_eq!(ctx.len(), 20);
        assert_eq!(ctx.messages()[0].content, "directive");
        for (slot, i) in (6..25).enumerate() {
            assert_eq!(ctx.messages()[slot + 1].content, format!("turn {i}"));
        }
    }

    #[test]
    fn trim_never_duplicates_the_system_message() {
        let mut ctx = context(3);
        for i in 0..10 {
            ctx.push(ChatMessage::user(format!("{i}")));
        }
        let systems = ctx
            .messages()
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .count();
        assert_eq!(systems, 1);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
