use ragkit_core::Message;

/// Append-only conversation history, held in process memory only.
#[derive(Debug, Clone, Default)]
pub struct History {
    messages: Vec<Message>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The last `limit` messages, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &Message> {
        let start = self.messages.len().saturating_sub(limit);
        self.messages[start..].iter().rev()
    }
}
