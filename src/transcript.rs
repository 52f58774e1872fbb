//! Ordered record of the conversation plus the "bot is typing" signal.
//!
//! The transcript is append-only: messages are never edited, reordered or
//! removed, so a message's identity is its position in the sequence. The
//! typing placeholder shown by the UI is derived from the awaiting flag at
//! render time and is never stored here.

/// Greeting seeded into every new transcript.
pub const GREETING: &str =
    "Hello! I'm your Ultimate Computer Science Chatbot. How can I help you today?";

/// Who authored a message. Never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    Bot,
}

/// A single entry in the transcript.
#[derive(Debug, Clone)]
pub struct Message {
    pub origin: Origin,
    pub text: String,
}

pub struct Transcript {
    messages: Vec<Message>,
    awaiting_response: bool,
}

impl Transcript {
    /// New transcript seeded with the bot greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message {
                origin: Origin::Bot,
                text: GREETING.to_string(),
            }],
            awaiting_response: false,
        }
    }

    /// Append a message. Whitespace-only text is rejected as a silent
    /// no-op; returns whether the message was appended.
    pub fn push(&mut self, origin: Origin, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.messages.push(Message {
            origin,
            text: text.to_string(),
        });
        true
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True while exactly one backend request is outstanding.
    pub fn is_awaiting_response(&self) -> bool {
        self.awaiting_response
    }

    /// Set the typing signal. Does not touch the message sequence.
    pub fn set_awaiting_response(&mut self, awaiting: bool) {
        self.awaiting_response = awaiting;
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
