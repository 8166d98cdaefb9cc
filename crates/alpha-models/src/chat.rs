//! Chat transcript entries.
//!
//! A transcript is an ordered list of [`ChatMessage`]s. Bot messages may carry
//! inline link markup; user messages are always plain text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Who authored a transcript entry.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Speaker {
    /// Text typed by the visitor (or submitted on their behalf).
    User,
    /// Canned reply produced by the classifier.
    Bot,
}

/// One entry of the chat transcript.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Author of the entry.
    pub speaker: Speaker,
    /// Message body. Bot bodies may contain `<a>` / `<strong>` markup.
    pub text: String,
}

impl ChatMessage {
    /// Build a visitor message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    /// Build a bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
        }
    }

    /// Whether this entry carries markup that must not be escaped on render.
    pub fn is_markup(&self) -> bool {
        self.speaker == Speaker::Bot
    }
}

impl fmt::Display for ChatMessage {
    /// Transcript line as shown in the panel: user lines get a `You: ` prefix,
    /// bot lines already carry their own `Bot: ` prefix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.speaker {
            Speaker::User => write!(f, "You: {}", self.text),
            Speaker::Bot => f.write_str(&self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_line_is_prefixed() {
        let msg = ChatMessage::user("hello");
        assert_eq!(msg.to_string(), "You: hello");
        assert!(!msg.is_markup());
    }

    #[test]
    fn bot_line_is_verbatim() {
        let msg = ChatMessage::bot("Bot: hi");
        assert_eq!(msg.to_string(), "Bot: hi");
        assert!(msg.is_markup());
    }

    #[test]
    fn speaker_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::user("x")).unwrap();
        assert_eq!(json, r#"{"speaker":"user","text":"x"}"#);
        assert_eq!(Speaker::Bot.to_string(), "bot");
    }
}
