//! # Chat Renderer
//!
//! Maps a chat message to one of two bubble styles.

use crate::repl::models::{ChatMessage, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleStyle {
    /// Right aligned, highlighted
    User,
    /// Left aligned, muted
    Bot,
}

impl BubbleStyle {
    pub fn style_token(&self) -> &'static str {
        match self {
            Self::User => "bubble-user",
            Self::Bot => "bubble-bot",
        }
    }

    pub fn is_right_aligned(&self) -> bool {
        matches!(self, Self::User)
    }
}

/// Render instruction for one chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatBubble {
    pub style: BubbleStyle,
    pub text: String,
}

pub fn render(message: &ChatMessage) -> ChatBubble {
    let style = match message.sender {
        Sender::User => BubbleStyle::User,
        Sender::Bot => BubbleStyle::Bot,
    };
    ChatBubble {
        style,
        text: message.text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_should_pick_style_by_sender() {
        let user = render(&ChatMessage::user("is this safe?"));
        assert_eq!(user.style, BubbleStyle::User);
        assert!(user.style.is_right_aligned());
        assert_eq!(user.text, "is this safe?");

        let bot = render(&ChatMessage::bot("Looks suspicious."));
        assert_eq!(bot.style, BubbleStyle::Bot);
        assert_eq!(bot.style.style_token(), "bubble-bot");
    }
}
