//! Rendering seams between the chat widget and whatever hosts it.
//!
//! The widget never touches a document directly. It asks a [`Host`] for the
//! mount anchor once, and then drives the returned [`ChatView`].

use alpha_models::ChatMessage;

use crate::html::escape;

/// Anchor id whose presence enables the chat widget on a page.
pub const CHAT_ANCHOR_ID: &str = "chat-root";

/// Output side of the chat widget.
pub trait ChatView {
    /// Show or hide the message panel.
    fn set_panel_visible(&mut self, visible: bool);
    /// Move keyboard focus to the input field.
    fn focus_input(&mut self);
    /// Append one transcript entry.
    fn append(&mut self, message: &ChatMessage);
    /// Scroll the transcript container to its last entry.
    fn scroll_to_bottom(&mut self);
    /// Empty the input field.
    fn clear_input(&mut self);
}

/// A page able to host the widget.
pub trait Host {
    /// View type produced for the mount anchor.
    type View: ChatView;

    /// Return a view bound to the element with id `anchor_id`, or `None` if
    /// the page has no such element.
    fn mount(&mut self, anchor_id: &str) -> Option<Self::View>;
}

/// Markup for one transcript entry.
pub fn message_html(message: &ChatMessage) -> String {
    if message.is_markup() {
        format!("<div class=\"msg-bot\">{}</div>", message.text)
    } else {
        format!("<div class=\"msg-user\">{}</div>", escape(&message.to_string()))
    }
}

/// A [`ChatView`] that maintains the widget's markup as a string.
///
/// This is the document binding: a page that renders server-side, or a test,
/// reads the current widget with [`HtmlChatView::render`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlChatView {
    visible: bool,
    focused: bool,
    input: String,
    entries: Vec<String>,
    scrolled_to: usize,
}

impl HtmlChatView {
    /// Fresh, closed widget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the input field's content (the visitor typing).
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    /// Current input field content.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the panel is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the input field has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Rendered transcript entries.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Whether the last entry is scrolled into view.
    pub fn is_scrolled_to_bottom(&self) -> bool {
        self.scrolled_to == self.entries.len()
    }

    /// Full widget markup.
    pub fn render(&self) -> String {
        let display = if self.visible { "block" } else { "none" };
        format!(
            concat!(
                "<div id=\"chat-widget\">",
                "<div id=\"chat-header\"><span>Chat with Alpha</span>",
                "<button id=\"chat-close\" aria-label=\"close\">✕</button></div>",
                "<div id=\"chat-body\" style=\"display:{display};\">",
                "<div id=\"chat-messages\" aria-live=\"polite\">{entries}</div>",
                "<div id=\"chat-input-row\">",
                "<input id=\"chat-input\" placeholder=\"Hi — ask about plans, trainers or BMI...\" value=\"{input}\" />",
                "<button id=\"chat-send\">Send</button></div>",
                "</div></div>"
            ),
            display = display,
            entries = self.entries.concat(),
            input = escape(&self.input),
        )
    }
}

impl ChatView for HtmlChatView {
    fn set_panel_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.focused = false;
        }
    }

    fn focus_input(&mut self) {
        self.focused = true;
    }

    fn append(&mut self, message: &ChatMessage) {
        self.entries.push(message_html(message));
    }

    fn scroll_to_bottom(&mut self) {
        self.scrolled_to = self.entries.len();
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_text_is_escaped_bot_markup_is_kept() {
        assert_eq!(
            message_html(&ChatMessage::user("<b>hi</b>")),
            "<div class=\"msg-user\">You: &lt;b&gt;hi&lt;/b&gt;</div>"
        );
        assert_eq!(
            message_html(&ChatMessage::bot("Bot: <a href=\"x\">x</a>")),
            "<div class=\"msg-bot\">Bot: <a href=\"x\">x</a></div>"
        );
    }

    #[test]
    fn render_reflects_visibility_and_entries() {
        let mut view = HtmlChatView::new();
        assert!(view.render().contains("display:none;"));

        view.set_panel_visible(true);
        view.append(&ChatMessage::user("yo"));
        let html = view.render();
        assert!(html.contains("display:block;"));
        assert!(html.contains("You: yo"));
        assert!(!view.is_scrolled_to_bottom());
        view.scroll_to_bottom();
        assert!(view.is_scrolled_to_bottom());
    }

    #[test]
    fn hiding_drops_focus() {
        let mut view = HtmlChatView::new();
        view.set_panel_visible(true);
        view.focus_input();
        view.set_panel_visible(false);
        assert!(!view.is_focused());
    }
}
