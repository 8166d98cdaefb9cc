//! Terminal bindings for the site layer.
//!
//! The chat widget renders through [`TerminalView`], which prints each
//! transcript entry as a line of plain text. Lines typed on stdin are turned
//! into widget events by [`parse_input`].

use std::io::{self, Write};

use alpha_models::{ChatMessage, Speaker};
use alpha_site::booking::{CheckoutOptions, PaymentSdk};
use alpha_site::{ChatView, Host, WidgetEvent};
use tracing::warn;

// ---------------------------------------------------------------------------
// Markup to text
// ---------------------------------------------------------------------------

/// Strip markup for display: block ends and `<br>` become newlines, other
/// tags vanish, and the common entities are decoded.
pub fn plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let tag = rest[start + 1..start + end].trim().to_ascii_lowercase();
        if tag.starts_with("br") || ["/p", "/h3", "/div", "/article"].contains(&tag.as_str()) {
            out.push('\n');
        }
        rest = &rest[start + end + 1..];
    }
    out.push_str(rest);

    let decoded = out
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Prints the chat to a writer (stdout by default).
pub struct TerminalView<W = io::Stdout> {
    out: W,
    visible: bool,
}

impl<W: Write> TerminalView<W> {
    /// View printing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            visible: false,
        }
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            warn!(error = %e, "terminal write failed");
        }
    }

    /// The underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn set_panel_visible(&mut self, visible: bool) {
        if visible != self.visible {
            self.visible = visible;
            self.line(if visible { "── chat open ──" } else { "── chat closed ──" });
        }
    }

    fn focus_input(&mut self) {}

    fn append(&mut self, message: &ChatMessage) {
        let text = match message.speaker {
            Speaker::User => message.to_string(),
            Speaker::Bot => plain_text(&message.text),
        };
        self.line(&text);
    }

    fn scroll_to_bottom(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!(error = %e, "terminal flush failed");
        }
    }

    fn clear_input(&mut self) {}
}

/// The terminal always has room for the chat.
pub struct TerminalHost;

impl Host for TerminalHost {
    type View = TerminalView;

    fn mount(&mut self, _anchor_id: &str) -> Option<TerminalView> {
        Some(TerminalView::new(io::stdout()))
    }
}

/// One line typed at the chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Forward to the widget.
    Event(WidgetEvent),
    /// Leave the chat.
    Quit,
}

/// Interpret a typed line. Slash commands drive the panel; anything else
/// is sent as a message.
pub fn parse_input(line: &str) -> Input {
    match line.trim() {
        "/quit" | "/exit" => Input::Quit,
        "/open" => Input::Event(WidgetEvent::Open),
        "/close" => Input::Event(WidgetEvent::Close),
        "/toggle" => Input::Event(WidgetEvent::Toggle),
        _ => Input::Event(WidgetEvent::Send(line.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Checkout
// ---------------------------------------------------------------------------

/// Prints the checkout options instead of opening a payment form.
pub struct TerminalCheckout;

impl PaymentSdk for TerminalCheckout {
    fn open_checkout(&mut self, options: &CheckoutOptions) {
        println!(
            "Checkout: {} ₹{:.2} (order {})",
            options.description,
            options.amount as f64 / 100.0,
            options.order_id
        );
        match serde_json::to_string_pretty(options) {
            Ok(json) => println!("{json}"),
            Err(e) => warn!(error = %e, "could not render checkout options"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_site::{ChatWidget, WidgetConfig};

    struct BufferHost;

    impl Host for BufferHost {
        type View = TerminalView<Vec<u8>>;

        fn mount(&mut self, _anchor_id: &str) -> Option<Self::View> {
            Some(TerminalView::new(Vec::new()))
        }
    }

    #[test]
    fn strips_markup() {
        assert_eq!(
            plain_text("<strong>BMI:</strong> 22.86<br><strong>Category:</strong> Normal"),
            "BMI: 22.86\nCategory: Normal"
        );
        assert_eq!(
            plain_text("Bot: see <a href=\"/bmi\">BMI Calculator</a> &amp; more"),
            "Bot: see BMI Calculator & more"
        );
        assert_eq!(plain_text("a < b"), "a < b");
    }

    #[test]
    fn slash_commands() {
        assert_eq!(parse_input(" /quit "), Input::Quit);
        assert_eq!(parse_input("/close"), Input::Event(WidgetEvent::Close));
        assert_eq!(
            parse_input("yoga please"),
            Input::Event(WidgetEvent::Send("yoga please".into()))
        );
    }

    #[test]
    fn chat_prints_plain_lines() {
        let (mut widget, _handle) =
            ChatWidget::mount(&mut BufferHost, WidgetConfig::default()).unwrap();
        widget.toggle();
        widget.send_message("hello");

        widget.toggle();

        let view = std::mem::replace(widget.view_mut(), TerminalView::new(Vec::new()));
        let printed = String::from_utf8(view.into_inner()).unwrap();
        let lines: Vec<_> = printed.lines().collect();
        assert_eq!(lines[0], "── chat open ──");
        assert_eq!(lines[1], "You: hello");
        assert!(lines[2].starts_with("Bot: "));
        assert!(!lines[2].contains('<'));
        assert_eq!(lines[3], "── chat closed ──");
    }
}
