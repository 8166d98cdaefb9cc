//! Page composition root.
//!
//! A [`SitePage`] is built once per page load. It owns the backend client and,
//! when the page has a chat anchor, the widget handle that the other page
//! scripts use. Dropping it tears the page down.

use std::fmt;

use alpha_sdk::AlphaClient;
use tracing::info;

use crate::view::Host;
use crate::widget::{ChatWidget, WidgetConfig, WidgetHandle};

/// Blocking notice shown to the visitor (a browser `alert`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert(pub String);

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything one loaded page holds.
#[derive(Debug, Clone)]
pub struct SitePage {
    client: AlphaClient,
    chat: Option<WidgetHandle>,
}

impl SitePage {
    /// Assemble a page from parts.
    pub fn new(client: AlphaClient, chat: Option<WidgetHandle>) -> Self {
        Self { client, chat }
    }

    /// Load a page: mount the chat widget if `host` has the anchor.
    ///
    /// The returned widget must be driven (usually by spawning
    /// [`ChatWidget::run`]) for the handle to have any effect.
    pub fn load<H: Host>(
        host: &mut H,
        client: AlphaClient,
        config: WidgetConfig,
    ) -> (Self, Option<ChatWidget<H::View>>) {
        let (widget, chat) = match ChatWidget::mount(host, config) {
            Some((widget, handle)) => (Some(widget), Some(handle)),
            None => (None, None),
        };
        info!(
            backend = %client.base_url(),
            chat = chat.is_some(),
            "page loaded"
        );
        (Self::new(client, chat), widget)
    }

    /// Backend client.
    pub fn client(&self) -> &AlphaClient {
        &self.client
    }

    /// Chat handle, if the page has a widget.
    pub fn chat(&self) -> Option<&WidgetHandle> {
        self.chat.as_ref()
    }

    /// Open the chat with a preference, as the "Consult Trainer" buttons do.
    ///
    /// # Errors
    ///
    /// An [`Alert`] when the page has no chat widget.
    pub fn open_chat(&self, preference: &str) -> Result<(), Alert> {
        match &self.chat {
            Some(chat) => {
                chat.open(Some(preference));
                Ok(())
            }
            None => Err(Alert("Chat widget not loaded yet.".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{HtmlChatView, CHAT_ANCHOR_ID};

    struct Page {
        anchors: Vec<&'static str>,
    }

    impl Host for Page {
        type View = HtmlChatView;

        fn mount(&mut self, anchor_id: &str) -> Option<HtmlChatView> {
            self.anchors.contains(&anchor_id).then(HtmlChatView::new)
        }
    }

    fn client() -> AlphaClient {
        AlphaClient::new("http://localhost:5000").unwrap()
    }

    #[test]
    fn page_without_anchor_alerts_on_consult() {
        let (page, widget) = SitePage::load(&mut Page { anchors: vec![] }, client(), WidgetConfig::default());
        assert!(widget.is_none());
        assert!(page.chat().is_none());
        assert_eq!(
            page.open_chat("normal"),
            Err(Alert("Chat widget not loaded yet.".into()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn consult_opens_chat_with_preference() {
        let (page, widget) = SitePage::load(
            &mut Page {
                anchors: vec![CHAT_ANCHOR_ID],
            },
            client(),
            WidgetConfig::default(),
        );
        let running = tokio::spawn(widget.expect("anchor present").run());

        page.open_chat("overweight").unwrap();
        drop(page);

        let widget = running.await.unwrap();
        assert!(widget.session().is_open());
        assert_eq!(widget.session().transcript()[0].text, "overweight");
    }
}
