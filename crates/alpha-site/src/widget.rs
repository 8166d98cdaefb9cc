//! Site-wide chat widget.
//!
//! A [`ChatWidget`] owns one [`ChatSession`] (visibility flag plus
//! append-only transcript) and the [`ChatView`] it renders into. Other page
//! scripts never touch it directly: they hold a cloneable [`WidgetHandle`]
//! and post [`WidgetEvent`]s, which the widget processes one at a time from
//! its queue, each to completion.
//!
//! A preference passed to [`WidgetHandle::open`] is delivered later by a
//! one-shot timer task that posts [`WidgetEvent::DeliverPreference`] onto
//! the same queue, so it is handled exactly like a typed message. There is no
//! way to cancel it.
//!
//! ```rust,no_run
//! use alpha_site::{ChatWidget, HtmlChatView, Host, WidgetConfig};
//!
//! struct Page;
//! impl Host for Page {
//!     type View = HtmlChatView;
//!     fn mount(&mut self, _anchor_id: &str) -> Option<HtmlChatView> {
//!         Some(HtmlChatView::new())
//!     }
//! }
//!
//! # async fn run() {
//! let (widget, handle) = ChatWidget::mount(&mut Page, WidgetConfig::default()).unwrap();
//! let widget = tokio::spawn(widget.run());
//! handle.open(Some("bmi help"));
//! drop(handle);
//! let widget = widget.await.unwrap();
//! assert_eq!(widget.session().transcript().len(), 2);
//! # }
//! ```

use std::time::Duration;

use alpha_models::{reply, ChatMessage};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::view::{ChatView, Host, CHAT_ANCHOR_ID};

/// Delay between opening the panel and submitting a preference.
pub const DEFAULT_PREFERENCE_DELAY: Duration = Duration::from_millis(300);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Widget settings injected by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Id of the element the widget mounts into.
    pub anchor_id: String,
    /// How long to wait after opening before a preference is submitted.
    pub preference_delay: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            anchor_id: CHAT_ANCHOR_ID.to_string(),
            preference_delay: DEFAULT_PREFERENCE_DELAY,
        }
    }
}

// ---------------------------------------------------------------------------
// ChatSession
// ---------------------------------------------------------------------------

/// Visibility and transcript of one page's chat.
///
/// The transcript only ever grows, and every accepted user message is
/// followed immediately by exactly one bot message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSession {
    is_open: bool,
    transcript: Vec<ChatMessage>,
}

impl ChatSession {
    /// Closed session with an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// All messages so far, oldest first.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Flip visibility and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }

    /// Append `text` and its reply. Blank text is ignored and yields `None`;
    /// otherwise the two new entries are returned.
    pub fn submit(&mut self, text: &str) -> Option<&[ChatMessage]> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let answer = reply(text);
        trace!(topic = %answer.topic, "message classified");
        self.transcript.push(ChatMessage::user(text));
        self.transcript.push(ChatMessage::bot(answer.html));
        Some(&self.transcript[self.transcript.len() - 2..])
    }
}

// ---------------------------------------------------------------------------
// Events and handle
// ---------------------------------------------------------------------------

/// Everything that can happen to the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Scripted open.
    Open,
    /// Scripted close.
    Close,
    /// Header or close-button click.
    Toggle,
    /// Send button or Enter key, with the input field's text.
    Send(String),
    /// A deferred preference whose delay has elapsed.
    DeliverPreference(String),
}

/// The API other page scripts use to drive the widget.
///
/// When every handle is dropped the widget's [`run`](ChatWidget::run) loop
/// ends once pending timers have fired.
#[derive(Debug, Clone)]
pub struct WidgetHandle {
    events: mpsc::UnboundedSender<WidgetEvent>,
    preference_delay: Duration,
}

impl WidgetHandle {
    /// Open the panel if closed; submit `preference` after the configured delay.
    ///
    /// Must be called from within a tokio runtime when a preference is given.
    pub fn open(&self, preference: Option<&str>) {
        self.dispatch(WidgetEvent::Open);
        if let Some(preference) = preference.filter(|p| !p.trim().is_empty()) {
            schedule_preference(self.events.clone(), self.preference_delay, preference.to_string());
        }
    }

    /// Close the panel if open.
    pub fn close(&self) {
        self.dispatch(WidgetEvent::Close);
    }

    /// Post a raw UI event (clicks, key presses).
    pub fn dispatch(&self, event: WidgetEvent) {
        if self.events.send(event).is_err() {
            debug!("chat widget is gone, event dropped");
        }
    }
}

// ---------------------------------------------------------------------------
// ChatWidget
// ---------------------------------------------------------------------------

/// The mounted widget: session, view and event queue.
pub struct ChatWidget<V> {
    session: ChatSession,
    view: V,
    config: WidgetConfig,
    scheduler: mpsc::WeakUnboundedSender<WidgetEvent>,
    inbox: mpsc::UnboundedReceiver<WidgetEvent>,
}

impl<V: ChatView> ChatWidget<V> {
    /// Mount into `host` if it exposes the configured anchor.
    ///
    /// Returns `None` on pages without the anchor; the page carries on
    /// without chat.
    pub fn mount<H>(host: &mut H, config: WidgetConfig) -> Option<(Self, WidgetHandle)>
    where
        H: Host<View = V>,
    {
        let Some(mut view) = host.mount(&config.anchor_id) else {
            debug!(anchor = %config.anchor_id, "no chat anchor, widget disabled");
            return None;
        };
        view.set_panel_visible(false);

        let (events, inbox) = mpsc::unbounded_channel();
        debug!(anchor = %config.anchor_id, "chat widget mounted");
        let widget = Self {
            session: ChatSession::new(),
            view,
            scheduler: events.downgrade(),
            inbox,
            config,
        };
        let handle = WidgetHandle {
            events,
            preference_delay: widget.config.preference_delay,
        };
        Some((widget, handle))
    }

    /// Current session state.
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// The view the widget renders into.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view, for input bindings.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Flip visibility; opening focuses the input.
    pub fn toggle(&mut self) {
        let open = self.session.toggle();
        self.view.set_panel_visible(open);
        if open {
            self.view.focus_input();
        }
        debug!(open, "chat panel toggled");
    }

    /// Open if closed, then schedule `preference` unless it is blank.
    ///
    /// Must be called from within a tokio runtime when a preference is given.
    pub fn open(&mut self, preference: Option<&str>) {
        if !self.session.is_open() {
            self.toggle();
        }
        let Some(preference) = preference.filter(|p| !p.trim().is_empty()) else {
            return;
        };
        match self.scheduler.upgrade() {
            Some(events) => {
                schedule_preference(events, self.config.preference_delay, preference.to_string());
            }
            None => debug!("no handle left, preference dropped"),
        }
    }

    /// Close if open.
    pub fn close(&mut self) {
        if self.session.is_open() {
            self.toggle();
        }
    }

    /// Submit typed text. Blank text is ignored and leaves the input as is;
    /// otherwise the input is cleared.
    pub fn send_message(&mut self, text: &str) {
        if self.submit(text) {
            self.view.clear_input();
        }
    }

    /// Apply one event.
    pub fn handle(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::Open => self.open(None),
            WidgetEvent::Close => self.close(),
            WidgetEvent::Toggle => self.toggle(),
            WidgetEvent::Send(text) => self.send_message(&text),
            WidgetEvent::DeliverPreference(preference) => {
                self.submit(&preference);
            }
        }
    }

    /// Apply every queued event without waiting; returns how many ran.
    pub fn drain_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.inbox.try_recv() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    /// Process events until every handle (and pending timer) is gone, then
    /// hand the widget back.
    pub async fn run(mut self) -> Self {
        while let Some(event) = self.inbox.recv().await {
            self.handle(event);
        }
        debug!(
            messages = self.session.transcript.len(),
            "chat widget torn down"
        );
        self
    }

    fn submit(&mut self, text: &str) -> bool {
        let from = self.session.transcript.len();
        if self.session.submit(text).is_none() {
            trace!("blank message ignored");
            return false;
        }
        for message in &self.session.transcript[from..] {
            self.view.append(message);
            self.view.scroll_to_bottom();
        }
        true
    }
}

/// One-shot timer posting `preference` onto the widget queue after `delay`.
fn schedule_preference(
    events: mpsc::UnboundedSender<WidgetEvent>,
    delay: Duration,
    preference: String,
) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if events
            .send(WidgetEvent::DeliverPreference(preference))
            .is_err()
        {
            debug!("chat widget is gone, preference dropped");
        }
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::HtmlChatView;
    use alpha_models::{Speaker, RULES};

    struct TestPage {
        has_anchor: bool,
    }

    impl Host for TestPage {
        type View = HtmlChatView;

        fn mount(&mut self, anchor_id: &str) -> Option<HtmlChatView> {
            (self.has_anchor && anchor_id == CHAT_ANCHOR_ID).then(HtmlChatView::new)
        }
    }

    fn mounted() -> (ChatWidget<HtmlChatView>, WidgetHandle) {
        ChatWidget::mount(&mut TestPage { has_anchor: true }, WidgetConfig::default())
            .expect("anchor present")
    }

    fn bmi_reply() -> &'static str {
        RULES[0].template
    }

    #[test]
    fn page_without_anchor_has_no_widget() {
        let page = &mut TestPage { has_anchor: false };
        assert!(ChatWidget::mount(page, WidgetConfig::default()).is_none());
    }

    #[test]
    fn custom_anchor_must_exist() {
        let config = WidgetConfig {
            anchor_id: "elsewhere".into(),
            ..WidgetConfig::default()
        };
        assert!(ChatWidget::mount(&mut TestPage { has_anchor: true }, config).is_none());
    }

    #[test]
    fn starts_closed_and_empty() {
        let (widget, _handle) = mounted();
        assert!(!widget.session().is_open());
        assert!(widget.session().transcript().is_empty());
        assert!(!widget.view().is_visible());
    }

    #[test]
    fn toggle_opens_with_focus_and_closes_keeping_transcript() {
        let (mut widget, _handle) = mounted();
        widget.toggle();
        assert!(widget.session().is_open());
        assert!(widget.view().is_visible());
        assert!(widget.view().is_focused());

        widget.send_message("yoga");
        widget.toggle();
        assert!(!widget.session().is_open());
        assert!(!widget.view().is_visible());
        assert_eq!(widget.session().transcript().len(), 2);
    }

    #[test]
    fn repeated_open_keeps_panel_open_and_close_is_idempotent() {
        let (mut widget, _handle) = mounted();
        widget.open(None);
        widget.open(None);
        assert!(widget.session().is_open());
        widget.close();
        widget.close();
        assert!(!widget.session().is_open());
    }

    #[test]
    fn send_appends_user_then_bot_and_clears_input() {
        let (mut widget, _handle) = mounted();
        widget.open(None);
        widget.view_mut().set_input("  bmi help ");
        widget.send_message("  bmi help ");

        let transcript = widget.session().transcript();
        assert_eq!(
            transcript,
            &[ChatMessage::user("bmi help"), ChatMessage::bot(bmi_reply())]
        );
        assert_eq!(widget.view().input(), "");
        assert_eq!(widget.view().entries().len(), 2);
        assert!(widget.view().is_scrolled_to_bottom());
    }

    #[test]
    fn blank_message_changes_nothing() {
        let (mut widget, _handle) = mounted();
        widget.view_mut().set_input("   ");
        widget.send_message("   ");
        widget.send_message("");
        assert!(widget.session().transcript().is_empty());
        assert!(!widget.session().is_open());
        assert_eq!(widget.view().input(), "   ");
    }

    #[test]
    fn every_user_message_is_followed_by_one_bot_message() {
        let (mut widget, _handle) = mounted();
        for text in ["hi", " ", "price", "", "what?"] {
            widget.send_message(text);
        }
        let speakers: Vec<_> = widget
            .session()
            .transcript()
            .iter()
            .map(|m| m.speaker)
            .collect();
        assert_eq!(
            speakers,
            vec![Speaker::User, Speaker::Bot, Speaker::User, Speaker::Bot, Speaker::User, Speaker::Bot]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn preference_is_sent_after_delay() {
        let (mut widget, _handle) = mounted();
        widget.open(Some("bmi help"));
        assert!(widget.session().is_open());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(widget.drain_pending(), 0);
        assert!(widget.session().transcript().is_empty());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(widget.drain_pending(), 1);
        assert_eq!(
            widget.session().transcript(),
            &[ChatMessage::user("bmi help"), ChatMessage::bot(bmi_reply())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn blank_preference_is_not_scheduled() {
        let (mut widget, handle) = mounted();
        widget.open(Some(""));
        widget.open(Some("   "));
        handle.open(Some(" \t"));
        tokio::time::sleep(Duration::from_secs(1)).await;
        // only the handle's plain Open event is queued
        assert_eq!(widget.drain_pending(), 1);
        assert!(widget.session().is_open());
        assert!(widget.session().transcript().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn preference_on_open_panel_is_still_delivered() {
        let (mut widget, _handle) = mounted();
        widget.open(None);
        widget.send_message("hi");

        widget.open(Some("yoga"));
        assert!(widget.session().is_open());
        assert_eq!(widget.session().transcript().len(), 2);

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(widget.drain_pending(), 0);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(widget.drain_pending(), 1);
        assert!(widget.session().is_open());
        assert_eq!(
            &widget.session().transcript()[2..],
            &[ChatMessage::user("yoga"), ChatMessage::bot(reply("yoga").html)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn handle_drives_the_event_loop() {
        let (widget, handle) = mounted();
        let running = tokio::spawn(widget.run());

        handle.open(Some("price"));
        handle.dispatch(WidgetEvent::Send("hello".into()));
        handle.dispatch(WidgetEvent::Toggle);
        drop(handle);

        let widget = running.await.unwrap();
        let texts: Vec<_> = widget
            .session()
            .transcript()
            .iter()
            .filter(|m| m.speaker == Speaker::User)
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, vec!["hello", "price"]);
        assert_eq!(widget.session().transcript().len(), 4);
        assert!(!widget.session().is_open());
    }

    #[tokio::test]
    async fn handle_outliving_widget_is_harmless() {
        let (widget, handle) = mounted();
        drop(widget);
        handle.open(Some("bmi"));
        handle.close();
    }
}
