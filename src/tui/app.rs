// Dashboard state
//
// Owns everything the renderer reads: the generated datasets, the
// per-list pagers, the active tabs, and the chat session. The event
// loop is the only mutator.

use super::input::InputHandler;
use crate::chat::{ChatController, ChatEvent};
use crate::data::channel::Channel;
use crate::data::overview::{generate_subcategories, NamedValue, CATEGORIES};
use crate::data::Dashboard;
use crate::logging::LogBuffer;
use crate::pager::Pager;
use crate::theme::{Theme, ThemeKind};
use std::time::Instant;

/// Animation frames for the streaming spinner
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Different views the dashboard can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Overview, // Headline metrics, sales curve, ranked products
    Channels,   // Per-channel funnel, trend, core products
    Categories, // Category / sub-category breakdown
    Refunds,    // Refund reasons and refund-heavy products
    Chat,       // AI analyst conversation
}

impl View {
    /// Tab order, also the F1..F5 binding order
    pub fn all() -> &'static [View] {
        &[
            View::Overview,
            View::Channels,
            View::Categories,
            View::Refunds,
            View::Chat,
        ]
    }

    /// Forward in tab order, wrapping
    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Channels,
            View::Channels => View::Categories,
            View::Categories => View::Refunds,
            View::Refunds => View::Chat,
            View::Chat => View::Overview,
        }
    }

    /// Backward in tab order, wrapping
    pub fn prev(self) -> Self {
        match self {
            View::Overview => View::Chat,
            View::Channels => View::Overview,
            View::Categories => View::Channels,
            View::Refunds => View::Categories,
            View::Chat => View::Refunds,
        }
    }

    /// Label shown in the tab bar
    pub fn name(&self) -> &'static str {
        match self {
            View::Overview => "经营总览",
            View::Channels => "增长因素",
            View::Categories => "品类分析",
            View::Refunds => "退款分析",
            View::Chat => "AI数据参谋",
        }
    }
}

/// Which ranked list the overview table shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankedTab {
    #[default]
    Top,
    Rising,
}

impl RankedTab {
    pub fn name(&self) -> &'static str {
        match self {
            RankedTab::Top => "热销商品榜",
            RankedTab::Rising => "销量飙升榜",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            RankedTab::Top => RankedTab::Rising,
            RankedTab::Rising => RankedTab::Top,
        }
    }
}

/// Everything the renderer reads; mutated only by the event loop
pub struct App {
    /// All generated analytics datasets
    pub dashboard: Dashboard,

    /// Active view
    pub view: View,

    /// Active ranked-list tab on the overview
    pub ranked_tab: RankedTab,
    pub top_pager: Pager,
    pub rising_pager: Pager,

    /// Active channel tab and its product pager
    pub active_channel: Channel,
    pub channel_pager: Pager,

    /// Active category tab and its generated sub-category bars
    pub active_category: usize,
    pub subcategories: Vec<NamedValue>,

    pub refund_pager: Pager,

    /// Chat session state machine
    pub chat: ChatController,
    /// Text in the chat input box
    pub chat_input: String,
    /// Text handed off by `send`, picked up by the event loop to
    /// dispatch the outbound request
    pending_dispatch: Option<String>,

    /// Set when a quit binding fires; the event loop exits on it
    pub should_quit: bool,

    /// Palette currently in effect
    pub theme_kind: ThemeKind,
    pub theme: Theme,

    /// Debounce and hold-to-repeat tracking
    input_handler: InputHandler,

    /// Log buffer for the status bar
    pub log_buffer: LogBuffer,

    /// Process start, drives the uptime clock
    pub start_time: Instant,

    /// Animation frame counter for spinners
    animation_frame: usize,
}

impl App {
    pub fn new(theme_kind: ThemeKind, log_buffer: LogBuffer, has_credential: bool) -> Self {
        let mut chat = ChatController::new();
        chat.initialize(has_credential);

        Self {
            dashboard: Dashboard::generate(),
            view: View::default(),
            ranked_tab: RankedTab::default(),
            top_pager: Pager::default(),
            rising_pager: Pager::default(),
            active_channel: Channel::default(),
            channel_pager: Pager::default(),
            active_category: 0,
            subcategories: generate_subcategories(0),
            refund_pager: Pager::default(),
            chat,
            chat_input: String::new(),
            pending_dispatch: None,
            should_quit: false,
            theme: theme_kind.theme(),
            theme_kind,
            input_handler: InputHandler::default(),
            log_buffer,
            start_time: Instant::now(),
            animation_frame: 0,
        }
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn next_view(&mut self) {
        self.view = self.view.next();
    }

    pub fn prev_view(&mut self) {
        self.view = self.view.prev();
    }

    pub fn next_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
        tracing::info!("theme switched to {}", self.theme_kind.name());
    }

    /// Regenerate every dataset (manual refresh)
    pub fn refresh_data(&mut self) {
        self.dashboard = Dashboard::generate();
        self.subcategories = generate_subcategories(self.active_category);
        self.top_pager.reset();
        self.rising_pager.reset();
        self.channel_pager.reset();
        self.refund_pager.reset();
        tracing::info!("datasets regenerated");
    }

    /// Switch the overview ranked table between top sellers and risers
    pub fn toggle_ranked_tab(&mut self) {
        self.ranked_tab = self.ranked_tab.toggle();
    }

    /// Switch the active channel. The product pager resets so the new
    /// list starts from its first page.
    pub fn set_channel(&mut self, channel: Channel) {
        if self.active_channel != channel {
            self.active_channel = channel;
            self.channel_pager.reset();
        }
    }

    /// Switch the active category. The sub-category bars and both
    /// ranked product lists are replaced wholesale.
    pub fn set_category(&mut self, index: usize) {
        let index = index % CATEGORIES.len();
        if self.active_category != index {
            self.active_category = index;
            self.subcategories = generate_subcategories(index);
            self.dashboard.refresh_ranked_products();
            self.top_pager.reset();
            self.rising_pager.reset();
        }
    }

    /// The pager and list length driving the current view, if the view
    /// is paginated
    fn active_pager(&mut self) -> Option<(&mut Pager, usize)> {
        match self.view {
            View::Overview => match self.ranked_tab {
                RankedTab::Top => Some((&mut self.top_pager, self.dashboard.top_products.len())),
                RankedTab::Rising => {
                    Some((&mut self.rising_pager, self.dashboard.rising_products.len()))
                }
            },
            View::Channels => {
                let total = self.dashboard.channel(self.active_channel).products.len();
                Some((&mut self.channel_pager, total))
            }
            View::Refunds => Some((&mut self.refund_pager, self.dashboard.refund_products.len())),
            _ => None,
        }
    }

    /// Flip to the next page of the current list
    pub fn page_next(&mut self) {
        if let Some((pager, total)) = self.active_pager() {
            pager.next(total);
        }
    }

    /// Flip to the previous page of the current list
    pub fn page_prev(&mut self) {
        if let Some((pager, _)) = self.active_pager() {
            pager.prev();
        }
    }

    /// Jump to a specific page of the current list
    pub fn page_set(&mut self, page: usize) {
        if let Some((pager, total)) = self.active_pager() {
            pager.set(page, total);
        }
    }

    // ── Chat ────────────────────────────────────────────────────────────

    /// Push typed text into the chat input box
    pub fn chat_input_char(&mut self, c: char) {
        self.chat_input.push(c);
    }

    pub fn chat_input_backspace(&mut self) {
        self.chat_input.pop();
    }

    /// Submit the chat input box. On an accepted send the input box is
    /// cleared and the text is queued for the event loop to dispatch.
    pub fn chat_submit(&mut self) {
        let text = self.chat_input.clone();
        if let Some(dispatched) = self.chat.send(&text) {
            self.chat_input.clear();
            self.pending_dispatch = Some(dispatched);
        }
    }

    /// Submit a canned quick prompt, bypassing the input box
    pub fn chat_quick_prompt(&mut self, prompt: &str) {
        if let Some(dispatched) = self.chat.send(prompt) {
            self.pending_dispatch = Some(dispatched);
        }
    }

    /// Take the queued outbound text, if any. The event loop calls this
    /// after input handling to spawn the streaming worker.
    pub fn take_pending_dispatch(&mut self) -> Option<String> {
        self.pending_dispatch.take()
    }

    /// Apply a streaming event from the worker
    pub fn apply_chat_event(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Fragment(text) => self.chat.on_fragment(&text),
            ChatEvent::Completed => self.chat.on_complete(),
            ChatEvent::Failed(error) => self.chat.on_failure(&error),
        }
    }

    // ── Input plumbing ──────────────────────────────────────────────────

    /// Debounced press; true when the bound action should fire
    pub fn handle_key_press(&mut self, key: crossterm::event::KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    pub fn handle_key_release(&mut self, key: crossterm::event::KeyCode) {
        self.input_handler.handle_key_release(key);
    }

    /// Advance the spinner animation (called on every tick)
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Current spinner glyph
    pub fn spinner_char(&self) -> &'static str {
        SPINNER_FRAMES[self.animation_frame % SPINNER_FRAMES.len()]
    }

    /// HH:MM:SS since launch
    pub fn uptime(&self) -> String {
        let total = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pager::PAGE_SIZE;

    fn app() -> App {
        App::new(ThemeKind::Dark, LogBuffer::new(), true)
    }

    #[test]
    fn view_cycle_wraps_both_ways() {
        assert_eq!(View::Overview.next(), View::Channels);
        assert_eq!(View::Chat.next(), View::Overview);
        assert_eq!(View::Overview.prev(), View::Chat);
    }

    #[test]
    fn page_next_respects_active_view() {
        let mut a = app();
        a.set_view(View::Overview);
        a.page_next();
        assert_eq!(a.top_pager.current(), 2);
        // Other pagers untouched
        assert_eq!(a.rising_pager.current(), 1);
        assert_eq!(a.refund_pager.current(), 1);

        // Chat view has no pager
        a.set_view(View::Chat);
        a.page_next();
        assert_eq!(a.top_pager.current(), 2);
    }

    #[test]
    fn ranked_tab_switch_uses_its_own_pager() {
        let mut a = app();
        a.page_next();
        a.toggle_ranked_tab();
        assert_eq!(a.ranked_tab, RankedTab::Rising);
        // Rising list still on page 1
        a.page_next();
        assert_eq!(a.rising_pager.current(), 2);
        assert_eq!(a.top_pager.current(), 2);
    }

    #[test]
    fn channel_switch_resets_product_pager() {
        let mut a = app();
        a.set_view(View::Channels);
        a.page_next();
        assert_eq!(a.channel_pager.current(), 2);

        a.set_channel(a.active_channel.next());
        assert_eq!(a.channel_pager.current(), 1);

        // Re-selecting the same channel keeps the page
        a.page_next();
        let current = a.active_channel;
        a.set_channel(current);
        assert_eq!(a.channel_pager.current(), 2);
    }

    #[test]
    fn category_switch_replaces_ranked_lists_and_resets_pagers() {
        let mut a = app();
        a.page_next();
        a.set_category(3);
        assert_eq!(a.active_category, 3);
        assert_eq!(a.top_pager.current(), 1);
        assert_eq!(a.subcategories.len(), 5);
        assert_eq!(a.dashboard.top_products.len(), 50);
    }

    #[test]
    fn chat_submit_clears_input_only_on_accept() {
        let mut a = app();
        a.chat_input.push_str("   ");
        a.chat_submit();
        // Whitespace-only send refused, input kept
        assert_eq!(a.chat_input, "   ");
        assert!(a.take_pending_dispatch().is_none());

        a.chat_input.clear();
        a.chat_input.push_str("今日GMV？");
        a.chat_submit();
        assert!(a.chat_input.is_empty());
        assert_eq!(a.take_pending_dispatch().as_deref(), Some("今日GMV？"));
        // Dispatch is consumed exactly once
        assert!(a.take_pending_dispatch().is_none());
    }

    #[test]
    fn window_slice_matches_pager_math() {
        let a = app();
        let window = a.top_pager.window(a.dashboard.top_products.len());
        assert_eq!(window, 0..PAGE_SIZE);
    }
}
