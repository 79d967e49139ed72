// Chat session controller
//
// This module manages the AI assistant conversation: the transcript,
// the streaming state machine, and the rules for when a send is
// allowed. It is deliberately free of any network code so the state
// transitions can be unit tested; the Gemini client lives in gemini.rs
// and the TUI event loop wires the two together.
//
// State Diagram:
//
//   [Uninitialized] ──init(key ok)──▶ [Ready] ◀───────────────┐
//         │                             │                     │
//         │ init(key missing)           │ send(text)          │ complete /
//         ▼                             ▼                     │ fail
//   [ConfigError]              [AwaitingResponse]             │
//   (terminal - sends          first fragment │               │
//    are no-ops)                              ▼               │
//                                        [Streaming] ─────────┘
//
// A failure from AwaitingResponse or Streaming appends one apology
// message and returns to Ready; partial streamed text is kept.

pub mod gemini;

use chrono::{DateTime, Utc};

/// Fixed transcript strings (mirrors the persona's operating language)
pub const GREETING: &str =
    "你好！我是您的AI数据参谋。我可以协助分析今日销售、诊断退款异常、或生成经营日报。请问有什么可以帮您？";
pub const MISSING_KEY_MESSAGE: &str = "错误: 缺少 GEMINI_API_KEY 环境变量。";
pub const APOLOGY_MESSAGE: &str = "抱歉，处理您的请求时遇到了错误。";

/// Quick prompts offered while the transcript is still short
pub const QUICK_PROMPTS: [(&str, &str); 3] = [
    (
        "生成日报",
        "请基于昨日数据生成一份店铺经营日报，包含核心指标变化和异常分析。",
    ),
    (
        "退款分析",
        "分析目前面板上显示的退款率过高的主要原因，并给出改进建议。",
    ),
    (
        "热销商品建议",
        "列出当前的Top3热销商品，并针对每个商品给出增加连带率的营销建议。",
    ),
];

/// A transcript entry. Assistant text is mutable while `streaming`,
/// immutable afterwards; messages are never deleted within a session.
#[derive(Debug, Clone)]
pub enum ChatMessage {
    User {
        text: String,
        timestamp: DateTime<Utc>,
    },
    Assistant {
        text: String,
        timestamp: DateTime<Utc>,
        streaming: bool,
    },
}

impl ChatMessage {
    pub fn text(&self) -> &str {
        match self {
            ChatMessage::User { text, .. } | ChatMessage::Assistant { text, .. } => text,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ChatMessage::User { timestamp, .. } | ChatMessage::Assistant { timestamp, .. } => {
                *timestamp
            }
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, ChatMessage::User { .. })
    }
}

/// Events the streaming worker sends back to the event loop
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// One text fragment arrived from the stream
    Fragment(String),
    /// The stream ended naturally
    Completed,
    /// The request or stream failed
    Failed(String),
}

/// Phase of the chat session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    /// Before initialization
    Uninitialized,
    /// Idle, sends allowed
    Ready,
    /// Request issued, no fragment seen yet
    AwaitingResponse,
    /// Fragments arriving
    Streaming,
    /// Credential missing - terminal, sends are no-ops
    ConfigError,
}

/// State machine for the assistant conversation
///
/// Each method represents an event that can trigger a transition. The
/// controller enforces at-most-one-in-flight: `send` refuses while a
/// response is pending.
pub struct ChatController {
    phase: ChatPhase,
    transcript: Vec<ChatMessage>,
    /// Accumulated text of the in-flight response. The displayed
    /// assistant message is always this full buffer, never a delta.
    buffer: String,
}

impl ChatController {
    pub fn new() -> Self {
        Self {
            phase: ChatPhase::Uninitialized,
            transcript: Vec::new(),
            buffer: String::new(),
        }
    }

    /// Initialize the session. With a credential the transcript opens
    /// with the greeting; without one it holds exactly the fixed
    /// configuration-error message and the session is dead.
    pub fn initialize(&mut self, has_credential: bool) {
        debug_assert_eq!(self.phase, ChatPhase::Uninitialized);
        if has_credential {
            self.transcript
                .push(Self::assistant_message(GREETING.to_string(), false));
            self.phase = ChatPhase::Ready;
        } else {
            tracing::warn!("GEMINI_API_KEY missing - chat disabled");
            self.transcript
                .push(Self::assistant_message(MISSING_KEY_MESSAGE.to_string(), false));
            self.phase = ChatPhase::ConfigError;
        }
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Whether the send affordance is enabled
    pub fn can_send(&self) -> bool {
        self.phase == ChatPhase::Ready
    }

    /// Whether a response is currently in flight
    pub fn in_flight(&self) -> bool {
        matches!(
            self.phase,
            ChatPhase::AwaitingResponse | ChatPhase::Streaming
        )
    }

    /// Try to send user text. Returns the trimmed text to dispatch to
    /// the API, or None when the send is refused (empty input, request
    /// already in flight, or initialization failed). On success the
    /// user message is already on the transcript - the caller only
    /// issues the outbound call.
    pub fn send(&mut self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() || !self.can_send() {
            return None;
        }

        self.transcript.push(ChatMessage::User {
            text: trimmed.to_string(),
            timestamp: Utc::now(),
        });
        self.buffer.clear();
        self.phase = ChatPhase::AwaitingResponse;
        Some(trimmed.to_string())
    }

    /// A fragment arrived. The first one creates the assistant
    /// placeholder; every fragment replaces the placeholder's text
    /// with the full accumulated buffer.
    pub fn on_fragment(&mut self, fragment: &str) {
        match self.phase {
            ChatPhase::AwaitingResponse => {
                self.phase = ChatPhase::Streaming;
                self.buffer.push_str(fragment);
                self.transcript
                    .push(Self::assistant_message(self.buffer.clone(), true));
            }
            ChatPhase::Streaming => {
                self.buffer.push_str(fragment);
                let text = self.buffer.clone();
                self.set_streaming_text(text);
            }
            // Late fragment after completion/failure - drop it
            _ => {}
        }
    }

    /// The stream ended naturally. The assistant message (if any) is
    /// frozen and the session becomes sendable again.
    pub fn on_complete(&mut self) {
        if !self.in_flight() {
            return;
        }
        self.freeze_streaming_message();
        self.phase = ChatPhase::Ready;
    }

    /// The request or stream failed. One apology is appended; partial
    /// streamed content already shown is kept as-is.
    pub fn on_failure(&mut self, error: &str) {
        if !self.in_flight() {
            return;
        }
        tracing::error!("chat request failed: {}", error);
        self.freeze_streaming_message();
        self.transcript
            .push(Self::assistant_message(APOLOGY_MESSAGE.to_string(), false));
        self.phase = ChatPhase::Ready;
    }

    /// Completed conversation turns for the outbound request: every
    /// non-streaming message after the greeting, as (is_user, text).
    pub fn history(&self) -> Vec<(bool, String)> {
        self.transcript
            .iter()
            .skip(1) // greeting is part of the persona, not the dialogue
            .filter(|m| !matches!(m, ChatMessage::Assistant { streaming: true, .. }))
            .filter(|m| m.text() != APOLOGY_MESSAGE && m.text() != MISSING_KEY_MESSAGE)
            .map(|m| (m.is_user(), m.text().to_string()))
            .collect()
    }

    fn assistant_message(text: String, streaming: bool) -> ChatMessage {
        ChatMessage::Assistant {
            text,
            timestamp: Utc::now(),
            streaming,
        }
    }

    fn set_streaming_text(&mut self, new_text: String) {
        if let Some(ChatMessage::Assistant {
            text,
            streaming: true,
            ..
        }) = self.transcript.last_mut()
        {
            *text = new_text;
        }
    }

    fn freeze_streaming_message(&mut self) {
        if let Some(ChatMessage::Assistant { streaming, .. }) = self.transcript.last_mut() {
            *streaming = false;
        }
    }
}

impl Default for ChatController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_controller() -> ChatController {
        let mut c = ChatController::new();
        c.initialize(true);
        c
    }

    #[test]
    fn initialize_with_credential_greets() {
        let c = ready_controller();
        assert_eq!(c.phase(), ChatPhase::Ready);
        assert_eq!(c.transcript().len(), 1);
        assert_eq!(c.transcript()[0].text(), GREETING);
    }

    #[test]
    fn missing_credential_is_terminal() {
        let mut c = ChatController::new();
        c.initialize(false);
        assert_eq!(c.phase(), ChatPhase::ConfigError);
        assert_eq!(c.transcript().len(), 1);
        assert_eq!(c.transcript()[0].text(), MISSING_KEY_MESSAGE);

        // No send ever succeeds afterward
        assert!(c.send("帮我分析数据").is_none());
        assert_eq!(c.transcript().len(), 1);
    }

    #[test]
    fn empty_or_whitespace_send_is_ignored() {
        let mut c = ready_controller();
        assert!(c.send("").is_none());
        assert!(c.send("   \n\t ").is_none());
        assert_eq!(c.transcript().len(), 1);
        assert_eq!(c.phase(), ChatPhase::Ready);
    }

    #[test]
    fn send_appends_user_message_and_blocks_reentry() {
        let mut c = ready_controller();
        let dispatched = c.send("  今日GMV多少？ ").expect("send allowed");
        assert_eq!(dispatched, "今日GMV多少？");
        assert_eq!(c.phase(), ChatPhase::AwaitingResponse);
        assert_eq!(c.transcript().len(), 2);
        assert!(c.transcript()[1].is_user());

        // Second send while in flight mutates nothing
        assert!(c.send("再问一个").is_none());
        assert_eq!(c.transcript().len(), 2);
    }

    #[test]
    fn fragments_accumulate_never_skip() {
        let mut c = ready_controller();
        c.send("hi").unwrap();

        c.on_fragment("A");
        assert_eq!(c.phase(), ChatPhase::Streaming);
        assert_eq!(c.transcript().last().unwrap().text(), "A");

        c.on_fragment("B");
        assert_eq!(c.transcript().last().unwrap().text(), "AB");

        c.on_fragment("C");
        assert_eq!(c.transcript().last().unwrap().text(), "ABC");

        c.on_complete();
        assert_eq!(c.phase(), ChatPhase::Ready);
        // Text frozen after completion
        assert_eq!(c.transcript().last().unwrap().text(), "ABC");
    }

    #[test]
    fn failure_before_any_fragment_appends_one_apology() {
        let mut c = ready_controller();
        c.send("hi").unwrap();
        let before = c.transcript().len();

        c.on_failure("connection refused");
        assert_eq!(c.phase(), ChatPhase::Ready);
        assert_eq!(c.transcript().len(), before + 1);
        assert_eq!(c.transcript().last().unwrap().text(), APOLOGY_MESSAGE);
        assert!(c.can_send());
    }

    #[test]
    fn failure_mid_stream_keeps_partial_content() {
        let mut c = ready_controller();
        c.send("hi").unwrap();
        c.on_fragment("部分回答");

        c.on_failure("stream reset");
        let texts: Vec<&str> = c.transcript().iter().map(|m| m.text()).collect();
        assert!(texts.contains(&"部分回答"));
        assert_eq!(*texts.last().unwrap(), APOLOGY_MESSAGE);
        assert!(c.can_send());
    }

    #[test]
    fn late_events_after_completion_are_dropped() {
        let mut c = ready_controller();
        c.send("hi").unwrap();
        c.on_fragment("done");
        c.on_complete();

        let len = c.transcript().len();
        c.on_fragment("stray");
        c.on_complete();
        c.on_failure("stray");
        assert_eq!(c.transcript().len(), len);
        assert_eq!(c.transcript().last().unwrap().text(), "done");
    }

    #[test]
    fn history_excludes_greeting_apologies_and_inflight() {
        let mut c = ready_controller();
        c.send("问题一").unwrap();
        c.on_fragment("答案一");
        c.on_complete();

        c.send("问题二").unwrap();
        c.on_failure("boom");

        c.send("问题三").unwrap();
        c.on_fragment("流式中");

        let history = c.history();
        let texts: Vec<&str> = history.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, vec!["问题一", "答案一", "问题二", "问题三"]);
        assert!(history[0].0);
        assert!(!history[1].0);
    }
}
