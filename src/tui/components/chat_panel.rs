// Chat panel - AI analyst transcript, quick prompts, and input box
//
// Assistant replies are markdown and render through the markdown module.
// The transcript sticks to the bottom so the newest fragment is always
// visible while streaming.

use crate::chat::{ChatMessage, ChatPhase, QUICK_PROMPTS};
use crate::tui::app::App;
use crate::tui::markdown;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Fixed accuracy disclaimer shown under the input line
const DISCLAIMER: &str = "AI生成内容仅供参考，请以实际经营数据为准";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    // Quick prompts only while the conversation has not started
    let show_prompts = app.chat.transcript().len() <= 1 && app.chat.can_send();

    let mut constraints = vec![Constraint::Length(1), Constraint::Min(4)];
    if show_prompts {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_context(frame, chunks[0], app);
    render_transcript(frame, chunks[1], app);
    if show_prompts {
        render_quick_prompts(frame, chunks[2], app);
    }
    render_input(frame, chunks[chunks.len() - 2], app);

    let disclaimer = Paragraph::new(Line::from(Span::styled(
        format!(" {}", DISCLAIMER),
        app.theme.dim(),
    )));
    frame.render_widget(disclaimer, chunks[chunks.len() - 1]);
}

/// One-line dashboard context so the operator can sanity-check the
/// assistant against the numbers on screen
fn render_context(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let cards = &app.dashboard.metric_cards;
    let mut spans = vec![Span::styled(" 当前数据: ", theme.dim())];
    for card in cards.iter().take(3) {
        spans.push(Span::styled(
            format!("{} {}  ", card.title, card.value),
            theme.text(),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_transcript(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" AI数据参谋 ")
        .title_style(theme.panel_title())
        .border_style(theme.frame_style(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for message in app.chat.transcript() {
        let clock = message
            .timestamp()
            .with_timezone(&chrono::Local)
            .format("%H:%M");
        match message {
            ChatMessage::User { text, .. } => {
                lines.push(Line::from(vec![
                    Span::styled(
                        "我 ▸ ",
                        Style::new()
                            .fg(theme.chat_user)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(text.clone(), theme.text()),
                    Span::styled(format!("  {}", clock), theme.dim()),
                ]));
            }
            ChatMessage::Assistant { text, streaming, .. } => {
                let header = if *streaming {
                    format!("AI ▸ {} ", app.spinner_char())
                } else {
                    "AI ▸".to_string()
                };
                lines.push(Line::from(vec![
                    Span::styled(
                        header,
                        Style::new()
                            .fg(theme.chat_assistant)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {}", clock), theme.dim()),
                ]));
                if text == crate::chat::APOLOGY_MESSAGE
                    || text == crate::chat::MISSING_KEY_MESSAGE
                {
                    lines.push(Line::from(Span::styled(text.clone(), theme.error_text())));
                } else {
                    lines.extend(markdown::render_lines(text, theme));
                }
            }
        }
        lines.push(Line::default());
    }

    // Request sent, nothing streamed back yet
    if app.chat.phase() == ChatPhase::AwaitingResponse {
        lines.push(Line::from(Span::styled(
            format!("AI ▸ {} 思考中…", app.spinner_char()),
            Style::new().fg(theme.chat_assistant),
        )));
    }

    // Stick to the bottom; older messages scroll out of the top
    let offset = lines.len().saturating_sub(inner.height as usize) as u16;
    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    frame.render_widget(transcript, inner);
}

fn render_quick_prompts(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans: Vec<Span> = vec![Span::styled(" 快捷提问: ", theme.dim())];
    for (i, (label, _)) in QUICK_PROMPTS.iter().enumerate() {
        spans.push(Span::styled(
            format!("[Alt+{} {}] ", i + 1, label),
            Style::new().fg(theme.chat_assistant),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let (title, border_style) = match app.chat.phase() {
        ChatPhase::ConfigError => (" 聊天不可用 ".to_string(), theme.error_text()),
        ChatPhase::AwaitingResponse | ChatPhase::Streaming => (
            format!(" {} 等待回复中… ", app.spinner_char()),
            theme.frame_style(false),
        ),
        _ => (
            " 输入问题 (Enter 发送) ".to_string(),
            theme.frame_style(true),
        ),
    };

    let text = if app.chat.can_send() {
        format!("{}▏", app.chat_input)
    } else {
        app.chat_input.clone()
    };

    let input = Paragraph::new(text).style(theme.text()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );
    frame.render_widget(input, area);
}
