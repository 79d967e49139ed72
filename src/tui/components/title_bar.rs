// Title bar component
//
// Renders the app title with the assistant activity indicator and the
// current date.

use crate::chat::ChatPhase;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let activity = match app.chat.phase() {
        ChatPhase::AwaitingResponse => format!(" {} 参谋思考中", app.spinner_char()),
        ChatPhase::Streaming => format!(" {} 参谋回复中", app.spinner_char()),
        _ => String::new(),
    };

    let date = chrono::Local::now().format("%Y-%m-%d");
    let title_text = format!(" 🍏 生鲜智能BI{} ──── {}", activity, date);

    let title = Paragraph::new(title_text)
        .style(
            Style::new()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::new().fg(app.theme.accent))
                .title_top(Line::from(format!(" {} ", app.theme_kind.name())).right_aligned()),
        );

    f.render_widget(title, area);
}
